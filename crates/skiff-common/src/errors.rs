use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("spawn error: {0}")]
    Spawn(String),

    #[error("property channel error: {0}")]
    Channel(String),

    #[error("reaper error: {0}")]
    Reaper(String),

    #[error("invalid keybind: {0}")]
    Keybind(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("{0}")]
    Other(String),
}
