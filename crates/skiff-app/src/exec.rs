//! Command lines for helper processes.
//!
//! New windows are fresh processes of this same binary, seeded with
//! flags that reproduce the parent's toggle state. Prompts and
//! downloads go to external tools, glued together with `/bin/sh`.

use std::path::Path;

use skiff_config::{paths, Settings};

/// Argv that re-executes `program` as a new window on `uri`.
///
/// Only non-default toggles become flags; the cookie policy rotation
/// and the cookie jar are always passed so every window in the session
/// shares them.
pub fn new_window_argv(program: &str, settings: &Settings, uri: Option<&str>) -> Vec<String> {
    let mut argv = vec![
        program.to_string(),
        "-a".into(),
        settings.cookie_policies.clone(),
    ];
    if let Some(embed) = &settings.embed {
        argv.push("-e".into());
        argv.push(embed.clone());
    }
    if !settings.load_images {
        argv.push("-i".into());
    }
    if !settings.enable_java {
        argv.push("-j".into());
    }
    if settings.kiosk_mode {
        argv.push("-k".into());
    }
    if !settings.enable_plugins {
        argv.push("-p".into());
    }
    if !settings.enable_javascript {
        argv.push("-s".into());
    }
    if settings.show_window_id {
        argv.push("-x".into());
    }
    argv.push("-c".into());
    argv.push(settings.cookie_file.clone());
    argv.push("--".into());
    if let Some(uri) = uri {
        argv.push(uri.to_string());
    }
    argv
}

/// Argv for an interactive prompt that fills a control slot.
///
/// The current value is piped through dmenu; on confirmation the
/// chosen text overwrites the slot file, which the shell picks up
/// through the channel watcher like any external write.
pub fn prompt_argv(current: &str, slot_path: &Path) -> Vec<String> {
    vec![
        "/bin/sh".into(),
        "-c".into(),
        r#"prop="$(printf '%s' "$0" | dmenu)" && printf '%s' "$prop" > "$1""#.into(),
        current.to_string(),
        slot_path.display().to_string(),
    ]
}

/// Argv that fetches `uri` with curl in a throwaway terminal, sharing
/// the session's cookie jar and user agent.
pub fn download_argv(settings: &Settings, uri: &str, referer: &str) -> Vec<String> {
    vec![
        "/bin/sh".into(),
        "-c".into(),
        concat!(
            "st -e /bin/sh -c \"",
            "cd \\\"$4\\\";",
            "curl -L -J -O --user-agent \\\"$1\\\"",
            " --referer \\\"$2\\\" -b \\\"$3\\\" -c \\\"$3\\\" \\\"$0\\\";",
            "sleep 5;\"",
        )
        .into(),
        uri.to_string(),
        settings.user_agent.clone(),
        referer.to_string(),
        paths::expand(&settings.cookie_file).display().to_string(),
        paths::expand(&settings.download_dir).display().to_string(),
    ]
}
