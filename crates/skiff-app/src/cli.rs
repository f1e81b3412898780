use clap::Parser;

use skiff_config::Settings;

/// skiff — a minimal multi-window browser shell.
///
/// Lowercase single-letter flags disable a feature, their uppercase
/// counterparts enable it; the last one on the command line wins the
/// way they are applied in sequence here. New windows are spawned with
/// the flags that reproduce the parent's toggle state.
#[derive(Parser, Debug, Default)]
#[command(name = "skiff", version, about)]
pub struct Args {
    /// Cookie policy rotation letters (a=never, @=no third party,
    /// A=always).
    #[arg(short = 'a', value_name = "POLICIES")]
    pub cookie_policies: Option<String>,

    /// Cookie jar path.
    #[arg(short = 'c', value_name = "FILE")]
    pub cookie_file: Option<String>,

    /// Host window handle to embed into.
    #[arg(short = 'e', value_name = "WINID")]
    pub embed: Option<String>,

    /// Start fullscreen.
    #[arg(short = 'f', overrides_with = "no_fullscreen")]
    pub fullscreen: bool,
    #[arg(short = 'F', hide = true)]
    pub no_fullscreen: bool,

    /// Disallow geolocation.
    #[arg(short = 'g', overrides_with = "geolocation")]
    pub no_geolocation: bool,
    #[arg(short = 'G', hide = true)]
    pub geolocation: bool,

    /// Disable image loading.
    #[arg(short = 'i', overrides_with = "images")]
    pub no_images: bool,
    #[arg(short = 'I', hide = true)]
    pub images: bool,

    /// Disable java applets.
    #[arg(short = 'j', overrides_with = "java")]
    pub no_java: bool,
    #[arg(short = 'J', hide = true)]
    pub java: bool,

    /// Kiosk mode: ignore all keybindings.
    #[arg(short = 'k', overrides_with = "no_kiosk")]
    pub kiosk: bool,
    #[arg(short = 'K', hide = true)]
    pub no_kiosk: bool,

    /// Disable the page inspector.
    #[arg(short = 'n', overrides_with = "inspector")]
    pub no_inspector: bool,
    #[arg(short = 'N', hide = true)]
    pub inspector: bool,

    /// Disable plugins.
    #[arg(short = 'p', overrides_with = "plugins")]
    pub no_plugins: bool,
    #[arg(short = 'P', hide = true)]
    pub plugins: bool,

    /// Script injected into every page.
    #[arg(short = 'r', value_name = "FILE")]
    pub script_file: Option<String>,

    /// Disable javascript.
    #[arg(short = 's', overrides_with = "javascript")]
    pub no_javascript: bool,
    #[arg(short = 'S', hide = true)]
    pub javascript: bool,

    /// User stylesheet toggled per window.
    #[arg(short = 't', value_name = "FILE")]
    pub style_file: Option<String>,

    /// User agent string.
    #[arg(short = 'u', value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Print each new window's client id to stdout.
    #[arg(short = 'x')]
    pub show_window_id: bool,

    /// Initial zoom level.
    #[arg(short = 'z', value_name = "LEVEL")]
    pub zoom: Option<f64>,

    /// Config file path override.
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Log directive override (e.g. skiff=debug).
    #[arg(long, value_name = "DIRECTIVE")]
    pub log_level: Option<String>,

    /// Page to open.
    #[arg(value_name = "URI")]
    pub uri: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Layer command-line flags over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(policies) = &self.cookie_policies {
            settings.cookie_policies = policies.clone();
            settings.cookie_policy = 0;
        }
        if let Some(file) = &self.cookie_file {
            settings.cookie_file = file.clone();
        }
        if let Some(embed) = &self.embed {
            settings.embed = Some(embed.clone());
        }
        if self.fullscreen {
            settings.run_fullscreen = true;
        }
        if self.no_fullscreen {
            settings.run_fullscreen = false;
        }
        if self.no_geolocation {
            settings.allow_geolocation = false;
        }
        if self.geolocation {
            settings.allow_geolocation = true;
        }
        if self.no_images {
            settings.load_images = false;
        }
        if self.images {
            settings.load_images = true;
        }
        if self.no_java {
            settings.enable_java = false;
        }
        if self.java {
            settings.enable_java = true;
        }
        if self.kiosk {
            settings.kiosk_mode = true;
        }
        if self.no_kiosk {
            settings.kiosk_mode = false;
        }
        if self.no_inspector {
            settings.enable_inspector = false;
        }
        if self.inspector {
            settings.enable_inspector = true;
        }
        if self.no_plugins {
            settings.enable_plugins = false;
        }
        if self.plugins {
            settings.enable_plugins = true;
        }
        if let Some(file) = &self.script_file {
            settings.script_file = file.clone();
        }
        if self.no_javascript {
            settings.enable_javascript = false;
        }
        if self.javascript {
            settings.enable_javascript = true;
        }
        if let Some(file) = &self.style_file {
            settings.style_file = file.clone();
        }
        if let Some(agent) = &self.user_agent {
            settings.user_agent = agent.clone();
        }
        if self.show_window_id {
            settings.show_window_id = true;
        }
        if let Some(zoom) = self.zoom {
            settings.zoom_level = zoom;
        }
        settings.start_uri = self.uri.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("skiff").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn lowercase_disables_uppercase_enables() {
        let mut settings = Settings::default();
        parse(&["-i", "-s", "-g"]).apply(&mut settings);
        assert!(!settings.load_images);
        assert!(!settings.enable_javascript);
        assert!(!settings.allow_geolocation);

        parse(&["-I", "-S", "-G"]).apply(&mut settings);
        assert!(settings.load_images);
        assert!(settings.enable_javascript);
        assert!(settings.allow_geolocation);
    }

    #[test]
    fn kiosk_flag_enables_kiosk_mode() {
        let mut settings = Settings::default();
        parse(&["-k"]).apply(&mut settings);
        assert!(settings.kiosk_mode);

        parse(&["-K"]).apply(&mut settings);
        assert!(!settings.kiosk_mode);
    }

    #[test]
    fn value_flags_and_positional_uri() {
        let mut settings = Settings::default();
        parse(&[
            "-a",
            "Aa@",
            "-c",
            "/tmp/jar",
            "-z",
            "1.5",
            "-u",
            "agent/1",
            "example.com",
        ])
        .apply(&mut settings);
        assert_eq!(settings.cookie_policies, "Aa@");
        assert_eq!(settings.cookie_policy, 0);
        assert_eq!(settings.cookie_file, "/tmp/jar");
        assert_eq!(settings.zoom_level, 1.5);
        assert_eq!(settings.user_agent, "agent/1");
        assert_eq!(settings.start_uri.as_deref(), Some("example.com"));
    }

    #[test]
    fn double_dash_guards_dashed_uris() {
        let args = parse(&["-k", "--", "-weird-host"]);
        assert_eq!(args.uri.as_deref(), Some("-weird-host"));
    }

    #[test]
    fn unflagged_settings_are_untouched() {
        let mut settings = Settings::default();
        let defaults = settings.clone();
        parse(&[]).apply(&mut settings);
        assert_eq!(settings.cookie_file, defaults.cookie_file);
        assert_eq!(settings.user_agent, defaults.user_agent);
        assert!(settings.start_uri.is_none());
    }
}
