//! Window title composition.

use skiff_config::Settings;

use crate::state::PageState;

/// Compose the visible window title from current state.
///
/// With indicators enabled the layout is
/// `[NN%] <toggles>:<page>` followed by either ` > hoverURI [hoverTitle]`
/// or ` | pageTitle`, then ` <hoverContent>` when the hovered target has
/// media attached. The progress prefix disappears at 100. Letter case
/// encodes state: uppercase means enabled or secure.
pub fn compose(state: &PageState, styled: bool, settings: &Settings, proxy_in_use: bool) -> String {
    if !settings.show_indicators {
        return state.title.clone();
    }

    let mut title = String::new();
    if state.progress < 100 {
        title.push_str(&format!("[{}%] ", state.progress));
    }
    title.push_str(&toggle_block(styled, settings));
    title.push(':');
    title.push_str(&page_block(state, proxy_in_use));

    if let Some(hover_uri) = &state.hover.uri {
        title.push_str(&format!(" > {hover_uri}"));
        if let Some(hover_title) = &state.hover.title {
            title.push_str(&format!(" [{hover_title}]"));
        }
    } else {
        title.push_str(&format!(" | {}", state.title));
    }

    if let Some(content) = &state.hover.content {
        title.push_str(&format!(" <{content}>"));
    }

    title
}

fn flag(enabled: bool, letter: char) -> char {
    if enabled {
        letter.to_ascii_uppercase()
    } else {
        letter.to_ascii_lowercase()
    }
}

/// Fixed-order run of toggle letters.
fn toggle_block(styled: bool, settings: &Settings) -> String {
    [
        settings.cookie_policy_char(),
        flag(settings.caret_browsing, 'c'),
        flag(settings.allow_geolocation, 'g'),
        flag(settings.load_images, 'i'),
        flag(settings.enable_javascript, 's'),
        flag(settings.enable_plugins, 'v'),
        flag(styled, 'm'),
    ]
    .iter()
    .collect()
}

/// Transport letter, then proxy letter.
fn page_block(state: &PageState, proxy_in_use: bool) -> String {
    let transport = if state.secure {
        if state.secure_failed {
            'U'
        } else if state.insecure_content {
            'I'
        } else {
            'T'
        }
    } else {
        '-'
    };
    let proxy = if proxy_in_use { 'P' } else { '-' };
    [transport, proxy].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_common::Hover;

    fn state() -> PageState {
        PageState::default()
    }

    #[test]
    fn hover_uri_suppresses_page_title() {
        let mut s = state();
        s.progress = 45;
        s.secure = true;
        s.title = "Home".into();
        s.hover = Hover {
            uri: Some("http://x".into()),
            title: None,
            content: None,
        };
        assert_eq!(
            compose(&s, false, &Settings::default(), false),
            "[45%] @cGISVm:T- > http://x"
        );
    }

    #[test]
    fn page_title_shows_without_hover() {
        let mut s = state();
        s.title = "Home".into();
        assert_eq!(
            compose(&s, false, &Settings::default(), false),
            "@cGISVm:-- | Home"
        );
    }

    #[test]
    fn progress_prefix_disappears_at_full() {
        let mut s = state();
        s.progress = 99;
        assert!(compose(&s, false, &Settings::default(), false).starts_with("[99%] "));
        s.progress = 100;
        assert!(compose(&s, false, &Settings::default(), false).starts_with('@'));
    }

    #[test]
    fn hover_title_and_content_append() {
        let mut s = state();
        s.hover = Hover {
            uri: Some("http://x/".into()),
            title: Some("X".into()),
            content: Some("http://x/img.png".into()),
        };
        assert_eq!(
            compose(&s, false, &Settings::default(), false),
            "@cGISVm:-- > http://x/ [X] <http://x/img.png>"
        );
    }

    #[test]
    fn letter_case_follows_toggles() {
        let mut settings = Settings::default();
        settings.caret_browsing = true;
        settings.allow_geolocation = false;
        settings.load_images = false;
        settings.enable_javascript = false;
        settings.enable_plugins = false;
        let s = state();
        assert_eq!(
            compose(&s, true, &settings, false),
            "@CgisvM:-- | "
        );
    }

    #[test]
    fn transport_letter_precedence() {
        let mut s = state();
        s.secure = true;
        s.secure_failed = true;
        s.insecure_content = true;
        // failed validation wins over mixed content
        assert!(compose(&s, false, &Settings::default(), false).contains(":U-"));

        s.secure_failed = false;
        assert!(compose(&s, false, &Settings::default(), false).contains(":I-"));

        s.insecure_content = false;
        assert!(compose(&s, false, &Settings::default(), false).contains(":T-"));

        s.secure = false;
        assert!(compose(&s, false, &Settings::default(), false).contains(":--"));
    }

    #[test]
    fn proxy_letter() {
        let s = state();
        assert!(compose(&s, false, &Settings::default(), true).contains(":-P"));
    }

    #[test]
    fn indicators_off_gives_bare_title() {
        let mut settings = Settings::default();
        settings.show_indicators = false;
        let mut s = state();
        s.progress = 30;
        s.title = "Home".into();
        s.hover = Hover {
            uri: Some("http://x/".into()),
            title: None,
            content: None,
        };
        assert_eq!(compose(&s, true, &settings, true), "Home");
    }
}
