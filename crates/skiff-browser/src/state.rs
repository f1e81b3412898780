//! Page state for one client, folded from engine events.

use skiff_common::{EngineEvent, Hover};

/// Everything the shell tracks about the page in one window.
///
/// A fresh client reports progress 100 so the title shows no progress
/// prefix before the first load begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Last committed URI; empty until the first commit.
    pub uri: String,
    pub title: String,
    /// Estimated load progress, 0-100.
    pub progress: u8,
    /// A navigation in the current load cycle has been confirmed.
    pub committed: bool,
    /// The committed response arrived over TLS.
    pub secure: bool,
    /// TLS was used but certificate validation failed.
    pub secure_failed: bool,
    /// An insecure sub-resource loaded on a secure page. Sticky for
    /// the rest of the load cycle.
    pub insecure_content: bool,
    pub hover: Hover,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            uri: String::new(),
            title: String::new(),
            progress: 100,
            committed: false,
            secure: false,
            secure_failed: false,
            insecure_content: false,
            hover: Hover::clear(),
        }
    }
}

impl PageState {
    /// Fold one engine event into the state.
    pub fn apply(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::LoadStarted => {
                self.progress = 0;
                self.committed = false;
                self.secure = false;
                self.secure_failed = false;
                self.insecure_content = false;
            }
            EngineEvent::LoadCommitted {
                uri,
                secure,
                secure_failed,
            } => {
                self.uri = uri.clone();
                self.committed = true;
                self.secure = *secure;
                self.secure_failed = *secure_failed;
            }
            EngineEvent::LoadFinished => {
                self.progress = 100;
            }
            EngineEvent::Progress(p) => {
                // estimates never move backwards within one load cycle
                self.progress = (*p).min(100).max(self.progress);
            }
            EngineEvent::TitleChanged(title) => {
                self.title = title.clone();
            }
            EngineEvent::HoverChanged(hover) => {
                self.hover = hover.clone();
            }
            EngineEvent::InsecureContent => {
                self.insecure_content = true;
            }
            // routed by the shell, not page state
            EngineEvent::OpenWindow { .. }
            | EngineEvent::DownloadRequested { .. }
            | EngineEvent::PermissionRequested { .. } => {}
        }
    }

    /// URI to put on the clipboard: the hovered link when there is
    /// one, otherwise the page itself.
    pub fn link_or_uri(&self) -> &str {
        self.hover.uri.as_deref().unwrap_or(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_shows_no_progress_prefix() {
        assert_eq!(PageState::default().progress, 100);
    }

    #[test]
    fn load_started_resets_per_load_flags() {
        let mut state = PageState {
            progress: 100,
            committed: true,
            secure: true,
            secure_failed: true,
            insecure_content: true,
            ..Default::default()
        };
        state.apply(&EngineEvent::LoadStarted);
        assert_eq!(state.progress, 0);
        assert!(!state.committed);
        assert!(!state.secure);
        assert!(!state.secure_failed);
        assert!(!state.insecure_content);
    }

    #[test]
    fn commit_records_uri_and_transport() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::LoadStarted);
        state.apply(&EngineEvent::LoadCommitted {
            uri: "https://example.com/".into(),
            secure: true,
            secure_failed: false,
        });
        assert_eq!(state.uri, "https://example.com/");
        assert!(state.committed);
        assert!(state.secure);
    }

    #[test]
    fn insecure_content_is_sticky_until_next_load() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::LoadStarted);
        state.apply(&EngineEvent::InsecureContent);
        state.apply(&EngineEvent::Progress(80));
        state.apply(&EngineEvent::LoadFinished);
        assert!(state.insecure_content);

        state.apply(&EngineEvent::LoadStarted);
        assert!(!state.insecure_content);
    }

    #[test]
    fn progress_is_capped() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::Progress(250));
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn progress_never_regresses_within_a_load() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::LoadStarted);
        state.apply(&EngineEvent::Progress(60));
        state.apply(&EngineEvent::Progress(40));
        assert_eq!(state.progress, 60);

        // a new load cycle starts the climb over
        state.apply(&EngineEvent::LoadStarted);
        state.apply(&EngineEvent::Progress(10));
        assert_eq!(state.progress, 10);
    }

    #[test]
    fn finish_forces_full_progress() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::LoadStarted);
        state.apply(&EngineEvent::Progress(40));
        state.apply(&EngineEvent::LoadFinished);
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn hover_group_is_replaced_whole() {
        let mut state = PageState::default();
        state.apply(&EngineEvent::HoverChanged(Hover {
            uri: Some("http://a/".into()),
            title: Some("A".into()),
            content: None,
        }));
        state.apply(&EngineEvent::HoverChanged(Hover {
            uri: Some("http://b/".into()),
            title: None,
            content: Some("http://b/img.png".into()),
        }));

        // no field from the first target survives the second
        assert_eq!(state.hover.uri.as_deref(), Some("http://b/"));
        assert_eq!(state.hover.title, None);
        assert_eq!(state.hover.content.as_deref(), Some("http://b/img.png"));

        state.apply(&EngineEvent::HoverChanged(Hover::clear()));
        assert!(state.hover.is_clear());
    }

    #[test]
    fn hovered_link_wins_over_page_uri_for_copy() {
        let mut state = PageState {
            uri: "http://home/".into(),
            ..Default::default()
        };
        assert_eq!(state.link_or_uri(), "http://home/");

        state.apply(&EngineEvent::HoverChanged(Hover {
            uri: Some("http://x/".into()),
            title: None,
            content: None,
        }));
        assert_eq!(state.link_or_uri(), "http://x/");

        state.apply(&EngineEvent::HoverChanged(Hover::clear()));
        assert_eq!(state.link_or_uri(), "http://home/");
    }
}
