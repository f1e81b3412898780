//! The rendering-engine seam.
//!
//! `Client` talks to the engine only through this trait, so all the
//! navigation, search, and toggle logic above it runs in tests against
//! a recording mock.

use skiff_common::{Result, WebSetting};

pub trait WebEngine {
    fn load_uri(&self, uri: &str) -> Result<()>;
    fn reload(&self, bypass_cache: bool) -> Result<()>;
    fn stop(&self) -> Result<()>;
    /// Move through session history; negative is back.
    fn history(&self, steps: i32) -> Result<()>;
    fn set_zoom(&self, level: f64) -> Result<()>;
    fn search(&self, text: &str, forward: bool) -> Result<()>;
    fn eval(&self, js: &str) -> Result<()>;
    fn inject_style(&self, css: &str) -> Result<()>;
    fn clear_style(&self) -> Result<()>;
    fn apply_setting(&self, setting: WebSetting, enabled: bool) -> Result<()>;
    fn show_inspector(&self, show: bool) -> Result<()>;
    fn print(&self) -> Result<()>;
    fn focus(&self) -> Result<()>;
    fn set_bounds(&self, width: u32, height: u32) -> Result<()> {
        let _ = (width, height);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every engine call as a formatted line.
    #[derive(Default)]
    pub struct MockEngine {
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl MockEngine {
        pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }

        fn record(&self, line: String) -> Result<()> {
            self.calls.borrow_mut().push(line);
            Ok(())
        }
    }

    impl WebEngine for MockEngine {
        fn load_uri(&self, uri: &str) -> Result<()> {
            self.record(format!("load {uri}"))
        }
        fn reload(&self, bypass_cache: bool) -> Result<()> {
            self.record(format!("reload bypass={bypass_cache}"))
        }
        fn stop(&self) -> Result<()> {
            self.record("stop".into())
        }
        fn history(&self, steps: i32) -> Result<()> {
            self.record(format!("history {steps}"))
        }
        fn set_zoom(&self, level: f64) -> Result<()> {
            self.record(format!("zoom {level:.1}"))
        }
        fn search(&self, text: &str, forward: bool) -> Result<()> {
            self.record(format!("search {text} forward={forward}"))
        }
        fn eval(&self, js: &str) -> Result<()> {
            self.record(format!("eval {js}"))
        }
        fn inject_style(&self, css: &str) -> Result<()> {
            self.record(format!("style {css}"))
        }
        fn clear_style(&self) -> Result<()> {
            self.record("clear-style".into())
        }
        fn apply_setting(&self, setting: WebSetting, enabled: bool) -> Result<()> {
            self.record(format!("setting {setting:?}={enabled}"))
        }
        fn show_inspector(&self, show: bool) -> Result<()> {
            self.record(format!("inspector {show}"))
        }
        fn print(&self) -> Result<()> {
            self.record("print".into())
        }
        fn focus(&self) -> Result<()> {
            self.record("focus".into())
        }
    }
}
