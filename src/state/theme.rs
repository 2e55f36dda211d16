//! System color-scheme state.
//! The capability probe happens exactly once, at construction: hosts without
//! a preference query pin the theme to light for the page lifetime.

use crate::model::Theme;
use crate::util::clog;

/// How the host exposes its color-scheme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeSource {
    /// A live preference query exists; `prefers_dark` is its reading now.
    Observable { prefers_dark: bool },
    /// No preference query on this host.
    StaticFallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
}

impl ThemeState {
    pub fn new(source: SchemeSource) -> Self {
        let current = match source {
            SchemeSource::Observable { prefers_dark } => Theme::from_prefers_dark(prefers_dark),
            SchemeSource::StaticFallback => {
                clog("color-scheme queries unsupported, staying on the light theme");
                Theme::Light
            }
        };
        Self { current }
    }

    /// Last known theme, readable synchronously at any time.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// A preference-change signal arrived. Returns the theme to broadcast.
    pub fn preference_changed(&mut self, prefers_dark: bool) -> Theme {
        self.current = Theme::from_prefers_dark(prefers_dark);
        self.current
    }
}
