//! View State
//!
//! Visibility of the four native surfaces. Mutated only by
//! [`ViewStateController`](crate::controller::ViewStateController).

use bridge_traits::Surface;
use serde::Serialize;

/// Lifecycle of the launch splash. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashPhase {
    Showing,
    FadingOut,
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub(crate) splash: SplashPhase,
    pub(crate) content_visible: bool,
    pub(crate) offline_indicator_visible: bool,
    pub(crate) refresh_chrome_visible: bool,
    pub(crate) refreshing: bool,
}

impl ViewState {
    /// Splash up, everything else hidden.
    pub fn initial() -> Self {
        Self {
            splash: SplashPhase::Showing,
            content_visible: false,
            offline_indicator_visible: false,
            refresh_chrome_visible: false,
            refreshing: false,
        }
    }

    pub fn splash_phase(&self) -> SplashPhase {
        self.splash
    }

    /// The splash stays on screen while it fades.
    pub fn splash_visible(&self) -> bool {
        self.splash != SplashPhase::Gone
    }

    pub fn content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn offline_indicator_visible(&self) -> bool {
        self.offline_indicator_visible
    }

    pub fn refresh_chrome_visible(&self) -> bool {
        self.refresh_chrome_visible
    }

    pub fn refreshing(&self) -> bool {
        self.refreshing
    }

    /// Moves the splash to `phase` unless it is already further along.
    pub(crate) fn advance_splash(&mut self, phase: SplashPhase) -> bool {
        if phase > self.splash {
            self.splash = phase;
            true
        } else {
            false
        }
    }

    /// Visibility per surface, in stacking order from the bottom.
    pub fn surfaces(&self) -> [(Surface, bool); 4] {
        [
            (Surface::RefreshChrome, self.refresh_chrome_visible),
            (Surface::Content, self.content_visible),
            (Surface::OfflineIndicator, self.offline_indicator_visible),
            (Surface::Splash, self.splash_visible()),
        ]
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}
