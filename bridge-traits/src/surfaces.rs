//! Native View Surfaces
//!
//! The four native surfaces stacked around the hosted page plus the system
//! bars. Layout and resources belong to the host; the shell only flips
//! visibility and drives the splash fade.

use std::time::Duration;

/// One of the native surfaces the shell controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Full-screen launch overlay
    Splash,
    /// The embedded browser
    Content,
    /// "No connection" overlay drawn above the content
    OfflineIndicator,
    /// Pull-to-refresh container wrapping the content
    RefreshChrome,
}

/// Appearance of the status and navigation bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemBarStyle {
    /// Bar background as `#RRGGBB`
    pub background: String,
    /// Dark foreground icons (used on light backgrounds)
    pub light_bars: bool,
}

/// Completion handler for the splash fade; may run on any thread.
pub type FadeCompletion = Box<dyn FnOnce() + Send>;

pub trait ViewSurfaces: Send + Sync {
    fn set_visible(&self, surface: Surface, visible: bool);

    /// Show or hide the pull-to-refresh spinner.
    fn set_refreshing(&self, refreshing: bool);

    /// Animate the splash alpha to zero and call `on_finished` when done.
    fn fade_out_splash(&self, duration: Duration, on_finished: FadeCompletion);

    fn apply_system_bars(&self, style: &SystemBarStyle);
}
