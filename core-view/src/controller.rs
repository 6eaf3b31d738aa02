//! # View State Controller
//!
//! Coordinates the splash, connectivity and content visibility.
//!
//! The controller is a pure state machine: each handler updates the
//! [`ViewState`] and returns the [`ViewAction`]s the shell must perform
//! (render surfaces, navigate, fade the splash). It never touches a bridge,
//! which keeps every transition testable without a page.
//!
//! ```text
//!            init()            on_launch_timer_expired(status, url)
//!   ───────────────> [Showing] ─────────────────────────────────> [FadingOut]
//!                                                                      │
//!                                           on_splash_fade_finished()  │
//!                                                                      v
//!                                                                   [Gone]
//! ```
//!
//! After [`shutdown`](ViewStateController::shutdown) every handler is a
//! no-op, so timer and fade callbacks that outlive the shell are harmless.

use crate::connectivity::ConnectivityStatus;
use crate::state::{SplashPhase, ViewState};
use std::time::Duration;
use tracing::{debug, trace};

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Apply this visibility snapshot to the native surfaces.
    Render(ViewState),
    /// Navigate the page to the configured origin.
    LoadOrigin,
    /// Fade the splash out over the given duration, then report back via
    /// [`ViewStateController::on_splash_fade_finished`].
    StartSplashFade(Duration),
    /// Push the current OS theme into the page and system bars.
    SyncTheme,
    /// Reload the current page.
    ReloadPage,
}

#[derive(Debug)]
pub struct ViewStateController {
    state: ViewState,
    splash_fade: Duration,
    launched: bool,
    alive: bool,
}

impl ViewStateController {
    pub fn new(splash_fade: Duration) -> Self {
        Self {
            state: ViewState::initial(),
            splash_fade,
            launched: false,
            alive: true,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Splash visible, everything else hidden.
    pub fn init(&mut self) -> Vec<ViewAction> {
        if !self.alive || self.launched {
            return Vec::new();
        }

        self.state = ViewState::initial();
        vec![self.render()]
    }

    /// Ends the launch sequence. Only the first call has any effect.
    ///
    /// The origin is loaded when connected, unless the page already
    /// navigated under the splash (a pre-launch connectivity callback).
    pub fn on_launch_timer_expired(
        &mut self,
        status: ConnectivityStatus,
        current_url: Option<&str>,
    ) -> Vec<ViewAction> {
        if !self.alive {
            trace!("Launch timer fired after shutdown");
            return Vec::new();
        }
        if self.launched {
            debug!("Ignoring repeated launch timer expiry");
            return Vec::new();
        }
        self.launched = true;

        let connected = status.is_connected();
        self.state.content_visible = true;
        self.state.refresh_chrome_visible = true;
        self.state.offline_indicator_visible = !connected;
        self.state.advance_splash(SplashPhase::FadingOut);

        debug!(%status, "Launch delay elapsed");

        let mut actions = vec![self.render()];
        if connected && never_navigated(current_url) {
            actions.push(ViewAction::LoadOrigin);
        }
        actions.push(ViewAction::StartSplashFade(self.splash_fade));
        actions
    }

    pub fn on_splash_fade_finished(&mut self) -> Vec<ViewAction> {
        if !self.alive || self.state.splash != SplashPhase::FadingOut {
            return Vec::new();
        }

        self.state.advance_splash(SplashPhase::Gone);
        vec![self.render()]
    }

    /// A usable default network appeared.
    ///
    /// `current_url` is the page's current document; the origin is only
    /// loaded if the page has never navigated. This holds before launch too,
    /// so the page can load under the splash. Content itself is only
    /// revealed by the launch sequence.
    pub fn on_connectivity_available(&mut self, current_url: Option<&str>) -> Vec<ViewAction> {
        if !self.alive {
            return Vec::new();
        }

        self.state.offline_indicator_visible = false;
        self.state.refresh_chrome_visible = true;
        if self.launched {
            self.state.content_visible = true;
        }

        let mut actions = vec![self.render()];
        if never_navigated(current_url) {
            actions.push(ViewAction::LoadOrigin);
        }
        actions
    }

    /// The default network went away. Content is left as-is so a loaded
    /// page stays readable under the indicator.
    pub fn on_connectivity_lost(&mut self) -> Vec<ViewAction> {
        if !self.alive {
            return Vec::new();
        }

        self.state.offline_indicator_visible = true;
        vec![self.render()]
    }

    pub fn on_page_load_finished(&mut self) -> Vec<ViewAction> {
        if !self.alive {
            return Vec::new();
        }

        self.state.refreshing = false;
        vec![self.render(), ViewAction::SyncTheme]
    }

    /// Pull-to-refresh gesture. Without a page there is nothing to reload,
    /// so the spinner is stopped straight away.
    pub fn on_refresh_requested(&mut self, page_present: bool) -> Vec<ViewAction> {
        if !self.alive {
            return Vec::new();
        }

        self.state.refreshing = page_present;
        let mut actions = vec![self.render()];
        if page_present {
            actions.push(ViewAction::ReloadPage);
        }
        actions
    }

    /// Marks the controller dead. Idempotent.
    pub fn shutdown(&mut self) {
        if self.alive {
            debug!("View controller shut down");
        }
        self.alive = false;
    }

    fn render(&self) -> ViewAction {
        ViewAction::Render(self.state)
    }
}

fn never_navigated(current_url: Option<&str>) -> bool {
    current_url.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(500);

    fn launched(status: ConnectivityStatus) -> ViewStateController {
        let mut controller = ViewStateController::new(FADE);
        controller.init();
        controller.on_launch_timer_expired(status, None);
        controller
    }

    fn loads(actions: &[ViewAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, ViewAction::LoadOrigin))
            .count()
    }

    #[test]
    fn test_init_renders_splash_only() {
        let mut controller = ViewStateController::new(FADE);
        let actions = controller.init();

        assert_eq!(actions, vec![ViewAction::Render(ViewState::initial())]);
        assert!(controller.state().splash_visible());
        assert!(!controller.state().content_visible());
    }

    #[test]
    fn test_connected_launch_loads_origin_and_fades() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();

        let actions = controller.on_launch_timer_expired(ConnectivityStatus::Connected, None);
        let state = *controller.state();

        assert_eq!(
            actions,
            vec![
                ViewAction::Render(state),
                ViewAction::LoadOrigin,
                ViewAction::StartSplashFade(FADE),
            ]
        );
        assert!(state.content_visible());
        assert!(state.refresh_chrome_visible());
        assert!(!state.offline_indicator_visible());
        assert_eq!(state.splash_phase(), SplashPhase::FadingOut);
    }

    #[test]
    fn test_disconnected_launch_shows_indicator_without_navigation() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();

        let actions = controller.on_launch_timer_expired(ConnectivityStatus::Disconnected, None);
        let state = controller.state();

        assert_eq!(loads(&actions), 0);
        assert!(actions.contains(&ViewAction::StartSplashFade(FADE)));
        assert!(state.offline_indicator_visible());
        assert!(state.content_visible());
        assert!(state.refresh_chrome_visible());
        assert!(state.splash_visible());
    }

    #[test]
    fn test_unknown_status_treated_as_offline() {
        let controller = launched(ConnectivityStatus::Unknown);
        assert!(controller.state().offline_indicator_visible());
    }

    #[test]
    fn test_second_expiry_is_ignored() {
        let mut controller = launched(ConnectivityStatus::Disconnected);
        let actions = controller.on_launch_timer_expired(ConnectivityStatus::Connected, None);

        assert!(actions.is_empty());
        assert!(controller.state().offline_indicator_visible());
    }

    #[test]
    fn test_fade_finished_removes_splash() {
        let mut controller = launched(ConnectivityStatus::Connected);
        let actions = controller.on_splash_fade_finished();

        assert_eq!(actions.len(), 1);
        assert!(!controller.state().splash_visible());
        assert!(controller.on_splash_fade_finished().is_empty());
    }

    #[test]
    fn test_fade_finished_before_launch_is_ignored() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();

        assert!(controller.on_splash_fade_finished().is_empty());
        assert!(controller.state().splash_visible());
    }

    #[test]
    fn test_available_after_disconnected_launch_navigates_once() {
        let mut controller = launched(ConnectivityStatus::Disconnected);

        let actions = controller.on_connectivity_available(None);

        assert_eq!(loads(&actions), 1);
        assert!(!controller.state().offline_indicator_visible());
        assert!(controller.state().refresh_chrome_visible());
    }

    #[test]
    fn test_available_with_loaded_page_does_not_navigate() {
        let mut controller = launched(ConnectivityStatus::Connected);

        let actions = controller.on_connectivity_available(Some("https://app.example.com/feed"));
        assert_eq!(loads(&actions), 0);

        let actions = controller.on_connectivity_available(Some(""));
        assert_eq!(loads(&actions), 1);
    }

    #[test]
    fn test_lost_keeps_content_visible() {
        let mut controller = launched(ConnectivityStatus::Connected);
        controller.on_connectivity_lost();

        assert!(controller.state().offline_indicator_visible());
        assert!(controller.state().content_visible());
    }

    #[test]
    fn test_available_before_launch_loads_under_splash() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();

        let actions = controller.on_connectivity_available(None);
        let state = *controller.state();

        assert_eq!(
            actions,
            vec![ViewAction::Render(state), ViewAction::LoadOrigin]
        );
        assert!(state.refresh_chrome_visible());
        assert!(!state.offline_indicator_visible());
        assert!(!state.content_visible());
        assert!(state.splash_visible());
    }

    #[test]
    fn test_launch_after_early_load_does_not_load_again() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();
        controller.on_connectivity_available(None);

        let origin = "https://app.example.com/";
        let actions =
            controller.on_launch_timer_expired(ConnectivityStatus::Connected, Some(origin));
        let state = *controller.state();

        assert_eq!(loads(&actions), 0);
        assert_eq!(
            actions,
            vec![ViewAction::Render(state), ViewAction::StartSplashFade(FADE)]
        );
        assert!(state.content_visible());
        assert!(state.refresh_chrome_visible());
        assert!(!state.offline_indicator_visible());
        assert_eq!(state.splash_phase(), SplashPhase::FadingOut);
    }

    #[test]
    fn test_lost_before_launch_shows_indicator_under_splash() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();

        let actions = controller.on_connectivity_lost();

        assert_eq!(actions, vec![ViewAction::Render(*controller.state())]);
        assert!(controller.state().offline_indicator_visible());
        assert!(!controller.state().content_visible());
        assert!(controller.state().splash_visible());

        // The launch status decides what shows once the splash goes.
        controller.on_launch_timer_expired(ConnectivityStatus::Disconnected, None);
        assert!(controller.state().offline_indicator_visible());
        assert!(controller.state().content_visible());
    }

    #[test]
    fn test_page_load_finished_stops_spinner_and_syncs_theme() {
        let mut controller = launched(ConnectivityStatus::Connected);
        controller.on_refresh_requested(true);
        assert!(controller.state().refreshing());

        let actions = controller.on_page_load_finished();

        assert!(!controller.state().refreshing());
        assert_eq!(actions.last(), Some(&ViewAction::SyncTheme));
    }

    #[test]
    fn test_refresh_without_page_stops_spinner() {
        let mut controller = launched(ConnectivityStatus::Connected);

        let actions = controller.on_refresh_requested(false);

        assert!(!controller.state().refreshing());
        assert!(!actions.contains(&ViewAction::ReloadPage));

        let actions = controller.on_refresh_requested(true);
        assert!(actions.contains(&ViewAction::ReloadPage));
    }

    #[test]
    fn test_handlers_are_noops_after_shutdown() {
        let mut controller = ViewStateController::new(FADE);
        controller.init();
        controller.shutdown();
        controller.shutdown();

        assert!(!controller.is_alive());
        assert!(controller
            .on_launch_timer_expired(ConnectivityStatus::Connected, None)
            .is_empty());
        assert!(controller.on_connectivity_available(None).is_empty());
        assert!(controller.on_connectivity_lost().is_empty());
        assert!(controller.on_page_load_finished().is_empty());
        assert!(controller.on_refresh_requested(true).is_empty());
        assert!(controller.init().is_empty());
        assert_eq!(*controller.state(), ViewState::initial());
    }

    #[derive(Debug, Clone, Copy)]
    enum Input {
        Expire(bool),
        Available,
        Lost,
        FadeDone,
        Reload,
    }

    const INPUTS: [Input; 6] = [
        Input::Expire(true),
        Input::Expire(false),
        Input::Available,
        Input::Lost,
        Input::FadeDone,
        Input::Reload,
    ];

    /// Feeds `input` with the page's URL tracked across loads; returns the
    /// number of origin loads it requested.
    fn apply(
        controller: &mut ViewStateController,
        input: Input,
        url: &mut Option<String>,
    ) -> usize {
        let current = url.as_deref();
        let actions = match input {
            Input::Expire(up) => {
                let status = if up {
                    ConnectivityStatus::Connected
                } else {
                    ConnectivityStatus::Disconnected
                };
                controller.on_launch_timer_expired(status, current)
            }
            Input::Available => controller.on_connectivity_available(current),
            Input::Lost => controller.on_connectivity_lost(),
            Input::FadeDone => controller.on_splash_fade_finished(),
            Input::Reload => controller.on_refresh_requested(current.is_some()),
        };

        let requested = loads(&actions);
        if requested > 0 {
            *url = Some("https://app.example.com/".to_string());
        }
        requested
    }

    #[test]
    fn test_any_sequence_keeps_splash_gone_and_loads_once() {
        // Every input sequence of length 5 (6^5 = 7776 runs).
        let len = 5;
        let total = INPUTS.len().pow(len as u32);

        for mut n in 0..total {
            let mut controller = ViewStateController::new(FADE);
            controller.init();
            let mut url = None;
            let mut origin_loads = 0;
            let mut splash_gone = false;
            let mut trail = Vec::with_capacity(len);

            for _ in 0..len {
                let input = INPUTS[n % INPUTS.len()];
                n /= INPUTS.len();
                trail.push(input);

                origin_loads += apply(&mut controller, input, &mut url);

                let state = controller.state();
                let visible = state.splash_visible();
                assert!(
                    !(splash_gone && visible),
                    "splash reappeared after {:?}",
                    trail
                );
                splash_gone |= !visible;

                assert!(origin_loads <= 1, "origin loaded twice after {:?}", trail);
                if controller.launched {
                    assert!(state.content_visible(), "content hidden after {:?}", trail);
                } else {
                    assert!(!state.content_visible(), "content shown early after {:?}", trail);
                }
            }
        }
    }
}
