//! # Host Shell
//!
//! Owns the view controller, the connectivity status and subscription, the
//! sign-in slot and the file request slot. All of it is mutated only from
//! [`HostShell::handle`], which runs on the UI task; callbacks from other
//! threads come in as [`ShellMessage`]s through the [`UiDispatcher`].
//!
//! Bridge failures stop at this boundary: they are logged and the shell
//! carries on.

use crate::error::{Result, ShellError};
use crate::message::{BackOutcome, ExternalResult, LifecycleEvent, RequestKind, ShellMessage};
use crate::page_bridge::{bootstrap_script, NativeDelivery, PageCommand};
use bridge_traits::{FileChooserSpec, FilePicker, IdentityProvider, ViewSurfaces, WebPage};
use core_auth::{IdentityBridge, IdentityState, SignInAttempt};
use core_files::{FileChooserCallback, FileRequestSlot, FileSelectionBridge};
use core_runtime::events::{ConnectivityEvent, EventBus, HostEvent, ShellEvent, ViewEvent};
use core_runtime::logging::PAGE_CONSOLE_TARGET;
use core_runtime::{ShellConfig, UiDispatcher, UiQueue};
use core_view::{
    ConnectivityMonitor, ConnectivityStatus, SubscriptionHandle, ThemeSynchronizer, ViewAction,
    ViewState, ViewStateController,
};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

/// Host-provided implementations the shell drives.
#[derive(Clone)]
pub struct ShellBridges {
    pub page: Arc<dyn WebPage>,
    pub surfaces: Arc<dyn ViewSurfaces>,
    pub identity: Arc<dyn IdentityProvider>,
    pub picker: Arc<dyn FilePicker>,
}

impl fmt::Debug for ShellBridges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellBridges").finish_non_exhaustive()
    }
}

pub struct HostShell {
    config: ShellConfig,
    page: Arc<dyn WebPage>,
    surfaces: Arc<dyn ViewSurfaces>,
    dispatcher: UiDispatcher<ShellMessage>,
    event_bus: EventBus,
    controller: ViewStateController,
    connectivity: ConnectivityMonitor,
    subscription: Option<SubscriptionHandle>,
    theme: ThemeSynchronizer,
    identity: IdentityBridge,
    sign_in: SignInAttempt,
    files: FileSelectionBridge,
    file_request: FileRequestSlot,
    launch_timer: Option<JoinHandle<()>>,
}

impl HostShell {
    /// Prepares the page and native surfaces.
    ///
    /// Applies the browser settings, installs the page bridge, styles the
    /// system bars for the current theme and shows the splash.
    pub fn new(
        config: ShellConfig,
        bridges: ShellBridges,
        dispatcher: UiDispatcher<ShellMessage>,
    ) -> Result<Self> {
        config.validate()?;

        let event_bus = EventBus::new(config.event_buffer_size);
        let ShellBridges {
            page,
            surfaces,
            identity,
            picker,
        } = bridges;

        page.apply_settings(&config.webview)?;
        page.add_init_script(bootstrap_script(&config.bridge_object_name).as_str())?;

        let theme = ThemeSynchronizer::new(
            Arc::clone(&config.theme_source),
            config.system_bars.clone(),
        );
        surfaces.apply_system_bars(&theme.system_bar_style(theme.current_mode()));

        let shell = Self {
            connectivity: ConnectivityMonitor::new(Arc::clone(&config.network_monitor)),
            controller: ViewStateController::new(config.splash_fade),
            identity: IdentityBridge::new(
                identity,
                config.sign_in_client_id.clone(),
                event_bus.clone(),
            ),
            files: FileSelectionBridge::new(picker, event_bus.clone()),
            config,
            page,
            surfaces,
            dispatcher,
            event_bus,
            subscription: None,
            theme,
            sign_in: SignInAttempt::new(),
            file_request: FileRequestSlot::new(),
            launch_timer: None,
        };

        shell.render(shell.controller.state());
        debug!(origin = %shell.config.origin_url, "Host shell created");
        Ok(shell)
    }

    /// Shows the splash and starts the launch timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn launch(&mut self) {
        let actions = self.controller.init();
        self.perform(actions);

        if let Some(timer) = self.launch_timer.take() {
            timer.abort();
        }

        let dispatcher = self.dispatcher.clone();
        let delay = self.config.launch_delay;
        self.launch_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !dispatcher.dispatch(ShellMessage::LaunchTimerExpired) {
                trace!("Launch timer fired after the shell went away");
            }
        }));

        info!(delay_ms = delay.as_millis() as u64, "Shell launched");
        self.emit(ShellEvent::Host(HostEvent::Launched));
    }

    /// Drains `queue` until the shell is destroyed or every dispatcher is
    /// gone.
    pub async fn run(mut self, mut queue: UiQueue<ShellMessage>) {
        while let Some(message) = queue.next().await {
            let destroying = matches!(message, ShellMessage::Lifecycle(LifecycleEvent::Destroy));
            if let Some(BackOutcome::Exit) = self.handle(message) {
                self.handle(ShellMessage::Lifecycle(LifecycleEvent::Destroy));
                break;
            }
            if destroying {
                break;
            }
        }

        if self.controller.is_alive() {
            self.handle(ShellMessage::Lifecycle(LifecycleEvent::Destroy));
        }
        queue.close();
        debug!("Shell loop finished");
    }

    /// Handles one message on the UI task.
    ///
    /// Returns the back-press outcome for [`LifecycleEvent::BackRequested`]
    /// and `None` for everything else. After destroy every message except a
    /// repeated destroy is dropped.
    #[instrument(skip(self, message), fields(message = message.name()))]
    pub fn handle(&mut self, message: ShellMessage) -> Option<BackOutcome> {
        if !self.controller.is_alive() {
            trace!("Dropping message after teardown");
            return None;
        }

        match message {
            ShellMessage::LaunchTimerExpired => self.on_launch_timer_expired(),
            ShellMessage::SplashFadeFinished => {
                let actions = self.controller.on_splash_fade_finished();
                if !actions.is_empty() {
                    self.emit(ShellEvent::View(ViewEvent::SplashGone));
                }
                self.perform(actions);
            }
            ShellMessage::ConnectivityAvailable => {
                self.connectivity.record(ConnectivityStatus::Connected);
                self.emit(ShellEvent::Connectivity(ConnectivityEvent::Available));
                let current_url = self.page.current_url();
                let actions = self
                    .controller
                    .on_connectivity_available(current_url.as_deref());
                self.perform(actions);
            }
            ShellMessage::ConnectivityLost => {
                self.connectivity.record(ConnectivityStatus::Disconnected);
                self.emit(ShellEvent::Connectivity(ConnectivityEvent::Lost));
                let actions = self.controller.on_connectivity_lost();
                self.perform(actions);
            }
            ShellMessage::PageLoadFinished => {
                self.emit(ShellEvent::View(ViewEvent::PageLoadFinished));
                let actions = self.controller.on_page_load_finished();
                self.perform(actions);
            }
            ShellMessage::RefreshRequested => {
                let page_present = self.page.current_url().is_some();
                let actions = self.controller.on_refresh_requested(page_present);
                self.perform(actions);
            }
            ShellMessage::Lifecycle(event) => return self.on_lifecycle(event),
            ShellMessage::PageMessage(raw) => self.on_page_message(&raw),
            ShellMessage::FileChooserRequested { spec, callback } => {
                self.on_file_chooser_requested(spec, callback);
            }
            ShellMessage::SignInLaunched { attempt, outcome } => {
                self.identity
                    .on_launch_outcome(&mut self.sign_in, attempt, outcome);
            }
            ShellMessage::ExternalResult(result) => self.on_external_result(result),
            ShellMessage::ConsoleMessage {
                message,
                line,
                source,
            } => {
                debug!(target: PAGE_CONSOLE_TARGET, "{} -- From line {} of {}", message, line, source);
            }
        }

        None
    }

    pub fn view_state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity.status()
    }

    pub fn identity_state(&self) -> IdentityState {
        self.sign_in.state()
    }

    pub fn has_pending_file_request(&self) -> bool {
        self.file_request.is_pending()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .map_or(false, SubscriptionHandle::is_active)
    }

    pub fn is_alive(&self) -> bool {
        self.controller.is_alive()
    }

    /// Bus carrying every [`ShellEvent`] this shell emits.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> UiDispatcher<ShellMessage> {
        self.dispatcher.clone()
    }

    fn on_launch_timer_expired(&mut self) {
        self.launch_timer = None;

        let status = self.connectivity.probe();
        self.emit(ShellEvent::Connectivity(ConnectivityEvent::Probed {
            status: status.as_str().to_string(),
        }));

        let current_url = self.page.current_url();
        let actions = self
            .controller
            .on_launch_timer_expired(status, current_url.as_deref());
        if !actions.is_empty() {
            info!(%status, "Launch delay elapsed");
            self.emit(ShellEvent::View(ViewEvent::SplashDismissed {
                offline: !status.is_connected(),
            }));
        }
        self.perform(actions);
    }

    fn on_lifecycle(&mut self, event: LifecycleEvent) -> Option<BackOutcome> {
        match event {
            LifecycleEvent::Start => {
                self.subscribe_connectivity();
                self.emit(ShellEvent::Host(HostEvent::Started));
            }
            LifecycleEvent::Stop => {
                self.unsubscribe_connectivity();
                self.emit(ShellEvent::Host(HostEvent::Stopped));
            }
            LifecycleEvent::ConfigurationChanged => {
                self.emit(ShellEvent::Host(HostEvent::ConfigurationChanged));
                self.sync_theme();
            }
            LifecycleEvent::BackRequested => return Some(self.on_back_requested()),
            LifecycleEvent::Destroy => self.destroy(),
        }
        None
    }

    fn on_back_requested(&mut self) -> BackOutcome {
        if self.page.can_go_back() {
            if let Err(e) = self.page.go_back() {
                self.report("navigate back", e);
            }
            self.emit(ShellEvent::Host(HostEvent::BackNavigated));
            BackOutcome::Handled
        } else {
            debug!("No page history; handing back press to the OS");
            self.emit(ShellEvent::Host(HostEvent::ExitRequested));
            BackOutcome::Exit
        }
    }

    fn destroy(&mut self) {
        self.controller.shutdown();
        self.unsubscribe_connectivity();
        if let Some(timer) = self.launch_timer.take() {
            timer.abort();
        }
        if self.file_request.clear() {
            debug!("Resolved pending file request on teardown");
        }
        info!("Shell destroyed");
        self.emit(ShellEvent::Host(HostEvent::Destroyed));
    }

    fn subscribe_connectivity(&mut self) {
        if self.is_subscribed() {
            trace!("Connectivity already subscribed");
            return;
        }

        let subscribed = self.connectivity.subscribe(
            self.dispatcher.callback(|| ShellMessage::ConnectivityAvailable),
            self.dispatcher.callback(|| ShellMessage::ConnectivityLost),
        );

        match subscribed {
            Ok(handle) => {
                self.subscription = Some(handle);
                self.emit(ShellEvent::Connectivity(ConnectivityEvent::Subscribed));
            }
            Err(e) => self.report("subscribe to connectivity", e),
        }
    }

    fn unsubscribe_connectivity(&mut self) {
        let Some(mut handle) = self.subscription.take() else {
            return;
        };
        self.connectivity.unsubscribe(&mut handle);
        self.emit(ShellEvent::Connectivity(ConnectivityEvent::Unsubscribed));
    }

    fn on_page_message(&mut self, raw: &str) {
        match PageCommand::decode(raw) {
            Ok(PageCommand::TriggerSignIn) => self.start_sign_in(),
            Err(e) => {
                warn!(error = %e, "Dropping page message");
                self.emit(ShellEvent::Host(HostEvent::PageCommandRejected {
                    message: e.to_string(),
                }));
            }
        }
    }

    fn start_sign_in(&mut self) {
        let Some(pending) = self.identity.begin_sign_in(&mut self.sign_in) else {
            return;
        };

        let launch = self.identity.launch(pending);
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let (attempt, outcome) = launch.await;
            dispatcher.dispatch(ShellMessage::SignInLaunched { attempt, outcome });
        });
    }

    fn on_file_chooser_requested(&mut self, spec: FileChooserSpec, callback: FileChooserCallback) {
        self.files
            .on_page_requests_file(&mut self.file_request, spec, callback);
    }

    fn on_external_result(&mut self, result: ExternalResult) {
        let ExternalResult {
            request_code,
            result_code,
            payload,
        } = result;

        match RequestKind::from(request_code) {
            RequestKind::SignIn => {
                self.identity.on_result(
                    &mut self.sign_in,
                    request_code,
                    result_code,
                    &payload,
                    self.page.as_ref(),
                );
            }
            RequestKind::FileChooser => {
                self.files
                    .on_result(&mut self.file_request, request_code, result_code, &payload);
            }
            RequestKind::Unknown(code) => {
                debug!(code, "Ignoring result for unknown request code");
            }
        }
    }

    fn perform(&mut self, actions: Vec<ViewAction>) {
        for action in actions {
            match action {
                ViewAction::Render(state) => self.render(&state),
                ViewAction::LoadOrigin => self.load_origin(),
                ViewAction::StartSplashFade(duration) => {
                    let on_finished = self
                        .dispatcher
                        .callback(|| ShellMessage::SplashFadeFinished);
                    self.surfaces.fade_out_splash(duration, Box::new(on_finished));
                }
                ViewAction::SyncTheme => self.sync_theme(),
                ViewAction::ReloadPage => {
                    self.emit(ShellEvent::View(ViewEvent::RefreshStarted));
                    if let Err(e) = self.page.reload() {
                        self.report("reload page", e);
                    }
                }
            }
        }
    }

    fn render(&self, state: &ViewState) {
        for (surface, visible) in state.surfaces() {
            self.surfaces.set_visible(surface, visible);
        }
        self.surfaces.set_refreshing(state.refreshing());
    }

    fn load_origin(&self) {
        let url = self.config.origin_url.as_str();
        info!(%url, "Loading origin");
        match self.page.load_url(url) {
            Ok(()) => self.emit(ShellEvent::View(ViewEvent::OriginLoadRequested {
                url: url.to_string(),
            })),
            Err(e) => self.report("load origin", e),
        }
    }

    fn sync_theme(&self) {
        let mode = self.theme.current_mode();
        let script = NativeDelivery::Theme(mode).script();
        if let Err(e) = self.page.evaluate_script(script.as_str()) {
            self.report("inject theme", e);
        }
        self.surfaces
            .apply_system_bars(&self.theme.system_bar_style(mode));

        debug!(mode = mode.as_str(), "Theme synchronized");
        self.emit(ShellEvent::View(ViewEvent::ThemeSynced {
            mode: mode.as_str().to_string(),
        }));
    }

    fn report(&self, operation: &str, error: impl Into<ShellError>) {
        let error = error.into();
        warn!(operation, error = %error, "Shell operation failed");
    }

    fn emit(&self, event: ShellEvent) {
        let _ = self.event_bus.emit(event);
    }
}

impl Drop for HostShell {
    fn drop(&mut self) {
        if let Some(timer) = self.launch_timer.take() {
            timer.abort();
        }
    }
}

impl fmt::Debug for HostShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostShell")
            .field("view_state", self.controller.state())
            .field("connectivity", &self.connectivity.status())
            .field("identity", &self.sign_in.state())
            .field("file_request_pending", &self.file_request.is_pending())
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}
