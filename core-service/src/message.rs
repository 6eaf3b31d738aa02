//! Messages drained by the shell's UI task.

use bridge_traits::{FileChooserSpec, RequestCode, ResultCode, ResultPayload};
use core_auth::{AttemptId, LaunchOutcome};
use core_files::FileChooserCallback;

/// Host lifecycle callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start,
    Stop,
    ConfigurationChanged,
    BackRequested,
    Destroy,
}

/// An activity-style result delivered by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResult {
    pub request_code: RequestCode,
    pub result_code: ResultCode,
    pub payload: ResultPayload,
}

impl ExternalResult {
    pub fn new(request_code: RequestCode, result_code: ResultCode, payload: ResultPayload) -> Self {
        Self {
            request_code,
            result_code,
            payload,
        }
    }

    pub fn kind(&self) -> RequestKind {
        RequestKind::from(self.request_code)
    }
}

/// Which bridge a request code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    SignIn,
    FileChooser,
    Unknown(i32),
}

impl From<RequestCode> for RequestKind {
    fn from(code: RequestCode) -> Self {
        match code {
            RequestCode::SIGN_IN => RequestKind::SignIn,
            RequestCode::FILE_CHOOSER => RequestKind::FileChooser,
            RequestCode(other) => RequestKind::Unknown(other),
        }
    }
}

/// What the host should do with a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The page went back in its own history.
    Handled,
    /// Nothing to go back to; apply the OS default.
    Exit,
}

#[derive(Debug)]
pub enum ShellMessage {
    LaunchTimerExpired,
    SplashFadeFinished,
    ConnectivityAvailable,
    ConnectivityLost,
    PageLoadFinished,
    /// Pull-to-refresh gesture.
    RefreshRequested,
    Lifecycle(LifecycleEvent),
    /// Raw JSON posted by the page bootstrap script.
    PageMessage(String),
    FileChooserRequested {
        spec: FileChooserSpec,
        callback: FileChooserCallback,
    },
    /// The identity provider finished (or failed) starting its flow.
    SignInLaunched {
        attempt: AttemptId,
        outcome: LaunchOutcome,
    },
    ExternalResult(ExternalResult),
    /// A line from the page's console.
    ConsoleMessage {
        message: String,
        line: u32,
        source: String,
    },
}

impl ShellMessage {
    pub fn name(&self) -> &'static str {
        match self {
            ShellMessage::LaunchTimerExpired => "launch_timer_expired",
            ShellMessage::SplashFadeFinished => "splash_fade_finished",
            ShellMessage::ConnectivityAvailable => "connectivity_available",
            ShellMessage::ConnectivityLost => "connectivity_lost",
            ShellMessage::PageLoadFinished => "page_load_finished",
            ShellMessage::RefreshRequested => "refresh_requested",
            ShellMessage::Lifecycle(_) => "lifecycle",
            ShellMessage::PageMessage(_) => "page_message",
            ShellMessage::FileChooserRequested { .. } => "file_chooser_requested",
            ShellMessage::SignInLaunched { .. } => "sign_in_launched",
            ShellMessage::ExternalResult(_) => "external_result",
            ShellMessage::ConsoleMessage { .. } => "console_message",
        }
    }
}
