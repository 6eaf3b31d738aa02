//! # Shell Event Bus
//!
//! Broadcasts what the shell did, for observers such as the host UI,
//! diagnostics overlays and tests. Built on `tokio::sync::broadcast`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐  emit   ┌───────────┐  subscribe  ┌────────────┐
//! │ ViewController   ├────────>│           ├────────────>│ Host UI    │
//! ├──────────────────┤         │ EventBus  │             └────────────┘
//! │ IdentityBridge   ├────────>│ (broadcast│  subscribe  ┌────────────┐
//! ├──────────────────┤         │  channel) ├────────────>│ Test probe │
//! │ FileSelection    ├────────>│           │             └────────────┘
//! └──────────────────┘         └───────────┘
//! ```
//!
//! Emitting never blocks and never fails the emitter: with no subscribers
//! `emit` returns an error that callers discard (`let _ = bus.emit(..)`).
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, ShellEvent, ViewEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(ShellEvent::View(ViewEvent::SplashDismissed { offline: true })).ok();
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event.description(), "Splash dismissed");
//! # }
//! ```
//!
//! ## Lagging
//!
//! A subscriber that falls more than `capacity` events behind receives
//! `RecvError::Lagged(n)` and continues from the oldest retained event.
//! `RecvError::Closed` means the shell was dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Top-level event published by the shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum ShellEvent {
    /// Surface visibility and page navigation
    View(ViewEvent),
    /// Network reachability
    Connectivity(ConnectivityEvent),
    /// Sign-in bridge
    Identity(IdentityEvent),
    /// File chooser bridge
    Files(FileEvent),
    /// Host lifecycle and page commands
    Host(HostEvent),
}

impl ShellEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            ShellEvent::View(e) => e.description(),
            ShellEvent::Connectivity(e) => e.description(),
            ShellEvent::Identity(e) => e.description(),
            ShellEvent::Files(e) => e.description(),
            ShellEvent::Host(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            ShellEvent::Identity(IdentityEvent::LaunchFailed { .. })
            | ShellEvent::Identity(IdentityEvent::SignInFailed { .. })
            | ShellEvent::Files(FileEvent::LaunchFailed { .. }) => EventSeverity::Error,
            ShellEvent::Connectivity(ConnectivityEvent::Lost)
            | ShellEvent::Files(FileEvent::OrphanResult)
            | ShellEvent::Host(HostEvent::PageCommandRejected { .. }) => EventSeverity::Warning,
            ShellEvent::View(ViewEvent::SplashDismissed { .. })
            | ShellEvent::View(ViewEvent::OriginLoadRequested { .. })
            | ShellEvent::Identity(IdentityEvent::TokenDelivered { .. })
            | ShellEvent::Files(FileEvent::Resolved { .. })
            | ShellEvent::Host(HostEvent::Launched)
            | ShellEvent::Host(HostEvent::Destroyed) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Surface visibility and navigation events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ViewEvent {
    /// Launch delay elapsed and the splash started fading.
    SplashDismissed {
        /// Whether the offline indicator was shown in place of a load.
        offline: bool,
    },
    /// Splash fade finished; it will not be shown again.
    SplashGone,
    /// The origin was (re)requested from the page.
    OriginLoadRequested { url: String },
    /// Theme script injected into the page.
    ThemeSynced {
        /// `light` or `dark`
        mode: String,
    },
    /// Pull-to-refresh started a reload.
    RefreshStarted,
    /// Page finished loading; spinner stopped.
    PageLoadFinished,
}

impl ViewEvent {
    fn description(&self) -> &str {
        match self {
            ViewEvent::SplashDismissed { .. } => "Splash dismissed",
            ViewEvent::SplashGone => "Splash removed",
            ViewEvent::OriginLoadRequested { .. } => "Loading origin",
            ViewEvent::ThemeSynced { .. } => "Theme synchronized",
            ViewEvent::RefreshStarted => "Page refresh started",
            ViewEvent::PageLoadFinished => "Page load finished",
        }
    }
}

/// Network reachability events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ConnectivityEvent {
    /// Synchronous probe of the default network.
    Probed {
        /// `unknown`, `connected` or `disconnected`
        status: String,
    },
    /// Default network became usable.
    Available,
    /// Default network was lost.
    Lost,
    /// Transition callbacks registered.
    Subscribed,
    /// Transition callbacks removed.
    Unsubscribed,
}

impl ConnectivityEvent {
    fn description(&self) -> &str {
        match self {
            ConnectivityEvent::Probed { .. } => "Connectivity probed",
            ConnectivityEvent::Available => "Network available",
            ConnectivityEvent::Lost => "Network lost",
            ConnectivityEvent::Subscribed => "Connectivity subscription started",
            ConnectivityEvent::Unsubscribed => "Connectivity subscription stopped",
        }
    }
}

/// Sign-in bridge events.
///
/// Tokens are never carried on the bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum IdentityEvent {
    /// A new attempt was handed to the identity provider.
    SignInRequested { attempt_id: String },
    /// A page trigger arrived while an attempt was being requested.
    SignInIgnored { attempt_id: String },
    /// An attempt awaiting its result was replaced by a new one.
    AttemptAbandoned { attempt_id: String },
    /// The provider UI is up; waiting for the activity result.
    AwaitingResult { attempt_id: String },
    /// The provider could not start the flow.
    LaunchFailed { attempt_id: String, message: String },
    /// The ID token was handed to the page hook.
    TokenDelivered { attempt_id: String },
    /// The result carried no usable token.
    SignInFailed {
        attempt_id: Option<String>,
        message: String,
    },
}

impl IdentityEvent {
    fn description(&self) -> &str {
        match self {
            IdentityEvent::SignInRequested { .. } => "Sign-in requested",
            IdentityEvent::SignInIgnored { .. } => "Sign-in already in progress",
            IdentityEvent::AttemptAbandoned { .. } => "Stale sign-in abandoned",
            IdentityEvent::AwaitingResult { .. } => "Awaiting sign-in result",
            IdentityEvent::LaunchFailed { .. } => "Sign-in could not start",
            IdentityEvent::TokenDelivered { .. } => "Sign-in token delivered",
            IdentityEvent::SignInFailed { .. } => "Sign-in failed",
        }
    }
}

/// File chooser bridge events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum FileEvent {
    /// The native picker was launched.
    ChooserOpened {
        allow_multiple: bool,
        accept_types: Vec<String>,
    },
    /// A pending request was resolved empty to make room for a new one.
    Superseded,
    /// The picker could not be launched.
    LaunchFailed { message: String },
    /// The pending callback was invoked.
    Resolved {
        /// Number of selected items (0 for cancelled).
        count: usize,
    },
    /// A chooser result arrived with nothing pending.
    OrphanResult,
}

impl FileEvent {
    fn description(&self) -> &str {
        match self {
            FileEvent::ChooserOpened { .. } => "File chooser opened",
            FileEvent::Superseded => "Pending file request superseded",
            FileEvent::LaunchFailed { .. } => "File chooser could not start",
            FileEvent::Resolved { .. } => "File request resolved",
            FileEvent::OrphanResult => "File result without pending request",
        }
    }
}

/// Host lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum HostEvent {
    Launched,
    Started,
    Stopped,
    ConfigurationChanged,
    /// Back was consumed by in-page history.
    BackNavigated,
    /// Back was handed to the OS default (usually finishing the host).
    ExitRequested,
    Destroyed,
    /// A page message could not be decoded.
    PageCommandRejected { message: String },
}

impl HostEvent {
    fn description(&self) -> &str {
        match self {
            HostEvent::Launched => "Shell launched",
            HostEvent::Started => "Shell started",
            HostEvent::Stopped => "Shell stopped",
            HostEvent::ConfigurationChanged => "Configuration changed",
            HostEvent::BackNavigated => "Navigated back in page",
            HostEvent::ExitRequested => "Back handed to OS",
            HostEvent::Destroyed => "Shell destroyed",
            HostEvent::PageCommandRejected { .. } => "Page command rejected",
        }
    }
}

/// Central event bus for publishing and subscribing to shell events.
///
/// Cheap to clone; all clones share one channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are none.
    pub fn emit(&self, event: ShellEvent) -> Result<usize, SendError<ShellEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

type EventFilter = Box<dyn Fn(&ShellEvent) -> bool + Send + Sync>;

/// A `broadcast::Receiver` with an optional filter.
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream, ShellEvent};
///
/// let bus = EventBus::new(16);
/// let identity_only = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, ShellEvent::Identity(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<ShellEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<ShellEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` are returned by `recv`/`try_recv`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ShellEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &ShellEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `RecvError::Lagged(n)` if the subscriber fell behind by `n` events,
    /// `RecvError::Closed` once every sender is gone.
    pub async fn recv(&mut self) -> Result<ShellEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Drains buffered events until one passes the filter.
    ///
    /// Returns `None` if nothing matching is currently buffered.
    pub fn try_recv(&mut self) -> Option<Result<ShellEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(Ok(event)),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Some(Err(RecvError::Closed))
                }
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
