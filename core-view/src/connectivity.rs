//! Connectivity Monitoring
//!
//! Wraps a [`NetworkMonitor`] bridge with the shell's notion of "connected"
//! and keeps the last known [`ConnectivityStatus`].
//!
//! Transitions are forwarded without debouncing. Subscription callbacks run
//! on whatever thread the host uses, so callers should pass closures that
//! only redispatch onto the UI task.

use crate::error::{Result, ViewError};
use bridge_traits::{NetworkCallbacks, NetworkInfo, NetworkMonitor, RegistrationId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reachability of the default network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    /// Neither probed nor reported yet
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// Connected iff the network carries a wifi, cellular or ethernet
    /// transport and the OS validated it.
    pub fn from_network(info: Option<&NetworkInfo>) -> Self {
        match info {
            Some(info) if info.validated && info.transports.iter().any(|t| t.is_usable()) => {
                Self::Connected
            }
            _ => Self::Disconnected,
        }
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live registration returned by [`ConnectivityMonitor::subscribe`].
///
/// Dropping the handle does not unregister; call
/// [`ConnectivityMonitor::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
pub struct SubscriptionHandle {
    id: Option<RegistrationId>,
}

impl SubscriptionHandle {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}

pub struct ConnectivityMonitor {
    monitor: Arc<dyn NetworkMonitor>,
    status: ConnectivityStatus,
}

impl ConnectivityMonitor {
    pub fn new(monitor: Arc<dyn NetworkMonitor>) -> Self {
        Self {
            monitor,
            status: ConnectivityStatus::Unknown,
        }
    }

    /// Inspects the default network synchronously and records the result.
    pub fn probe(&mut self) -> ConnectivityStatus {
        let info = self.monitor.default_network();
        let status = ConnectivityStatus::from_network(info.as_ref());
        debug!(%status, ?info, "Probed default network");
        self.status = status;
        status
    }

    /// Last known status.
    pub fn status(&self) -> ConnectivityStatus {
        self.status
    }

    /// Updates the last known status from a transition callback.
    pub fn record(&mut self, status: ConnectivityStatus) {
        if self.status != status {
            debug!(from = %self.status, to = %status, "Connectivity changed");
        }
        self.status = status;
    }

    /// Registers for default-network transitions.
    pub fn subscribe<A, L>(&self, on_available: A, on_lost: L) -> Result<SubscriptionHandle>
    where
        A: Fn() + Send + Sync + 'static,
        L: Fn() + Send + Sync + 'static,
    {
        let id = self
            .monitor
            .register_default_network_callback(NetworkCallbacks::new(on_available, on_lost))
            .map_err(ViewError::Subscription)?;

        debug!(registration = id.0, "Subscribed to network transitions");
        Ok(SubscriptionHandle { id: Some(id) })
    }

    /// Drops the registration. A second call with the same handle does
    /// nothing; bridge failures are logged.
    pub fn unsubscribe(&self, handle: &mut SubscriptionHandle) {
        let Some(id) = handle.id.take() else {
            return;
        };

        match self.monitor.unregister_network_callback(id) {
            Ok(()) => debug!(registration = id.0, "Unsubscribed from network transitions"),
            Err(e) => warn!(registration = id.0, error = %e, "Failed to unregister network callback"),
        }
    }
}

impl fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityMonitor")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
