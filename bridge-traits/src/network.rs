//! Network Monitoring Abstraction
//!
//! Exposes the host's default network and its availability transitions.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Transport carried by a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    /// Cellular/mobile data connection
    Cellular,
    /// WiFi connection
    WiFi,
    /// Ethernet connection
    Ethernet,
    /// VPN, Bluetooth tethering, or anything the host cannot classify
    Other,
}

impl NetworkType {
    /// Whether this transport counts towards "connected".
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Cellular | Self::WiFi | Self::Ethernet)
    }
}

/// Capabilities of the current default network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Transports advertised by the network
    pub transports: Vec<NetworkType>,
    /// Whether the OS validated that the network actually reaches the internet
    pub validated: bool,
    /// Whether the connection is metered (has data limits/costs)
    pub is_metered: bool,
}

impl NetworkInfo {
    pub fn new(transports: Vec<NetworkType>) -> Self {
        Self {
            transports,
            validated: true,
            is_metered: false,
        }
    }

    pub fn with_validated(mut self, validated: bool) -> Self {
        self.validated = validated;
        self
    }

    pub fn has_transport(&self, transport: NetworkType) -> bool {
        self.transports.contains(&transport)
    }
}

/// Callback invoked by the host on an arbitrary thread.
pub type NetworkCallback = Arc<dyn Fn() + Send + Sync>;

/// Pair of callbacks registered for default-network transitions
#[derive(Clone)]
pub struct NetworkCallbacks {
    /// Fired when a usable network becomes the default
    pub on_available: NetworkCallback,
    /// Fired when the default network disappears
    pub on_lost: NetworkCallback,
}

impl NetworkCallbacks {
    pub fn new<A, L>(on_available: A, on_lost: L) -> Self
    where
        A: Fn() + Send + Sync + 'static,
        L: Fn() + Send + Sync + 'static,
    {
        Self {
            on_available: Arc::new(on_available),
            on_lost: Arc::new(on_lost),
        }
    }
}

impl fmt::Debug for NetworkCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCallbacks").finish_non_exhaustive()
    }
}

/// Host-issued identifier for a callback registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(pub u64);

/// Network monitor trait
///
/// # Platform Support
///
/// - **Android**: `ConnectivityManager` default network callback
/// - **iOS**: `NWPathMonitor`
/// - **Desktop**: reachability check with a polling watcher
///
/// Callbacks may be delivered on any thread. Implementations must not
/// debounce: every transition the OS reports is forwarded as-is.
pub trait NetworkMonitor: Send + Sync {
    /// Capabilities of the current default network, `None` when there is none.
    ///
    /// Called from the UI task; must answer from known state without
    /// waiting on the network.
    fn default_network(&self) -> Option<NetworkInfo>;

    /// Register callbacks for default-network transitions.
    fn register_default_network_callback(
        &self,
        callbacks: NetworkCallbacks,
    ) -> Result<RegistrationId>;

    /// Drop a registration made by
    /// [`register_default_network_callback`](Self::register_default_network_callback).
    fn unregister_network_callback(&self, id: RegistrationId) -> Result<()>;
}
