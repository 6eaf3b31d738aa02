//! Network Monitoring Implementation

use bridge_traits::{
    error::{BridgeError, Result},
    network::{NetworkCallbacks, NetworkInfo, NetworkMonitor, NetworkType, RegistrationId},
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

const REACHABILITY_ADDR: &str = "8.8.8.8:53";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

type Reachability = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = bool> + Send>> + Send + Sync>;

/// Desktop network monitor implementation
///
/// Reachability is a TCP connect to a well-known resolver, bounded by a
/// 5 second timeout. Desktop hosts cannot tell transports apart without
/// platform APIs, so a reachable network is reported as `Ethernet`.
///
/// Each registration runs a watcher task on the current tokio runtime that
/// re-checks every poll interval, stores the result and fires
/// `on_available`/`on_lost` on status changes. The first check fires
/// `on_available` if the network is up, matching how mobile hosts report
/// the current default network on registration.
///
/// [`default_network`](NetworkMonitor::default_network) never touches the
/// network: it returns the last result a watcher stored, or `None` before
/// any check has completed.
pub struct DesktopNetworkMonitor {
    reachability: Reachability,
    poll_interval: Duration,
    latest: Arc<RwLock<Option<NetworkInfo>>>,
    next_id: AtomicU64,
    watchers: Mutex<HashMap<u64, JoinHandle<()>>>,
}

impl DesktopNetworkMonitor {
    /// Create a monitor checking `8.8.8.8:53` every 5 seconds.
    pub fn new() -> Self {
        Self::with_reachability(connect_to_resolver, DEFAULT_POLL_INTERVAL)
    }

    /// Create a monitor with a custom reachability check.
    pub fn with_reachability<F, Fut>(check: F, poll_interval: Duration) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            reachability: Arc::new(move || -> Pin<Box<dyn Future<Output = bool> + Send>> {
                Box::pin(check())
            }),
            poll_interval,
            latest: Arc::new(RwLock::new(None)),
            next_id: AtomicU64::new(1),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live watcher registrations.
    pub fn active_registrations(&self) -> usize {
        self.watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn spawn_watcher(
        &self,
        runtime: &Handle,
        id: u64,
        callbacks: NetworkCallbacks,
    ) -> JoinHandle<()> {
        let reachability = Arc::clone(&self.reachability);
        let latest = Arc::clone(&self.latest);
        let period = self.poll_interval;

        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<bool> = None;

            loop {
                ticker.tick().await;
                let reachable = reachability().await;
                store(&latest, reachable);

                match (last, reachable) {
                    (None | Some(false), true) => {
                        debug!(registration = id, "Default network available");
                        (callbacks.on_available)();
                    }
                    (Some(true), false) => {
                        debug!(registration = id, "Default network lost");
                        (callbacks.on_lost)();
                    }
                    _ => {}
                }
                last = Some(reachable);
            }
        })
    }
}

async fn connect_to_resolver() -> bool {
    matches!(
        tokio::time::timeout(
            CONNECT_TIMEOUT,
            tokio::net::TcpStream::connect(REACHABILITY_ADDR)
        )
        .await,
        Ok(Ok(_))
    )
}

fn store(latest: &RwLock<Option<NetworkInfo>>, reachable: bool) {
    let info = reachable.then(|| NetworkInfo::new(vec![NetworkType::Ethernet]));
    *latest
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = info;
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkMonitor for DesktopNetworkMonitor {
    fn default_network(&self) -> Option<NetworkInfo> {
        let info = self
            .latest
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        debug!(reachable = info.is_some(), "Read cached default network");
        info
    }

    fn register_default_network_callback(
        &self,
        callbacks: NetworkCallbacks,
    ) -> Result<RegistrationId> {
        let runtime = Handle::try_current().map_err(|_| {
            BridgeError::NotAvailable("network watcher needs a tokio runtime".to_string())
        })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let watcher = self.spawn_watcher(&runtime, id, callbacks);

        self.watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, watcher);

        Ok(RegistrationId(id))
    }

    fn unregister_network_callback(&self, id: RegistrationId) -> Result<()> {
        let watcher = self
            .watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id.0);

        match watcher {
            Some(watcher) => {
                watcher.abort();
                debug!(registration = id.0, "Network watcher stopped");
                Ok(())
            }
            None => {
                warn!(registration = id.0, "Unregistering unknown network callback");
                Err(BridgeError::UnknownRegistration(id.0))
            }
        }
    }
}

impl Drop for DesktopNetworkMonitor {
    fn drop(&mut self) {
        let watchers = self
            .watchers
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (_, watcher) in watchers.drain() {
            watcher.abort();
        }
    }
}
