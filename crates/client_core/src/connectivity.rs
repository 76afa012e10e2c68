//! Reachability of the menu API host.
//!
//! [`ReachabilityProbe`] periodically attempts a TCP connect to the base URL's
//! host and port and publishes the result on a watch channel. Consumers hold a
//! [`Reachability`] handle and read the latest value synchronously.

use std::time::Duration;

use thiserror::Error;
use tokio::{net::TcpStream, sync::watch, time::timeout};
use tracing::info;
use url::Url;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub trait Connectivity: Send + Sync {
    fn is_reachable(&self) -> bool;
    fn subscribe(&self) -> watch::Receiver<bool>;
}

#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("base url {0} has no host to probe")]
    MissingHost(String),
    #[error("base url {0} has no known port")]
    MissingPort(String),
}

#[derive(Debug, Clone)]
pub struct Reachability {
    rx: watch::Receiver<bool>,
}

impl Connectivity for Reachability {
    fn is_reachable(&self) -> bool {
        *self.rx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }
}

pub struct ReachabilityProbe {
    host: String,
    port: u16,
    interval: Duration,
    tx: watch::Sender<bool>,
}

impl ReachabilityProbe {
    /// Creates a probe for `base_url` and the handle that observes it. The
    /// handle reports unreachable until the first probe completes.
    pub fn for_base_url(
        base_url: &Url,
        interval: Duration,
    ) -> Result<(Reachability, Self), ConnectivityError> {
        let host = base_url
            .host_str()
            .ok_or_else(|| ConnectivityError::MissingHost(base_url.to_string()))?
            .to_string();
        let port = base_url
            .port_or_known_default()
            .ok_or_else(|| ConnectivityError::MissingPort(base_url.to_string()))?;
        let (tx, rx) = watch::channel(false);
        Ok((
            Reachability { rx },
            Self {
                host,
                port,
                interval,
                tx,
            },
        ))
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub async fn probe_once(&self) -> bool {
        matches!(
            timeout(PROBE_TIMEOUT, TcpStream::connect((self.host.as_str(), self.port))).await,
            Ok(Ok(_))
        )
    }

    /// Probes once and publishes the result. Returns whether the value changed.
    pub async fn refresh(&self) -> bool {
        let reachable = self.probe_once().await;
        let changed = self.tx.send_if_modified(|current| {
            if *current == reachable {
                false
            } else {
                *current = reachable;
                true
            }
        });
        if changed {
            info!(host = %self.host, port = self.port, reachable, "reachability changed");
        }
        changed
    }

    /// Probes on every interval tick until every observer is gone.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        while !self.tx.is_closed() {
            ticker.tick().await;
            self.refresh().await;
        }
    }
}

/// A connectivity source whose value is set by hand.
pub struct FixedConnectivity {
    tx: watch::Sender<bool>,
}

impl FixedConnectivity {
    pub fn new(reachable: bool) -> Self {
        let (tx, _rx) = watch::channel(reachable);
        Self { tx }
    }

    pub fn set(&self, reachable: bool) {
        self.tx.send_replace(reachable);
    }
}

impl Connectivity for FixedConnectivity {
    fn is_reachable(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/connectivity_tests.rs"]
mod tests;
