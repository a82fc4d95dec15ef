//! Connectivity probe backed by the Linux sysfs network class.
//!
//! Each directory under the root (normally `/sys/class/net`) is one interface.
//! An interface counts as connected when it is not loopback and either
//! `operstate` is `up`, or `operstate` is `unknown` and `carrier` is `1`
//! (tun and ppp links report `unknown` while carrying traffic).
//!
//! The root is injected so tests can point the probe at a fake tree and other
//! platforms simply see "no facility", which reads as offline.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::ConnectivityProbe;

/// Default location of the network class directory.
pub const DEFAULT_SYSFS_NET_ROOT: &str = "/sys/class/net";

/// ARPHRD_LOOPBACK from `if_arp.h`, as found in the interface `type` file.
const ARPHRD_LOOPBACK: &str = "772";

#[derive(Debug, Clone)]
pub struct SysfsConnectivityProbe {
    root: PathBuf,
}

impl SysfsConnectivityProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of interfaces currently considered connected, sorted.
    ///
    /// Blocking; reads the sysfs tree directly.
    pub fn connected_interfaces(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Network facility {:?} unavailable: {}", self.root, e);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| is_connected(&entry.path()))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for SysfsConnectivityProbe {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_NET_ROOT)
    }
}

#[async_trait]
impl ConnectivityProbe for SysfsConnectivityProbe {
    async fn is_online(&self) -> bool {
        let probe = self.clone();
        match tokio::task::spawn_blocking(move || probe.connected_interfaces()).await {
            Ok(interfaces) => {
                tracing::debug!(?interfaces, "Connectivity probe finished");
                !interfaces.is_empty()
            }
            Err(e) => {
                tracing::warn!("Connectivity probe task failed: {}", e);
                false
            }
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn is_connected(iface: &Path) -> bool {
    let is_loopback = iface.file_name().is_some_and(|name| name == "lo")
        || read_trimmed(&iface.join("type")).as_deref() == Some(ARPHRD_LOOPBACK);
    if is_loopback {
        return false;
    }

    match read_trimmed(&iface.join("operstate")).as_deref() {
        Some("up") => true,
        Some("unknown") => read_trimmed(&iface.join("carrier")).as_deref() == Some("1"),
        _ => false,
    }
}
