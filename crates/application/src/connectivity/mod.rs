//! Connectivity monitoring.

mod monitor;

pub use monitor::ConnectivityMonitor;
