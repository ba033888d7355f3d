//! Network reachability adapters.

mod tcp_probe;

pub use tcp_probe::{DEFAULT_CONNECT_TIMEOUT, TcpReachabilityProbe};
