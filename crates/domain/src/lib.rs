//! Masqstat Domain Layer
pub mod config;
pub mod dnsmasq;
pub mod errors;
pub mod net;

pub use config::{CliOverrides, Config, ConfigError};
pub use dnsmasq::{DnsmasqResult, ServerStats};
pub use errors::ScrapeError;
pub use net::{MetricKind, NetInterfaceResult, NetStatResult, ValueDesc, ENTRIES_FIELD};
