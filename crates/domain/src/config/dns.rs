use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// dnsmasq instance to export metrics for, including port.
    #[serde(default = "default_server")]
    pub server: String,

    /// Socket timeout for one statistics exchange, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_server() -> String {
    "127.0.0.1:53".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
