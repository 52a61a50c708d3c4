use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address and port the exposition endpoint listens on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Path under which metrics are exposed.
    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            telemetry_path: default_telemetry_path(),
        }
    }
}

fn default_listen_address() -> String {
    "0.0.0.0:9779".to_string()
}

fn default_telemetry_path() -> String {
    "/metrics".to_string()
}
