use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcConfig {
    /// Base path of the proc file system to scrape metrics from.
    #[serde(default = "default_path")]
    pub path: String,

    /// net/stat subsystems to collect when their file exists.
    #[serde(default = "default_net_stat_subsystems")]
    pub net_stat_subsystems: Vec<String>,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            net_stat_subsystems: default_net_stat_subsystems(),
        }
    }
}

fn default_path() -> String {
    "/proc".to_string()
}

fn default_net_stat_subsystems() -> Vec<String> {
    vec![
        "nf_conntrack".to_string(),
        "arp_cache".to_string(),
        "ndisc_cache".to_string(),
    ]
}
