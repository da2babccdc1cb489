use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// JSON zone file served by the static provider.
    #[serde(default = "default_record_file")]
    pub record_file: String,

    /// TTL given to every record served from `record_file`. Kept signed so a
    /// negative value in the file is reported instead of failing to parse.
    #[serde(default = "default_ttl")]
    pub default_ttl: i64,

    /// Which provider chain to build. `None` means recursive resolution only.
    #[serde(default)]
    pub resolver_factory: Option<String>,

    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-attempt upstream timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default)]
    pub escalate_unsupported: bool,

    #[serde(default = "default_true")]
    pub formerr_on_malformed: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            record_file: default_record_file(),
            default_ttl: default_ttl(),
            resolver_factory: None,
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
            escalate_unsupported: false,
            formerr_on_malformed: true,
        }
    }
}

fn default_record_file() -> String {
    "records.json".to_string()
}

fn default_ttl() -> i64 {
    300
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}
