use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// UDP workers, each on its own SO_REUSEPORT socket.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Response size cap for requesters that did not advertise EDNS0.
    #[serde(default = "default_max_udp_payload")]
    pub max_udp_payload: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            workers: default_workers(),
            max_udp_payload: default_max_udp_payload(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_max_udp_payload() -> u16 {
    512
}
