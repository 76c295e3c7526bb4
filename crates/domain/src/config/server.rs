use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Receive failures in a row tolerated before the server loop gives up.
    #[serde(default = "default_max_consecutive_recv_errors")]
    pub max_consecutive_recv_errors: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            max_consecutive_recv_errors: default_max_consecutive_recv_errors(),
        }
    }
}

fn default_listen_address() -> String {
    "127.0.0.1:2053".to_string()
}

fn default_max_consecutive_recv_errors() -> u32 {
    16
}
