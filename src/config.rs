use serde::{Deserialize, Serialize};
use std::env;

use crate::store::Latency;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub latency: LatencyConfig,
    pub fixtures: FixtureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Simulated-latency settings. `mode` is one of "jittered", "fixed" or
/// "off"; the delay is demo behavior only and carries no semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub mode: String,
    pub fixed_ms: u64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Directory of per-entity JSON seed files. Compiled-in fixtures are
    /// used when unset.
    pub dir: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            latency: LatencyConfig {
                mode: env::var("SIM_LATENCY").unwrap_or_else(|_| "jittered".to_string()),
                fixed_ms: env::var("SIM_LATENCY_MS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
                scale: env::var("SIM_LATENCY_SCALE")
                    .unwrap_or_else(|_| "1.0".to_string())
                    .parse()
                    .unwrap_or(1.0),
            },
            fixtures: FixtureConfig {
                dir: env::var("FIXTURE_DIR").ok(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn latency(&self) -> Latency {
        match self.latency.mode.as_str() {
            "off" | "disabled" => Latency::disabled(),
            "fixed" => Latency::fixed(self.latency.fixed_ms),
            _ => Latency::jittered(self.latency.scale),
        }
    }
}
