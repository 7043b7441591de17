use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub weather_delay_ms: u64,
    pub plant_health_delay_ms: u64,
}

impl SimulationConfig {
    pub fn weather_delay(&self) -> Duration {
        Duration::from_millis(self.weather_delay_ms)
    }

    pub fn plant_health_delay(&self) -> Duration {
        Duration::from_millis(self.plant_health_delay_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            weather_delay_ms: 1500,
            plant_health_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = SimulationConfig::default();
        let simulation = SimulationConfig {
            weather_delay_ms: env_parse("WEATHER_DELAY_MS").unwrap_or(defaults.weather_delay_ms),
            plant_health_delay_ms: env_parse("PLANT_HEALTH_DELAY_MS")
                .unwrap_or(defaults.plant_health_delay_ms),
        };
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 8080,
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            simulation,
        })
    }

    /// Config for tests: no delays, data under `data_dir`.
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: data_dir.into(),
            simulation: SimulationConfig {
                weather_delay_ms: 0,
                plant_health_delay_ms: 0,
            },
        }
    }
}

fn env_parse(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse::<u64>().ok())
}
