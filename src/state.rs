use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;

use crate::auth::session::AuthSessionManager;
use crate::config::{AppConfig, SimulationConfig};
use crate::db::DataModel;
use crate::guard::RequestGuard;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub model: Arc<Mutex<DataModel>>,
    pub session: Arc<Mutex<AuthSessionManager>>,
    pub weather_guard: Arc<RequestGuard>,
    pub plant_health_guard: Arc<RequestGuard>,
}

impl AppState {
    /// Durable data lives under `config.data_dir`; the session store lasts as
    /// long as the process.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let durable = Arc::new(
            FileStore::open(&config.data_dir)
                .with_context(|| format!("open data dir {}", config.data_dir.display()))?,
        ) as Arc<dyn KeyValueStore>;
        let session = Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>;
        Self::from_parts(Arc::new(config), durable, session)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> anyhow::Result<Self> {
        let model = DataModel::initialize(durable).context("load data model")?;
        let session = AuthSessionManager::restore_from_session(session);
        Ok(Self {
            config,
            model: Arc::new(Mutex::new(model)),
            session: Arc::new(Mutex::new(session)),
            weather_guard: Arc::new(RequestGuard::new()),
            plant_health_guard: Arc::new(RequestGuard::new()),
        })
    }

    /// Fully in-memory state with zero simulated delay.
    pub fn in_memory() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: "memory".into(),
            simulation: SimulationConfig {
                weather_delay_ms: 0,
                plant_health_delay_ms: 0,
            },
        });
        Self::from_parts(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }
}
