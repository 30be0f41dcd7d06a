use crate::config::AppConfig;
use crate::foods::FoodTable;
use crate::journal::DailyLog;
use crate::storage::{DiskStorage, StorageClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub foods: Arc<FoodTable>,
    pub log: Arc<DailyLog>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let foods = FoodTable::load_from_path(&config.foods_csv)?;
        if foods.is_empty() {
            tracing::warn!(path = %config.foods_csv.display(), "reference table has no foods; nothing will match");
        }

        let storage = Arc::new(DiskStorage::new(&config.upload_dir).await?) as Arc<dyn StorageClient>;

        Ok(Self::from_parts(config, Arc::new(foods), storage))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        foods: Arc<FoodTable>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            config,
            foods,
            log: Arc::new(DailyLog::new()),
            storage,
        }
    }

    #[cfg(test)]
    pub fn fake(foods: FoodTable) -> (Self, Arc<crate::storage::fake::MemoryStorage>) {
        let storage = Arc::new(crate::storage::fake::MemoryStorage::default());
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            foods_csv: "test.csv".into(),
            upload_dir: "uploads".into(),
            max_upload_bytes: 2 * 1024 * 1024,
        });
        let state = Self::from_parts(config, Arc::new(foods), storage.clone());
        (state, storage)
    }
}
