use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use lather_auth::CredentialStore;
use lather_config::LatherConfig;
use lather_ledger::EventLedger;
use lather_store::{JsonFileStore, KeyValueStore};
use lather_vision::{ClassifierError, ImageClassifier, MessagesBackend};

/// Services shared by every command, built once at startup.
pub struct AppContext {
    pub config: LatherConfig,
    pub data_dir: PathBuf,
    pub ledger: Arc<EventLedger>,
    pub credentials: CredentialStore,
}

impl AppContext {
    /// Open the store under the data directory and load the ledger from it.
    /// `data_dir_override` replaces `storage.data_dir` in the kept config.
    pub fn init(
        mut config: LatherConfig,
        data_dir_override: Option<&Path>,
    ) -> anyhow::Result<Self> {
        if let Some(dir) = data_dir_override {
            config.storage.data_dir = dir
                .to_str()
                .with_context(|| format!("data directory {} is not valid UTF-8", dir.display()))?
                .to_string();
        }
        let data_dir = config.storage.resolved_data_dir();
        let store_path = config.storage.store_path();

        let store: Arc<dyn KeyValueStore> = Arc::new(
            JsonFileStore::open(&store_path)
                .with_context(|| format!("failed to open store at {}", store_path.display()))?,
        );
        let options = config
            .calendar
            .options()
            .context("invalid calendar configuration")?;
        let ledger = Arc::new(
            EventLedger::open(Arc::clone(&store), options).context("failed to load ledger")?,
        );

        tracing::debug!(data_dir = %data_dir.display(), "application context ready");
        Ok(Self {
            config,
            data_dir,
            ledger,
            credentials: CredentialStore::new(store),
        })
    }

    /// Resolve the vision API key: keychain, then `LATHER_VISION__API_KEY`,
    /// then the key file, then `vision.api_key` from config files.
    pub fn vision_api_key(&self) -> Option<String> {
        lather_auth::api_key::load(&self.data_dir)
            .map(|(key, _)| key)
            .or_else(|| {
                self.config
                    .vision
                    .is_configured()
                    .then(|| self.config.vision.api_key.clone())
            })
    }

    /// Build a classifier against the configured endpoint.
    pub fn classifier(&self) -> Result<ImageClassifier<MessagesBackend>, ClassifierError> {
        let key = self.vision_api_key().ok_or(ClassifierError::NotConfigured)?;
        let backend = MessagesBackend::new(&self.config.vision, key)?;
        Ok(ImageClassifier::from_config(
            &self.config,
            backend,
            Arc::clone(&self.ledger),
        ))
    }
}
