use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, JsonConfigSerializer,
};
use crate::log;
use super::StatisticsRecord;

pub const DEFAULT_STATS_FILE: &str = "snake_enhanced.json";

/// Persists the statistics record as JSON through a content provider.
pub struct StatsStore<TContentProvider = FileContentConfigProvider>
where
    TContentProvider: ConfigContentProvider,
{
    content_provider: TContentProvider,
    serializer: JsonConfigSerializer,
}

impl StatsStore<FileContentConfigProvider> {
    pub fn from_json_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path))
    }
}

impl<TContentProvider> StatsStore<TContentProvider>
where
    TContentProvider: ConfigContentProvider,
{
    pub fn new(content_provider: TContentProvider) -> Self {
        Self {
            content_provider,
            serializer: JsonConfigSerializer::new(),
        }
    }

    pub fn load(&self) -> Result<Option<StatisticsRecord>, String> {
        match self.content_provider.get_config_content()? {
            Some(content) => self.serializer.deserialize(&content).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&self, record: &StatisticsRecord) -> Result<(), String> {
        let content = self.serializer.serialize(record)?;
        self.content_provider.set_config_content(&content)
    }

    /// Missing or unreadable data counts as a fresh record.
    pub fn load_or_default(&self) -> StatisticsRecord {
        match self.load() {
            Ok(Some(record)) => record,
            Ok(None) => StatisticsRecord::default(),
            Err(e) => {
                log!("Ignoring saved statistics: {}", e);
                StatisticsRecord::default()
            }
        }
    }

    /// Best effort; a failed write only loses persistence.
    pub fn save_quietly(&self, record: &StatisticsRecord) {
        if let Err(e) = self.save(record) {
            log!("Failed to save statistics: {}", e);
        }
    }
}
