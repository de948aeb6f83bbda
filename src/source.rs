use crate::error::SourceError;
use crate::models::RawActivity;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Provider of the raw activity history
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch every activity of the athlete, oldest first
    async fn fetch(&self) -> Result<Vec<RawActivity>, SourceError>;
}

/// Activities read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ActivitySource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<RawActivity>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let activities: Vec<RawActivity> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), activities = activities.len(), "Loaded activities");
        Ok(activities)
    }
}

/// Activities held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    activities: Vec<RawActivity>,
}

impl StaticSource {
    pub fn new(activities: Vec<RawActivity>) -> Self {
        StaticSource { activities }
    }
}

#[async_trait]
impl ActivitySource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RawActivity>, SourceError> {
        Ok(self.activities.clone())
    }
}
