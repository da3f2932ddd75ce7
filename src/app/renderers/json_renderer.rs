use crate::core::{StatusRenderer, StatusSnapshot, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const DEFAULT_STATUS_FILE: &str = "store-status.json";

/// Writes each snapshot as pretty JSON, overwriting the previous one.
pub struct JsonRenderer<S: Storage> {
    storage: S,
    filename: String,
}

impl<S: Storage> JsonRenderer<S> {
    pub fn new(storage: S, filename: String) -> Self {
        Self { storage, filename }
    }
}

#[async_trait]
impl<S: Storage> StatusRenderer for JsonRenderer<S> {
    async fn render(&self, snapshot: &StatusSnapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        self.storage.write_file(&self.filename, &json).await?;
        tracing::debug!("Wrote status snapshot to {}", self.filename);
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
