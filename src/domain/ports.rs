use crate::domain::model::{StatusSnapshot, StoreHoursConfig};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_hours(&self) -> Result<StoreHoursConfig>;
    fn refresh_interval(&self) -> Duration;
    fn output_path(&self) -> &str;
}

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[async_trait]
pub trait StatusRenderer: Send + Sync {
    async fn render(&self, snapshot: &StatusSnapshot) -> Result<()>;

    fn name(&self) -> &str;
}
