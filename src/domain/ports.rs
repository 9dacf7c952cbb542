use crate::domain::model::{CheckReport, NormalizedNumber, RawInput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 遠端 availability 服務；`Ok(bool)` 表示查詢成功，`Err` 表示這個號碼查詢失敗
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn is_available(&self, number: &NormalizedNumber) -> Result<bool>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawInput>;
    async fn transform(&self, input: RawInput) -> Result<CheckReport>;
    async fn load(&self, report: CheckReport) -> Result<String>;
}
