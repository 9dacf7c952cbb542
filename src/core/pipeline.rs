use crate::core::checker::BatchChecker;
use crate::core::normalize::unique_numbers;
use crate::domain::model::{CheckReport, RawInput};
use crate::domain::ports::{AvailabilityService, Pipeline, Storage};
use crate::utils::error::{CheckError, Result};

/// 讀取號碼檔 → 正規化去重並逐筆查詢 → 只寫出可收 iMessage 的號碼
pub struct AvailabilityPipeline<S: Storage, A: AvailabilityService> {
    storage: S,
    checker: BatchChecker<A>,
    input_path: String,
    output_path: String,
}

impl<S: Storage, A: AvailabilityService> AvailabilityPipeline<S, A> {
    pub fn new(
        storage: S,
        checker: BatchChecker<A>,
        input_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            checker,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

/// 每行一個號碼，結尾有換行，沒有 header
pub fn render_output(report: &CheckReport) -> String {
    report
        .capable()
        .into_iter()
        .map(|number| format!("{}\n", number))
        .collect()
}

#[async_trait::async_trait]
impl<S: Storage, A: AvailabilityService> Pipeline for AvailabilityPipeline<S, A> {
    async fn extract(&self) -> Result<RawInput> {
        tracing::debug!("Reading phone numbers from {}", self.input_path);
        let bytes = self.storage.read_file(&self.input_path).await?;
        let text = String::from_utf8(bytes).map_err(|e| CheckError::InputError {
            path: self.input_path.clone(),
            reason: e.to_string(),
        })?;

        let input = RawInput::from_text(&text);
        tracing::debug!("Read {} non-empty lines", input.len());
        Ok(input)
    }

    async fn transform(&self, input: RawInput) -> Result<CheckReport> {
        let numbers = unique_numbers(&input.lines);
        if numbers.len() < input.len() {
            tracing::debug!(
                "Collapsed {} duplicate entries after normalization",
                input.len() - numbers.len()
            );
        }

        println!("Checking {} unique phone numbers...", numbers.len());
        Ok(self.checker.check_all(&numbers).await)
    }

    async fn load(&self, report: CheckReport) -> Result<String> {
        let output = render_output(&report);

        tracing::debug!(
            "Writing {} numbers ({} bytes) to {}",
            report.capable_count(),
            output.len(),
            self.output_path
        );
        self.storage
            .write_file(&self.output_path, output.as_bytes())
            .await?;

        Ok(self.output_path.clone())
    }
}
