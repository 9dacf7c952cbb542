use crate::domain::model::NormalizedNumber;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

/// 一次執行的統計
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub raw_count: usize,
    pub unique_count: usize,
    pub capable_count: usize,
    pub not_capable_count: usize,
    pub errored: Vec<NormalizedNumber>,
    pub elapsed: Duration,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        tracing::info!("Starting availability check");

        // Extract
        let input = self.pipeline.extract().await?;
        let raw_count = input.len();
        tracing::info!("Read {} phone numbers", raw_count);

        // Transform
        let report = self.pipeline.transform(input).await?;
        let unique_count = report.checked_count();
        let capable_count = report.capable_count();
        let not_capable_count = report.not_capable_count();
        let errored = report.errored.clone();

        // Load
        let output_path = self.pipeline.load(report).await?;

        let summary = RunSummary {
            output_path,
            raw_count,
            unique_count,
            capable_count,
            not_capable_count,
            errored,
            elapsed: start_time.elapsed(),
        };
        log_summary(&summary);
        Ok(summary)
    }
}

fn log_summary(summary: &RunSummary) {
    tracing::info!(
        "📊 Checked {} unique numbers in {:.1}s: {} capable, {} not capable, {} errored",
        summary.unique_count,
        summary.elapsed.as_secs_f64(),
        summary.capable_count,
        summary.not_capable_count,
        summary.errored.len()
    );

    if !summary.errored.is_empty() {
        let list = summary
            .errored
            .iter()
            .map(NormalizedNumber::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!("⚠️ Numbers that could not be checked: {}", list);
    }
}
