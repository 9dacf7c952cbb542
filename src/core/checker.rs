use crate::core::pacing::PacingPolicy;
use crate::domain::model::{CheckReport, NormalizedNumber};
use crate::domain::ports::AvailabilityService;

/// 依序查詢每個號碼，每筆只嘗試一次；單筆失敗不會中止整批
pub struct BatchChecker<A: AvailabilityService> {
    service: A,
    pacing: PacingPolicy,
}

impl<A: AvailabilityService> BatchChecker<A> {
    pub fn new(service: A, pacing: PacingPolicy) -> Self {
        Self { service, pacing }
    }

    pub async fn check_all(&self, numbers: &[NormalizedNumber]) -> CheckReport {
        let mut report = CheckReport::default();

        for (index, number) in numbers.iter().enumerate() {
            let delay = self.pacing.next_delay();
            if !delay.is_zero() {
                tracing::info!(
                    "Waiting {:.1}s before checking {}",
                    delay.as_secs_f64(),
                    number
                );
                tokio::time::sleep(delay).await;
            }

            match self.service.is_available(number).await {
                Ok(capable) => {
                    tracing::debug!(
                        "[{}/{}] {} -> {}",
                        index + 1,
                        numbers.len(),
                        number,
                        if capable { "capable" } else { "not capable" }
                    );
                    report.record(number.clone(), capable);
                }
                Err(e) => {
                    tracing::warn!("Error checking {}: {}", number, e);
                    report.record_error(number.clone());
                }
            }
        }

        report
    }
}
