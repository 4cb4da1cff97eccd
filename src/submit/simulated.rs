//! Submit handler that stands in for a network round trip

use super::traits::SubmitHandler;
use crate::state::FormValues;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Waits a fixed delay, logs the record and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedSubmit {
    delay: Duration,
}

impl SimulatedSubmit {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmit {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmitHandler for SimulatedSubmit {
    async fn submit(&self, values: FormValues) -> Result<()> {
        tracing::debug!("Simulating submit latency of {:?}", self.delay);
        tokio::time::sleep(self.delay).await;

        let record = serde_json::to_string(&values)?;
        tracing::info!(%record, "Form submitted");
        Ok(())
    }
}
