//! Trait abstraction for the submit handler to enable mocking in tests

use crate::state::FormValues;
use anyhow::Result;
use async_trait::async_trait;

/// Receives the record produced by a submit where every rule passed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Deliver the values; returning `Ok` marks the submission successful
    async fn submit(&self, values: FormValues) -> Result<()>;
}
