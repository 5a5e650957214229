//! History sink trait - the external append-only history.

use async_trait::async_trait;

use crate::error::SinkResult;

/// The downstream append-only history store.
///
/// `append` takes the period id and sum together as one explicit
/// call. The commit coordinator issues one append per record,
/// strictly in staging order; sinks may rely on that ordering.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Whether the sink is initialized and accepting appends.
    ///
    /// Checked once before a commit starts; an unavailable sink
    /// fails the whole commit before any mutation.
    async fn is_ready(&self) -> bool;

    /// Append one outcome to the history under the given period.
    async fn append(&self, period_id: &str, sum: u8) -> SinkResult<()>;
}
