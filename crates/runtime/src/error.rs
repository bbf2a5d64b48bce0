//! Unified error types surfaced by the runtime API.

use thiserror::Error;
use tokio::sync::oneshot;

use fable_core::PatchError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The narrator returned something that is not the expected JSON shape.
    /// No patches from such a response are ever applied.
    #[error("narrator returned a malformed response")]
    MalformedNarratorResponse(#[source] serde_json::Error),

    /// The narrator itself failed (network, upstream service, etc.).
    #[error("narrator request failed: {0}")]
    Narrator(String),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),
}
