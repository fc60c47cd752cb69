//! Types shared by the RAG chat console
//!
//! Everything here is target-independent:
//! - wire schemas for the pipeline server's JSON endpoints
//! - the step badge board
//! - the session state and its reducer
//!
//! The browser crate owns the network and the DOM; this crate decides what
//! the console should look like after each event.

pub mod defaults;
pub mod session;
pub mod steps;
pub mod wire;

pub use session::{Command, SessionEvent, SessionState, TranscriptEntry, TurnRole};
pub use steps::{badge_key, StepBadge, StepBoard, StepStatus, PIPELINE_STAGES};
pub use wire::{
    Acknowledgement, ChatMessage, HistoryResponse, InitializeRequest, PipelineStatus,
    PipelineStep, QueryAnswer, QueryRequest, Reply, Role, WireError,
};
