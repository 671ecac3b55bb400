use std::io;

use thiserror::Error;

use crate::{DecodeError, PersistError, WireParticipant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RosterLoaded(Vec<String>),
    ScrapeCompleted(Result<Vec<WireParticipant>, String>),
    PollTick,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("page snapshot unavailable at {path}: {message}")]
    SnapshotUnavailable { path: String, message: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage root is not a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("page did not answer the request")]
    NoResponse,
    #[error("malformed message: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("messaging channel unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("storage API not available")]
    StorageUnavailable,
    #[error("no active tab found")]
    NoActiveTab,
}
