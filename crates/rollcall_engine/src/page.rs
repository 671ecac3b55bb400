use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use rollcall_logging::{rollcall_debug, rollcall_error, rollcall_trace};
use serde_json::Value;
use url::Url;

use crate::decode::decode_page;
use crate::protocol::CHECK_PARTICIPANTS;
use crate::{PageRequest, PageResponse, PageSnapshot, ParticipantScraper, ScrapeError};

/// Where the page agent gets the current DOM from.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> Result<PageSnapshot, ScrapeError>;
}

/// A fixed page, mostly for tests.
#[derive(Debug, Clone)]
pub struct StaticSnapshot(pub PageSnapshot);

impl SnapshotSource for StaticSnapshot {
    fn snapshot(&self) -> Result<PageSnapshot, ScrapeError> {
        Ok(self.0.clone())
    }
}

/// A saved page on disk, re-read on every request so edits show up live.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
    base_url: Option<Url>,
    declared_charset: Option<String>,
}

impl FileSnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            base_url: None,
            declared_charset: None,
        }
    }

    pub fn with_base_url(mut self, base_url: Option<Url>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_declared_charset(mut self, charset: Option<String>) -> Self {
        self.declared_charset = charset;
        self
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn snapshot(&self) -> Result<PageSnapshot, ScrapeError> {
        let bytes = fs::read(&self.path).map_err(|err| ScrapeError::SnapshotUnavailable {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })?;
        let decoded = decode_page(&bytes, self.declared_charset.as_deref())?;
        rollcall_trace!(
            "Read snapshot {:?} ({} bytes, {})",
            self.path,
            bytes.len(),
            decoded.encoding_label
        );
        Ok(PageSnapshot {
            html: decoded.html,
            base_url: self.base_url.clone(),
        })
    }
}

/// Page-side listener: answers participant checks from the current DOM.
#[derive(Clone)]
pub struct PageAgent {
    scraper: Arc<dyn ParticipantScraper>,
    source: Arc<dyn SnapshotSource>,
}

impl PageAgent {
    pub fn new(scraper: Arc<dyn ParticipantScraper>, source: Arc<dyn SnapshotSource>) -> Self {
        Self { scraper, source }
    }

    /// Always produces exactly one response; never panics outward.
    pub fn handle(&self, request: &PageRequest) -> PageResponse {
        match request {
            PageRequest::CheckParticipants => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.check_participants()));
                match outcome {
                    Ok(Ok(data)) => {
                        rollcall_debug!("Page found {} participant tiles", data.len());
                        PageResponse::ok(data)
                    }
                    Ok(Err(err)) => PageResponse::failure(err.to_string()),
                    Err(_) => PageResponse::failure("participant extraction panicked"),
                }
            }
        }
    }

    /// JSON entry point of the listener.
    ///
    /// Returns `None` for messages with another action; those belong to other
    /// listeners and get no answer from this one.
    pub fn handle_raw(&self, message: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(message) {
            Ok(value) => {
                if value.get("action").and_then(Value::as_str) != Some(CHECK_PARTICIPANTS) {
                    return None;
                }
                match serde_json::from_value::<PageRequest>(value) {
                    Ok(request) => self.handle(&request),
                    Err(err) => PageResponse::failure(err.to_string()),
                }
            }
            Err(err) => PageResponse::failure(format!("malformed request: {err}")),
        };
        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(err) => {
                rollcall_error!("Failed to encode page response: {}", err);
                None
            }
        }
    }

    fn check_participants(&self) -> Result<Vec<crate::WireParticipant>, ScrapeError> {
        let snapshot = self.source.snapshot()?;
        Ok(self.scraper.scrape(&snapshot))
    }
}
