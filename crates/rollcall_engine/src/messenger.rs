use rollcall_logging::rollcall_trace;

use crate::{MessagingError, PageAgent, PageRequest, PageResponse};

/// Sends one request to the active tab and waits for its single answer.
#[async_trait::async_trait]
pub trait TabMessenger: Send + Sync {
    async fn send(&self, request: PageRequest) -> Result<PageResponse, MessagingError>;
}

/// Delivers requests to an in-process [`PageAgent`] through the JSON wire
/// format, the same bytes a browser runtime would carry.
#[derive(Clone)]
pub struct PageAgentMessenger {
    agent: PageAgent,
}

impl PageAgentMessenger {
    pub fn new(agent: PageAgent) -> Self {
        Self { agent }
    }
}

#[async_trait::async_trait]
impl TabMessenger for PageAgentMessenger {
    async fn send(&self, request: PageRequest) -> Result<PageResponse, MessagingError> {
        let message = serde_json::to_string(&request)?;
        rollcall_trace!("-> page {}", message);
        let agent = self.agent.clone();
        // Page parsing is CPU-bound; keep it off the async workers.
        let reply = tokio::task::spawn_blocking(move || agent.handle_raw(&message))
            .await
            .map_err(|err| MessagingError::Unavailable(err.to_string()))?
            .ok_or(MessagingError::NoResponse)?;
        rollcall_trace!("<- page {} bytes", reply.len());
        Ok(serde_json::from_str(&reply)?)
    }
}
