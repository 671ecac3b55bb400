//! Popup ⇄ page message shapes.
//!
//! These serialize to the exact JSON the page listener speaks:
//! `{"action":"checkParticipants"}` in, `{"success":true,"data":[...]}` or
//! `{"success":false,"error":"..."}` out.

use serde::{Deserialize, Serialize};

/// Action name the page listener answers.
pub const CHECK_PARTICIPANTS: &str = "checkParticipants";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum PageRequest {
    #[serde(rename = "checkParticipants")]
    CheckParticipants,
}

/// One participant tile as it crosses the messaging boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireParticipant {
    #[serde(rename = "imgSrc", default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<WireParticipant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResponse {
    pub fn ok(data: Vec<WireParticipant>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Collapse the wire shape into a `Result`.
    ///
    /// A success flag without a data array counts as an empty page.
    pub fn into_result(self) -> Result<Vec<WireParticipant>, String> {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "page reported failure without detail".to_string()))
        }
    }
}
