//! Push/event error handling
//!
//! Failures on a live connection are delivered as a named `exception` event
//! instead of tearing the connection down.

use crate::{ClientError, ErrorSink};
use serde::Serialize;

/// Event name carrying normalized errors on push channels
pub const EXCEPTION_EVENT: &str = "exception";

/// Named event with a pre-serialized JSON payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    pub event: &'static str,
    pub payload: Vec<u8>,
    /// Correlation id echoed from the request that produced this frame
    pub request_id: Option<String>,
}

impl EventFrame {
    /// Build a frame for any serializable payload.
    pub fn new<T: Serialize>(event: &'static str, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event,
            payload: serde_json::to_vec(data)?,
            request_id: None,
        })
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Wire text: `{"event":<name>,"data":<payload>}`, plus `"requestId"`
    /// when the frame answers a tagged request.
    ///
    /// The payload bytes are embedded verbatim.
    pub fn to_text(&self) -> String {
        let request_id = self
            .request_id
            .as_ref()
            .and_then(|id| serde_json::to_string(id).ok())
            .map(|id| format!(r#","requestId":{}"#, id))
            .unwrap_or_default();

        format!(
            r#"{{"event":"{}","data":{}{}}}"#,
            self.event,
            String::from_utf8_lossy(&self.payload),
            request_id
        )
    }
}

/// Push/event transport sink
#[derive(Debug, Clone, Copy, Default)]
pub struct EventErrorSink;

impl ErrorSink for EventErrorSink {
    type Output = EventFrame;

    fn emit(&self, error: &ClientError) -> EventFrame {
        EventFrame {
            event: EXCEPTION_EVENT,
            payload: error.to_body(),
            request_id: None,
        }
    }
}
