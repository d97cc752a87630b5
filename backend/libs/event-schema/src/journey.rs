use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// RAW EVENTS (upstream, contains PII)
// ============================================================================

/// Journey event as emitted by the product frontend
///
/// Only the fields the anonymizer is allowed to read are modelled. Everything
/// else in the source document (`user_email`, `session_id`, free-text `notes`,
/// ...) is discarded at parse time and never held in memory.
///
/// Envelope fields are carried verbatim whatever their JSON type, so a numeric
/// id or an epoch timestamp passes through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    pub event_id: Option<Value>,
    pub event_timestamp: Option<Value>,
    pub event_type: Option<Value>,
    pub user_context: Option<UserContext>,
    pub payload: Option<RawPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserContext {
    pub user_id: Option<String>,
}

/// Allow-listed view of the raw payload. JSON `null` parses as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    pub node_id: Option<Value>,
    pub node_type: Option<Value>,
    pub node_title: Option<Value>,
}

impl RawEvent {
    /// Raw user identifier, treating an empty string as absent
    pub fn user_id(&self) -> Option<&str> {
        self.user_context
            .as_ref()
            .and_then(|ctx| ctx.user_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

// ============================================================================
// ANONYMIZED EVENTS (downstream, warehouse-safe)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedEvent {
    pub event_id: Option<Value>,
    pub event_timestamp: Option<Value>,
    pub event_type: Option<Value>,
    /// Salted one-way hash of the original user id
    pub anonymous_user_id: String,
    pub payload: AnonymizedPayload,
}

/// Projection of the raw payload; absent keys stay absent on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_title: Option<Value>,
}

impl AnonymizedPayload {
    pub fn is_empty(&self) -> bool {
        self.node_id.is_none() && self.node_type.is_none() && self.node_title.is_none()
    }
}
