//! Raw event -> anonymized event projection.
//!
//! The projection is built field by field from an explicit allow-list.
//! `user_context` is consulted only for `user_id`, which is hashed before it
//! is stored anywhere, and free-text payload fields are never read.

use crate::error::AnonymizeError;
use crypto_core::SaltedHasher;
use event_schema::{AnonymizedEvent, AnonymizedPayload, RawEvent, RawPayload};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Anonymizer {
    hasher: SaltedHasher,
}

impl Anonymizer {
    /// Build an anonymizer around the process-wide salt
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self::with_hasher(SaltedHasher::new(salt))
    }

    pub fn with_hasher(hasher: SaltedHasher) -> Self {
        Self { hasher }
    }

    /// Remove PII from a raw event
    ///
    /// # Errors
    /// `AnonymizeError::MissingIdentifier` when `user_context.user_id` is
    /// absent or empty. Checked before any hashing or copying happens.
    pub fn anonymize(&self, raw: &RawEvent) -> Result<AnonymizedEvent, AnonymizeError> {
        let user_id = raw.user_id().ok_or(AnonymizeError::MissingIdentifier)?;

        let payload = raw
            .payload
            .as_ref()
            .map(project_payload)
            .unwrap_or_default();

        Ok(AnonymizedEvent {
            event_id: raw.event_id.clone(),
            event_timestamp: raw.event_timestamp.clone(),
            event_type: raw.event_type.clone(),
            anonymous_user_id: self.hasher.hash_identifier(user_id),
            payload,
        })
    }
}

fn project_payload(payload: &RawPayload) -> AnonymizedPayload {
    AnonymizedPayload {
        node_id: present(&payload.node_id),
        node_type: present(&payload.node_type),
        node_title: present(&payload.node_title),
    }
}

fn present(value: &Option<Value>) -> Option<Value> {
    value.as_ref().filter(|v| !v.is_null()).cloned()
}
