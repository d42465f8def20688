//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Payload decoding and the decision of which pull request to reconcile

pub mod payload;
pub mod signature;

pub use payload::{
    PayloadError, WebhookAction, WebhookEvent, WebhookPayload, decode_payload, route,
};
pub use signature::verify_signature;
