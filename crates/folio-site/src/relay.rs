#![forbid(unsafe_code)]

//! Outbound message relay.
//!
//! The contact form hands a [`RelayRequest`] to the host as an effect. The
//! host sends it through a [`Relay`] implementation and feeds the outcome
//! back as [`AppMsg::RelayFinished`]. One attempt per submission; retrying
//! is the user pressing the button again.
//!
//! The request body is the JSON shape accepted by EmailJS-style relays:
//!
//! ```json
//! { "service_id": "...", "template_id": "...", "user_id": "...",
//!   "template_params": { "from_name": "...", "from_email": "...", ... } }
//! ```

use std::cell::RefCell;
use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::app::AppMsg;
use crate::config::SiteConfig;
use crate::contact::ContactFormData;

// ─────────────────────────────────────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────────────────────────────────────

/// Template variables filled in by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub to_name: String,
    pub to_email: String,
}

/// Body posted to the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayRequest {
    /// Endpoint the host posts to. Not part of the body.
    #[serde(skip)]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    /// Public key, named `user_id` on the wire.
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl RelayRequest {
    /// Build a request from validated form data.
    ///
    /// The recipient defaults to the site owner and contact address when the
    /// relay section leaves them blank.
    pub fn from_form(data: &ContactFormData, config: &SiteConfig) -> Self {
        let relay = &config.relay;
        let or = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            endpoint: relay.endpoint.clone(),
            service_id: relay.service_id.clone(),
            template_id: relay.template_id.clone(),
            user_id: relay.public_key.clone(),
            template_params: TemplateParams {
                from_name: data.name.trim().to_string(),
                from_email: data.email.trim().to_string(),
                subject: data.subject.trim().to_string(),
                message: data.message.trim().to_string(),
                project_type: data.project_type.clone(),
                budget: data.budget.clone(),
                timeline: data.timeline.clone(),
                to_name: or(&relay.recipient_name, &config.owner.name),
                to_email: or(&relay.recipient_email, &config.contact.email),
            },
        }
    }

    /// JSON body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure
// ─────────────────────────────────────────────────────────────────────────────

/// Why a relay call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFailure {
    /// The relay rejected the credentials.
    Unauthorized,
    /// The relay rejected the request shape (unknown service or template).
    BadRequest,
    /// Service, template or key missing; nothing was sent.
    NotConfigured,
    /// Network error or an unrecognized rejection.
    Other(String),
}

impl RelayFailure {
    /// Classify a failed call from its HTTP status (if any) and reason text.
    pub fn classify(status: Option<u16>, reason: &str) -> Self {
        match status {
            Some(401 | 403) => Self::Unauthorized,
            Some(400) => Self::BadRequest,
            _ if reason.contains("Unauthorized") => Self::Unauthorized,
            _ if reason.contains("Bad Request") => Self::BadRequest,
            Some(code) => Self::Other(format!("HTTP {code}: {reason}")),
            None => Self::Other(reason.to_string()),
        }
    }
}

impl fmt::Display for RelayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "relay rejected the credentials"),
            Self::BadRequest => write!(f, "relay rejected the request"),
            Self::NotConfigured => write!(f, "relay is not configured"),
            Self::Other(reason) => write!(f, "relay call failed: {reason}"),
        }
    }
}

impl std::error::Error for RelayFailure {}

// ─────────────────────────────────────────────────────────────────────────────
// Relay contract
// ─────────────────────────────────────────────────────────────────────────────

/// Something that can deliver a [`RelayRequest`]. Single attempt, no retry.
pub trait Relay {
    fn send(&self, request: &RelayRequest) -> impl Future<Output = Result<(), RelayFailure>>;
}

/// Send `request` and wrap the outcome for the program queue.
pub async fn deliver<R: Relay>(relay: &R, ticket: u64, request: RelayRequest) -> AppMsg {
    let outcome = relay.send(&request).await;
    match &outcome {
        Ok(()) => tracing::info!(ticket, "relay accepted message"),
        Err(err) => tracing::error!(ticket, error = %err, "relay call failed"),
    }
    AppMsg::RelayFinished { ticket, outcome }
}

/// In-memory relay recording every request. Used by tests and demos.
#[derive(Debug, Default)]
pub struct MockRelay {
    failure: Option<RelayFailure>,
    calls: RefCell<Vec<RelayRequest>>,
}

impl MockRelay {
    /// A relay that accepts everything.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// A relay that rejects everything with `failure`.
    pub fn failing(failure: RelayFailure) -> Self {
        Self {
            failure: Some(failure),
            calls: RefCell::default(),
        }
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<RelayRequest> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Relay for MockRelay {
    async fn send(&self, request: &RelayRequest) -> Result<(), RelayFailure> {
        self.calls.borrow_mut().push(request.clone());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}
