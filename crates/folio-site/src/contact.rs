#![forbid(unsafe_code)]

//! Contact form state machine.
//!
//! ```text
//!          submit (valid)            relay ok
//!   Idle ─────────────────▶ Submitting ─────────▶ Success (fields cleared)
//!    ▲  ▲                      │
//!    │  └── submit (invalid) ──┘ relay error
//!    │                         ▼
//!    └──────────────────── Error(message)
//! ```
//!
//! `Success` and `Error` behave like `Idle` for the next submission.
//! Validation is the pure function [`validate`]; the form only decides when
//! to run it and what to do with the result.

use std::collections::BTreeMap;

use folio_runtime::SubIds;

use crate::config::SiteConfig;
use crate::relay::{RelayFailure, RelayRequest};

/// A form control. Variants are in rendered order, so the smallest key in a
/// [`FieldErrors`] map is the topmost invalid control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    ProjectType,
    Budget,
    Timeline,
    Message,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Self::Name,
        Self::Email,
        Self::Subject,
        Self::ProjectType,
        Self::Budget,
        Self::Timeline,
        Self::Message,
    ];

    /// Value of the control's `data-field` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::ProjectType => "projectType",
            Self::Budget => "budget",
            Self::Timeline => "timeline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Self::Budget | Self::Timeline)
    }
}

/// Raw form values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
}

impl ContactFormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
            Field::ProjectType => &self.project_type,
            Field::Budget => &self.budget,
            Field::Timeline => &self.timeline,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
            Field::ProjectType => &mut self.project_type,
            Field::Budget => &mut self.budget,
            Field::Timeline => &mut self.timeline,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Check every required field. An empty map means the data can be sent.
pub fn validate(data: &ContactFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if data.name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    let email = data.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, "Invalid email address");
    }
    if data.subject.trim().is_empty() {
        errors.insert(Field::Subject, "Subject is required");
    }
    if data.message.trim().is_empty() {
        errors.insert(Field::Message, "Message is required");
    }
    if data.project_type.is_empty() {
        errors.insert(Field::ProjectType, "Please select a project type");
    }
    errors
}

/// `local@domain.tld` with a letters-only top-level label of two or more
/// characters. Case-insensitive.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    local_ok
        && domain_ok
        && !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Submission status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    /// A relay call is in flight for `ticket`.
    Submitting { ticket: u64 },
    Success,
    Error(String),
}

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you within 24 hours.";
pub const UNAUTHORIZED_MESSAGE: &str =
    "Email service authentication failed. Please check the public key.";
pub const BAD_REQUEST_MESSAGE: &str =
    "Email service request failed. Please check the service and template IDs.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Email service is not configured. Please check the relay settings.";

/// Banner text for a failed submission.
pub fn failure_message(failure: &RelayFailure, contact_email: &str) -> String {
    match failure {
        RelayFailure::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
        RelayFailure::BadRequest => BAD_REQUEST_MESSAGE.to_string(),
        RelayFailure::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
        RelayFailure::Other(_) => format!(
            "Sorry, something went wrong. Please try again or email me directly at {contact_email}."
        ),
    }
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Busy,
    /// Validation failed; `first` should receive focus.
    Invalid { first: Field },
    /// The relay is not configured; the form is already in `Error`.
    NotConfigured,
    /// Send `request` and report back with `ticket`.
    Send { ticket: u64, request: RelayRequest },
}

/// Form values, field errors and submission status.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    data: ContactFormData,
    errors: FieldErrors,
    status: SubmitStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit. Clears that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.data.set(field, value.into());
        self.errors.remove(&field);
    }

    /// Attempt a submission.
    ///
    /// Tickets come from the shared id counter so a result can never be
    /// mistaken for a later submission's.
    pub fn submit(&mut self, config: &SiteConfig, ids: &mut SubIds) -> SubmitOutcome {
        if self.is_submitting() {
            tracing::debug!("submit ignored while a message is in flight");
            return SubmitOutcome::Busy;
        }
        self.errors = validate(&self.data);
        if let Some((&first, _)) = self.errors.first_key_value() {
            tracing::debug!(errors = self.errors.len(), first = first.as_str(), "contact form invalid");
            self.status = SubmitStatus::Idle;
            return SubmitOutcome::Invalid { first };
        }
        if !config.relay.is_configured() {
            tracing::warn!("contact relay is not configured; message not sent");
            self.status = SubmitStatus::Error(NOT_CONFIGURED_MESSAGE.to_string());
            return SubmitOutcome::NotConfigured;
        }
        let ticket = ids.next_id();
        self.status = SubmitStatus::Submitting { ticket };
        tracing::info!(ticket, project_type = %self.data.project_type, "submitting contact form");
        SubmitOutcome::Send {
            ticket,
            request: RelayRequest::from_form(&self.data, config),
        }
    }

    /// Apply a relay result. Returns `false` when `ticket` is stale.
    pub fn finish(
        &mut self,
        ticket: u64,
        outcome: Result<(), RelayFailure>,
        contact_email: &str,
    ) -> bool {
        if self.status != (SubmitStatus::Submitting { ticket }) {
            tracing::debug!(ticket, "ignoring stale relay result");
            return false;
        }
        match outcome {
            Ok(()) => {
                self.data = ContactFormData::default();
                self.errors.clear();
                self.status = SubmitStatus::Success;
            }
            Err(failure) => {
                self.status = SubmitStatus::Error(failure_message(&failure, contact_email));
            }
        }
        true
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn configured() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.relay.service_id = "svc".into();
        config.relay.template_id = "tpl".into();
        config.relay.public_key = "pk".into();
        config
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ada Lovelace");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Subject, "Project inquiry");
        form.set_field(Field::Message, "Hello");
        form.set_field(Field::ProjectType, "web-development");
        form
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = validate(&ContactFormData::default());
        assert_eq!(
            errors,
            FieldErrors::from([
                (Field::Name, "Name is required"),
                (Field::Email, "Email is required"),
                (Field::Subject, "Subject is required"),
                (Field::Message, "Message is required"),
                (Field::ProjectType, "Please select a project type"),
            ])
        );
    }

    #[test]
    fn whitespace_does_not_count() {
        let data = ContactFormData {
            name: "   ".into(),
            ..filled().data().clone()
        };
        assert_eq!(validate(&data).get(&Field::Name), Some(&"Name is required"));
    }

    #[test]
    fn email_pattern() {
        for ok in [
            "ada@example.com",
            "A.B+tag@Sub.Example.ORG",
            "x_y%z-1@host-1.io",
        ] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in [
            "ada",
            "@example.com",
            "ada@",
            "ada@example",
            "ada@example.c",
            "ada@example.c0m",
            "ada@@example.com",
            "ada@.com",
            "a da@example.com",
            "ada@exa_mple.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
        let data = ContactFormData {
            email: "nope".into(),
            ..filled().data().clone()
        };
        assert_eq!(
            validate(&data),
            FieldErrors::from([(Field::Email, "Invalid email address")])
        );
    }

    #[test]
    fn first_invalid_field_follows_rendered_order() {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ada Lovelace");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Subject, "Project inquiry");
        let mut ids = SubIds::new();
        assert_eq!(
            form.submit(&configured(), &mut ids),
            SubmitOutcome::Invalid {
                first: Field::ProjectType
            }
        );
        assert_eq!(form.error(Field::Message), Some("Message is required"));
        assert_eq!(
            Field::ALL,
            [
                Field::Name,
                Field::Email,
                Field::Subject,
                Field::ProjectType,
                Field::Budget,
                Field::Timeline,
                Field::Message,
            ]
        );
    }

    #[test]
    fn editing_clears_only_that_error() {
        let mut form = ContactForm::new();
        let mut ids = SubIds::new();
        assert_eq!(
            form.submit(&configured(), &mut ids),
            SubmitOutcome::Invalid { first: Field::Name }
        );
        form.set_field(Field::Name, "A");
        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.error(Field::Email), Some("Email is required"));
    }

    #[test]
    fn unconfigured_relay_fails_without_ticket() {
        let mut form = filled();
        let mut ids = SubIds::new();
        assert_eq!(
            form.submit(&SiteConfig::default(), &mut ids),
            SubmitOutcome::NotConfigured
        );
        assert_eq!(form.status(), &SubmitStatus::Error(NOT_CONFIGURED_MESSAGE.into()));
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn success_clears_fields() {
        let mut form = filled();
        let mut ids = SubIds::new();
        let SubmitOutcome::Send { ticket, request } = form.submit(&configured(), &mut ids) else {
            panic!("expected a send");
        };
        assert_eq!(request.template_params.from_email, "ada@example.com");
        assert!(form.is_submitting());
        assert_eq!(form.submit(&configured(), &mut ids), SubmitOutcome::Busy);

        assert!(form.finish(ticket, Ok(()), "me@example.com"));
        assert_eq!(form.status(), &SubmitStatus::Success);
        assert!(form.data().is_empty());
    }

    #[test]
    fn failures_keep_fields_and_allow_retry() {
        let mut form = filled();
        let mut ids = SubIds::new();
        let SubmitOutcome::Send { ticket, .. } = form.submit(&configured(), &mut ids) else {
            panic!("expected a send");
        };
        form.finish(ticket, Err(RelayFailure::Unauthorized), "me@example.com");
        assert_eq!(form.status(), &SubmitStatus::Error(UNAUTHORIZED_MESSAGE.into()));
        assert_eq!(form.data().name, "Ada Lovelace");

        let SubmitOutcome::Send { ticket, .. } = form.submit(&configured(), &mut ids) else {
            panic!("expected a retry");
        };
        form.finish(ticket, Err(RelayFailure::Other("timeout".into())), "me@example.com");
        let SubmitStatus::Error(message) = form.status() else {
            panic!("expected error");
        };
        assert!(message.contains("me@example.com"));
        assert_ne!(message, UNAUTHORIZED_MESSAGE);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut form = filled();
        let mut ids = SubIds::new();
        let SubmitOutcome::Send { ticket, .. } = form.submit(&configured(), &mut ids) else {
            panic!("expected a send");
        };
        assert!(!form.finish(ticket + 1, Ok(()), "x@y.zz"));
        assert!(form.is_submitting());
        assert!(form.finish(ticket, Ok(()), "x@y.zz"));
        assert!(!form.finish(ticket, Ok(()), "x@y.zz"));
    }

    #[test]
    fn failure_messages_are_distinct() {
        let all = [
            RelayFailure::Unauthorized,
            RelayFailure::BadRequest,
            RelayFailure::NotConfigured,
            RelayFailure::Other("x".into()),
        ];
        let mut messages: Vec<_> = all.iter().map(|f| failure_message(f, "a@b.cc")).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }
}
