#![forbid(unsafe_code)]

//! Contact page: the inquiry form plus direct contact details.

use folio_core::view::Element;
use folio_core::Event;
use folio_runtime::Cmd;

use super::{Page, PageCtx, PageKind};
use crate::app::{Action, AppCmd, AppEffect};
use crate::config::SiteConfig;
use crate::contact::{ContactForm, Field, SUCCESS_MESSAGE, SubmitOutcome, SubmitStatus};
use crate::content::{BUDGET_OPTIONS, PROJECT_TYPES, TIMELINE_OPTIONS};
use crate::relay::RelayFailure;

#[derive(Debug, Default)]
pub struct ContactPage {
    form: ContactForm,
}

impl ContactPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    fn text_input(&self, field: Field, label: &str, kind: &str, placeholder: &str) -> Element {
        let input = Element::new("input")
            .attr("type", kind)
            .attr("id", field.as_str())
            .attr("name", field.as_str())
            .attr("data-field", field.as_str())
            .attr("placeholder", placeholder)
            .attr("value", self.form.data().get(field));
        self.labelled(field, label, input)
    }

    fn labelled(&self, field: Field, label: &str, control: Element) -> Element {
        let error = self.form.error(field);
        let label_text = if field.is_required() {
            format!("{label} *")
        } else {
            label.to_string()
        };
        Element::new("div")
            .class(if error.is_some() { "form-group form-group--error" } else { "form-group" })
            .child(Element::new("label").attr("for", field.as_str()).text(label_text))
            .child(control.attr_if(error.is_some(), "aria-invalid", "true"))
            .child_opt(error.map(|e| Element::new("p").class("form-error").attr("role", "alert").text(e)))
    }

    fn select(&self, field: Field, label: &str, options: &[(&str, &str)]) -> Element {
        let current = self.form.data().get(field);
        let select = Element::new("select")
            .attr("id", field.as_str())
            .attr("name", field.as_str())
            .attr("data-field", field.as_str())
            .attr("value", current)
            .children(options.iter().map(|(value, text)| {
                Element::new("option")
                    .attr("value", *value)
                    .flag("selected", *value == current)
                    .text(*text)
            }));
        self.labelled(field, label, select)
    }

    fn project_types(&self) -> Element {
        let current = self.form.data().get(Field::ProjectType);
        let cards = PROJECT_TYPES.iter().map(|t| {
            let checked = t.value == current;
            Element::new("label")
                .class(if checked { "type-card type-card--selected" } else { "type-card" })
                .child(
                    Element::new("input")
                        .attr("type", "radio")
                        .attr("name", Field::ProjectType.as_str())
                        .attr("data-field", Field::ProjectType.as_str())
                        .attr("value", t.value)
                        .flag("checked", checked),
                )
                .child(Element::new("strong").text(t.label))
                .child(Element::new("span").text(t.description))
        });
        let error = self.form.error(Field::ProjectType);
        Element::new("fieldset")
            .class(if error.is_some() { "form-group form-group--error" } else { "form-group" })
            .attr("id", Field::ProjectType.as_str())
            .child(Element::new("legend").text("Project Type *"))
            .child(Element::new("div").class("type-grid").children(cards))
            .child_opt(error.map(|e| Element::new("p").class("form-error").attr("role", "alert").text(e)))
    }

    fn banner(&self) -> Option<Element> {
        match self.form.status() {
            SubmitStatus::Success => Some(
                Element::new("div")
                    .class("banner banner--success")
                    .attr("role", "status")
                    .text(SUCCESS_MESSAGE),
            ),
            SubmitStatus::Error(message) => Some(
                Element::new("div")
                    .class("banner banner--error")
                    .attr("role", "alert")
                    .text(message.clone()),
            ),
            SubmitStatus::Idle | SubmitStatus::Submitting { .. } => None,
        }
    }

    fn form_view(&self) -> Element {
        let submitting = self.form.is_submitting();
        let message = Element::new("textarea")
            .attr("id", Field::Message.as_str())
            .attr("name", Field::Message.as_str())
            .attr("data-field", Field::Message.as_str())
            .attr("rows", "6")
            .attr("placeholder", "Tell me about your project...")
            .attr("value", self.form.data().message.clone());

        Element::new("form")
            .class("contact-form")
            .attr("novalidate", "")
            .child_opt(self.banner())
            .child(
                Element::new("div")
                    .class("form-row")
                    .child(self.text_input(Field::Name, "Name", "text", "Your name"))
                    .child(self.text_input(Field::Email, "Email", "email", "you@example.com")),
            )
            .child(self.text_input(Field::Subject, "Subject", "text", "What's this about?"))
            .child(self.project_types())
            .child(
                Element::new("div")
                    .class("form-row")
                    .child(self.select(Field::Budget, "Budget", BUDGET_OPTIONS))
                    .child(self.select(Field::Timeline, "Timeline", TIMELINE_OPTIONS)),
            )
            .child(self.labelled(Field::Message, "Message", message))
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .class("button button--primary contact-form__submit")
                    .attr("data-action", "contact:submit")
                    .flag("disabled", submitting)
                    .text(if submitting { "Sending..." } else { "Send Message" }),
            )
    }
}

fn info(config: &SiteConfig) -> Element {
    let contact = &config.contact;
    let item = |label: &str, value: Element| {
        Element::new("li")
            .child(Element::new("span").class("contact-info__label").text(label))
            .child(value)
    };
    Element::new("aside")
        .class("contact-info")
        .child(Element::new("h2").text("Get in Touch"))
        .child(
            Element::new("ul")
                .child(item(
                    "Email",
                    Element::new("a")
                        .attr("href", format!("mailto:{}", contact.email))
                        .text(contact.email.clone()),
                ))
                .child(item(
                    "Phone",
                    Element::new("a")
                        .attr("href", format!("tel:{}", contact.phone.replace(' ', "")))
                        .text(contact.phone.clone()),
                ))
                .child(item("Location", Element::new("span").text(contact.location.clone()))),
        )
        .child(Element::new("div").class("contact-info__social").children(
            contact.social.iter().map(|s| {
                Element::new("a")
                    .attr("href", s.url.clone())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .text(s.label.clone())
            }),
        ))
}

impl Page for ContactPage {
    fn kind(&self) -> PageKind {
        PageKind::Contact
    }

    fn on_event(&mut self, event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        if let Event::Input { field, value } = event {
            match Field::parse(field) {
                Some(f) => self.form.set_field(f, value.clone()),
                None => tracing::debug!(field = %field, "input for unknown field"),
            }
        }
        Cmd::none()
    }

    fn on_action(&mut self, action: &Action, ctx: &mut PageCtx<'_>) -> AppCmd {
        if *action != Action::ContactSubmit {
            return Cmd::none();
        }
        match self.form.submit(ctx.config, ctx.ids) {
            SubmitOutcome::Busy | SubmitOutcome::NotConfigured => Cmd::none(),
            SubmitOutcome::Invalid { first } => Cmd::effect(AppEffect::FocusField(first.as_str())),
            SubmitOutcome::Send { ticket, request } => {
                Cmd::effect(AppEffect::SendMessage { ticket, request })
            }
        }
    }

    fn on_relay_finished(
        &mut self,
        ticket: u64,
        outcome: Result<(), RelayFailure>,
        ctx: &mut PageCtx<'_>,
    ) -> Option<AppCmd> {
        self.form.finish(ticket, outcome, &ctx.config.contact.email);
        Some(Cmd::none())
    }

    fn view(&self, config: &SiteConfig) -> Element {
        Element::new("div")
            .class("page page--contact")
            .child(
                Element::new("section")
                    .class("contact__intro")
                    .child(Element::new("h1").text("Let's Work Together"))
                    .child(Element::new("p").text(
                        "Have a project in mind? Tell me a little about it and I'll get back to you.",
                    )),
            )
            .child(
                Element::new("div")
                    .class("contact__layout")
                    .child(self.form_view())
                    .child(info(config)),
            )
    }
}
