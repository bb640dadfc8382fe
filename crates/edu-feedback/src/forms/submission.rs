use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::telemetry::SUBMISSIONS_TARGET;

use super::domain::{FormVariant, PresentationContext, ValidatedSubmission};
use super::transition::{PostSubmitTransition, RedirectPolicy};

/// Sink for validated submissions. Invoked exactly once per accepted submit.
pub trait SubmissionHandler: Send + Sync {
    fn handle(&self, variant: FormVariant, submission: &ValidatedSubmission);
}

/// Writes each submission to the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmissionHandler;

impl SubmissionHandler for LoggingSubmissionHandler {
    fn handle(&self, variant: FormVariant, submission: &ValidatedSubmission) {
        let payload = serde_json::to_string(submission)
            .unwrap_or_else(|err| format!("<unserializable submission: {err}>"));
        info!(
            target: SUBMISSIONS_TARGET,
            %variant,
            email = submission.email(),
            %payload,
            "form submitted"
        );
    }
}

/// Toast-style confirmation shown after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledgment {
    pub title: &'static str,
    pub description: &'static str,
}

impl Acknowledgment {
    pub fn for_form(variant: FormVariant, context: PresentationContext) -> Self {
        match (variant, context) {
            (FormVariant::Educational, PresentationContext::Page) => Self {
                title: "Request sent",
                description: "We will get back to you shortly!",
            },
            _ => Self {
                title: "Form submitted",
                description: "Thank you for your feedback!",
            },
        }
    }
}

/// Result of an accepted submit, handed back to the presentation shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub variant: FormVariant,
    pub acknowledgment: Acknowledgment,
    pub transition: PostSubmitTransition,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new(
        variant: FormVariant,
        context: PresentationContext,
        redirect: &RedirectPolicy,
    ) -> Self {
        Self {
            variant,
            acknowledgment: Acknowledgment::for_form(variant, context),
            transition: redirect.transition_for(context),
            received_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn educational_page_has_its_own_acknowledgment() {
        let page = Acknowledgment::for_form(FormVariant::Educational, PresentationContext::Page);
        assert_eq!(page.title, "Request sent");

        let dialog =
            Acknowledgment::for_form(FormVariant::Educational, PresentationContext::Dialog);
        assert_eq!(dialog.title, "Form submitted");
        assert_eq!(
            dialog,
            Acknowledgment::for_form(FormVariant::Employer, PresentationContext::Page)
        );
    }
}
