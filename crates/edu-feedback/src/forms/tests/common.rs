use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::forms::domain::{FormVariant, ValidatedSubmission};
use crate::forms::record::FormRecord;
use crate::forms::service::FeedbackService;
use crate::forms::submission::SubmissionHandler;
use crate::forms::transition::RedirectPolicy;

/// Captures every submission handed to the sink.
#[derive(Default)]
pub(super) struct RecordingHandler {
    calls: Mutex<Vec<(FormVariant, ValidatedSubmission)>>,
}

impl SubmissionHandler for RecordingHandler {
    fn handle(&self, variant: FormVariant, submission: &ValidatedSubmission) {
        self.calls
            .lock()
            .expect("handler mutex poisoned")
            .push((variant, submission.clone()));
    }
}

impl RecordingHandler {
    pub(super) fn calls(&self) -> Vec<(FormVariant, ValidatedSubmission)> {
        self.calls.lock().expect("handler mutex poisoned").clone()
    }

    pub(super) fn count(&self) -> usize {
        self.calls.lock().expect("handler mutex poisoned").len()
    }
}

pub(super) fn employer_values() -> Vec<(&'static str, &'static str)> {
    vec![
        ("company", "Acme"),
        ("position", "HR"),
        ("email", "x@y.com"),
        ("graduateInstitution", "MIT"),
        ("skillsRating", "good"),
        ("feedback", "Great performance overall"),
        ("suggestions", ""),
    ]
}

pub(super) fn educational_values() -> Vec<(&'static str, &'static str)> {
    vec![
        ("institution", "State Technical College"),
        ("contactPerson", "Maria Ivanova"),
        ("email", "maria@college.edu"),
        ("phone", "+7 900 123-45-67"),
        ("message", "We would like hiring trends for our graduates"),
        ("interestArea", "market_data"),
    ]
}

pub(super) fn employer_record() -> FormRecord {
    FormRecord::from_pairs(FormVariant::Employer, employer_values()).expect("known fields")
}

pub(super) fn educational_record() -> FormRecord {
    FormRecord::from_pairs(FormVariant::Educational, educational_values()).expect("known fields")
}

pub(super) fn service_with_recorder() -> (
    Arc<FeedbackService<RecordingHandler>>,
    Arc<RecordingHandler>,
) {
    let handler = Arc::new(RecordingHandler::default());
    let service = Arc::new(FeedbackService::new(
        handler.clone(),
        RedirectPolicy::default(),
    ));
    (service, handler)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
