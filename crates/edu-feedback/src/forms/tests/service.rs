use super::common::*;
use crate::forms::domain::{FormVariant, PresentationContext};
use crate::forms::service::FeedbackServiceError;
use crate::forms::session::SessionId;
use crate::forms::transition::PostSubmitTransition;
use std::time::Duration;

#[test]
fn submit_once_hands_off_valid_values() {
    let (service, handler) = service_with_recorder();

    let receipt = service
        .submit_once(
            FormVariant::Educational,
            PresentationContext::Page,
            educational_values(),
        )
        .expect("valid inquiry");

    assert_eq!(receipt.acknowledgment.title, "Request sent");
    assert!(matches!(
        receipt.transition,
        PostSubmitTransition::Redirect { delay_ms: 1500, .. }
    ));
    assert_eq!(handler.count(), 1);
    assert_eq!(service.open_sessions(), 0);
}

#[test]
fn submit_once_propagates_validation_errors() {
    let (service, handler) = service_with_recorder();
    let values = educational_values()
        .into_iter()
        .map(|(name, value)| if name == "message" { (name, "Hi 5!") } else { (name, value) });

    match service.submit_once(FormVariant::Educational, PresentationContext::Page, values) {
        Err(FeedbackServiceError::Validation(errors)) => {
            assert_eq!(errors.fields(), vec!["message"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(handler.count(), 0);
}

#[test]
fn submit_once_rejects_unknown_fields() {
    let (service, handler) = service_with_recorder();
    let mut values = employer_values();
    values.push(("salary", "100k"));

    match service.submit_once(FormVariant::Employer, PresentationContext::Dialog, values) {
        Err(FeedbackServiceError::Record(err)) => {
            assert!(err.to_string().contains("salary"));
        }
        other => panic!("expected unknown field error, got {other:?}"),
    }
    assert_eq!(handler.count(), 0);
}

#[test]
fn sessions_get_sequential_ids_and_start_blank() {
    let (service, _handler) = service_with_recorder();

    let first = service
        .open_session(FormVariant::Employer, PresentationContext::Dialog)
        .expect("session opens");
    let second = service
        .open_session(FormVariant::Educational, PresentationContext::Page)
        .expect("session opens");

    assert_eq!(first.id, SessionId("form-000001".to_string()));
    assert_eq!(second.id, SessionId("form-000002".to_string()));
    assert!(first.values.is_blank());
    assert!(first.dialog_open);
    assert_eq!(first.location, "/");
    assert!(!second.dialog_open);
    assert_eq!(second.location, "/educational-info");
    assert_eq!(service.open_sessions(), 2);
}

#[tokio::test]
async fn dialog_session_closes_on_successful_submit() {
    let (service, handler) = service_with_recorder();
    let session = service
        .open_session(FormVariant::Employer, PresentationContext::Dialog)
        .expect("session opens");

    for (name, value) in employer_values() {
        service
            .set_field(&session.id, name, value)
            .expect("known field");
    }
    let receipt = service.submit(&session.id).expect("accepted");
    assert_eq!(receipt.transition, PostSubmitTransition::CloseDialog);

    let view = service.session(&session.id).expect("session still open");
    assert!(!view.dialog_open);
    assert!(view.values.is_blank());
    assert!(!view.redirect_pending);
    assert_eq!(handler.count(), 1);
}

#[tokio::test]
async fn invalid_session_submit_records_errors_on_view() {
    let (service, handler) = service_with_recorder();
    let session = service
        .open_session(FormVariant::Educational, PresentationContext::Dialog)
        .expect("session opens");
    service
        .set_field(&session.id, "institution", "X")
        .expect("known field");

    match service.submit(&session.id) {
        Err(FeedbackServiceError::Validation(errors)) => assert_eq!(errors.len(), 6),
        other => panic!("expected validation error, got {other:?}"),
    }

    let view = service.session(&session.id).expect("session open");
    let errors = view.errors.expect("errors kept for rendering");
    assert!(errors.message_for("institution").is_some());
    assert_eq!(view.values.get("institution"), Some("X"));
    assert!(view.dialog_open);
    assert_eq!(handler.count(), 0);

    let view = service.reset(&session.id).expect("reset");
    assert!(view.errors.is_none());
    assert!(view.values.is_blank());
}

#[tokio::test(start_paused = true)]
async fn page_session_navigates_after_delay() {
    let (service, _handler) = service_with_recorder();
    let session = service
        .open_session(FormVariant::Employer, PresentationContext::Page)
        .expect("session opens");
    for (name, value) in employer_values() {
        service
            .set_field(&session.id, name, value)
            .expect("known field");
    }

    service.submit(&session.id).expect("accepted");
    let view = service.session(&session.id).expect("open");
    assert!(view.redirect_pending);
    assert_eq!(view.location, "/employer-feedback");

    tokio::time::sleep(Duration::from_millis(1600)).await;
    tokio::task::yield_now().await;

    let view = service.session(&session.id).expect("open");
    assert!(!view.redirect_pending);
    assert_eq!(view.location, "/");
}

#[tokio::test(start_paused = true)]
async fn closing_page_session_cancels_pending_redirect() {
    let (service, handler) = service_with_recorder();
    let session = service
        .open_session(FormVariant::Educational, PresentationContext::Page)
        .expect("session opens");
    for (name, value) in educational_values() {
        service
            .set_field(&session.id, name, value)
            .expect("known field");
    }
    service.submit(&session.id).expect("accepted");

    service.close(&session.id).expect("closed");
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(service.open_sessions(), 0);
    assert!(matches!(
        service.session(&session.id),
        Err(FeedbackServiceError::SessionNotFound(_))
    ));
    assert_eq!(handler.count(), 1);
}

#[test]
fn operations_on_missing_session_report_not_found() {
    let (service, _handler) = service_with_recorder();
    let missing = SessionId("form-999999".to_string());

    assert!(matches!(
        service.set_field(&missing, "company", "Acme"),
        Err(FeedbackServiceError::SessionNotFound(_))
    ));
    assert!(matches!(
        service.reset(&missing),
        Err(FeedbackServiceError::SessionNotFound(_))
    ));
    assert!(matches!(
        service.close(&missing),
        Err(FeedbackServiceError::SessionNotFound(_))
    ));
}

#[test]
fn open_sessions_are_capped_until_one_closes() {
    let (service, _handler) = service_with_recorder();
    let service = std::sync::Arc::try_unwrap(service)
        .unwrap_or_else(|_| panic!("service is not shared yet"))
        .with_session_limit(2);
    assert_eq!(service.session_limit(), 2);

    let first = service
        .open_session(FormVariant::Employer, PresentationContext::Dialog)
        .expect("session opens");
    service
        .open_session(FormVariant::Educational, PresentationContext::Page)
        .expect("session opens");

    match service.open_session(FormVariant::Employer, PresentationContext::Page) {
        Err(FeedbackServiceError::SessionLimitReached { limit }) => assert_eq!(limit, 2),
        other => panic!("expected session limit error, got {other:?}"),
    }
    assert_eq!(service.open_sessions(), 2);

    service.close(&first.id).expect("session closes");
    service
        .open_session(FormVariant::Employer, PresentationContext::Page)
        .expect("a closed session frees its slot");
    assert_eq!(service.open_sessions(), 2);
}
