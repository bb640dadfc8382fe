//! Employer and educational feedback forms.
//!
//! One schema per audience, one controller shared by every presentation (dialog or
//! standalone page), and a pluggable sink that receives each accepted submission.

pub mod controller;
pub mod domain;
pub mod landing;
pub mod record;
pub mod router;
pub mod schema;
pub mod service;
pub mod session;
pub mod submission;
pub mod transition;

#[cfg(test)]
mod tests;

pub use controller::FormController;
pub use domain::{
    EducationalInquiry, EmployerFeedback, FormVariant, InterestArea, PresentationContext,
    SkillsRating, UnknownVariant, ValidatedSubmission,
};
pub use landing::{form_route, AudienceCard, LandingContent};
pub use record::{FormRecord, RecordError};
pub use router::feedback_router;
pub use schema::{
    ChoiceOption, FieldDescriptor, FieldKind, FieldSpec, FieldValidationError, FormDescriptor,
    FormSchema, Predicate, ValidationErrors,
};
pub use service::{FeedbackService, FeedbackServiceError, DEFAULT_MAX_SESSIONS};
pub use session::{SessionId, SessionView, ShellState};
pub use submission::{
    Acknowledgment, LoggingSubmissionHandler, SubmissionHandler, SubmissionReceipt,
};
pub use transition::{
    Navigator, PostSubmitTransition, RedirectPolicy, ScheduledRedirect, DEFAULT_REDIRECT_DELAY,
    DEFAULT_REDIRECT_ROUTE,
};
