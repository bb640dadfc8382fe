use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::controller::FormController;
use super::domain::{FormVariant, PresentationContext};
use super::record::{FormRecord, RecordError};
use super::schema::ValidationErrors;
use super::session::{FormSession, SessionId, SessionView};
use super::submission::{SubmissionHandler, SubmissionReceipt};
use super::transition::RedirectPolicy;

/// Open sessions allowed when no limit is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Service composing the submission handler, redirect policy, and open form sessions.
pub struct FeedbackService<H: ?Sized> {
    handler: Arc<H>,
    redirect: RedirectPolicy,
    sessions: Mutex<HashMap<SessionId, FormSession<H>>>,
    sequence: AtomicU64,
    max_sessions: usize,
}

impl<H> FeedbackService<H>
where
    H: SubmissionHandler + ?Sized + 'static,
{
    pub fn new(handler: Arc<H>, redirect: RedirectPolicy) -> Self {
        Self {
            handler,
            redirect,
            sessions: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Cap the number of sessions held open at once. Opening past the cap fails until
    /// some session is closed.
    pub fn with_session_limit(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    pub fn session_limit(&self) -> usize {
        self.max_sessions
    }

    pub fn redirect_policy(&self) -> &RedirectPolicy {
        &self.redirect
    }

    /// Validate raw values and hand them off in one step, without keeping a session.
    /// The transition is returned for the caller to carry out.
    pub fn submit_once<I, K, V>(
        &self,
        variant: FormVariant,
        context: PresentationContext,
        values: I,
    ) -> Result<SubmissionReceipt, FeedbackServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let record = FormRecord::from_pairs(variant, values)?;
        let mut controller = FormController::with_record(
            record,
            context,
            self.handler.clone(),
            self.redirect.clone(),
        );
        Ok(controller.submit()?)
    }

    pub fn open_session(
        &self,
        variant: FormVariant,
        context: PresentationContext,
    ) -> Result<SessionView, FeedbackServiceError> {
        let mut sessions = self.lock();
        if sessions.len() >= self.max_sessions {
            warn!(limit = self.max_sessions, %variant, "form session limit reached");
            return Err(FeedbackServiceError::SessionLimitReached {
                limit: self.max_sessions,
            });
        }

        let id = self.next_session_id();
        let controller = FormController::with_redirect(
            variant,
            context,
            self.handler.clone(),
            self.redirect.clone(),
        );
        let session = FormSession::new(controller);
        let view = session.view(&id);

        info!(session = %id, %variant, ?context, "form session opened");
        sessions.insert(id, session);
        Ok(view)
    }

    pub fn session(&self, id: &SessionId) -> Result<SessionView, FeedbackServiceError> {
        let sessions = self.lock();
        let session = sessions.get(id).ok_or_else(|| not_found(id))?;
        Ok(session.view(id))
    }

    pub fn set_field(
        &self,
        id: &SessionId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<SessionView, FeedbackServiceError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.controller.set_field(name, value)?;
        Ok(session.view(id))
    }

    /// Submit the session's form and carry out its transition. Page redirects are
    /// scheduled on the tokio runtime, so this must run inside one.
    pub fn submit(&self, id: &SessionId) -> Result<SubmissionReceipt, FeedbackServiceError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        let receipt = session.controller.submit()?;

        // Replacing an earlier handle drops it, which cancels that redirect.
        session.redirect = receipt.transition.apply(session.shell.clone());

        info!(session = %id, variant = %receipt.variant, "form session submitted");
        Ok(receipt)
    }

    pub fn reset(&self, id: &SessionId) -> Result<SessionView, FeedbackServiceError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.controller.reset();
        Ok(session.view(id))
    }

    /// Tear the session down. A redirect that has not fired yet is cancelled.
    pub fn close(&self, id: &SessionId) -> Result<(), FeedbackServiceError> {
        let session = self.lock().remove(id).ok_or_else(|| not_found(id))?;
        let cancelled = session
            .redirect
            .map(|redirect| redirect.cancel())
            .unwrap_or(false);
        info!(session = %id, cancelled_redirect = cancelled, "form session closed");
        Ok(())
    }

    pub fn open_sessions(&self) -> usize {
        self.lock().len()
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("form-{id:06}"))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, FormSession<H>>> {
        self.sessions.lock().expect("session mutex poisoned")
    }
}

fn not_found(id: &SessionId) -> FeedbackServiceError {
    FeedbackServiceError::SessionNotFound(id.clone())
}

/// Error raised by the feedback service.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("form session '{0}' not found")]
    SessionNotFound(SessionId),
    #[error("too many open form sessions (limit {limit})")]
    SessionLimitReached { limit: usize },
}
