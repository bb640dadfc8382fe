use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::controller::FormController;
use super::domain::{FormVariant, PresentationContext};
use super::landing::form_route;
use super::record::FormRecord;
use super::schema::ValidationErrors;
use super::submission::SubmissionHandler;
use super::transition::{Navigator, ScheduledRedirect};

/// Identifier wrapper for open form sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// View-side state the navigator mutates: whether the dialog is open and where the
/// user currently is.
#[derive(Debug)]
pub struct ShellState {
    dialog_open: AtomicBool,
    location: Mutex<String>,
}

impl ShellState {
    pub fn for_form(variant: FormVariant, context: PresentationContext) -> Self {
        let (dialog_open, location) = match context {
            PresentationContext::Dialog => (true, "/"),
            PresentationContext::Page => (false, form_route(variant)),
        };
        Self {
            dialog_open: AtomicBool::new(dialog_open),
            location: Mutex::new(location.to_string()),
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open.load(Ordering::Acquire)
    }

    pub fn location(&self) -> String {
        self.location.lock().expect("location mutex poisoned").clone()
    }
}

impl Navigator for ShellState {
    fn close_dialog(&self) {
        self.dialog_open.store(false, Ordering::Release);
    }

    fn navigate(&self, route: &str) {
        let mut guard = self.location.lock().expect("location mutex poisoned");
        info!(from = %*guard, to = route, "navigating");
        *guard = route.to_string();
    }
}

/// One open form: its controller, its shell, and any redirect still waiting to fire.
pub(crate) struct FormSession<H: ?Sized> {
    pub(crate) controller: FormController<H>,
    pub(crate) shell: Arc<ShellState>,
    pub(crate) redirect: Option<ScheduledRedirect>,
}

impl<H> FormSession<H>
where
    H: SubmissionHandler + ?Sized,
{
    pub(crate) fn new(controller: FormController<H>) -> Self {
        let shell = Arc::new(ShellState::for_form(
            controller.variant(),
            controller.context(),
        ));
        Self {
            controller,
            shell,
            redirect: None,
        }
    }

    pub(crate) fn view(&self, id: &SessionId) -> SessionView {
        SessionView {
            id: id.clone(),
            variant: self.controller.variant(),
            context: self.controller.context(),
            values: self.controller.values().clone(),
            errors: self.controller.errors().cloned(),
            dialog_open: self.shell.dialog_open(),
            location: self.shell.location(),
            redirect_pending: self
                .redirect
                .as_ref()
                .map(ScheduledRedirect::is_pending)
                .unwrap_or(false),
        }
    }
}

/// Snapshot of a session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub variant: FormVariant,
    pub context: PresentationContext,
    pub values: FormRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    pub dialog_open: bool,
    pub location: String,
    pub redirect_pending: bool,
}
