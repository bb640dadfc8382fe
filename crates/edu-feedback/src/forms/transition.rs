use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use super::domain::PresentationContext;

pub const DEFAULT_REDIRECT_ROUTE: &str = "/";
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Navigation hooks owned by whatever renders the form.
pub trait Navigator: Send + Sync + 'static {
    fn close_dialog(&self);
    fn navigate(&self, route: &str);
}

/// Where standalone pages send the user after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPolicy {
    pub route: String,
    pub delay: Duration,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            route: DEFAULT_REDIRECT_ROUTE.to_string(),
            delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

impl RedirectPolicy {
    pub fn transition_for(&self, context: PresentationContext) -> PostSubmitTransition {
        match context {
            PresentationContext::Dialog => PostSubmitTransition::CloseDialog,
            PresentationContext::Page => PostSubmitTransition::Redirect {
                route: self.route.clone(),
                delay_ms: self.delay.as_millis() as u64,
            },
        }
    }
}

/// What the shell should do once a submission has been handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostSubmitTransition {
    CloseDialog,
    Redirect { route: String, delay_ms: u64 },
}

impl PostSubmitTransition {
    /// Run the transition against a navigator. Dialogs close immediately; redirects are
    /// scheduled and the returned handle must be kept alive for them to fire.
    pub fn apply<N: Navigator>(&self, navigator: Arc<N>) -> Option<ScheduledRedirect> {
        match self {
            PostSubmitTransition::CloseDialog => {
                navigator.close_dialog();
                None
            }
            PostSubmitTransition::Redirect { route, delay_ms } => Some(ScheduledRedirect::schedule(
                navigator,
                route.clone(),
                Duration::from_millis(*delay_ms),
            )),
        }
    }
}

/// One-shot delayed navigation. Dropping or cancelling the handle before the delay
/// elapses guarantees the navigator is never called.
#[derive(Debug)]
pub struct ScheduledRedirect {
    task: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
    route: String,
}

impl ScheduledRedirect {
    /// Must be called from within a tokio runtime.
    pub fn schedule<N: Navigator>(navigator: Arc<N>, route: String, delay: Duration) -> Self {
        let fired = Arc::new(AtomicBool::new(false));
        let task = {
            let fired = fired.clone();
            let route = route.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                fired.store(true, Ordering::Release);
                navigator.navigate(&route);
            })
        };

        debug!(%route, delay_ms = delay.as_millis() as u64, "redirect scheduled");

        Self {
            task: Some(task),
            fired,
            route,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn is_pending(&self) -> bool {
        !self.has_fired()
            && self
                .task
                .as_ref()
                .map(|task| !task.is_finished())
                .unwrap_or(false)
    }

    /// Abort the redirect. Returns `true` when it was still pending.
    pub fn cancel(mut self) -> bool {
        let pending = self.is_pending();
        self.abort();
        pending
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(route = %self.route, "redirect cancelled");
            }
            task.abort();
        }
    }
}

impl Drop for ScheduledRedirect {
    fn drop(&mut self) {
        self.abort();
    }
}
