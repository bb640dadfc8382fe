use std::sync::Arc;

use tracing::debug;

use super::domain::{FormVariant, PresentationContext};
use super::record::{FormRecord, RecordError};
use super::schema::{FormSchema, ValidationErrors};
use super::submission::{SubmissionHandler, SubmissionReceipt};
use super::transition::RedirectPolicy;

/// Binds one variant's schema to mutable field state. Validation runs on submit only.
pub struct FormController<H: ?Sized> {
    schema: &'static FormSchema,
    context: PresentationContext,
    redirect: RedirectPolicy,
    record: FormRecord,
    errors: Option<ValidationErrors>,
    handler: Arc<H>,
}

impl<H> FormController<H>
where
    H: SubmissionHandler + ?Sized,
{
    pub fn new(variant: FormVariant, context: PresentationContext, handler: Arc<H>) -> Self {
        Self::with_redirect(variant, context, handler, RedirectPolicy::default())
    }

    pub fn with_redirect(
        variant: FormVariant,
        context: PresentationContext,
        handler: Arc<H>,
        redirect: RedirectPolicy,
    ) -> Self {
        Self::with_record(FormRecord::empty(variant), context, handler, redirect)
    }

    /// Start from values that were already collected elsewhere.
    pub fn with_record(
        record: FormRecord,
        context: PresentationContext,
        handler: Arc<H>,
        redirect: RedirectPolicy,
    ) -> Self {
        Self {
            schema: FormSchema::for_variant(record.variant()),
            context,
            redirect,
            record,
            errors: None,
            handler,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.schema.variant
    }

    pub fn context(&self) -> PresentationContext {
        self.context
    }

    pub fn values(&self) -> &FormRecord {
        &self.record
    }

    /// Errors from the last rejected submit, if any.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), RecordError> {
        self.record.set(name, value)
    }

    pub fn submit(&mut self) -> Result<SubmissionReceipt, ValidationErrors> {
        let variant = self.variant();
        match self.schema.validate(&self.record) {
            Ok(submission) => {
                self.handler.handle(variant, &submission);
                self.reset();
                Ok(SubmissionReceipt::new(variant, self.context, &self.redirect))
            }
            Err(errors) => {
                debug!(%variant, fields = ?errors.fields(), "submission rejected");
                self.errors = Some(errors.clone());
                Err(errors)
            }
        }
    }

    pub fn reset(&mut self) {
        self.record.clear();
        self.errors = None;
    }
}
