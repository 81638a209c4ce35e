use std::time::Duration;

use tokio::time::Instant;
use validator::Validate;

use crate::{ContactSubmission, Error, Field, Result, Transport};

/// How long the confirmation stays on screen before the form resets.
pub const RESET_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_TITLE: &str = "Message Sent!";
pub const SUCCESS_MESSAGE: &str = "We'll be in touch soon.";
pub const FAILURE_MESSAGE: &str = "Sorry, there was an error. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editing(ContactSubmission),
    Submitting(ContactSubmission),
    Submitted { at: Instant },
    Failed {
        draft: ContactSubmission,
        message: &'static str,
    },
}

impl Default for FormState {
    fn default() -> Self {
        Self::Editing(ContactSubmission::default())
    }
}

/// Drives the contact form: keeps the draft, gates submission on the
/// required fields and tracks the single in-flight request.
///
/// The controller is reusable; after a confirmed submission it clears itself
/// and goes back to an empty draft instead of ending.
#[derive(Debug, Default)]
pub struct ContactForm {
    state: FormState,
    open: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Draft being edited or sent. `None` once the submission was accepted.
    pub fn draft(&self) -> Option<&ContactSubmission> {
        match &self.state {
            FormState::Editing(draft)
            | FormState::Submitting(draft)
            | FormState::Failed { draft, .. } => Some(draft),
            FormState::Submitted { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self.state {
            FormState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, FormState::Editing(_) | FormState::Failed { .. })
    }

    /// Updates one field of the draft. Returns `false` when the form is not
    /// editable. A pending error message is dropped by any edit.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        match std::mem::take(&mut self.state) {
            FormState::Editing(mut draft) | FormState::Failed { mut draft, .. } => {
                draft.set(field, value);
                self.state = FormState::Editing(draft);
                true
            }
            state => {
                self.state = state;
                false
            }
        }
    }

    /// Validates the draft and moves to `Submitting`, returning the payload to
    /// send. Nothing changes when validation fails.
    pub fn begin_submit(&mut self, page_url: impl Into<String>) -> Result<ContactSubmission> {
        let draft = match &self.state {
            FormState::Editing(draft) | FormState::Failed { draft, .. } => draft,
            FormState::Submitting(_) => return Err(Error::InFlight),
            FormState::Submitted { .. } => return Err(Error::Acknowledged),
        };

        draft.validate()?;

        let mut submission = draft.clone();
        submission.page_url = page_url.into();
        self.state = FormState::Submitting(submission.clone());

        Ok(submission)
    }

    /// Applies the outcome of the request started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, succeeded: bool) {
        let mut draft = match std::mem::take(&mut self.state) {
            FormState::Submitting(draft) => draft,
            state => {
                self.state = state;
                tracing::warn!("submission finished while none was in flight");
                return;
            }
        };

        if succeeded {
            self.state = FormState::Submitted { at: Instant::now() };
            return;
        }

        draft.page_url.clear();
        self.state = FormState::Failed {
            draft,
            message: FAILURE_MESSAGE,
        };
    }

    /// Submits the draft through `transport`: one request, no timeout.
    ///
    /// Validation errors and a submission already in flight are returned as
    /// `Err` without touching the network. Proxy failures are not errors, they
    /// land the form in [`FormState::Failed`].
    pub async fn submit<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        page_url: impl Into<String>,
    ) -> Result<&FormState> {
        let submission = self.begin_submit(page_url)?;

        let succeeded = match transport.send(&submission).await {
            Ok(reply) if reply.is_success() => true,
            Ok(reply) => {
                tracing::debug!(status = reply.status, "contact proxy refused submission");
                false
            }
            Err(e) => {
                tracing::debug!("contact proxy unreachable: {e}");
                false
            }
        };

        self.finish_submit(succeeded);

        Ok(&self.state)
    }

    pub fn reset_deadline(&self) -> Option<Instant> {
        match self.state {
            FormState::Submitted { at } => Some(at + RESET_DELAY),
            _ => None,
        }
    }

    /// Clears and closes the form once the confirmation delay has elapsed.
    /// Returns whether a reset happened.
    pub fn poll_reset(&mut self, now: Instant) -> bool {
        match self.reset_deadline() {
            Some(deadline) if now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Waits out the confirmation delay, then clears and closes the form.
    pub async fn settle(&mut self) {
        if let Some(deadline) = self.reset_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state = FormState::default();
        self.open = false;
    }
}
