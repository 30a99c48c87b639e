use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::document::DocumentSink;
use super::domain::{ApplicationInput, FormField};
use super::gateway::ApplicationGateway;
use super::pipeline::{SubmissionOutcome, SubmissionPipeline};
use crate::workflows::catalog::CourseContext;

/// Delay before scrolling to a freshly shown validation error, so layout can settle.
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);
/// How long the success notification stays up unless dismissed.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

pub const REMOTE_FAILURE_MESSAGE: &str = "Failed to submit application. Please try again.";

/// Hooks into whatever is presenting the form.
pub trait FormView: Send + Sync {
    fn scroll_to_error(&self);
}

/// View that ignores presentation hooks (headless callers such as the CLI).
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl FormView for HeadlessView {
    fn scroll_to_error(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

#[derive(Debug)]
pub enum FormSubmitResult {
    /// A submission is already in flight; nothing was done.
    Busy,
    Completed(SubmissionOutcome),
}

#[derive(Debug, Default)]
struct FormState {
    input: ApplicationInput,
    error: Option<String>,
    notification: Option<Notification>,
}

#[derive(Default)]
struct Timers {
    scroll: Option<JoinHandle<()>>,
    dismiss: Option<JoinHandle<()>>,
}

impl Timers {
    fn abort_all(&mut self) {
        for handle in [self.scroll.take(), self.dismiss.take()].into_iter().flatten() {
            handle.abort();
        }
    }
}

/// Clears the busy flag however the submission ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller owning one application form: its input, busy flag, visible messages,
/// and the timers scheduled on its behalf. Timers are aborted when the form is dropped.
pub struct EnrollmentForm<G, S> {
    pipeline: Arc<SubmissionPipeline<G, S>>,
    view: Arc<dyn FormView>,
    state: Arc<Mutex<FormState>>,
    busy: AtomicBool,
    timers: Mutex<Timers>,
}

impl<G, S> EnrollmentForm<G, S>
where
    G: ApplicationGateway + 'static,
    S: DocumentSink + 'static,
{
    pub fn new(pipeline: Arc<SubmissionPipeline<G, S>>, view: Arc<dyn FormView>) -> Self {
        Self {
            pipeline,
            view,
            state: Arc::new(Mutex::new(FormState::default())),
            busy: AtomicBool::new(false),
            timers: Mutex::new(Timers::default()),
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.lock_state().input.set(field, value);
    }

    pub fn input(&self) -> ApplicationInput {
        self.lock_state().input.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.lock_state().notification.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn dismiss_notification(&self) {
        if let Some(handle) = self.lock_timers().dismiss.take() {
            handle.abort();
        }
        self.lock_state().notification = None;
    }

    /// Run the pipeline for the current input. Rejected with `Busy` while a previous
    /// submission is still waiting on the collaborator.
    pub async fn submit(&self, course: &CourseContext) -> FormSubmitResult {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return FormSubmitResult::Busy;
        }
        let _busy = BusyGuard(&self.busy);

        let input = {
            let mut state = self.lock_state();
            state.error = None;
            state.input.clone()
        };

        let outcome = self.pipeline.submit(input, course).await;
        self.apply_outcome(&outcome);
        FormSubmitResult::Completed(outcome)
    }

    fn apply_outcome(&self, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Invalid(error) => {
                self.lock_state().error = Some(error.to_string());
                self.schedule_scroll();
            }
            SubmissionOutcome::RemoteRejected { .. } => {
                self.lock_state().error = Some(REMOTE_FAILURE_MESSAGE.to_string());
            }
            SubmissionOutcome::Accepted { application, .. } => {
                self.on_accepted(application.application_id().as_str(), None);
            }
            SubmissionOutcome::DocumentFailed {
                application,
                failure,
            } => {
                let id = application.application_id().as_str();
                let error = format!(
                    "Application {id} was submitted, but the confirmation document could not be generated: {failure}"
                );
                self.on_accepted(id, Some(error));
            }
        }
    }

    fn on_accepted(&self, application_id: &str, error: Option<String>) {
        {
            let mut state = self.lock_state();
            state.input = ApplicationInput::default();
            state.error = error;
            state.notification = Some(Notification {
                message: format!(
                    "Application submitted successfully! Your application ID is {application_id}."
                ),
            });
        }
        self.schedule_dismiss();
    }

    fn schedule_scroll(&self) {
        let view = Arc::clone(&self.view);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(SCROLL_DELAY).await;
            view.scroll_to_error();
        });
        if let Some(previous) = self.lock_timers().scroll.replace(handle) {
            previous.abort();
        }
    }

    fn schedule_dismiss(&self) {
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_TIMEOUT).await;
            state
                .lock()
                .expect("form state mutex poisoned")
                .notification = None;
        });
        if let Some(previous) = self.lock_timers().dismiss.replace(handle) {
            previous.abort();
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FormState> {
        self.state.lock().expect("form state mutex poisoned")
    }

    fn lock_timers(&self) -> std::sync::MutexGuard<'_, Timers> {
        self.timers.lock().expect("form timer mutex poisoned")
    }
}

impl<G, S> Drop for EnrollmentForm<G, S> {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            timers.abort_all();
        }
    }
}
