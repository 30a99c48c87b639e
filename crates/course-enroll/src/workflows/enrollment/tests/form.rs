use super::common::*;
use crate::workflows::enrollment::document::{Branding, DocumentGenerator};
use crate::workflows::enrollment::domain::{ApplicationInput, FormField};
use crate::workflows::enrollment::form::{
    EnrollmentForm, FormSubmitResult, FormView, NOTIFICATION_TIMEOUT, REMOTE_FAILURE_MESSAGE,
    SCROLL_DELAY,
};
use crate::workflows::enrollment::gateway::ApplicationGateway;
use crate::workflows::enrollment::pipeline::SubmissionOutcome;
use std::sync::Arc;
use std::time::Duration;

fn form_with<G>(gateway: Arc<G>) -> (EnrollmentForm<G, MemorySink>, Arc<MemorySink>, Arc<RecordingView>)
where
    G: ApplicationGateway + 'static,
{
    let (pipeline, sink) = build_pipeline(gateway);
    let view = Arc::new(RecordingView::default());
    let form = EnrollmentForm::new(Arc::new(pipeline), view.clone() as Arc<dyn FormView>);
    (form, sink, view)
}

fn form_with_documents<G>(
    gateway: Arc<G>,
    documents: DocumentGenerator,
) -> (EnrollmentForm<G, MemorySink>, Arc<MemorySink>)
where
    G: ApplicationGateway + 'static,
{
    let sink = Arc::new(MemorySink::default());
    let pipeline = pipeline_with(gateway, sink.clone(), documents);
    let form = EnrollmentForm::new(Arc::new(pipeline), Arc::new(RecordingView::default()));
    (form, sink)
}

fn fill(form: &EnrollmentForm<impl ApplicationGateway + 'static, MemorySink>, input: &ApplicationInput) {
    form.set_field(FormField::Name, input.name.as_str());
    form.set_field(FormField::Email, input.email.as_str());
    form.set_field(FormField::Phone, input.phone.as_str());
    form.set_field(FormField::Address, input.address.as_str());
    form.set_field(FormField::City, input.city.as_str());
    form.set_field(FormField::State, input.state.as_str());
    form.set_field(FormField::Pincode, input.pincode.as_str());
    form.set_field(FormField::Age, input.age.as_str());
}

#[tokio::test(start_paused = true)]
async fn success_resets_input_and_shows_notification() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, sink, _view) = form_with(gateway);
    fill(&form, &asha_input());

    match form.submit(&course()).await {
        FormSubmitResult::Completed(SubmissionOutcome::Accepted { .. }) => {}
        other => panic!("expected acceptance, got {other:?}"),
    }

    assert!(form.input().is_empty());
    assert_eq!(form.error(), None);
    assert!(!form.is_busy());
    let notification = form.notification().expect("notification shown");
    assert!(notification.message.contains("482913"));
    assert_eq!(sink.documents().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn notification_auto_dismisses_after_timeout() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, _sink, _view) = form_with(gateway);
    fill(&form, &asha_input());
    form.submit(&course()).await;

    tokio::time::sleep(NOTIFICATION_TIMEOUT - Duration::from_millis(1)).await;
    assert!(form.notification().is_some());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(form.notification(), None);
}

#[tokio::test(start_paused = true)]
async fn notification_can_be_dismissed_early() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, _sink, _view) = form_with(gateway);
    fill(&form, &asha_input());
    form.submit(&course()).await;

    form.dismiss_notification();
    assert_eq!(form.notification(), None);
}

#[tokio::test(start_paused = true)]
async fn remote_failure_keeps_input_for_retry() {
    let gateway = Arc::new(MemoryGateway::rejecting());
    let (form, sink, view) = form_with(gateway.clone());
    fill(&form, &asha_input());

    form.submit(&course()).await;

    assert_eq!(form.input(), asha_input());
    assert_eq!(form.error().as_deref(), Some(REMOTE_FAILURE_MESSAGE));
    assert_eq!(form.notification(), None);
    assert!(!form.is_busy());
    assert!(sink.documents().is_empty());

    tokio::time::sleep(SCROLL_DELAY * 2).await;
    assert_eq!(view.scrolls(), 0);

    form.submit(&course()).await;
    assert_eq!(gateway.submitted().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn validation_error_scrolls_after_delay() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, _sink, view) = form_with(gateway.clone());
    let mut input = asha_input();
    input.name.clear();
    fill(&form, &input);

    form.submit(&course()).await;
    assert_eq!(form.error().as_deref(), Some("Name is required"));
    assert!(gateway.submitted().is_empty());

    tokio::time::sleep(SCROLL_DELAY - Duration::from_millis(1)).await;
    assert_eq!(view.scrolls(), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(view.scrolls(), 1);
    assert_eq!(form.input(), input);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_form_cancels_pending_scroll() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, _sink, view) = form_with(gateway);

    form.submit(&course()).await;
    drop(form);

    tokio::time::sleep(SCROLL_DELAY * 2).await;
    assert_eq!(view.scrolls(), 0);
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_in_flight_is_rejected() {
    let gateway = Arc::new(GatedGateway::default());
    let (form, _sink, _view) = form_with(gateway.clone());
    fill(&form, &asha_input());
    let form = Arc::new(form);

    let first = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.submit(&course()).await })
    };

    while gateway.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(form.is_busy());
    assert!(matches!(form.submit(&course()).await, FormSubmitResult::Busy));
    assert_eq!(gateway.calls(), 1);

    gateway.release();
    match first.await.expect("submission task completes") {
        FormSubmitResult::Completed(SubmissionOutcome::Accepted { .. }) => {}
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert!(!form.is_busy());
}

#[tokio::test(start_paused = true)]
async fn document_failure_still_resets_and_reports() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let documents = DocumentGenerator::new(Branding {
        accent_color: "#12".to_string(),
        ..Branding::default()
    });
    let (form, sink) = form_with_documents(gateway.clone(), documents);
    fill(&form, &asha_input());

    match form.submit(&course()).await {
        FormSubmitResult::Completed(SubmissionOutcome::DocumentFailed { .. }) => {}
        other => panic!("expected document failure, got {other:?}"),
    }

    assert!(form.input().is_empty());
    let notification = form.notification().expect("notification shown");
    assert!(notification.message.contains("482913"));
    let error = form.error().expect("document error shown");
    assert!(error.starts_with("Application 482913 was submitted"));
    assert!(error.contains("could not be generated"));
    assert_eq!(gateway.submitted().len(), 1);
    assert!(sink.documents().is_empty());
}

#[tokio::test(start_paused = true)]
async fn resubmitting_restarts_the_dismiss_timer() {
    let gateway = Arc::new(MemoryGateway::accepting());
    let (form, _sink, _view) = form_with(gateway);

    fill(&form, &asha_input());
    form.submit(&course()).await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    fill(&form, &asha_input());
    form.submit(&course()).await;

    // past the first submission's deadline, before the second's
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(form.notification().is_some());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(form.notification(), None);
}
