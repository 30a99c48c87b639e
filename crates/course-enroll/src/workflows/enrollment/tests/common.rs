use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use crate::workflows::catalog::CourseContext;
use crate::workflows::enrollment::document::{
    DocumentGenerationFailure, DocumentGenerator, DocumentSink, GeneratedDocument, SavedDocument,
};
use crate::workflows::enrollment::domain::{Application, ApplicationId, ApplicationInput};
use crate::workflows::enrollment::form::FormView;
use crate::workflows::enrollment::gateway::{ApplicationGateway, RemoteFailure, SubmissionReceipt};
use crate::workflows::enrollment::identifier::ApplicationIdSource;
use crate::workflows::enrollment::pipeline::SubmissionPipeline;

pub(super) fn asha_input() -> ApplicationInput {
    ApplicationInput {
        name: "Asha Rao".to_string(),
        email: String::new(),
        phone: "9876543210".to_string(),
        address: "12 MG Road".to_string(),
        city: "Pune".to_string(),
        state: "MH".to_string(),
        pincode: "411001".to_string(),
        age: "29".to_string(),
    }
}

pub(super) fn course() -> CourseContext {
    CourseContext {
        id: "web-101".to_string(),
        title: "Full Stack Web Development".to_string(),
        fees: 5000.0,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
        last_date_to_apply: NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid date"),
        start_time: "10:00".to_string(),
        end_time: "14:30".to_string(),
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date")
}

pub(super) struct FixedIds(pub(super) &'static str);

impl ApplicationIdSource for FixedIds {
    fn next_id(&self) -> ApplicationId {
        ApplicationId(self.0.to_string())
    }
}

/// Gateway answering every submission with a canned result.
pub(super) struct MemoryGateway {
    response: Result<SubmissionReceipt, RemoteFailure>,
    submitted: Mutex<Vec<Application>>,
}

impl MemoryGateway {
    pub(super) fn accepting() -> Self {
        Self::responding(Ok(SubmissionReceipt::accepted()))
    }

    pub(super) fn rejecting() -> Self {
        Self::responding(Err(RemoteFailure::Rejected {
            message: Some("course full".to_string()),
        }))
    }

    pub(super) fn unreachable() -> Self {
        Self::responding(Err(RemoteFailure::Transport(
            "connection refused".to_string(),
        )))
    }

    fn responding(response: Result<SubmissionReceipt, RemoteFailure>) -> Self {
        Self {
            response,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn submitted(&self) -> Vec<Application> {
        self.submitted.lock().expect("gateway mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationGateway for MemoryGateway {
    async fn submit(&self, application: &Application) -> Result<SubmissionReceipt, RemoteFailure> {
        self.submitted
            .lock()
            .expect("gateway mutex poisoned")
            .push(application.clone());
        self.response.clone()
    }
}

/// Gateway that holds every submission until `release` is called.
#[derive(Default)]
pub(super) struct GatedGateway {
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedGateway {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ApplicationGateway for GatedGateway {
    async fn submit(&self, _application: &Application) -> Result<SubmissionReceipt, RemoteFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(SubmissionReceipt::accepted())
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    documents: Mutex<Vec<GeneratedDocument>>,
}

impl MemorySink {
    pub(super) fn documents(&self) -> Vec<GeneratedDocument> {
        self.documents.lock().expect("sink mutex poisoned").clone()
    }
}

impl DocumentSink for MemorySink {
    fn deliver(
        &self,
        document: &GeneratedDocument,
    ) -> Result<SavedDocument, DocumentGenerationFailure> {
        self.documents
            .lock()
            .expect("sink mutex poisoned")
            .push(document.clone());
        Ok(SavedDocument {
            file_name: document.file_name.clone(),
            location: std::path::PathBuf::from("memory").join(&document.file_name),
            size_bytes: document.bytes.len(),
        })
    }
}

#[derive(Default)]
pub(super) struct RecordingView {
    scrolls: AtomicUsize,
}

impl RecordingView {
    pub(super) fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

impl FormView for RecordingView {
    fn scroll_to_error(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}

pub(super) fn pipeline_with<G>(
    gateway: Arc<G>,
    sink: Arc<MemorySink>,
    documents: DocumentGenerator,
) -> SubmissionPipeline<G, MemorySink>
where
    G: ApplicationGateway + 'static,
{
    SubmissionPipeline::new(gateway, sink, documents).with_id_source(Arc::new(FixedIds("482913")))
}

pub(super) fn build_pipeline<G>(gateway: Arc<G>) -> (SubmissionPipeline<G, MemorySink>, Arc<MemorySink>)
where
    G: ApplicationGateway + 'static,
{
    let sink = Arc::new(MemorySink::default());
    let pipeline = pipeline_with(gateway, sink.clone(), DocumentGenerator::default());
    (pipeline, sink)
}
