//! Recording doubles for the view, notifier and transport seams.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::ProcessingError;
use crate::request::OperationRequest;
use crate::transport::{Transport, TransportResponse};
use crate::view::{ImageView, Notifier};

/// Remembers every source it was given.
#[derive(Default)]
pub struct RecordingView {
    pub sources: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn current(&self) -> Option<String> {
        self.sources.borrow().last().cloned()
    }
}

impl ImageView for RecordingView {
    fn set_source(&self, src: &str) {
        self.sources.borrow_mut().push(src.to_string());
    }
}

/// Remembers every alert.
#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Answers requests from a queue of canned results and records what was sent.
#[derive(Default)]
pub struct MockTransport {
    pub sent: RefCell<Vec<OperationRequest>>,
    responses: RefCell<VecDeque<Result<TransportResponse, ProcessingError>>>,
}

impl MockTransport {
    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<TransportResponse, ProcessingError>>,
    ) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into_iter().collect()),
        }
    }

    pub fn image(base64: &str) -> Result<TransportResponse, ProcessingError> {
        Ok(TransportResponse::new(
            200,
            format!(r#"{{"image_base64":"{base64}"}}"#),
        ))
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &OperationRequest) -> Result<TransportResponse, ProcessingError> {
        self.sent.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ProcessingError::network("no canned response")))
    }
}
