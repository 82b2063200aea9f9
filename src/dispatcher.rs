//! Remote operation dispatcher.
//!
//! Turns a user-triggered [`Operation`] into one POST against the processing
//! service and shows the returned image. A request runs in three steps:
//!
//! 1. [`Dispatcher::begin`] checks preconditions and assembles the request
//! 2. the [`Transport`] sends it
//! 3. [`Dispatcher::complete`] interprets the answer and updates the views
//!
//! [`Dispatcher::dispatch`] runs all three. The split lets a caller complete
//! requests out of order, which is exactly what concurrent clicks do.

use web_time::Instant;

use crate::arbiter::{RequestArbiter, RequestId};
use crate::error::ProcessingError;
use crate::model::{CropParameters, Operation, SelectedFile};
use crate::request::OperationRequest;
use crate::transport::{Transport, TransportResponse};
use crate::view::{ImageView, Notifier};

/// What happened to one dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The result view now shows this request's image
    Displayed(RequestId),
    /// A newer request was already displayed; this one was dropped
    Superseded(RequestId),
    /// Never sent (no file, bad crop field)
    Rejected,
    /// The request failed and the user was alerted
    Failed(RequestId),
}

/// Sends operations to the processing service.
pub struct Dispatcher<T> {
    base_url: String,
    transport: T,
    arbiter: RequestArbiter,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            arbiter: RequestArbiter::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate and assemble a request. Issues a new request id on success.
    pub fn begin(
        &self,
        operation: Operation,
        file: Option<&SelectedFile>,
    ) -> Result<OperationRequest, ProcessingError> {
        let file = file.ok_or(ProcessingError::NoFileSelected)?;
        let id = self.arbiter.issue();
        let request = OperationRequest::build(id, &self.base_url, operation, file);
        log::info!(
            "Sending {} request {} to {}",
            operation.endpoint(),
            id,
            request.url
        );
        Ok(request)
    }

    /// Apply the outcome of request `id` to the result view.
    pub fn complete(
        &self,
        id: RequestId,
        response: Result<TransportResponse, ProcessingError>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        match response.and_then(TransportResponse::into_image) {
            Ok(image) => {
                if self.arbiter.try_apply(id) {
                    log::info!("Request {} succeeded", id);
                    result_view.set_source(&image.data_url());
                    DispatchOutcome::Displayed(id)
                } else {
                    log::debug!("Request {} finished after a newer result; dropped", id);
                    DispatchOutcome::Superseded(id)
                }
            }
            Err(err) => {
                log::error!("Request {} failed: {}", id, err);
                if self.arbiter.is_superseded(id) {
                    DispatchOutcome::Superseded(id)
                } else {
                    notifier.alert(&err.user_message());
                    DispatchOutcome::Failed(id)
                }
            }
        }
    }

    /// Report an operation that could not be sent.
    pub fn reject(&self, err: ProcessingError, notifier: &impl Notifier) -> DispatchOutcome {
        log::warn!("Operation not sent: {}", err);
        notifier.alert(&err.user_message());
        DispatchOutcome::Rejected
    }

    /// Send `operation` for `file` and show the result.
    pub async fn dispatch(
        &self,
        operation: Operation,
        file: Option<&SelectedFile>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        let request = match self.begin(operation, file) {
            Ok(request) => request,
            Err(err) => return self.reject(err, notifier),
        };

        let started = Instant::now();
        let response = self.transport.send(&request).await;
        log::debug!(
            "Request {} answered in {:.1?}",
            request.id,
            started.elapsed()
        );

        self.complete(request.id, response, result_view, notifier)
    }

    /// Crop the selected image.
    pub async fn crop(
        &self,
        crop: CropParameters,
        file: Option<&SelectedFile>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        self.dispatch(Operation::Crop(crop), file, result_view, notifier)
            .await
    }

    /// Crop using raw text from the four bound fields.
    pub async fn crop_from_fields(
        &self,
        [x, y, width, height]: [&str; 4],
        file: Option<&SelectedFile>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        match CropParameters::parse(x, y, width, height) {
            Ok(crop) => self.crop(crop, file, result_view, notifier).await,
            Err(err) => self.reject(err, notifier),
        }
    }

    /// Convert the selected image to grayscale.
    pub async fn grayscale(
        &self,
        file: Option<&SelectedFile>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        self.dispatch(Operation::Grayscale, file, result_view, notifier)
            .await
    }

    /// Run the server's convolution filter on the selected image.
    pub async fn convolution(
        &self,
        file: Option<&SelectedFile>,
        result_view: &impl ImageView,
        notifier: &impl Notifier,
    ) -> DispatchOutcome {
        self.dispatch(Operation::Convolution, file, result_view, notifier)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_BASE_URL, GENERIC_ERROR_MESSAGE, NO_FILE_MESSAGE};
    use crate::request::FormPart;
    use crate::test_support::{MockTransport, RecordingNotifier, RecordingView};
    use pollster::block_on;

    fn sample_file() -> SelectedFile {
        SelectedFile::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn dispatcher(
        responses: Vec<Result<TransportResponse, ProcessingError>>,
    ) -> Dispatcher<MockTransport> {
        Dispatcher::new(DEFAULT_BASE_URL, MockTransport::with_responses(responses))
    }

    #[test]
    fn test_success_sets_result_source() {
        let dispatcher = dispatcher(vec![MockTransport::image("AAAA")]);
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let outcome = block_on(dispatcher.grayscale(Some(&file), &view, &notifier));

        assert!(matches!(outcome, DispatchOutcome::Displayed(_)));
        assert_eq!(view.current().as_deref(), Some("data:image/jpeg;base64,AAAA"));
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[test]
    fn test_network_failure_alerts_once() {
        let dispatcher = dispatcher(vec![Err(ProcessingError::network("connection refused"))]);
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let outcome = block_on(dispatcher.convolution(Some(&file), &view, &notifier));

        assert!(matches!(outcome, DispatchOutcome::Failed(_)));
        assert!(view.sources.borrow().is_empty());
        assert_eq!(*notifier.alerts.borrow(), vec![GENERIC_ERROR_MESSAGE]);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let dispatcher = dispatcher(vec![
            MockTransport::image("Zmlyc3Q="),
            Err(ProcessingError::network("timeout")),
        ]);
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        block_on(dispatcher.grayscale(Some(&file), &view, &notifier));
        block_on(dispatcher.grayscale(Some(&file), &view, &notifier));

        assert_eq!(
            view.current().as_deref(),
            Some("data:image/jpeg;base64,Zmlyc3Q=")
        );
        assert_eq!(notifier.alerts.borrow().len(), 1);
    }

    #[test]
    fn test_bad_responses_collapse_to_generic_alert() {
        let dispatcher = dispatcher(vec![
            Ok(TransportResponse::new(500, "Internal Server Error")),
            Ok(TransportResponse::new(200, "not json")),
            Ok(TransportResponse::new(200, r#"{"detail":"missing"}"#)),
        ]);
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        for _ in 0..3 {
            let outcome = block_on(dispatcher.grayscale(Some(&file), &view, &notifier));
            assert!(matches!(outcome, DispatchOutcome::Failed(_)));
        }

        assert!(view.sources.borrow().is_empty());
        assert_eq!(*notifier.alerts.borrow(), vec![GENERIC_ERROR_MESSAGE; 3]);
    }

    #[test]
    fn test_no_file_is_rejected_before_sending() {
        let dispatcher = dispatcher(Vec::new());
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();

        let outcomes = [
            block_on(dispatcher.crop(CropParameters::default(), None, &view, &notifier)),
            block_on(dispatcher.grayscale(None, &view, &notifier)),
            block_on(dispatcher.convolution(None, &view, &notifier)),
        ];

        assert!(outcomes.iter().all(|o| *o == DispatchOutcome::Rejected));
        assert!(dispatcher.transport().sent.borrow().is_empty());
        assert_eq!(*notifier.alerts.borrow(), vec![NO_FILE_MESSAGE; 3]);
    }

    #[test]
    fn test_crop_sends_bounds_and_file() {
        let dispatcher = dispatcher(vec![MockTransport::image("AAAA")]);
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        block_on(dispatcher.crop_from_fields(
            ["10", "20", "100", "50"],
            Some(&file),
            &view,
            &notifier,
        ));

        let sent = dispatcher.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        let request = &sent[0];
        assert_eq!(request.url, "http://localhost:8000/crop");
        assert_eq!(request.payload.text("x"), Some("10"));
        assert_eq!(request.payload.text("y"), Some("20"));
        assert_eq!(request.payload.text("width"), Some("100"));
        assert_eq!(request.payload.text("height"), Some("50"));
        assert!(matches!(
            request.payload.file("image_file"),
            Some(FormPart::File { bytes, .. }) if *bytes == file.bytes
        ));
    }

    #[test]
    fn test_invalid_crop_field_is_not_sent() {
        let dispatcher = dispatcher(Vec::new());
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let outcome = block_on(dispatcher.crop_from_fields(
            ["10", "", "100", "50"],
            Some(&file),
            &view,
            &notifier,
        ));

        assert_eq!(outcome, DispatchOutcome::Rejected);
        assert!(dispatcher.transport().sent.borrow().is_empty());
        assert_eq!(
            *notifier.alerts.borrow(),
            vec!["Crop y must be a whole number."]
        );
    }

    #[test]
    fn test_newer_request_wins_when_it_resolves_first() {
        let dispatcher = dispatcher(Vec::new());
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let grayscale = dispatcher.begin(Operation::Grayscale, Some(&file)).unwrap();
        let convolution = dispatcher.begin(Operation::Convolution, Some(&file)).unwrap();

        let conv_outcome = dispatcher.complete(
            convolution.id,
            MockTransport::image("Q09OVg=="),
            &view,
            &notifier,
        );
        let gray_outcome = dispatcher.complete(
            grayscale.id,
            MockTransport::image("R1JBWQ=="),
            &view,
            &notifier,
        );

        assert_eq!(conv_outcome, DispatchOutcome::Displayed(convolution.id));
        assert_eq!(gray_outcome, DispatchOutcome::Superseded(grayscale.id));
        assert_eq!(
            view.current().as_deref(),
            Some("data:image/jpeg;base64,Q09OVg==")
        );
        assert_eq!(view.sources.borrow().len(), 1);
    }

    #[test]
    fn test_in_order_completions_both_display() {
        let dispatcher = dispatcher(Vec::new());
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let first = dispatcher.begin(Operation::Grayscale, Some(&file)).unwrap();
        let second = dispatcher.begin(Operation::Convolution, Some(&file)).unwrap();

        dispatcher.complete(first.id, MockTransport::image("AQ=="), &view, &notifier);
        dispatcher.complete(second.id, MockTransport::image("Ag=="), &view, &notifier);

        assert_eq!(view.sources.borrow().len(), 2);
        assert_eq!(view.current().as_deref(), Some("data:image/jpeg;base64,Ag=="));
    }

    #[test]
    fn test_superseded_failure_is_silent() {
        let dispatcher = dispatcher(Vec::new());
        let view = RecordingView::default();
        let notifier = RecordingNotifier::default();
        let file = sample_file();

        let older = dispatcher.begin(Operation::Grayscale, Some(&file)).unwrap();
        let newer = dispatcher.begin(Operation::Convolution, Some(&file)).unwrap();

        dispatcher.complete(newer.id, MockTransport::image("AAAA"), &view, &notifier);
        let outcome = dispatcher.complete(
            older.id,
            Err(ProcessingError::network("reset")),
            &view,
            &notifier,
        );

        assert_eq!(outcome, DispatchOutcome::Superseded(older.id));
        assert!(notifier.alerts.borrow().is_empty());
    }
}
