//! Native transport built on reqwest's blocking client.

use reqwest::blocking::{Client, multipart};

use super::{Transport, TransportResponse};
use crate::error::ProcessingError;
use crate::request::{FormPart, FormPayload, OperationRequest};

/// Posts multipart forms with a blocking HTTP client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a client with no request timeout.
    pub fn new() -> Result<Self, ProcessingError> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(ProcessingError::network)?;
        Ok(Self { client })
    }

    fn post(&self, request: &OperationRequest) -> Result<TransportResponse, ProcessingError> {
        let form = to_form(&request.payload)?;
        let response = self
            .client
            .post(&request.url)
            .multipart(form)
            .send()
            .map_err(ProcessingError::network)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(ProcessingError::network)?;
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &OperationRequest) -> Result<TransportResponse, ProcessingError> {
        self.post(request)
    }
}

fn to_form(payload: &FormPayload) -> Result<multipart::Form, ProcessingError> {
    let mut form = multipart::Form::new();
    for part in payload.parts() {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                filename,
                mime,
                bytes,
            } => {
                let file = multipart::Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str(mime)
                    .map_err(ProcessingError::network)?;
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}
