//! Browser transport built on `window.fetch`.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

use super::{Transport, TransportResponse};
use crate::error::ProcessingError;
use crate::request::{FormPart, FormPayload, OperationRequest};

/// Posts `FormData` bodies through the page's fetch API.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: &OperationRequest) -> Result<TransportResponse, ProcessingError> {
        let window = web_sys::window()
            .ok_or_else(|| ProcessingError::network("no window object available"))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&to_form_data(&request.payload)?);

        let response: Response = JsFuture::from(window.fetch_with_str_and_init(&request.url, &init))
            .await
            .map_err(js_network)?
            .dyn_into()
            .map_err(js_network)?;

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(js_network)?)
            .await
            .map_err(js_network)?;

        Ok(TransportResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

fn to_form_data(payload: &FormPayload) -> Result<FormData, ProcessingError> {
    let form = FormData::new().map_err(js_network)?;
    for part in payload.parts() {
        match part {
            FormPart::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_network)?;
            }
            FormPart::File {
                name,
                filename,
                mime,
                bytes,
            } => {
                let blob = to_blob(mime, bytes)?;
                form.append_with_blob_and_filename(name, &blob, filename)
                    .map_err(js_network)?;
            }
        }
    }
    Ok(form)
}

fn to_blob(mime: &str, bytes: &[u8]) -> Result<Blob, ProcessingError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_network)
}

fn js_network(value: JsValue) -> ProcessingError {
    ProcessingError::network(format!("{:?}", value))
}
