//! WASM file loading utilities.
//!
//! Reads the file chosen in an `<input type="file">` into memory. The
//! `FileReader` callback API is wrapped in a promise so callers can simply
//! await the result.

use js_sys::{Function, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::error::ProcessingError;
use crate::model::{SelectedFile, sniff_mime};

/// The first file currently chosen in `input`, if any.
pub fn first_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

/// Read a picked file into memory.
pub async fn read_file(file: File) -> Result<SelectedFile, ProcessingError> {
    let name = file.name();
    log::info!("📂 Reading file: {}", name);

    let reader = FileReader::new().map_err(js_file_error)?;
    let loaded = reader_promise(&reader);
    reader.read_as_array_buffer(&file).map_err(js_file_error)?;

    let buffer = JsFuture::from(loaded).await.map_err(js_file_error)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    log::info!("📂 File {} read: {} bytes", name, bytes.len());

    // Browsers leave the type empty for unknown extensions
    let mime = match file.type_() {
        mime if mime.is_empty() => sniff_mime(&bytes).to_string(),
        mime => mime,
    };

    Ok(SelectedFile::new(name, mime, bytes))
}

/// A promise that settles when `reader` finishes: resolved with its result
/// on load, rejected on error.
fn reader_promise(reader: &FileReader) -> Promise {
    Promise::new(&mut |resolve: Function, reject: Function| {
        let target = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = target.result().unwrap_or(JsValue::UNDEFINED);
            if let Err(e) = resolve.call1(&JsValue::NULL, &result) {
                log::error!("📂 Failed to resolve file read: {:?}", e);
            }
        });

        let onerror = Closure::once_into_js(move || {
            if let Err(e) = reject.call1(&JsValue::NULL, &JsValue::from_str("FileReader error")) {
                log::error!("📂 Failed to reject file read: {:?}", e);
            }
        });

        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    })
}

fn js_file_error(value: JsValue) -> ProcessingError {
    ProcessingError::file_read(format!("{:?}", value))
}
