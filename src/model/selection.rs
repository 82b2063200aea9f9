//! The user's picked file.

use crate::constants::FALLBACK_MIME;
use crate::data_url;

/// A file picked by the user, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the picker
    pub name: String,
    /// MIME type (e.g. `image/png`)
    pub mime: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a file with an explicit MIME type.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Create a file whose MIME type is sniffed from its contents.
    pub fn sniffed(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = sniff_mime(&bytes);
        Self::new(name, mime, bytes)
    }

    /// The file as a data URL, suitable for an image source.
    pub fn to_data_url(&self) -> String {
        data_url::encode(&self.mime, &self.bytes)
    }
}

/// Guess an image MIME type from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// Holds the currently selected file. A new pick replaces the previous one.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<SelectedFile>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected file.
    pub fn select(&mut self, file: SelectedFile) {
        log::debug!("Selected {} ({} bytes)", file.name, file.bytes.len());
        self.current = Some(file);
    }

    /// Drop the selected file (e.g. the picker was cleared).
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The currently selected file, if any.
    pub fn get(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }
}
