//! Output seams: where images are shown and where errors are reported.

/// Something that can display an image given a source URL.
pub trait ImageView {
    /// Replace the displayed image.
    fn set_source(&self, src: &str);
}

/// Blocking user notification (an alert box or its equivalent).
pub trait Notifier {
    fn alert(&self, message: &str);
}
