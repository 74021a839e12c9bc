//! Lifecycle of locally created preview resources
//!
//! Image and video pages show the selected file through a preview URL that
//! must be released once it is superseded or the page goes away.

/// A releasable preview handle, e.g. a browser object URL
pub trait PreviewResource {
    fn url(&self) -> &str;

    /// Release the underlying resource
    fn release(self);
}

/// Holds at most one live preview and releases it when replaced or dropped
#[derive(Debug)]
pub struct PreviewSlot<R: PreviewResource> {
    current: Option<R>,
}

impl<R: PreviewResource> PreviewSlot<R> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Install a new preview, releasing the previous one
    pub fn replace(&mut self, resource: R) {
        if let Some(previous) = self.current.replace(resource) {
            previous.release();
        }
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.release();
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.url())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<R: PreviewResource> Default for PreviewSlot<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PreviewResource> Drop for PreviewSlot<R> {
    fn drop(&mut self) {
        self.clear();
    }
}
