//! Frame display and keyboard input.

use std::time::Duration;

#[cfg(feature = "opencv")]
use anyhow::Context;
#[cfg(feature = "opencv")]
use opencv::{core::Mat, highgui};

use crate::mode::Key;

/// Title of the application window.
pub const WINDOW_TITLE: &str = "Hough line/circle detection";

/// A place to show frames that also delivers key presses.
pub trait Display {
    type Frame;

    fn show_frame(&mut self, frame: &Self::Frame) -> anyhow::Result<()>;

    /// Waits up to `timeout` for a key press.
    ///
    /// Returns `Ok(None)` if no key was pressed in time.
    fn poll_key(&mut self, timeout: Duration) -> anyhow::Result<Option<Key>>;
}

/// A native window managed by OpenCV's HighGUI module.
///
/// The window is destroyed when this value is dropped.
#[cfg(feature = "opencv")]
pub struct Window {
    title: String,
}

#[cfg(feature = "opencv")]
impl Window {
    /// Creates a window with the given title.
    pub fn open(title: impl Into<String>) -> anyhow::Result<Self> {
        let title = title.into();
        highgui::named_window(&title, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("failed to create window '{title}'"))?;
        log::debug!("created window '{title}'");
        Ok(Self { title })
    }
}

#[cfg(feature = "opencv")]
impl Display for Window {
    type Frame = Mat;

    fn show_frame(&mut self, frame: &Mat) -> anyhow::Result<()> {
        highgui::imshow(&self.title, frame)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> anyhow::Result<Option<Key>> {
        // A delay of 0 would block until a key is pressed.
        let delay = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX).max(1);
        let code = highgui::wait_key(delay)?;
        Ok(Key::from_code(code))
    }
}

#[cfg(feature = "opencv")]
impl Drop for Window {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("failed to destroy window '{}': {}", self.title, e);
        }
    }
}
