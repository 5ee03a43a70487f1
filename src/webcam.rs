//! Camera access.
//!
//! Frames are captured through OpenCV's `VideoCapture`, which picks a suitable backend for the
//! platform (V4L2 on Linux).

use std::{env, fmt};

#[cfg(feature = "opencv")]
use anyhow::Context;
#[cfg(feature = "opencv")]
use opencv::{core::Mat, prelude::*, videoio};

use crate::timer::Timer;

/// A source of camera frames.
pub trait FrameSource {
    type Frame;

    /// Blocks until the next frame is available.
    ///
    /// Returns `Ok(None)` if the source delivered no usable frame this time but might deliver one
    /// on the next call. Errors are not recoverable.
    fn next_frame(&mut self) -> anyhow::Result<Option<Self::Frame>>;

    /// Returns profiling timers for frame acquisition.
    fn timers(&self) -> Vec<&Timer> {
        Vec::new()
    }
}

/// Resolution (`width x height`) of a camera frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// VGA resolution: `640x480`
    pub const RES_VGA: Self = Self::new(640, 480);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Environment variable overriding the capture device index.
pub const ENV_VAR_WEBCAM_INDEX: &str = "HOUGHCAM_WEBCAM_INDEX";

/// Capture options.
#[derive(Debug, Clone, Default)]
pub struct WebcamOptions {
    index: Option<i32>,
    resolution: Option<Resolution>,
}

impl WebcamOptions {
    /// Sets the index of the capture device to open.
    ///
    /// If unset, [`ENV_VAR_WEBCAM_INDEX`] is consulted, and device 0 is used if that isn't set
    /// either.
    #[inline]
    pub fn index(mut self, index: i32) -> Self {
        self.index = Some(index);
        self
    }

    /// Requests a frame resolution.
    ///
    /// The device may not honor the request; frames are delivered at whatever size it picks.
    #[inline]
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Resolves the device index to open.
    #[cfg_attr(not(feature = "opencv"), allow(dead_code))]
    fn device_index(&self) -> anyhow::Result<i32> {
        if let Some(index) = self.index {
            return Ok(index);
        }
        match env::var(ENV_VAR_WEBCAM_INDEX) {
            Ok(value) => {
                log::debug!(
                    "webcam override: `{}` is set to '{}'",
                    ENV_VAR_WEBCAM_INDEX,
                    value,
                );
                parse_index(&value)
            }
            Err(_) => Ok(0),
        }
    }
}

#[cfg_attr(not(feature = "opencv"), allow(dead_code))]
fn parse_index(value: &str) -> anyhow::Result<i32> {
    value.trim().parse::<i32>().map_err(|e| {
        anyhow::anyhow!("invalid value '{value}' for `{ENV_VAR_WEBCAM_INDEX}`: {e}")
    })
}

/// Returned by [`Webcam::open`] when the capture device can't be opened.
#[derive(Debug)]
pub struct DeviceUnavailable {
    pub index: i32,
}

impl fmt::Display for DeviceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not open capture device {}", self.index)
    }
}

impl std::error::Error for DeviceUnavailable {}

/// A webcam yielding BGR [`Mat`] frames.
///
/// The device is released when the [`Webcam`] is dropped.
#[cfg(feature = "opencv")]
pub struct Webcam {
    capture: videoio::VideoCapture,
    index: i32,
    t_read: Timer,
}

#[cfg(feature = "opencv")]
impl Webcam {
    /// Opens the capture device selected by `options`.
    ///
    /// If the device doesn't exist or can't be opened, the returned error wraps a
    /// [`DeviceUnavailable`].
    pub fn open(options: WebcamOptions) -> anyhow::Result<Self> {
        let index = options.device_index()?;
        let mut capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| anyhow::Error::new(DeviceUnavailable { index }).context(e))?;
        if !capture.is_opened()? {
            return Err(DeviceUnavailable { index }.into());
        }

        if let Some(res) = options.resolution {
            capture
                .set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(res.width()))
                .context("failed to set frame width")?;
            capture
                .set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(res.height()))
                .context("failed to set frame height")?;
        }

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)?;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?;
        let backend = capture
            .get_backend_name()
            .unwrap_or_else(|_| String::from("unknown"));
        log::info!("opened capture device {index} ({backend}), {width}x{height}");

        Ok(Self {
            capture,
            index,
            t_read: Timer::new("capture"),
        })
    }

    /// Reads the next frame from the camera.
    ///
    /// Returns `Ok(None)` if the device delivered an empty frame.
    pub fn read(&mut self) -> anyhow::Result<Option<Mat>> {
        let mut frame = Mat::default();
        let ok = self
            .t_read
            .time(|| self.capture.read(&mut frame))
            .context("failed to read frame")?;
        if !ok || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

#[cfg(feature = "opencv")]
impl FrameSource for Webcam {
    type Frame = Mat;

    fn next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
        self.read()
    }

    fn timers(&self) -> Vec<&Timer> {
        vec![&self.t_read]
    }
}

#[cfg(feature = "opencv")]
impl Drop for Webcam {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("failed to release capture device {}: {}", self.index, e);
        }
    }
}
