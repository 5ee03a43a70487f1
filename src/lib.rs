//! Live camera view with Hough line and circle overlays.
//!
//! Each captured frame is passed through the detectors selected by the current [`Mode`], which
//! the user switches with the keyboard while the window has focus:
//!
//! * `n`: no detection
//! * `l`: lines
//! * `c`: circles
//! * `b`: lines and circles
//! * `Esc`: quit
//!
//! Edge detection, the Hough transforms, capture and display are provided by OpenCV (behind the
//! default `opencv` feature). The [`controller`] only decides which of them to call.
//!
//! # Environment Variables
//!
//! * `HOUGHCAM_WEBCAM_INDEX`: Selects the capture device for [`Webcam`]s opened without an
//!   explicit device index. Defaults to device 0.
//! * `RUST_LOG`: Overrides the log filter set up by [`init_logger!`].
//!
//! [`Mode`]: mode::Mode
//! [`Webcam`]: webcam::Webcam

use log::LevelFilter;

pub mod annotate;
pub mod controller;
pub mod detection;
pub mod draw;
pub mod gui;
pub mod mode;
pub mod termination;
pub mod timer;
pub mod vision;
pub mod webcam;


/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this library log at *debug*
/// level, otherwise at *info* level. `RUST_LOG` is applied on top.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
