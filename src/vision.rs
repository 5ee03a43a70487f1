//! The image processing operations the annotator relies on.
//!
//! Edge detection, the Hough transforms and rasterization are provided by a vision library; this
//! module only describes the operations needed from it, so that frame annotation can be driven
//! by OpenCV in the application and by an in-memory backend in tests.

#[cfg(feature = "opencv")]
mod cv;

#[cfg(feature = "opencv")]
pub use self::cv::OpenCv;

use crate::detection::{Circle, CircleParams, EdgeParams, Line, LineParams, SegmentParams};
use crate::draw::Style;

/// A vision library backend.
///
/// `Frame` is the color image type captured from the camera and drawn onto; `Gray` is the single
/// channel image that detection operates on.
pub trait Vision {
    type Frame;
    type Gray;

    /// Converts a color frame to grayscale.
    fn to_gray(&mut self, frame: &Self::Frame) -> anyhow::Result<Self::Gray>;

    /// Applies a median filter with a `ksize x ksize` kernel.
    fn median_blur(&mut self, image: &Self::Gray, ksize: i32) -> anyhow::Result<Self::Gray>;

    /// Computes a binary edge map.
    fn detect_edges(
        &mut self,
        image: &Self::Gray,
        params: &EdgeParams,
    ) -> anyhow::Result<Self::Gray>;

    /// Runs the standard Hough line transform on an edge map.
    fn detect_lines(
        &mut self,
        edges: &Self::Gray,
        params: &LineParams,
    ) -> anyhow::Result<Vec<Line>>;

    /// Runs the probabilistic Hough line transform on an edge map.
    fn detect_segments(
        &mut self,
        edges: &Self::Gray,
        params: &SegmentParams,
    ) -> anyhow::Result<Vec<Line>>;

    /// Runs the Hough gradient circle detector on a (smoothed) grayscale image.
    fn detect_circles(
        &mut self,
        image: &Self::Gray,
        params: &CircleParams,
    ) -> anyhow::Result<Vec<Circle>>;

    fn draw_line(
        &mut self,
        frame: &mut Self::Frame,
        from: (i32, i32),
        to: (i32, i32),
        style: Style,
    ) -> anyhow::Result<()>;

    fn draw_circle(
        &mut self,
        frame: &mut Self::Frame,
        center: (i32, i32),
        radius: i32,
        style: Style,
    ) -> anyhow::Result<()>;
}
