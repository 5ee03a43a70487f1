//! Detected shapes and the parameters of the detectors producing them.
//!
//! The numeric defaults in this module are tuned for a 640x480 camera feed. Note that the edge
//! detector's thresholds are passed as `(50, 200)`, which is reversed compared to the usual
//! `(low, high)` convention. Canny sorts them internally.

use std::f64::consts::PI;

/// Length (in pixels) of the segment drawn for a line given in polar form, in each direction from
/// the line's foot point.
const POLAR_LINE_HALF_LENGTH: f64 = 1000.0;

/// A straight line found by a Hough transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// An infinite line in Hesse normal form, as produced by the standard transform.
    ///
    /// `rho` is the distance from the image origin, `theta` the angle of the line's normal.
    Polar { rho: f32, theta: f32 },
    /// A finite segment, as produced by the probabilistic transform.
    Segment { x1: i32, y1: i32, x2: i32, y2: i32 },
}

impl Line {
    /// Returns the two end points used to draw this line.
    ///
    /// Segments are returned as-is. Polar lines are extended by 1000 pixels in each direction
    /// from the point closest to the origin, which is enough to cross any frame we capture.
    pub fn endpoints(&self) -> ((i32, i32), (i32, i32)) {
        match *self {
            Line::Polar { rho, theta } => {
                let (rho, theta) = (f64::from(rho), f64::from(theta));
                let (a, b) = (theta.cos(), theta.sin());
                let (x0, y0) = (a * rho, b * rho);
                let dx = POLAR_LINE_HALF_LENGTH * -b;
                let dy = POLAR_LINE_HALF_LENGTH * a;
                (
                    (round(x0 + dx), round(y0 + dy)),
                    (round(x0 - dx), round(y0 - dy)),
                )
            }
            Line::Segment { x1, y1, x2, y2 } => ((x1, y1), (x2, y2)),
        }
    }
}

/// Rounds to the nearest pixel, ties to even.
fn round(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// A circle found by the Hough gradient method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    /// Returns the center rounded to whole pixels.
    pub fn center(&self) -> (i32, i32) {
        (round(f64::from(self.x)), round(f64::from(self.y)))
    }

    /// Returns the radius rounded to whole pixels.
    pub fn pixel_radius(&self) -> i32 {
        round(f64::from(self.radius))
    }
}

/// Parameters of the Canny edge detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    pub threshold1: f64,
    pub threshold2: f64,
    pub aperture_size: i32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            threshold1: 50.0,
            threshold2: 200.0,
            aperture_size: 3,
        }
    }
}

/// Parameters of the standard Hough line transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    /// Distance resolution of the accumulator, in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator, in radians.
    pub theta: f64,
    /// Minimum number of votes for a line to be reported.
    pub threshold: i32,
    /// Multi-scale divisors; 0 selects the classical transform.
    pub srn: f64,
    pub stn: f64,
    pub min_theta: f64,
    pub max_theta: f64,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 150,
            srn: 0.0,
            stn: 0.0,
            min_theta: 0.0,
            max_theta: PI,
        }
    }
}

/// Parameters of the probabilistic Hough line transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentParams {
    pub rho: f64,
    pub theta: f64,
    pub threshold: i32,
    /// Segments shorter than this are discarded.
    pub min_line_length: f64,
    /// Maximum gap between points on the same segment.
    pub max_line_gap: f64,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 50,
            min_line_length: 50.0,
            max_line_gap: 10.0,
        }
    }
}

/// Parameters of the Hough gradient circle detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    /// Kernel size of the median blur applied before detection. Must be odd.
    pub blur_kernel_size: i32,
    /// Inverse ratio of accumulator resolution to image resolution.
    pub dp: f64,
    /// The minimum distance between detected centers is the image height divided by this.
    pub min_dist_divider: f64,
    /// Upper threshold passed to the internal edge detector.
    pub param1: f64,
    /// Accumulator threshold for circle centers.
    pub param2: f64,
    pub min_radius: i32,
    pub max_radius: i32,
}

impl CircleParams {
    /// Minimum distance between circle centers for a frame with `rows` rows.
    pub fn min_dist(&self, rows: i32) -> f64 {
        f64::from(rows) / self.min_dist_divider
    }
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            dp: 1.0,
            min_dist_divider: 1.0,
            param1: 100.0,
            param2: 30.0,
            min_radius: 30,
            max_radius: 100,
        }
    }
}

/// Which Hough line transform to run in line mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTransform {
    /// Standard transform yielding [`Line::Polar`] lines.
    #[default]
    Standard,
    /// Probabilistic transform yielding [`Line::Segment`]s.
    Probabilistic,
}

/// All parameters used when annotating a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoughParams {
    pub edges: EdgeParams,
    pub line_transform: LineTransform,
    pub lines: LineParams,
    pub segments: SegmentParams,
    pub circles: CircleParams,
}
