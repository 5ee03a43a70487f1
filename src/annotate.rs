//! Drawing detected lines and circles onto camera frames.

use crate::detection::{HoughParams, LineTransform};
use crate::draw::{CIRCLE_CENTER_RADIUS, CIRCLE_CENTER_STYLE, CIRCLE_OUTLINE_STYLE, LINE_STYLE};
use crate::mode::Mode;
use crate::timer::Timer;
use crate::vision::Vision;

/// Runs the detectors selected by a [`Mode`] and overlays their results.
pub struct Annotator<V: Vision> {
    vision: V,
    params: HoughParams,
    t_lines: Timer,
    t_circles: Timer,
}

impl<V: Vision> Annotator<V> {
    /// Creates an annotator using the default detection parameters.
    pub fn new(vision: V) -> Self {
        Self::with_params(vision, HoughParams::default())
    }

    pub fn with_params(vision: V, params: HoughParams) -> Self {
        Self {
            vision,
            params,
            t_lines: Timer::new("lines"),
            t_circles: Timer::new("circles"),
        }
    }

    pub fn vision(&self) -> &V {
        &self.vision
    }

    /// Annotates `frame` in place according to `mode`.
    ///
    /// In [`Mode::Both`], lines are drawn before circles, and circle detection sees the frame with
    /// the lines already drawn.
    pub fn annotate(&mut self, frame: &mut V::Frame, mode: Mode) -> anyhow::Result<()> {
        match mode {
            Mode::None => Ok(()),
            Mode::Line => self.draw_lines(frame),
            Mode::Circle => self.draw_circles(frame),
            Mode::Both => {
                self.draw_lines(frame)?;
                self.draw_circles(frame)
            }
        }
    }

    /// Detects straight lines and draws them onto `frame`.
    pub fn draw_lines(&mut self, frame: &mut V::Frame) -> anyhow::Result<()> {
        let _guard = self.t_lines.start();
        let vision = &mut self.vision;

        let gray = vision.to_gray(frame)?;
        let edges = vision.detect_edges(&gray, &self.params.edges)?;
        let lines = match self.params.line_transform {
            LineTransform::Standard => vision.detect_lines(&edges, &self.params.lines)?,
            LineTransform::Probabilistic => {
                vision.detect_segments(&edges, &self.params.segments)?
            }
        };
        log::trace!("{} lines", lines.len());

        for line in &lines {
            let (from, to) = line.endpoints();
            vision.draw_line(frame, from, to, LINE_STYLE)?;
        }
        Ok(())
    }

    /// Detects circles and draws their centers and outlines onto `frame`.
    pub fn draw_circles(&mut self, frame: &mut V::Frame) -> anyhow::Result<()> {
        let _guard = self.t_circles.start();
        let vision = &mut self.vision;
        let params = &self.params.circles;

        let gray = vision.to_gray(frame)?;
        let gray = vision.median_blur(&gray, params.blur_kernel_size)?;
        let circles = vision.detect_circles(&gray, params)?;
        log::trace!("{} circles", circles.len());

        for circle in &circles {
            let center = circle.center();
            vision.draw_circle(
                frame,
                center,
                CIRCLE_CENTER_RADIUS as i32,
                CIRCLE_CENTER_STYLE,
            )?;
            vision.draw_circle(frame, center, circle.pixel_radius(), CIRCLE_OUTLINE_STYLE)?;
        }
        Ok(())
    }

    /// Returns profiling timers for line and circle annotation.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_lines, &self.t_circles].into_iter()
    }
}
