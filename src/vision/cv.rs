//! OpenCV backend.

use anyhow::Context;
use opencv::{
    core::{Mat, Point, Scalar, Vec2f, Vec3f, Vec4i, Vector},
    imgproc,
    prelude::*,
};

use crate::detection::{Circle, CircleParams, EdgeParams, Line, LineParams, SegmentParams};
use crate::draw::Style;

use super::Vision;

/// [`Vision`] implementation operating on 8-bit BGR [`Mat`]s.
#[derive(Debug, Default)]
pub struct OpenCv {
    _priv: (),
}

impl OpenCv {
    pub fn new() -> Self {
        Self::default()
    }
}

fn scalar(style: &Style) -> Scalar {
    let [b, g, r] = style.color().to_bgr();
    Scalar::new(f64::from(b), f64::from(g), f64::from(r), 0.0)
}

fn line_type(style: &Style) -> i32 {
    if style.is_antialiased() {
        imgproc::LINE_AA
    } else {
        imgproc::LINE_8
    }
}

impl Vision for OpenCv {
    type Frame = Mat;
    type Gray = Mat;

    fn to_gray(&mut self, frame: &Mat) -> anyhow::Result<Mat> {
        let mut gray = Mat::default();
        imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)
            .context("grayscale conversion failed")?;
        Ok(gray)
    }

    fn median_blur(&mut self, image: &Mat, ksize: i32) -> anyhow::Result<Mat> {
        let mut blurred = Mat::default();
        imgproc::median_blur(image, &mut blurred, ksize).context("median blur failed")?;
        Ok(blurred)
    }

    fn detect_edges(&mut self, image: &Mat, params: &EdgeParams) -> anyhow::Result<Mat> {
        let mut edges = Mat::default();
        imgproc::canny(
            image,
            &mut edges,
            params.threshold1,
            params.threshold2,
            params.aperture_size,
            false,
        )
        .context("edge detection failed")?;
        Ok(edges)
    }

    fn detect_lines(&mut self, edges: &Mat, params: &LineParams) -> anyhow::Result<Vec<Line>> {
        let mut lines = Vector::<Vec2f>::new();
        imgproc::hough_lines(
            edges,
            &mut lines,
            params.rho,
            params.theta,
            params.threshold,
            params.srn,
            params.stn,
            params.min_theta,
            params.max_theta,
        )
        .context("Hough line transform failed")?;

        Ok(lines
            .iter()
            .map(|l| Line::Polar {
                rho: l[0],
                theta: l[1],
            })
            .collect())
    }

    fn detect_segments(
        &mut self,
        edges: &Mat,
        params: &SegmentParams,
    ) -> anyhow::Result<Vec<Line>> {
        let mut segments = Vector::<Vec4i>::new();
        imgproc::hough_lines_p(
            edges,
            &mut segments,
            params.rho,
            params.theta,
            params.threshold,
            params.min_line_length,
            params.max_line_gap,
        )
        .context("probabilistic Hough line transform failed")?;

        Ok(segments
            .iter()
            .map(|s| Line::Segment {
                x1: s[0],
                y1: s[1],
                x2: s[2],
                y2: s[3],
            })
            .collect())
    }

    fn detect_circles(
        &mut self,
        image: &Mat,
        params: &CircleParams,
    ) -> anyhow::Result<Vec<Circle>> {
        let mut circles = Vector::<Vec3f>::new();
        imgproc::hough_circles(
            image,
            &mut circles,
            imgproc::HOUGH_GRADIENT,
            params.dp,
            params.min_dist(image.rows()),
            params.param1,
            params.param2,
            params.min_radius,
            params.max_radius,
        )
        .context("Hough circle detection failed")?;

        Ok(circles
            .iter()
            .map(|c| Circle {
                x: c[0],
                y: c[1],
                radius: c[2],
            })
            .collect())
    }

    fn draw_line(
        &mut self,
        frame: &mut Mat,
        from: (i32, i32),
        to: (i32, i32),
        style: Style,
    ) -> anyhow::Result<()> {
        imgproc::line(
            frame,
            Point::new(from.0, from.1),
            Point::new(to.0, to.1),
            scalar(&style),
            style.width() as i32,
            line_type(&style),
            0,
        )?;
        Ok(())
    }

    fn draw_circle(
        &mut self,
        frame: &mut Mat,
        center: (i32, i32),
        radius: i32,
        style: Style,
    ) -> anyhow::Result<()> {
        imgproc::circle(
            frame,
            Point::new(center.0, center.1),
            radius,
            scalar(&style),
            style.width() as i32,
            line_type(&style),
            0,
        )?;
        Ok(())
    }
}
