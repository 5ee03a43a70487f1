//! Colors and stroke styles used for overlays.

use std::fmt;

/// An 8-bit RGB color.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct Color([u8; 3]);

impl Color {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);
    pub const RED: Self = Self([255, 0, 0]);
    pub const GREEN: Self = Self([0, 255, 0]);
    pub const ORANGE: Self = Self([255, 75, 0]);

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    /// Returns the channels in blue, green, red order, as stored in camera frames.
    #[inline]
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b(), self.g(), self.r()]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

/// How a line or circle outline is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: Color,
    stroke_width: u32,
    antialiased: bool,
}

impl Style {
    /// Creates a 1 pixel wide, aliased stroke of the given color.
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: 1,
            antialiased: false,
        }
    }

    /// Sets the stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub const fn stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Enables anti-aliasing.
    pub const fn antialiased(mut self) -> Self {
        self.antialiased = true;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.stroke_width
    }

    pub fn is_antialiased(&self) -> bool {
        self.antialiased
    }
}

/// Stroke width shared by all overlays.
pub const OVERLAY_STROKE_WIDTH: u32 = 3;

/// Style of detected lines.
pub const LINE_STYLE: Style = Style::new(Color::ORANGE)
    .stroke_width(OVERLAY_STROKE_WIDTH)
    .antialiased();

/// Style of the dot marking a detected circle's center.
pub const CIRCLE_CENTER_STYLE: Style = Style::new(Color::RED)
    .stroke_width(OVERLAY_STROKE_WIDTH)
    .antialiased();

/// Radius of the dot marking a detected circle's center.
pub const CIRCLE_CENTER_RADIUS: u32 = 1;

/// Style of a detected circle's outline.
pub const CIRCLE_OUTLINE_STYLE: Style = Style::new(Color::GREEN)
    .stroke_width(OVERLAY_STROKE_WIDTH)
    .antialiased();
