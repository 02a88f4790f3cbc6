//! Chart generation models

/// A scatter point: tick index on x, limit price on y
pub type SeriesPoint = (usize, f64);

/// An ordered collection of plot points of one visual category
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(label: &'static str) -> Self {
        Series {
            label,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The two scatter series produced by one classification policy
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSeries {
    pub first: Series,
    pub second: Series,
}

/// Output figure size, expressed the way plotting scripts usually do
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub const fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Figure {
            width_in,
            height_in,
            dpi,
        }
    }

    /// Pixel dimensions of the bitmap
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Scale a size given in points (1/72 inch) to pixels
    pub fn scale(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}
