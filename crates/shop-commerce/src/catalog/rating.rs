//! Star rating breakdown.

use std::fmt;

/// Highest rating a product can carry.
pub const MAX_STARS: u8 = 5;

/// Full, half and empty star counts for a 0–5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Break a rating into stars.
    ///
    /// Any fractional part renders as one half star. Out-of-range and NaN
    /// ratings are clamped to 0–5.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, MAX_STARS as f64)
        };
        let full = rating.floor() as u8;
        let half = rating.fract() != 0.0;
        let empty = MAX_STARS - rating.ceil() as u8;
        Self { full, half, empty }
    }

    /// Render as a string of star glyphs.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(MAX_STARS as usize * 3);
        out.extend(std::iter::repeat('★').take(self.full as usize));
        if self.half {
            out.push('⯨');
        }
        out.extend(std::iter::repeat('☆').take(self.empty as usize));
        out
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
