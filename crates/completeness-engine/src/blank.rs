//! Blank page detection on rendered pages
//!
//! A page counts as blank when nearly all of its pixels are near-white.
//! A small stamp or a short note is enough to keep a page.

use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};

/// Fraction of near-white pixels above which a page is blank
pub const DEFAULT_WHITE_FRACTION: f64 = 0.95;

/// Luminance (0-255) above which a pixel counts as near-white
pub const DEFAULT_LUMINANCE_CUTOFF: u8 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlankPageFilter {
    pub white_fraction_threshold: f64,
    pub luminance_cutoff: u8,
}

impl Default for BlankPageFilter {
    fn default() -> Self {
        Self {
            white_fraction_threshold: DEFAULT_WHITE_FRACTION,
            luminance_cutoff: DEFAULT_LUMINANCE_CUTOFF,
        }
    }
}

impl BlankPageFilter {
    pub fn new(white_fraction_threshold: f64, luminance_cutoff: u8) -> Self {
        Self {
            white_fraction_threshold,
            luminance_cutoff,
        }
    }

    /// Share of pixels brighter than the luminance cutoff
    pub fn white_fraction(&self, page: &GrayImage) -> f64 {
        let total = page.as_raw().len();
        if total == 0 {
            return 1.0;
        }
        let white = page
            .as_raw()
            .iter()
            .filter(|&&luma| luma > self.luminance_cutoff)
            .count();
        white as f64 / total as f64
    }

    pub fn is_blank_gray(&self, page: &GrayImage) -> bool {
        self.white_fraction(page) > self.white_fraction_threshold
    }

    /// Decide whether a rendered page carries no content
    pub fn is_blank(&self, page: &DynamicImage) -> bool {
        match page.as_luma8() {
            Some(gray) => self.is_blank_gray(gray),
            None => self.is_blank_gray(&page.to_luma8()),
        }
    }
}

/// [`BlankPageFilter::is_blank`] with a custom white fraction
pub fn is_blank(page: &DynamicImage, white_fraction_threshold: f64) -> bool {
    BlankPageFilter {
        white_fraction_threshold,
        ..BlankPageFilter::default()
    }
    .is_blank(page)
}
