#![forbid(unsafe_code)]

//! Progress coloring: hues, packed colors, and the color scheduler.
//!
//! Each drawing step is colored by its position in the whole drawing, not by
//! when it was drawn. The scheduler maps `index / total` onto a hue sweep, so
//! a drawing paced over many ticks colors exactly like one drawn in a single
//! call.
//!
//! # Mapping
//!
//! `progress = clamp(index / total, 0, 1)` excluding 1, then
//! `hue = start + (end - start) * progress`, normalized into `[0, 360)`.
//! A zero total maps every index to the start hue.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A compact RGBA color.
///
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// `#rrggbb`, alpha dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

/// A hue angle in degrees, always within `[0, 360)`.
///
/// Serialized as a bare number of degrees; deserialization wraps through
/// [`Hue::new`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Hue(f64);

impl From<f64> for Hue {
    fn from(degrees: f64) -> Self {
        Self::new(degrees)
    }
}

impl From<Hue> for f64 {
    fn from(hue: Hue) -> Self {
        hue.0
    }
}

impl Hue {
    pub const RED: Self = Self(0.0);

    /// Wraps any finite angle onto the hue circle. Non-finite input maps to 0.
    #[must_use]
    pub fn new(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::RED;
        }
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
        Self(if wrapped >= 360.0 { 0.0 } else { wrapped })
    }

    #[inline]
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// HSV to RGB. `saturation` and `value` are clamped to `[0, 1]`.
    #[must_use]
    pub fn to_rgba(self, saturation: f64, value: f64) -> PackedRgba {
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let c = v * s;
        let h = self.0 / 60.0;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let channel = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        PackedRgba::rgb(channel(r), channel(g), channel(b))
    }
}

/// The hue sweep covered from the first to the last drawing step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HueRange {
    /// Hue of the first step, in degrees.
    pub start: f64,
    /// Hue approached by the last step, in degrees. May be below `start` for
    /// a reversed sweep.
    pub end: f64,
}

impl Default for HueRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 360.0,
        }
    }
}

impl HueRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn at(&self, progress: f64) -> Hue {
        Hue::new(self.start + (self.end - self.start) * progress)
    }
}

/// Fraction of the drawing completed before step `index`, in `[0, 1)`.
#[must_use]
pub fn progress(index: u64, total: u128) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = index as f64 / total as f64;
    p.clamp(0.0, 1.0 - f64::EPSILON)
}

/// Hue for drawing step `index` of `total`, over the full hue circle.
#[must_use]
pub fn next_hue(index: u64, total: u128) -> Hue {
    HueRange::default().at(progress(index, total))
}

/// Assigns hues to drawing steps from a projected total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheduler {
    total: u128,
    range: HueRange,
}

impl ColorScheduler {
    #[must_use]
    pub fn new(total: u128) -> Self {
        Self {
            total,
            range: HueRange::default(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: HueRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub const fn total(&self) -> u128 {
        self.total
    }

    #[must_use]
    pub const fn range(&self) -> HueRange {
        self.range
    }

    #[must_use]
    pub fn hue_at(&self, index: u64) -> Hue {
        self.range.at(progress(index, self.total))
    }
}
