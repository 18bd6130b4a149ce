#![forbid(unsafe_code)]

//! Turtle interpretation of terminal symbols.
//!
//! The turtle works in unit-square coordinates: `Draw(1.0)` advances by
//! `1 / input_scale`, so a fractal whose largest dimension is `input_scale`
//! unit steps fits the square. Emitted segments are multiplied by
//! `output_scale` (the sink's width).
//!
//! Headings are degrees in the public API and radians internally, normalized
//! into `[0, 2π)` after every change. Angles grow counter-clockwise.

use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Hue;
use crate::error::{LsysError, Result};
use crate::grammar::{Action, Interpretation, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A visible line produced by one drawing step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub hue: Hue,
    /// Zero-based drawing step that produced this segment.
    pub index: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    position: Point,
    heading: f64,
    pen_down: bool,
}

/// Position, heading and pen state, plus the saved-state stack.
#[derive(Debug, Clone)]
pub struct Turtle {
    position: Point,
    /// Radians in `[0, 2π)`.
    heading: f64,
    pen_down: bool,
    stack: Vec<Snapshot>,
    hue: Hue,
    /// Drawing steps taken, with the pen up or down.
    steps: u64,
    input_scale: f64,
    output_scale: f64,
    origin: Snapshot,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    /// At the origin, facing +x, pen down, unit scales.
    #[must_use]
    pub fn new() -> Self {
        let origin = Snapshot {
            position: Point::default(),
            heading: 0.0,
            pen_down: true,
        };
        Self {
            position: origin.position,
            heading: origin.heading,
            pen_down: origin.pen_down,
            stack: Vec::new(),
            hue: Hue::default(),
            steps: 0,
            input_scale: 1.0,
            output_scale: 1.0,
            origin,
        }
    }

    /// Start at `(x, y)` in unit coordinates. Also the position [`reset`](Self::reset) returns to.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self.origin.position = self.position;
        self
    }

    /// Start facing `degrees`.
    #[must_use]
    pub fn facing(mut self, degrees: f64) -> Self {
        self.heading = normalize(degrees.to_radians());
        self.origin.heading = self.heading;
        self
    }

    /// `input_scale`: unit steps across the unit square. `output_scale`:
    /// multiplier applied to emitted coordinates. Non-positive or non-finite
    /// values fall back to 1.
    #[must_use]
    pub fn with_scale(mut self, input_scale: f64, output_scale: f64) -> Self {
        self.input_scale = sanitize_scale(input_scale);
        self.output_scale = sanitize_scale(output_scale);
        self
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn heading_degrees(&self) -> f64 {
        let degrees = self.heading.to_degrees();
        if degrees >= 360.0 { 0.0 } else { degrees }
    }

    #[must_use]
    pub const fn heading_radians(&self) -> f64 {
        self.heading
    }

    #[must_use]
    pub const fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    #[must_use]
    pub const fn hue(&self) -> Hue {
        self.hue
    }

    pub fn set_hue(&mut self, hue: Hue) {
        self.hue = hue;
    }

    /// Drawing steps taken so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Back to the starting state; scales are kept.
    pub fn reset(&mut self) {
        self.position = self.origin.position;
        self.heading = self.origin.heading;
        self.pen_down = self.origin.pen_down;
        self.stack.clear();
        self.hue = Hue::default();
        self.steps = 0;
    }

    /// Execute one action. Returns the segment drawn, if any.
    pub fn apply(&mut self, action: &Action) -> Result<Option<Segment>> {
        match *action {
            Action::Draw(distance) => {
                let start = self.position;
                self.advance(distance);
                let index = self.steps;
                self.steps += 1;
                if !self.pen_down {
                    return Ok(None);
                }
                return Ok(Some(Segment {
                    start: start.scale(self.output_scale),
                    end: self.position.scale(self.output_scale),
                    hue: self.hue,
                    index,
                }));
            }
            Action::Move(distance) => self.advance(distance),
            Action::Turn(degrees) => {
                self.heading = normalize(self.heading + degrees.to_radians());
            }
            Action::Push => self.stack.push(Snapshot {
                position: self.position,
                heading: self.heading,
                pen_down: self.pen_down,
            }),
            Action::Pop => {
                let saved = self
                    .stack
                    .pop()
                    .ok_or(LsysError::UnbalancedPop { step: self.steps })?;
                self.position = saved.position;
                self.heading = saved.heading;
                self.pen_down = saved.pen_down;
            }
            Action::SetHue(hue) => self.hue = hue,
            Action::Jump { x, y } => self.position = Point::new(x, y),
            Action::SetHeading(degrees) => self.heading = normalize(degrees.to_radians()),
            Action::PenUp => self.pen_down = false,
            Action::PenDown => self.pen_down = true,
            Action::NoOp => {}
        }
        Ok(None)
    }

    fn advance(&mut self, distance: f64) {
        let step = distance / self.input_scale;
        self.position = Point::new(
            self.position.x + step * self.heading.cos(),
            self.position.y + step * self.heading.sin(),
        );
    }
}

/// Run the command for `symbol` on `turtle`.
///
/// Grammar construction guarantees at most one drawing action per command, so
/// at most one segment is produced.
pub fn interpret(
    turtle: &mut Turtle,
    symbol: Symbol,
    interpretation: &Interpretation,
) -> Result<Option<Segment>> {
    let actions = interpretation
        .get(symbol)
        .ok_or(LsysError::UnknownSymbol { symbol })?;
    let mut drawn = None;
    for action in actions {
        if let Some(segment) = turtle.apply(action)? {
            drawn = Some(segment);
        }
    }
    Ok(drawn)
}

fn normalize(radians: f64) -> f64 {
    let r = radians.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
