#![forbid(unsafe_code)]

//! Paced rendering sessions.
//!
//! A [`Session`] ties one grammar and depth to an expansion, a turtle and a
//! color scheduler. The host calls [`Session::step`] with a budget of drawing
//! steps per tick; the session pulls symbols until the budget is spent or the
//! expansion runs out, handing segments to a [`RenderSink`]. Every call ends
//! by looking one symbol ahead, so [`StepOutcome::exhausted`] is reported on
//! the call that consumes the last symbol, and a zero budget still detects
//! an empty expansion.
//!
//! Coloring depends only on the drawing-step index and the projected total,
//! so the same segments come out whatever budgets the host uses.
//!
//! # Failure
//!
//! An interpretation error (for example a pop on an empty stack) fails the
//! session permanently: the error is returned once, and every later call
//! returns [`LsysError::SessionFailed`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::color::{ColorScheduler, HueRange, progress};
use crate::error::{LsysError, Result};
use crate::expander::{Expansion, expand};
use crate::grammar::{Grammar, Symbol};
use crate::projector::Projection;
use crate::sink::RenderSink;
use crate::turtle::{Turtle, interpret};

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Rewrite iterations (default: 4).
    pub depth: u32,
    /// Output coordinate multiplier (default: 1.0).
    pub width: f64,
    /// Unit drawing steps spanning the output square (default: 1.0).
    pub input_scale: f64,
    /// Hue sweep from first to last step (default: full circle).
    pub hue_range: HueRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            width: 1.0,
            input_scale: 1.0,
            hue_range: HueRange::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_input_scale(mut self, input_scale: f64) -> Self {
        self.input_scale = input_scale;
        self
    }

    #[must_use]
    pub fn with_hue_range(mut self, hue_range: HueRange) -> Self {
        self.hue_range = hue_range;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exhausted,
    Failed,
}

/// What one call to [`Session::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Drawing steps taken (pen up or down).
    pub steps: u64,
    /// Segments handed to the sink.
    pub segments: u64,
    /// The expansion has no more symbols.
    pub exhausted: bool,
}

/// One fractal being drawn incrementally.
#[derive(Debug)]
pub struct Session<'g> {
    grammar: &'g Grammar,
    config: SessionConfig,
    projection: Projection,
    expansion: Expansion<'g>,
    /// Symbol pulled by the look-ahead but not yet interpreted.
    lookahead: Option<Symbol>,
    turtle: Turtle,
    scheduler: ColorScheduler,
    state: SessionState,
}

impl<'g> Session<'g> {
    /// Project, then set up a fresh expansion and turtle.
    pub fn new(grammar: &'g Grammar, config: SessionConfig) -> Result<Self> {
        let projection = Projection::new(grammar, config.depth)?;
        let scheduler = ColorScheduler::new(projection.total()).with_range(config.hue_range);
        let turtle = Turtle::new().with_scale(config.input_scale, config.width);
        tracing::debug!(
            message = "lsys.session.new",
            depth = config.depth,
            total = %projection.total(),
        );
        Ok(Self {
            grammar,
            expansion: expand(grammar, config.depth),
            lookahead: None,
            config,
            projection,
            turtle,
            scheduler,
            state: SessionState::Running,
        })
    }

    /// Take up to `budget` drawing steps, sending visible segments to `sink`.
    pub fn step<S: RenderSink + ?Sized>(&mut self, budget: u64, sink: &mut S) -> Result<StepOutcome> {
        match self.state {
            SessionState::Failed => return Err(LsysError::SessionFailed),
            SessionState::Exhausted => {
                return Ok(StepOutcome {
                    exhausted: true,
                    ..StepOutcome::default()
                });
            }
            SessionState::Running => {}
        }

        let started = Instant::now();
        let span = tracing::debug_span!(
            "lsys.session.step",
            budget,
            steps = tracing::field::Empty,
            step_duration_us = tracing::field::Empty
        );
        let _guard = span.enter();

        let mut outcome = StepOutcome::default();
        while outcome.steps < budget {
            let Some(symbol) = self.lookahead.take().or_else(|| self.expansion.next()) else {
                break;
            };
            let draws = self.grammar.draws(symbol);
            if draws {
                self.turtle
                    .set_hue(self.scheduler.hue_at(self.turtle.steps()));
            }
            match interpret(&mut self.turtle, symbol, self.grammar.interpretation()) {
                Ok(segment) => {
                    if draws {
                        outcome.steps += 1;
                    }
                    if let Some(segment) = segment {
                        sink.segment(&segment);
                        outcome.segments += 1;
                    }
                }
                Err(err) => {
                    self.state = SessionState::Failed;
                    tracing::warn!(
                        error = %err,
                        symbol = %symbol,
                        steps = self.turtle.steps(),
                        "lsys.session.failed"
                    );
                    return Err(err);
                }
            }
        }

        if self.peek().is_none() {
            self.state = SessionState::Exhausted;
            outcome.exhausted = true;
            tracing::debug!(
                message = "lsys.session.exhausted",
                steps = self.turtle.steps(),
                symbols = self.expansion.emitted(),
            );
        }

        span.record("steps", outcome.steps);
        span.record(
            "step_duration_us",
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        );
        Ok(outcome)
    }

    fn peek(&mut self) -> Option<Symbol> {
        if self.lookahead.is_none() {
            self.lookahead = self.expansion.next();
        }
        self.lookahead
    }

    /// Draw everything that is left.
    pub fn finish<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<StepOutcome> {
        self.step(u64::MAX, sink)
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Exhausted
    }

    /// Projected drawing steps for the whole fractal.
    #[must_use]
    pub fn total_steps(&self) -> u128 {
        self.projection.total()
    }

    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.turtle.steps()
    }

    /// Fraction of drawing steps taken, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.is_exhausted() {
            1.0
        } else {
            progress(self.turtle.steps(), self.projection.total())
        }
    }

    #[must_use]
    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}
