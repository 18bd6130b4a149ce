#![forbid(unsafe_code)]

//! Core: lazy L-system expansion, step projection, turtle interpretation, and
//! progress coloring.
//!
//! # Pipeline
//!
//! A [`Grammar`] is expanded lazily by [`expand`]; each emitted symbol is run
//! through the turtle with [`interpret`]. Before drawing starts,
//! [`project_total`] counts the drawing steps by matrix exponentiation so the
//! [`ColorScheduler`] can color every step by its final position. A
//! [`Session`] wires these together and draws in bounded batches.
//!
//! ```
//! use lsys_core::{Action, Grammar, Session, SessionConfig, Segment};
//!
//! let koch = Grammar::builder("F--F--F")
//!     .rule('F', "F+F--F+F")
//!     .interpret('F', [Action::Draw(1.0)])
//!     .interpret('+', [Action::Turn(-60.0)])
//!     .interpret('-', [Action::Turn(60.0)])
//!     .build()?;
//!
//! let mut session = Session::new(&koch, SessionConfig::default().with_depth(2))?;
//! let mut segments: Vec<Segment> = Vec::new();
//! while !session.step(16, &mut segments)?.exhausted {}
//! assert_eq!(segments.len(), 48);
//! # Ok::<(), lsys_core::LsysError>(())
//! ```

pub mod color;
pub mod error;
pub mod expander;
pub mod grammar;
pub mod matrix;
pub mod projector;
pub mod session;
pub mod sink;
pub mod turtle;

pub use color::{ColorScheduler, Hue, HueRange, PackedRgba, next_hue, progress};
pub use error::{LsysError, Result};
pub use expander::{Expansion, Substitute, expand, substitute};
pub use grammar::{Action, Command, Grammar, GrammarBuilder, Interpretation, Symbol};
pub use matrix::Matrix;
pub use projector::{Projection, project_length, project_prefix, project_total};
pub use session::{Session, SessionConfig, SessionState, StepOutcome};
pub use sink::{FnSink, NullSink, RenderSink};
pub use turtle::{Point, Segment, Turtle, interpret};
