#![forbid(unsafe_code)]

//! Catalog: named L-system fractals ready to draw.
//!
//! ```
//! use lsys_catalog::Registry;
//! use lsys_core::{Session, Segment};
//!
//! let koch = Registry::builtin().get("koch")?;
//! let grammar = koch.grammar(3)?;
//! let mut session = Session::new(&grammar, koch.session_config(3, 512.0))?;
//! let mut segments: Vec<Segment> = Vec::new();
//! session.finish(&mut segments)?;
//! assert_eq!(segments.len(), 3 * 4usize.pow(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builtin;
pub mod error;
pub mod fractal;
pub mod registry;

pub use error::{CatalogError, Result};
pub use fractal::FractalDef;
pub use registry::Registry;
