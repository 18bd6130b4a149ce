use lsys_core::{Grammar, Interpretation, SessionConfig, Symbol, project_total};

use crate::error::Result;

/// A named fractal: grammar parts plus the depth-dependent pieces needed to
/// draw it inside the unit square.
///
/// The turtle starts at the origin facing +x. Fractals that need another
/// starting pose prefix the axiom with a setup symbol (`0` or `_`) whose
/// command jumps and turns.
#[derive(Debug, Clone, Copy)]
pub struct FractalDef {
    /// Lookup key, e.g. `"koch"`.
    pub slug: &'static str,
    pub name: &'static str,
    pub axiom: &'static str,
    pub rules: &'static [(Symbol, &'static str)],
    /// Builds the symbol commands for a given depth.
    pub interpret: fn(u32) -> Interpretation,
    /// Largest dimension of the drawing at a given depth, in unit steps.
    pub size: fn(u32) -> f64,
    pub default_depth: u32,
}

impl FractalDef {
    /// Build and validate the grammar with the commands for `depth`.
    pub fn grammar(&self, depth: u32) -> Result<Grammar> {
        let mut builder = Grammar::builder(self.axiom).interpretation((self.interpret)(depth));
        for &(symbol, replacement) in self.rules {
            builder = builder.rule(symbol, replacement);
        }
        let grammar = builder.build()?;
        tracing::debug!(
            message = "catalog.grammar",
            slug = self.slug,
            depth,
            alphabet = grammar.alphabet().len(),
        );
        Ok(grammar)
    }

    /// Drawing steps at `depth`, projected without expanding.
    pub fn total_steps(&self, depth: u32) -> Result<u128> {
        Ok(project_total(&self.grammar(depth)?, depth)?)
    }

    /// Session parameters that fit the drawing in a `width`-sided square.
    #[must_use]
    pub fn session_config(&self, depth: u32, width: f64) -> SessionConfig {
        SessionConfig::default()
            .with_depth(depth)
            .with_width(width)
            .with_input_scale((self.size)(depth))
    }
}
