#![forbid(unsafe_code)]

//! Symbol-count projection.
//!
//! Counts how many drawing steps a grammar takes at a given depth without
//! expanding it. The grammar's alphabet indexes a transition matrix `M` where
//! `M[i][j]` is the number of times symbol `j` appears in the one-step
//! replacement of symbol `i` (terminals rewrite to themselves). After `d`
//! rewrites the multiplicities are `v0 · M^d`, with `v0` the axiom's symbol
//! counts.
//!
//! `M^d` is computed by repeated squaring, so a projection costs
//! O(n³ log d) for an alphabet of `n` symbols regardless of how long the
//! expansion is.
//!
//! # Weights
//!
//! A symbol counts as one step if its command contains a drawing action and
//! zero otherwise. The per-symbol yield column `Y = M^d · w` gives the steps
//! produced by expanding a single symbol, which is what prefix sums over the
//! axiom are built from.

use crate::error::{LsysError, Result};
use crate::grammar::{Grammar, Symbol};
use crate::matrix::Matrix;

/// One-step transition matrix over `grammar.alphabet()`.
#[must_use]
pub fn transition_matrix(grammar: &Grammar) -> Matrix {
    let n = grammar.alphabet().len();
    let mut m = Matrix::zeros(n, n);
    for (i, &symbol) in grammar.alphabet().iter().enumerate() {
        match grammar.rule(symbol) {
            Some(body) => {
                for &produced in body {
                    // Bodies only contain alphabet symbols: the alphabet is
                    // closed under the rules by construction.
                    if let Some(j) = grammar.symbol_index(produced) {
                        m.set(i, j, m.get(i, j) + 1);
                    }
                }
            }
            None => m.set(i, i, 1),
        }
    }
    m
}

/// Axiom symbol counts as a `1 × n` row vector.
#[must_use]
pub fn initial_vector(grammar: &Grammar) -> Matrix {
    let mut v = Matrix::zeros(1, grammar.alphabet().len());
    for &symbol in grammar.axiom() {
        if let Some(j) = grammar.symbol_index(symbol) {
            v.set(0, j, v.get(0, j) + 1);
        }
    }
    v
}

/// Step counts for one grammar at one depth.
#[derive(Debug, Clone)]
pub struct Projection {
    depth: u32,
    /// Multiplicity of each alphabet symbol in the full expansion.
    counts: Vec<u128>,
    /// Steps produced by expanding one alphabet symbol `depth` times.
    yields: Vec<u128>,
    /// `prefix[k]`: steps produced by the first `k` axiom symbols.
    prefix: Vec<u128>,
}

impl Projection {
    /// Project `grammar` at `depth`.
    ///
    /// Fails with [`LsysError::Unresolved`] if a non-terminal without an
    /// interpretation survives unexpanded at this depth, and with
    /// [`LsysError::ProjectionOverflow`] if the total step count does not fit
    /// in `u128`. Counts of other symbols may be out of range without failing
    /// the projection; their accessors return `None`.
    pub fn new(grammar: &Grammar, depth: u32) -> Result<Self> {
        // Saturated entries equal u128::MAX; every smaller entry is exact.
        let power = transition_matrix(grammar).saturating_pow(depth);
        let counts = initial_vector(grammar)
            .saturating_mul(&power)
            .row(0)
            .to_vec();

        let alphabet = grammar.alphabet();
        for (&symbol, &count) in alphabet.iter().zip(&counts) {
            if count > 0 && !grammar.interpretation().contains(symbol) {
                return Err(LsysError::Unresolved { symbol, depth });
            }
        }

        let weights = Matrix::from_rows(
            alphabet
                .iter()
                .map(|&s| vec![u128::from(grammar.draws(s))])
                .collect(),
        );
        let column = power.saturating_mul(&weights);
        let yields: Vec<u128> = (0..column.rows()).map(|i| column.get(i, 0)).collect();

        let mut prefix = Vec::with_capacity(grammar.axiom().len() + 1);
        let mut running: u128 = 0;
        prefix.push(running);
        for &symbol in grammar.axiom() {
            let y = grammar.symbol_index(symbol).map_or(0, |i| yields[i]);
            running = running.saturating_add(y);
            if running == u128::MAX {
                return Err(LsysError::ProjectionOverflow { depth });
            }
            prefix.push(running);
        }

        tracing::debug!(
            message = "lsys.projection",
            depth,
            alphabet = alphabet.len(),
            total = %running,
        );

        Ok(Self {
            depth,
            counts,
            yields,
            prefix,
        })
    }

    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Total drawing steps at this depth.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.prefix.last().copied().unwrap_or(0)
    }

    /// Drawing steps produced by the first `k` axiom symbols. `k` is clamped
    /// to the axiom length.
    #[must_use]
    pub fn prefix(&self, k: usize) -> u128 {
        self.prefix[k.min(self.prefix.len() - 1)]
    }

    /// Drawing steps produced by expanding a single `symbol` at this depth.
    /// `None` if the count does not fit in `u128`.
    #[must_use]
    pub fn symbol_yield(&self, grammar: &Grammar, symbol: Symbol) -> Option<u128> {
        exact(grammar.symbol_index(symbol).map_or(0, |i| self.yields[i]))
    }

    /// Occurrences of `symbol` in the full expansion. `None` if the count
    /// does not fit in `u128`.
    #[must_use]
    pub fn symbol_count(&self, grammar: &Grammar, symbol: Symbol) -> Option<u128> {
        exact(grammar.symbol_index(symbol).map_or(0, |i| self.counts[i]))
    }

    /// Length of the full expansion, counting every symbol. `None` if the
    /// length does not fit in `u128`.
    #[must_use]
    pub fn length(&self) -> Option<u128> {
        self.counts
            .iter()
            .try_fold(0u128, |acc, &c| exact(acc.checked_add(exact(c)?)?))
    }
}

fn exact(value: u128) -> Option<u128> {
    (value != u128::MAX).then_some(value)
}

/// Total drawing steps of `grammar` at `depth`.
pub fn project_total(grammar: &Grammar, depth: u32) -> Result<u128> {
    Ok(Projection::new(grammar, depth)?.total())
}

/// Drawing steps produced by the first `k` top-level axiom symbols.
pub fn project_prefix(grammar: &Grammar, depth: u32, k: usize) -> Result<u128> {
    Ok(Projection::new(grammar, depth)?.prefix(k))
}

/// Number of symbols in the full expansion of `grammar` at `depth`.
pub fn project_length(grammar: &Grammar, depth: u32) -> Result<u128> {
    Projection::new(grammar, depth)?
        .length()
        .ok_or(LsysError::ProjectionOverflow { depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Action;

    fn fibonacci() -> Grammar {
        Grammar::builder("A")
            .rule('A', "AB")
            .rule('B', "A")
            .interpret('A', [Action::Draw(1.0)])
            .interpret('B', [Action::Draw(1.0)])
            .build()
            .unwrap()
    }

    fn fib(n: u32) -> u128 {
        let (mut a, mut b) = (0u128, 1u128);
        for _ in 0..n {
            (a, b) = (b, a + b);
        }
        a
    }

    #[test]
    fn transition_matrix_counts_replacements() {
        let g = Grammar::builder("F-G-G")
            .rule('F', "F-G+F+G-F")
            .rule('G', "GG")
            .interpret('F', [Action::Draw(1.0)])
            .interpret('G', [Action::Draw(1.0)])
            .interpret('+', [Action::Turn(-120.0)])
            .interpret('-', [Action::Turn(120.0)])
            .build()
            .unwrap();
        // alphabet: + - F G
        let m = transition_matrix(&g);
        assert_eq!(m.row(0), &[1, 0, 0, 0]);
        assert_eq!(m.row(1), &[0, 1, 0, 0]);
        assert_eq!(m.row(2), &[2, 2, 3, 2]);
        assert_eq!(m.row(3), &[0, 0, 0, 2]);
        assert_eq!(initial_vector(&g).row(0), &[0, 2, 1, 2]);
        for d in 0..8 {
            assert_eq!(project_total(&g, d).unwrap(), 3u128.pow(d + 1));
        }
    }

    #[test]
    fn fibonacci_totals() {
        let g = fibonacci();
        for d in 0..=10 {
            assert_eq!(project_total(&g, d).unwrap(), fib(d + 2), "depth {d}");
        }
    }

    #[test]
    fn depth_zero_counts_axiom_drawing_symbols() {
        let g = Grammar::builder("F+F+X")
            .rule('X', "FFFF")
            .interpret('F', [Action::Draw(1.0)])
            .interpret('+', [Action::Turn(90.0)])
            .interpret('X', [Action::NoOp])
            .build()
            .unwrap();
        assert_eq!(project_total(&g, 0).unwrap(), 2);
        assert_eq!(project_total(&g, 1).unwrap(), 6);
        assert_eq!(project_length(&g, 0).unwrap(), 5);
    }

    #[test]
    fn prefix_sums_over_axiom() {
        let g = Grammar::builder("F+X")
            .rule('X', "FF")
            .rule('F', "FF")
            .interpret('F', [Action::Draw(1.0)])
            .interpret('+', [Action::Turn(90.0)])
            .build()
            .unwrap();
        let p = Projection::new(&g, 3).unwrap();
        assert_eq!(p.prefix(0), 0);
        assert_eq!(p.prefix(1), 8);
        assert_eq!(p.prefix(2), 8);
        assert_eq!(p.prefix(3), 16);
        assert_eq!(p.prefix(99), p.total());
        assert_eq!(project_prefix(&g, 3, 1).unwrap(), 8);
        assert_eq!(p.symbol_yield(&g, 'X'), Some(8));
        assert_eq!(p.symbol_yield(&g, '?'), Some(0));
        assert_eq!(p.symbol_count(&g, 'F'), Some(16));
    }

    #[test]
    fn empty_replacement_contributes_nothing() {
        let g = Grammar::builder("FAF")
            .rule('A', "")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert_eq!(project_total(&g, 1).unwrap(), 2);
        assert_eq!(project_length(&g, 1).unwrap(), 2);
    }

    #[test]
    fn unexpanded_non_terminal_needs_action() {
        let g = Grammar::builder("X")
            .rule('X', "FX")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap();
        let err = Projection::new(&g, 3).unwrap_err();
        assert_eq!(err, LsysError::Unresolved { symbol: 'X', depth: 3 });
    }

    #[test]
    fn non_terminal_fully_rewritten_needs_no_action() {
        let g = Grammar::builder("X")
            .rule('X', "FF")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert!(Projection::new(&g, 0).is_err());
        assert_eq!(project_total(&g, 1).unwrap(), 2);
        assert_eq!(project_total(&g, 5).unwrap(), 2);
    }

    #[test]
    fn huge_depth_overflows_cleanly() {
        let g = Grammar::builder("F")
            .rule('F', "FF")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert_eq!(project_total(&g, 127).unwrap(), 1u128 << 127);
        assert_eq!(
            project_total(&g, 128).unwrap_err(),
            LsysError::ProjectionOverflow { depth: 128 }
        );
    }

    #[test]
    fn total_in_range_survives_overflowing_intermediates() {
        // C first appears one rewrite later, so M^d overflows before the total.
        let late = Grammar::builder("A")
            .rule('A', "C")
            .rule('C', "CC")
            .interpret('A', [Action::NoOp])
            .interpret('C', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert_eq!(project_total(&late, 127).unwrap(), 1u128 << 126);
        assert_eq!(project_total(&late, 128).unwrap(), 1u128 << 127);
        assert_eq!(
            project_total(&late, 129).unwrap_err(),
            LsysError::ProjectionOverflow { depth: 129 }
        );

        // X never draws but doubles every level.
        let idle = Grammar::builder("FX")
            .rule('X', "XX")
            .interpret('F', [Action::Draw(1.0)])
            .interpret('X', [Action::NoOp])
            .build()
            .unwrap();
        for depth in [0, 127, 128, 500, u32::MAX] {
            assert_eq!(project_total(&idle, depth).unwrap(), 1, "depth {depth}");
        }
        let p = Projection::new(&idle, 200).unwrap();
        assert_eq!(p.symbol_count(&idle, 'F'), Some(1));
        assert_eq!(p.symbol_count(&idle, 'X'), None);
        assert_eq!(p.length(), None);
        assert_eq!(
            project_length(&idle, 200).unwrap_err(),
            LsysError::ProjectionOverflow { depth: 200 }
        );
    }
}
