#![forbid(unsafe_code)]

//! Lazy depth-first expansion.
//!
//! [`Expansion`] yields the fully rewritten string one symbol at a time
//! without building it. It keeps an explicit stack of frames, one per level of
//! the active rewrite path; each frame is a cursor into a replacement slice
//! borrowed from the grammar, tagged with how many rewrites remain below it.
//!
//! # Invariants
//!
//! - The stack never holds more than `depth + 1` frames. A frame whose cursor
//!   has reached the end is popped before its child is pushed.
//! - A symbol is emitted as-is when it is terminal or when no rewrites
//!   remain, so depth 0 yields the axiom verbatim.
//! - No recursion: the call depth of `next` is constant.

use smallvec::SmallVec;
use std::iter::FusedIterator;

use crate::grammar::{Grammar, Symbol};

#[derive(Debug, Clone)]
struct Frame<'g> {
    symbols: &'g [Symbol],
    cursor: usize,
    remaining: u32,
}

/// Single-pass iterator over the expansion of a grammar at a fixed depth.
///
/// Create another one with [`expand`] to start over.
#[derive(Debug, Clone)]
pub struct Expansion<'g> {
    grammar: &'g Grammar,
    depth: u32,
    stack: SmallVec<[Frame<'g>; 16]>,
    emitted: u64,
}

/// Lazily expand `grammar` to `depth`.
#[must_use]
pub fn expand(grammar: &Grammar, depth: u32) -> Expansion<'_> {
    let mut stack = SmallVec::new();
    stack.push(Frame {
        symbols: grammar.axiom(),
        cursor: 0,
        remaining: depth,
    });
    Expansion {
        grammar,
        depth,
        stack,
        emitted: 0,
    }
}

impl<'g> Expansion<'g> {
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Symbols yielded so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Number of live frames.
    #[must_use]
    pub fn frame_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}

impl Iterator for Expansion<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(&symbol) = frame.symbols.get(frame.cursor) else {
                self.stack.pop();
                continue;
            };
            frame.cursor += 1;
            let remaining = frame.remaining;
            let finished = frame.cursor == frame.symbols.len();

            if remaining > 0
                && let Some(body) = self.grammar.rule(symbol)
            {
                if finished {
                    self.stack.pop();
                }
                self.stack.push(Frame {
                    symbols: body,
                    cursor: 0,
                    remaining: remaining - 1,
                });
                continue;
            }

            self.emitted += 1;
            return Some(symbol);
        }
    }
}

impl FusedIterator for Expansion<'_> {}

/// One rewrite step applied lazily to any symbol stream.
///
/// `substitute(expand(g, d), g)` yields the same symbols as `expand(g, d + 1)`.
#[derive(Debug, Clone)]
pub struct Substitute<'g, I> {
    inner: I,
    grammar: &'g Grammar,
    pending: &'g [Symbol],
}

/// Rewrite every symbol of `symbols` once using `grammar`'s rules.
pub fn substitute<I>(symbols: I, grammar: &Grammar) -> Substitute<'_, I::IntoIter>
where
    I: IntoIterator<Item = Symbol>,
{
    Substitute {
        inner: symbols.into_iter(),
        grammar,
        pending: &[],
    }
}

impl<I: Iterator<Item = Symbol>> Iterator for Substitute<'_, I> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        loop {
            if let Some((&first, rest)) = self.pending.split_first() {
                self.pending = rest;
                return Some(first);
            }
            let symbol = self.inner.next()?;
            match self.grammar.rule(symbol) {
                Some(body) => self.pending = body,
                None => return Some(symbol),
            }
        }
    }
}
