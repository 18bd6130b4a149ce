#![forbid(unsafe_code)]

//! Grammar definitions: axiom, rewrite rules, and the symbol interpretation.
//!
//! A [`Grammar`] is immutable once built. [`GrammarBuilder::build`] computes
//! the alphabet (every symbol reachable from the axiom through the rules) and
//! rejects definitions that could never be drawn:
//!
//! - a reachable terminal without an interpretation ([`LsysError::UnknownSymbol`]),
//! - a command with more than one drawing action ([`LsysError::MultipleDraws`]).
//!
//! Non-terminals only need an interpretation if the chosen depth leaves them
//! unexpanded in the output; that depends on the depth, so it is checked by
//! [`crate::projector::Projection::new`].

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::color::Hue;
use crate::error::{LsysError, Result};

/// A grammar symbol.
pub type Symbol = char;

/// A single turtle instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Advance by a distance in unit steps, drawing a segment if the pen is down.
    Draw(f64),
    /// Advance by a distance in unit steps without drawing.
    Move(f64),
    /// Rotate by a signed angle in degrees (counter-clockwise positive).
    Turn(f64),
    /// Save position, heading and pen state.
    Push,
    /// Restore the most recently saved state.
    Pop,
    /// Set the hue used by subsequent draws.
    SetHue(Hue),
    /// Reposition absolutely, in unit-square coordinates, without drawing.
    Jump { x: f64, y: f64 },
    /// Set the absolute heading in degrees.
    SetHeading(f64),
    PenUp,
    PenDown,
    NoOp,
}

impl Action {
    /// True for actions that count as a drawing step.
    #[inline]
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        matches!(self, Self::Draw(_))
    }
}

/// The ordered actions executed for one symbol.
pub type Command = SmallVec<[Action; 2]>;

/// Symbol to command mapping.
///
/// Entries for symbols outside a grammar's alphabet are allowed and ignored,
/// so one interpretation can be shared by several grammars.
#[derive(Debug, Clone, Default)]
pub struct Interpretation {
    commands: AHashMap<Symbol, Command>,
}

impl Interpretation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Interpretation::insert`].
    #[must_use]
    pub fn with(mut self, symbol: Symbol, actions: impl IntoIterator<Item = Action>) -> Self {
        self.insert(symbol, actions);
        self
    }

    /// Set the command for `symbol`, replacing any previous one.
    pub fn insert(&mut self, symbol: Symbol, actions: impl IntoIterator<Item = Action>) {
        self.commands.insert(symbol, actions.into_iter().collect());
    }

    #[must_use]
    pub fn get(&self, symbol: Symbol) -> Option<&[Action]> {
        self.commands.get(&symbol).map(SmallVec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.commands.contains_key(&symbol)
    }

    /// True if the command for `symbol` contains a drawing action.
    #[must_use]
    pub fn draws(&self, symbol: Symbol) -> bool {
        self.get(symbol)
            .is_some_and(|actions| actions.iter().any(Action::is_draw))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// An L-system: axiom, rewrite rules and interpretation.
#[derive(Debug, Clone)]
pub struct Grammar {
    axiom: Vec<Symbol>,
    rules: AHashMap<Symbol, Vec<Symbol>>,
    interpretation: Interpretation,
    /// Sorted reachable symbols; indexes the transition matrix.
    alphabet: Vec<Symbol>,
    index: AHashMap<Symbol, usize>,
}

impl Grammar {
    /// Start a grammar from its axiom.
    #[must_use]
    pub fn builder(axiom: &str) -> GrammarBuilder {
        GrammarBuilder {
            axiom: axiom.chars().collect(),
            rules: AHashMap::new(),
            interpretation: Interpretation::new(),
        }
    }

    #[must_use]
    pub fn axiom(&self) -> &[Symbol] {
        &self.axiom
    }

    /// The one-step replacement of `symbol`, or `None` for terminals.
    #[inline]
    #[must_use]
    pub fn rule(&self, symbol: Symbol) -> Option<&[Symbol]> {
        self.rules.get(&symbol).map(Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        !self.rules.contains_key(&symbol)
    }

    /// Rules for alphabet symbols, in alphabet order.
    pub fn rules(&self) -> impl Iterator<Item = (Symbol, &[Symbol])> + '_ {
        self.alphabet
            .iter()
            .filter_map(|&s| self.rule(s).map(|body| (s, body)))
    }

    #[must_use]
    pub fn interpretation(&self) -> &Interpretation {
        &self.interpretation
    }

    #[must_use]
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    #[inline]
    #[must_use]
    pub fn symbol_index(&self, symbol: Symbol) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// True if interpreting `symbol` takes a drawing step.
    #[inline]
    #[must_use]
    pub fn draws(&self, symbol: Symbol) -> bool {
        self.interpretation.draws(symbol)
    }

    /// Alphabet symbols that take a drawing step, in alphabet order.
    pub fn drawing_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.alphabet.iter().copied().filter(|&s| self.draws(s))
    }
}

/// Collects the parts of a [`Grammar`] and validates them.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    axiom: Vec<Symbol>,
    rules: AHashMap<Symbol, Vec<Symbol>>,
    interpretation: Interpretation,
}

impl GrammarBuilder {
    /// Add the rewrite rule `symbol -> replacement`. A later rule for the same
    /// symbol replaces the earlier one.
    #[must_use]
    pub fn rule(mut self, symbol: Symbol, replacement: &str) -> Self {
        self.rules.insert(symbol, replacement.chars().collect());
        self
    }

    /// Set the command executed for `symbol`.
    #[must_use]
    pub fn interpret(mut self, symbol: Symbol, actions: impl IntoIterator<Item = Action>) -> Self {
        self.interpretation.insert(symbol, actions);
        self
    }

    /// Replace the whole interpretation.
    #[must_use]
    pub fn interpretation(mut self, interpretation: Interpretation) -> Self {
        self.interpretation = interpretation;
        self
    }

    pub fn build(self) -> Result<Grammar> {
        let alphabet = reachable(&self.axiom, &self.rules);
        for &symbol in &alphabet {
            let command = self.interpretation.get(symbol);
            if command.is_none() && !self.rules.contains_key(&symbol) {
                return Err(LsysError::UnknownSymbol { symbol });
            }
            let draws = command.map_or(0, |c| c.iter().filter(|a| a.is_draw()).count());
            if draws > 1 {
                return Err(LsysError::MultipleDraws { symbol });
            }
        }
        let index = alphabet.iter().enumerate().map(|(i, &s)| (s, i)).collect();
        Ok(Grammar {
            axiom: self.axiom,
            rules: self.rules,
            interpretation: self.interpretation,
            alphabet,
            index,
        })
    }
}

/// Symbols reachable from `axiom` under `rules`, sorted.
fn reachable(axiom: &[Symbol], rules: &AHashMap<Symbol, Vec<Symbol>>) -> Vec<Symbol> {
    let mut seen: Vec<Symbol> = Vec::new();
    let mut pending: Vec<Symbol> = axiom.to_vec();
    while let Some(symbol) = pending.pop() {
        if seen.contains(&symbol) {
            continue;
        }
        seen.push(symbol);
        if let Some(body) = rules.get(&symbol) {
            pending.extend(body.iter().copied().filter(|s| !seen.contains(s)));
        }
    }
    seen.sort_unstable();
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn koch() -> GrammarBuilder {
        Grammar::builder("F--F--F")
            .rule('F', "F+F--F+F")
            .interpret('F', [Action::Draw(1.0)])
            .interpret('+', [Action::Turn(-60.0)])
            .interpret('-', [Action::Turn(60.0)])
    }

    #[test]
    fn alphabet_is_sorted_and_reachable() {
        let g = koch()
            .rule('Z', "ZZ")
            .interpret('Z', [Action::NoOp])
            .build()
            .unwrap();
        assert_eq!(g.alphabet(), &['+', '-', 'F']);
        assert_eq!(g.symbol_index('F'), Some(2));
        assert_eq!(g.symbol_index('Z'), None);
    }

    #[test]
    fn unreachable_rules_are_not_validated() {
        // `Q` has no action, but nothing reachable from the axiom produces it.
        let g = koch().rule('Z', "QZ").build().unwrap();
        assert_eq!(g.alphabet(), &['+', '-', 'F']);
        assert_eq!(g.symbol_index('Q'), None);
    }

    #[test]
    fn terminal_without_action_is_rejected() {
        let err = Grammar::builder("F+F")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap_err();
        assert_eq!(err, LsysError::UnknownSymbol { symbol: '+' });
    }

    #[test]
    fn terminal_only_reachable_through_rules_is_checked() {
        let err = Grammar::builder("A")
            .rule('A', "AQ")
            .build()
            .unwrap_err();
        assert_eq!(err, LsysError::UnknownSymbol { symbol: 'Q' });
    }

    #[test]
    fn non_terminal_without_action_is_allowed() {
        let g = Grammar::builder("X")
            .rule('X', "F")
            .interpret('F', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert!(!g.is_terminal('X'));
        assert!(g.interpretation().get('X').is_none());
    }

    #[test]
    fn two_draws_in_one_command_rejected() {
        let err = koch()
            .interpret('F', [Action::Draw(1.0), Action::Draw(1.0)])
            .build()
            .unwrap_err();
        assert_eq!(err, LsysError::MultipleDraws { symbol: 'F' });
    }

    #[test]
    fn unused_interpretation_entries_are_ignored() {
        let g = koch().interpret('[', [Action::Push]).build().unwrap();
        assert!(!g.alphabet().contains(&'['));
        assert_eq!(g.drawing_symbols().collect::<Vec<_>>(), vec!['F']);
    }

    #[test]
    fn empty_replacement_is_legal() {
        let g = Grammar::builder("AB")
            .rule('A', "")
            .interpret('B', [Action::Draw(1.0)])
            .build()
            .unwrap();
        assert_eq!(g.rule('A'), Some(&[] as &[Symbol]));
        assert_eq!(g.rules().count(), 1);
    }
}
