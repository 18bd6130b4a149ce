//! `lsys list` and `lsys inspect`.

use std::io::Write;

use clap::Args;
use lsys_catalog::{FractalDef, Registry};
use lsys_core::projector::{initial_vector, transition_matrix};
use lsys_core::{Grammar, Projection, Symbol};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Fractal slug (see `lsys list`).
    pub slug: String,

    /// Depth to project at (default: the fractal's own).
    #[arg(long)]
    pub depth: Option<u32>,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleRecord {
    pub symbol: Symbol,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub slug: String,
    pub name: String,
    pub depth: u32,
    pub axiom: String,
    pub rules: Vec<RuleRecord>,
    pub alphabet: Vec<Symbol>,
    pub drawing_symbols: Vec<Symbol>,
    pub initial_vector: Vec<u128>,
    pub transition_matrix: Vec<Vec<u128>>,
    pub total_steps: u128,
    /// `None` when the length does not fit in 128 bits.
    pub expanded_length: Option<u128>,
}

impl InspectReport {
    pub fn build(def: &FractalDef, grammar: &Grammar, depth: u32) -> Result<Self> {
        let projection = Projection::new(grammar, depth)?;
        let matrix = transition_matrix(grammar);
        Ok(Self {
            slug: def.slug.to_string(),
            name: def.name.to_string(),
            depth,
            axiom: grammar.axiom().iter().collect(),
            rules: grammar
                .rules()
                .map(|(symbol, body)| RuleRecord {
                    symbol,
                    replacement: body.iter().collect(),
                })
                .collect(),
            alphabet: grammar.alphabet().to_vec(),
            drawing_symbols: grammar.drawing_symbols().collect(),
            initial_vector: initial_vector(grammar).row(0).to_vec(),
            transition_matrix: (0..matrix.rows()).map(|i| matrix.row(i).to_vec()).collect(),
            total_steps: projection.total(),
            expanded_length: projection.length(),
        })
    }
}

pub fn run_list(out: &mut dyn Write) -> Result<()> {
    for def in Registry::builtin().iter() {
        writeln!(
            out,
            "{:<16} {:<40} depth {}",
            def.slug, def.name, def.default_depth
        )?;
    }
    Ok(())
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run_inspect(args: &InspectArgs, out: &mut dyn Write) -> Result<()> {
    let def = Registry::builtin().get(&args.slug)?;
    let depth = args.depth.unwrap_or(def.default_depth);
    let grammar = def.grammar(depth)?;
    let report = InspectReport::build(def, &grammar, depth)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{} ({})", report.name, report.slug)?;
    writeln!(out, "axiom: {}", report.axiom)?;
    writeln!(out, "rules:")?;
    for rule in &report.rules {
        writeln!(out, "  {} -> {}", rule.symbol, rule.replacement)?;
    }
    writeln!(out, "alphabet: {}", join(&report.alphabet))?;
    writeln!(out, "drawing symbols: {}", join(&report.drawing_symbols))?;
    writeln!(out, "depth: {depth}")?;
    writeln!(out, "initial vector:\n{}", initial_vector(&grammar))?;
    writeln!(out, "transition matrix:\n{}", transition_matrix(&grammar))?;
    writeln!(out, "projected steps: {}", report.total_steps)?;
    match report.expanded_length {
        Some(len) => writeln!(out, "expanded length: {len}")?,
        None => writeln!(out, "expanded length: overflows u128")?,
    }
    Ok(())
}
