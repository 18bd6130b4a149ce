//! The built-in fractals.
//!
//! Angles are counter-clockwise degrees. Sizes are in unit drawing steps.

use std::f64::consts::SQRT_2;

use lsys_core::{Action, Interpretation};

use crate::fractal::FractalDef;

fn draw() -> [Action; 1] {
    [Action::Draw(1.0)]
}

fn turn(degrees: f64) -> [Action; 1] {
    [Action::Turn(degrees)]
}

fn pow(base: f64, depth: u32) -> f64 {
    base.powf(f64::from(depth))
}

pub static SIERPINSKI: FractalDef = FractalDef {
    slug: "sierpinski",
    name: "Sierpinski's Gasket",
    axiom: "F-G-G",
    rules: &[('F', "F-G+F+G-F"), ('G', "GG")],
    interpret: |_| {
        Interpretation::new()
            .with('F', draw())
            .with('G', draw())
            .with('-', turn(120.0))
            .with('+', turn(-120.0))
    },
    size: |d| pow(2.0, d),
    default_depth: 10,
};

pub static DRAGON: FractalDef = FractalDef {
    slug: "dragon",
    name: "The Dragon Curve",
    axiom: "0FX",
    rules: &[('X', "X+YF+"), ('Y', "-FX-Y")],
    interpret: |d| {
        Interpretation::new()
            .with('F', draw())
            .with('-', turn(90.0))
            .with('+', turn(-90.0))
            .with(
                '0',
                [
                    Action::Turn(45.0 + 45.0 * f64::from(d)),
                    Action::Jump { x: 0.35, y: 0.25 },
                ],
            )
            .with('X', [Action::NoOp])
            .with('Y', [Action::NoOp])
    },
    size: |d| 2.0 * pow(2.0, d).sqrt(),
    default_depth: 16,
};

pub static FERN: FractalDef = FractalDef {
    slug: "fern",
    name: "A Lindenmayer Fern",
    axiom: "0X",
    rules: &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
    interpret: |_| {
        Interpretation::new()
            .with('F', draw())
            .with('-', turn(25.0))
            .with('+', turn(-25.0))
            .with('X', [Action::NoOp])
            .with('[', [Action::Push])
            .with(']', [Action::Pop])
            .with(
                '0',
                [Action::Jump { x: 0.5, y: 0.0 }, Action::SetHeading(90.0)],
            )
    },
    size: |d| 0.1 * pow(3.0, d),
    default_depth: 8,
};

pub static LEVY_C: FractalDef = FractalDef {
    slug: "levy-c",
    name: "The Levy C Curve",
    axiom: "0F",
    rules: &[('F', "+F--F+")],
    interpret: |_| {
        Interpretation::new()
            .with('F', draw())
            .with('-', turn(-45.0))
            .with('+', turn(45.0))
            .with('0', [Action::Jump { x: 0.25, y: 0.25 }])
    },
    size: |d| 2.0 * pow(2.0, d).sqrt(),
    default_depth: 18,
};

pub static HILBERT: FractalDef = FractalDef {
    slug: "hilbert",
    name: "Hilbert's Space-Filling Curve",
    axiom: "A",
    rules: &[('A', "-BF+AFA+FB-"), ('B', "+AF-BFB-FA+")],
    interpret: |_| {
        Interpretation::new()
            .with('F', draw())
            .with('A', [Action::NoOp])
            .with('B', [Action::NoOp])
            .with('-', turn(90.0))
            .with('+', turn(-90.0))
    },
    size: |d| pow(2.0, d),
    default_depth: 8,
};

pub static SIERPINSKI_HEX: FractalDef = FractalDef {
    slug: "sierpinski-hex",
    name: "Sierpinski's Gasket Hexagonal Variant",
    axiom: "A",
    rules: &[('A', "B-A-B"), ('B', "A+B+A")],
    interpret: |d| {
        // Odd depths mirror the curve; flip the turns so it stays upright.
        let sign = if d % 2 == 0 { 1.0 } else { -1.0 };
        Interpretation::new()
            .with('A', draw())
            .with('B', draw())
            .with('-', turn(-60.0 * sign))
            .with('+', turn(60.0 * sign))
    },
    size: |d| pow(2.0, d),
    default_depth: 8,
};

pub static KOCH: FractalDef = FractalDef {
    slug: "koch",
    name: "Koch Snowflake",
    axiom: "0F--F--F",
    rules: &[('F', "F+F--F+F")],
    interpret: |_| {
        let inset = 0.5 * (1.0 - 3.0 / (2.0 * 3f64.sqrt()));
        Interpretation::new()
            .with('F', draw())
            .with('-', turn(60.0))
            .with('+', turn(-60.0))
            .with('0', [Action::Jump { x: inset, y: 0.25 }])
    },
    size: |d| 2.0 * 3f64.sqrt() / 3.0 * pow(3.0, d),
    default_depth: 8,
};

pub static KOCH_SQUARE: FractalDef = FractalDef {
    slug: "koch-square",
    name: "Square Koch Curve",
    axiom: "0F--F",
    rules: &[('F', "F+F-F-F+F")],
    interpret: |_| {
        Interpretation::new()
            .with('F', draw())
            .with('-', turn(-90.0))
            .with('+', turn(90.0))
            .with('0', [Action::Jump { x: 0.0, y: 0.5 }])
    },
    size: |d| pow(3.0, d),
    default_depth: 7,
};

pub static BINARY_TREE: FractalDef = FractalDef {
    slug: "binary-tree",
    name: "Binary Tree",
    axiom: "_0",
    rules: &[('1', "11"), ('0', "1[0]0")],
    interpret: |_| {
        Interpretation::new()
            .with('0', draw())
            .with('1', draw())
            .with('[', [Action::Push, Action::Turn(45.0)])
            .with(']', [Action::Pop, Action::Turn(-45.0)])
            .with(
                '_',
                [Action::Jump { x: 0.5, y: 0.0 }, Action::SetHeading(90.0)],
            )
    },
    // Trunk plus interlaced branch series, summed to infinity.
    size: |d| pow(2.0, d) / 2.0 * 4.0 / 3.0 * (1.0 + 0.25 * SQRT_2),
    default_depth: 10,
};

/// Every built-in, in menu order.
pub static BUILTIN: [&FractalDef; 9] = [
    &SIERPINSKI,
    &DRAGON,
    &FERN,
    &LEVY_C,
    &HILBERT,
    &SIERPINSKI_HEX,
    &KOCH,
    &KOCH_SQUARE,
    &BINARY_TREE,
];
