//! Step counts and drawing sanity for every built-in fractal.

use lsys_catalog::{FractalDef, Registry, builtin};
use lsys_core::{NullSink, Segment, Session, expand};

fn brute_force(def: &FractalDef, depth: u32) -> u128 {
    let grammar = def.grammar(depth).unwrap();
    expand(&grammar, depth).filter(|&s| grammar.draws(s)).count() as u128
}

fn projected(def: &FractalDef, depth: u32) -> u128 {
    def.total_steps(depth).unwrap()
}

#[test]
fn closed_form_step_counts() {
    let cases: [(&FractalDef, fn(u32) -> u128); 7] = [
        (&builtin::SIERPINSKI, |d| 3u128.pow(d + 1)),
        (&builtin::DRAGON, |d| 2u128.pow(d)),
        (&builtin::LEVY_C, |d| 2u128.pow(d)),
        (&builtin::KOCH, |d| 3 * 4u128.pow(d)),
        (&builtin::KOCH_SQUARE, |d| 2 * 5u128.pow(d)),
        (&builtin::HILBERT, |d| 4u128.pow(d) - 1),
        (&builtin::SIERPINSKI_HEX, |d| 3u128.pow(d)),
    ];
    for (def, expected) in cases {
        for depth in 0..=12 {
            assert_eq!(projected(def, depth), expected(depth), "{} at depth {depth}", def.slug);
        }
    }
}

#[test]
fn projection_matches_expansion_for_every_builtin() {
    for def in Registry::builtin().iter() {
        for depth in 0..=5 {
            assert_eq!(
                projected(def, depth),
                brute_force(def, depth),
                "{} at depth {depth}",
                def.slug
            );
        }
    }
}

#[test]
fn default_depths_project_without_overflow() {
    for def in Registry::builtin().iter() {
        let total = projected(def, def.default_depth);
        assert!(total > 0, "{}", def.slug);
    }
}

#[test]
fn every_builtin_draws_to_completion() {
    for def in Registry::builtin().iter() {
        let depth = def.default_depth.min(5);
        let grammar = def.grammar(depth).unwrap();
        let mut session = Session::new(&grammar, def.session_config(depth, 100.0)).unwrap();
        let outcome = session.finish(&mut NullSink).unwrap();
        assert!(outcome.exhausted, "{}", def.slug);
        assert_eq!(u128::from(outcome.steps), session.total_steps(), "{}", def.slug);
        assert_eq!(session.turtle().stack_depth(), 0, "{}", def.slug);
    }
}

fn assert_fits(def: &FractalDef, depth: u32, width: f64) {
    let grammar = def.grammar(depth).unwrap();
    let mut segments: Vec<Segment> = Vec::new();
    Session::new(&grammar, def.session_config(depth, width))
        .unwrap()
        .finish(&mut segments)
        .unwrap();
    let eps = 1e-9 * width;
    for s in &segments {
        for p in [s.start, s.end] {
            assert!(
                (-eps..=width + eps).contains(&p.x) && (-eps..=width + eps).contains(&p.y),
                "{} depth {depth}: {p:?} outside the square",
                def.slug
            );
        }
    }
}

#[test]
fn square_filling_curves_stay_in_the_square() {
    for depth in 0..=5 {
        assert_fits(&builtin::HILBERT, depth, 256.0);
        assert_fits(&builtin::SIERPINSKI, depth, 256.0);
    }
}

#[test]
fn hex_turns_alternate_with_depth_parity() {
    let even = (builtin::SIERPINSKI_HEX.interpret)(2);
    let odd = (builtin::SIERPINSKI_HEX.interpret)(3);
    assert_ne!(even.get('+'), odd.get('+'));
    assert_eq!(even.get('+'), odd.get('-'));
}

#[test]
fn session_config_scales_by_size() {
    let config = builtin::KOCH_SQUARE.session_config(3, 300.0);
    assert_eq!(config.depth, 3);
    assert_eq!(config.width, 300.0);
    assert!((config.input_scale - 27.0).abs() < 1e-9);
}
