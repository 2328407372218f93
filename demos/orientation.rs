// ============================================================================
// Orientation Demo
// Classifies point triples with filtered predicates and reports filter stats
// ============================================================================
//
// Run with:
//   cargo run --example orientation --features logging
//
// With the logging feature, every exact fallback is traced.

use filtered_exact::filter::stats;
use filtered_exact::prelude::*;

type Coord = FilteredRational<Cached>;

/// Sign of the determinant of (b - a, c - a): positive for a left turn.
fn orientation(a: &(Coord, Coord), b: &(Coord, Coord), c: &(Coord, Coord)) -> Resolved<Sign> {
    let det = (&b.0 - &a.0) * (&c.1 - &a.1) - (&b.1 - &a.1) * (&c.0 - &a.0);
    sign_resolved(&det)
}

fn point(x: (i64, i64), y: (i64, i64)) -> Result<(Coord, Coord), FilterError> {
    Ok((Coord::from_ratio(x.0, x.1)?, Coord::from_ratio(y.0, y.1)?))
}

fn describe(turn: Sign) -> &'static str {
    match turn {
        Sign::Positive => "left turn",
        Sign::Negative => "right turn",
        Sign::Zero => "collinear",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(feature = "logging")]
    filtered_exact::logging::init(tracing::Level::TRACE)?;

    println!("=== Filtered Orientation Demo ===\n");

    let origin = point((0, 1), (0, 1))?;
    let triples = [
        ("thirds, left", point((1, 3), (1, 3))?, point((1, 3), (2, 3))?),
        ("thirds, right", point((1, 3), (1, 3))?, point((2, 3), (1, 3))?),
        ("thirds, collinear", point((1, 3), (1, 3))?, point((7, 3), (7, 3))?),
        ("sevenths, collinear", point((1, 7), (2, 7))?, point((3, 7), (6, 7))?),
        ("near miss", point((1, 3), (1, 3))?, point((1_000_000, 3), (1_000_001, 3))?),
    ];

    stats::reset();
    for (label, b, c) in &triples {
        let turn = orientation(&origin, b, c);
        println!(
            "{:<22} ({}, {}) -> ({}, {}): {:<10} decided by {}",
            label,
            b.0,
            b.1,
            c.0,
            c.1,
            describe(turn.value),
            turn.resolution,
        );
    }

    println!("\nFilter statistics: {}", stats::snapshot());

    // Division guarded by the exact sign of the divisor
    let (x, _) = point((1, 3), (0, 1))?;
    let zero = &x - &x;
    match x.checked_div(&zero) {
        Ok(quotient) => println!("1/3 / 0 = {}", quotient),
        Err(err) => println!("1/3 / (1/3 - 1/3): {}", err),
    }

    Ok(())
}
