//! CLI boundary for the irrigation advisor.
//!
//! Usage: advise [temperature rainfall humidity irrigation crop_need]
//!
//! Parses and range-checks the five inputs, fits the model over the
//! embedded dataset, and prints the advisory report as pretty JSON.
//! With no arguments, built-in defaults are used.

use anyhow::{bail, Context, Result};
use irrigation_advisor_rust::{assess, FieldConditions, ForestConfig, YieldLossModel, TRAINING_DATA};

/// Accepted input ranges (the core assumes these were enforced here).
const BOUNDS: [(&str, f64, f64); 5] = [
    ("temperature", 10.0, 50.0),
    ("rainfall", 0.0, 50.0),
    ("humidity", 10.0, 100.0),
    ("irrigation", 0.0, 50.0),
    ("crop_need", 0.0, 50.0),
];

/// Default inputs used when no arguments are given.
const DEFAULTS: [f64; 5] = [30.0, 0.0, 60.0, 15.0, 12.0];

fn parse_conditions(args: &[String]) -> Result<FieldConditions> {
    let values: [f64; 5] = match args.len() {
        0 => DEFAULTS,
        5 => {
            let mut parsed = [0.0; 5];
            for (slot, (arg, (name, _, _))) in
                parsed.iter_mut().zip(args.iter().zip(BOUNDS.iter()))
            {
                *slot = arg
                    .parse::<f64>()
                    .with_context(|| format!("{name}: expected a number, got '{arg}'"))?;
            }
            parsed
        }
        n => bail!("expected 0 or 5 arguments (temperature rainfall humidity irrigation crop_need), got {n}"),
    };

    for (&value, &(name, lo, hi)) in values.iter().zip(BOUNDS.iter()) {
        if !value.is_finite() || value < lo || value > hi {
            bail!("{name} = {value} outside accepted range {lo}-{hi}");
        }
    }

    Ok(FieldConditions {
        temperature: values[0],
        rainfall: values[1],
        humidity: values[2],
        irrigation: values[3],
        crop_need: values[4],
    })
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let conditions = parse_conditions(&args)?;

    // Train once; a fit failure here is a fatal configuration error.
    let model = YieldLossModel::fit(&TRAINING_DATA, ForestConfig::default())
        .context("failed to fit yield-loss model over embedded dataset")?;

    let report = assess(&model, &conditions);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
