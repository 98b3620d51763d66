use std::path::Path;

use qdim_core::{
    Condition, Parameter, ProfilePoint, linear_grid, profile_log_likelihood, profile_maximum,
};
use serde::Serialize;

use crate::ModelArgs;

pub struct ProfileCommandConfig<'a> {
    pub model: &'a ModelArgs,
    pub data_path: &'a str,
    pub parameter: &'a str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub steps: usize,
    pub output_path: Option<&'a str>,
}

#[derive(Serialize)]
struct ProfileReport {
    parameter: Parameter,
    points: Vec<ProfilePoint>,
    maximum: Option<ProfilePoint>,
}

/// Default grid bounds: ±20% around the current value, or ±1 around zero.
fn default_bounds(center: f64) -> (f64, f64) {
    let spread = if center == 0.0 { 1.0 } else { 0.2 * center.abs() };
    (center - spread, center + spread)
}

pub fn run(cfg: ProfileCommandConfig<'_>) {
    let model = super::or_exit(super::build_model(cfg.model));
    let config = super::prediction_config(cfg.model);
    let parameter: Parameter = super::or_exit(cfg.parameter.parse());
    let conditions: Vec<Condition> = super::or_exit(super::read_json(Path::new(cfg.data_path)));

    let (default_low, default_high) = default_bounds(model.get(parameter));
    let low = cfg.min.unwrap_or(default_low);
    let high = cfg.max.unwrap_or(default_high);
    if !(low < high) {
        super::exit_with(format!("empty grid: min {low} must be below max {high}"));
    }
    let grid = linear_grid(low, high, cfg.steps);
    log::info!(
        "profiling {parameter} on [{low}, {high}] ({} points, {} conditions)",
        grid.len(),
        conditions.len()
    );

    let points = super::or_exit(profile_log_likelihood(
        &model,
        parameter,
        &grid,
        &conditions,
        &config,
    ));
    let maximum = profile_maximum(&points);

    println!("{:>12} {:>16}", parameter.name(), "log L");
    println!("{}", "-".repeat(29));
    for p in &points {
        let marker = if maximum.is_some_and(|m| m.value == p.value) {
            " ◀"
        } else {
            ""
        };
        println!("{:>12.5} {:>16.4}{marker}", p.value, p.log_likelihood);
    }
    match maximum {
        Some(m) => println!(
            "\nMaximum at {parameter} = {:.5} (log L = {:.4})",
            m.value, m.log_likelihood
        ),
        None => println!("\nNo finite log-likelihood on the grid."),
    }

    if let Some(path) = cfg.output_path {
        let report = ProfileReport {
            parameter,
            points,
            maximum,
        };
        super::or_exit(super::write_json(Path::new(path), &report));
        println!("Profile saved to: {path}");
    }
}
