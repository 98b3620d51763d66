use std::path::Path;

use qdim_core::{Condition, condition_log_likelihoods};
use serde::Serialize;

use crate::ModelArgs;

#[derive(Serialize)]
struct LikelihoodReport {
    per_condition: Vec<f64>,
    total: f64,
}

pub fn run(model_args: &ModelArgs, data_path: &str, json: bool) {
    let model = super::or_exit(super::build_model(model_args));
    let config = super::prediction_config(model_args);
    let conditions: Vec<Condition> = super::or_exit(super::read_json(Path::new(data_path)));
    log::info!("scoring {} conditions from {data_path}", conditions.len());

    let per_condition = super::or_exit(condition_log_likelihoods(&model, &conditions, &config));
    let total: f64 = per_condition.iter().sum();

    if json {
        let report = LikelihoodReport {
            per_condition,
            total,
        };
        println!("{}", super::or_exit(serde_json::to_string_pretty(&report)));
        return;
    }

    println!(
        "{:<4} {:>14} {:>14} {:>6} {:>8} {:>24} {:>14}",
        "#", "outcomes1", "outcomes2", "first", "n", "data", "log L"
    );
    println!("{}", "-".repeat(92));
    for (i, (c, ll)) in conditions.iter().zip(&per_condition).enumerate() {
        let [w1, l1] = c.gamble.outcomes1;
        let [w2, l2] = c.gamble.outcomes2;
        println!(
            "{:<4} {:>14} {:>14} {:>6} {:>8} {:>24} {:>14.4}",
            i,
            format!("[{w1}, {l1}]"),
            format!("[{w2}, {l2}]"),
            if c.won_first { "win" } else { "loss" },
            c.n,
            format!("{:?}", c.data),
            ll
        );
    }
    println!("{}", "-".repeat(92));
    println!("Total log-likelihood: {total:.4}");
}
