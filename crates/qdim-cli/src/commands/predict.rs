use qdim_core::{Branch, Gamble, joint_response, predict_branch, predict_sure_thing_at};
use serde::Serialize;

use crate::ModelArgs;

pub struct PredictCommandConfig<'a> {
    pub model: &'a ModelArgs,
    pub outcomes1: &'a str,
    pub outcomes2: &'a str,
    pub won_first: bool,
    pub sure_thing: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct PredictionReport {
    branch: Branch,
    p_plan: f64,
    p_final: f64,
    joint: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    sure_thing: Option<[f64; 3]>,
}

const JOINT_LABELS: [&str; 4] = [
    "accept → accept",
    "accept → decline",
    "decline → accept",
    "decline → decline",
];

pub fn run(cfg: PredictCommandConfig<'_>) {
    let model = super::or_exit(super::build_model(cfg.model));
    let config = super::prediction_config(cfg.model);
    let gamble = Gamble::new(
        super::or_exit(super::parse_outcomes(cfg.outcomes1)),
        super::or_exit(super::parse_outcomes(cfg.outcomes2)),
    );
    let branch = Branch::from_won_first(cfg.won_first);
    log::info!("predicting {branch} branch for {gamble:?} (t = {})", config.decision_time);

    let [p_plan, p_final] = super::or_exit(predict_branch(&model, &gamble, branch, &config));
    let joint = joint_response(p_plan, p_final, model.m());
    let sure_thing = cfg
        .sure_thing
        .then(|| super::or_exit(predict_sure_thing_at(&model, &gamble, config.decision_time)));

    let report = PredictionReport {
        branch,
        p_plan,
        p_final,
        joint,
        sure_thing,
    };

    if cfg.json {
        println!("{}", super::or_exit(serde_json::to_string_pretty(&report)));
        return;
    }

    println!("Branch: first gamble {branch} (plan rule: {})", config.plan_rule);
    println!("  P(plan accept)  = {p_plan:.5}");
    println!("  P(final accept) = {p_final:.5}");
    println!("\n{:<20} {:>9}", "plan → final", "P");
    println!("{}", "-".repeat(30));
    for (label, p) in JOINT_LABELS.iter().zip(joint) {
        println!("{label:<20} {p:>9.5}");
    }
    if let Some([win, loss, unknown]) = report.sure_thing {
        println!("\nP(accept | win)     = {win:.5}");
        println!("P(accept | loss)    = {loss:.5}");
        println!("P(accept | unknown) = {unknown:.5}");
        if unknown < win && unknown < loss {
            println!("  sure-thing principle violated");
        }
    }
}
