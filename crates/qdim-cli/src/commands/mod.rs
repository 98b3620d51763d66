pub mod loglik;
pub mod predict;
pub mod profile;
pub mod simulate;

use std::path::Path;

use qdim_core::{Outcomes, PlanRule, PredictionConfig, Qdim, QdimParams};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ModelArgs;

/// Print an error and exit with status 1.
pub fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Unwrap a command-level result or exit.
pub fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| exit_with(e))
}

/// Build the model from a JSON file if given, otherwise from flags.
pub fn build_model(args: &ModelArgs) -> Result<Qdim, String> {
    let params = match args.model.as_deref() {
        Some(path) => read_json::<QdimParams>(Path::new(path))?,
        None => QdimParams {
            alpha: args.alpha,
            lambda: args.lambda,
            w1: args.w1,
            m: args.m,
            gamma: args.gamma,
        },
    };
    let model = Qdim::try_from(params).map_err(|e| e.to_string())?;
    log::debug!("model: {model:?}");
    Ok(model)
}

pub fn prediction_config(args: &ModelArgs) -> PredictionConfig {
    let mut config = PredictionConfig {
        plan_rule: parse_plan_rule(&args.plan_rule),
        ..PredictionConfig::default()
    };
    if let Some(t) = args.time {
        config.decision_time = t;
    }
    config
}

/// Parse a plan rule string into the enum.
pub fn parse_plan_rule(s: &str) -> PlanRule {
    match s {
        "conditional" | "bayes" => PlanRule::Conditional,
        "marginal" => PlanRule::Marginal,
        _ => {
            log::warn!("unknown plan rule '{s}', using marginal");
            PlanRule::Marginal
        }
    }
}

/// Parse "win,loss" into an outcome pair.
pub fn parse_outcomes(s: &str) -> Result<Outcomes, String> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid outcome '{}': {e}", v.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    match values.as_slice() {
        [win, loss] => Ok([*win, *loss]),
        _ => Err(format!(
            "expected two comma-separated outcomes \"win,loss\", got {} in '{s}'",
            values.len()
        )),
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdim_core::Condition;

    fn flags() -> ModelArgs {
        ModelArgs {
            model: None,
            alpha: 0.7,
            lambda: 2.0,
            w1: 0.5,
            m: 0.5,
            gamma: 2.5,
            time: None,
            plan_rule: "marginal".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // parse_outcomes tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_outcomes() {
        assert_eq!(parse_outcomes("2,-1"), Ok([2.0, -1.0]));
        assert_eq!(parse_outcomes(" 4.5 , -0.25 "), Ok([4.5, -0.25]));
    }

    #[test]
    fn test_parse_outcomes_wrong_count() {
        assert!(parse_outcomes("1,2,3").unwrap_err().contains("got 3"));
        assert!(parse_outcomes("1").is_err());
        assert!(parse_outcomes("a,b").unwrap_err().contains("invalid outcome"));
    }

    // -----------------------------------------------------------------------
    // parse_plan_rule tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_plan_rule() {
        assert_eq!(parse_plan_rule("conditional"), PlanRule::Conditional);
        assert_eq!(parse_plan_rule("marginal"), PlanRule::Marginal);
        assert_eq!(parse_plan_rule("bogus"), PlanRule::Marginal);
    }

    // -----------------------------------------------------------------------
    // model / config tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_build_model_from_flags() {
        let model = build_model(&flags()).unwrap();
        assert_eq!(model.gamma(), 2.5);
    }

    #[test]
    fn test_build_model_from_file_overrides_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"alpha":1.0,"lambda":1.0,"w1":0.75,"m":0.5,"gamma":1.74}"#,
        )
        .unwrap();
        let args = ModelArgs {
            model: Some(path.to_string_lossy().into_owned()),
            ..flags()
        };
        let model = build_model(&args).unwrap();
        assert_eq!(model.w1(), 0.75);
        assert_eq!(model.gamma(), 1.74);
    }

    #[test]
    fn test_prediction_config_time_override() {
        let args = ModelArgs {
            time: Some(1.0),
            plan_rule: "conditional".to_string(),
            ..flags()
        };
        let config = prediction_config(&args);
        assert_eq!(config.decision_time, 1.0);
        assert_eq!(config.plan_rule, PlanRule::Conditional);
        assert_eq!(prediction_config(&flags()), PredictionConfig::default());
    }

    #[test]
    fn test_json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conditions.json");
        let conditions = vec![Condition {
            gamble: qdim_core::Gamble::new([2.0, -1.0], [2.0, -1.0]),
            won_first: true,
            n: 10,
            data: [6, 1, 1, 2],
        }];
        write_json(&path, &conditions).unwrap();
        let back: Vec<Condition> = read_json(&path).unwrap();
        assert_eq!(back, conditions);
        assert!(read_json::<Vec<Condition>>(&dir.path().join("missing.json")).is_err());
    }
}
