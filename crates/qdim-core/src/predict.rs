//! Plan and final acceptance probabilities for the two-stage gamble.
//!
//! ```text
//! outcomes → utility differences → H1 + H2 → U → projections
//! ```
//!
//! The final choice is measured on the state conditioned on the revealed
//! first-gamble outcome. The plan is measured on the neutral state, before the
//! outcome is known; [`PlanRule`] selects how it is read off.

use serde::{Deserialize, Serialize};

use crate::error::{QdimError, Result};
use crate::evolution::{
    DEFAULT_DECISION_TIME, Projector, Unitary, evolution_operator, loss_state, neutral_state,
    projection_probability, win_state,
};
use crate::hamiltonian::{make_h1, make_h2};
use crate::joint::joint_response;
use crate::model::{Branch, Gamble, Qdim};
use crate::utility::utility_differences;

/// How the plan probability is obtained from the neutral state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanRule {
    /// `‖Pa·U·ψ_neutral‖²`: probability of planning to accept, identical on
    /// both branches.
    #[default]
    Marginal,
    /// `‖P(accept ∧ branch)·U·ψ_neutral‖² / ‖P(branch)·U·ψ_neutral‖²`.
    /// Fails with [`QdimError::ZeroProbability`] when the denominator is zero.
    Conditional,
}

impl std::fmt::Display for PlanRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marginal => write!(f, "marginal"),
            Self::Conditional => write!(f, "conditional"),
        }
    }
}

/// Tunables shared by prediction, sampling and likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Evolution time `t` in `U = exp(-i·t·H)`.
    pub decision_time: f64,
    pub plan_rule: PlanRule,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            decision_time: DEFAULT_DECISION_TIME,
            plan_rule: PlanRule::default(),
        }
    }
}

/// Evolution operator for a model and gamble.
pub fn model_evolution(model: &Qdim, gamble: &Gamble, t: f64) -> Result<Unitary> {
    let [d_win, d_loss] = utility_differences(model, gamble);
    let h = make_h1(d_win, d_loss) + make_h2(model.gamma());
    evolution_operator(&h, t)
}

/// `[p_plan, p_final]` given a win on the first gamble.
pub fn predict_given_win(model: &Qdim, gamble: &Gamble) -> Result<[f64; 2]> {
    predict_branch(model, gamble, Branch::Win, &PredictionConfig::default())
}

/// `[p_plan, p_final]` given a loss on the first gamble.
pub fn predict_given_loss(model: &Qdim, gamble: &Gamble) -> Result<[f64; 2]> {
    predict_branch(model, gamble, Branch::Loss, &PredictionConfig::default())
}

/// `[p_plan, p_final]` for one branch under an explicit configuration.
pub fn predict_branch(
    model: &Qdim,
    gamble: &Gamble,
    branch: Branch,
    config: &PredictionConfig,
) -> Result<[f64; 2]> {
    let u = model_evolution(model, gamble, config.decision_time)?;
    let (observed, accept_and_branch, branch_projector) = match branch {
        Branch::Win => (win_state(), Projector::ACCEPT_WIN, Projector::WIN),
        Branch::Loss => (loss_state(), Projector::ACCEPT_LOSS, Projector::LOSS),
    };

    let neutral = neutral_state();
    let p_plan = match config.plan_rule {
        PlanRule::Marginal => projection_probability(&u, Projector::ACCEPT, &neutral)?,
        PlanRule::Conditional => {
            let joint = projection_probability(&u, accept_and_branch, &neutral)?;
            let marginal = projection_probability(&u, branch_projector, &neutral)?;
            conditional_ratio(joint, marginal, branch)?
        }
    };
    let p_final = projection_probability(&u, Projector::ACCEPT, &observed)?;
    Ok([p_plan, p_final])
}

fn conditional_ratio(joint: f64, marginal: f64, branch: Branch) -> Result<f64> {
    if marginal == 0.0 {
        return Err(QdimError::ZeroProbability { branch });
    }
    Ok(joint / marginal)
}

/// Joint `(plan, final)` response distribution:
/// `[accept/accept, accept/decline, decline/accept, decline/decline]`.
pub fn predict(model: &Qdim, gamble: &Gamble, won_first: bool) -> Result<[f64; 4]> {
    predict_with_config(model, gamble, won_first, &PredictionConfig::default())
}

pub fn predict_with_config(
    model: &Qdim,
    gamble: &Gamble,
    won_first: bool,
    config: &PredictionConfig,
) -> Result<[f64; 4]> {
    let [p_plan, p_final] =
        predict_branch(model, gamble, Branch::from_won_first(won_first), config)?;
    Ok(joint_response(p_plan, p_final, model.m()))
}

/// Probability of accepting the second gamble given a win, given a loss, and
/// with the first outcome unknown. A sure-thing violation shows up as the
/// third value falling below both of the first two.
pub fn predict_sure_thing(model: &Qdim, gamble: &Gamble) -> Result<[f64; 3]> {
    predict_sure_thing_at(model, gamble, DEFAULT_DECISION_TIME)
}

pub fn predict_sure_thing_at(model: &Qdim, gamble: &Gamble, t: f64) -> Result<[f64; 3]> {
    let u = model_evolution(model, gamble, t)?;
    Ok([
        projection_probability(&u, Projector::ACCEPT, &win_state())?,
        projection_probability(&u, Projector::ACCEPT, &loss_state())?,
        projection_probability(&u, Projector::ACCEPT, &neutral_state())?,
    ])
}
