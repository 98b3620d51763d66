//! # qdim-core
//!
//! **Quantum dynamic interference model for two-stage gambles.**
//!
//! A participant first decides whether they *plan* to take a second gamble
//! before the first one is resolved, then makes a *final* choice after seeing
//! the outcome. The cognitive state lives in a four-dimensional Hilbert space
//! spanned by {win&accept, win&decline, lose&accept, lose&decline}; choices are
//! read off by projection after unitary evolution.
//!
//! ## Quick Start
//!
//! ```
//! use qdim_core::{Gamble, Qdim, predict};
//!
//! let model = Qdim::new(0.70, 2.0, 0.50, 0.50, 2.5).unwrap();
//! let gamble = Gamble::new([2.0, -1.0], [2.0, -1.0]);
//!
//! // [accept/accept, accept/decline, decline/accept, decline/decline]
//! let joint = predict(&model, &gamble, true).unwrap();
//! assert!((joint.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! outcomes → utilities → utility differences → H1 + H2 → U = exp(-i·t·H)
//! → projections → joint (plan, final) distribution → samples / likelihood
//!
//! Everything is a pure function of its inputs. [`Qdim`] is an immutable value
//! that can be shared across threads freely.

pub mod error;
pub mod evolution;
pub mod hamiltonian;
pub mod joint;
pub mod likelihood;
pub mod model;
pub mod predict;
pub mod profile;
pub mod utility;

pub use error::{NUMERICAL_TOLERANCE, QdimError, Result};
pub use evolution::{
    DEFAULT_DECISION_TIME, Projector, State, Unitary, evolution_operator, loss_state,
    neutral_state, projection_probability, win_state,
};
pub use hamiltonian::{Operator, make_h1, make_h2};
pub use joint::joint_response;
pub use likelihood::{
    Condition, Counts, Design, condition_log_likelihoods, draw_multinomial, likelihood,
    likelihood_batch, log_likelihood, log_likelihood_batch, log_likelihood_conditions,
    log_likelihood_with_config, multinomial_log_pmf, sample, sample_batch, sample_with_rng,
    simulate_design, zip_conditions, zip_designs,
};
pub use model::{Branch, Gamble, Outcomes, Parameter, Qdim, QdimParams};
pub use predict::{
    PlanRule, PredictionConfig, model_evolution, predict, predict_branch, predict_given_loss,
    predict_given_win, predict_sure_thing, predict_sure_thing_at, predict_with_config,
};
pub use profile::{
    ProfilePoint, linear_grid, profile_log_likelihood, profile_maximum, relative_grid,
};
pub use utility::{utility, utility_differences};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
