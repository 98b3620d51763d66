//! Model parameters and gamble inputs.
//!
//! [`Qdim`] is an immutable value: the only way to "change" a parameter is
//! [`Qdim::with`], which returns a new model. Conventional ranges (e.g.
//! `0 <= m <= 1`) are not enforced so samplers can explore freely; only
//! non-finite numbers are rejected.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{QdimError, Result};

/// `[win, loss]` outcomes of one stage of the two-stage gamble.
pub type Outcomes = [f64; 2];

/// Parameters of the quantum dynamic interference model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QdimParams", into = "QdimParams")]
pub struct Qdim {
    alpha: f64,
    lambda: f64,
    w1: f64,
    m: f64,
    gamma: f64,
}

/// Unvalidated parameter record, the serialized form of [`Qdim`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QdimParams {
    /// Utility curvature.
    pub alpha: f64,
    /// Loss aversion.
    pub lambda: f64,
    /// Decision weight on the win outcome of the second stage.
    pub w1: f64,
    /// Probability of repeating the planned response.
    pub m: f64,
    /// Entanglement between belief and action.
    pub gamma: f64,
}

impl Qdim {
    /// Build a model, rejecting NaN and infinite parameters.
    pub fn new(alpha: f64, lambda: f64, w1: f64, m: f64, gamma: f64) -> Result<Self> {
        let model = Self {
            alpha,
            lambda,
            w1,
            m,
            gamma,
        };
        for parameter in Parameter::ALL {
            let value = model.get(parameter);
            if !value.is_finite() {
                return Err(QdimError::NonFiniteParameter {
                    name: parameter.name(),
                    value,
                });
            }
        }
        Ok(model)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn w1(&self) -> f64 {
        self.w1
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Read a parameter by name.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Alpha => self.alpha,
            Parameter::Lambda => self.lambda,
            Parameter::W1 => self.w1,
            Parameter::M => self.m,
            Parameter::Gamma => self.gamma,
        }
    }

    /// Copy of this model with one parameter replaced.
    pub fn with(&self, parameter: Parameter, value: f64) -> Result<Self> {
        let mut p = QdimParams::from(*self);
        match parameter {
            Parameter::Alpha => p.alpha = value,
            Parameter::Lambda => p.lambda = value,
            Parameter::W1 => p.w1 = value,
            Parameter::M => p.m = value,
            Parameter::Gamma => p.gamma = value,
        }
        Self::try_from(p)
    }
}

impl TryFrom<QdimParams> for Qdim {
    type Error = QdimError;

    fn try_from(p: QdimParams) -> Result<Self> {
        Self::new(p.alpha, p.lambda, p.w1, p.m, p.gamma)
    }
}

impl From<Qdim> for QdimParams {
    fn from(model: Qdim) -> Self {
        Self {
            alpha: model.alpha,
            lambda: model.lambda,
            w1: model.w1,
            m: model.m,
            gamma: model.gamma,
        }
    }
}

/// Named model parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Alpha,
    Lambda,
    W1,
    M,
    Gamma,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Alpha,
        Parameter::Lambda,
        Parameter::W1,
        Parameter::M,
        Parameter::Gamma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Lambda => "lambda",
            Self::W1 => "w1",
            Self::M => "m",
            Self::Gamma => "gamma",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alpha" | "a" => Ok(Self::Alpha),
            "lambda" | "l" => Ok(Self::Lambda),
            "w1" | "w" => Ok(Self::W1),
            "m" | "memory" => Ok(Self::M),
            "gamma" | "g" => Ok(Self::Gamma),
            other => Err(format!(
                "unknown parameter '{other}' (expected alpha, lambda, w1, m or gamma)"
            )),
        }
    }
}

/// Which first-gamble outcome a prediction is conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Win,
    Loss,
}

impl Branch {
    pub fn from_won_first(won_first: bool) -> Self {
        if won_first { Self::Win } else { Self::Loss }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// First- and second-stage outcomes of a two-stage gamble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gamble {
    pub outcomes1: Outcomes,
    pub outcomes2: Outcomes,
}

impl Gamble {
    pub fn new(outcomes1: Outcomes, outcomes2: Outcomes) -> Self {
        Self {
            outcomes1,
            outcomes2,
        }
    }

    /// Build a gamble from untyped slices, checking both have two entries.
    pub fn from_slices(outcomes1: &[f64], outcomes2: &[f64]) -> Result<Self> {
        Ok(Self::new(
            to_outcomes("outcomes1", outcomes1)?,
            to_outcomes("outcomes2", outcomes2)?,
        ))
    }
}

fn to_outcomes(which: &'static str, values: &[f64]) -> Result<Outcomes> {
    match values {
        [win, loss] => Ok([*win, *loss]),
        _ => Err(QdimError::OutcomeLength {
            which,
            len: values.len(),
        }),
    }
}
