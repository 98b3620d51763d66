//! Multinomial sampling and likelihood of (plan, final) response counts.
//!
//! Conditions are independent, so batch log-likelihoods are plain sums of
//! per-condition terms. Callers that evaluate conditions in parallel and
//! reduce in a different order may see differences in the last few bits of
//! the total; the per-condition terms are deterministic.

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};
use statrs::function::factorial::ln_factorial;

use crate::error::{NUMERICAL_TOLERANCE, QdimError, Result};
use crate::model::{Gamble, Outcomes, Qdim};
use crate::predict::{PredictionConfig, predict_with_config};

/// Counts over `[accept/accept, accept/decline, decline/accept, decline/decline]`.
pub type Counts = [u64; 4];

/// One gamble condition of an experiment, without observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(flatten)]
    pub gamble: Gamble,
    pub won_first: bool,
    /// Number of trials.
    pub n: u64,
}

impl Design {
    pub fn with_data(self, data: Counts) -> Condition {
        Condition {
            gamble: self.gamble,
            won_first: self.won_first,
            n: self.n,
            data,
        }
    }
}

/// One gamble condition with its observed response counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(flatten)]
    pub gamble: Gamble,
    pub won_first: bool,
    pub n: u64,
    pub data: Counts,
}

impl Condition {
    pub fn design(&self) -> Design {
        Design {
            gamble: self.gamble,
            won_first: self.won_first,
            n: self.n,
        }
    }
}

fn check_len(field: &'static str, len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(QdimError::BatchLength {
            field,
            len,
            expected,
        });
    }
    Ok(())
}

/// Build designs from parallel sequences, checking they have equal length.
pub fn zip_designs(
    outcomes1: &[Outcomes],
    outcomes2: &[Outcomes],
    won_first: &[bool],
    n: &[u64],
) -> Result<Vec<Design>> {
    let expected = outcomes1.len();
    check_len("outcomes2", outcomes2.len(), expected)?;
    check_len("won_first", won_first.len(), expected)?;
    check_len("n", n.len(), expected)?;
    Ok(outcomes1
        .iter()
        .zip(outcomes2)
        .zip(won_first)
        .zip(n)
        .map(|(((o1, o2), &won_first), &n)| Design {
            gamble: Gamble::new(*o1, *o2),
            won_first,
            n,
        })
        .collect())
}

/// Build conditions from parallel sequences, checking they have equal length.
pub fn zip_conditions(
    outcomes1: &[Outcomes],
    outcomes2: &[Outcomes],
    won_first: &[bool],
    n: &[u64],
    data: &[Counts],
) -> Result<Vec<Condition>> {
    let designs = zip_designs(outcomes1, outcomes2, won_first, n)?;
    check_len("data", data.len(), designs.len())?;
    Ok(designs
        .into_iter()
        .zip(data)
        .map(|(design, &counts)| design.with_data(counts))
        .collect())
}

/// Reject probability vectors that cannot parameterise a multinomial.
fn validate_distribution(probs: &[f64; 4]) -> Result<()> {
    let in_range = |p: f64| (-NUMERICAL_TOLERANCE..=1.0 + NUMERICAL_TOLERANCE).contains(&p);
    if let Some(p) = probs.iter().find(|&&p| !in_range(p)) {
        return Err(QdimError::InvalidDistribution(format!(
            "category probability {p} outside [0, 1] in {probs:?}"
        )));
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > NUMERICAL_TOLERANCE {
        return Err(QdimError::InvalidDistribution(format!(
            "probabilities sum to {sum}, expected 1"
        )));
    }
    Ok(())
}

/// One multinomial draw of `n` trials, by sequential conditional binomials.
pub fn draw_multinomial<R: Rng + ?Sized>(probs: &[f64; 4], n: u64, rng: &mut R) -> Result<Counts> {
    validate_distribution(probs)?;
    let mut counts = [0u64; 4];
    let mut remaining = n;
    let mut mass = 1.0;
    for (i, &p) in probs.iter().enumerate().take(3) {
        if remaining == 0 {
            break;
        }
        let p = p.max(0.0);
        let conditional = if mass > 0.0 {
            (p / mass).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let binomial = Binomial::new(remaining, conditional)
            .map_err(|e| QdimError::InvalidDistribution(e.to_string()))?;
        let k = binomial.sample(rng);
        counts[i] = k;
        remaining -= k;
        mass -= p;
    }
    counts[3] = remaining;
    Ok(counts)
}

/// Multinomial log-pmf `log n! - Σ log k_i! + Σ k_i log p_i`.
///
/// A positive count in a zero-probability category gives `-inf`.
pub fn multinomial_log_pmf(probs: &[f64; 4], n: u64, data: &Counts) -> Result<f64> {
    validate_distribution(probs)?;
    let total: u64 = data.iter().sum();
    if total != n {
        return Err(QdimError::CountMismatch { total, n });
    }
    let mut ll = ln_factorial(n);
    for (&k, &p) in data.iter().zip(probs) {
        if k == 0 {
            continue;
        }
        if p <= 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        ll += k as f64 * p.ln() - ln_factorial(k);
    }
    Ok(ll)
}

/// Simulate response counts for `n` trials of one condition.
pub fn sample(model: &Qdim, gamble: &Gamble, won_first: bool, n: u64) -> Result<Counts> {
    sample_with_rng(
        model,
        gamble,
        won_first,
        n,
        &PredictionConfig::default(),
        &mut rand::rng(),
    )
}

pub fn sample_with_rng<R: Rng + ?Sized>(
    model: &Qdim,
    gamble: &Gamble,
    won_first: bool,
    n: u64,
    config: &PredictionConfig,
    rng: &mut R,
) -> Result<Counts> {
    let probs = predict_with_config(model, gamble, won_first, config)?;
    draw_multinomial(&probs, n, rng)
}

/// One simulated count vector per condition of the parallel sequences.
pub fn sample_batch(
    model: &Qdim,
    outcomes1: &[Outcomes],
    outcomes2: &[Outcomes],
    won_first: &[bool],
    n: &[u64],
) -> Result<Vec<Counts>> {
    let designs = zip_designs(outcomes1, outcomes2, won_first, n)?;
    let config = PredictionConfig::default();
    let conditions = simulate_design(model, &designs, &config, &mut rand::rng())?;
    Ok(conditions.into_iter().map(|c| c.data).collect())
}

/// Simulate every design entry, attaching the drawn counts.
pub fn simulate_design<R: Rng + ?Sized>(
    model: &Qdim,
    designs: &[Design],
    config: &PredictionConfig,
    rng: &mut R,
) -> Result<Vec<Condition>> {
    designs
        .iter()
        .map(|d| {
            let data = sample_with_rng(model, &d.gamble, d.won_first, d.n, config, rng)?;
            Ok(d.with_data(data))
        })
        .collect()
}

/// Log-likelihood of observed counts for one condition.
pub fn log_likelihood(
    model: &Qdim,
    gamble: &Gamble,
    won_first: bool,
    n: u64,
    data: &Counts,
) -> Result<f64> {
    log_likelihood_with_config(model, gamble, won_first, n, data, &PredictionConfig::default())
}

pub fn log_likelihood_with_config(
    model: &Qdim,
    gamble: &Gamble,
    won_first: bool,
    n: u64,
    data: &Counts,
    config: &PredictionConfig,
) -> Result<f64> {
    let probs = predict_with_config(model, gamble, won_first, config)?;
    multinomial_log_pmf(&probs, n, data)
}

/// `exp(log_likelihood)`.
pub fn likelihood(
    model: &Qdim,
    gamble: &Gamble,
    won_first: bool,
    n: u64,
    data: &Counts,
) -> Result<f64> {
    Ok(log_likelihood(model, gamble, won_first, n, data)?.exp())
}

/// Summed log-likelihood over parallel sequences of conditions.
pub fn log_likelihood_batch(
    model: &Qdim,
    outcomes1: &[Outcomes],
    outcomes2: &[Outcomes],
    won_first: &[bool],
    n: &[u64],
    data: &[Counts],
) -> Result<f64> {
    let conditions = zip_conditions(outcomes1, outcomes2, won_first, n, data)?;
    log_likelihood_conditions(model, &conditions, &PredictionConfig::default())
}

/// `exp(log_likelihood_batch)`.
pub fn likelihood_batch(
    model: &Qdim,
    outcomes1: &[Outcomes],
    outcomes2: &[Outcomes],
    won_first: &[bool],
    n: &[u64],
    data: &[Counts],
) -> Result<f64> {
    Ok(log_likelihood_batch(model, outcomes1, outcomes2, won_first, n, data)?.exp())
}

/// Per-condition log-likelihood terms, in input order.
pub fn condition_log_likelihoods(
    model: &Qdim,
    conditions: &[Condition],
    config: &PredictionConfig,
) -> Result<Vec<f64>> {
    conditions
        .iter()
        .map(|c| log_likelihood_with_config(model, &c.gamble, c.won_first, c.n, &c.data, config))
        .collect()
}

/// Summed log-likelihood over independent conditions.
pub fn log_likelihood_conditions(
    model: &Qdim,
    conditions: &[Condition],
    config: &PredictionConfig,
) -> Result<f64> {
    Ok(condition_log_likelihoods(model, conditions, config)?
        .into_iter()
        .sum())
}
