//! Two-parameter maximum-likelihood estimators for a known location.
//!
//! With the location held fixed every family reduces to either a closed form
//! (log-normal) or a single monotone equation in the shape (gamma, Weibull),
//! solved here by bracketing and bisection.
//!
//! **Not part of the public API.**

use statrs::function::gamma::{digamma, ln_gamma};

use crate::error::DistributionError;
use crate::family::Family;
use crate::params::DistParams;

const MAX_BRACKET_STEPS: usize = 200;
const MAX_BISECTIONS: usize = 200;
const REL_TOL: f64 = 1e-14;

/// Fitted parameters together with the maximized log-likelihood.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocFit {
    pub params: DistParams,
    pub log_likelihood: f64,
}

/// Maximizes the likelihood of `sample` over shape and scale with the
/// location fixed at `loc`.
pub(crate) fn fit_at(family: Family, sample: &[f64], loc: f64) -> Result<LocFit, DistributionError> {
    let y: Vec<f64> = sample.iter().map(|x| x - loc).collect();
    if y.is_empty() || y.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
        return Err(DistributionError::FitFailed {
            family,
            reason: format!("location {loc} must lie strictly below every observation"),
        });
    }

    let fitted = match family {
        Family::Gamma => gamma(&y),
        Family::Weibull => weibull(&y),
        Family::LogNormal => lognormal(&y),
    };

    let (shape, scale, log_likelihood) = fitted.ok_or_else(|| DistributionError::FitFailed {
        family,
        reason: "sample has no spread on the log scale".to_string(),
    })?;

    let params = DistParams::new(shape, loc, scale);
    params.validate(family)?;
    if !log_likelihood.is_finite() {
        return Err(DistributionError::FitFailed {
            family,
            reason: "log-likelihood is not finite".to_string(),
        });
    }

    Ok(LocFit {
        params,
        log_likelihood,
    })
}

/// Gamma MLE: solves `ln k - ψ(k) = ln(ȳ) - mean(ln y)`, then `θ = ȳ / k`.
fn gamma(y: &[f64]) -> Option<(f64, f64, f64)> {
    let n = y.len() as f64;
    let mean_y = y.iter().sum::<f64>() / n;
    let sum_ln = y.iter().map(|v| v.ln()).sum::<f64>();
    let s = mean_y.ln() - sum_ln / n;
    if !(s.is_finite() && s > 0.0) {
        return None;
    }

    // Thom (1958) approximation as the starting point.
    let k0 = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);
    let k = positive_root(|k| k.ln() - digamma(k) - s, k0)?;
    let theta = mean_y / k;

    let ll = (k - 1.0) * sum_ln - n * k - n * k * theta.ln() - n * ln_gamma(k);
    Some((k, theta, ll))
}

/// Weibull MLE: solves the profile equation in `k` on `z = y / max(y)` (which
/// keeps `z^k <= 1`), then recovers `λ`.
fn weibull(y: &[f64]) -> Option<(f64, f64, f64)> {
    let n = y.len() as f64;
    let y_max = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let ln_z: Vec<f64> = y.iter().map(|v| (v / y_max).ln()).collect();
    let mean_ln_z = drought_stats::mean(&ln_z);
    let sd_ln = drought_stats::population_sd(&ln_z);
    if !(sd_ln.is_finite() && sd_ln > 0.0) {
        return None;
    }

    let moments = |k: f64| {
        ln_z.iter().fold((0.0, 0.0), |(num, den), &l| {
            let w = (k * l).exp();
            (num + w * l, den + w)
        })
    };
    let shape_eq = |k: f64| {
        let (num, den) = moments(k);
        num / den - 1.0 / k - mean_ln_z
    };

    // Gumbel moment match on ln y: sd = π / (k √6).
    let k0 = std::f64::consts::PI / (6.0_f64.sqrt() * sd_ln);
    let k = positive_root(shape_eq, k0)?;
    let (_, den) = moments(k);
    let lambda = y_max * (den / n).powf(1.0 / k);

    let sum_ln_y: f64 = y.iter().map(|v| v.ln()).sum();
    let sum_pow: f64 = y.iter().map(|v| (k * (v / lambda).ln()).exp()).sum();
    let ll = n * k.ln() - n * k * lambda.ln() + (k - 1.0) * sum_ln_y - sum_pow;
    Some((k, lambda, ll))
}

/// Log-normal MLE: mean and population sd of `ln y`. Returns
/// `(σ, exp(μ), ll)`.
fn lognormal(y: &[f64]) -> Option<(f64, f64, f64)> {
    let n = y.len() as f64;
    let l: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let mu = drought_stats::mean(&l);
    let sigma = drought_stats::population_sd(&l);
    if !(sigma.is_finite() && sigma > 0.0) {
        return None;
    }
    let sum_l: f64 = l.iter().sum();
    let ll = -n * sigma.ln() - 0.5 * n * (2.0 * std::f64::consts::PI).ln() - sum_l - 0.5 * n;
    Some((sigma, mu.exp(), ll))
}

/// Root of a monotone function on `(0, ∞)`: expands a geometric bracket
/// around `guess` until the sign changes, then bisects.
fn positive_root<F: Fn(f64) -> f64>(f: F, guess: f64) -> Option<f64> {
    if !(guess.is_finite() && guess > 0.0) {
        return None;
    }
    let f_guess = f(guess);
    if f_guess == 0.0 {
        return Some(guess);
    }
    if !f_guess.is_finite() {
        return None;
    }

    let (mut a, mut b) = (guess, guess);
    let mut bracket = None;
    for _ in 0..MAX_BRACKET_STEPS {
        let (down, up) = (a / 2.0, b * 2.0);
        if opposite(f(down), f_guess) {
            bracket = Some((down, a));
            break;
        }
        if opposite(f(up), f_guess) {
            bracket = Some((b, up));
            break;
        }
        a = down;
        b = up;
    }

    let (mut lo, mut hi) = bracket?;
    let mut f_lo = f(lo);
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 || (hi - lo) <= REL_TOL * mid {
            return Some(mid);
        }
        if opposite(f_mid, f_lo) {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    Some(0.5 * (lo + hi))
}

fn opposite(x: f64, y: f64) -> bool {
    (x > 0.0 && y < 0.0) || (x < 0.0 && y > 0.0)
}
