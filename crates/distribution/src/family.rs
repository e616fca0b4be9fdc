//! Supported distribution families.

use std::fmt;
use std::str::FromStr;

use crate::error::DistributionError;

/// A parametric family with positive support above its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Three-parameter gamma (shape k, location, scale θ).
    #[default]
    Gamma,
    /// Three-parameter Weibull (shape k, location, scale λ).
    Weibull,
    /// Three-parameter log-normal (σ, location, exp(μ)).
    LogNormal,
}

impl Family {
    /// All supported families.
    pub const ALL: [Family; 3] = [Family::Gamma, Family::Weibull, Family::LogNormal];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Gamma => "gamma",
            Family::Weibull => "weibull",
            Family::LogNormal => "lognormal",
        }
    }

    /// Whether the three-parameter likelihood is unbounded at the support
    /// edge when the shape is at most 1.
    pub(crate) fn has_unbounded_edge(&self) -> bool {
        matches!(self, Family::Gamma | Family::Weibull)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gamma" => Ok(Family::Gamma),
            "weibull" | "weibull_min" => Ok(Family::Weibull),
            "lognormal" | "log_normal" | "lognorm" => Ok(Family::LogNormal),
            _ => Err(DistributionError::UnsupportedDistribution {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_names() {
        for family in Family::ALL {
            assert_eq!(family.as_str().parse::<Family>().unwrap(), family);
        }
    }

    #[test]
    fn parse_aliases_and_case() {
        assert_eq!("Gamma".parse::<Family>().unwrap(), Family::Gamma);
        assert_eq!("weibull_min".parse::<Family>().unwrap(), Family::Weibull);
        assert_eq!(" LogNorm ".parse::<Family>().unwrap(), Family::LogNormal);
    }

    #[test]
    fn parse_unknown() {
        let err = "foo".parse::<Family>().unwrap_err();
        assert_eq!(
            err,
            DistributionError::UnsupportedDistribution {
                name: "foo".to_string()
            }
        );
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Family::LogNormal.to_string(), "lognormal");
    }
}
