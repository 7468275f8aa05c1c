use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use solvebench_core::Strategy;
use thiserror::Error;

use crate::{Gesv, GesvRaw, GesvWorkspace, Reference, SgesvMixed, SgesvMixedWorkspace};

/// The strategies shipped with this crate, in their default comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// [`Reference`]: `nalgebra` LU, the baseline.
    Reference,

    /// [`Gesv`]: convenience double-precision solve.
    Gesv,

    /// [`GesvWorkspace`]: in-place solve with a preallocated pivot buffer.
    GesvWorkspace,

    /// [`GesvRaw`]: native-ABI entry point through raw pointers.
    GesvRaw,

    /// [`SgesvMixed`]: convenience mixed-precision solve.
    SgesvMixed,

    /// [`SgesvMixedWorkspace`]: mixed-precision solve with a session workspace.
    SgesvMixedWorkspace,
}

/// Error for a label that names no shipped strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(pub String);

impl StrategyKind {
    /// Every shipped strategy in default order.
    pub const ALL: [Self; 6] = [
        Self::Reference,
        Self::Gesv,
        Self::GesvWorkspace,
        Self::GesvRaw,
        Self::SgesvMixed,
        Self::SgesvMixedWorkspace,
    ];

    /// Returns the label the built strategy reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Gesv => "gesv",
            Self::GesvWorkspace => "gesv_workspace",
            Self::GesvRaw => "gesv_raw",
            Self::SgesvMixed => "sgesv_mixed",
            Self::SgesvMixedWorkspace => "sgesv_mixed_workspace",
        }
    }

    /// Builds the strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            Self::Reference => Box::new(Reference),
            Self::Gesv => Box::new(Gesv),
            Self::GesvWorkspace => Box::new(GesvWorkspace),
            Self::GesvRaw => Box::new(GesvRaw),
            Self::SgesvMixed => Box::new(SgesvMixed),
            Self::SgesvMixedWorkspace => Box::new(SgesvMixedWorkspace),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Builds every shipped strategy in default order.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    build_all(&StrategyKind::ALL)
}

/// Builds the given strategies in order.
#[must_use]
pub fn build_all(kinds: &[StrategyKind]) -> Vec<Box<dyn Strategy>> {
    kinds.iter().map(|kind| kind.build()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_built_strategies_and_serde_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.build().label(), kind.label());
            assert_eq!(kind.label().parse::<StrategyKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            "lapack".parse::<StrategyKind>(),
            Err(UnknownStrategy("lapack".to_string()))
        );
    }

    #[test]
    fn default_order_starts_with_reference() {
        let labels: Vec<_> = default_strategies()
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        assert_eq!(
            labels,
            [
                "reference",
                "gesv",
                "gesv_workspace",
                "gesv_raw",
                "sgesv_mixed",
                "sgesv_mixed_workspace"
            ]
        );
    }
}
