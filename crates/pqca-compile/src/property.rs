//! Shared state passed between compilation passes.

/// The set of basis gate names a target executes natively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasisGates(Vec<String>);

impl BasisGates {
    /// Create a basis from gate names.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Check whether a gate name is in the basis.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

/// Properties shared across a pass-manager run.
///
/// Transformation passes read these; analysis passes may write them.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Target basis gates, when compiling for a constrained target.
    /// `None` means every standard gate is native (simulators).
    pub basis_gates: Option<BasisGates>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_gates() {
        let basis = BasisGates::new(["cx", "rz", "h"]);
        assert!(basis.contains("cx"));
        assert!(!basis.contains("swap"));
    }
}
