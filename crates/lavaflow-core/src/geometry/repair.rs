//! Geometry repair.
//!
//! Repair is an ordered list of strategies. Each strategy receives the output
//! of the one before it, and the first output that validates is returned.
//! Exhausting the list yields [`RepairOutcome::Unrepairable`], a normal value
//! the caller turns into a dropped record.

use crate::geometry::FlowGeometry;

/// A single repair transform
pub trait RepairStrategy: Send + Sync {
    /// Stable name used in diagnostics
    fn name(&self) -> &'static str;

    fn apply(&self, geometry: &FlowGeometry) -> FlowGeometry;
}

/// Ring-level rebuild resolving self-intersections
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeValid;

impl RepairStrategy for MakeValid {
    fn name(&self) -> &'static str {
        "make_valid"
    }

    fn apply(&self, geometry: &FlowGeometry) -> FlowGeometry {
        geometry.make_valid()
    }
}

/// Zero-distance buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferZero;

impl RepairStrategy for BufferZero {
    fn name(&self) -> &'static str {
        "buffer_zero"
    }

    fn apply(&self, geometry: &FlowGeometry) -> FlowGeometry {
        geometry.buffer_zero()
    }
}

/// Result of running a [`RepairPlan`]
#[derive(Debug, Clone, PartialEq)]
pub enum RepairOutcome {
    /// Input was valid and is returned untouched
    AlreadyValid(FlowGeometry),
    /// A strategy produced a valid geometry
    Repaired {
        geometry: FlowGeometry,
        strategy: &'static str,
    },
    /// Every strategy left the geometry invalid
    Unrepairable,
}

impl RepairOutcome {
    /// The valid geometry, if any
    pub fn into_geometry(self) -> Option<FlowGeometry> {
        match self {
            RepairOutcome::AlreadyValid(g) => Some(g),
            RepairOutcome::Repaired { geometry, .. } => Some(geometry),
            RepairOutcome::Unrepairable => None,
        }
    }

    pub fn is_unrepairable(&self) -> bool {
        matches!(self, RepairOutcome::Unrepairable)
    }
}

/// Ordered repair strategies
pub struct RepairPlan {
    strategies: Vec<Box<dyn RepairStrategy>>,
}

impl RepairPlan {
    pub fn new(strategies: Vec<Box<dyn RepairStrategy>>) -> Self {
        Self { strategies }
    }

    /// A plan that never repairs anything: invalid input is unrepairable
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Return `geometry` if valid, otherwise the first valid strategy output.
    pub fn repair(&self, geometry: FlowGeometry) -> RepairOutcome {
        if geometry.is_valid() {
            return RepairOutcome::AlreadyValid(geometry);
        }

        let mut current = geometry;
        for strategy in &self.strategies {
            current = strategy.apply(&current);
            if current.is_valid() {
                return RepairOutcome::Repaired {
                    geometry: current,
                    strategy: strategy.name(),
                };
            }
            tracing::debug!(
                strategy = strategy.name(),
                "Repair strategy left geometry invalid"
            );
        }
        RepairOutcome::Unrepairable
    }
}

impl Default for RepairPlan {
    /// make-valid, then zero-distance buffer
    fn default() -> Self {
        Self::new(vec![Box::new(MakeValid), Box::new(BufferZero)])
    }
}

impl std::fmt::Debug for RepairPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairPlan")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

/// Repair with the default plan
pub fn repair(geometry: FlowGeometry) -> RepairOutcome {
    RepairPlan::default().repair(geometry)
}
