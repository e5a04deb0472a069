//! The layout pipeline as an ordered list of stages.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::model::HierarchyModel;
use crate::{acyclic, normalize, order, position, rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CycleRemoval,
    /// Longest-path layering followed by dummy-chain insertion.
    Layering,
    CrossingReduction,
    CoordinateAssignment,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::CycleRemoval => "cycle-removal",
            Stage::Layering => "layering",
            Stage::CrossingReduction => "crossing-reduction",
            Stage::CoordinateAssignment => "coordinate-assignment",
        }
    }

    pub fn run(self, model: &mut HierarchyModel, config: &LayoutConfig) -> Result<()> {
        match self {
            Stage::CycleRemoval => acyclic::run(model),
            Stage::Layering => {
                rank::run(model)?;
                normalize::run(model)?;
            }
            Stage::CrossingReduction => order::run(model, config),
            Stage::CoordinateAssignment => position::run(model, config),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Cycle removal, layering, crossing reduction, coordinate assignment.
    pub fn standard() -> Self {
        Self::new(vec![
            Stage::CycleRemoval,
            Stage::Layering,
            Stage::CrossingReduction,
            Stage::CoordinateAssignment,
        ])
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Runs the stages in order; the first failing stage aborts the run.
    pub fn run(&self, model: &mut HierarchyModel, config: &LayoutConfig) -> Result<()> {
        for stage in &self.stages {
            let _span = tracing::debug_span!("stage", name = stage.name()).entered();
            stage.run(model, config)?;
        }
        Ok(())
    }
}
