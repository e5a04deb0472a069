//! Layout configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where the roots of the hierarchy are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Roots on top, layers grow downwards.
    #[default]
    North,
    /// Roots at the bottom, layers grow upwards.
    South,
    /// Roots on the right, layers grow leftwards.
    East,
    /// Roots on the left, layers grow rightwards.
    West,
}

impl Orientation {
    /// Whether layers run along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::East | Orientation::West)
    }

    /// Whether the layer axis runs against the canonical (downward / rightward) direction.
    pub fn is_mirrored(self) -> bool {
        matches!(self, Orientation::South | Orientation::East)
    }
}

impl std::str::FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Self::North),
            "south" | "s" => Ok(Self::South),
            "east" | "e" => Ok(Self::East),
            "west" | "w" => Ok(Self::West),
            other => Err(Error::InvalidConfig {
                message: format!("unknown orientation `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Minimum gap between neighbouring cells of one layer.
    pub intra_cell_spacing: f64,
    /// Gap between adjacent layers.
    pub inter_rank_cell_spacing: f64,
    /// Gap between disconnected hierarchies and between swimlanes.
    pub inter_hierarchy_spacing: f64,
    /// Cross-axis offset between the members of a merged parallel edge.
    pub parallel_edge_spacing: f64,
    pub fine_tuning: bool,
    pub tighten_to_source: bool,
    /// Leave edges as straight lines instead of writing waypoints.
    pub disable_edge_style: bool,
    pub resize_parent: bool,
    pub parent_border: f64,
    /// Treat the child groups of the layout parent as swimlanes.
    pub swimlanes: bool,
    /// Explicit root vertices. When unset, roots are discovered from in-degrees.
    pub roots: Option<Vec<String>>,
    /// Upper bound on crossing-reducer sweeps. The loop stops sooner once no crossings are
    /// left or two sweeps in a row fail to improve the best ordering.
    pub max_iterations: usize,
    /// Sweep budget of the priority placement in coordinate assignment.
    pub max_position_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::North,
            intra_cell_spacing: 30.0,
            inter_rank_cell_spacing: 100.0,
            inter_hierarchy_spacing: 60.0,
            parallel_edge_spacing: 10.0,
            fine_tuning: true,
            tighten_to_source: true,
            disable_edge_style: false,
            resize_parent: false,
            parent_border: 0.0,
            swimlanes: false,
            roots: None,
            max_iterations: 24,
            max_position_iterations: 8,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let spacings = [
            ("intraCellSpacing", self.intra_cell_spacing),
            ("interRankCellSpacing", self.inter_rank_cell_spacing),
            ("interHierarchySpacing", self.inter_hierarchy_spacing),
            ("parallelEdgeSpacing", self.parallel_edge_spacing),
            ("parentBorder", self.parent_border),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        Ok(())
    }
}
