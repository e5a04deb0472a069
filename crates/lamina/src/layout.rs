//! Orchestration: running the pipeline and writing results back inside one host transaction.

use crate::build::build;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::model::HierarchyModel;
use crate::pipeline::Pipeline;
use crate::result::LayoutResult;
use lamina_graph::{Graph, Rect};

/// A layout strategy that can be applied to a host graph.
pub trait GraphLayout {
    /// Lays out the children of `parent` (or the top-level cells) and writes the result back.
    fn execute(&self, graph: &mut Graph, parent: Option<&str>) -> Result<()>;

    /// Moves one cell to `(x, y)` without running the full layout.
    fn move_cell(&self, graph: &mut Graph, cell: &str, x: f64, y: f64) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct HierarchicalLayout {
    config: LayoutConfig,
    pipeline: Pipeline,
}

impl HierarchicalLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::standard(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Builds the hierarchy model and runs every pipeline stage over it.
    pub fn layout_model(&self, graph: &Graph, parent: Option<&str>) -> Result<HierarchyModel> {
        self.config.validate()?;
        let mut model = build(graph, parent, &self.config)?;
        self.pipeline.run(&mut model, &self.config)?;
        Ok(model)
    }

    /// Computes the layout without touching the graph.
    pub fn run(&self, graph: &Graph, parent: Option<&str>) -> Result<LayoutResult> {
        let model = self.layout_model(graph, parent)?;
        Ok(LayoutResult::from_model(&model, &self.config))
    }

    /// Writes `result` into `graph`. Vertices inside a swimlane are stored relative to it.
    pub fn apply(&self, graph: &mut Graph, parent: Option<&str>, result: &LayoutResult) -> Result<()> {
        for (lane, rect) in &result.lanes {
            graph.set_geometry(lane, *rect)?;
        }

        for (cell, rect) in &result.vertices {
            let lane = graph
                .vertex(cell)
                .and_then(|v| v.parent())
                .and_then(|p| result.lanes.get(p))
                .copied();
            let rect = match lane {
                Some(lane) => rect.with_origin(rect.x - lane.x, rect.y - lane.y),
                None => *rect,
            };
            graph.set_geometry(cell, rect)?;
        }

        for (cell, points) in &result.edges {
            graph.set_points(cell, points.clone())?;
        }

        if self.config.resize_parent {
            if let Some(p) = parent {
                let Some(current) = graph.vertex(p).map(|v| v.geometry()) else {
                    return Err(Error::UnknownParent { id: p.to_string() });
                };
                graph.set_geometry(
                    p,
                    Rect::new(current.x, current.y, result.width, result.height),
                )?;
            }
        }
        Ok(())
    }
}

impl GraphLayout for HierarchicalLayout {
    fn execute(&self, graph: &mut Graph, parent: Option<&str>) -> Result<()> {
        let mut graph = graph.batch();
        let result = self.run(&graph, parent)?;
        self.apply(&mut graph, parent, &result)?;
        tracing::debug!(
            vertices = result.vertices.len(),
            edges = result.edges.len(),
            "hierarchical layout applied"
        );
        Ok(())
    }

    fn move_cell(&self, graph: &mut Graph, cell: &str, x: f64, y: f64) -> Result<()> {
        move_geometry(graph, cell, x, y)
    }
}

fn move_geometry(graph: &mut Graph, cell: &str, x: f64, y: f64) -> Result<()> {
    let Some(geometry) = graph.vertex(cell).map(|v| v.geometry()) else {
        return Err(Error::UnknownVertex {
            id: cell.to_string(),
        });
    };
    let mut graph = graph.batch();
    graph.set_geometry(cell, geometry.with_origin(x, y))?;
    Ok(())
}

/// Runs several layouts back to back inside one shared transaction.
///
/// Single-cell moves go to the master layout, or to the first layout when no master is set.
pub struct CompositeLayout {
    layouts: Vec<Box<dyn GraphLayout>>,
    master: Option<usize>,
}

impl std::fmt::Debug for CompositeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeLayout")
            .field("layouts", &self.layouts.len())
            .field("master", &self.master)
            .finish()
    }
}

impl CompositeLayout {
    pub fn new(layouts: Vec<Box<dyn GraphLayout>>) -> Self {
        Self {
            layouts,
            master: None,
        }
    }

    pub fn with_master(mut self, index: usize) -> Self {
        self.master = Some(index);
        self
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// The layout that handles [`GraphLayout::move_cell`].
    pub fn master(&self) -> Result<&dyn GraphLayout> {
        let index = self.master.unwrap_or(0);
        match self.layouts.get(index) {
            Some(layout) => Ok(layout.as_ref()),
            None if self.layouts.is_empty() => Err(Error::EmptyComposite),
            None => Err(Error::InvalidMaster {
                index,
                len: self.layouts.len(),
            }),
        }
    }
}

impl GraphLayout for CompositeLayout {
    fn execute(&self, graph: &mut Graph, parent: Option<&str>) -> Result<()> {
        if self.layouts.is_empty() {
            return Err(Error::EmptyComposite);
        }
        let mut graph = graph.batch();
        for layout in &self.layouts {
            layout.execute(&mut graph, parent)?;
        }
        Ok(())
    }

    fn move_cell(&self, graph: &mut Graph, cell: &str, x: f64, y: f64) -> Result<()> {
        self.master()?.move_cell(graph, cell, x, y)
    }
}
