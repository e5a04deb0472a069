//! Mapping between the canonical layout frame and the host frame.
//!
//! Every stage works top-down: layers grow along +y and the cross axis is x. East/west
//! orientations swap the axes on the way in and out; south/east mirror the layer axis.

use crate::config::Orientation;
use lamina_graph::{Point, Rect};

/// Host `(width, height)` as canonical `(cross, along)` sizes.
pub fn canonical_size(orientation: Orientation, width: f64, height: f64) -> (f64, f64) {
    if orientation.is_horizontal() {
        (height, width)
    } else {
        (width, height)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Frame {
    orientation: Orientation,
    layer_extent: f64,
    border: f64,
}

impl Frame {
    /// `layer_extent` is the canonical size of the drawing along the layer axis.
    pub fn new(orientation: Orientation, layer_extent: f64, border: f64) -> Self {
        Self {
            orientation,
            layer_extent,
            border,
        }
    }

    pub fn point(&self, p: Point) -> Point {
        let along = if self.orientation.is_mirrored() {
            self.layer_extent - p.y
        } else {
            p.y
        };
        let (x, y) = if self.orientation.is_horizontal() {
            (along, p.x)
        } else {
            (p.x, along)
        };
        Point::new(x + self.border, y + self.border)
    }

    /// Host rectangle of a node centred at canonical `center`.
    pub fn rect(&self, center: Point, cross: f64, along: f64) -> Rect {
        let c = self.point(center);
        let (width, height) = if self.orientation.is_horizontal() {
            (along, cross)
        } else {
            (cross, along)
        };
        Rect::new(c.x - width / 2.0, c.y - height / 2.0, width, height)
    }
}
