use std::collections::BTreeMap;

use crate::{
    classify::edges::{EdgeClassifier, EdgeKey},
    foundation::{
        core::{NodeId, Point},
        error::{CliquenetError, CliquenetResult},
    },
};

/// Endpoints closer than this are treated as coincident.
const MIN_EDGE_LEN: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A straight line segment.
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Segment between two node centres, pulled in by each node's radius so the
/// line touches the node boundaries.
pub fn edge_segment(a: Point, b: Point, radius_a: f64, radius_b: f64) -> CliquenetResult<Segment> {
    let d = b - a;
    let len = d.hypot();
    if !len.is_finite() || len < MIN_EDGE_LEN {
        return Err(CliquenetError::degenerate(format!(
            "edge endpoints coincide at ({:.4}, {:.4})",
            a.x, a.y
        )));
    }
    let unit = d / len;
    Ok(Segment {
        start: a + unit * radius_a,
        end: b - unit * radius_b,
    })
}

/// Geometry of every classified edge whose endpoints both have a position.
///
/// A coincident pair aborts the whole computation.
pub fn edge_geometry(
    positions: &BTreeMap<NodeId, Point>,
    edges: &EdgeClassifier,
    radius: f64,
) -> CliquenetResult<BTreeMap<EdgeKey, Segment>> {
    let mut out = BTreeMap::new();
    for (key, _) in edges.edges() {
        let (Some(&a), Some(&b)) = (positions.get(&key.a()), positions.get(&key.b())) else {
            continue;
        };
        out.insert(key, edge_segment(a, b, radius, radius)?);
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Placement of the grid row, the grid column, the grid lines and the matrix cells.
///
/// Row node `i` sits at `(x0 + (i+1)·cell, y0)`, column node `i` at
/// `(x0, y0 - (i+1)·cell)`. The grid lines are pulled in by half the outset so
/// they frame the cells, not the nodes; cells stay on the node grid.
pub struct GridGeometry {
    /// Number of nodes along each axis.
    pub size: usize,
    /// Cell edge length (one grid-node diameter).
    pub cell: f64,
    /// Horizontal anchor of the column.
    pub x0: f64,
    /// Vertical anchor of the row.
    pub y0: f64,
    /// Left grid bound.
    pub left: f64,
    /// Right grid bound.
    pub right: f64,
    /// Top grid bound.
    pub top: f64,
    /// Bottom grid bound.
    pub bottom: f64,
}

impl GridGeometry {
    /// Grid for `size` nodes of radius `node_radius`, row at `origin_y`, lines outset by
    /// `buff` cells.
    pub fn new(size: usize, node_radius: f64, origin_y: f64, buff: f64) -> Self {
        let cell = 2.0 * node_radius;
        let span = cell * size as f64;
        let x0 = -span / 2.0 + cell / 2.0;
        let y0 = origin_y;
        let offset = buff * cell;
        let steps = (size + 1) as f64;
        Self {
            size,
            cell,
            x0,
            y0,
            left: x0 + offset / 2.0,
            right: x0 + steps * cell - offset / 2.0,
            top: y0 - offset / 2.0,
            bottom: y0 - steps * cell + offset / 2.0,
        }
    }

    /// Centre of row node `i`.
    pub fn row_position(&self, i: usize) -> Point {
        Point::new(self.x0 + (i + 1) as f64 * self.cell, self.y0)
    }

    /// Centre of column node `i`.
    pub fn column_position(&self, i: usize) -> Point {
        Point::new(self.x0, self.y0 - (i + 1) as f64 * self.cell)
    }

    /// Centre of matrix cell `(row, col)`: under row node `row`, level with column
    /// node `col`, whatever the grid-line outset.
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        Point::new(self.row_position(row).x, self.column_position(col).y)
    }

    /// `size + 1` vertical lines followed by `size + 1` horizontal lines.
    pub fn lines(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(2 * (self.size + 1));
        for k in 0..=self.size {
            let x = self.left + k as f64 * self.cell;
            out.push(Segment {
                start: Point::new(x, self.top),
                end: Point::new(x, self.bottom),
            });
        }
        for k in 0..=self.size {
            let y = self.top - k as f64 * self.cell;
            out.push(Segment {
                start: Point::new(self.left, y),
                end: Point::new(self.right, y),
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
