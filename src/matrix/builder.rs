use std::collections::{BTreeMap, BTreeSet};

use crate::{
    classify::edges::{EdgeClassifier, EdgeType},
    foundation::{
        core::{NodeId, Point},
        error::{CliquenetError, CliquenetResult},
    },
    layout::geometry::GridGeometry,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One drawn matrix cell.
pub struct MatrixCell {
    /// Row index (source node).
    pub row: usize,
    /// Column index (target node).
    pub col: usize,
    /// Relationship type of the pair.
    pub edge_type: EdgeType,
    /// Cell centre on the grid.
    pub center: Point,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Adjacency matrix over a fixed node order.
///
/// Row `i` and column `i` both refer to `order()[i]`. Only connected pairs have a
/// cell; the diagonal never does.
pub struct AdjacencyMatrix {
    order: Vec<NodeId>,
    cells: BTreeMap<(usize, usize), EdgeType>,
}

/// Build the matrix of `ordered_nodes` from the classified edges.
///
/// `ordered_nodes` must be the grid row order so that the matrix rows line up with
/// the drawn row. A node listed twice is rejected.
#[tracing::instrument(skip_all, fields(n = ordered_nodes.len()))]
pub fn build_matrix(
    ordered_nodes: &[NodeId],
    edges: &EdgeClassifier,
) -> CliquenetResult<AdjacencyMatrix> {
    let mut seen = BTreeSet::new();
    for id in ordered_nodes {
        if !seen.insert(*id) {
            return Err(CliquenetError::validation(format!(
                "node {} appears twice in the matrix order",
                id.0
            )));
        }
    }

    let mut cells = BTreeMap::new();
    for (i, &a) in ordered_nodes.iter().enumerate() {
        for (j, &b) in ordered_nodes.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(ty) = edges.get(a, b) {
                cells.insert((i, j), ty);
            }
        }
    }

    tracing::debug!(cells = cells.len(), "adjacency matrix built");
    Ok(AdjacencyMatrix {
        order: ordered_nodes.to_vec(),
        cells,
    })
}

impl AdjacencyMatrix {
    /// Node order shared by rows and columns.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.order.len()
    }

    /// Type of cell `(row, col)`, `None` when blank.
    pub fn get(&self, row: usize, col: usize) -> Option<EdgeType> {
        self.cells.get(&(row, col)).copied()
    }

    /// Index of a node in the order.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.order.iter().position(|&n| n == id)
    }

    /// Drawn cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), EdgeType)> + '_ {
        self.cells.iter().map(|(&k, &t)| (k, t))
    }

    /// Number of drawn cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is drawn.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of drawn cells of one type.
    pub fn count(&self, ty: EdgeType) -> usize {
        self.cells.values().filter(|&&t| t == ty).count()
    }

    /// Drawn cells with their centres on `grid`.
    pub fn placed_cells(&self, grid: &GridGeometry) -> Vec<MatrixCell> {
        self.cells()
            .map(|((row, col), edge_type)| MatrixCell {
                row,
                col,
                edge_type,
                center: grid.cell_center(row, col),
            })
            .collect()
    }

    /// Dense form: `rows()[i][j]` is the type code of cell `(i, j)` or `None`.
    pub fn rows(&self) -> Vec<Vec<Option<u8>>> {
        (0..self.size())
            .map(|i| {
                (0..self.size())
                    .map(|j| self.get(i, j).map(EdgeType::code))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/builder.rs"]
mod tests;
