use std::{collections::BTreeMap, f64::consts::PI};

use crate::{
    config::SceneConfig,
    foundation::core::{NodeId, Point, Vec2},
    layout::geometry::GridGeometry,
    topology::model::{Group, Topology},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Named node arrangements, in the order the animation applies them.
pub enum LayoutPhase {
    /// Every clique on its own full-size circle.
    Expanded,
    /// Hub clique compressed and shifted right while the left cliques are built.
    Translated,
    /// Hub clique compressed back at its own centre.
    Compressed,
    /// All nodes shrunk and lined up along one row.
    GridRow,
    /// Row kept; a duplicate of every node lined up along one column.
    GridColumn,
}

impl LayoutPhase {
    /// All phases in temporal order.
    pub const ALL: [LayoutPhase; 5] = [
        LayoutPhase::Expanded,
        LayoutPhase::Translated,
        LayoutPhase::Compressed,
        LayoutPhase::GridRow,
        LayoutPhase::GridColumn,
    ];

    /// Whether nodes are arranged along the grid.
    pub fn is_grid(self) -> bool {
        matches!(self, Self::GridRow | Self::GridColumn)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Circle a clique is placed on in the expanded phase.
pub struct CircleSpec {
    /// Circle centre.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
}

/// Expanded-phase circle of each group.
pub fn circle_for(group: Group) -> CircleSpec {
    let (x, y, radius) = match group {
        Group::Sds => (0.0, 0.0, 2.0),
        Group::Bio => (-3.5, 2.5, 1.0),
        Group::Stat => (-3.5, 0.0, 0.8),
        Group::Mstat => (-3.5, -2.5, 1.0),
        Group::Fam => (3.5, 2.5, 1.0),
        Group::Fr => (3.5, 0.0, 0.9),
        Group::Sfam => (3.5, -2.5, 0.8),
    };
    CircleSpec {
        center: Point::new(x, y),
        radius,
    }
}

/// Angles of the members of a clique of `n` nodes.
///
/// Most groups space their members evenly from angle 0. The hub group reserves the
/// slots at 0 and π for its first two members (the hub pair) on an even number of
/// slots; the remaining members take the other slots in order.
pub fn clique_angles(group: Group, n: usize) -> Vec<f64> {
    if group != Group::Sds {
        return (0..n)
            .map(|k| 2.0 * PI * k as f64 / n as f64)
            .collect();
    }

    let slots = if n % 2 == 0 { n } else { n + 1 };
    let half = slots / 2;
    let mut order = vec![0, half];
    order.extend((1..slots).filter(|&s| s != half));
    order
        .into_iter()
        .take(n)
        .map(|s| 2.0 * PI * s as f64 / slots as f64)
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Target positions of one phase.
pub struct PhaseLayout {
    /// Phase these positions belong to.
    pub phase: LayoutPhase,
    /// Display radius of the nodes in this phase.
    pub node_radius: f64,
    /// One position per node.
    pub positions: BTreeMap<NodeId, Point>,
    /// Positions of the column duplicates (grid-column phase only).
    pub columns: BTreeMap<NodeId, Point>,
    /// Left-to-right row order (grid phases only).
    pub order: Vec<NodeId>,
    /// Grid placement (grid phases only).
    pub grid: Option<GridGeometry>,
}

/// Compute the target positions of `phase`.
///
/// Pure: the same topology and configuration always yield the same layout.
/// `config` is expected to be validated.
#[tracing::instrument(skip(topology, config))]
pub fn layout(phase: LayoutPhase, topology: &Topology, config: &SceneConfig) -> PhaseLayout {
    if phase.is_grid() {
        return grid_layout(phase, topology, config);
    }

    let mut positions = BTreeMap::new();
    for (&group, members) in topology.cliques() {
        let circle = circle_for(group);
        let (scale, shift) = match (group, phase) {
            (Group::Sds, LayoutPhase::Translated) => {
                (config.compress_factor, Vec2::new(config.staging_shift_x, 0.0))
            }
            (Group::Sds, LayoutPhase::Compressed) => (config.compress_factor, Vec2::ZERO),
            _ => (1.0, Vec2::ZERO),
        };
        let angles = clique_angles(group, members.len());
        for (&id, angle) in members.iter().zip(angles) {
            let offset = Vec2::new(angle.cos(), angle.sin()) * (circle.radius * scale);
            positions.insert(id, circle.center + offset + shift);
        }
    }

    PhaseLayout {
        phase,
        node_radius: config.node_radius,
        positions,
        columns: BTreeMap::new(),
        order: Vec::new(),
        grid: None,
    }
}

fn grid_layout(phase: LayoutPhase, topology: &Topology, config: &SceneConfig) -> PhaseLayout {
    let order = topology.row_order();
    let radius = config.grid_node_radius();
    let grid = GridGeometry::new(order.len(), radius, config.grid_origin_y, config.grid_buff);

    let positions = order
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, grid.row_position(i)))
        .collect();
    let columns = if phase == LayoutPhase::GridColumn {
        order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, grid.column_position(i)))
            .collect()
    } else {
        BTreeMap::new()
    };

    PhaseLayout {
        phase,
        node_radius: radius,
        positions,
        columns,
        order,
        grid: Some(grid),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/phases.rs"]
mod tests;
