//! The multi-clique explainer as a declarative [`Timeline`].
//!
//! Reading order of the animation:
//!
//! 1. the hub pair and the rest of the hub clique grow on their full circle;
//! 2. the hub clique is compressed and parked on the right while the left labs grow;
//! 3. lab cross-links are drawn and the hub clique returns to the centre;
//! 4. the personal circles grow on the right and the hub links to each of their members;
//! 5. picture nodes become plain discs, nodes are coloured by side, by clique, then grey;
//! 6. edges are coloured by type, legends shown, then everything but the nodes fades;
//! 7. nodes shrink onto a row, duplicates fall onto a column, the grid and its cells appear.

use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    assets::NodeVisual,
    classify::edges::{EdgeClassifier, EdgeKey, EdgeType},
    config::SceneConfig,
    foundation::{
        core::{NodeId, Point, Rgb8, Vec2},
        error::{CliquenetError, CliquenetResult},
    },
    layout::{
        geometry::{Segment, edge_segment},
        phases::{LayoutPhase, PhaseLayout, circle_for, layout},
    },
    matrix::builder::build_matrix,
    palette,
    script::model::{Phase, Property, Target, Timeline},
    topology::model::{Group, Side, Topology},
};

const LEGEND_Y: f64 = -3.6;
const LEGEND_SPACING: f64 = 3.0;
const TITLE_GAP: f64 = 1.5;

/// Seconds to reveal one node, and to draw one of its edges, while a clique grows.
fn growth_timing(group: Group) -> (f64, f64) {
    match group {
        Group::Sds => (0.4, 0.25),
        Group::Bio => (0.2, 0.1),
        Group::Fr => (0.4, 0.18),
        _ => (0.4, 0.2),
    }
}

fn label_offset(group: Group) -> Vec2 {
    match group.side() {
        Side::Middle => Vec2::new(0.0, 0.3),
        Side::Left => Vec2::new(-0.45, 0.0),
        Side::Right => Vec2::new(0.45, 0.0),
    }
}

/// Caption anchor of a clique. The hub caption sits above its compressed circle,
/// `x` is where that circle currently is.
fn title_position(group: Group, hub_x: f64, cfg: &SceneConfig) -> Point {
    let circle = circle_for(group);
    match group.side() {
        Side::Middle => Point::new(hub_x, circle.radius * cfg.compress_factor * 1.5 + 0.3),
        Side::Left => {
            let anchor = circle_for(Group::Bio);
            Point::new(anchor.center.x - anchor.radius - TITLE_GAP, circle.center.y)
        }
        Side::Right => {
            let anchor = circle_for(Group::Fam);
            Point::new(anchor.center.x + anchor.radius + TITLE_GAP, circle.center.y)
        }
    }
}

fn legend_position(ty: EdgeType) -> Point {
    Point::new((f64::from(ty.code()) - 2.5) * LEGEND_SPACING, LEGEND_Y)
}

fn at(l: &PhaseLayout, id: NodeId) -> CliquenetResult<Point> {
    l.positions.get(&id).copied().ok_or_else(|| {
        CliquenetError::validation(format!(
            "{:?} layout has no position for node {}",
            l.phase, id.0
        ))
    })
}

struct Stage<'a> {
    topo: &'a Topology,
    edges: &'a EdgeClassifier,
    cfg: &'a SceneConfig,
    positions: BTreeMap<NodeId, Point>,
    visuals: BTreeMap<NodeId, NodeVisual>,
    drawn: Vec<EdgeKey>,
    timeline: Timeline,
}

impl<'a> Stage<'a> {
    fn new(topo: &'a Topology, edges: &'a EdgeClassifier, cfg: &'a SceneConfig) -> Self {
        Self {
            topo,
            edges,
            cfg,
            positions: BTreeMap::new(),
            visuals: BTreeMap::new(),
            drawn: Vec::new(),
            timeline: Timeline::default(),
        }
    }

    fn label(&self, id: NodeId) -> &'a str {
        self.topo.label(id)
    }

    fn edge_name(&self, key: EdgeKey) -> String {
        format!("{}-{}", self.label(key.a()), self.label(key.b()))
    }

    fn place(&mut self, phase: &mut Phase, id: NodeId, pos: Point) {
        phase.push(Target::Node(id), Property::Position(pos));
        if self.cfg.show_labels {
            let group = self.topo.group_of(id).unwrap_or(Group::Sds);
            phase.push(Target::Label(id), Property::Position(pos + label_offset(group)));
        }
        self.positions.insert(id, pos);
    }

    fn reveal(&mut self, id: NodeId, pos: Point, run_time_s: f64) -> Phase {
        let assets_dir = self.cfg.assets_dir.as_deref().map(std::path::Path::new);
        let visual = NodeVisual::select(self.label(id), assets_dir, self.cfg.node_radius_image);
        let mut phase = Phase::new(format!("node.{}", self.label(id)), run_time_s)
            .set(Target::Node(id), Property::Visual(visual.clone()))
            .set(Target::Node(id), Property::Radius(visual.radius()))
            .set(Target::Node(id), Property::Fill(palette::NEUTRAL));
        self.place(&mut phase, id, pos);
        phase.push(Target::Node(id), Property::Opacity(1.0));
        if self.cfg.show_labels {
            phase.push(Target::Label(id), Property::Opacity(1.0));
        }
        self.visuals.insert(id, visual);
        phase
    }

    fn segment(&self, key: EdgeKey) -> CliquenetResult<Segment> {
        let endpoint = |id: NodeId| {
            self.positions.get(&id).copied().ok_or_else(|| {
                CliquenetError::validation(format!(
                    "edge {} drawn before node {} is placed",
                    self.edge_name(key),
                    self.label(id)
                ))
            })
        };
        let r = self.cfg.node_radius;
        edge_segment(endpoint(key.a())?, endpoint(key.b())?, r, r).map_err(|e| {
            tracing::warn!(edge = %self.edge_name(key), "edge has no direction");
            e
        })
    }

    fn draw_edge(&mut self, key: EdgeKey, run_time_s: f64) -> CliquenetResult<()> {
        let seg = self.segment(key)?;
        let phase = Phase::new(format!("edge.{}", self.edge_name(key)), run_time_s)
            .set(Target::Edge(key), Property::Segment(seg))
            .set(Target::Edge(key), Property::Fill(palette::INK))
            .set(Target::Edge(key), Property::Opacity(self.cfg.edge_opacity));
        self.timeline.push(phase);
        self.drawn.push(key);
        Ok(())
    }

    /// Move nodes and put every drawn edge touching them on its new endpoints.
    fn move_nodes(
        &mut self,
        name: &str,
        run_time_s: f64,
        targets: &[(NodeId, Point)],
    ) -> CliquenetResult<Phase> {
        let mut phase = Phase::new(name, run_time_s);
        for &(id, pos) in targets {
            self.place(&mut phase, id, pos);
        }
        for key in self.drawn.clone() {
            if targets.iter().any(|&(id, _)| key.touches(id)) {
                phase.push(Target::Edge(key), Property::Segment(self.segment(key)?));
            }
        }
        Ok(phase)
    }

    fn grow_clique(
        &mut self,
        group: Group,
        from: usize,
        expanded: &PhaseLayout,
    ) -> CliquenetResult<()> {
        let (node_run, edge_run) = growth_timing(group);
        let members = self.topo.clique(group).to_vec();
        for k in from..members.len() {
            let id = members[k];
            let phase = self.reveal(id, at(expanded, id)?, node_run).hold(0.2);
            self.timeline.push(phase);
            for &prev in &members[..k] {
                if let Some(key) = EdgeKey::new(prev, id) {
                    self.draw_edge(key, edge_run)?;
                }
            }
            self.timeline.hold(0.2);
        }
        Ok(())
    }

    fn hub_pair(&mut self, expanded: &PhaseLayout) -> CliquenetResult<()> {
        let members = self.topo.clique(Group::Sds).to_vec();
        let Some(&hub) = members.first() else {
            return Ok(());
        };
        let phase = self.reveal(hub, Point::ORIGIN, 0.5).hold(2.0);
        self.timeline.push(phase);
        let phase = self
            .move_nodes("hub.place", 0.8, &[(hub, at(expanded, hub)?)])?
            .hold(1.0);
        self.timeline.push(phase);

        let Some(&partner) = members.get(1) else {
            return Ok(());
        };
        let target = at(expanded, partner)?;
        let phase = self.reveal(partner, target - Vec2::new(2.0, 0.0), 0.5);
        self.timeline.push(phase);
        let phase = self
            .move_nodes("partner.place", 0.8, &[(partner, target)])?
            .hold(1.0);
        self.timeline.push(phase);

        if let Some(key) = EdgeKey::new(hub, partner) {
            self.draw_edge(key, 0.5)?;
            self.timeline.hold(1.0);
        }
        Ok(())
    }

    fn show_title(&mut self, group: Group, pos: Point, hold_s: f64) {
        let phase = Phase::new(format!("title.{}", group.title()), 0.5)
            .hold(hold_s)
            .set(Target::Title(group), Property::Position(pos))
            .set(Target::Title(group), Property::Fill(palette::INK))
            .set(Target::Title(group), Property::Opacity(1.0));
        self.timeline.push(phase);
    }

    fn clique_moves(
        &self,
        group: Group,
        l: &PhaseLayout,
    ) -> CliquenetResult<Vec<(NodeId, Point)>> {
        self.topo
            .clique(group)
            .iter()
            .map(|&id| Ok((id, at(l, id)?)))
            .collect()
    }

    fn recolor_nodes(
        &mut self,
        prefix: &str,
        run_time_s: f64,
        hold_s: f64,
        color: impl Fn(Group) -> Rgb8,
    ) {
        let topo = self.topo;
        for node in topo.nodes() {
            let phase = Phase::new(format!("{prefix}.{}", node.label), run_time_s)
                .set(Target::Node(node.id), Property::Fill(color(node.group)));
            self.timeline.push(phase);
        }
        self.timeline.hold(hold_s);
    }

    fn substitute_images(&mut self) {
        let mut phase = Phase::new("nodes.substitute", 1.5).hold(2.0);
        for (&id, visual) in &mut self.visuals {
            if !visual.is_image() {
                continue;
            }
            *visual = NodeVisual::Shape {
                color: palette::NEUTRAL,
                radius: self.cfg.node_radius,
            };
            phase.push(Target::Node(id), Property::Visual(visual.clone()));
            phase.push(Target::Node(id), Property::Radius(self.cfg.node_radius));
        }
        if !phase.directives.is_empty() {
            self.timeline.push(phase);
        }
    }

    fn recolor_edges_by_type(&mut self) {
        for ty in EdgeType::ALL {
            let keys: Vec<EdgeKey> = self
                .drawn
                .iter()
                .copied()
                .filter(|&k| self.edges.get(k.a(), k.b()) == Some(ty))
                .collect();
            for key in keys {
                let phase = Phase::new(format!("recolor.edge.{}", self.edge_name(key)), 0.05)
                    .set(Target::Edge(key), Property::Fill(palette::edge_color(ty)));
                self.timeline.push(phase);
            }
            self.timeline
                .hold(if ty == EdgeType::IntraLab { 2.0 } else { 0.5 });
        }
        self.timeline.push(Phase::wait(5.0));
    }

    fn legends(&self, name: &str, hold_s: f64) -> Phase {
        let mut phase = Phase::new(name, 0.5).hold(hold_s);
        for ty in EdgeType::ALL {
            phase.push(Target::Legend(ty), Property::Position(legend_position(ty)));
            phase.push(Target::Legend(ty), Property::Fill(palette::edge_color(ty)));
            phase.push(Target::Legend(ty), Property::Opacity(1.0));
        }
        phase
    }

    fn fade_out_overlays(&mut self) {
        let mut edges = Phase::new("edges.fade", 0.5);
        for &key in &self.drawn {
            edges.push(Target::Edge(key), Property::Opacity(0.0));
        }
        self.timeline.push(edges);

        let mut legends = Phase::new("legends.fade", 0.5);
        for ty in EdgeType::ALL {
            legends.push(Target::Legend(ty), Property::Opacity(0.0));
        }
        self.timeline.push(legends);

        let mut text = Phase::new("text.fade", 0.5);
        for &group in self.topo.cliques().keys() {
            text.push(Target::Title(group), Property::Opacity(0.0));
        }
        if self.cfg.show_labels {
            for node in self.topo.nodes() {
                text.push(Target::Label(node.id), Property::Opacity(0.0));
            }
        }
        self.timeline.push(text);
    }

    fn matrix(&mut self, row: &PhaseLayout, column: &PhaseLayout) -> CliquenetResult<()> {
        let mut shrink = Phase::new("nodes.shrink", 0.5);
        for node in self.topo.nodes() {
            shrink.push(Target::Node(node.id), Property::Radius(row.node_radius));
        }
        self.timeline.push(shrink);

        let mut moves = Vec::with_capacity(row.order.len());
        for &id in &row.order {
            moves.push((id, at(row, id)?));
        }
        let mut phase = Phase::new("grid.row", 1.0);
        for (id, pos) in moves {
            phase.push(Target::Node(id), Property::Position(pos));
            self.positions.insert(id, pos);
        }
        self.timeline.push(phase);

        let mut spawn = Phase::new("grid.column.spawn", 0.0).ease(Ease::Step);
        let mut fall = Phase::new("grid.column", 1.0);
        for &id in &column.order {
            let group = self.topo.group_of(id).unwrap_or(Group::Sds);
            let target = Target::ColumnNode(id);
            spawn.push(target, Property::Position(at(column, id)?));
            spawn.push(target, Property::Radius(column.node_radius));
            spawn.push(target, Property::Fill(palette::group_color(group)));
            spawn.push(target, Property::Opacity(1.0));
            let dest = column.columns.get(&id).copied().ok_or_else(|| {
                CliquenetError::validation(format!("no column slot for node {}", id.0))
            })?;
            fall.push(target, Property::Position(dest));
        }
        self.timeline.push(spawn);
        self.timeline.push(fall);

        let grid = column
            .grid
            .ok_or_else(|| CliquenetError::validation("grid-column layout has no grid"))?;
        let mut lines = Phase::new("grid.lines", 1.0);
        for (k, seg) in grid.lines().into_iter().enumerate() {
            lines.push(Target::GridLine(k), Property::Segment(seg));
            lines.push(Target::GridLine(k), Property::Fill(palette::NEUTRAL));
            lines.push(Target::GridLine(k), Property::Opacity(1.0));
        }
        self.timeline.push(lines);

        let matrix = build_matrix(&row.order, self.edges)?;
        for cell in matrix.placed_cells(&grid) {
            let target = Target::Cell(cell.row, cell.col);
            let phase = Phase::new(format!("cell.{}.{}", cell.row, cell.col), 0.01)
                .set(target, Property::Position(cell.center))
                .set(target, Property::Radius(grid.cell / 2.0))
                .set(target, Property::Fill(palette::INK))
                .set(target, Property::Opacity(1.0));
            self.timeline.push(phase);
        }
        self.timeline.hold(2.0);

        for ty in EdgeType::ALL {
            let mut phase = Phase::new(format!("matrix.recolor.{}", ty.name()), 0.01);
            for ((row, col), cell_ty) in matrix.cells() {
                if cell_ty == ty {
                    phase.push(Target::Cell(row, col), Property::Fill(palette::edge_color(ty)));
                }
            }
            self.timeline.push(phase);
        }
        Ok(())
    }
}

/// Build the whole choreography for `topology`.
///
/// Every edge drawn is one of `edges`, and the matrix cells are built over the
/// grid-row order, so the colour of an edge and of its two cells always agree.
#[tracing::instrument(skip_all, fields(nodes = topology.node_count(), edges = edges.len()))]
pub fn build_timeline(
    topology: &Topology,
    edges: &EdgeClassifier,
    config: &SceneConfig,
) -> CliquenetResult<Timeline> {
    config.validate()?;
    let expanded = layout(LayoutPhase::Expanded, topology, config);
    let translated = layout(LayoutPhase::Translated, topology, config);
    let compressed = layout(LayoutPhase::Compressed, topology, config);
    let row = layout(LayoutPhase::GridRow, topology, config);
    let column = layout(LayoutPhase::GridColumn, topology, config);

    let mut st = Stage::new(topology, edges, config);

    st.hub_pair(&expanded)?;
    st.grow_clique(Group::Sds, 2, &expanded)?;
    let moves = st.clique_moves(Group::Sds, &translated)?;
    let phase = st.move_nodes("sds.stage", 1.0, &moves)?.hold(0.3);
    st.timeline.push(phase);
    st.show_title(
        Group::Sds,
        title_position(Group::Sds, config.staging_shift_x, config),
        2.0,
    );

    let left = [Group::Bio, Group::Stat, Group::Mstat];
    let right = [Group::Fam, Group::Fr, Group::Sfam];
    for group in left {
        st.grow_clique(group, 0, &expanded)?;
    }
    for group in left.into_iter().filter(|g| !topology.clique(*g).is_empty()) {
        st.show_title(group, title_position(group, 0.0, config), 0.5);
    }
    st.timeline.hold(1.5);

    for &(a, b) in topology.cross_links() {
        if let Some(key) = EdgeKey::new(a, b) {
            st.draw_edge(key, 0.1)?;
        }
    }
    st.timeline.hold(2.0);

    let moves = st.clique_moves(Group::Sds, &compressed)?;
    let phase = st
        .move_nodes("sds.center", 1.0, &moves)?
        .hold(0.5)
        .set(
            Target::Title(Group::Sds),
            Property::Position(title_position(Group::Sds, 0.0, config)),
        );
    st.timeline.push(phase);

    for group in right {
        st.grow_clique(group, 0, &expanded)?;
        if !topology.clique(group).is_empty() {
            st.show_title(group, title_position(group, 0.0, config), 0.5);
        }
    }
    st.timeline.hold(1.5);

    let hub = topology.hub();
    for node in topology.right_hand_nodes() {
        if let Some(key) = EdgeKey::new(hub, node) {
            st.draw_edge(key, 0.3)?;
            st.timeline.hold(0.1);
        }
    }

    st.substitute_images();
    st.recolor_nodes("recolor.side", 0.1, 2.5, |g| palette::side_color(g.side()));
    st.recolor_nodes("recolor.clique", 0.1, 2.5, palette::group_color);
    st.recolor_nodes("recolor.neutral", 0.05, 2.0, |_| palette::NEUTRAL);
    st.recolor_edges_by_type();
    st.recolor_nodes("recolor.clique", 0.1, 2.5, palette::group_color);
    let legends = st.legends("legends.show", 3.0);
    st.timeline.push(legends);
    st.fade_out_overlays();
    st.matrix(&row, &column)?;
    let legends = st.legends("legends.final", 5.0);
    st.timeline.push(legends);

    tracing::debug!(
        phases = st.timeline.len(),
        duration_s = st.timeline.duration_s(),
        "timeline built"
    );
    Ok(st.timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/script/build.rs"]
mod tests;
