use super::*;
use crate::{
    config::SceneConfig,
    layout::phases::{LayoutPhase, layout},
    topology::{
        dsl::TopologyBuilder,
        model::{Group, Topology, build_network},
    },
};

fn reference() -> (Topology, EdgeClassifier, AdjacencyMatrix) {
    let topo = build_network().unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let matrix = build_matrix(&topo.row_order(), &edges).unwrap();
    (topo, edges, matrix)
}

#[test]
fn cells_agree_with_classifier_everywhere() {
    let (_, edges, matrix) = reference();
    let order = matrix.order().to_vec();
    for (i, &a) in order.iter().enumerate() {
        for (j, &b) in order.iter().enumerate() {
            let expected = if i == j { None } else { edges.get(a, b) };
            assert_eq!(matrix.get(i, j), expected, "({i}, {j})");
        }
    }
}

#[test]
fn matrix_is_symmetric_and_counts_each_edge_twice() {
    let (_, edges, matrix) = reference();
    for ((i, j), ty) in matrix.cells() {
        assert_eq!(matrix.get(j, i), Some(ty));
    }
    assert_eq!(matrix.len(), 2 * edges.len());
    for ty in EdgeType::ALL {
        assert_eq!(matrix.count(ty), 2 * edges.count(ty));
    }
}

#[test]
fn diagonal_is_never_drawn() {
    let (_, _, matrix) = reference();
    assert!((0..matrix.size()).all(|i| matrix.get(i, i).is_none()));
}

#[test]
fn rebuilding_is_reproducible() {
    let (topo, edges, matrix) = reference();
    let again = build_matrix(&topo.row_order(), &edges).unwrap();
    assert_eq!(matrix, again);
    let a: Vec<_> = matrix.cells().collect();
    let b: Vec<_> = again.cells().collect();
    assert_eq!(a, b);
}

#[test]
fn duplicate_order_entry_is_rejected() {
    let (topo, edges, _) = reference();
    let mut order = topo.row_order();
    order.push(order[0]);
    assert!(matches!(
        build_matrix(&order, &edges),
        Err(CliquenetError::Validation(_))
    ));
}

#[test]
fn cross_link_scenario_cells_mirror() {
    let topo = TopologyBuilder::new()
        .clique(Group::Sds, ["X", "Y", "Y1", "Y2", "Y3", "Y4", "Y5", "Y6"])
        .clique(Group::Bio, ["BIO1", "BIO2", "BIO3", "BIO4", "BIO5"])
        .clique(Group::Stat, ["STAT1", "STAT2", "STAT3"])
        .cross_link("X", "BIO1")
        .build()
        .unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let matrix = build_matrix(&topo.row_order(), &edges).unwrap();

    let x = matrix.index_of(topo.id_of("X").unwrap()).unwrap();
    let bio1 = matrix.index_of(topo.id_of("BIO1").unwrap()).unwrap();
    assert_eq!(matrix.get(x, bio1), Some(EdgeType::InterLab));
    assert_eq!(matrix.get(bio1, x), Some(EdgeType::InterLab));

    let stat3 = matrix.index_of(topo.id_of("STAT3").unwrap()).unwrap();
    assert_eq!(matrix.get(bio1, stat3), None);
    assert_eq!(matrix.get(stat3, bio1), None);
}

#[test]
fn placed_cells_sit_under_their_row_node() {
    let (topo, _, matrix) = reference();
    let cfg = SceneConfig::default();
    let col = layout(LayoutPhase::GridColumn, &topo, &cfg);
    let grid = col.grid.unwrap();
    let placed = matrix.placed_cells(&grid);
    assert_eq!(placed.len(), matrix.len());
    for cell in placed {
        let row_node = col.positions[&matrix.order()[cell.row]];
        let col_node = col.columns[&matrix.order()[cell.col]];
        assert!((cell.center.x - row_node.x).abs() < 1e-9);
        assert!((cell.center.y - col_node.y).abs() < 1e-9);
    }
}

#[test]
fn dense_rows_use_type_codes() {
    let (topo, _, matrix) = reference();
    let rows = matrix.rows();
    assert_eq!(rows.len(), topo.node_count());
    // row 0 is the hub, column 1 its partner Y.
    assert_eq!(rows[0][1], Some(1));
    assert_eq!(rows[0][0], None);
}
