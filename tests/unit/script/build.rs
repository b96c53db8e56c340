use super::*;
use crate::{
    foundation::core::Fps,
    script::{
        driver::{AnimationDriver, SceneState, run_timeline},
        model::PropertyKind,
    },
    topology::{dsl::TopologyBuilder, model::build_network},
};

fn reference(config: &SceneConfig) -> (Topology, EdgeClassifier, Timeline) {
    let topo = build_network().unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let timeline = build_timeline(&topo, &edges, config).unwrap();
    (topo, edges, timeline)
}

fn played(timeline: &Timeline) -> SceneState {
    let mut scene = SceneState::new();
    run_timeline(timeline, &mut scene).unwrap();
    scene
}

fn index_of(timeline: &Timeline, name: &str) -> usize {
    timeline
        .phases
        .iter()
        .position(|p| p.name == name)
        .unwrap_or_else(|| panic!("missing phase {name}"))
}

#[test]
fn choreography_runs_in_narrative_order() {
    let (_, _, tl) = reference(&SceneConfig::default());
    let order = [
        "node.X",
        "hub.place",
        "node.Y",
        "edge.X-Y",
        "sds.stage",
        "title.SDS",
        "title.BioStat",
        "sds.center",
        "title.Famille",
        "edge.X-Fam1",
        "legends.show",
        "edges.fade",
        "nodes.shrink",
        "grid.row",
        "grid.column.spawn",
        "grid.column",
        "grid.lines",
        "legends.final",
    ];
    let idx: Vec<usize> = order.iter().map(|n| index_of(&tl, n)).collect();
    assert!(idx.windows(2).all(|w| w[0] < w[1]), "{idx:?}");
    assert!(tl.duration_s() > 0.0);
    assert!(tl.frame_count(Fps::new(30, 1).unwrap()) > 0);
}

#[test]
fn every_classified_edge_is_drawn_once() {
    let (_, edges, tl) = reference(&SceneConfig::default());
    let mut drawn = Vec::new();
    for phase in &tl.phases {
        if !phase.name.starts_with("edge.") {
            continue;
        }
        for d in &phase.directives {
            if let (Target::Edge(k), Property::Segment(_)) = (d.target, &d.property) {
                drawn.push(k);
            }
        }
    }
    assert_eq!(drawn.len(), edges.len());
    for (key, _) in edges.edges() {
        assert!(drawn.contains(&key));
    }
}

#[test]
fn final_scene_sits_on_the_grid() {
    let cfg = SceneConfig::default();
    let (topo, _, tl) = reference(&cfg);
    let scene = played(&tl);
    let grid = layout(LayoutPhase::GridColumn, &topo, &cfg);

    for &id in &grid.order {
        assert_eq!(scene.position(Target::Node(id)), Some(grid.positions[&id]));
        assert_eq!(scene.position(Target::ColumnNode(id)), Some(grid.columns[&id]));
        assert_eq!(scene.radius(Target::Node(id)), Some(grid.node_radius));
    }
    assert_eq!(scene.phases_played(), tl.len());
    assert!((scene.elapsed_s() - tl.duration_s()).abs() < 1e-9);
}

#[test]
fn overlays_are_hidden_once_the_matrix_is_built() {
    let (topo, edges, tl) = reference(&SceneConfig::default());
    let scene = played(&tl);
    for (key, _) in edges.edges() {
        assert_eq!(scene.opacity(Target::Edge(key)), 0.0);
    }
    for &group in topo.cliques().keys() {
        assert_eq!(scene.opacity(Target::Title(group)), 0.0);
    }
    // Final legends come back.
    for ty in EdgeType::ALL {
        assert_eq!(scene.opacity(Target::Legend(ty)), 1.0);
    }
}

#[test]
fn cell_colours_match_edge_types() {
    let (topo, edges, tl) = reference(&SceneConfig::default());
    let scene = played(&tl);
    let order = topo.row_order();
    let mut cells = 0;
    for (i, &a) in order.iter().enumerate() {
        for (j, &b) in order.iter().enumerate() {
            let cell = Target::Cell(i, j);
            match edges.get(a, b).filter(|_| i != j) {
                Some(ty) => {
                    cells += 1;
                    assert_eq!(scene.fill(cell), Some(palette::edge_color(ty)), "({i}, {j})");
                    assert_eq!(scene.opacity(cell), 1.0);
                }
                None => assert_eq!(scene.opacity(cell), 0.0),
            }
        }
    }
    assert_eq!(cells, 2 * edges.len());
}

#[test]
fn edges_end_coloured_by_type() {
    let (_, edges, tl) = reference(&SceneConfig::default());
    let scene = played(&tl);
    for (key, ty) in edges.edges() {
        assert_eq!(scene.fill(Target::Edge(key)), Some(palette::edge_color(ty)));
    }
}

#[test]
fn edges_follow_the_hub_clique_when_it_moves() {
    let cfg = SceneConfig::default();
    let (topo, _, tl) = reference(&cfg);
    let compressed = layout(LayoutPhase::Compressed, &topo, &cfg);
    let x = topo.id_of("X").unwrap();
    let y = topo.id_of("Y").unwrap();
    let key = EdgeKey::new(x, y).unwrap();

    let center = tl.phase("sds.center").unwrap();
    let seg = center
        .directives
        .iter()
        .find_map(|d| match (d.target, &d.property) {
            (Target::Edge(k), Property::Segment(s)) if k == key => Some(*s),
            _ => None,
        })
        .unwrap();
    let expected = edge_segment(
        compressed.positions[&x],
        compressed.positions[&y],
        cfg.node_radius,
        cfg.node_radius,
    )
    .unwrap();
    assert_eq!(seg, expected);
}

#[test]
fn labels_only_when_enabled() {
    let (_, _, plain) = reference(&SceneConfig::default());
    let has_label = |tl: &Timeline| {
        tl.phases
            .iter()
            .flat_map(|p| &p.directives)
            .any(|d| matches!(d.target, Target::Label(_)))
    };
    assert!(!has_label(&plain));

    let cfg = SceneConfig {
        show_labels: true,
        ..SceneConfig::default()
    };
    let (topo, _, labelled) = reference(&cfg);
    assert!(has_label(&labelled));
    let scene = played(&labelled);
    for node in topo.nodes() {
        assert_eq!(scene.opacity(Target::Label(node.id)), 0.0);
    }
}

#[test]
fn pictures_are_swapped_for_discs() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("target/build_assets");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Fr3.png"), b"png").unwrap();

    let cfg = SceneConfig {
        assets_dir: Some(dir.to_string_lossy().into_owned()),
        ..SceneConfig::default()
    };
    let (topo, _, tl) = reference(&cfg);
    let fr3 = topo.id_of("Fr3").unwrap();
    let reveal = tl.phase("node.Fr3").unwrap();
    assert!(reveal.directives.iter().any(|d| matches!(
        &d.property,
        Property::Visual(v) if v.is_image()
    )));

    let swap = tl.phase("nodes.substitute").unwrap();
    assert!(swap.directives.iter().all(|d| d.target == Target::Node(fr3)));

    let scene = played(&tl);
    match scene.get(Target::Node(fr3), PropertyKind::Visual) {
        Some(Property::Visual(v)) => assert!(!v.is_image()),
        other => panic!("unexpected visual {other:?}"),
    }
}

#[test]
fn no_substitution_without_pictures() {
    let (_, _, tl) = reference(&SceneConfig::default());
    assert!(tl.phase("nodes.substitute").is_none());
}

#[test]
fn small_custom_topology_builds() {
    let topo = TopologyBuilder::new()
        .clique(Group::Sds, ["X", "Y", "Y1"])
        .clique(Group::Bio, ["B1", "B2"])
        .clique(Group::Fam, ["F1", "F2"])
        .cross_link("B1", "Y1")
        .build()
        .unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let tl = build_timeline(&topo, &edges, &SceneConfig::default()).unwrap();
    assert!(tl.phase("title.Stat").is_none());
    assert!(tl.phase("edge.X-F1").is_some());

    let mut scene = SceneState::new();
    for phase in &tl.phases {
        scene.play(phase).unwrap();
    }
    assert_eq!(scene.phases_played(), tl.len());
}

#[test]
fn invalid_config_is_rejected() {
    let topo = build_network().unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let cfg = SceneConfig {
        node_radius: -1.0,
        ..SceneConfig::default()
    };
    assert!(build_timeline(&topo, &edges, &cfg).is_err());
}

#[test]
fn coincident_edge_endpoints_abort_the_build() {
    // Staged hub X lands on STAT1 at (-2.7, 0) before their cross-link is drawn.
    let topo = TopologyBuilder::new()
        .clique(Group::Sds, ["X", "Y"])
        .clique(Group::Stat, ["STAT1", "STAT2"])
        .cross_link("X", "STAT1")
        .build()
        .unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    let cfg = SceneConfig {
        staging_shift_x: -3.7,
        ..SceneConfig::default()
    };
    let staged = layout(LayoutPhase::Translated, &topo, &cfg);
    let x = topo.id_of("X").unwrap();
    let stat1 = topo.id_of("STAT1").unwrap();
    assert!(staged.positions[&x].distance(staged.positions[&stat1]) < 1e-9);

    let err = build_timeline(&topo, &edges, &cfg).unwrap_err();
    assert!(matches!(err, CliquenetError::DegenerateGeometry(_)), "{err}");
}
