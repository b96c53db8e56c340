use super::*;
use crate::topology::{
    dsl::TopologyBuilder,
    model::{Group, build_network},
};

fn reference() -> (Topology, EdgeClassifier) {
    let topo = build_network().unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    (topo, edges)
}

fn id(topo: &Topology, label: &str) -> NodeId {
    topo.id_of(label).unwrap()
}

#[test]
fn edge_key_is_order_independent() {
    let k1 = EdgeKey::new(NodeId(3), NodeId(1)).unwrap();
    let k2 = EdgeKey::new(NodeId(1), NodeId(3)).unwrap();
    assert_eq!(k1, k2);
    assert_eq!((k1.a(), k1.b()), (NodeId(1), NodeId(3)));
    assert!(EdgeKey::new(NodeId(2), NodeId(2)).is_none());
}

#[test]
fn clique_pairs_grow_one_member_at_a_time() {
    let pairs = clique_pairs(&[NodeId(0), NodeId(1), NodeId(2)]);
    let flat: Vec<(u32, u32)> = pairs.iter().map(|k| (k.a().0, k.b().0)).collect();
    assert_eq!(flat, vec![(0, 1), (0, 2), (1, 2)]);
    assert!(clique_pairs(&[NodeId(4)]).is_empty());
}

#[test]
fn type_codes_are_one_through_four() {
    let codes: Vec<u8> = EdgeType::ALL.iter().map(|t| t.code()).collect();
    assert_eq!(codes, vec![1, 2, 3, 4]);
    assert_eq!(EdgeType::from_code(3), Some(EdgeType::IntraProche));
    assert_eq!(EdgeType::from_code(0), None);
}

#[test]
fn classification_is_symmetric() {
    let (topo, edges) = reference();
    for a in topo.nodes() {
        for b in topo.nodes() {
            assert_eq!(edges.get(a.id, b.id), edges.get(b.id, a.id));
        }
    }
}

#[test]
fn cliques_are_complete_and_nothing_more() {
    let (topo, edges) = reference();
    for (group, members) in topo.cliques() {
        let expected = if group.side().is_lab() {
            EdgeType::IntraLab
        } else {
            EdgeType::IntraProche
        };
        let k = members.len();
        let inside = edges
            .edges()
            .filter(|(key, _)| members.contains(&key.a()) && members.contains(&key.b()))
            .collect::<Vec<_>>();
        assert_eq!(inside.len(), k * (k - 1) / 2, "{group:?}");
        assert!(inside.iter().all(|&(_, t)| t == expected), "{group:?}");
    }
}

#[test]
fn type_counts_match_reference_network() {
    let (_, edges) = reference();
    // 28 + 10 + 3 + 10
    assert_eq!(edges.count(EdgeType::IntraLab), 51);
    assert_eq!(edges.count(EdgeType::InterLab), 15);
    // 21 + 28 + 10
    assert_eq!(edges.count(EdgeType::IntraProche), 59);
    assert_eq!(edges.count(EdgeType::InterProche), 7 + 8 + 5);
    assert_eq!(edges.len(), 51 + 15 + 59 + 20);
}

#[test]
fn declared_cross_link_is_inter_lab() {
    let (topo, edges) = reference();
    let (x, bio1) = (id(&topo, "X"), id(&topo, "BIO1"));
    assert_eq!(edges.get(x, bio1), Some(EdgeType::InterLab));
    assert_eq!(edges.get(bio1, x), Some(EdgeType::InterLab));
}

#[test]
fn hub_reaches_every_right_hand_node() {
    let (topo, edges) = reference();
    let hub = topo.hub();
    for node in topo.right_hand_nodes() {
        assert_eq!(edges.get(hub, node), Some(EdgeType::InterProche));
    }
    let y = id(&topo, "Y");
    assert_eq!(edges.get(y, id(&topo, "Fam1")), None);
}

#[test]
fn unlinked_pairs_are_absent() {
    let (topo, edges) = reference();
    assert_eq!(edges.get(id(&topo, "BIO1"), id(&topo, "STAT3")), None);
    assert_eq!(edges.get(id(&topo, "Fam1"), id(&topo, "Fr1")), None);
    assert_eq!(edges.get(id(&topo, "X"), id(&topo, "X")), None);
}

#[test]
fn small_network_scenario() {
    let topo = TopologyBuilder::new()
        .clique(Group::Sds, ["X", "Y", "Y1", "Y2", "Y3", "Y4", "Y5", "Y6"])
        .clique(Group::Bio, ["BIO1", "BIO2", "BIO3", "BIO4", "BIO5"])
        .clique(Group::Fam, ["Fam1", "Fam2"])
        .cross_link("X", "BIO1")
        .build()
        .unwrap();
    let edges = EdgeClassifier::classify(&topo).unwrap();
    assert_eq!(
        edges.get(id(&topo, "X"), id(&topo, "BIO1")),
        Some(EdgeType::InterLab)
    );
    assert_eq!(edges.count(EdgeType::InterLab), 1);
    assert_eq!(edges.count(EdgeType::InterProche), 2);
    assert_eq!(edges.count(EdgeType::IntraProche), 1);
}
