use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::foundation::{
    core::NodeId,
    error::{CliquenetError, CliquenetResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// A community of the network. Declaration order is the grid row order.
pub enum Group {
    /// Central research group; its first node is the hub.
    Sds,
    /// Biostatistics lab (left).
    Bio,
    /// Statistics lab (left).
    Stat,
    /// Mathematical statistics lab (left).
    Mstat,
    /// Family circle (right).
    Fam,
    /// Friends circle (right).
    Fr,
    /// In-law family circle (right).
    Sfam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which part of the picture a group belongs to.
pub enum Side {
    /// The hub clique in the centre.
    Middle,
    /// Research labs on the left.
    Left,
    /// Personal circles on the right.
    Right,
}

impl Side {
    /// Middle and left groups are labs; right groups are personal circles.
    pub fn is_lab(self) -> bool {
        matches!(self, Self::Middle | Self::Left)
    }
}

impl Group {
    /// All groups in row order.
    pub const ALL: [Group; 7] = [
        Group::Sds,
        Group::Bio,
        Group::Stat,
        Group::Mstat,
        Group::Fam,
        Group::Fr,
        Group::Sfam,
    ];

    /// Side of the picture the group is drawn on.
    pub fn side(self) -> Side {
        match self {
            Self::Sds => Side::Middle,
            Self::Bio | Self::Stat | Self::Mstat => Side::Left,
            Self::Fam | Self::Fr | Self::Sfam => Side::Right,
        }
    }

    /// Right-hand groups (Fam, Fr, Sfam).
    pub fn is_right_hand(self) -> bool {
        self.side() == Side::Right
    }

    /// Caption drawn next to the clique.
    pub fn title(self) -> &'static str {
        match self {
            Self::Sds => "SDS",
            Self::Bio => "BioStat",
            Self::Stat => "Stat",
            Self::Mstat => "MStat",
            Self::Fam => "Famille",
            Self::Fr => "Amis",
            Self::Sfam => "B-Famille",
        }
    }
}

/// Sizes of the reference network, in row order.
pub const REFERENCE_GROUP_SIZES: [(Group, usize); 7] = [
    (Group::Sds, 8),
    (Group::Bio, 5),
    (Group::Stat, 3),
    (Group::Mstat, 5),
    (Group::Fam, 7),
    (Group::Fr, 8),
    (Group::Sfam, 5),
];

/// Cross-links of the reference network.
pub const REFERENCE_CROSS_LINKS: [(&str, &str); 15] = [
    ("X", "BIO1"),
    ("Y1", "STAT1"),
    ("Y2", "MStat1"),
    ("BIO2", "STAT2"),
    ("Y3", "BIO3"),
    ("Y4", "MStat2"),
    ("MStat3", "STAT3"),
    ("BIO4", "Y5"),
    ("MStat4", "BIO5"),
    ("STAT2", "Y6"),
    ("MStat5", "BIO5"),
    ("BIO3", "STAT1"),
    ("Y5", "MStat5"),
    ("MStat4", "BIO3"),
    ("STAT3", "Y4"),
];

/// Labels of a reference group of `size` nodes.
///
/// The hub group starts with the hub pair `X`, `Y`; every other group numbers its
/// members from 1 behind a group prefix.
pub fn reference_labels(group: Group, size: usize) -> Vec<String> {
    let prefix = match group {
        Group::Sds => {
            let mut labels: Vec<String> = ["X", "Y"]
                .iter()
                .take(size)
                .map(|s| s.to_string())
                .collect();
            labels.extend((1..=size.saturating_sub(2)).map(|i| format!("Y{i}")));
            return labels;
        }
        Group::Bio => "BIO",
        Group::Stat => "STAT",
        Group::Mstat => "MStat",
        Group::Fam => "Fam",
        Group::Fr => "Fr",
        Group::Sfam => "SFam",
    };
    (1..=size).map(|i| format!("{prefix}{i}")).collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered member labels of one clique.
pub struct GroupSpec {
    /// Group the clique belongs to.
    pub group: Group,
    /// Member labels, in clique order.
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Literal description of a network, resolved into a [`Topology`] once.
pub struct TopologySpec {
    /// Cliques, one per group.
    pub groups: Vec<GroupSpec>,
    /// Explicit cross-links as label pairs.
    #[serde(default)]
    pub cross_links: Vec<(String, String)>,
}

impl TopologySpec {
    /// The seven-group network with its fifteen cross-links.
    pub fn reference() -> Self {
        Self {
            groups: REFERENCE_GROUP_SIZES
                .iter()
                .map(|&(group, size)| GroupSpec {
                    group,
                    labels: reference_labels(group, size),
                })
                .collect(),
            cross_links: REFERENCE_CROSS_LINKS
                .iter()
                .map(|&(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }

    /// Parse a network description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CliquenetResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CliquenetError::serde(format!("parse topology JSON: {e}")))
    }

    /// Parse a network description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CliquenetResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CliquenetError::validation(format!("open topology JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// A network member.
pub struct Node {
    /// Stable identity.
    pub id: NodeId,
    /// Unique label, also the asset file stem.
    pub label: String,
    /// Owning group.
    pub group: Group,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Resolved, immutable network: the single source of truth for connectivity.
///
/// Node ids are assigned in row order (groups in [`Group::ALL`] order, members in
/// clique order), so `nodes()[i].id == NodeId(i)`.
pub struct Topology {
    nodes: Vec<Node>,
    cliques: BTreeMap<Group, Vec<NodeId>>,
    cross_links: Vec<(NodeId, NodeId)>,
    #[serde(skip)]
    by_label: BTreeMap<String, NodeId>,
    hub: NodeId,
}

impl Topology {
    /// Resolve and validate a network description.
    #[tracing::instrument(skip(spec))]
    pub fn from_spec(spec: &TopologySpec) -> CliquenetResult<Self> {
        let mut ordered: BTreeMap<Group, &GroupSpec> = BTreeMap::new();
        for g in &spec.groups {
            if ordered.insert(g.group, g).is_some() {
                return Err(CliquenetError::configuration(format!(
                    "group {:?} is declared twice",
                    g.group
                )));
            }
            if g.labels.is_empty() {
                return Err(CliquenetError::configuration(format!(
                    "clique {:?} is empty",
                    g.group
                )));
            }
        }

        let mut nodes = Vec::<Node>::new();
        let mut cliques = BTreeMap::<Group, Vec<NodeId>>::new();
        let mut by_label = BTreeMap::<String, NodeId>::new();
        for (&group, g) in &ordered {
            let mut members = Vec::with_capacity(g.labels.len());
            for label in &g.labels {
                if label.trim().is_empty() {
                    return Err(CliquenetError::configuration(format!(
                        "clique {group:?} contains an empty label"
                    )));
                }
                let id = NodeId(nodes.len() as u32);
                if by_label.insert(label.clone(), id).is_some() {
                    return Err(CliquenetError::configuration(format!(
                        "duplicate node label '{label}'"
                    )));
                }
                nodes.push(Node {
                    id,
                    label: label.clone(),
                    group,
                });
                members.push(id);
            }
            cliques.insert(group, members);
        }

        let hub = cliques
            .get(&Group::Sds)
            .and_then(|m| m.first().copied())
            .ok_or_else(|| CliquenetError::configuration("hub clique Sds is missing"))?;

        let mut seen = BTreeSet::<(NodeId, NodeId)>::new();
        let mut cross_links = Vec::with_capacity(spec.cross_links.len());
        for (a, b) in &spec.cross_links {
            let resolve = |label: &String| {
                by_label.get(label).copied().ok_or_else(|| {
                    CliquenetError::configuration(format!(
                        "cross-link {a}-{b} references unknown node '{label}'"
                    ))
                })
            };
            let (ia, ib) = (resolve(a)?, resolve(b)?);
            if ia == ib {
                return Err(CliquenetError::configuration(format!(
                    "cross-link {a}-{b} is a self-link"
                )));
            }
            let (ga, gb) = (nodes[ia.index()].group, nodes[ib.index()].group);
            if ga.is_right_hand() || gb.is_right_hand() {
                return Err(CliquenetError::configuration(format!(
                    "cross-link {a}-{b} touches a right-hand group"
                )));
            }
            if ga == gb {
                return Err(CliquenetError::configuration(format!(
                    "cross-link {a}-{b} is already implied by clique {ga:?}"
                )));
            }
            if !seen.insert((ia.min(ib), ia.max(ib))) {
                return Err(CliquenetError::configuration(format!(
                    "cross-link {a}-{b} is declared twice"
                )));
            }
            cross_links.push((ia, ib));
        }

        tracing::debug!(
            nodes = nodes.len(),
            cliques = cliques.len(),
            cross_links = cross_links.len(),
            "topology resolved"
        );
        Ok(Self {
            nodes,
            cliques,
            cross_links,
            by_label,
            hub,
        })
    }

    /// All nodes in row order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Resolve a label to its id.
    pub fn id_of(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Label of a node, or `"?"` for an id outside this topology.
    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.label.as_str()).unwrap_or("?")
    }

    /// Group of a node.
    pub fn group_of(&self, id: NodeId) -> Option<Group> {
        self.node(id).map(|n| n.group)
    }

    /// Cliques keyed by group, in row order.
    pub fn cliques(&self) -> &BTreeMap<Group, Vec<NodeId>> {
        &self.cliques
    }

    /// Members of one clique; empty when the group is absent.
    pub fn clique(&self, group: Group) -> &[NodeId] {
        self.cliques.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared cross-links, in declaration order.
    pub fn cross_links(&self) -> &[(NodeId, NodeId)] {
        &self.cross_links
    }

    /// The hub node (first member of `Sds`).
    pub fn hub(&self) -> NodeId {
        self.hub
    }

    /// Nodes of the right-hand groups, in row order.
    pub fn right_hand_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.group.is_right_hand())
            .map(|n| n.id)
            .collect()
    }

    /// Grid row order: groups in [`Group::ALL`] order, members in clique order.
    pub fn row_order(&self) -> Vec<NodeId> {
        self.cliques.values().flatten().copied().collect()
    }
}

/// Build the reference network.
#[tracing::instrument]
pub fn build_network() -> CliquenetResult<Topology> {
    Topology::from_spec(&TopologySpec::reference())
}

#[cfg(test)]
#[path = "../../tests/unit/topology/model.rs"]
mod tests;
