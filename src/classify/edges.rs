use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::NodeId,
        error::{CliquenetError, CliquenetResult},
    },
    topology::model::Topology,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Relationship category of an edge. The four categories never overlap.
pub enum EdgeType {
    /// Inside one lab clique (Sds, Bio, Stat, Mstat).
    IntraLab,
    /// Declared cross-link between two labs.
    InterLab,
    /// Inside one personal circle (Fam, Fr, Sfam).
    IntraProche,
    /// Hub to a member of a personal circle.
    InterProche,
}

impl EdgeType {
    /// All types in code order.
    pub const ALL: [EdgeType; 4] = [
        EdgeType::IntraLab,
        EdgeType::InterLab,
        EdgeType::IntraProche,
        EdgeType::InterProche,
    ];

    /// Numeric code, 1 through 4.
    pub fn code(self) -> u8 {
        match self {
            Self::IntraLab => 1,
            Self::InterLab => 2,
            Self::IntraProche => 3,
            Self::InterProche => 4,
        }
    }

    /// Inverse of [`EdgeType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Legend caption.
    pub fn name(self) -> &'static str {
        match self {
            Self::IntraLab => "IntraLab",
            Self::InterLab => "InterLab",
            Self::IntraProche => "IntraProche",
            Self::InterProche => "InterProche",
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Canonical unordered node pair (`a < b`).
pub struct EdgeKey {
    a: NodeId,
    b: NodeId,
}

impl EdgeKey {
    /// Canonicalize a pair; `None` for a self-pair.
    pub fn new(x: NodeId, y: NodeId) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller endpoint.
    pub fn a(self) -> NodeId {
        self.a
    }

    /// Larger endpoint.
    pub fn b(self) -> NodeId {
        self.b
    }

    /// Whether `id` is an endpoint.
    pub fn touches(self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }
}

/// All pairs of a clique in growth order: member k is linked to members `0..k`.
pub fn clique_pairs(members: &[NodeId]) -> Vec<EdgeKey> {
    let mut out = Vec::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
    for (k, &node) in members.iter().enumerate() {
        for &prev in &members[..k] {
            if let Some(key) = EdgeKey::new(prev, node) {
                out.push(key);
            }
        }
    }
    out
}

#[derive(Clone, Debug, Default)]
/// Every edge of a topology with its type. Pairs without an edge are absent.
pub struct EdgeClassifier {
    types: BTreeMap<EdgeKey, EdgeType>,
}

impl EdgeClassifier {
    /// Classify every edge implied or declared by `topology`.
    ///
    /// Fails with a configuration error if a pair would receive two types, which a
    /// topology validated by [`Topology::from_spec`] never produces.
    #[tracing::instrument(skip(topology))]
    pub fn classify(topology: &Topology) -> CliquenetResult<Self> {
        let mut out = Self::default();

        for (group, members) in topology.cliques() {
            let ty = if group.side().is_lab() {
                EdgeType::IntraLab
            } else {
                EdgeType::IntraProche
            };
            for key in clique_pairs(members) {
                out.insert(topology, key, ty)?;
            }
        }

        for &(x, y) in topology.cross_links() {
            let touches_right = [x, y]
                .iter()
                .any(|&id| topology.group_of(id).is_some_and(|g| g.is_right_hand()));
            if touches_right {
                return Err(CliquenetError::configuration(format!(
                    "cross-link {}-{} touches a right-hand group",
                    topology.label(x),
                    topology.label(y)
                )));
            }
            if let Some(key) = EdgeKey::new(x, y) {
                out.insert(topology, key, EdgeType::InterLab)?;
            }
        }

        let hub = topology.hub();
        for node in topology.right_hand_nodes() {
            if let Some(key) = EdgeKey::new(hub, node) {
                out.insert(topology, key, EdgeType::InterProche)?;
            }
        }

        tracing::debug!(
            intra_lab = out.count(EdgeType::IntraLab),
            inter_lab = out.count(EdgeType::InterLab),
            intra_proche = out.count(EdgeType::IntraProche),
            inter_proche = out.count(EdgeType::InterProche),
            "edges classified"
        );
        Ok(out)
    }

    fn insert(&mut self, topology: &Topology, key: EdgeKey, ty: EdgeType) -> CliquenetResult<()> {
        if let Some(prev) = self.types.insert(key, ty) {
            return Err(CliquenetError::configuration(format!(
                "edge {}-{} is both {} and {}",
                topology.label(key.a()),
                topology.label(key.b()),
                prev.name(),
                ty.name()
            )));
        }
        Ok(())
    }

    /// Type of the edge between `x` and `y`, in either order.
    pub fn get(&self, x: NodeId, y: NodeId) -> Option<EdgeType> {
        EdgeKey::new(x, y).and_then(|key| self.types.get(&key).copied())
    }

    /// All edges in canonical key order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, EdgeType)> + '_ {
        self.types.iter().map(|(&k, &t)| (k, t))
    }

    /// Number of classified edges.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no edge was classified.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of edges of one type.
    pub fn count(&self, ty: EdgeType) -> usize {
        self.types.values().filter(|&&t| t == ty).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/edges.rs"]
mod tests;
