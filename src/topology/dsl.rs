use crate::{
    foundation::error::CliquenetResult,
    topology::model::{Group, GroupSpec, Topology, TopologySpec},
};

/// Programmatic construction of a [`Topology`].
///
/// Validation is deferred to [`TopologyBuilder::build`], which applies the same rules
/// as [`Topology::from_spec`].
#[derive(Clone, Debug, Default)]
pub struct TopologyBuilder {
    spec: TopologySpec,
}

impl TopologyBuilder {
    /// Start an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing description.
    pub fn from_spec(spec: TopologySpec) -> Self {
        Self { spec }
    }

    /// Declare the clique of `group`.
    pub fn clique<I, S>(mut self, group: Group, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.groups.push(GroupSpec {
            group,
            labels: labels.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Declare a cross-link between two labels.
    pub fn cross_link(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.spec.cross_links.push((a.into(), b.into()));
        self
    }

    /// The description built so far.
    pub fn spec(&self) -> &TopologySpec {
        &self.spec
    }

    /// Resolve and validate.
    pub fn build(self) -> CliquenetResult<Topology> {
        Topology::from_spec(&self.spec)
    }
}
