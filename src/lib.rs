//! cliquenet computes the structure behind a multi-clique network explainer animation.
//!
//! The crate is the deterministic core; drawing and encoding belong to an external
//! engine reached through [`AnimationDriver`]:
//!
//! - Resolve a [`TopologySpec`] into a [`Topology`] (or take [`build_network`])
//! - Classify every edge with an [`EdgeClassifier`]
//! - Ask [`layout`] for node positions of each [`LayoutPhase`]
//! - Build the [`AdjacencyMatrix`] over the grid-row order
//! - Turn all of it into a [`Timeline`] and play it with [`run_timeline`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;

pub(crate) mod animation;
pub(crate) mod classify;
pub(crate) mod layout;
pub(crate) mod matrix;
/// Colours of the explainer.
pub mod palette;
pub(crate) mod script;
pub(crate) mod topology;

pub use crate::foundation::core::{Fps, NodeId, Point, Rgb8, Vec2};
pub use crate::foundation::error::{CliquenetError, CliquenetResult};

pub use crate::animation::ease::Ease;
pub use crate::assets::NodeVisual;
pub use crate::classify::edges::{EdgeClassifier, EdgeKey, EdgeType, clique_pairs};
pub use crate::config::SceneConfig;
pub use crate::layout::geometry::{GridGeometry, Segment, edge_geometry, edge_segment};
pub use crate::layout::phases::{
    CircleSpec, LayoutPhase, PhaseLayout, circle_for, clique_angles, layout,
};
pub use crate::matrix::builder::{AdjacencyMatrix, MatrixCell, build_matrix};
pub use crate::script::build::build_timeline;
pub use crate::script::driver::{AnimationDriver, SceneState, run_timeline};
pub use crate::script::model::{Directive, Phase, Property, PropertyKind, Target, Timeline};
pub use crate::topology::dsl::TopologyBuilder;
pub use crate::topology::model::{
    Group, GroupSpec, Node, REFERENCE_CROSS_LINKS, REFERENCE_GROUP_SIZES, Side, Topology,
    TopologySpec, build_network, reference_labels,
};
