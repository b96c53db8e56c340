use crate::{
    animation::ease::Ease,
    assets::NodeVisual,
    classify::edges::{EdgeKey, EdgeType},
    foundation::core::{Fps, NodeId, Point, Rgb8},
    layout::geometry::Segment,
    topology::model::Group,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Something the animation engine draws.
pub enum Target {
    /// A network node.
    Node(NodeId),
    /// Text label of a node.
    Label(NodeId),
    /// Duplicate of a node along the grid column.
    ColumnNode(NodeId),
    /// A drawn edge.
    Edge(EdgeKey),
    /// Caption of a clique.
    Title(Group),
    /// Legend entry of an edge type.
    Legend(EdgeType),
    /// Line `k` of the matrix grid.
    GridLine(usize),
    /// Matrix cell `(row, col)`.
    Cell(usize, usize),
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Discriminant of a [`Property`].
pub enum PropertyKind {
    /// Centre position.
    Position,
    /// Display radius (half side for cells).
    Radius,
    /// Fill or stroke colour.
    Fill,
    /// Opacity.
    Opacity,
    /// Line endpoints.
    Segment,
    /// Drawable.
    Visual,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Target value of an animated property.
pub enum Property {
    /// Move the centre to a point.
    Position(Point),
    /// Resize.
    Radius(f64),
    /// Recolour.
    Fill(Rgb8),
    /// Fade to an opacity; 0 hides, anything above shows.
    Opacity(f64),
    /// Put a line on new endpoints.
    Segment(Segment),
    /// Swap the drawable, identity unchanged.
    Visual(NodeVisual),
}

impl Property {
    /// Discriminant.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Position(_) => PropertyKind::Position,
            Self::Radius(_) => PropertyKind::Radius,
            Self::Fill(_) => PropertyKind::Fill,
            Self::Opacity(_) => PropertyKind::Opacity,
            Self::Segment(_) => PropertyKind::Segment,
            Self::Visual(_) => PropertyKind::Visual,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Set `property` of `target` by the end of the phase.
pub struct Directive {
    /// What is animated.
    pub target: Target,
    /// Value reached at the end of the phase.
    pub property: Property,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A set of directives played together, followed by an optional pause.
pub struct Phase {
    /// Debug name, e.g. `edge.X-Y`.
    pub name: String,
    /// Transition duration in seconds.
    pub run_time_s: f64,
    /// Pause after the transition in seconds.
    pub hold_s: f64,
    /// Timing curve of the transition.
    pub ease: Ease,
    /// Target values.
    pub directives: Vec<Directive>,
}

impl Phase {
    /// Empty phase of `run_time_s` seconds.
    pub fn new(name: impl Into<String>, run_time_s: f64) -> Self {
        Self {
            name: name.into(),
            run_time_s,
            hold_s: 0.0,
            ease: Ease::default(),
            directives: Vec::new(),
        }
    }

    /// Pure pause.
    pub fn wait(hold_s: f64) -> Self {
        Self::new("wait", 0.0).hold(hold_s)
    }

    /// Set the pause after the transition.
    pub fn hold(mut self, hold_s: f64) -> Self {
        self.hold_s = hold_s;
        self
    }

    /// Set the timing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Append a directive.
    pub fn set(mut self, target: Target, property: Property) -> Self {
        self.push(target, property);
        self
    }

    /// Append a directive in place.
    pub fn push(&mut self, target: Target, property: Property) {
        self.directives.push(Directive { target, property });
    }

    /// Transition plus pause.
    pub fn duration_s(&self) -> f64 {
        self.run_time_s + self.hold_s
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered phases of the whole animation.
pub struct Timeline {
    /// Phases in playing order.
    pub phases: Vec<Phase>,
}

impl Timeline {
    /// Append a phase.
    pub fn push(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    /// Extend the pause of the last phase, or append a wait when empty.
    pub fn hold(&mut self, secs: f64) {
        match self.phases.last_mut() {
            Some(last) => last.hold_s += secs,
            None => self.phases.push(Phase::wait(secs)),
        }
    }

    /// Number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether the timeline has no phase.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Total playing time in seconds.
    pub fn duration_s(&self) -> f64 {
        self.phases.iter().map(Phase::duration_s).sum()
    }

    /// Total playing time in whole frames.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_ceil(self.duration_s())
    }

    /// First phase with the given name.
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }
}
