use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{Point, Rgb8},
        error::{CliquenetError, CliquenetResult},
    },
    layout::geometry::Segment,
    script::model::{Directive, Phase, Property, PropertyKind, Target, Timeline},
};

/// Boundary to the rendering engine.
///
/// `play` must not return before the transition is complete: the next phase reads
/// final positions, never in-flight ones.
pub trait AnimationDriver {
    /// Play one phase to completion, including its pause.
    fn play(&mut self, phase: &Phase) -> CliquenetResult<()>;
}

/// Feed every phase of `timeline` to `driver`, in order. The first error aborts the run.
#[tracing::instrument(skip_all, fields(phases = timeline.len()))]
pub fn run_timeline(timeline: &Timeline, driver: &mut dyn AnimationDriver) -> CliquenetResult<()> {
    for (idx, phase) in timeline.phases.iter().enumerate() {
        tracing::debug!(idx, name = %phase.name, directives = phase.directives.len(), "play phase");
        driver.play(phase).map_err(|e| {
            tracing::warn!(idx, name = %phase.name, error = %e, "phase failed");
            e
        })?;
    }
    Ok(())
}

#[derive(Clone, Debug, Default)]
/// Headless driver: the registry of the latest value of every animated property.
///
/// Keys are stable targets, so a node whose visual is swapped keeps its position,
/// colour and edges.
pub struct SceneState {
    values: BTreeMap<(Target, PropertyKind), Property>,
    elapsed_s: f64,
    played: usize,
}

impl SceneState {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value of a property.
    pub fn get(&self, target: Target, kind: PropertyKind) -> Option<&Property> {
        self.values.get(&(target, kind))
    }

    /// Latest position.
    pub fn position(&self, target: Target) -> Option<Point> {
        match self.get(target, PropertyKind::Position)? {
            Property::Position(p) => Some(*p),
            _ => None,
        }
    }

    /// Latest colour.
    pub fn fill(&self, target: Target) -> Option<Rgb8> {
        match self.get(target, PropertyKind::Fill)? {
            Property::Fill(c) => Some(*c),
            _ => None,
        }
    }

    /// Latest radius.
    pub fn radius(&self, target: Target) -> Option<f64> {
        match self.get(target, PropertyKind::Radius)? {
            Property::Radius(r) => Some(*r),
            _ => None,
        }
    }

    /// Latest segment.
    pub fn segment(&self, target: Target) -> Option<Segment> {
        match self.get(target, PropertyKind::Segment)? {
            Property::Segment(s) => Some(*s),
            _ => None,
        }
    }

    /// Latest opacity; targets never faded in report 0.
    pub fn opacity(&self, target: Target) -> f64 {
        match self.get(target, PropertyKind::Opacity) {
            Some(Property::Opacity(o)) => *o,
            _ => 0.0,
        }
    }

    /// Targets currently shown, in key order.
    pub fn visible(&self) -> Vec<Target> {
        self.values
            .iter()
            .filter_map(|((target, kind), value)| match (kind, value) {
                (PropertyKind::Opacity, Property::Opacity(o)) if *o > 0.0 => Some(*target),
                _ => None,
            })
            .collect()
    }

    /// Seconds played so far.
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    /// Phases played so far.
    pub fn phases_played(&self) -> usize {
        self.played
    }

    /// Interpolated property values at linear progress `t` of `phase`, without
    /// applying it.
    ///
    /// A target with no previous value appears directly at its target value; a
    /// visual swap happens at the end of the transition.
    pub fn preview(&self, phase: &Phase, t: f64) -> Vec<Directive> {
        let e = phase.ease;
        phase
            .directives
            .iter()
            .map(|d| {
                let from = self.get(d.target, d.property.kind());
                let property = match (from, &d.property) {
                    (Some(Property::Position(a)), Property::Position(b)) => {
                        Property::Position(a.lerp(*b, e.apply(t)))
                    }
                    (Some(Property::Radius(a)), Property::Radius(b)) => {
                        Property::Radius(e.interpolate(*a, *b, t))
                    }
                    (Some(Property::Opacity(a)), Property::Opacity(b)) => {
                        Property::Opacity(e.interpolate(*a, *b, t))
                    }
                    (Some(Property::Fill(a)), Property::Fill(b)) => {
                        Property::Fill(a.lerp(*b, e.apply(t)))
                    }
                    (Some(Property::Segment(a)), Property::Segment(b)) => {
                        let k = e.apply(t);
                        Property::Segment(Segment {
                            start: a.start.lerp(b.start, k),
                            end: a.end.lerp(b.end, k),
                        })
                    }
                    (Some(prev @ Property::Visual(_)), Property::Visual(_)) if t < 1.0 => {
                        prev.clone()
                    }
                    _ => d.property.clone(),
                };
                Directive {
                    target: d.target,
                    property,
                }
            })
            .collect()
    }
}

fn check_value(phase: &Phase, d: &Directive) -> CliquenetResult<()> {
    let finite_point = |p: Point| p.x.is_finite() && p.y.is_finite();
    let ok = match &d.property {
        Property::Position(p) => finite_point(*p),
        Property::Radius(r) => r.is_finite() && *r >= 0.0,
        Property::Opacity(o) => (0.0..=1.0).contains(o),
        Property::Segment(s) => finite_point(s.start) && finite_point(s.end),
        Property::Fill(_) | Property::Visual(_) => true,
    };
    if ok {
        Ok(())
    } else {
        Err(CliquenetError::validation(format!(
            "phase '{}' sets {:?} of {:?} to an unusable value",
            phase.name,
            d.property.kind(),
            d.target
        )))
    }
}

impl AnimationDriver for SceneState {
    fn play(&mut self, phase: &Phase) -> CliquenetResult<()> {
        if !(phase.run_time_s.is_finite() && phase.run_time_s >= 0.0)
            || !(phase.hold_s.is_finite() && phase.hold_s >= 0.0)
        {
            return Err(CliquenetError::validation(format!(
                "phase '{}' has a negative or non-finite duration",
                phase.name
            )));
        }
        for d in &phase.directives {
            check_value(phase, d)?;
        }
        for d in &phase.directives {
            self.values
                .insert((d.target, d.property.kind()), d.property.clone());
        }
        self.elapsed_s += phase.duration_s();
        self.played += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/driver.rs"]
mod tests;
