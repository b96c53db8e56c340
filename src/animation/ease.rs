#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Timing curve of a transition.
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Accelerate.
    InQuad,
    /// Decelerate.
    OutQuad,
    /// Slow start and end; the usual motion-graphics default.
    #[default]
    InOutCubic,
    /// Jump to the target at the end of the transition.
    Step,
}

impl Ease {
    /// Map linear progress `t` to eased progress, both in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Step => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Value between `from` and `to` at linear progress `t`.
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
