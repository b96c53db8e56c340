use crate::foundation::error::{CliquenetError, CliquenetResult};

pub use kurbo::{Point, Vec2};

/// Stable node identity: index of the node in [`crate::Topology::nodes`].
///
/// Every lookup (edges, matrix rows, scene registry) is keyed on this id, never on a
/// drawable handle, so a node keeps its identity when its visual is swapped.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the node in topology order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Frame rate as a rational number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> CliquenetResult<Self> {
        if den == 0 {
            return Err(CliquenetError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CliquenetError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Round a duration up to whole frames.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Straight (non-premultiplied) RGB colour, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// `#FFFFFF`
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    /// `#000000`
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    /// `#888888`
    pub const GREY: Self = Self::new(0x88, 0x88, 0x88);

    /// Build a colour from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> CliquenetResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(CliquenetError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> CliquenetResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CliquenetError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear blend, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        fn mix(a: u8, b: u8, t: f64) -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        }

        let t = t.clamp(0.0, 1.0);
        Self {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
        }
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
