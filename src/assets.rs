use std::path::{Path, PathBuf};

use crate::{foundation::core::Rgb8, palette};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Drawable chosen for a node. Swapping it never changes the node's identity.
pub enum NodeVisual {
    /// Circular crop of a picture.
    Image {
        /// Picture file.
        path: PathBuf,
        /// Display radius.
        radius: f64,
    },
    /// Solid disc.
    Shape {
        /// Fill colour.
        color: Rgb8,
        /// Display radius.
        radius: f64,
    },
}

impl NodeVisual {
    /// Pick `<assets_dir>/<label>.png` when it exists, else a neutral disc.
    pub fn select(label: &str, assets_dir: Option<&Path>, radius: f64) -> Self {
        if let Some(dir) = assets_dir {
            let path = dir.join(format!("{label}.png"));
            if path.is_file() {
                return Self::Image { path, radius };
            }
            tracing::trace!(label, path = %path.display(), "no node image, using shape");
        }
        Self::Shape {
            color: palette::NEUTRAL,
            radius,
        }
    }

    /// Whether the visual is picture-backed.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Display radius.
    pub fn radius(&self) -> f64 {
        match self {
            Self::Image { radius, .. } | Self::Shape { radius, .. } => *radius,
        }
    }
}
