use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::Fps,
    error::{CliquenetError, CliquenetResult},
};

/// Scalar configuration surface read by the layout engine and the choreography.
///
/// Every field has a serde default, so a JSON file only needs to list overrides.
/// Values are read once per phase; nothing reconfigures mid-run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Frames per second of the rendered animation.
    pub fps: u32,
    /// Display radius of a plain node.
    pub node_radius: f64,
    /// Display radius of an image-backed node.
    pub node_radius_image: f64,
    /// Stroke width of edges.
    pub edge_width: f64,
    /// Opacity of edges in `[0, 1]`.
    pub edge_opacity: f64,
    /// Draw text labels next to nodes.
    pub show_labels: bool,
    /// Upper bound for the node radius once nodes are arranged along the grid.
    pub matrix_node_radius: f64,
    /// Outset of the grid lines around the grid nodes, in cells.
    pub grid_buff: f64,
    /// Divisor applied to `node_radius` before the grid phases.
    pub grid_shrink_factor: f64,
    /// Vertical coordinate of the grid row.
    pub grid_origin_y: f64,
    /// Scale applied to the hub clique in the compressed phases.
    pub compress_factor: f64,
    /// Horizontal shift of the compressed hub clique while the left cliques are built.
    pub staging_shift_x: f64,
    /// Directory holding `<label>.png` node images.
    pub assets_dir: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            node_radius: 0.2,
            node_radius_image: 0.35,
            edge_width: 2.0,
            edge_opacity: 1.0,
            show_labels: false,
            matrix_node_radius: 0.12,
            grid_buff: 1.0,
            grid_shrink_factor: 3.0,
            grid_origin_y: 3.0,
            compress_factor: 0.5,
            staging_shift_x: 4.0,
            assets_dir: None,
        }
    }
}

impl SceneConfig {
    /// Parse a configuration from a JSON reader. The result is validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> CliquenetResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CliquenetError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CliquenetResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CliquenetError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every scalar for a usable value.
    pub fn validate(&self) -> CliquenetResult<()> {
        if self.fps == 0 {
            return Err(CliquenetError::validation("fps must be > 0"));
        }
        for (name, value) in [
            ("node_radius", self.node_radius),
            ("node_radius_image", self.node_radius_image),
            ("edge_width", self.edge_width),
            ("matrix_node_radius", self.matrix_node_radius),
            ("grid_shrink_factor", self.grid_shrink_factor),
            ("compress_factor", self.compress_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CliquenetError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.grid_buff.is_finite() || self.grid_buff < 0.0 {
            return Err(CliquenetError::validation(
                "grid_buff must be finite and >= 0",
            ));
        }
        for (name, value) in [
            ("grid_origin_y", self.grid_origin_y),
            ("staging_shift_x", self.staging_shift_x),
        ] {
            if !value.is_finite() {
                return Err(CliquenetError::validation(format!("{name} must be finite")));
            }
        }
        if !(0.0..=1.0).contains(&self.edge_opacity) {
            return Err(CliquenetError::validation(
                "edge_opacity must be within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Frame rate as a validated [`Fps`].
    pub fn frame_rate(&self) -> CliquenetResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Node radius used from the grid-row phase on.
    pub fn grid_node_radius(&self) -> f64 {
        (self.node_radius / self.grid_shrink_factor).min(self.matrix_node_radius)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
