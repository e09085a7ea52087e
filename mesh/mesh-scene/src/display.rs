//! Display options handed to the renderer alongside the geometry.

use serde::{Deserialize, Deserializer, Serialize};

/// How the renderer maps scene units to screen proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// Keep the data's own proportions.
    #[default]
    Data,
    /// Force a cube regardless of data extents.
    Cube,
    /// Let the renderer decide.
    Auto,
}

impl AspectMode {
    /// Name used by the renderer.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Cube => "cube",
            Self::Auto => "auto",
        }
    }
}

/// Camera pose, in normalized scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Eye position.
    pub eye: [f64; 3],
    /// Point the camera looks at.
    pub center: [f64; 3],
    /// Up direction.
    pub up: [f64; 3],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: [1.5, 1.5, 1.5],
            center: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

/// Margins around the viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
    /// Bottom.
    pub b: u32,
}

/// Fixed presentation of a loaded model.
///
/// The defaults are the showcase look: light-blue mesh at 80% opacity, axes
/// hidden, isometric-style camera at `(1.5, 1.5, 1.5)` and data-preserving
/// aspect ratio in a 600×400 viewport. Every field can be overridden from a
/// config file; missing fields keep their default.
///
/// # Example
///
/// ```
/// use mesh_scene::{AspectMode, DisplayOptions};
///
/// let options = DisplayOptions::default();
/// assert_eq!(options.color, "lightblue");
/// assert_eq!(options.opacity, 0.8);
/// assert!(!options.axes_visible);
/// assert_eq!(options.camera.eye, [1.5, 1.5, 1.5]);
/// assert_eq!(options.aspect_mode, AspectMode::Data);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Mesh color (CSS color string).
    pub color: String,
    /// Mesh opacity in `[0, 1]`. Config values outside the range are clamped.
    #[serde(deserialize_with = "clamped_opacity")]
    pub opacity: f64,
    /// Whether the x/y/z axes are drawn.
    pub axes_visible: bool,
    /// Camera pose.
    pub camera: Camera,
    /// Aspect ratio handling.
    pub aspect_mode: AspectMode,
    /// Hover behavior passed to the renderer.
    pub hover_info: String,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Viewport margins.
    pub margin: Margin,
    /// Whether a legend is drawn.
    pub show_legend: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color: "lightblue".to_string(),
            opacity: 0.8,
            axes_visible: false,
            camera: Camera::default(),
            aspect_mode: AspectMode::Data,
            hover_info: "none".to_string(),
            width: 600,
            height: 400,
            margin: Margin::default(),
            show_legend: false,
        }
    }
}

impl DisplayOptions {
    /// Set the mesh color.
    #[must_use]
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Set the opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the viewport size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

fn clamped_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let opacity = f64::deserialize(deserializer)?;
    if opacity.is_nan() {
        return Err(serde::de::Error::custom("opacity must be a number"));
    }
    Ok(opacity.clamp(0.0, 1.0))
}
