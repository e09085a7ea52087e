//! Plotly figure export.
//!
//! The browser viewer is plotly.js: a scene becomes one `mesh3d` trace
//! (vertex columns `x/y/z`, face columns `i/j/k`) plus a layout carrying the
//! display options. [`Figure::to_html`] wraps that in a standalone page.

use std::path::Path;

use serde::Serialize;

use crate::display::DisplayOptions;
use crate::error::SceneResult;
use crate::scene::SceneDescription;

/// plotly.js bundle loaded by exported pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// A plotly figure with a single `mesh3d` trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Traces.
    pub data: Vec<Mesh3dTrace>,
    /// Layout.
    pub layout: Layout,
}

/// A `mesh3d` trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh3dTrace {
    /// Always `"mesh3d"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Vertex x coordinates.
    pub x: Vec<f64>,
    /// Vertex y coordinates.
    pub y: Vec<f64>,
    /// Vertex z coordinates.
    pub z: Vec<f64>,
    /// First vertex of each face.
    pub i: Vec<u32>,
    /// Second vertex of each face.
    pub j: Vec<u32>,
    /// Third vertex of each face.
    pub k: Vec<u32>,
    /// Mesh color.
    pub color: String,
    /// Mesh opacity.
    pub opacity: f64,
    /// Hover behavior.
    pub hoverinfo: String,
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// 3D scene settings.
    pub scene: SceneLayout,
    /// Viewport margins.
    pub margin: MarginLayout,
    /// Viewport width.
    pub width: u32,
    /// Viewport height.
    pub height: u32,
    /// Legend visibility.
    pub showlegend: bool,
}

/// 3D scene settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    /// X axis.
    pub xaxis: Axis,
    /// Y axis.
    pub yaxis: Axis,
    /// Z axis.
    pub zaxis: Axis,
    /// Camera pose.
    pub camera: CameraLayout,
    /// Aspect mode name.
    pub aspectmode: &'static str,
}

/// Axis visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Whether the axis is drawn.
    pub visible: bool,
}

/// Camera pose in plotly's `{x, y, z}` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraLayout {
    /// Up direction.
    pub up: Xyz,
    /// Look-at point.
    pub center: Xyz,
    /// Eye position.
    pub eye: Xyz,
}

/// A plotly `{x, y, z}` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Xyz {
    /// X.
    pub x: f64,
    /// Y.
    pub y: f64,
    /// Z.
    pub z: f64,
}

impl From<[f64; 3]> for Xyz {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Margins in plotly's `{l, r, t, b}` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarginLayout {
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
    /// Bottom.
    pub b: u32,
}

impl Layout {
    fn from_display(display: &DisplayOptions) -> Self {
        let axis = Axis {
            visible: display.axes_visible,
        };
        Self {
            scene: SceneLayout {
                xaxis: axis,
                yaxis: axis,
                zaxis: axis,
                camera: CameraLayout {
                    up: display.camera.up.into(),
                    center: display.camera.center.into(),
                    eye: display.camera.eye.into(),
                },
                aspectmode: display.aspect_mode.as_str(),
            },
            margin: MarginLayout {
                l: display.margin.l,
                r: display.margin.r,
                t: display.margin.t,
                b: display.margin.b,
            },
            width: display.width,
            height: display.height,
            showlegend: display.show_legend,
        }
    }
}

impl Figure {
    /// Build the figure for a scene.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_scene::{build_scene, DisplayOptions, Figure};
    /// use mesh_types::{IndexedMesh, Triangle};
    ///
    /// let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [2.0, 0.0, 0.0],
    ///     [0.0, 2.0, 0.0],
    /// )]);
    /// let scene = build_scene(&mesh, &DisplayOptions::default()).unwrap().unwrap();
    ///
    /// let figure = Figure::from_scene(&scene);
    /// assert_eq!(figure.data[0].i, vec![0]);
    /// assert_eq!(figure.data[0].k, vec![2]);
    /// ```
    #[must_use]
    pub fn from_scene(scene: &SceneDescription) -> Self {
        let vertices = scene.vertices();
        let faces = scene.faces();
        let display = scene.display();

        let trace = Mesh3dTrace {
            kind: "mesh3d",
            x: vertices.iter().map(|v| v.position.x).collect(),
            y: vertices.iter().map(|v| v.position.y).collect(),
            z: vertices.iter().map(|v| v.position.z).collect(),
            i: faces.iter().map(|f| f[0]).collect(),
            j: faces.iter().map(|f| f[1]).collect(),
            k: faces.iter().map(|f| f[2]).collect(),
            color: display.color.clone(),
            opacity: display.opacity,
            hoverinfo: display.hover_info.clone(),
        };

        Self {
            data: vec![trace],
            layout: Layout::from_display(display),
        }
    }

    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Standalone HTML page rendering the figure with plotly.js.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_html(&self, title: &str) -> SceneResult<String> {
        // "</" would end the inline script early
        let json = self.to_json()?.replace("</", "<\\/");

        let title = escape_html(title);
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}" charset="utf-8"></script>
</head>
<body>
<h1>{title}</h1>
<div id="scene"></div>
<script>
const figure = {json};
Plotly.newPlot("scene", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#
        ))
    }

    /// Write the figure JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> SceneResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Write the standalone HTML page to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_html<P: AsRef<Path>>(&self, path: P, title: &str) -> SceneResult<()> {
        std::fs::write(path, self.to_html(title)?)?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
