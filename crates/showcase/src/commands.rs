//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mesh::prelude::*;
use owo_colors::OwoColorize;
use tracing::debug;

/// Run the pipeline on one file and export what was asked for.
pub fn view(
    config: ShowcaseConfig,
    file: &Path,
    json: Option<&Path>,
    html: Option<&Path>,
) -> Result<()> {
    let showcase = Showcase::new(config);
    showcase
        .ensure_directories()
        .context("failed to create working directories")?;

    let (scene, vertex_count) = match showcase.view_path(file) {
        ViewOutcome::Ready {
            scene,
            vertex_count,
        } => (scene, vertex_count),
        ViewOutcome::NoModel { reason } => {
            println!("{} {reason}", "✗ No model:".red().bold());
            bail!("no model loaded from {}", file.display());
        }
    };

    println!("{} {}", "✓".green(), file.display());
    println!("Vertices: {vertex_count}");

    let figure = Figure::from_scene(&scene);
    if let Some(path) = json {
        figure
            .write_json(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  {} figure JSON -> {}", "→".cyan(), path.display());
    }
    if let Some(path) = html {
        let title = file
            .file_stem()
            .map_or_else(|| "model".to_string(), |s| s.to_string_lossy().into_owned());
        figure
            .write_html(path, &title)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  {} viewer page -> {}", "→".cyan(), path.display());
    }

    Ok(())
}

/// Center and unit-scale a mesh, then write it back out.
pub fn normalize(file: &Path, out: &Path, ascii: bool) -> Result<()> {
    let loaded = load_stl(file).with_context(|| format!("failed to load {}", file.display()))?;
    let Some(normalized) = mesh::scene::normalize(&loaded) else {
        bail!("{} contains no triangles", file.display());
    };
    debug!(
        max_range = normalized.max_range(),
        degenerate = normalized.is_degenerate(),
        "Normalized"
    );

    let encoding = if ascii {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    };
    save_stl(normalized.mesh(), out, encoding)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "{} {} -> {} ({} triangles, scale 1/{})",
        "✓".green(),
        file.display(),
        out.display(),
        normalized.mesh().face_count(),
        normalized.max_range()
    );
    Ok(())
}

/// Save a project record, empty unless `data` names a JSON object file.
pub fn save_project(config: ShowcaseConfig, name: &str, data: Option<&Path>) -> Result<()> {
    let record = match data {
        Some(path) => read_record(path)?,
        None => ProjectData::new(),
    };

    let store = Showcase::new(config).projects()?;
    let path = store.save(name, &record)?;
    println!("{} Project '{}' saved to {}", "✓".green(), name.trim(), path.display());
    Ok(())
}

fn read_record(path: &Path) -> Result<ProjectData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(root: &Path) -> ShowcaseConfig {
        ShowcaseConfig {
            staging_dir: root.join("temp"),
            projects_dir: root.join("projects"),
            ..ShowcaseConfig::default()
        }
    }

    fn write_triangle(path: &Path) {
        let mesh = IndexedMesh::from_triangles([Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
        )]);
        save_stl(&mesh, path, StlEncoding::Binary).unwrap();
    }

    #[test]
    fn view_writes_exports() {
        let root = tempfile::tempdir().unwrap();
        let stl = root.path().join("tri.stl");
        write_triangle(&stl);
        let json = root.path().join("tri.json");
        let html = root.path().join("tri.html");

        view(config(root.path()), &stl, Some(&json), Some(&html)).unwrap();
        assert!(json.is_file());
        assert!(std::fs::read_to_string(html).unwrap().contains("<title>tri</title>"));
    }

    #[test]
    fn view_fails_without_model() {
        let root = tempfile::tempdir().unwrap();
        let stl = root.path().join("empty.stl");
        std::fs::write(&stl, b"").unwrap();
        assert!(view(config(root.path()), &stl, None, None).is_err());
    }

    #[test]
    fn normalize_round_trips() {
        let root = tempfile::tempdir().unwrap();
        let stl = root.path().join("tri.stl");
        let out = root.path().join("unit.stl");
        write_triangle(&stl);

        normalize(&stl, &out, true).unwrap();
        let mesh = load_stl(&out).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert!((mesh.bounds().max_extent() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn save_project_with_and_without_data() {
        let root = tempfile::tempdir().unwrap();
        save_project(config(root.path()), "Robot Arm", None).unwrap();
        let saved = root.path().join("projects").join("robot_arm.json");
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "{}");

        let data = root.path().join("data.json");
        std::fs::write(&data, r#"{"model": "arm.stl"}"#).unwrap();
        save_project(config(root.path()), "Robot Arm", Some(&data)).unwrap();
        let store = ProjectStore::open(root.path().join("projects")).unwrap();
        assert_eq!(store.load("robot arm").unwrap()["model"], "arm.stl");

        std::fs::write(&data, "[1, 2]").unwrap();
        assert!(save_project(config(root.path()), "x", Some(&data)).is_err());
    }
}
