//! Entry point: load an OBJ model and report what would be uploaded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use asset::{MeshData, ObjDocument};

const DEFAULT_MODEL: &str = "sample.obj";

fn parse_model_arg<I: IntoIterator<Item = String>>(args: I) -> PathBuf {
    // Accept: --model=<path>; last one wins
    let mut model = None;
    for arg in args {
        if let Some(val) = arg.strip_prefix("--model=") {
            if val.is_empty() {
                log::warn!("Empty --model value, ignoring.");
                continue;
            }
            model = Some(PathBuf::from(val));
        }
    }
    model.unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL))
}

fn log_document(doc: &ObjDocument) {
    log::info!(
        "Model '{}' (material library: {})",
        doc.name.as_deref().unwrap_or("<unnamed>"),
        doc.material_lib.as_deref().unwrap_or("<none>")
    );
    for group in &doc.groups {
        log::debug!(
            "  group '{}': {} vertices, {} uvs, {} normals, {} faces, {} material range(s), smoothing={}",
            group.name,
            group.vertices.len(),
            group.uvs.len(),
            group.normals.len(),
            group.faces.len(),
            group.material_ranges.len(),
            group.smoothing_group
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let model_path = parse_model_arg(std::env::args().skip(1));
    log::info!("Loading model from {}", model_path.display());

    let doc = asset::load_obj_from_path(&model_path)
        .with_context(|| format!("Failed to load OBJ file: {}", model_path.display()))?;
    log_document(&doc);

    let mesh = MeshData::from_document(&doc)
        .with_context(|| format!("Failed to build mesh buffers for {}", model_path.display()))?;
    log::info!("Vertices: {}", mesh.vertex_count());
    log::info!("Triangles: {}", mesh.triangle_count());

    Ok(())
}
