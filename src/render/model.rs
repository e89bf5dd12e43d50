// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! glTF 2.0 import. All meshes and primitives of the file are merged into a
//! single `ModelData`.

use crate::{
    error::{CubefallError, Result},
    render::mesh::{ModelData, Vertex},
};
use gltf::image::Source;
use log::info;
use std::path::{Path, PathBuf};

pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelData> {
    let path = path.as_ref();
    let gltf_err = |source| CubefallError::Gltf {
        path: path.to_path_buf(),
        source,
    };
    let gltf::Gltf { document, blob } = gltf::Gltf::open(path).map_err(gltf_err)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob).map_err(gltf_err)?;

    let mut model = ModelData::new();
    for mesh in document.meshes() {
        info!("mesh: {}", mesh.name().unwrap_or("<unnamed>"));
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let mut normals = reader.read_normals();
            let mut uvs = reader.read_tex_coords(0).map(|tc| tc.into_f32());
            let vertices: Vec<Vertex> = positions
                .map(|position| {
                    Vertex::new(
                        position,
                        normals.as_mut().and_then(|n| n.next()).unwrap_or_default(),
                        uvs.as_mut().and_then(|t| t.next()).unwrap_or_default(),
                    )
                })
                .collect();
            let count = vertices.len() as u32;
            match reader.read_indices() {
                Some(indices) => model.append_mesh(&vertices, indices.into_u32()),
                None => model.append_mesh(&vertices, 0..count),
            }
        }
    }

    if model.is_empty() {
        return Err(CubefallError::EmptyModel(path.to_path_buf()));
    }
    model.texture_path = diffuse_texture(&document, path.parent());
    info!(
        "model {} loaded: {} vertices, {} indices",
        path.display(),
        model.vertices.len(),
        model.indices.len()
    );
    Ok(model)
}

/// Base color texture of the first material, resolved next to the model.
/// Embedded images are not supported.
fn diffuse_texture(document: &gltf::Document, dir: Option<&Path>) -> Option<PathBuf> {
    let info = document
        .materials()
        .next()?
        .pbr_metallic_roughness()
        .base_color_texture()?;
    match info.texture().source().source() {
        Source::Uri { uri, .. } => Some(dir.map_or_else(|| PathBuf::from(uri), |d| d.join(uri))),
        Source::View { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // one triangle, positions only, buffer as data uri
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "meshes": [ { "name": "tri", "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "buffers": [ { "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA" } ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "accessors": [ { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0, 0, 0], "max": [1, 1, 0] } ]
    }"#;

    fn write_tmp(name: &str, text: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cubefall_model_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join(name);
        fs::write(&p, text).unwrap();
        p
    }

    #[test]
    fn loads_positions_without_indices() {
        let p = write_tmp("tri.gltf", TRIANGLE_GLTF);
        let m = load_model(&p).unwrap();
        assert_eq!(m.vertices.len(), 3);
        assert_eq!(m.indices, vec![0, 1, 2]);
        assert_eq!(m.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(m.vertices[2].normal, [0.0, 0.0, 0.0]);
        assert!(m.texture_path.is_none());
    }

    #[test]
    fn empty_document_is_an_error() {
        let p = write_tmp("empty.gltf", r#"{ "asset": { "version": "2.0" } }"#);
        assert!(matches!(load_model(&p), Err(CubefallError::EmptyModel(_))));
    }

    #[test]
    fn missing_file_is_gltf_error() {
        let r = load_model("/nonexistent/cubefall.gltf");
        assert!(matches!(r, Err(CubefallError::Gltf { .. })));
    }
}
