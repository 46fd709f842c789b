use anyhow::{Context, Result};
use meshview_3d::{GpuMesh, Material, Vertex};
use std::path::Path;
use wgpu::{BindGroupLayout, Device, Queue};

/// Decode an OBJ file into GPU vertex/index buffers. Only the first
/// model in the file is used; materials in the OBJ are ignored in favor
/// of the viewer's single diffuse texture.
pub fn load_obj_mesh(device: &Device, path: &Path, flip_v: bool) -> Result<GpuMesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("failed to load OBJ file {}", path.display()))?;

    let model = models
        .first()
        .with_context(|| format!("no mesh data in {}", path.display()))?;

    let vertices = build_vertices(&model.mesh, flip_v);
    Ok(GpuMesh::new(device, &vertices, &model.mesh.indices))
}

/// Interleave tobj's flat position/texcoord arrays into the renderer's
/// vertex format. Meshes without texcoords get (0, 0).
pub fn build_vertices(mesh: &tobj::Mesh, flip_v: bool) -> Vec<Vertex> {
    let vertex_count = mesh.positions.len() / 3;
    let mut vertices = Vec::with_capacity(vertex_count);

    for i in 0..vertex_count {
        let position = [
            mesh.positions[3 * i],
            mesh.positions[3 * i + 1],
            mesh.positions[3 * i + 2],
        ];

        let uv = if mesh.texcoords.len() >= 2 * (i + 1) {
            let u = mesh.texcoords[2 * i];
            let v = mesh.texcoords[2 * i + 1];
            [u, if flip_v { 1.0 - v } else { v }]
        } else {
            [0.0, 0.0]
        };

        vertices.push(Vertex { position, uv });
    }

    vertices
}

/// Decode an image file and upload it as the scene's diffuse texture.
pub fn load_texture(
    device: &Device,
    queue: &Queue,
    material_bgl: &BindGroupLayout,
    path: &Path,
    flip_y: bool,
) -> Result<Material> {
    let img = image::open(path)
        .with_context(|| format!("failed to load texture {}", path.display()))?;
    let img = if flip_y { img.flipv() } else { img };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Material::from_rgba8(
        device,
        queue,
        material_bgl,
        width,
        height,
        &rgba,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn quad_mesh() -> tobj::Mesh {
        tobj::Mesh {
            positions: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            texcoords: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        }
    }

    #[test]
    fn interleaves_positions_and_texcoords() {
        let vertices = build_vertices(&quad_mesh(), false);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn flip_v_mirrors_texcoords() {
        let vertices = build_vertices(&quad_mesh(), true);
        assert!((vertices[0].uv[1] - 1.0).abs() < EPS);
        assert!((vertices[2].uv[1] - 0.0).abs() < EPS);
        // U is untouched.
        assert!((vertices[2].uv[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn missing_texcoords_default_to_zero() {
        let mesh = tobj::Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let vertices = build_vertices(&mesh, true);
        assert_eq!(vertices.len(), 3);
        for vertex in vertices {
            assert_eq!(vertex.uv, [0.0, 0.0]);
        }
    }
}
