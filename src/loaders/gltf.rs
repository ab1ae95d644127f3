use glam::{Mat4, Vec3};
use std::path::Path;

use crate::error::{SceneError, SceneResult};

/// Loads every mesh vertex of a glTF file as a world-space point.
/// Indexed meshes also contribute one point per triangle centroid so sparse
/// low-poly models still give a usable cloud.
pub fn load_gltf_points(path: impl AsRef<Path>) -> SceneResult<Vec<Vec3>> {
    let path = path.as_ref();
    log::info!("Loading glTF point cloud: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path).map_err(|source| SceneError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let mut points = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, &Mat4::IDENTITY, &mut points);
        }
    }

    if points.is_empty() {
        return Err(SceneError::EmptyGeometry(path.display().to_string()));
    }

    log::debug!("Extracted {} points from {:?}", points.len(), path);
    Ok(points)
}

fn collect_node(node: &gltf::Node, buffers: &[gltf::buffer::Data], parent: &Mat4, points: &mut Vec<Vec3>) {
    let transform = *parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, buffers, &transform, points);
    }

    for child in node.children() {
        collect_node(&child, buffers, &transform, points);
    }
}

fn collect_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data], transform: &Mat4, points: &mut Vec<Vec3>) {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let Some(positions) = reader.read_positions() else {
            log::debug!("mesh {:?} has a primitive without positions", mesh.name());
            continue;
        };

        let vertices: Vec<Vec3> = positions
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if let Some(indices) = reader.read_indices() {
            let indices: Vec<u32> = indices.into_u32().collect();
            for triangle in indices.chunks_exact(3) {
                let corners = [triangle[0], triangle[1], triangle[2]].map(|i| vertices.get(i as usize));
                if let [Some(a), Some(b), Some(c)] = corners {
                    points.push((*a + *b + *c) / 3.0);
                }
            }
        }

        points.extend(vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_gltf_error() {
        let err = load_gltf_points("definitely/not/here.glb").unwrap_err();
        assert!(matches!(err, SceneError::Gltf { .. }));
    }
}
