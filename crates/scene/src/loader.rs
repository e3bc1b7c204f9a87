//! JSON scene files.
//!
//! A scene file is a single node object:
//!
//! ```json
//! {
//!   "name": "body",
//!   "translation": [0.0, 0.0, 0.0],
//!   "rotation": [0.0, 0.0, 0.0, 1.0],
//!   "scale": [1.0, 1.0, 1.0],
//!   "mesh": { "positions": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "indices": [0, 1, 2] },
//!   "children": []
//! }
//! ```
//!
//! Every field except `name` is optional.

use crate::node::{Mesh, MeshError, SceneNode, Transform3D};
use glam::{Quat, Vec3};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Errors emitted while loading a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Wrap IO errors when reading the file.
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse scene file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A node's mesh buffers are inconsistent.
    #[error("invalid mesh on node '{node}': {source}")]
    Mesh {
        /// Node carrying the mesh.
        node: String,
        /// Underlying problem.
        #[source]
        source: MeshError,
    },
    /// A node's rotation quaternion has no usable length.
    #[error("invalid rotation on node '{node}'")]
    Rotation {
        /// Offending node.
        node: String,
    },
}

#[derive(Debug, Deserialize)]
struct NodeDef {
    name: String,
    #[serde(default)]
    translation: [f32; 3],
    #[serde(default = "identity_rotation")]
    rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    scale: [f32; 3],
    #[serde(default)]
    mesh: Option<MeshDef>,
    #[serde(default)]
    children: Vec<NodeDef>,
}

#[derive(Debug, Deserialize)]
struct MeshDef {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl NodeDef {
    fn into_node(self) -> Result<SceneNode, SceneError> {
        let rotation = Quat::from_array(self.rotation);
        let length = rotation.length();
        if !length.is_finite() || length <= f32::EPSILON {
            return Err(SceneError::Rotation { node: self.name });
        }

        let transform = Transform3D::new(Vec3::from_array(self.translation))
            .with_rotation(rotation / length)
            .with_scale(Vec3::from_array(self.scale));

        let mesh = match self.mesh {
            Some(def) => {
                let positions = def.positions.into_iter().map(Vec3::from_array).collect();
                let mesh = Mesh::new(positions, def.indices).map_err(|source| SceneError::Mesh {
                    node: self.name.clone(),
                    source,
                })?;
                Some(mesh)
            }
            None => None,
        };

        let children = self
            .children
            .into_iter()
            .map(NodeDef::into_node)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SceneNode {
            name: self.name,
            transform,
            mesh,
            children,
        })
    }
}

/// Parse a scene node tree from a JSON string.
pub fn scene_from_str(input: &str) -> Result<SceneNode, SceneError> {
    let def: NodeDef = serde_json::from_str(input)?;
    def.into_node()
}

/// Load a scene node tree from a JSON file.
pub fn scene_from_file(path: &Path) -> Result<SceneNode, SceneError> {
    let contents = fs::read_to_string(path)?;
    let node = scene_from_str(&contents)?;
    tracing::info!(path = %path.display(), name = %node.name, "loaded scene file");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect_surfaces;

    #[test]
    fn parses_nested_nodes_with_defaults() {
        let json = r#"{
            "name": "body",
            "translation": [0.0, 1.0, 0.0],
            "children": [
                {
                    "name": "chest",
                    "scale": [2.0, 2.0, 2.0],
                    "mesh": {
                        "positions": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
                        "indices": [0, 1, 2]
                    }
                }
            ]
        }"#;

        let node = scene_from_str(json).unwrap();
        assert_eq!(node.name, "body");
        assert!(node.mesh.is_none());
        assert_eq!(node.transform.rotation, Quat::IDENTITY);

        let surfaces = collect_surfaces(&node);
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].name, "chest");
        let bounds = surfaces[0].world_bounds().unwrap();
        assert!((bounds.max - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_is_normalized() {
        let json = r#"{ "name": "n", "rotation": [0.0, 0.0, 0.0, 2.0] }"#;
        let node = scene_from_str(json).unwrap();
        assert!((node.transform.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_meshes_and_rotations() {
        let bad_index = r#"{ "name": "n", "mesh": { "positions": [[0,0,0]], "indices": [0, 0, 1] } }"#;
        assert!(matches!(
            scene_from_str(bad_index),
            Err(SceneError::Mesh { ref node, source: MeshError::IndexOutOfRange { index: 1, .. } }) if node == "n"
        ));

        let partial = r#"{ "name": "p", "children": [{ "name": "c", "mesh": { "positions": [[0,0,0]], "indices": [0] } }] }"#;
        assert!(matches!(
            scene_from_str(partial),
            Err(SceneError::Mesh { source: MeshError::IndexCount(1), .. })
        ));

        let zero_rotation = r#"{ "name": "r", "rotation": [0, 0, 0, 0] }"#;
        assert!(matches!(scene_from_str(zero_rotation), Err(SceneError::Rotation { .. })));

        assert!(matches!(scene_from_str("{"), Err(SceneError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = scene_from_file(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
