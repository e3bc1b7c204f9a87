//! Scene nodes, meshes and surface collection.

use glam::{Mat4, Quat, Vec3};
use liftmap_core::Aabb;
use thiserror::Error;

/// Translation, rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// Translation.
    pub position: Vec3,
    /// Rotation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    /// Pure translation.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local -> parent matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Errors raised when building a mesh from raw buffers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// Index buffer does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),
    /// An index points past the vertex buffer.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index.
        index: u32,
        /// Number of vertices available.
        vertex_count: usize,
    },
}

/// Indexed triangle mesh in its node's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh, checking that indices form whole, in-range triangles.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self { positions, indices })
    }

    /// Primitives build their buffers by hand and skip validation.
    pub(crate) fn from_parts(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(Self::new(positions.clone(), indices.clone()).is_ok());
        Self { positions, indices }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as corner triples in local space.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Local-space bounds, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }
}

/// A node in the model tree. Nodes carrying a mesh are drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name, used for diagnostics.
    pub name: String,
    /// Transform relative to the parent node.
    pub transform: Transform3D,
    /// Geometry drawn at this node, if any.
    pub mesh: Option<Mesh>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// An empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform3D::default(),
            mesh: None,
            children: Vec::new(),
        }
    }

    /// A drawable node.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    /// Builder: set transform.
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this node carries geometry.
    pub fn is_drawable(&self) -> bool {
        self.mesh.is_some()
    }

    /// Bounds of all geometry under this node, in the node's parent space.
    pub fn world_bounds(&self) -> Option<Aabb> {
        collect_surfaces(self)
            .iter()
            .filter_map(Surface::world_bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }
}

/// A drawable mesh together with its accumulated world transform.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    /// Name of the owning node.
    pub name: &'a str,
    /// Local-space geometry.
    pub mesh: &'a Mesh,
    /// Local -> model space.
    pub world: Mat4,
}

impl Surface<'_> {
    /// Model-space bounds.
    pub fn world_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.mesh
                .positions()
                .iter()
                .map(|&p| self.world.transform_point3(p)),
        )
    }
}

/// Flatten every drawable node under `root`, at any depth, in declaration order.
pub fn collect_surfaces(root: &SceneNode) -> Vec<Surface<'_>> {
    let mut surfaces = Vec::new();
    let mut stack = vec![(root, Mat4::IDENTITY)];

    while let Some((node, parent_world)) = stack.pop() {
        let world = parent_world * node.transform.matrix();
        if let Some(mesh) = &node.mesh {
            surfaces.push(Surface {
                name: &node.name,
                mesh,
                world,
            });
        }
        // Reverse so the first child is visited first
        for child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }

    surfaces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuboid;

    #[test]
    fn mesh_rejects_partial_triangles() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            Mesh::new(positions.clone(), vec![0, 1]),
            Err(MeshError::IndexCount(2))
        );
        assert_eq!(
            Mesh::new(positions.clone(), vec![0, 1, 3]),
            Err(MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );
        let mesh = Mesh::new(positions, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[Vec3::ZERO, Vec3::X, Vec3::Y]]);
    }

    #[test]
    fn collects_nested_drawables_in_order() {
        let unit = cuboid(Vec3::ZERO, Vec3::ONE);
        let root = SceneNode::group("root")
            .with_child(SceneNode::with_mesh("a", unit.clone()))
            .with_child(
                SceneNode::group("group").with_child(
                    SceneNode::group("deeper")
                        .with_child(SceneNode::with_mesh("b", unit.clone()))
                        .with_child(SceneNode::with_mesh("c", unit.clone())),
                ),
            )
            .with_child(SceneNode::with_mesh("d", unit));

        let names: Vec<_> = collect_surfaces(&root).iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn world_transform_accumulates_down_the_tree() {
        let root = SceneNode::group("root")
            .with_transform(Transform3D::new(Vec3::new(1.0, 0.0, 0.0)).with_scale(Vec3::splat(2.0)))
            .with_child(
                SceneNode::with_mesh("box", cuboid(Vec3::ZERO, Vec3::ONE))
                    .with_transform(Transform3D::new(Vec3::new(0.0, 1.0, 0.0))),
            );

        let surfaces = collect_surfaces(&root);
        assert_eq!(surfaces.len(), 1);

        let bounds = surfaces[0].world_bounds().unwrap();
        assert!((bounds.min - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
        assert!((bounds.max - Vec3::new(3.0, 4.0, 2.0)).length() < 1e-5);
        assert_eq!(root.world_bounds(), Some(bounds));
    }

    #[test]
    fn empty_group_has_no_bounds() {
        assert!(SceneNode::group("empty").world_bounds().is_none());
        assert!(!SceneNode::group("empty").is_drawable());
    }
}
