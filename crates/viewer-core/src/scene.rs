//! Loader-neutral scene graph.
//!
//! The web crate decodes a GLB into these types; the core never touches
//! platform APIs. The glass predicate is resolved at decode time into the
//! explicit `glass_tagged` flag so the material pipeline dispatches on a tag
//! rather than re-matching names.

use glam::{Mat4, Quat, Vec3};

use crate::constants::{DEFAULT_FOVY_RADIANS, FRAMING_MARGIN};
use crate::views::Pose;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Mesh,
    Camera,
    Other,
}

/// Flat triangle geometry ready for GPU upload.
#[derive(Clone, Debug, Default)]
pub struct MeshGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub material_name: String,
    /// Authored base color, kept untouched for non-glass meshes.
    pub base_color: [f32; 4],
    pub glass_tagged: bool,
    pub geometry: MeshGeometry,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub world_position: Vec3,
    pub world_orientation: Quat,
    pub world_transform: Mat4,
    pub mesh: Option<MeshData>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
}

/// Case-insensitive material-name predicate for glass parts. Applied once at
/// decode time; `"green"` is the product's legacy authoring tag.
pub fn is_glass_material(material_name: &str) -> bool {
    let lower = material_name.to_ascii_lowercase();
    lower.contains("glass") || lower.contains("green")
}

impl SceneGraph {
    pub fn cameras(&self) -> impl Iterator<Item = (usize, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Camera)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (usize, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Mesh)
    }

    /// World-space axis-aligned bounds over all mesh vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        for (_, node) in self.meshes() {
            let Some(mesh) = &node.mesh else { continue };
            for p in &mesh.geometry.positions {
                let w = node.world_transform.transform_point3(Vec3::from(*p));
                min = min.min(w);
                max = max.max(w);
                any = true;
            }
        }
        any.then_some((min, max))
    }
}

/// Default camera pose framing the given bounds, used when the configured
/// start view is missing from the asset. Mirrors the prototype's automatic
/// framing: distance from the largest extent and the vertical FOV, eye raised
/// to 0.4 x the extent.
pub fn framing_pose(min: Vec3, max: Vec3) -> Pose {
    let center = (min + max) * 0.5;
    let size = max - min;
    let max_dim = size.x.max(size.y).max(size.z).max(1e-3);
    let distance = (max_dim / 2.0) / (DEFAULT_FOVY_RADIANS / 2.0).tan() * FRAMING_MARGIN;
    let position = center + Vec3::new(0.0, max_dim * 0.4, distance);
    let orientation =
        Quat::from_mat4(&Mat4::look_at_rh(position, center, Vec3::Y).inverse());
    Pose {
        position,
        orientation,
        target: center,
    }
}
