//! Glass material construction for the configuration swap.
//!
//! One handle per glass-tagged mesh node, rebuilt wholesale on every
//! configuration switch. Meshes outside the glass tag keep their authored
//! material untouched.

use glam::Vec3;

use crate::config::GlassParams;
use crate::constants::{GLASS_IOR, GLASS_TRANSMISSION, LOGO_EMISSIVE_INTENSITY};
use crate::scene::SceneGraph;

/// Parameters the renderer interprets for a transparent glass part. The
/// emissive term carries the logo overlay at fixed intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalMaterial {
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transmission: f32,
    pub ior: f32,
    pub emissive_intensity: f32,
    pub depth_write: bool,
}

impl PhysicalMaterial {
    pub fn glass(params: &GlassParams) -> Self {
        Self {
            base_color: Vec3::from(params.color),
            roughness: params.roughness,
            metalness: params.metalness,
            opacity: params.opacity,
            transmission: GLASS_TRANSMISSION,
            ior: GLASS_IOR,
            emissive_intensity: LOGO_EMISSIVE_INTENSITY,
            depth_write: false,
        }
    }
}

/// A live glass material bound to a mesh node, with the color it was built
/// with so the pulse animator can restore it.
#[derive(Clone, Debug)]
pub struct GlassHandle {
    pub node_index: usize,
    pub material: PhysicalMaterial,
    pub original_color: Vec3,
}

/// Build one handle per glass-tagged mesh, in traversal order. Zero matches
/// is a diagnostic, not an error: the pulse animator simply has nothing to
/// drive.
pub fn build_glass_handles(scene: &SceneGraph, params: &GlassParams) -> Vec<GlassHandle> {
    let mut handles = Vec::new();
    for (index, node) in scene.meshes() {
        let Some(mesh) = &node.mesh else { continue };
        if !mesh.glass_tagged {
            continue;
        }
        let material = PhysicalMaterial::glass(params);
        handles.push(GlassHandle {
            node_index: index,
            material,
            original_color: material.base_color,
        });
    }
    if handles.is_empty() {
        log::warn!("no glass-tagged meshes in asset; pulse animation disabled");
    } else {
        log::info!("glass materials rebuilt for {} meshes", handles.len());
    }
    handles
}
