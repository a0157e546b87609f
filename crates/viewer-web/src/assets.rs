//! GLB fetching and decoding into the core scene graph.
//!
//! Loads are fire-and-forget: the session hands out a generation with each
//! `LoadRequest` and discards completions that are no longer current, so
//! overlapping configuration switches resolve last-request-wins.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use viewer_core::{
    is_glass_material, LoadRequest, MeshData, MeshGeometry, NodeKind, SceneGraph, SceneNode,
    ViewerError, ViewerSession,
};

pub fn spawn_load(session: Rc<RefCell<ViewerSession>>, request: LoadRequest) {
    spawn_local(async move {
        let result = match fetch_glb(&request.asset_path).await {
            Ok(bytes) => decode_scene(&request.asset_path, &bytes),
            Err(e) => Err(e),
        };
        // A failed or stale load leaves the scene empty; the session logs it.
        _ = session.borrow_mut().finish_load(request.generation, result);
    });
}

async fn fetch_glb(path: &str) -> Result<Vec<u8>, ViewerError> {
    let fetch_err = |reason: String| ViewerError::AssetFetch {
        path: path.to_string(),
        reason,
    };
    let window = web::window().ok_or_else(|| fetch_err("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_err(format!("{e:?}")))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| fetch_err("fetch did not yield a Response".into()))?;
    if !resp.ok() {
        return Err(fetch_err(format!("HTTP {}", resp.status())));
    }
    let buf_promise = resp.array_buffer().map_err(|e| fetch_err(format!("{e:?}")))?;
    let buf = JsFuture::from(buf_promise)
        .await
        .map_err(|e| fetch_err(format!("{e:?}")))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Decode a binary glTF into the loader-neutral scene graph: flatten world
/// transforms, keep camera nodes as poses, and pull triangle geometry plus
/// the glass tag out of every mesh node.
pub fn decode_scene(path: &str, bytes: &[u8]) -> Result<SceneGraph, ViewerError> {
    let decode_err = |reason: String| ViewerError::AssetDecode {
        path: path.to_string(),
        reason,
    };
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| decode_err(e.to_string()))?;
    let blob = gltf.blob.as_deref();
    let document = &gltf.document;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ViewerError::EmptyAsset {
            path: path.to_string(),
        })?;

    let mut graph = SceneGraph::default();
    for root in scene.nodes() {
        visit_node(&root, Mat4::IDENTITY, blob, &mut graph)
            .map_err(|reason| decode_err(reason))?;
    }
    if graph.nodes.is_empty() {
        return Err(ViewerError::EmptyAsset {
            path: path.to_string(),
        });
    }
    Ok(graph)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    blob: Option<&[u8]>,
    graph: &mut SceneGraph,
) -> Result<(), String> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;
    let (_, world_orientation, world_position) = world.to_scale_rotation_translation();

    let name = node.name().unwrap_or("").to_string();
    let (kind, mesh) = if let Some(mesh) = node.mesh() {
        (NodeKind::Mesh, Some(read_mesh(&mesh, blob)?))
    } else if node.camera().is_some() {
        (NodeKind::Camera, None)
    } else {
        (NodeKind::Other, None)
    };

    graph.nodes.push(SceneNode {
        name,
        kind,
        world_position,
        world_orientation,
        world_transform: world,
        mesh,
    });

    for child in node.children() {
        visit_node(&child, world, blob, graph)?;
    }
    Ok(())
}

fn read_mesh(mesh: &gltf::Mesh, blob: Option<&[u8]>) -> Result<MeshData, String> {
    let mut geometry = MeshGeometry::default();
    let mut material_name = String::new();
    let mut base_color = [1.0, 1.0, 1.0, 1.0];

    for primitive in mesh.primitives() {
        let material = primitive.material();
        if material_name.is_empty() {
            if let Some(n) = material.name() {
                material_name = n.to_string();
                base_color = material.pbr_metallic_roughness().base_color_factor();
            }
        }

        let reader = primitive.reader(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(_) => None,
        });
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or("mesh primitive has no positions")?
            .collect();
        let normals: Vec<[f32; 3]> = match reader.read_normals() {
            Some(iter) => iter.collect(),
            None => vec![[0.0, 1.0, 0.0]; positions.len()],
        };
        let base = geometry.positions.len() as u32;
        let indices: Vec<u32> = match reader.read_indices() {
            Some(iter) => iter.into_u32().map(|i| i + base).collect(),
            None => (0..positions.len() as u32).map(|i| i + base).collect(),
        };
        geometry.positions.extend(positions);
        geometry.normals.extend(normals);
        geometry.indices.extend(indices);
    }

    let glass_tagged = is_glass_material(&material_name);
    Ok(MeshData {
        material_name,
        base_color,
        glass_tagged,
        geometry,
    })
}
