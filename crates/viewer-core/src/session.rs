//! The session object: single owner of all mutable viewer state.
//!
//! The frame driver holds one `ViewerSession` and calls `advance` each tick;
//! the UI calls `request_view` / `apply_configuration`; the asset loader
//! calls `finish_load` with the generation it was handed. There are no
//! ambient globals.

use std::time::Duration;

use glam::{Mat4, Vec3};

use crate::camera::CameraLens;
use crate::config::ModelConfig;
use crate::error::ViewerError;
use crate::materials::{build_glass_handles, GlassHandle};
use crate::orbit::OrbitController;
use crate::pulse::GlassPulse;
use crate::scene::{framing_pose, SceneGraph};
use crate::transition::CameraRig;
use crate::views::ViewRegistry;

/// Handed to the asset loader; completions carry the generation back so
/// stale loads can be discarded (last request wins).
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub generation: u64,
    pub asset_path: String,
}

pub struct LoadedModel {
    pub scene: SceneGraph,
    pub center: Vec3,
}

pub struct ViewerSession {
    pub config: ModelConfig,
    pub rig: CameraRig,
    pub lens: CameraLens,
    orbit: OrbitController,
    pulse: GlassPulse,
    views: ViewRegistry,
    glass: Vec<GlassHandle>,
    model: Option<LoadedModel>,
    next_generation: u64,
    pending: Option<u64>,
    /// Bumped whenever the attached model changes (set or cleared) so the
    /// renderer knows when to re-upload or drop GPU buffers.
    model_revision: u64,
}

impl ViewerSession {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            rig: CameraRig::default(),
            lens: CameraLens::default(),
            orbit: OrbitController::default(),
            pulse: GlassPulse::default(),
            views: ViewRegistry::new(),
            glass: Vec::new(),
            model: None,
            next_generation: 0,
            pending: None,
            model_revision: 0,
        }
    }

    /// Switch product variant. Releases the previous model wholesale (the
    /// renderer drops its GPU buffers on the next revision check) and returns
    /// the load request the shell should run. Reset happens before
    /// repopulate, so an empty scene renders while the load is pending.
    pub fn apply_configuration(&mut self, config: ModelConfig) -> LoadRequest {
        self.model = None;
        self.views.clear();
        self.glass.clear();
        self.pulse.reset();
        self.model_revision += 1;
        self.config = config;
        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending = Some(generation);
        log::info!(
            "configuration '{}' requested (generation {generation})",
            self.config.name
        );
        LoadRequest {
            generation,
            asset_path: self.config.asset_path.to_string(),
        }
    }

    /// Continuation for an asset load. Completions whose generation is not
    /// the pending one are discarded; a failed load leaves the session
    /// model-less and the frame loop running.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<SceneGraph, ViewerError>,
    ) -> Result<(), ViewerError> {
        if self.pending != Some(generation) {
            log::warn!("discarding stale asset load (generation {generation})");
            return Ok(());
        }
        self.pending = None;
        let scene = match result {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("asset load failed: {e}");
                return Err(e);
            }
        };

        let bounds = scene.bounds();
        let center = bounds.map(|(min, max)| (min + max) * 0.5).unwrap_or(Vec3::ZERO);
        for (_, node) in scene.cameras() {
            self.views
                .capture(&node.name, node.world_position, node.world_orientation, center);
        }
        log::info!("view registry: {} cameras captured", self.views.len());
        self.glass = build_glass_handles(&scene, &self.config.glass);
        self.model = Some(LoadedModel { scene, center });
        self.model_revision += 1;

        let start = self.config.start_view;
        self.request_view(start);
        if self.rig.active_view.as_deref() != Some(start) {
            // Start camera missing from the asset: fall back to framing the
            // bounds directly.
            if let Some((min, max)) = bounds {
                let pose = framing_pose(min, max);
                self.lens.fit_clip_planes((pose.position - pose.target).length());
                self.rig.snap_to(&pose);
            }
        } else if let Some(pose) = self.views.lookup(start) {
            self.lens
                .fit_clip_planes((pose.position - pose.target).length());
        }
        Ok(())
    }

    /// Switch to a named view. Unknown names are a logged no-op. The
    /// free-look view bypasses the transition and enables orbit drag; every
    /// other view disables drag and starts a timed move from the current
    /// live pose.
    pub fn request_view(&mut self, name: &str) {
        let Some(pose) = self.views.lookup(name).cloned() else {
            log::warn!("view '{name}' not in registry; ignoring");
            return;
        };
        if name == self.config.free_view {
            self.rig.snap_to(&pose);
            self.rig.drag_enabled = true;
            self.orbit.sync_to_pose(&pose);
        } else {
            self.rig.drag_enabled = false;
            self.rig.begin_transition(&pose);
        }
        self.rig.active_view = Some(name.to_string());
    }

    /// Per-tick update: pulse first, then the camera transition, then the
    /// orbit controller writes the rig iff drag is enabled, so user input
    /// composes on top of the latest authoritative pose. Render is issued by
    /// the shell afterwards.
    pub fn advance(&mut self, dt: Duration) {
        let in_inspection = self.model.is_some()
            && self.rig.active_view.as_deref() == Some(self.config.inspect_view);
        self.pulse.advance(dt, in_inspection, &mut self.glass);
        self.rig.advance(dt);
        if self.rig.drag_enabled {
            self.orbit.write_rig(&mut self.rig);
        }
    }

    /// Feed a pointer drag into the free-look orbit; ignored unless the
    /// free-look view is active.
    pub fn apply_orbit_drag(&mut self, dx: f32, dy: f32) {
        if self.rig.drag_enabled {
            self.orbit.apply_drag(dx, dy);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.rig.view_matrix()
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    pub fn model_revision(&self) -> u64 {
        self.model_revision
    }

    pub fn glass_handles(&self) -> &[GlassHandle] {
        &self.glass
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn is_load_pending(&self) -> bool {
        self.pending.is_some()
    }
}
