//! Product configurations: asset path, glass appearance, and the named
//! views the UI drives.

/// Glass appearance parameters, each component in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassParams {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

/// An immutable product variant. Exactly one is current at a time.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub name: &'static str,
    pub asset_path: &'static str,
    pub glass: GlassParams,
    /// View requested as soon as the asset finishes loading.
    pub start_view: &'static str,
    /// The one view where the user orbits the camera directly.
    pub free_view: &'static str,
    /// While this view is active the glass pulse animator runs.
    pub inspect_view: &'static str,
}

impl ModelConfig {
    pub fn shiny() -> Self {
        Self {
            name: "Shiny",
            asset_path: "models/model_shiny.glb",
            glass: GlassParams {
                color: [0.12, 0.13, 0.05],
                roughness: 0.03,
                metalness: 0.0,
                opacity: 0.9,
            },
            start_view: "Cam_Front",
            free_view: "Cam_Free",
            inspect_view: "Cam_Lenses",
        }
    }

    pub fn matte() -> Self {
        Self {
            name: "Matte",
            asset_path: "models/model_matte.glb",
            glass: GlassParams {
                color: [0.0, 0.0, 0.0],
                roughness: 0.1,
                metalness: 0.2,
                opacity: 0.8,
            },
            start_view: "Cam_Front",
            free_view: "Cam_Free",
            inspect_view: "Cam_Lenses",
        }
    }
}
