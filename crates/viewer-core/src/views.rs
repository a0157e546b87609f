//! Named camera poses captured from the loaded asset.
//!
//! The registry is populated once per asset load and replaced wholesale on a
//! configuration switch. A failed lookup is a tolerated no-op for callers,
//! never a fatal error.

use fnv::FnvHashMap;
use glam::{Quat, Vec3};

/// A camera pose captured from an authored camera node. Immutable once
/// captured; the look-at target is the model's bounding-box center, shared by
/// every view of the same asset.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub target: Vec3,
}

#[derive(Default)]
pub struct ViewRegistry {
    poses: FnvHashMap<String, Pose>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a pose from a camera node's world transform. `center` is the
    /// shared bounding-box center used as the look-at target.
    pub fn capture(&mut self, name: &str, position: Vec3, orientation: Quat, center: Vec3) {
        self.poses.insert(
            name.to_string(),
            Pose {
                position,
                orientation,
                target: center,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&Pose> {
        self.poses.get(name)
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(String::as_str)
    }
}
