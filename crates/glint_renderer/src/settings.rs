//! Serializable render settings.

use serde::{Deserialize, Serialize};

use crate::camera::CameraResult;
use crate::{Camera, CameraSettings, RenderConfig};

/// Everything needed to set up a render besides the scene itself.
///
/// Missing fields fall back to their defaults, so a settings file only needs
/// to name what it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub camera: CameraSettings,
    pub render: RenderConfig,
}

impl RenderSettings {
    /// Build and initialize the camera these settings describe.
    pub fn camera(&self) -> CameraResult<Camera> {
        let mut camera = Camera::from_settings(&self.camera);
        camera.initialize()?;
        Ok(camera)
    }
}
