use crate::core::place::{Place, SceneHandle};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Street-level ("look around") imagery lookup
#[async_trait]
pub trait PreviewCapability: Send + Sync {
    /// `Ok(None)` means the place has no imagery
    async fn preview_scene(&self, place: &Place) -> Result<Option<SceneHandle>>;
}

#[derive(Clone)]
pub struct PreviewClient {
    capability: Arc<dyn PreviewCapability>,
}

impl PreviewClient {
    pub fn new(capability: Arc<dyn PreviewCapability>) -> Self {
        Self { capability }
    }

    pub async fn preview(&self, place: &Place) -> Option<SceneHandle> {
        match self.capability.preview_scene(place).await {
            Ok(scene) => scene,
            Err(e) => {
                log::warn!("preview for {:?} failed: {}", place.name, e);
                None
            }
        }
    }
}
