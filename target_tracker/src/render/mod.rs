//! Overlay geometry and the backends that draw it.

mod channel;
mod composer;
#[cfg(feature = "gizmos")]
mod gizmos;
mod primitive;

use bevy::prelude::*;

use crate::error::SubmitError;

pub use channel::ChannelBackend;
pub use composer::{OverlayComposer, OverlayStyle};
#[cfg(feature = "gizmos")]
pub use gizmos::GizmoBackend;
pub use primitive::DrawPrimitive;

/// Consumer of one frame's primitives. Graphics resources stay on the backend's side.
pub trait RenderBackend {
    fn submit(&mut self, primitives: &[DrawPrimitive]) -> Result<(), SubmitError>;
}

/// Extra backend the host submits every frame to, alongside any built-in one.
#[derive(Resource)]
pub struct BackendResource(pub Box<dyn RenderBackend + Send + Sync>);

impl BackendResource {
    pub fn new(backend: impl RenderBackend + Send + Sync + 'static) -> Self {
        Self(Box::new(backend))
    }
}
