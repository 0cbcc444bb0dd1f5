//! Immediate-mode backend on Bevy gizmos.

use bevy::prelude::*;

use crate::error::SubmitError;
use crate::render::{DrawPrimitive, RenderBackend};

pub struct GizmoBackend<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
}

impl<'a, 'w, 's> GizmoBackend<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>) -> Self {
        Self { gizmos }
    }
}

impl RenderBackend for GizmoBackend<'_, '_, '_> {
    fn submit(&mut self, primitives: &[DrawPrimitive]) -> Result<(), SubmitError> {
        for primitive in primitives {
            let color = primitive.color();
            for (start, end) in primitive.edges() {
                self.gizmos.line(start, end, color);
            }
        }
        Ok(())
    }
}
