use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::error::SubmitError;
use crate::render::{DrawPrimitive, RenderBackend};

/// Hands each frame to another thread over a bounded channel. Never blocks:
/// a full queue drops the frame and reports it.
pub struct ChannelBackend {
    tx: Sender<Vec<DrawPrimitive>>,
}

impl ChannelBackend {
    pub fn bounded(capacity: usize) -> (Self, Receiver<Vec<DrawPrimitive>>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl RenderBackend for ChannelBackend {
    fn submit(&mut self, primitives: &[DrawPrimitive]) -> Result<(), SubmitError> {
        self.tx
            .try_send(primitives.to_vec())
            .map_err(|err| match err {
                TrySendError::Full(_) => SubmitError::Full,
                TrySendError::Disconnected(_) => SubmitError::Disconnected,
            })
    }
}
