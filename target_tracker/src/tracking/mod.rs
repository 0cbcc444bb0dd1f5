//! Update-cycle tracking and render-cycle smoothing.

mod classifier;
mod pipeline;
mod scanner;
mod smoother;
mod snapshot;

pub use classifier::{Classification, VisibilityClassifier};
pub use pipeline::{OverlayRenderer, Tracker};
pub use scanner::{SpatialScanner, TargetFilter};
pub use smoother::{frame_factor, PositionSmoother, SmoothedEntry, SmoothedPositions};
pub use snapshot::{SnapshotSlot, TrackingSnapshot};
