//! Rendering-side visibility modules
//! Contains raycast surface scanning, visible-range calculation, the depth-based
//! fallback, the scan scheduler, and the fog notification seam.

pub mod bounds;
pub mod fog;
pub mod scanner;
pub mod vertical;
pub mod visibility;

// Re-export commonly used types
pub use bounds::{BoundsSource, VisibleBounds, compute_bounds};
pub use fog::{FogListener, FogParams, LoggingFog, render_distance_blocks};
pub use scanner::{RayClass, SurfaceHit, VisibilityScanner, scan};
pub use vertical::compute_fallback;
pub use visibility::{ScanStats, VisibilityState};
