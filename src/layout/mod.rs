pub mod bounds;
pub mod frame;
pub mod resolve;
pub mod spec;
pub mod transition;

pub use bounds::{bounds_at_depth, compute_bounds};
pub use frame::{FrameBinding, resolve_frame};
pub use resolve::{LayoutPass, resolve_layout};
pub use spec::{LayoutSpec, LayoutVec3};
pub use transition::{LayoutTarget, LayoutTransitioner};
