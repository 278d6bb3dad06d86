pub mod kinematics;
pub mod spatial;

pub use kinematics::{Ema, KinematicMetrics};
pub use spatial::{
    FieldOfView, direction, distance, field_of_view, visual_angular_offset, visual_angular_size,
};
