pub mod node3d;

pub use node3d::{Node3D, Projection};
