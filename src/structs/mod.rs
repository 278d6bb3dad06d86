pub mod aabb;
pub mod pools;
pub mod quaternion;
pub mod transform3d;
pub mod vector3;

pub use aabb::Aabb;
pub use pools::{MatrixPool, ScratchPool, VectorPool};
pub use quaternion::Quaternion;
pub use transform3d::Transform3D;
pub use vector3::{Axis, Vector3};
