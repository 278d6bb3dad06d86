//! Observer/target spatial metrics.
//!
//! All angles are degrees. Metrics are total functions: degenerate inputs
//! (coincident nodes, missing extents) return defined values instead of NaN,
//! so classifier pipelines never see non-finite numbers.

use crate::error::{Result, SpatialError};
use crate::ids::NodeId;
use crate::layout::bounds::compute_bounds;
use crate::scene::Scene;
use crate::structs::Vector3;

/// Per-edge field of view of a projective camera, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldOfView {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Euclidean distance between the nodes' world positions.
pub fn distance(scene: &Scene, observer: NodeId, target: NodeId) -> Result<f32> {
    let a = scene.world_position(observer)?;
    let b = scene.world_position(target)?;
    Ok(a.distance_to(b))
}

/// Unit direction from observer to target, in observer-local space. When the
/// nodes are coincident, returns the observer's backward axis (+Z for regular
/// nodes, -Z for cameras) instead of an undefined vector.
pub fn direction(scene: &Scene, observer: NodeId, target: NodeId) -> Result<Vector3> {
    let obs = scene.world_position(observer)?;
    let tgt = scene.world_position(target)?;
    let world_dir = tgt - obs;
    if world_dir.length() == 0.0 {
        let backward = if scene.node(observer)?.is_camera() {
            Vector3::new(0.0, 0.0, -1.0)
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };
        return Ok(backward);
    }
    let rotation = scene.world_rotation(observer)?;
    Ok(rotation.inverse().rotate_vec3(world_dir.normalized()))
}

/// Continuous "enclosure" metric of how much of the observer's view the
/// target occupies, in degrees 0-360.
///
/// 0 when the target has no measurable extent or is infinitely far; grows as
/// the observer approaches; 180 with the target's bounding sphere edge-on at
/// the observer; ramps to 360 with the observer at the sphere's center.
pub fn visual_angular_size(scene: &Scene, observer: NodeId, target: NodeId) -> Result<f32> {
    let bounds = compute_bounds(scene, target, None)?;
    if bounds.is_empty() {
        return Ok(0.0);
    }
    let (center, radius) = bounds.bounding_sphere();
    if radius == 0.0 {
        return Ok(0.0);
    }
    let obs = scene.world_position(observer)?;
    let to_center = obs.distance_to(center);
    if to_center >= radius {
        let to_surface = to_center - radius;
        Ok((2.0 * radius.atan2(to_surface)).to_degrees())
    } else {
        // inside the bounding sphere
        Ok(180.0 + 180.0 * (1.0 - to_center / radius))
    }
}

/// Angle in degrees (0-180) between the observer's forward axis and the
/// direction to the target. Coincident nodes yield 180 (the target is
/// "behind" by convention, matching [`direction`]).
pub fn visual_angular_offset(scene: &Scene, observer: NodeId, target: NodeId) -> Result<f32> {
    let obs = scene.world_position(observer)?;
    let tgt = scene.world_position(target)?;
    let world_dir = tgt - obs;
    if world_dir.length() == 0.0 {
        return Ok(180.0);
    }
    let rotation = scene.world_rotation(observer)?;
    let forward_local = if scene.node(observer)?.is_camera() {
        Vector3::new(0.0, 0.0, -1.0)
    } else {
        Vector3::new(0.0, 0.0, 1.0)
    };
    let forward = rotation.rotate_vec3(forward_local);
    let cos = forward.dot(world_dir.normalized()).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// Field of view of a projective camera observer, per edge, in degrees.
/// Fails with [`SpatialError::NotACamera`] for any other node.
pub fn field_of_view(scene: &Scene, observer: NodeId) -> Result<FieldOfView> {
    let node = scene.node(observer)?;
    let projection = node
        .projection
        .as_ref()
        .ok_or(SpatialError::NotACamera(observer))?;
    let inverse = projection.inverse();
    let edge = |x: f32, y: f32| -> f32 {
        let ray = inverse.project_point3(glam::Vec3::new(x, y, -1.0));
        let lateral = if x != 0.0 { ray.x } else { ray.y };
        (lateral.abs() / ray.z.abs()).atan().to_degrees()
    };
    Ok(FieldOfView {
        left: edge(-1.0, 0.0),
        right: edge(1.0, 0.0),
        top: edge(0.0, 1.0),
        bottom: edge(0.0, -1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Node3D;
    use crate::structs::{Aabb, Quaternion, Transform3D};

    fn at(scene: &mut Scene, name: &str, pos: Vector3) -> NodeId {
        scene
            .spawn(
                Node3D::new(name).with_transform(Transform3D::from_position(pos)),
                scene.root(),
            )
            .unwrap()
    }

    #[test]
    fn test_distance() {
        let mut scene = Scene::new();
        let a = at(&mut scene, "a", Vector3::zero());
        let b = at(&mut scene, "b", Vector3::new(3.0, 4.0, 0.0));
        assert!((distance(&scene, a, b).unwrap() - 5.0).abs() < 1e-6);
        assert_eq!(distance(&scene, a, a).unwrap(), 0.0);
    }

    #[test]
    fn test_direction_is_observer_local() {
        let mut scene = Scene::new();
        let observer = scene
            .spawn(
                Node3D::new("obs").with_transform(Transform3D::new(
                    Vector3::zero(),
                    Quaternion::from_axis_angle(
                        Vector3::new(0.0, 1.0, 0.0),
                        std::f32::consts::FRAC_PI_2,
                    ),
                    Vector3::one(),
                )),
                scene.root(),
            )
            .unwrap();
        let target = at(&mut scene, "t", Vector3::new(1.0, 0.0, 0.0));
        let dir = direction(&scene, observer, target).unwrap();
        // world +X seen from a node yawed +90 deg is local +Z
        assert!(dir.distance_to(Vector3::new(0.0, 0.0, 1.0)) < 1e-5);
    }

    #[test]
    fn test_direction_coincident_conventions() {
        let mut scene = Scene::new();
        let a = at(&mut scene, "a", Vector3::one());
        let b = at(&mut scene, "b", Vector3::one());
        assert_eq!(
            direction(&scene, a, b).unwrap(),
            Vector3::new(0.0, 0.0, 1.0)
        );
        let cam = scene
            .spawn(
                Node3D::camera("cam", 60.0, 1.0)
                    .with_transform(Transform3D::from_position(Vector3::one())),
                scene.root(),
            )
            .unwrap();
        assert_eq!(
            direction(&scene, cam, b).unwrap(),
            Vector3::new(0.0, 0.0, -1.0)
        );
    }

    #[test]
    fn test_visual_angular_size_profile() {
        let mut scene = Scene::new();
        let observer = at(&mut scene, "obs", Vector3::new(0.0, 0.0, 10.0));
        let target = scene
            .spawn(
                Node3D::new("t")
                    .with_extent(Aabb::from_center_size(Vector3::zero(), Vector3::splat(2.0))),
                scene.root(),
            )
            .unwrap();
        let radius = Vector3::splat(2.0).length() * 0.5;

        let far = visual_angular_size(&scene, observer, target).unwrap();
        assert!(far > 0.0 && far < 180.0);

        // closer observer sees a larger angular size
        let nearer = at(&mut scene, "near", Vector3::new(0.0, 0.0, 4.0));
        let near_size = visual_angular_size(&scene, nearer, target).unwrap();
        assert!(near_size > far);

        // on the sphere surface: edge-on, 180
        let on_surface = at(&mut scene, "surf", Vector3::new(0.0, 0.0, radius));
        let surface_size = visual_angular_size(&scene, on_surface, target).unwrap();
        assert!((surface_size - 180.0).abs() < 1e-3);

        // at the center: fully enclosed, 360
        let inside = at(&mut scene, "center", Vector3::zero());
        let center_size = visual_angular_size(&scene, inside, target).unwrap();
        assert!((center_size - 360.0).abs() < 1e-3);

        // no extent: zero
        let bare = at(&mut scene, "bare", Vector3::zero());
        assert_eq!(visual_angular_size(&scene, observer, bare).unwrap(), 0.0);
    }

    #[test]
    fn test_visual_angular_offset() {
        let mut scene = Scene::new();
        let observer = at(&mut scene, "obs", Vector3::zero());
        let ahead = at(&mut scene, "ahead", Vector3::new(0.0, 0.0, 5.0));
        let behind = at(&mut scene, "behind", Vector3::new(0.0, 0.0, -5.0));
        let side = at(&mut scene, "side", Vector3::new(5.0, 0.0, 0.0));
        assert!(visual_angular_offset(&scene, observer, ahead).unwrap() < 1e-3);
        assert!((visual_angular_offset(&scene, observer, behind).unwrap() - 180.0).abs() < 1e-3);
        assert!((visual_angular_offset(&scene, observer, side).unwrap() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_field_of_view() {
        let mut scene = Scene::new();
        let cam = scene.spawn(Node3D::camera("cam", 90.0, 2.0), scene.root()).unwrap();
        let fov = field_of_view(&scene, cam).unwrap();
        assert!((fov.top - 45.0).abs() < 0.1);
        assert!((fov.bottom - 45.0).abs() < 0.1);
        // aspect 2 doubles the horizontal half-extent: atan(2) ~ 63.43 deg
        assert!((fov.left - 63.43).abs() < 0.1);
        assert!((fov.right - 63.43).abs() < 0.1);

        let plain = scene.spawn(Node3D::new("n"), scene.root()).unwrap();
        assert!(matches!(
            field_of_view(&scene, plain),
            Err(SpatialError::NotACamera(_))
        ));
    }
}
