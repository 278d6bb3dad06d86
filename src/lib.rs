//! Spatial layout and adaptive classification for 3D scene graphs.
//!
//! A [`Scene`] holds a tree of [`Node3D`]s. Nodes can carry a declarative
//! [`LayoutSpec`] (align/origin/size against the bounds of a reference
//! frame), be driven toward a [`LayoutTarget`] by a pose-preserving
//! [`LayoutTransitioner`], and feed scalar metrics into [`AdaptiveProperty`]
//! classifiers with hysteresis and debounce.

pub mod error;
pub use error::*;

pub mod ids;
pub use ids::*;

pub mod node_arena;
pub use node_arena::*;

pub mod nodes;
pub use nodes::*;

pub mod scene;
pub use scene::*;

pub mod structs;
pub use structs::*;

pub mod layout;
pub use layout::*;

pub mod metrics;
pub use metrics::*;

pub mod adaptive;
pub use adaptive::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Range {
        Near,
        Far,
    }

    // End-to-end: a camera-framed panel is laid out in the camera's view,
    // reparented without a visible jump, and classified by distance.
    #[test]
    fn test_layout_and_classification_pipeline() {
        init_logging();
        let mut scene = Scene::new();
        let camera = scene
            .spawn(Node3D::camera("camera", 90.0, 1.0), scene.root())
            .unwrap();
        let panel = scene
            .spawn(
                Node3D::new("panel")
                    .with_extent(Aabb::from_center_size(Vector3::zero(), Vector3::one()))
                    .with_layout(
                        LayoutSpec::new()
                            .with_align(LayoutVec3::new(Some(0.0), Some(0.0), Some(-2.0)))
                            .with_size(LayoutVec3::new(Some(0.25), Some(0.25), None)),
                    ),
                camera,
            )
            .unwrap();

        let mut pass = LayoutPass::new();
        pass.update(&mut scene).unwrap();

        // centered in view, two meters out, a quarter of the slice tall
        let pose = scene.world_transform(panel).unwrap();
        assert!(pose.position.distance_to(Vector3::new(0.0, 0.0, -2.0)) < 1e-3);
        let layout = scene.node(panel).unwrap().layout.as_ref().unwrap();
        assert!((layout.computed_scale.y - 1.0).abs() < 1e-3);

        // reparent to the world root; the pose must not jump
        let mut transitioner = LayoutTransitioner::new(panel);
        transitioner.target.parent = Some(scene.root());
        transitioner.target.align = LayoutVec3::new(Some(0.0), Some(0.0), Some(-2.0));
        transitioner.target.size = LayoutVec3::new(Some(0.25), Some(0.25), None);
        transitioner.update(&mut scene, 1.0).unwrap();
        let after = scene.world_transform(panel).unwrap();
        assert!(after.position.distance_to(pose.position) < 1e-3);

        // classify the camera/panel distance
        let scene = Rc::new(RefCell::new(scene));
        let metric_scene = Rc::clone(&scene);
        let zones = Zones::builder(Range::Near)
            .pivot(5.0, Range::Far)
            .build()
            .unwrap();
        let mut range = AdaptiveProperty::new(
            move || {
                distance(&metric_scene.borrow(), camera, panel).unwrap_or(f32::NAN)
            },
            zones,
        )
        .with_threshold(0.5);
        range.update(16.0).unwrap();
        assert!(range.is(&Range::Near));

        scene.borrow_mut().node_mut(panel).unwrap().transform.position.z = -10.0;
        range.update(16.0).unwrap();
        assert!(range.is(&Range::Far));
    }
}
