//! Idle spin applied to the cube between drags

use cgmath::Vector3;

use crate::{
    config::AnimationConfig,
    gfx::scene::{ObjectId, Scene},
};

/// Rotates one object by a fixed Euler increment per tick.
///
/// The rotation goes through [`Scene::rotate_by`], so linked overlays turn
/// in lockstep with the target.
#[derive(Debug, Clone, Copy)]
pub struct IdleSpin {
    target: ObjectId,
    per_tick: Vector3<f32>,
}

impl IdleSpin {
    pub fn new(target: ObjectId, config: &AnimationConfig) -> Self {
        let [x, y] = config.spin_per_tick;
        Self {
            target,
            per_tick: Vector3::new(x, y, 0.0),
        }
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn per_tick(&self) -> Vector3<f32> {
        self.per_tick
    }

    /// Advances the spin by one tick; false if the target is gone
    pub fn advance(&self, scene: &mut Scene) -> bool {
        scene.rotate_by(self.target, self.per_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SceneConfig, gfx::scene::build_stage};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_advance_rotates_cube_and_edges() {
        let config = SceneConfig::default();
        let (mut scene, stage) = build_stage(&config);
        let spin = IdleSpin::new(stage.cube, &config.animation);

        for _ in 0..3 {
            assert!(spin.advance(&mut scene));
        }

        let cube = scene.transform(stage.cube).unwrap();
        let edges = scene.transform(stage.wireframe).unwrap();
        assert_abs_diff_eq!(cube.rotation.x, 0.03, epsilon = 1e-6);
        assert_abs_diff_eq!(cube.rotation.y, 0.03, epsilon = 1e-6);
        assert_eq!(cube.rotation.z, 0.0);
        assert_eq!(cube, edges);
    }

    #[test]
    fn test_spin_leaves_position_alone() {
        let config = SceneConfig::default();
        let (mut scene, stage) = build_stage(&config);
        let before = scene.transform(stage.cube).unwrap().position;
        IdleSpin::new(stage.cube, &config.animation).advance(&mut scene);
        assert_eq!(scene.transform(stage.cube).unwrap().position, before);
    }
}
