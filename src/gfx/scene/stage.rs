//! The demo stage: floor, wall, draggable cube and its edge overlay.

use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;
use log::debug;

use super::{
    light::Lights,
    object::{ObjectId, SceneObject, Transform},
    scene::Scene,
};
use crate::{
    config::SceneConfig,
    gfx::{
        geometry::{generate_box_edges, generate_cube, generate_plane},
        resources::material::Material,
    },
};

/// Ids of the objects [`build_stage`] creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub floor: ObjectId,
    pub wall: ObjectId,
    pub cube: ObjectId,
    pub wireframe: ObjectId,
}

/// Populates a new scene from `config`
pub fn build_stage(config: &SceneConfig) -> (Scene, Stage) {
    let stage_config = &config.stage;
    let mut scene = Scene::new();
    scene.lights = Lights::from_config(&config.lights);
    scene.background = stage_config.background;

    let floor = scene.add_object(
        SceneObject::new(
            "floor",
            generate_plane(stage_config.floor_size, stage_config.floor_size, 1, 1),
            Material::from_rgb("floor", stage_config.floor_color, 0.0, 1.0).with_double_sided(true),
        )
        // Lay the XY plane flat so its normal points up
        .with_transform(Transform::default().with_rotation(Vector3::new(-FRAC_PI_2, 0.0, 0.0))),
    );

    let wall = scene.add_object(
        SceneObject::new(
            "wall",
            generate_plane(stage_config.wall_size, stage_config.wall_size, 1, 1),
            Material::from_rgb("wall", stage_config.wall_color, 0.0, 1.0).with_double_sided(true),
        )
        .with_transform(Transform::from_position(Vector3::new(
            0.0,
            0.0,
            stage_config.wall_offset,
        ))),
    );

    let cube = scene.add_object(
        SceneObject::new(
            "cube",
            generate_cube(stage_config.cube_size),
            Material::from_rgb(
                "cube",
                stage_config.cube_color,
                stage_config.cube_metallic,
                stage_config.cube_roughness,
            ),
        )
        .with_transform(Transform::from_position(Vector3::from(
            stage_config.cube_position,
        )))
        .with_draggable(true),
    );

    let wireframe = scene.add_object(SceneObject::new(
        "cube edges",
        generate_box_edges(stage_config.cube_size),
        Material::from_rgb("edges", stage_config.edge_color, 0.0, 1.0),
    ));
    scene.link_overlay(wireframe, cube);

    debug!("Stage built: {:?}", scene.get_statistics());

    (
        scene,
        Stage {
            floor,
            wall,
            cube,
            wireframe,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Vector4;

    #[test]
    fn test_default_stage_layout() {
        let (scene, stage) = build_stage(&SceneConfig::default());
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.overlays_of(stage.cube), &[stage.wireframe]);
        assert_eq!(scene.background, [1.0, 1.0, 1.0, 1.0]);

        let draggable: Vec<_> = scene.iter().filter(|(_, o)| o.draggable).map(|(id, _)| id).collect();
        assert_eq!(draggable, vec![stage.cube]);

        let wall = scene.transform(stage.wall).expect("wall exists");
        assert_eq!(wall.position.z, -5.0);
        assert_eq!(scene.lights.point.position, Vector3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_floor_normal_points_up() {
        let (scene, stage) = build_stage(&SceneConfig::default());
        let floor = scene.transform(stage.floor).expect("floor exists");
        let normal = floor.matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(normal.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(normal.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cube_material() {
        let (scene, stage) = build_stage(&SceneConfig::default());
        let cube = scene.get(stage.cube).expect("cube exists");
        assert_eq!(cube.material.base_color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(cube.material.metallic, 0.5);
        assert_eq!(cube.material.roughness, 0.5);
        assert!(!cube.material.double_sided);
    }
}
