use cgmath::Vector3;
use log::warn;

use super::{
    light::Lights,
    object::{ObjectId, SceneObject, Transform},
};

/// Scene graph: objects addressed by [`ObjectId`] plus the light rig.
///
/// Objects can be linked as overlays of another object. Every transform
/// change made through the scene is applied to the target and all of its
/// overlays in the same call, so an overlay can never lag behind its target.
pub struct Scene {
    objects: Vec<SceneObject>,
    /// `overlays[i]` lists the objects slaved to object `i`
    overlays: Vec<Vec<ObjectId>>,
    pub lights: Lights,
    pub background: [f32; 4],
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            overlays: Vec::new(),
            lights: Lights::default(),
            background: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        self.overlays.push(Vec::new());
        id
    }

    /// Slaves `overlay` to `target`, copying the target's transform onto it.
    ///
    /// Returns false if either id is unknown, the ids are equal, or
    /// `overlay` already follows another object.
    pub fn link_overlay(&mut self, overlay: ObjectId, target: ObjectId) -> bool {
        if overlay == target || self.get(overlay).is_none() || self.get(target).is_none() {
            warn!("Cannot link {:?} to {:?}", overlay, target);
            return false;
        }
        if self.overlays.iter().any(|list| list.contains(&overlay)) {
            warn!("{:?} already follows another object", overlay);
            return false;
        }

        self.overlays[target.index()].push(overlay);
        let transform = self.objects[target.index()].transform;
        self.objects[overlay.index()].transform = transform;
        true
    }

    pub fn overlays_of(&self, target: ObjectId) -> &[ObjectId] {
        self.overlays
            .get(target.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.get(id).map(|object| object.transform)
    }

    /// Looks up the first object with the given name
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Objects in insertion order with their ids
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i as u32), object))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Moves `id` and its overlays; false if `id` is unknown
    pub fn set_position(&mut self, id: ObjectId, position: Vector3<f32>) -> bool {
        self.modify_transform(id, |t| t.position = position)
    }

    /// Adds `delta` radians to the Euler rotation of `id` and its overlays
    pub fn rotate_by(&mut self, id: ObjectId, delta: Vector3<f32>) -> bool {
        self.modify_transform(id, |t| t.rotation += delta)
    }

    fn modify_transform<F>(&mut self, id: ObjectId, apply: F) -> bool
    where
        F: Fn(&mut Transform),
    {
        let Some(target) = self.objects.get_mut(id.index()) else {
            return false;
        };
        apply(&mut target.transform);
        let transform = target.transform;

        for overlay in &self.overlays[id.index()] {
            self.objects[overlay.index()].transform = transform;
        }
        true
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            draggable_count: self.objects.iter().filter(|o| o.draggable).count(),
            total_triangles: self.objects.iter().map(|o| o.geometry.triangle_count()).sum(),
            total_segments: self.objects.iter().map(|o| o.geometry.segment_count()).sum(),
            total_vertices: self.objects.iter().map(|o| o.geometry.vertex_count()).sum(),
        }
    }
}

/// Scene statistics for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub draggable_count: usize,
    pub total_triangles: usize,
    pub total_segments: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::{generate_box_edges, generate_cube},
        resources::material::Material,
    };

    fn cube_with_edges() -> (Scene, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let cube = scene.add_object(SceneObject::new("cube", generate_cube(1.0), Material::default()));
        let edges = scene.add_object(SceneObject::new(
            "edges",
            generate_box_edges(1.0),
            Material::default(),
        ));
        assert!(scene.link_overlay(edges, cube));
        (scene, cube, edges)
    }

    #[test]
    fn test_overlay_follows_position() {
        let (mut scene, cube, edges) = cube_with_edges();
        assert!(scene.set_position(cube, Vector3::new(2.0, 0.0, 3.0)));
        assert_eq!(scene.transform(edges), scene.transform(cube));
        assert_eq!(
            scene.transform(edges).map(|t| t.position),
            Some(Vector3::new(2.0, 0.0, 3.0))
        );
    }

    #[test]
    fn test_overlay_follows_rotation() {
        let (mut scene, cube, edges) = cube_with_edges();
        for _ in 0..5 {
            scene.rotate_by(cube, Vector3::new(0.01, 0.01, 0.0));
        }
        assert_eq!(scene.transform(edges), scene.transform(cube));
    }

    #[test]
    fn test_link_copies_target_transform() {
        let mut scene = Scene::new();
        let cube = scene.add_object(
            SceneObject::new("cube", generate_cube(1.0), Material::default())
                .with_transform(Transform::from_position(Vector3::new(1.0, 0.0, 0.0))),
        );
        let edges = scene.add_object(SceneObject::new(
            "edges",
            generate_box_edges(1.0),
            Material::default(),
        ));
        scene.link_overlay(edges, cube);
        assert_eq!(scene.transform(edges), scene.transform(cube));
    }

    #[test]
    fn test_link_rejects_bad_pairs() {
        let (mut scene, cube, edges) = cube_with_edges();
        assert!(!scene.link_overlay(cube, cube));
        assert!(!scene.link_overlay(edges, cube));
        assert!(!scene.link_overlay(ObjectId(42), cube));
        assert_eq!(scene.overlays_of(cube), &[edges]);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let mut scene = Scene::new();
        assert!(!scene.set_position(ObjectId(0), Vector3::new(1.0, 0.0, 0.0)));
        assert!(scene.transform(ObjectId(0)).is_none());
    }

    #[test]
    fn test_find_and_statistics() {
        let (scene, cube, _) = cube_with_edges();
        assert_eq!(scene.find("cube"), Some(cube));
        assert_eq!(scene.find("missing"), None);

        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.total_triangles, 12);
        assert_eq!(stats.total_segments, 12);
        assert_eq!(stats.total_vertices, 32);
    }
}
