//! Pick-and-drag state machine
//!
//! Only two states exist. `Idle` lets pointer input reach the orbit
//! controls; `Dragging` owns the pointer until it is released. The state is
//! a plain value held by [`SceneController`](crate::controller::SceneController),
//! and every transition returns the resulting state.

use cgmath::Vector3;

use crate::gfx::{
    picking::{Plane, Ray},
    scene::ObjectId,
};

/// The object being dragged and the height it is pinned to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: ObjectId,
    /// World y of the target when the drag started
    pub height: f32,
}

impl DragSession {
    /// Where the target should move for `ray`, or `None` if the ray misses `plane`.
    ///
    /// The x and z come from the ray/plane intersection, y stays at the
    /// height recorded at drag start.
    pub fn drag_position(&self, ray: &Ray, plane: &Plane) -> Option<Vector3<f32>> {
        plane
            .intersect_ray(ray)
            .map(|hit| Vector3::new(hit.x, self.height, hit.z))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging(_))
    }

    pub fn session(&self) -> Option<DragSession> {
        match self {
            InteractionState::Dragging(session) => Some(*session),
            InteractionState::Idle => None,
        }
    }

    pub fn drag_target(&self) -> Option<ObjectId> {
        self.session().map(|session| session.target)
    }

    /// Pointer pressed; `hit` is the draggable object under the pointer, if any.
    ///
    /// A press while already dragging keeps the current session.
    pub fn on_pointer_down(self, hit: Option<DragSession>) -> Self {
        match (self, hit) {
            (InteractionState::Dragging(_), _) => self,
            (InteractionState::Idle, Some(session)) => InteractionState::Dragging(session),
            (InteractionState::Idle, None) => InteractionState::Idle,
        }
    }

    /// Pointer released; always ends in `Idle`
    pub fn on_pointer_up(self) -> Self {
        InteractionState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DragSession {
        DragSession {
            target: ObjectId(2),
            height: 0.5,
        }
    }

    #[test]
    fn test_miss_stays_idle() {
        let state = InteractionState::Idle.on_pointer_down(None);
        assert_eq!(state, InteractionState::Idle);
        assert_eq!(state.drag_target(), None);
    }

    #[test]
    fn test_hit_starts_drag() {
        let state = InteractionState::Idle.on_pointer_down(Some(session()));
        assert!(state.is_dragging());
        assert_eq!(state.drag_target(), Some(ObjectId(2)));
    }

    #[test]
    fn test_second_press_keeps_session() {
        let state = InteractionState::Idle.on_pointer_down(Some(session()));
        let other = DragSession {
            target: ObjectId(7),
            height: 0.0,
        };
        assert_eq!(state.on_pointer_down(Some(other)), state);
        assert_eq!(state.on_pointer_down(None), state);
    }

    #[test]
    fn test_release_is_idempotent() {
        let dragging = InteractionState::Idle.on_pointer_down(Some(session()));
        assert_eq!(dragging.on_pointer_up(), InteractionState::Idle);
        assert_eq!(InteractionState::Idle.on_pointer_up(), InteractionState::Idle);
    }

    #[test]
    fn test_drag_position_pins_height() {
        let ray = Ray::new(Vector3::new(2.0, 10.0, 3.0), Vector3::new(0.0, -1.0, 0.0));
        let position = session()
            .drag_position(&ray, &Plane::horizontal(0.0))
            .unwrap();
        assert_eq!(position, Vector3::new(2.0, 0.5, 3.0));
    }

    #[test]
    fn test_parallel_ray_has_no_position() {
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(session().drag_position(&ray, &Plane::horizontal(0.0)), None);
    }
}
