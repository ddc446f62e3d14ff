use std::f32::consts::TAU;

use log::debug;

use super::orbit_camera::OrbitCamera;
use crate::config::ControlsConfig;

/// Pending motion below this magnitude is dropped instead of decaying forever
const SETTLE_EPSILON: f32 = 1e-6;

/// Motion accumulated from pointer input that has not been applied yet
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct OrbitDelta {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: (f32, f32),
}

impl OrbitDelta {
    fn scaled(&self, factor: f32) -> Self {
        Self {
            yaw: self.yaw * factor,
            pitch: self.pitch * factor,
            zoom: self.zoom * factor,
            pan: (self.pan.0 * factor, self.pan.1 * factor),
        }
    }

    fn is_settled(&self) -> bool {
        self.yaw.abs() < SETTLE_EPSILON
            && self.pitch.abs() < SETTLE_EPSILON
            && self.zoom.abs() < SETTLE_EPSILON
            && self.pan.0.abs() < SETTLE_EPSILON
            && self.pan.1.abs() < SETTLE_EPSILON
    }
}

/// Damped orbit controls: drag rotates, Shift+drag pans, wheel zooms.
///
/// Input only accumulates motion; [`OrbitControls::update`] applies a
/// `damping_factor` share of it to the camera each tick and keeps the rest
/// for later ticks, which gives the camera its inertia.
///
/// While disabled the controls ignore input and `update` leaves the camera
/// untouched. Disabling also discards pending motion, so re-enabling resumes
/// from the current pose.
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    enabled: bool,
    pending: OrbitDelta,
    last_pointer: Option<(f32, f32)>,
    is_shift_held: bool,
}

impl OrbitControls {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            damping_factor: config.damping_factor.clamp(f32::EPSILON, 1.0),
            enabled: true,
            pending: OrbitDelta::default(),
            last_pointer: None,
            is_shift_held: false,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.pending = OrbitDelta::default();
            self.last_pointer = None;
        }
        debug!("Orbit controls {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
    }

    /// Returns true while a rotate or pan gesture is in progress
    pub fn is_pointer_active(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_pointer_active() && self.is_shift_held
    }

    /// Returns true when no motion is waiting to be applied
    pub fn is_settled(&self) -> bool {
        self.pending.is_settled()
    }

    pub fn set_shift_held(&mut self, held: bool) {
        self.is_shift_held = held;
    }

    pub fn pointer_down(&mut self, position: (f32, f32)) {
        if !self.enabled {
            return;
        }
        self.last_pointer = Some(position);
    }

    /// Accumulates rotation or pan from a pointer move.
    ///
    /// Deltas are normalised by the viewport height so a full-height drag
    /// turns the camera by `TAU * rotate_speed` regardless of window size.
    pub fn pointer_move(&mut self, position: (f32, f32), viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let Some(last) = self.last_pointer else {
            return;
        };
        self.last_pointer = Some(position);

        if viewport_height <= 0.0 {
            return;
        }
        let dx = (position.0 - last.0) / viewport_height;
        let dy = (position.1 - last.1) / viewport_height;

        if self.is_shift_held {
            // SHIFT + DRAG = PAN (move focus point)
            self.pending.pan.0 -= dx * self.pan_speed;
            self.pending.pan.1 += dy * self.pan_speed;
        } else {
            // NORMAL DRAG = ROTATE (orbit around focus)
            self.pending.yaw -= TAU * dx * self.rotate_speed;
            self.pending.pitch += TAU * dy * self.rotate_speed;
        }
    }

    pub fn pointer_up(&mut self) {
        self.last_pointer = None;
    }

    /// Accumulates zoom; positive `lines` scrolls away from the viewer and moves closer
    pub fn scroll(&mut self, lines: f32) {
        if !self.enabled {
            return;
        }
        self.pending.zoom -= lines * self.zoom_speed;
    }

    /// Applies one damped step of pending motion to `camera`.
    ///
    /// Returns true if the camera pose changed.
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        if !self.enabled || self.pending.is_settled() {
            self.pending = OrbitDelta::default();
            return false;
        }

        let step = self.pending.scaled(self.damping_factor);
        camera.add_yaw(step.yaw);
        camera.add_pitch(step.pitch);
        if step.zoom != 0.0 {
            camera.add_distance(step.zoom);
        }
        if step.pan != (0.0, 0.0) {
            camera.pan(step.pan);
        }
        camera.update_view_proj();

        self.pending = self.pending.scaled(1.0 - self.damping_factor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(10.0, 0.4, 0.0, Vector3::zero(), 1.0)
    }

    fn controls() -> OrbitControls {
        OrbitControls::new(&ControlsConfig::default())
    }

    #[test]
    fn test_drag_rotates_with_inertia() {
        let mut camera = camera();
        let mut controls = controls();
        controls.pointer_down((100.0, 100.0));
        controls.pointer_move((150.0, 100.0), 600.0);
        controls.pointer_up();

        let yaw_start = camera.yaw;
        assert!(controls.update(&mut camera));
        let first_step = (camera.yaw - yaw_start).abs();
        assert!(first_step > 0.0);

        let yaw_mid = camera.yaw;
        assert!(controls.update(&mut camera));
        let second_step = (camera.yaw - yaw_mid).abs();
        assert!(second_step > 0.0 && second_step < first_step);
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut camera = camera();
        let mut controls = controls();
        controls.pointer_move((150.0, 100.0), 600.0);
        assert!(!controls.update(&mut camera));
        assert!(controls.is_settled());
    }

    #[test]
    fn test_disabled_controls_freeze_camera() {
        let mut camera = camera();
        let mut controls = controls();
        controls.pointer_down((0.0, 0.0));
        controls.pointer_move((200.0, 50.0), 600.0);
        controls.set_enabled(false);

        let eye = camera.eye;
        controls.pointer_down((0.0, 0.0));
        controls.pointer_move((300.0, 300.0), 600.0);
        controls.scroll(3.0);
        for _ in 0..10 {
            assert!(!controls.update(&mut camera));
        }
        assert_eq!(camera.eye, eye);
        assert!(!controls.is_pointer_active());
    }

    #[test]
    fn test_reenable_resumes_without_jump() {
        let mut camera = camera();
        let mut controls = controls();
        controls.pointer_down((0.0, 0.0));
        controls.pointer_move((200.0, 50.0), 600.0);
        controls.set_enabled(false);
        controls.set_enabled(true);

        let eye = camera.eye;
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut camera = camera();
        let mut controls = controls();
        controls.set_shift_held(true);
        controls.pointer_down((0.0, 0.0));
        assert!(controls.is_panning());
        controls.pointer_move((60.0, 0.0), 600.0);
        controls.update(&mut camera);
        assert!(camera.target.x != 0.0);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_scroll_zooms_in() {
        let mut camera = camera();
        let mut controls = controls();
        controls.scroll(1.0);
        controls.update(&mut camera);
        assert!(camera.distance < 10.0);
    }

    #[test]
    fn test_inertia_settles() {
        let mut camera = camera();
        let mut controls = controls();
        controls.scroll(1.0);
        let mut ticks = 0;
        while controls.update(&mut camera) {
            ticks += 1;
            assert!(ticks < 10_000, "inertia never settled");
        }
        assert!(controls.is_settled());
    }
}
