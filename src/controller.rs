//! Interactive scene controller
//!
//! [`SceneController`] owns the scene graph, the camera and its orbit
//! controls, and the drag state machine. Pointer handlers arbitrate between
//! orbiting and dragging; [`SceneController::tick`] advances the idle spin
//! and the camera once per frame. Nothing here needs a GPU.

use log::{debug, trace};

use crate::{
    animation::IdleSpin,
    config::SceneConfig,
    gfx::{
        camera::{OrbitCamera, OrbitControls},
        picking::{ObjectPicker, Plane},
        scene::{build_stage, Scene, Stage},
    },
    input::PointerEvent,
    interaction::{DragSession, InteractionState},
};

pub struct SceneController {
    scene: Scene,
    stage: Stage,
    camera: OrbitCamera,
    controls: OrbitControls,
    picker: ObjectPicker,
    state: InteractionState,
    spin: IdleSpin,
    /// Dragged objects follow the pointer across this plane
    drop_plane: Plane,
}

impl SceneController {
    pub fn new(config: &SceneConfig) -> Self {
        let (scene, stage) = build_stage(config);
        let (width, height) = (config.window.width.max(1), config.window.height.max(1));
        let camera = OrbitCamera::from_config(&config.camera, width as f32 / height as f32);

        Self {
            scene,
            stage,
            camera,
            controls: OrbitControls::new(&config.controls),
            picker: ObjectPicker::new(width as f32, height as f32),
            state: InteractionState::Idle,
            spin: IdleSpin::new(stage.cube, &config.animation),
            drop_plane: Plane::horizontal(0.0),
        }
    }

    /// Dispatches a translated pointer event and returns the resulting state
    pub fn handle_pointer(&mut self, event: PointerEvent) -> InteractionState {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(x, y),
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Wheel { lines } => {
                self.scroll(lines);
                self.state
            }
            PointerEvent::Modifiers { shift } => {
                self.set_shift(shift);
                self.state
            }
        }
    }

    /// Starts a drag if a draggable object is under `(x, y)`, otherwise
    /// hands the press to the orbit controls.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> InteractionState {
        if self.state.is_dragging() {
            trace!("Pointer down ignored while dragging");
            return self.state;
        }

        let ray = self.picker.screen_to_ray((x, y), &self.camera);
        let session = self
            .picker
            .pick(&ray, &self.scene, |object| object.draggable)
            .and_then(|hit| {
                self.scene.transform(hit.object).map(|transform| DragSession {
                    target: hit.object,
                    height: transform.position.y,
                })
            });

        self.state = self.state.on_pointer_down(session);
        match self.state.session() {
            Some(session) => {
                debug!("Drag started on {:?} at height {}", session.target, session.height);
                self.controls.set_enabled(false);
            }
            None => self.controls.pointer_down((x, y)),
        }
        self.state
    }

    /// Moves the dragged object under the pointer, or orbits when idle
    pub fn pointer_move(&mut self, x: f32, y: f32) -> InteractionState {
        match self.state.session() {
            Some(session) => {
                let ray = self.picker.screen_to_ray((x, y), &self.camera);
                match session.drag_position(&ray, &self.drop_plane) {
                    Some(position) => {
                        self.scene.set_position(session.target, position);
                    }
                    None => trace!("Drag ray misses the drop plane, holding position"),
                }
            }
            None => {
                let (_, viewport_height) = self.picker.screen_size();
                self.controls.pointer_move((x, y), viewport_height);
            }
        }
        self.state
    }

    /// Ends any drag and gives the pointer back to the orbit controls
    pub fn pointer_up(&mut self) -> InteractionState {
        if let Some(target) = self.state.drag_target() {
            debug!("Drag ended on {:?}", target);
        }
        self.state = self.state.on_pointer_up();
        self.controls.pointer_up();
        self.controls.set_enabled(true);
        self.state
    }

    /// Drops all pointer state when the window goes away.
    ///
    /// The pointer-up and modifier release of an interrupted gesture are
    /// never delivered after unmount, so they are applied here.
    pub fn release(&mut self) -> InteractionState {
        self.set_shift(false);
        self.pointer_up()
    }

    pub fn scroll(&mut self, lines: f32) {
        self.controls.scroll(lines);
    }

    pub fn set_shift(&mut self, held: bool) {
        self.controls.set_shift_held(held);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.resize_projection(width, height);
        self.picker.resize(width as f32, height as f32);
        self.camera.update_view_proj();
    }

    /// Per-frame update: idle spin unless dragging, then camera inertia
    pub fn tick(&mut self) {
        if !self.state.is_dragging() {
            self.spin.advance(&mut self.scene);
        }
        self.controls.update(&mut self.camera);
        self.camera.update_view_proj();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn picker(&self) -> &ObjectPicker {
        &self.picker
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }
}
