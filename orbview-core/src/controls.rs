/// Mouse and keyboard handling, independent of any windowing system
///
/// Backends forward raw pointer, wheel and key events; [`ViewerControls::snapshot`]
/// turns the accumulated state into the [`SceneState`] for the next frame.
use nalgebra::Vector3;

use crate::scene::SceneState;
use crate::settings::{ViewerSettings, FAR, INITIAL_CAMERA_Z, NEAR};
use crate::transform::RotationState;

/// Pixels of drag per degree of camera orbit
pub const DRAG_DIVISOR: f32 = 40.0;
/// Wheel delta units per unit of camera travel
pub const WHEEL_DIVISOR: f32 = 10.0;
/// Degrees per key press for the object
pub const OBJECT_STEP: f32 = 7.0;
/// Degrees per key press for the light
pub const LIGHT_STEP: f32 = 11.0;
/// Settings panel occupies the top-right corner of the canvas
pub const PANEL_WIDTH: f32 = 300.0;
pub const PANEL_HEIGHT: f32 = 160.0;

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    LightLeft,
    LightRight,
}

impl Command {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Command::PitchUp),
            "ArrowDown" | "KeyS" => Some(Command::PitchDown),
            "ArrowLeft" | "KeyA" => Some(Command::YawLeft),
            "ArrowRight" | "KeyD" => Some(Command::YawRight),
            "KeyQ" => Some(Command::LightLeft),
            "KeyE" => Some(Command::LightRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

/// Accumulated interaction state
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerControls {
    /// Camera orbit in degrees (x from vertical drag, y from horizontal drag)
    pub camera_pivot_x: f32,
    pub camera_pivot_y: f32,
    pub camera_z: f32,
    pub object_rotation: RotationState,
    pub light_rotation: f32,
    pressed: bool,
    mouse: (f32, f32),
    anchor: (f32, f32),
    horizontal: Horizontal,
    vertical: Vertical,
}

impl ViewerControls {
    pub fn new() -> Self {
        Self {
            camera_pivot_x: 0.0,
            camera_pivot_y: 0.0,
            camera_z: INITIAL_CAMERA_Z,
            object_rotation: RotationState::zero(),
            light_rotation: 0.0,
            pressed: false,
            mouse: (0.0, 0.0),
            anchor: (0.0, 0.0),
            horizontal: Horizontal::Right,
            vertical: Vertical::Up,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.anchor = (x, y);
        self.pressed = true;
    }

    pub fn mouse_up(&mut self) {
        self.pressed = false;
    }

    /// Pointer moved to `(x, y)` in canvas pixels.
    ///
    /// While pressed the orbit grows by the distance from the drag anchor; the
    /// anchor on an axis jumps to the pointer whenever motion on that axis
    /// reverses, so reversing direction reverses the orbit immediately.
    pub fn mouse_move(&mut self, x: f32, y: f32, canvas_width: f32) {
        let dist = (x - self.anchor.0, y - self.anchor.1);

        if self.pressed {
            if x < self.mouse.0 && self.horizontal == Horizontal::Right {
                self.anchor.0 = x;
                self.horizontal = Horizontal::Left;
            } else if x > self.mouse.0 && self.horizontal == Horizontal::Left {
                self.anchor.0 = x;
                self.horizontal = Horizontal::Right;
            }
            if y < self.mouse.1 && self.vertical == Vertical::Down {
                self.anchor.1 = y;
                self.vertical = Vertical::Up;
            } else if y > self.mouse.1 && self.vertical == Vertical::Up {
                self.anchor.1 = y;
                self.vertical = Vertical::Down;
            }
        }

        // dragging into the settings panel ends the drag
        if x > canvas_width - PANEL_WIDTH && y < PANEL_HEIGHT {
            self.pressed = false;
        }

        if self.pressed {
            self.camera_pivot_y += dist.0 / DRAG_DIVISOR;
            self.camera_pivot_x += dist.1 / DRAG_DIVISOR;
        }

        self.mouse = (x, y);
    }

    /// Wheel delta in the `wheelDelta` convention: positive rolls away from the user
    pub fn wheel(&mut self, delta: f32) {
        self.camera_z -= delta / WHEEL_DIVISOR;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PitchUp => self.object_rotation.rotate(OBJECT_STEP, 0.0, 0.0),
            Command::PitchDown => self.object_rotation.rotate(-OBJECT_STEP, 0.0, 0.0),
            Command::YawLeft => self.object_rotation.rotate(0.0, OBJECT_STEP, 0.0),
            Command::YawRight => self.object_rotation.rotate(0.0, -OBJECT_STEP, 0.0),
            Command::LightLeft => self.light_rotation += LIGHT_STEP,
            Command::LightRight => self.light_rotation -= LIGHT_STEP,
        }
    }

    /// Freeze the current state for one frame
    pub fn snapshot(&self, settings: &ViewerSettings, aspect: f32) -> SceneState {
        SceneState {
            fov: settings.field_of_view,
            aspect,
            near: NEAR,
            far: FAR,
            object_rotation: self.object_rotation,
            y_translate: settings.y_translate,
            camera_position: Vector3::new(settings.camera_x, settings.camera_y, self.camera_z),
            camera_pivot_x: self.camera_pivot_x,
            camera_pivot_y: self.camera_pivot_y,
            light_rotation: self.light_rotation,
            light_height: settings.light_y,
            shininess: settings.shininess,
        }
    }
}

impl Default for ViewerControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 1200.0;

    #[test]
    fn test_move_without_press_only_tracks_pointer() {
        let mut controls = ViewerControls::new();
        controls.mouse_move(100.0, 300.0, WIDTH);
        assert_eq!(controls.camera_pivot_x, 0.0);
        assert_eq!(controls.camera_pivot_y, 0.0);
    }

    #[test]
    fn test_drag_orbits_by_distance_from_anchor() {
        let mut controls = ViewerControls::new();
        controls.mouse_move(100.0, 300.0, WIDTH);
        controls.mouse_down(100.0, 300.0);
        controls.mouse_move(140.0, 300.0, WIDTH);
        assert!((controls.camera_pivot_y - 1.0).abs() < 1e-6);
        controls.mouse_move(180.0, 300.0, WIDTH);
        assert!((controls.camera_pivot_y - 3.0).abs() < 1e-6);
        assert_eq!(controls.camera_pivot_x, 0.0);
    }

    #[test]
    fn test_reversing_resets_anchor() {
        let mut controls = ViewerControls::new();
        controls.mouse_move(100.0, 300.0, WIDTH);
        controls.mouse_down(100.0, 300.0);
        controls.mouse_move(180.0, 300.0, WIDTH);
        let after_right = controls.camera_pivot_y;

        // first step back still measures from the old anchor, then re-anchors
        controls.mouse_move(170.0, 300.0, WIDTH);
        assert!((controls.camera_pivot_y - (after_right + 70.0 / 40.0)).abs() < 1e-5);
        let before = controls.camera_pivot_y;
        controls.mouse_move(130.0, 300.0, WIDTH);
        assert!((controls.camera_pivot_y - (before - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_vertical_drag_drives_pitch() {
        let mut controls = ViewerControls::new();
        controls.mouse_move(100.0, 300.0, WIDTH);
        controls.mouse_down(100.0, 300.0);
        controls.mouse_move(100.0, 380.0, WIDTH);
        assert!((controls.camera_pivot_x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_release_stops_orbit() {
        let mut controls = ViewerControls::new();
        controls.mouse_down(0.0, 300.0);
        controls.mouse_up();
        controls.mouse_move(400.0, 300.0, WIDTH);
        assert!(!controls.is_dragging());
        assert_eq!(controls.camera_pivot_y, 0.0);
    }

    #[test]
    fn test_entering_panel_releases_drag() {
        let mut controls = ViewerControls::new();
        controls.mouse_down(800.0, 300.0);
        controls.mouse_move(1000.0, 100.0, WIDTH);
        assert!(!controls.is_dragging());
        assert_eq!(controls.camera_pivot_y, 0.0);
    }

    #[test]
    fn test_wheel_moves_camera() {
        let mut controls = ViewerControls::new();
        controls.wheel(120.0);
        assert!((controls.camera_z - 123.0).abs() < 1e-6);
        controls.wheel(-240.0);
        assert!((controls.camera_z - 147.0).abs() < 1e-6);
    }

    #[test]
    fn test_key_commands() {
        let mut controls = ViewerControls::new();
        for code in ["ArrowUp", "KeyW", "KeyA", "KeyQ", "KeyQ", "KeyE", "Space"] {
            if let Some(command) = Command::from_key_code(code) {
                controls.apply(command);
            }
        }
        assert_eq!(controls.object_rotation, RotationState::new(14.0, 7.0, 0.0));
        assert_eq!(controls.light_rotation, 11.0);

        controls.apply(Command::YawRight);
        controls.apply(Command::PitchDown);
        assert_eq!(controls.object_rotation, RotationState::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn test_snapshot_combines_settings() {
        let mut controls = ViewerControls::new();
        controls.apply(Command::LightLeft);
        let settings = ViewerSettings::default();
        let state = controls.snapshot(&settings, 2.0);
        assert_eq!(state.camera_position, Vector3::new(0.0, 40.0, 135.0));
        assert_eq!(state.fov, 25.0);
        assert_eq!(state.aspect, 2.0);
        assert_eq!(state.near, NEAR);
        assert_eq!(state.far, FAR);
        assert_eq!(state.light_rotation, 11.0);
        assert_eq!(state.y_translate, -5.0);
    }
}
