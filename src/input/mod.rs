use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::{Vec2, Vec3};
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::keyboard::PhysicalKey;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state for a single frame.
///
/// Held sets persist across frames; pressed/released sets are edges and are
/// emptied by [`InputState::clear_frame_state`]. Mouse motion accumulates
/// until a consumer drains it with [`InputState::take_mouse_delta`].
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,

    mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }

    // ── Raw event entry points ────────────────────────────────────────────────

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Motion accumulated since the last drain, without draining it.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Returns the accumulated mouse motion and resets the accumulator.
    /// Exactly one system should call this per frame.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Drops every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        let keys: Vec<KeyCode> = self.keys_held.drain().collect();
        self.keys_released.extend(keys);
        let buttons: Vec<MouseButton> = self.mouse_held.drain().collect();
        self.mouse_released.extend(buttons);
    }

    /// Feeds a winit window event into the snapshot. Returns `true` if the
    /// event was an input event.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                match state {
                    ElementState::Pressed => self.press_key(*code),
                    ElementState::Released => self.release_key(*code),
                }
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                match state {
                    ElementState::Pressed => self.press_mouse(*button),
                    ElementState::Released => self.release_mouse(*button),
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                true
            }
            _ => false,
        }
    }

    /// Raw pointer motion arrives as device events while the cursor is grabbed.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.add_mouse_motion(*dx as f32, *dy as f32);
        }
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// Logical game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    EnterDoor,
    Talk,
    Interact,
    DropItem,
    Shoot,
    Aim,
    Pause,
}

/// Maps logical actions (defined by the game) to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }

    /// Returns true if any bound source was released this frame.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_released(*k),
                InputSource::Mouse(b) => input.is_mouse_released(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

impl ActionMap<Action> {
    /// WASD movement, P doors, T talk, E interact, F drop, left mouse shoots,
    /// right mouse aims, Escape pauses.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(Action::MoveForward, InputSource::Key(KeyCode::KeyW));
        map.bind(Action::MoveBackward, InputSource::Key(KeyCode::KeyS));
        map.bind(Action::MoveLeft, InputSource::Key(KeyCode::KeyA));
        map.bind(Action::MoveRight, InputSource::Key(KeyCode::KeyD));
        map.bind(Action::EnterDoor, InputSource::Key(KeyCode::KeyP));
        map.bind(Action::Talk, InputSource::Key(KeyCode::KeyT));
        map.bind(Action::Interact, InputSource::Key(KeyCode::KeyE));
        map.bind(Action::DropItem, InputSource::Key(KeyCode::KeyF));
        map.bind(Action::Shoot, InputSource::Mouse(MouseButton::Left));
        map.bind(Action::Aim, InputSource::Mouse(MouseButton::Right));
        map.bind(Action::Pause, InputSource::Key(KeyCode::Escape));
        map
    }

    /// Local-space movement intent: forward is +z, left is +x.
    /// Opposing keys cancel out. Not normalised.
    pub fn movement_vector(&self, input: &InputState) -> Vec3 {
        let mut v = Vec3::ZERO;
        if self.is_held(Action::MoveForward, input) { v.z += 1.0; }
        if self.is_held(Action::MoveBackward, input) { v.z -= 1.0; }
        if self.is_held(Action::MoveLeft, input) { v.x += 1.0; }
        if self.is_held(Action::MoveRight, input) { v.x -= 1.0; }
        v
    }
}
