use glam::{Vec2, Vec3};
use viviel::input::{Action, ActionMap, InputSource, InputState, KeyCode, MouseButton};

#[test]
fn press_is_an_edge_and_held_persists() {
    let mut input = InputState::new();
    input.press_key(KeyCode::KeyE);
    assert!(input.is_key_pressed(KeyCode::KeyE));
    assert!(input.is_key_held(KeyCode::KeyE));

    input.clear_frame_state();
    assert!(!input.is_key_pressed(KeyCode::KeyE));
    assert!(input.is_key_held(KeyCode::KeyE));

    // key repeat does not re-trigger the edge
    input.press_key(KeyCode::KeyE);
    assert!(!input.is_key_pressed(KeyCode::KeyE));

    input.release_key(KeyCode::KeyE);
    assert!(input.is_key_released(KeyCode::KeyE));
    assert!(!input.is_key_held(KeyCode::KeyE));
}

#[test]
fn mouse_buttons_track_like_keys() {
    let mut input = InputState::new();
    input.press_mouse(MouseButton::Left);
    assert!(input.is_mouse_pressed(MouseButton::Left));
    input.clear_frame_state();
    assert!(input.is_mouse_held(MouseButton::Left));
    input.release_mouse(MouseButton::Left);
    assert!(input.is_mouse_released(MouseButton::Left));
    assert!(!input.is_mouse_held(MouseButton::Left));
}

#[test]
fn release_all_drops_everything_held() {
    let mut input = InputState::new();
    input.press_key(KeyCode::KeyW);
    input.press_mouse(MouseButton::Right);
    input.clear_frame_state();

    input.release_all();
    assert!(input.keys_held.is_empty());
    assert!(input.mouse_held.is_empty());
    assert!(input.is_key_released(KeyCode::KeyW));
    assert!(input.is_mouse_released(MouseButton::Right));
}

#[test]
fn mouse_motion_accumulates_until_taken() {
    let mut input = InputState::new();
    input.add_mouse_motion(3.0, -1.0);
    input.add_mouse_motion(2.0, 4.0);
    input.clear_frame_state();
    assert_eq!(input.mouse_delta(), Vec2::new(5.0, 3.0));
    assert_eq!(input.take_mouse_delta(), Vec2::new(5.0, 3.0));
    assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
}

#[test]
fn actions_fire_from_any_bound_source() {
    let mut map = ActionMap::new();
    map.bind(Action::Shoot, InputSource::Mouse(MouseButton::Left));
    map.bind(Action::Shoot, InputSource::Key(KeyCode::Space));

    let mut input = InputState::new();
    assert!(!map.is_held(Action::Shoot, &input));
    input.press_key(KeyCode::Space);
    assert!(map.is_pressed(Action::Shoot, &input));
    assert!(map.is_held(Action::Shoot, &input));
    assert!(!map.is_pressed(Action::Aim, &input));

    input.release_key(KeyCode::Space);
    assert!(map.is_released(Action::Shoot, &input));
}

#[test]
fn default_bindings_cover_every_action() {
    let map = ActionMap::default_bindings();
    let cases = [
        (Action::EnterDoor, KeyCode::KeyP),
        (Action::Talk, KeyCode::KeyT),
        (Action::Interact, KeyCode::KeyE),
        (Action::DropItem, KeyCode::KeyF),
        (Action::Pause, KeyCode::Escape),
    ];
    for (action, key) in cases {
        let mut input = InputState::new();
        input.press_key(key);
        assert!(map.is_pressed(action, &input), "{action:?}");
    }

    let mut input = InputState::new();
    input.press_mouse(MouseButton::Left);
    input.press_mouse(MouseButton::Right);
    assert!(map.is_held(Action::Shoot, &input));
    assert!(map.is_held(Action::Aim, &input));
}

#[test]
fn movement_vector_is_local_space() {
    let map = ActionMap::default_bindings();
    let mut input = InputState::new();
    assert_eq!(map.movement_vector(&input), Vec3::ZERO);
    input.press_key(KeyCode::KeyS);
    input.press_key(KeyCode::KeyD);
    assert_eq!(map.movement_vector(&input), Vec3::new(-1.0, 0.0, -1.0));
}
