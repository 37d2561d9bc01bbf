/// Room lifecycle and transitions on the built-in layout, run headless.
use glam::Vec3;
use viviel::animation::PoseLibrary;
use viviel::assets::StaticAssets;
use viviel::input::KeyCode;
use viviel::layout::{self, PLAYER_MODEL};
use viviel::physics::RapierWorld;
use viviel::room::{Compass, DOOR_MODEL, Door, ManagerState, RoomDescriptor, RoomManager, RoomSize, RoomTag};
use viviel::{Game, GameConfig, GameError};

const FRAME: f32 = 1.0 / 60.0;

fn game() -> Game {
    Game::headless(GameConfig::default()).unwrap()
}

fn ticks(game: &mut Game, n: usize) {
    for _ in 0..n {
        game.tick(FRAME);
    }
}

fn tap(game: &mut Game, key: KeyCode) {
    game.input_mut().press_key(key);
    game.tick(FRAME);
    game.input_mut().release_key(key);
}

fn attached_named(game: &Game, name: &str) -> usize {
    game.scene().attached().filter(|(_, o)| o.name == name).count()
}

fn plain(id: u32, doors: Vec<Door>) -> RoomDescriptor {
    RoomDescriptor {
        id,
        kind: RoomTag::Plain,
        size: RoomSize { width: 3.0, height: 1.0, depth: 3.0 },
        position: Vec3::ZERO,
        connections: doors.iter().map(|d| d.target).collect(),
        doors,
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn start_room_is_the_only_active_room() {
    let game = game();
    let rooms = game.rooms();
    assert_eq!(rooms.state(), ManagerState::RoomActive(4));
    assert_eq!(rooms.len(), 7);
    for id in rooms.room_ids() {
        let room = rooms.room(id).unwrap();
        assert_eq!(room.is_active(), id == 4, "room {id}");
        assert_eq!(game.scene().is_attached(room.shell().object()), id == 4, "room {id}");
    }
    assert!(game.scene().is_attached(game.character().object()));
    assert!(game.scene().is_attached(game.ambient_light()));
    assert_eq!(game.character().current_room(), Some(4));
}

#[test]
fn switching_rooms_tears_down_the_old_one() {
    let mut game = game();
    // player + 6 shell boxes + pedestal + pumpkin
    assert_eq!(game.physics().body_count(), 9);

    game.enter_room(5).unwrap();
    // player + 6 shell boxes + stand + pumpkin + 4 skeletons
    assert_eq!(game.physics().body_count(), 13);
    assert!(!game.rooms().room(4).unwrap().is_active());
    assert!(game.rooms().room(4).unwrap().shell().objects().is_empty());
    assert!(game.scene().contains(game.rooms().room(4).unwrap().shell().object()));

    game.enter_room(4).unwrap();
    assert_eq!(game.physics().body_count(), 9);
    assert_eq!(game.rooms().room(5).unwrap().shell().body_handles().len(), 0);
}

#[test]
fn unknown_room_changes_nothing() {
    let mut game = game();
    let err = game.enter_room(42).unwrap_err();
    assert!(matches!(err, GameError::UnknownRoom(42)));
    assert_eq!(game.rooms().state(), ManagerState::RoomActive(4));
    assert!(game.rooms().room(4).unwrap().is_active());
}

#[test]
fn each_activation_starts_a_new_epoch() {
    let mut game = game();
    assert_eq!(game.rooms().room(4).unwrap().epoch(), 1);
    game.enter_room(2).unwrap();
    game.enter_room(4).unwrap();
    assert_eq!(game.rooms().room(4).unwrap().epoch(), 2);
    assert_eq!(game.rooms().room(2).unwrap().epoch(), 1);
}

// ── Doors ────────────────────────────────────────────────────────────────────

#[test]
fn walking_through_the_north_door_enters_room_two_from_the_south() {
    let mut game = game();
    game.teleport_player(Vec3::new(0.0, -0.465, 0.9));
    game.input_mut().press_key(KeyCode::KeyW);
    ticks(&mut game, 30);
    game.input_mut().release_key(KeyCode::KeyW);
    game.tick(FRAME);
    assert_eq!(game.ui().message(), Some("press P to enter the next room"));

    tap(&mut game, KeyCode::KeyP);
    assert_eq!(game.rooms().state(), ManagerState::RoomActive(2));
    assert_eq!(game.character().position(), Vec3::new(0.0, -0.4, -1.0));
    assert_eq!(game.character().current_room(), Some(2));
    assert!(!game.rooms().room(4).unwrap().is_active());
    // player + 6 shell boxes + stand + boxes + pumpkin
    assert_eq!(game.physics().body_count(), 10);

    ticks(&mut game, 30);
    let pos = game.character().position();
    assert!((pos.y - (-0.465)).abs() < 5e-3, "{pos}");
}

#[test]
fn door_prompt_clears_when_walking_away() {
    let mut game = game();
    game.teleport_player(Vec3::new(1.2, -0.465, 0.0));
    game.tick(FRAME);
    assert_eq!(game.ui().message(), Some("press P to enter the next room"));
    game.teleport_player(Vec3::new(0.5, -0.465, -0.5));
    game.tick(FRAME);
    assert_eq!(game.ui().message(), None);
}

#[test]
fn east_door_lands_on_the_west_side_of_room_seven() {
    let mut game = game();
    game.teleport_player(Vec3::new(1.2, -0.465, 0.0));
    tap(&mut game, KeyCode::KeyP);
    assert_eq!(game.rooms().current_room_id(), Some(7));
    assert_eq!(game.character().position(), Vec3::new(-1.0, -0.4, 0.0));
}

#[test]
fn pressing_p_away_from_doors_does_nothing() {
    let mut game = game();
    game.teleport_player(Vec3::new(0.5, -0.465, -0.5));
    tap(&mut game, KeyCode::KeyP);
    assert_eq!(game.rooms().current_room_id(), Some(4));
}

#[test]
fn door_without_a_wall_or_canonical_rotation_aborts_the_transition() {
    let layout = vec![
        plain(4, vec![Door::new(Vec3::new(0.0, -0.17, 1.5), 0.3, 3)]),
        plain(3, vec![Door::new(Vec3::new(0.0, -0.17, -1.5), 0.0, 4).on_wall(Compass::South)]),
    ];
    let assets = StaticAssets::new().with(DOOR_MODEL, 0).with(PLAYER_MODEL, 0);
    let config = GameConfig::default();
    let physics = Box::new(RapierWorld::new(config.physics.gravity));
    let mut game = Game::new(config, physics, Box::new(assets), PoseLibrary::procedural(), layout).unwrap();

    game.teleport_player(Vec3::new(0.0, -0.465, 1.3));
    tap(&mut game, KeyCode::KeyP);
    assert_eq!(game.rooms().current_room_id(), Some(4));
    assert!((game.character().position().z - 1.3).abs() < 1e-3);
}

#[test]
fn door_walls_can_come_from_rotation_alone() {
    let layout = vec![
        plain(4, vec![Door::new(Vec3::new(0.0, -0.17, 1.5), 0.0, 3)]),
        plain(3, vec![Door::new(Vec3::new(0.0, -0.17, -1.5), std::f32::consts::PI, 4)]),
    ];
    let config = GameConfig::default();
    let physics = Box::new(RapierWorld::new(config.physics.gravity));
    let assets = StaticAssets::new().with(DOOR_MODEL, 0).with(PLAYER_MODEL, 0);
    let mut game = Game::new(config, physics, Box::new(assets), PoseLibrary::procedural(), layout).unwrap();

    game.teleport_player(Vec3::new(0.0, -0.465, 1.3));
    tap(&mut game, KeyCode::KeyP);
    assert_eq!(game.rooms().current_room_id(), Some(3));
    assert_eq!(game.character().position(), Vec3::new(0.0, -0.4, -1.0));
}

// ── Layout validation ────────────────────────────────────────────────────────

#[test]
fn layouts_with_bad_references_are_rejected() {
    let dup = vec![plain(1, vec![]), plain(1, vec![])];
    assert!(matches!(RoomManager::validate(&dup), Err(GameError::DuplicateRoom(1))));

    let dangling = vec![plain(1, vec![Door::new(Vec3::ZERO, 0.0, 9)])];
    assert!(matches!(RoomManager::validate(&dangling), Err(GameError::UnknownRoom(9))));

    let mut doorless = plain(1, vec![]);
    doorless.connections.push(2);
    let layout = vec![doorless, plain(2, vec![])];
    assert!(matches!(RoomManager::validate(&layout), Err(GameError::Config(_))));
}

#[test]
fn entry_offsets_outside_the_room_are_rejected() {
    for offset in [0.0, 1.5, 3.5] {
        let mut config = GameConfig::default();
        config.rooms.entry_offset = offset;
        let result = Game::headless(config);
        assert!(matches!(result, Err(GameError::Config(_))), "offset {offset}");
    }

    let config = GameConfig::default();
    let small = RoomDescriptor { size: RoomSize { width: 0.8, height: 1.0, depth: 3.0 }, ..plain(1, vec![]) };
    assert!(matches!(RoomManager::validate_entries(&[small], &config.rooms), Err(GameError::Config(_))));
    assert!(RoomManager::validate_entries(&layout::default_layout(), &config.rooms).is_ok());
}

fn door_rotation(wall: Compass) -> f32 {
    use std::f32::consts::{FRAC_PI_2, PI};
    match wall {
        Compass::North => 0.0,
        Compass::South => PI,
        Compass::East => FRAC_PI_2,
        Compass::West => -FRAC_PI_2,
    }
}

#[test]
fn every_entry_side_lands_inside_the_room() {
    let config = GameConfig::default();
    let tolerance = config.rooms.door_angle_tolerance;
    let room = RoomDescriptor { position: Vec3::new(4.0, 0.0, -6.0), ..plain(3, vec![]) };

    for wall in Compass::ALL {
        for rotation in [door_rotation(wall), door_rotation(wall) + tolerance * 0.5] {
            let door = Door::new(Vec3::ZERO, rotation, 3);
            let side = door.entry_side(tolerance).unwrap();
            assert_eq!(side, wall.opposite());
            let pos = room.entry_position(side, &config.rooms);
            assert!(room.bounds().contains_strict(pos), "{wall:?} at {rotation}: {pos}");
        }
    }
}

#[test]
fn layout_loads_from_json() {
    let json = serde_json::to_string(&layout::default_layout()).unwrap();
    let parsed: Vec<RoomDescriptor> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 7);
    let hub = parsed.iter().find(|r| r.id == 4).unwrap();
    assert_eq!(hub.kind, RoomTag::Hub);
    assert_eq!(hub.door_to(9).and_then(|d| d.wall), Some(Compass::South));
}

// ── Async decorations ────────────────────────────────────────────────────────

#[test]
fn decorations_arrive_over_later_frames() {
    let mut game = game();
    game.enter_room(2).unwrap();
    assert_eq!(attached_named(&game, "petal"), 0);
    ticks(&mut game, 8);
    assert_eq!(attached_named(&game, "petal"), 1);
    assert_eq!(attached_named(&game, "door"), 2);
}

#[test]
fn loads_for_a_room_left_early_are_discarded() {
    let mut game = game();
    game.enter_room(2).unwrap();
    game.enter_room(4).unwrap();
    ticks(&mut game, 8);
    assert_eq!(attached_named(&game, "petal"), 0);
    assert!(game.rooms().room(2).unwrap().shell().objects().is_empty());
    // room 4 doors only
    assert_eq!(attached_named(&game, "door"), 4);

    game.enter_room(2).unwrap();
    ticks(&mut game, 8);
    assert_eq!(attached_named(&game, "petal"), 1);
}

// ── Pumpkins ─────────────────────────────────────────────────────────────────

#[test]
fn talking_to_the_hub_pumpkin_steps_through_its_lines() {
    let mut game = game();
    game.teleport_player(Vec3::new(0.8, -0.465, 0.7));
    game.tick(FRAME);
    assert_eq!(game.ui().message(), Some("Press T to talk to the pumpkin"));
    assert_eq!(game.ui().dialogue(), None);

    tap(&mut game, KeyCode::KeyT);
    let first = game.ui().dialogue().map(str::to_owned);
    assert!(first.is_some());
    tap(&mut game, KeyCode::KeyT);
    let second = game.ui().dialogue().map(str::to_owned);
    assert!(second.is_some());
    assert_ne!(first, second);
    {
        let room = game.rooms_mut().active_room_mut().unwrap();
        let npc = &room.npcs_mut()[0];
        assert!(npc.is_talking());
        assert_eq!(npc.dialogue_index(), 1);
    }

    game.teleport_player(Vec3::new(0.5, -0.465, -0.8));
    game.tick(FRAME);
    assert_eq!(game.ui().dialogue(), None);
    let room = game.rooms_mut().active_room_mut().unwrap();
    assert!(!room.npcs_mut()[0].is_talking());
}

#[test]
fn leaving_a_room_hides_the_dialogue() {
    let mut game = game();
    game.teleport_player(Vec3::new(0.8, -0.465, 0.7));
    tap(&mut game, KeyCode::KeyT);
    assert!(game.ui().dialogue().is_some());
    game.enter_room(9).unwrap();
    assert_eq!(game.ui().dialogue(), None);
}
