//! Core of a small room-based exploration game: rooms that build and tear
//! down their own content, a physics-driven third-person character, and
//! pose-blended skeletal animation. Everything runs headless; a renderer
//! only has to read the scene graph, the camera and the UI surface.

pub mod actors;
pub mod animation;
pub mod assets;
pub mod camera;
pub mod character;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod persistence;
pub mod physics;
pub mod room;
pub mod scene;
pub mod ui;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Game, GameStatus};
