use thiserror::Error;

use crate::room::RoomId;

/// Errors surfaced by fallible game operations.
///
/// Most runtime degradations (missing assets, missing bones) are logged and
/// swallowed where they happen; only operations a caller can act on return one
/// of these.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("room {0} is registered twice")]
    DuplicateRoom(RoomId),

    #[error("door in room {room} leading to room {target} has no usable orientation")]
    NoDoorOrientation { room: RoomId, target: RoomId },

    #[error("asset not available: {0}")]
    MissingAsset(String),

    #[error("pose sequence needs at least 2 poses, got {0}")]
    InvalidPoseSequence(usize),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
