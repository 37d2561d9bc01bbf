//! Non-player actors living inside a room. Each one registers its body and
//! scene object with the owning room's shell so room teardown removes them.

pub mod chaser;
pub mod enemy;
pub mod npc;

pub use chaser::RottenPumpkin;
pub use enemy::{EnemySkeleton, EnemyState};
pub use npc::PumpkinNpc;
