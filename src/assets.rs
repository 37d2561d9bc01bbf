// =============================================================================
// ASSETS.RS - asynchronous model loading with owner tokens
//
// Loads are polled once per frame. Every request carries the token of whoever
// asked for it; the room manager drops completions whose room epoch has moved
// on. A path that failed once is never requested again this session.
// =============================================================================

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use log::{debug, warn};

use crate::room::RoomId;

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedModel {
    pub path: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Pending,
    Ready(LoadedModel),
    Failed(String),
}

/// Identifies one queued load. Two requests for the same path are distinct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Backend that actually produces models. Polled, never blocks.
pub trait AssetSource {
    fn poll(&mut self, request: RequestId, path: &str) -> LoadStatus;
}

/// In-memory manifest: each known path becomes ready after a fixed number of
/// polls of the same request. Unknown paths fail.
#[derive(Debug, Default)]
pub struct StaticAssets {
    latency: HashMap<String, u32>,
    polled: HashMap<RequestId, u32>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path`; it resolves on the `frames`-th poll (0 = first poll).
    pub fn insert(&mut self, path: impl Into<String>, frames: u32) {
        self.latency.insert(path.into(), frames);
    }

    pub fn with(mut self, path: impl Into<String>, frames: u32) -> Self {
        self.insert(path, frames);
        self
    }
}

impl AssetSource for StaticAssets {
    fn poll(&mut self, request: RequestId, path: &str) -> LoadStatus {
        let Some(&latency) = self.latency.get(path) else {
            return LoadStatus::Failed(format!("{path}: not found"));
        };
        let count = self.polled.entry(request).or_insert(0);
        if *count >= latency {
            self.polled.remove(&request);
            LoadStatus::Ready(LoadedModel { path: path.to_string() })
        } else {
            *count += 1;
            LoadStatus::Pending
        }
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

/// Who asked for a load.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadOwner {
    /// A room decoration, valid only while the room keeps this epoch.
    Room { room: RoomId, epoch: u64 },
    /// The player's skinned model.
    Player,
}

/// Where a loaded model goes once it arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub name: String,
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: Vec3,
}

impl Placement {
    pub fn at(name: impl Into<String>, position: Vec3) -> Self {
        Self { name: name.into(), position, rotation_y: 0.0, scale: Vec3::ONE }
    }

    pub fn rotated(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

#[derive(Clone, Debug)]
struct PendingLoad {
    id: RequestId,
    path: String,
    owner: LoadOwner,
    placement: Placement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletedLoad {
    pub owner: LoadOwner,
    pub placement: Placement,
    pub model: LoadedModel,
}

#[derive(Debug, Default)]
pub struct AssetQueue {
    pending: Vec<PendingLoad>,
    failed: HashSet<String>,
    next_id: u64,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a load. Returns `false` without queueing when the path already
    /// failed earlier.
    pub fn request(&mut self, path: impl Into<String>, owner: LoadOwner, placement: Placement) -> bool {
        let path = path.into();
        if self.failed.contains(&path) {
            debug!("skipping {path}: failed earlier");
            return false;
        }
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingLoad { id, path, owner, placement });
        true
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn has_failed(&self, path: &str) -> bool {
        self.failed.contains(path)
    }

    /// Polls every pending load once. Failures are logged here and dropped.
    pub fn poll(&mut self, source: &mut dyn AssetSource) -> Vec<CompletedLoad> {
        let mut done = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for load in self.pending.drain(..) {
            match source.poll(load.id, &load.path) {
                LoadStatus::Pending => still_pending.push(load),
                LoadStatus::Ready(model) => {
                    done.push(CompletedLoad { owner: load.owner, placement: load.placement, model });
                }
                LoadStatus::Failed(reason) => {
                    warn!("failed to load {}: {reason}", load.path);
                    self.failed.insert(load.path);
                }
            }
        }
        self.pending = still_pending;
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_delays_completion() {
        let mut source = StaticAssets::new().with("door.glb", 2);
        let mut queue = AssetQueue::new();
        queue.request("door.glb", LoadOwner::Player, Placement::at("door", Vec3::ZERO));
        assert!(queue.poll(&mut source).is_empty());
        assert!(queue.poll(&mut source).is_empty());
        let done = queue.poll(&mut source);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].model.path, "door.glb");
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn same_path_requests_count_their_own_polls() {
        let mut source = StaticAssets::new().with("door.glb", 1);
        let mut queue = AssetQueue::new();
        queue.request("door.glb", LoadOwner::Player, Placement::at("north door", Vec3::ZERO));
        queue.request("door.glb", LoadOwner::Player, Placement::at("south door", Vec3::ZERO));
        assert!(queue.poll(&mut source).is_empty());
        let done = queue.poll(&mut source);
        let names: Vec<&str> = done.iter().map(|d| d.placement.name.as_str()).collect();
        assert_eq!(names, ["north door", "south door"]);

        // a later request starts its own count
        queue.request("door.glb", LoadOwner::Player, Placement::at("east door", Vec3::ZERO));
        assert!(queue.poll(&mut source).is_empty());
        assert_eq!(queue.poll(&mut source).len(), 1);
    }

    #[test]
    fn failed_path_is_not_retried() {
        let mut source = StaticAssets::new();
        let mut queue = AssetQueue::new();
        assert!(queue.request("missing.glb", LoadOwner::Player, Placement::at("x", Vec3::ZERO)));
        assert!(queue.poll(&mut source).is_empty());
        assert!(queue.has_failed("missing.glb"));
        assert!(!queue.request("missing.glb", LoadOwner::Player, Placement::at("x", Vec3::ZERO)));
    }
}
