use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::animation::Pose;
use crate::error::Result;

/// Key a named pose is stored under.
pub fn pose_key(name: &str) -> String {
    format!("pose_{name}")
}

/// Simple string key-value storage.
pub trait PoseStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub fn save_pose(store: &mut dyn PoseStore, name: &str, pose: &Pose) -> Result<()> {
    let json = serde_json::to_string(pose)?;
    store.set(&pose_key(name), &json)
}

/// `Ok(None)` when nothing is stored under `name`.
pub fn load_pose(store: &dyn PoseStore, name: &str) -> Result<Option<Pose>> {
    match store.get(&pose_key(name))? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

#[derive(Debug, Default)]
pub struct MemoryPoseStore {
    entries: HashMap<String, String>,
}

impl MemoryPoseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PoseStore for MemoryPoseStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per entry inside a directory.
#[derive(Debug, Clone)]
pub struct FilePoseStore {
    dir: PathBuf,
}

impl FilePoseStore {
    /// Creates the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' || c == ' ' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl PoseStore for FilePoseStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
