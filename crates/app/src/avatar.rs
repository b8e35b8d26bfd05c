//! Avatar collaborator seam. Movement and physics live behind it.

use housegen::SpawnPoint;

pub trait AvatarController {
    fn spawn(&mut self, spawn: SpawnPoint);
    fn despawn(&mut self);
}

/// Headless controller that remembers where it was placed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedAvatar {
    pub current: Option<SpawnPoint>,
    pub spawns: Vec<SpawnPoint>,
    pub despawns: usize,
}

impl RecordedAvatar {
    pub fn is_spawned(&self) -> bool {
        self.current.is_some()
    }
}

impl AvatarController for RecordedAvatar {
    fn spawn(&mut self, spawn: SpawnPoint) {
        self.current = Some(spawn);
        self.spawns.push(spawn);
    }

    fn despawn(&mut self) {
        if self.current.take().is_some() {
            self.despawns += 1;
        }
    }
}
