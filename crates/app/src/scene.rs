//! Scene-building collaborator seam and a headless inventory implementation.

use housegen::{HouseModel, WallKind};
use serde::Serialize;

/// Turns a generated model into engine objects. Implementations own whatever
/// they instantiate and must release all of it in `clear`.
pub trait SceneBuilder {
    fn clear(&mut self);
    fn build(&mut self, model: &HouseModel);
}

/// Counts the primitives a renderer would instantiate for the current model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SceneInventory {
    pub floor_slabs: usize,
    pub ceilings: usize,
    pub walls: usize,
    pub lintels: usize,
    pub door_frames: usize,
    pub corridor_tiles: usize,
    pub corridor_ceilings: usize,
    pub stair_steps: usize,
    pub railing_posts: usize,
    pub railing_rails: usize,
    pub stair_openings: usize,
    pub builds: usize,
}

impl SceneInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total_primitives() == 0
    }

    /// Boxes that would be instantiated; door frames count three pieces each.
    pub fn total_primitives(&self) -> usize {
        self.floor_slabs
            + self.ceilings
            + self.walls
            + self.lintels
            + self.door_frames * 3
            + self.corridor_tiles
            + self.corridor_ceilings
            + self.stair_steps
            + self.railing_posts
            + self.railing_rails
            + self.stair_openings
    }
}

impl SceneBuilder for SceneInventory {
    fn clear(&mut self) {
        let builds = self.builds;
        *self = Self { builds, ..Self::default() };
    }

    fn build(&mut self, model: &HouseModel) {
        for floor in &model.floors {
            for room in &floor.rooms {
                self.floor_slabs += 1;
                self.ceilings += usize::from(room.ceiling.is_some());
            }
            for wall in floor.walls.active() {
                match wall.kind {
                    WallKind::Lintel => self.lintels += 1,
                    WallKind::Full | WallKind::Before | WallKind::After => self.walls += 1,
                }
            }
            self.door_frames += floor.doors.len();
            for tile in floor.corridors.iter().flat_map(|corridor| corridor.tiles.iter()) {
                self.corridor_tiles += 1;
                self.corridor_ceilings += usize::from(tile.ceiling.is_some());
            }
        }
        for stair in &model.stairs {
            self.stair_steps += stair.steps.len();
            self.railing_posts += stair.left_posts.len() + stair.right_posts.len();
            self.railing_rails += stair.left_rails.len() + stair.right_rails.len();
            self.stair_openings += 1;
        }
        self.builds += 1;
    }
}
