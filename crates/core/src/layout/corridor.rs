//! L-shaped corridor paths between room centers and their tile geometry.

use std::iter::FusedIterator;

use crate::config::HouseConfig;
use crate::geometry::{Box3, GridPos, Point3};
use crate::model::{Connection, Corridor, CorridorTile};

/// Thickness of every floor and ceiling slab.
pub const SLAB_THICKNESS: f32 = 0.2;

/// Cells from `from` to `to`, stepping along x first and then along y.
#[derive(Clone, Debug)]
pub struct CorridorPath {
    current: GridPos,
    to: GridPos,
    done: bool,
}

pub fn corridor_path(from: GridPos, to: GridPos) -> CorridorPath {
    CorridorPath { current: from, to, done: false }
}

impl Iterator for CorridorPath {
    type Item = GridPos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cell = self.current;
        if self.current.x != self.to.x {
            self.current.x += (self.to.x - self.current.x).signum();
        } else if self.current.y != self.to.y {
            self.current.y += (self.to.y - self.current.y).signum();
        } else {
            self.done = true;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            if self.done { 0 } else { self.current.manhattan(self.to) as usize + 1 };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CorridorPath {}

impl FusedIterator for CorridorPath {}

pub fn corridor_tile(cell: GridPos, floor: usize, config: &HouseConfig) -> CorridorTile {
    let elevation = config.elevation(floor);
    let footprint = Point3::new(config.corridor_width, SLAB_THICKNESS, config.corridor_width);
    let floor_slab =
        Box3::new(Point3::new(cell.x as f32, elevation, cell.y as f32), footprint);
    let ceiling = (!config.is_top_floor(floor)).then(|| {
        Box3::new(
            Point3::new(cell.x as f32, elevation + config.wall_height, cell.y as f32),
            footprint,
        )
    });
    CorridorTile { cell, elevation, floor_slab, ceiling }
}

/// Lays the corridor for `connection`. Tiles are not checked against rooms.
pub fn lay_corridor(
    floor: usize,
    connection: Connection,
    from: GridPos,
    to: GridPos,
    config: &HouseConfig,
) -> Corridor {
    let tiles = corridor_path(from, to).map(|cell| corridor_tile(cell, floor, config)).collect();
    Corridor { floor, connection, from, to, tiles }
}
