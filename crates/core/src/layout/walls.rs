//! Room wall construction, the per-floor wall index, and cutting openings into wall spans.

use std::collections::BTreeMap;

use serde::Serialize;
use slotmap::SlotMap;

use crate::config::HouseConfig;
use crate::geometry::{Axis, Box3, Direction, Point3, RoomRect};
use crate::model::{Wall, WallId, WallKind};

/// Pieces shorter than this are dropped instead of emitted as degenerate geometry.
pub const SEGMENT_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct WallLine {
    side: Direction,
    line: i32,
}

/// Wall store for one floor. Cut walls are kept but flagged removed.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WallSet {
    walls: SlotMap<WallId, Wall>,
    #[serde(skip)]
    index: BTreeMap<WallLine, Vec<WallId>>,
}

impl WallSet {
    pub fn get(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Wall> {
        self.walls.values().filter(|wall| wall.is_active())
    }

    /// Segments that were produced by cutting `id`.
    pub fn segments_of(&self, id: WallId) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter().filter(move |(_, wall)| wall.cut_from == Some(id))
    }

    /// Builds the four full-height walls of a room, in `Direction::ALL` order.
    pub fn build_room_walls(
        &mut self,
        room_index: usize,
        rect: RoomRect,
        elevation: f32,
        config: &HouseConfig,
    ) -> [WallId; 4] {
        Direction::ALL.map(|side| {
            let wall = Wall {
                room: room_index,
                side,
                line: rect.wall_line(side),
                slab: room_wall_slab(rect, side, elevation, config),
                kind: WallKind::Full,
                cut_from: None,
                removed: false,
            };
            self.insert(wall)
        })
    }

    /// Active, full-height wall on `side` at `line` whose span contains `along`.
    pub fn find(&self, side: Direction, line: i32, along: f32) -> Option<WallId> {
        let ids = self.index.get(&WallLine { side, line })?;
        ids.iter().copied().find(|&id| {
            self.walls.get(id).is_some_and(|wall| {
                if !wall.is_active() || wall.kind == WallKind::Lintel {
                    return false;
                }
                let axis = side.wall_axis();
                let half = wall.slab.length_along(axis) / 2.0;
                let center = wall.slab.center.along(axis);
                along >= center - half - SEGMENT_EPSILON && along <= center + half + SEGMENT_EPSILON
            })
        })
    }

    /// Replaces `id` with the segments left around `opening`. Returns the new segment ids.
    pub fn cut_opening(&mut self, id: WallId, opening: &Box3) -> Vec<WallId> {
        let Some(original) = self.walls.get_mut(id) else {
            return Vec::new();
        };
        original.removed = true;
        let (room, side, line) = (original.room, original.side, original.line);
        let cut = segment_wall(&original.slab, opening);

        cut.segments()
            .map(|(kind, slab)| {
                self.insert(Wall { room, side, line, slab, kind, cut_from: Some(id), removed: false })
            })
            .collect()
    }

    fn insert(&mut self, wall: Wall) -> WallId {
        let key = WallLine { side: wall.side, line: wall.line };
        let indexed = wall.kind != WallKind::Lintel;
        let id = self.walls.insert(wall);
        if indexed {
            self.index.entry(key).or_default().push(id);
        }
        id
    }
}

impl PartialEq for WallSet {
    fn eq(&self, other: &Self) -> bool {
        self.walls.len() == other.walls.len()
            && self.walls.iter().zip(other.walls.iter()).all(|(left, right)| left == right)
    }
}

fn room_wall_slab(rect: RoomRect, side: Direction, elevation: f32, config: &HouseConfig) -> Box3 {
    let (center_x, center_z) = rect.center();
    let y = elevation + config.wall_height / 2.0;
    let line = rect.wall_line(side) as f32;
    match side {
        Direction::North | Direction::South => Box3::new(
            Point3::new(center_x, y, line),
            Point3::new(rect.width as f32, config.wall_height, config.wall_thickness),
        ),
        Direction::East | Direction::West => Box3::new(
            Point3::new(line, y, center_z),
            Point3::new(config.wall_thickness, config.wall_height, rect.height as f32),
        ),
    }
}

/// Remaining pieces of a wall after an opening is removed from it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallCut {
    pub before: Option<Box3>,
    pub after: Option<Box3>,
    pub lintel: Option<Box3>,
}

impl WallCut {
    pub fn segments(&self) -> impl Iterator<Item = (WallKind, Box3)> {
        [
            self.before.map(|slab| (WallKind::Before, slab)),
            self.after.map(|slab| (WallKind::After, slab)),
            self.lintel.map(|slab| (WallKind::Lintel, slab)),
        ]
        .into_iter()
        .flatten()
    }

    /// Summed length of the full-height pieces along the wall's long axis.
    pub fn remaining_length(&self, axis: Axis) -> f32 {
        [self.before, self.after].iter().flatten().map(|slab| slab.length_along(axis)).sum()
    }
}

/// Splits `wall` around `opening`. The orientation comes from the wall's own extents.
/// The opening is usually inside the span; portions outside it are clipped.
pub fn segment_wall(wall: &Box3, opening: &Box3) -> WallCut {
    let axis = wall.long_axis();
    let wall_half = wall.length_along(axis) / 2.0;
    let wall_start = wall.center.along(axis) - wall_half;
    let wall_end = wall.center.along(axis) + wall_half;

    let opening_half = opening.length_along(axis) / 2.0;
    let opening_start = opening.center.along(axis) - opening_half;
    let opening_end = opening.center.along(axis) + opening_half;

    let before_len = opening_start.min(wall_end) - wall_start;
    let after_len = wall_end - opening_end.max(wall_start);

    let before = (before_len > SEGMENT_EPSILON)
        .then(|| along_piece(wall, axis, wall_start + before_len / 2.0, before_len));
    let after = (after_len > SEGMENT_EPSILON)
        .then(|| along_piece(wall, axis, wall_end - after_len / 2.0, after_len));

    let wall_top = wall.center.y + wall.size.y / 2.0;
    let opening_top = opening.center.y + opening.size.y / 2.0;
    let lintel_height = wall_top - opening_top;
    let lintel_start = opening_start.max(wall_start);
    let lintel_end = opening_end.min(wall_end);
    let lintel_len = lintel_end - lintel_start;

    let lintel = (lintel_height > SEGMENT_EPSILON && lintel_len > SEGMENT_EPSILON).then(|| {
        let mut piece = along_piece(wall, axis, lintel_start + lintel_len / 2.0, lintel_len);
        piece.center.y = opening_top + lintel_height / 2.0;
        piece.size.y = lintel_height;
        piece
    });

    WallCut { before, after, lintel }
}

fn along_piece(wall: &Box3, axis: Axis, center_along: f32, length: f32) -> Box3 {
    let mut piece = *wall;
    match axis {
        Axis::X => {
            piece.center.x = center_along;
            piece.size.x = length;
        }
        Axis::Z => {
            piece.center.z = center_along;
            piece.size.z = length;
        }
    }
    piece
}
