//! Public data model produced by generation and handed to the scene-building collaborator.

use serde::Serialize;
use slotmap::new_key_type;
use xxhash_rust::xxh3::xxh3_64;

use crate::geometry::{Box3, Direction, GridPos, Point3, RoomRect};
use crate::layout::walls::WallSet;

new_key_type! {
    pub struct WallId;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Room {
    /// Stable index within its floor; referenced by connections and doors.
    pub index: usize,
    pub rect: RoomRect,
    pub elevation: f32,
    pub floor_slab: Box3,
    /// Absent on the top floor.
    pub ceiling: Option<Box3>,
    /// Original walls in `Direction::ALL` order. They may since have been cut.
    pub walls: [WallId; 4],
}

/// Tree edge: `room_b` was grown from `room_a` on `room_a`'s `direction` side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub room_a: usize,
    pub room_b: usize,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum WallKind {
    Full,
    Before,
    After,
    Lintel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Wall {
    pub room: usize,
    pub side: Direction,
    /// Fixed grid coordinate of the wall's line (z for North/South, x for East/West).
    pub line: i32,
    pub slab: Box3,
    pub kind: WallKind,
    pub cut_from: Option<WallId>,
    /// Removed walls stay in the store so ids taken before a cut remain valid.
    pub removed: bool,
}

impl Wall {
    pub fn is_active(&self) -> bool {
        !self.removed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DoorFrame {
    pub posts: [Box3; 2],
    pub beam: Box3,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Door {
    pub floor: usize,
    pub connection: Connection,
    /// Doorway box on `room_b`'s wall facing `room_a`.
    pub opening: Box3,
    pub frame: DoorFrame,
    /// Walls whose records were replaced by segments for this door.
    pub cut_walls: Vec<WallId>,
    /// The rooms did not overlap along the wall axis and the midpoint was used.
    pub fallback: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CorridorTile {
    pub cell: GridPos,
    pub elevation: f32,
    pub floor_slab: Box3,
    pub ceiling: Option<Box3>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Corridor {
    pub floor: usize,
    pub connection: Connection,
    pub from: GridPos,
    pub to: GridPos,
    pub tiles: Vec<CorridorTile>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stair {
    pub from_floor: usize,
    pub anchor: Point3,
    pub steps: Vec<Box3>,
    pub left_posts: Vec<Box3>,
    pub right_posts: Vec<Box3>,
    pub left_rails: Vec<Box3>,
    pub right_rails: Vec<Box3>,
    /// Cut-out region just under the next floor's surface.
    pub ceiling_opening: Box3,
}

impl Stair {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpawnPoint {
    pub position: Point3,
    pub height: f32,
}

/// Recoverable conditions met during generation. None of them abort a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Diagnostic {
    LayoutIncomplete { floor: usize, placed: usize, requested: usize },
    DoorwayFallback { floor: usize, connection: Connection, coordinate: i32 },
    WallNotFound { floor: usize, room: usize, side: Direction, coordinate: f32 },
    StairSkipped { from_floor: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloorPlan {
    pub index: usize,
    pub elevation: f32,
    pub rooms: Vec<Room>,
    pub connections: Vec<Connection>,
    pub doors: Vec<Door>,
    pub corridors: Vec<Corridor>,
    pub walls: WallSet,
}

impl FloorPlan {
    pub fn empty(index: usize, elevation: f32) -> Self {
        Self {
            index,
            elevation,
            rooms: Vec::new(),
            connections: Vec::new(),
            doors: Vec::new(),
            corridors: Vec::new(),
            walls: WallSet::default(),
        }
    }

    pub fn room_rects(&self) -> impl Iterator<Item = RoomRect> + '_ {
        self.rooms.iter().map(|room| room.rect)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HouseModel {
    pub floors: Vec<FloorPlan>,
    pub stairs: Vec<Stair>,
    pub spawn: Option<SpawnPoint>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HouseModel {
    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.rooms.len()).sum()
    }

    pub fn connection_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.connections.len()).sum()
    }

    pub fn door_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.doors.len()).sum()
    }

    pub fn corridor_tile_count(&self) -> usize {
        self.floors
            .iter()
            .flat_map(|floor| floor.corridors.iter())
            .map(|corridor| corridor.tiles.len())
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|diagnostic| matches!(diagnostic, Diagnostic::LayoutIncomplete { .. }))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            bytes.extend((floor.rooms.len() as u32).to_le_bytes());
            for room in &floor.rooms {
                for value in [room.rect.x, room.rect.y, room.rect.width, room.rect.height] {
                    bytes.extend(value.to_le_bytes());
                }
            }

            bytes.extend((floor.connections.len() as u32).to_le_bytes());
            for connection in &floor.connections {
                bytes.extend((connection.room_a as u32).to_le_bytes());
                bytes.extend((connection.room_b as u32).to_le_bytes());
                bytes.push(connection.direction.code());
            }

            bytes.extend((floor.doors.len() as u32).to_le_bytes());
            for door in &floor.doors {
                push_box(&mut bytes, &door.opening);
                bytes.push(u8::from(door.fallback));
            }

            for corridor in &floor.corridors {
                bytes.extend((corridor.tiles.len() as u32).to_le_bytes());
                for tile in &corridor.tiles {
                    bytes.extend(tile.cell.x.to_le_bytes());
                    bytes.extend(tile.cell.y.to_le_bytes());
                }
            }

            let mut active_walls: Vec<&Wall> = floor.walls.active().collect();
            active_walls.sort_by_key(|wall| (wall.room, wall.side, wall.kind as u8));
            bytes.extend((active_walls.len() as u32).to_le_bytes());
            for wall in active_walls {
                push_box(&mut bytes, &wall.slab);
            }
        }

        bytes.extend((self.stairs.len() as u32).to_le_bytes());
        for stair in &self.stairs {
            bytes.extend((stair.from_floor as u32).to_le_bytes());
            push_point(&mut bytes, stair.anchor);
            push_box(&mut bytes, &stair.ceiling_opening);
        }

        if let Some(spawn) = self.spawn {
            push_point(&mut bytes, spawn.position);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_point(bytes: &mut Vec<u8>, point: Point3) {
    bytes.extend(point.x.to_le_bytes());
    bytes.extend(point.y.to_le_bytes());
    bytes.extend(point.z.to_le_bytes());
}

fn push_box(bytes: &mut Vec<u8>, bounds: &Box3) {
    push_point(bytes, bounds.center);
    push_point(bytes, bounds.size);
}
