//! Doorway coordinate resolution and door construction across a connection.

use tracing::{debug, warn};

use crate::config::HouseConfig;
use crate::geometry::{Axis, Box3, Point3, RoomRect};
use crate::model::{Connection, Diagnostic, Door, DoorFrame};

use super::walls::WallSet;

pub const FRAME_THICKNESS: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorCoordinate {
    /// Centered in the shared span and pulled inward from its edges.
    Centered(i32),
    /// The spans do not overlap; mean of all four bounds.
    Fallback(i32),
}

impl DoorCoordinate {
    pub fn value(self) -> i32 {
        match self {
            Self::Centered(value) | Self::Fallback(value) => value,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Inward clamp distance from an overlap edge for a door of `door_width`.
pub fn edge_offset(door_width: f32) -> i32 {
    (door_width / 2.0).ceil() as i32 + 1
}

/// Picks the doorway center along the wall axis from the spans of both rooms.
pub fn resolve_door_coordinate(
    min1: i32,
    max1: i32,
    min2: i32,
    max2: i32,
    door_width: f32,
) -> DoorCoordinate {
    let overlap_min = min1.max(min2);
    let overlap_max = max1.min(max2);
    if overlap_max <= overlap_min {
        return DoorCoordinate::Fallback((min1 + max1 + min2 + max2) / 4);
    }

    let position = overlap_min + (overlap_max - overlap_min) / 2;
    let offset = edge_offset(door_width);
    let position = if position - offset < overlap_min {
        overlap_min + offset
    } else if position + offset > overlap_max {
        overlap_max - offset
    } else {
        position
    };
    DoorCoordinate::Centered(position)
}

/// Doorway box centered at `along` on a wall running along `axis` at `line`.
pub fn doorway_box(axis: Axis, along: f32, line: f32, elevation: f32, config: &HouseConfig) -> Box3 {
    let y = elevation + config.door_height / 2.0;
    match axis {
        Axis::X => Box3::new(
            Point3::new(along, y, line),
            Point3::new(config.door_width, config.door_height, config.wall_thickness),
        ),
        Axis::Z => Box3::new(
            Point3::new(line, y, along),
            Point3::new(config.wall_thickness, config.door_height, config.door_width),
        ),
    }
}

/// Two jamb posts and a top beam hugging the inside of `opening`.
pub fn door_frame(opening: &Box3) -> DoorFrame {
    let Box3 { center, size } = *opening;
    let beam_y = center.y + size.y / 2.0 - FRAME_THICKNESS / 2.0;

    if opening.is_horizontal() {
        let post_offset = size.x / 2.0 - FRAME_THICKNESS / 2.0;
        let post_size = Point3::new(FRAME_THICKNESS, size.y, size.z);
        DoorFrame {
            posts: [
                Box3::new(Point3::new(center.x - post_offset, center.y, center.z), post_size),
                Box3::new(Point3::new(center.x + post_offset, center.y, center.z), post_size),
            ],
            beam: Box3::new(
                Point3::new(center.x, beam_y, center.z),
                Point3::new(size.x - 2.0 * FRAME_THICKNESS, FRAME_THICKNESS, size.z),
            ),
        }
    } else {
        let post_offset = size.z / 2.0 - FRAME_THICKNESS / 2.0;
        let post_size = Point3::new(size.x, size.y, FRAME_THICKNESS);
        DoorFrame {
            posts: [
                Box3::new(Point3::new(center.x, center.y, center.z - post_offset), post_size),
                Box3::new(Point3::new(center.x, center.y, center.z + post_offset), post_size),
            ],
            beam: Box3::new(
                Point3::new(center.x, beam_y, center.z),
                Point3::new(size.x, FRAME_THICKNESS, size.z - 2.0 * FRAME_THICKNESS),
            ),
        }
    }
}

/// Places the door for `connection` and cuts the matching opening into the
/// child's wall facing the parent and the parent's wall facing the child.
pub fn build_door(
    floor: usize,
    elevation: f32,
    connection: Connection,
    rooms: &[RoomRect],
    walls: &mut WallSet,
    config: &HouseConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Door {
    let parent = rooms[connection.room_a];
    let child = rooms[connection.room_b];
    let axis = connection.direction.wall_axis();
    let (min1, max1) = parent.span_along(axis);
    let (min2, max2) = child.span_along(axis);

    let coordinate = resolve_door_coordinate(min1, max1, min2, max2, config.door_width);
    if coordinate.is_fallback() {
        warn!(floor, ?connection, coordinate = coordinate.value(), "doorway fell back to midpoint");
        diagnostics.push(Diagnostic::DoorwayFallback {
            floor,
            connection,
            coordinate: coordinate.value(),
        });
    }
    let along = coordinate.value() as f32;

    let child_side = connection.direction.opposite();
    let child_line = child.wall_line(child_side);
    let parent_line = parent.wall_line(connection.direction);
    let opening = doorway_box(axis, along, child_line as f32, elevation, config);

    let mut cut_walls = Vec::with_capacity(2);
    let cuts = [
        (connection.room_b, child_side, child_line),
        (connection.room_a, connection.direction, parent_line),
    ];
    for (room, side, line) in cuts {
        let cut_box = doorway_box(axis, along, line as f32, elevation, config);
        match walls.find(side, line, along) {
            Some(id) => {
                walls.cut_opening(id, &cut_box);
                cut_walls.push(id);
            }
            None => {
                warn!(floor, room, ?side, coordinate = along, "no wall under doorway");
                diagnostics.push(Diagnostic::WallNotFound { floor, room, side, coordinate: along });
            }
        }
    }

    debug!(
        floor,
        from = connection.room_a,
        to = connection.room_b,
        coordinate = coordinate.value(),
        cuts = cut_walls.len(),
        "door placed"
    );

    Door {
        floor,
        connection,
        opening,
        frame: door_frame(&opening),
        cut_walls,
        fallback: coordinate.is_fallback(),
    }
}
