//! Stairwell anchors and stepped stair geometry between consecutive floors.

use crate::config::HouseConfig;
use crate::geometry::{Box3, GridPos, Point3, RoomRect};
use crate::model::Stair;
use crate::rng::RandomSource;

pub const STEP_COUNT: usize = 10;
pub const STEP_WIDTH: f32 = 1.5;
pub const STEP_DEPTH: f32 = 0.3;
pub const RAILING_HEIGHT: f32 = 1.0;
pub const POST_WIDTH: f32 = 0.1;
/// Extra clearance around the flight in the opening cut into the floor above.
pub const OPENING_MARGIN: f32 = 0.5;
pub const OPENING_HEIGHT: f32 = 0.3;
pub const OPENING_DROP: f32 = 0.1;

/// Center of a uniformly drawn room on `floor`, at floor level.
pub fn pick_stair_anchor(
    rooms: &[RoomRect],
    floor: usize,
    config: &HouseConfig,
    rng: &mut impl RandomSource,
) -> Option<Point3> {
    if rooms.is_empty() {
        return None;
    }
    let room = rooms[rng.index(rooms.len())];
    let (x, z) = room.center();
    Some(Point3::new(x, config.elevation(floor), z))
}

/// Grid anchor for the next floor's first room.
pub fn next_floor_anchor(stair_anchor: Point3) -> GridPos {
    GridPos::new(stair_anchor.x.round_ties_even() as i32, stair_anchor.z.round_ties_even() as i32)
}

/// Builds the flight rising from `from_floor`, descending toward -z step by step.
pub fn build_stair(from_floor: usize, anchor: Point3, config: &HouseConfig) -> Stair {
    let step_height = config.floor_height / STEP_COUNT as f32;
    let step_size = Point3::new(STEP_WIDTH, step_height, STEP_DEPTH);

    let steps = (0..STEP_COUNT)
        .map(|i| {
            let i = i as f32;
            Box3::new(
                Point3::new(
                    anchor.x,
                    anchor.y + i * step_height + step_height / 2.0,
                    anchor.z - i * STEP_DEPTH,
                ),
                step_size,
            )
        })
        .collect();

    let side_x = STEP_WIDTH / 2.0 - POST_WIDTH / 2.0;
    let post = |x: f32, i: usize| {
        let i = i as f32;
        Box3::new(
            Point3::new(x, anchor.y + i * step_height + RAILING_HEIGHT / 2.0, anchor.z - i * STEP_DEPTH),
            Point3::new(POST_WIDTH, RAILING_HEIGHT, POST_WIDTH),
        )
    };
    let rail = |x: f32, i: usize| {
        let i = i as f32;
        Box3::new(
            Point3::new(
                x,
                anchor.y + i * step_height + RAILING_HEIGHT,
                anchor.z - i * STEP_DEPTH - STEP_DEPTH / 2.0,
            ),
            Point3::new(POST_WIDTH, POST_WIDTH, STEP_DEPTH),
        )
    };
    let (left_x, right_x) = (anchor.x - side_x, anchor.x + side_x);

    let opening_depth = STEP_COUNT as f32 * STEP_DEPTH + OPENING_MARGIN;
    let ceiling_opening = Box3::new(
        Point3::new(
            anchor.x,
            config.elevation(from_floor) + config.floor_height - OPENING_DROP,
            anchor.z - opening_depth / 2.0,
        ),
        Point3::new(STEP_WIDTH + OPENING_MARGIN, OPENING_HEIGHT, opening_depth),
    );

    Stair {
        from_floor,
        anchor,
        steps,
        left_posts: (0..=STEP_COUNT).map(|i| post(left_x, i)).collect(),
        right_posts: (0..=STEP_COUNT).map(|i| post(right_x, i)).collect(),
        left_rails: (0..STEP_COUNT).map(|i| rail(left_x, i)).collect(),
        right_rails: (0..STEP_COUNT).map(|i| rail(right_x, i)).collect(),
        ceiling_opening,
    }
}
