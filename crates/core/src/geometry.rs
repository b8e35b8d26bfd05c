//! Grid rectangles, world-space points and boxes, and the overlap tests used by placement.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Cardinal side of a room. North is +Z (grid +y), East is +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// North/South walls run along X; East/West walls run along Z.
    pub fn wall_axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::X,
            Self::East | Self::West => Axis::Z,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

/// Integer room footprint on one floor. Edges are half-open: `[x, x + width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomRect {
    pub floor: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RoomRect {
    pub fn new(floor: usize, origin: GridPos, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "room footprint must be non-empty");
        Self { floor, x: origin.x, y: origin.y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn top(self) -> i32 {
        self.y + self.height
    }

    /// Exact center in world units (grid y maps to world z).
    pub fn center(self) -> (f32, f32) {
        (self.x as f32 + self.width as f32 / 2.0, self.y as f32 + self.height as f32 / 2.0)
    }

    /// Center snapped to the grid, ties rounded to even.
    pub fn center_cell(self) -> GridPos {
        let (cx, cy) = self.center();
        GridPos { x: cx.round_ties_even() as i32, y: cy.round_ties_even() as i32 }
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self {
            floor: self.floor,
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2,
            height: self.height + margin * 2,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Span along the axis a wall on `side` runs: X for North/South, grid y for East/West.
    pub fn span_along(self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::X => (self.x, self.right()),
            Axis::Z => (self.y, self.top()),
        }
    }

    /// Fixed coordinate of the wall line bounding `side`.
    pub fn wall_line(self, side: Direction) -> i32 {
        match side {
            Direction::North => self.top(),
            Direction::South => self.y,
            Direction::East => self.right(),
            Direction::West => self.x,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }
}

/// Axis-aligned box given by its center and full extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub center: Point3,
    pub size: Point3,
}

impl Box3 {
    pub fn new(center: Point3, size: Point3) -> Self {
        Self { center, size }
    }

    pub fn min(self) -> Point3 {
        Point3::new(
            self.center.x - self.size.x / 2.0,
            self.center.y - self.size.y / 2.0,
            self.center.z - self.size.z / 2.0,
        )
    }

    pub fn max(self) -> Point3 {
        Point3::new(
            self.center.x + self.size.x / 2.0,
            self.center.y + self.size.y / 2.0,
            self.center.z + self.size.z / 2.0,
        )
    }

    pub fn volume(self) -> f32 {
        self.size.x * self.size.y * self.size.z
    }

    /// Strict overlap; boxes that only share a face do not overlap.
    pub fn overlaps(self, other: &Self, tolerance: f32) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x - tolerance
            && b_min.x < a_max.x - tolerance
            && a_min.y < b_max.y - tolerance
            && b_min.y < a_max.y - tolerance
            && a_min.z < b_max.z - tolerance
            && b_min.z < a_max.z - tolerance
    }

    pub fn is_horizontal(self) -> bool {
        self.size.x > self.size.z
    }

    pub fn long_axis(self) -> Axis {
        if self.is_horizontal() { Axis::X } else { Axis::Z }
    }

    pub fn length_along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.size.x,
            Axis::Z => self.size.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_rooms_separated_by_the_placement_gap_do_not_intersect() {
        let parent = RoomRect::new(0, GridPos::new(0, 0), 5, 5);
        let north_child = RoomRect::new(0, GridPos::new(1, 7), 4, 4);
        assert!(!parent.expanded(1).intersects(&north_child.expanded(1)));

        let touching = RoomRect::new(0, GridPos::new(1, 6), 4, 4);
        assert!(parent.expanded(1).intersects(&touching.expanded(1)));
    }

    #[test]
    fn center_cell_rounds_half_to_even() {
        let room = RoomRect::new(0, GridPos::new(0, 0), 5, 7);
        assert_eq!(room.center(), (2.5, 3.5));
        assert_eq!(room.center_cell(), GridPos::new(2, 4));
    }

    #[test]
    fn wall_lines_follow_room_edges() {
        let room = RoomRect::new(1, GridPos::new(-3, 2), 6, 4);
        assert_eq!(room.wall_line(Direction::North), 6);
        assert_eq!(room.wall_line(Direction::South), 2);
        assert_eq!(room.wall_line(Direction::East), 3);
        assert_eq!(room.wall_line(Direction::West), -3);
        assert_eq!(room.span_along(Direction::North.wall_axis()), (-3, 3));
        assert_eq!(room.span_along(Direction::West.wall_axis()), (2, 6));
    }

    #[test]
    fn boxes_sharing_a_face_do_not_overlap() {
        let a = Box3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let b = Box3::new(Point3::new(2.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let c = Box3::new(Point3::new(1.5, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        assert!(!a.overlaps(&b, 1e-4));
        assert!(a.overlaps(&c, 1e-4));
    }

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.wall_axis(), direction.opposite().wall_axis());
        }
    }
}
