//! Tree-grown room placement with bounded overlap retries.

use tracing::debug;

use crate::config::HouseConfig;
use crate::geometry::{Direction, GridPos, RoomRect};
use crate::model::Connection;
use crate::rng::RandomSource;

/// Distance kept between a parent room's edge and a room grown from it.
pub const PLACEMENT_GAP: i32 = 2;
/// Margin applied to both rectangles before the overlap test.
pub const OVERLAP_MARGIN: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedRoom {
    pub index: usize,
    pub rect: RoomRect,
    pub connection: Connection,
    pub attempts: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(PlacedRoom),
    Exhausted { attempts: u32 },
}

pub fn random_room_size(config: &HouseConfig, rng: &mut impl RandomSource) -> (i32, i32) {
    let width = rng.range_inclusive(config.room_size_min.0, config.room_size_max.0);
    let height = rng.range_inclusive(config.room_size_min.1, config.room_size_max.1);
    (width, height)
}

/// Position of a `size` room grown from `parent` on its `direction` side.
/// `perpendicular_offset` slides it along the parent's edge.
pub fn candidate_rect(
    parent: RoomRect,
    direction: Direction,
    size: (i32, i32),
    perpendicular_offset: i32,
) -> RoomRect {
    let (width, height) = size;
    let origin = match direction {
        Direction::North => {
            GridPos::new(parent.x + perpendicular_offset, parent.top() + PLACEMENT_GAP)
        }
        Direction::East => {
            GridPos::new(parent.right() + PLACEMENT_GAP, parent.y + perpendicular_offset)
        }
        Direction::South => {
            GridPos::new(parent.x + perpendicular_offset, parent.y - height - PLACEMENT_GAP)
        }
        Direction::West => {
            GridPos::new(parent.x - width - PLACEMENT_GAP, parent.y + perpendicular_offset)
        }
    };
    RoomRect::new(parent.floor, origin, width, height)
}

pub fn overlaps_any(candidate: RoomRect, placed: &[RoomRect]) -> bool {
    let candidate = candidate.expanded(OVERLAP_MARGIN);
    placed.iter().any(|existing| existing.expanded(OVERLAP_MARGIN).intersects(&candidate))
}

/// Grows one floor's rooms outward from an anchored first room.
#[derive(Clone, Debug)]
pub struct RoomPlacer<'a> {
    floor: usize,
    config: &'a HouseConfig,
    rooms: Vec<RoomRect>,
    connections: Vec<Connection>,
}

impl<'a> RoomPlacer<'a> {
    /// Places room 0 at `anchor` with a random size.
    pub fn start(
        floor: usize,
        anchor: GridPos,
        config: &'a HouseConfig,
        rng: &mut impl RandomSource,
    ) -> Self {
        let (width, height) = random_room_size(config, rng);
        let first = RoomRect::new(floor, anchor, width, height);
        Self { floor, config, rooms: vec![first], connections: Vec::new() }
    }

    pub fn rooms(&self) -> &[RoomRect] {
        &self.rooms
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Attempts the next room until it fits or the attempt budget runs out.
    /// Each attempt redraws parent, direction, size, and offset in that order.
    pub fn place_next(&mut self, rng: &mut impl RandomSource) -> PlacementOutcome {
        let budget = self.config.max_placement_attempts;
        for attempt in 1..=budget {
            let parent_index = rng.index(self.rooms.len());
            let parent = self.rooms[parent_index];
            let direction = Direction::from_index(rng.index(Direction::ALL.len()));
            let size = random_room_size(self.config, rng);
            let parent_span = match direction {
                Direction::North | Direction::South => parent.width,
                Direction::East | Direction::West => parent.height,
            };
            let offset = rng.below_clamped(parent_span - PLACEMENT_GAP);
            let candidate = candidate_rect(parent, direction, size, offset);

            if overlaps_any(candidate, &self.rooms) {
                continue;
            }

            let index = self.rooms.len();
            let connection = Connection { room_a: parent_index, room_b: index, direction };
            self.rooms.push(candidate);
            self.connections.push(connection);
            debug!(
                floor = self.floor,
                room = index,
                parent = parent_index,
                ?direction,
                attempt,
                "room placed"
            );
            return PlacementOutcome::Placed(PlacedRoom {
                index,
                rect: candidate,
                connection,
                attempts: attempt,
            });
        }
        PlacementOutcome::Exhausted { attempts: budget }
    }

    pub fn finish(self) -> (Vec<RoomRect>, Vec<Connection>) {
        (self.rooms, self.connections)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::rng::{HouseRng, ScriptedRandom};

    fn place_all(seed: u64, config: &HouseConfig) -> (Vec<RoomRect>, Vec<Connection>) {
        let mut rng = HouseRng::from_seed(seed);
        let mut placer = RoomPlacer::start(0, GridPos::new(0, 0), config, &mut rng);
        for _ in 1..config.rooms_per_floor {
            placer.place_next(&mut rng);
        }
        placer.finish()
    }

    fn is_spanning_tree(room_count: usize, connections: &[Connection]) -> bool {
        if connections.len() + 1 != room_count {
            return false;
        }
        let mut adjacency = vec![Vec::new(); room_count];
        for connection in connections {
            adjacency[connection.room_a].push(connection.room_b);
            adjacency[connection.room_b].push(connection.room_a);
        }
        let mut seen = BTreeSet::from([0_usize]);
        let mut open = VecDeque::from([0_usize]);
        while let Some(room) = open.pop_front() {
            for &next in &adjacency[room] {
                if seen.insert(next) {
                    open.push_back(next);
                }
            }
        }
        seen.len() == room_count
    }

    #[test]
    fn candidate_offsets_follow_direction_and_gap() {
        let parent = RoomRect::new(0, GridPos::new(0, 0), 6, 5);
        assert_eq!(
            candidate_rect(parent, Direction::North, (4, 4), 1),
            RoomRect::new(0, GridPos::new(1, 7), 4, 4)
        );
        assert_eq!(
            candidate_rect(parent, Direction::East, (4, 3), 2),
            RoomRect::new(0, GridPos::new(8, 2), 4, 3)
        );
        assert_eq!(
            candidate_rect(parent, Direction::South, (4, 3), 0),
            RoomRect::new(0, GridPos::new(0, -5), 4, 3)
        );
        assert_eq!(
            candidate_rect(parent, Direction::West, (5, 4), 3),
            RoomRect::new(0, GridPos::new(-7, 3), 5, 4)
        );
    }

    #[test]
    fn first_room_sits_on_the_anchor() {
        let config = HouseConfig::default();
        let mut rng = HouseRng::from_seed(5);
        let placer = RoomPlacer::start(2, GridPos::new(7, -3), &config, &mut rng);
        let first = placer.rooms()[0];
        assert_eq!((first.x, first.y, first.floor), (7, -3, 2));
        assert!((4..=8).contains(&first.width));
        assert!(placer.connections().is_empty());
    }

    #[test]
    fn tiny_rooms_clamp_the_perpendicular_range() {
        let config = HouseConfig {
            room_size_min: (1, 1),
            room_size_max: (2, 2),
            door_width: 0.5,
            ..HouseConfig::default()
        };
        let (rooms, connections) = place_all(77, &HouseConfig { rooms_per_floor: 6, ..config });
        assert_eq!(rooms.len(), 6);
        assert_eq!(connections.len(), 5);
    }

    #[test]
    fn scripted_draws_pick_parent_direction_size_and_offset_in_order() {
        let config = HouseConfig::default();
        // size 4x4 for room 0, then parent 0, East, size 5x6, offset 1.
        let mut rng = ScriptedRandom::new(vec![0, 0, 0, 1, 1, 2, 1]);
        let mut placer = RoomPlacer::start(0, GridPos::new(0, 0), &config, &mut rng);
        let outcome = placer.place_next(&mut rng);

        let PlacementOutcome::Placed(placed) = outcome else {
            panic!("expected a placement, got {outcome:?}");
        };
        assert_eq!(placed.rect, RoomRect::new(0, GridPos::new(6, 1), 5, 6));
        assert_eq!(
            placed.connection,
            Connection { room_a: 0, room_b: 1, direction: Direction::East }
        );
        assert_eq!(placed.attempts, 1);
        assert_eq!(rng.consumed(), 7);
    }

    #[test]
    fn blocked_placement_reports_exhaustion_instead_of_looping() {
        let config = HouseConfig { max_placement_attempts: 8, ..HouseConfig::default() };
        // Always parent 0, always North, always the same size and offset.
        let mut rng = ScriptedRandom::new(vec![0]);
        let mut placer = RoomPlacer::start(0, GridPos::new(0, 0), &config, &mut rng);
        assert!(matches!(placer.place_next(&mut rng), PlacementOutcome::Placed(_)));
        assert_eq!(placer.place_next(&mut rng), PlacementOutcome::Exhausted { attempts: 8 });
        assert_eq!(placer.rooms().len(), 2);
        assert_eq!(placer.connections().len(), 1);
    }

    #[test]
    fn room_layout_places_every_room_without_touching() {
        let config = HouseConfig { rooms_per_floor: 12, ..HouseConfig::default() };
        let (rooms, connections) = place_all(42, &config);
        assert_eq!(rooms.len(), 12);
        assert!(is_spanning_tree(rooms.len(), &connections));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn placed_rooms_never_overlap_and_form_a_tree(
            seed in any::<u64>(),
            rooms_per_floor in 1_usize..16,
        ) {
            let config = HouseConfig { rooms_per_floor, ..HouseConfig::default() };
            let (rooms, connections) = place_all(seed, &config);

            for left in 0..rooms.len() {
                for right in (left + 1)..rooms.len() {
                    prop_assert!(
                        !rooms[left].expanded(1).intersects(&rooms[right].expanded(1)),
                        "rooms {left} and {right} touch: {:?} vs {:?}", rooms[left], rooms[right]
                    );
                }
            }
            prop_assert!(is_spanning_tree(rooms.len(), &connections));
            for connection in &connections {
                prop_assert!(connection.room_a < connection.room_b);
            }
        }
    }
}
