use std::collections::{BTreeSet, VecDeque};

use housegen::layout::stairs::STEP_COUNT;
use housegen::{
    Diagnostic, Direction, FloorPlan, HouseConfig, HouseModel, HouseRng, WallKind, generate_house,
};
use proptest::prelude::*;

fn generate(config: &HouseConfig, seed: u64) -> HouseModel {
    generate_house(config, &mut HouseRng::from_seed(seed)).expect("valid config")
}

fn connections_form_tree(floor: &FloorPlan) -> bool {
    let room_count = floor.rooms.len();
    if floor.connections.len() + 1 != room_count {
        return false;
    }
    let mut adjacency = vec![Vec::new(); room_count];
    for connection in &floor.connections {
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

fn assert_floor_invariants(floor: &FloorPlan) {
    for (left_index, left) in floor.rooms.iter().enumerate() {
        for right in &floor.rooms[left_index + 1..] {
            assert!(
                !left.rect.expanded(1).intersects(&right.rect.expanded(1)),
                "floor {} rooms {} and {} touch",
                floor.index,
                left.index,
                right.index
            );
        }
    }
    assert!(connections_form_tree(floor), "floor {} connections are not a tree", floor.index);
    assert_eq!(floor.doors.len(), floor.connections.len());
    assert_eq!(floor.corridors.len(), floor.connections.len());

    for door in &floor.doors {
        for id in &door.cut_walls {
            let wall = floor.walls.get(*id).expect("cut wall stays in the store");
            assert!(wall.removed, "cut wall must be flagged removed");
            for (_, segment) in floor.walls.segments_of(*id) {
                if segment.is_active() {
                    assert!(
                        !segment.slab.overlaps(&door.opening, 1e-3) || segment.line != wall.line,
                        "segment overlaps its own doorway"
                    );
                }
            }
        }
    }

    for corridor in &floor.corridors {
        assert_eq!(corridor.tiles.len(), corridor.from.manhattan(corridor.to) as usize + 1);
        assert_eq!(corridor.tiles.last().map(|tile| tile.cell), Some(corridor.to));
    }
}

#[test]
fn single_room_single_floor_has_no_connections_doors_or_stairs() {
    let config = HouseConfig { rooms_per_floor: 1, floors: 1, ..HouseConfig::default() };
    let model = generate(&config, 99);

    assert_eq!(model.room_count(), 1);
    assert_eq!(model.connection_count(), 0);
    assert_eq!(model.door_count(), 0);
    assert!(model.stairs.is_empty());
    let room = &model.floors[0].rooms[0];
    assert_eq!((room.rect.x, room.rect.y), (0, 0));
}

#[test]
fn default_house_satisfies_floor_invariants() {
    let model = generate(&HouseConfig::default(), 2026);
    assert!(model.is_complete(), "{:?}", model.diagnostics);
    for floor in &model.floors {
        assert_floor_invariants(floor);
    }
}

#[test]
fn stairs_carry_fixed_step_post_and_rail_counts() {
    let config = HouseConfig { floors: 4, ..HouseConfig::default() };
    let model = generate(&config, 17);

    assert_eq!(model.stairs.len(), 3);
    for (index, stair) in model.stairs.iter().enumerate() {
        assert_eq!(stair.from_floor, index);
        assert_eq!(stair.step_count(), STEP_COUNT);
        assert_eq!(stair.left_posts.len(), 11);
        assert_eq!(stair.right_posts.len(), 11);
        assert_eq!(stair.left_rails.len(), 10);
        assert_eq!(stair.right_rails.len(), 10);
        let top = stair.steps.last().map(|step| step.max().y).unwrap_or_default();
        assert!((top - config.elevation(index + 1)).abs() < 1e-3);
    }
}

#[test]
fn door_sits_on_child_wall_facing_parent() {
    let config = HouseConfig { floors: 1, rooms_per_floor: 10, ..HouseConfig::default() };
    let model = generate(&config, 8080);
    let floor = &model.floors[0];

    for door in &floor.doors {
        let child = floor.rooms[door.connection.room_b].rect;
        let side = door.connection.direction.opposite();
        let line = child.wall_line(side) as f32;
        match side {
            Direction::North | Direction::South => assert_eq!(door.opening.center.z, line),
            Direction::East | Direction::West => assert_eq!(door.opening.center.x, line),
        }
        assert!((door.opening.min().y - floor.elevation).abs() < 1e-5);
    }
}

#[test]
fn crowded_floors_report_incomplete_layouts_instead_of_hanging() {
    let config = HouseConfig {
        floors: 1,
        rooms_per_floor: 40,
        max_placement_attempts: 1,
        ..HouseConfig::default()
    };
    let model = generate(&config, 3);
    let floor = &model.floors[0];

    assert!(floor.rooms.len() <= 40);
    assert_floor_invariants(floor);
    if floor.rooms.len() < 40 {
        assert!(model.diagnostics.iter().any(|diagnostic| matches!(
            diagnostic,
            Diagnostic::LayoutIncomplete { floor: 0, requested: 40, .. }
        )));
        assert!(!model.is_complete());
    }
}

#[test]
fn every_active_wall_is_a_known_kind_with_positive_extent() {
    let model = generate(&HouseConfig::default(), 555);
    for floor in &model.floors {
        for wall in floor.walls.active() {
            assert!(wall.slab.volume() > 0.0);
            if wall.kind == WallKind::Full {
                assert!(wall.cut_from.is_none());
            } else {
                assert!(wall.cut_from.is_some());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn generated_houses_keep_floor_invariants(
        seed in any::<u64>(),
        floors in 1_usize..4,
        rooms_per_floor in 1_usize..10,
    ) {
        let config = HouseConfig { floors, rooms_per_floor, ..HouseConfig::default() };
        let model = generate(&config, seed);
        prop_assert_eq!(model.floors.len(), floors);
        prop_assert_eq!(model.stairs.len(), floors - 1);
        for floor in &model.floors {
            assert_floor_invariants(floor);
        }
    }
}
