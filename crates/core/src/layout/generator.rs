//! Per-floor and cross-floor orchestration that composes placement, doors, walls, and stairs.

use tracing::{debug, info, warn};

use crate::config::{ConfigError, HouseConfig};
use crate::geometry::{Box3, GridPos, Point3, RoomRect};
use crate::model::{Diagnostic, FloorPlan, HouseModel, Room, SpawnPoint, Stair};
use crate::rng::RandomSource;

use super::corridor::{SLAB_THICKNESS, lay_corridor};
use super::doors::build_door;
use super::placement::{PlacementOutcome, RoomPlacer};
use super::stairs::{build_stair, next_floor_anchor, pick_stair_anchor};
use super::walls::WallSet;

/// Height above the floor added to the spawn point so the avatar starts clear of the slab.
pub const SPAWN_LIFT: f32 = 0.1;

pub struct HouseGenerator<'a> {
    config: &'a HouseConfig,
}

impl<'a> HouseGenerator<'a> {
    pub fn new(config: &'a HouseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// For configs that already passed `HouseConfig::validate`.
    pub(crate) fn from_validated(config: &'a HouseConfig) -> Self {
        Self { config }
    }

    /// Runs one full generation pass, consuming draws from `rng` in a fixed order.
    pub fn generate(&self, rng: &mut impl RandomSource) -> HouseModel {
        let mut model = HouseModel::default();
        let mut stair_anchors: Vec<Option<Point3>> = Vec::with_capacity(self.config.floors);
        let mut anchor = GridPos::new(0, 0);

        for floor in 0..self.config.floors {
            let plan = self.generate_floor(floor, anchor, rng, &mut model.diagnostics);

            let stair_anchor = if self.config.is_top_floor(floor) {
                None
            } else {
                let rects: Vec<RoomRect> = plan.room_rects().collect();
                pick_stair_anchor(&rects, floor, self.config, rng)
            };
            if let Some(stair_anchor) = stair_anchor {
                anchor = next_floor_anchor(stair_anchor);
            }
            stair_anchors.push(stair_anchor);
            model.floors.push(plan);
        }

        model.stairs = self.connect_floors(&model.floors, &stair_anchors, &mut model.diagnostics);
        model.spawn = self.spawn_point(&model.floors);

        info!(
            floors = model.floors.len(),
            rooms = model.room_count(),
            doors = model.door_count(),
            stairs = model.stairs.len(),
            diagnostics = model.diagnostics.len(),
            "house generated"
        );
        model
    }

    fn generate_floor(
        &self,
        floor: usize,
        anchor: GridPos,
        rng: &mut impl RandomSource,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FloorPlan {
        let config = self.config;
        let elevation = config.elevation(floor);
        let mut plan = FloorPlan::empty(floor, elevation);

        let mut placer = RoomPlacer::start(floor, anchor, config, rng);
        for room_index in 1..config.rooms_per_floor {
            match placer.place_next(rng) {
                PlacementOutcome::Placed(placed) => {
                    let parent = placer.rooms()[placed.connection.room_a];
                    plan.corridors.push(lay_corridor(
                        floor,
                        placed.connection,
                        parent.center_cell(),
                        placed.rect.center_cell(),
                        config,
                    ));
                }
                PlacementOutcome::Exhausted { attempts } => {
                    debug!(floor, room = room_index, attempts, "room abandoned");
                }
            }
        }
        let (rects, connections) = placer.finish();

        if rects.len() < config.rooms_per_floor {
            warn!(
                floor,
                placed = rects.len(),
                requested = config.rooms_per_floor,
                "floor layout incomplete"
            );
            diagnostics.push(Diagnostic::LayoutIncomplete {
                floor,
                placed: rects.len(),
                requested: config.rooms_per_floor,
            });
        }

        let mut walls = WallSet::default();
        plan.rooms = rects
            .iter()
            .enumerate()
            .map(|(index, &rect)| build_room(index, rect, elevation, config, &mut walls))
            .collect();

        plan.doors = connections
            .iter()
            .map(|&connection| {
                build_door(floor, elevation, connection, &rects, &mut walls, config, diagnostics)
            })
            .collect();
        plan.connections = connections;
        plan.walls = walls;

        info!(
            floor,
            rooms = plan.rooms.len(),
            doors = plan.doors.len(),
            corridors = plan.corridors.len(),
            walls = plan.walls.active().count(),
            "floor generated"
        );
        plan
    }

    fn connect_floors(
        &self,
        floors: &[FloorPlan],
        stair_anchors: &[Option<Point3>],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Stair> {
        let mut stairs = Vec::new();
        for (from_floor, pair) in floors.windows(2).enumerate() {
            let anchor = stair_anchors.get(from_floor).copied().flatten();
            match anchor {
                Some(anchor) if !pair[1].rooms.is_empty() => {
                    debug!(from_floor, x = anchor.x, z = anchor.z, "stair placed");
                    stairs.push(build_stair(from_floor, anchor, self.config));
                }
                _ => {
                    warn!(from_floor, "stair skipped: a floor has no rooms");
                    diagnostics.push(Diagnostic::StairSkipped { from_floor });
                }
            }
        }
        stairs
    }

    fn spawn_point(&self, floors: &[FloorPlan]) -> Option<SpawnPoint> {
        let first = floors.first()?.rooms.first()?;
        let (x, z) = first.rect.center();
        let height = self.config.player_height;
        Some(SpawnPoint {
            position: Point3::new(x, first.elevation + height / 2.0 + SPAWN_LIFT, z),
            height,
        })
    }
}

fn build_room(
    index: usize,
    rect: RoomRect,
    elevation: f32,
    config: &HouseConfig,
    walls: &mut WallSet,
) -> Room {
    let (center_x, center_z) = rect.center();
    let footprint = Point3::new(rect.width as f32, SLAB_THICKNESS, rect.height as f32);
    let floor_slab = Box3::new(Point3::new(center_x, elevation, center_z), footprint);
    let ceiling = (!config.is_top_floor(rect.floor)).then(|| {
        Box3::new(Point3::new(center_x, elevation + config.wall_height, center_z), footprint)
    });
    Room {
        index,
        rect,
        elevation,
        floor_slab,
        ceiling,
        walls: walls.build_room_walls(index, rect, elevation, config),
    }
}
