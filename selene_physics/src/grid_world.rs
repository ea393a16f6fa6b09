use crate::body::{Body_Type, Rigid_Body};
use crate::collide;
use crate::world::{Physics_World, Update_Context, World_Config};
use selene_math::math::clamp;
use selene_math::vector::{Vec2f, Vec2i, Vec2u};
use std::error::Error;
use std::fmt;

/// Terrain shape of one obstruction cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grid_Block_Type {
    None,
    Rectangle,
    Circle,
    Triangle,
}

impl Default for Grid_Block_Type {
    fn default() -> Grid_Block_Type {
        Grid_Block_Type::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid_Out_Of_Range {
    pub cell: Vec2i,
    pub count: Vec2u,
}

impl fmt::Display for Grid_Out_Of_Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "grid cell {:?} is outside the grid (counts {:?})",
            self.cell, self.count
        )
    }
}

impl Error for Grid_Out_Of_Range {}

#[derive(Copy, Clone, Debug)]
pub struct Grid_World_Config {
    pub world: World_Config,
    pub grid_size: Vec2f,
    /// Cells per axis. None derives it from the world size and grid_size.
    pub count: Option<Vec2u>,
    /// Shift applied when mapping world coordinates to cell indices, for
    /// levels whose grid does not start at the world origin.
    pub count_offset: Vec2i,
}

impl Default for Grid_World_Config {
    fn default() -> Grid_World_Config {
        Grid_World_Config {
            world: World_Config::default(),
            grid_size: v2!(32., 32.),
            count: None,
            count_offset: Vec2i::new(0, 0),
        }
    }
}

/// A Physics_World plus a tile-indexed obstruction grid: each tick runs the
/// ordinary pairwise pass, then resolves every dynamic body against the
/// obstruction cells its bounding box covers.
///
/// The grid is expected to be populated at level load and left alone while
/// `run` executes.
pub struct Grid_World {
    pub world: Physics_World,

    grid_size: Vec2f,
    count: Vec2u,
    count_offset: Vec2i,
    /// Row-major, `count.x * count.y` entries.
    blocks: Vec<Grid_Block_Type>,

    /// Transient static body repositioned onto each obstructing cell.
    cell_template: Rigid_Body,
}

impl Grid_World {
    pub fn new(cfg: &Grid_World_Config) -> std::io::Result<Grid_World> {
        let world = Physics_World::new(&cfg.world)?;
        let count = cfg.count.unwrap_or_else(|| {
            Vec2u::new(
                (cfg.world.size.x / cfg.grid_size.x) as u32,
                (cfg.world.size.y / cfg.grid_size.y) as u32,
            )
        });

        let mut cell_template = Rigid_Body::new(Vec2f::default(), cfg.grid_size);
        cell_template.body_type = Body_Type::Static;

        Ok(Grid_World {
            world,
            grid_size: cfg.grid_size,
            count,
            count_offset: cfg.count_offset,
            blocks: vec![Grid_Block_Type::None; (count.x * count.y) as usize],
            cell_template,
        })
    }

    pub fn count(&self) -> Vec2u {
        self.count
    }

    pub fn set_block(
        &mut self,
        cell: Vec2i,
        block: Grid_Block_Type,
    ) -> Result<(), Grid_Out_Of_Range> {
        let idx = self.block_index(cell)?;
        self.blocks[idx] = block;
        Ok(())
    }

    pub fn block_at(&self, cell: Vec2i) -> Result<Grid_Block_Type, Grid_Out_Of_Range> {
        let idx = self.block_index(cell)?;
        Ok(self.blocks[idx])
    }

    fn block_index(&self, cell: Vec2i) -> Result<usize, Grid_Out_Of_Range> {
        if cell.x < 0
            || cell.y < 0
            || cell.x >= self.count.x as i32
            || cell.y >= self.count.y as i32
        {
            return Err(Grid_Out_Of_Range {
                cell,
                count: self.count,
            });
        }
        Ok((cell.y as u32 * self.count.x + cell.x as u32) as usize)
    }

    /// Same per-body tick as Physics_World::run, with the terrain pass
    /// inserted between the pairwise pass and the border pass.
    pub fn run(&mut self, ctx: &Update_Context) {
        let live = self.world.live_slots();
        for &slot in &live {
            if !self.world.step_body(slot, ctx) {
                continue;
            }
            self.world.resolve_pairs(slot, &live);
            self.resolve_terrain(slot);
            if self.world.border_collide {
                self.world.resolve_border(slot);
            }
        }
    }

    fn resolve_terrain(&mut self, slot: u32) {
        if self.blocks.is_empty() {
            return;
        }

        let body = self.world.bodies[slot as usize];
        let origin = self.world.bounds.pos();
        let topleft = origin + body.position + body.collider.offset;

        // Inclusive cell range covered by the body's AABB. Both ends are
        // clamped into the grid: a stray cell that the body does not actually
        // cover fails the intersection test and resolves as a no-op.
        let start_x = (topleft.x / self.grid_size.x).floor() as i32 - self.count_offset.x;
        let start_y = (topleft.y / self.grid_size.y).floor() as i32 - self.count_offset.y;
        let end_x =
            ((topleft.x + body.collider.size.x) / self.grid_size.x).floor() as i32
                - self.count_offset.x;
        let end_y =
            ((topleft.y + body.collider.size.y) / self.grid_size.y).floor() as i32
                - self.count_offset.y;

        let start_x = clamp(start_x, 0, self.count.x as i32 - 1);
        let start_y = clamp(start_y, 0, self.count.y as i32 - 1);
        let end_x = clamp(end_x, 0, self.count.x as i32 - 1);
        let end_y = clamp(end_y, 0, self.count.y as i32 - 1);

        for px in start_x..=end_x {
            for py in start_y..=end_y {
                let block = self.blocks[(py as u32 * self.count.x + px as u32) as usize];
                match block {
                    Grid_Block_Type::None => {}
                    Grid_Block_Type::Rectangle => {
                        self.cell_template.position = v2!(
                            origin.x + (self.count_offset.x + px) as f32 * self.grid_size.x,
                            origin.y + (self.count_offset.y + py) as f32 * self.grid_size.y,
                        );
                        let cell = self.cell_template;
                        let body = &mut self.world.bodies[slot as usize];
                        collide::collide(
                            body,
                            &cell,
                            &self.world.collide_settings,
                            &mut self.world.rng,
                        );
                    }
                    Grid_Block_Type::Circle => {
                        lwarn_once!(
                            "grid_block_circle",
                            "Circle obstruction cells have no resolver yet, skipping"
                        );
                    }
                    Grid_Block_Type::Triangle => {
                        lwarn_once!(
                            "grid_block_triangle",
                            "Triangle obstruction cells have no resolver yet, skipping"
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selene_core::rand::Default_Rng_Seed;

    fn test_config() -> Grid_World_Config {
        Grid_World_Config {
            world: World_Config {
                size: v2!(320., 320.),
                rng_seed: Some(Default_Rng_Seed([42; 32])),
                ..World_Config::default()
            },
            ..Grid_World_Config::default()
        }
    }

    #[test]
    fn cell_count_is_derived_from_world_size() {
        let grid = Grid_World::new(&test_config()).unwrap();
        assert_eq!(grid.count(), Vec2u::new(10, 10));
        assert_eq!(grid.block_at(Vec2i::new(9, 9)), Ok(Grid_Block_Type::None));
    }

    #[test]
    fn explicit_cell_count_wins() {
        let mut cfg = test_config();
        cfg.count = Some(Vec2u::new(4, 2));
        let grid = Grid_World::new(&cfg).unwrap();
        assert_eq!(grid.count(), Vec2u::new(4, 2));
        assert!(grid.block_at(Vec2i::new(4, 0)).is_err());
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut grid = Grid_World::new(&test_config()).unwrap();

        for &cell in &[
            Vec2i::new(-1, 0),
            Vec2i::new(0, -1),
            Vec2i::new(10, 0),
            Vec2i::new(0, 10),
        ] {
            let err = grid.set_block(cell, Grid_Block_Type::Rectangle).unwrap_err();
            assert_eq!(err.cell, cell);
            assert_eq!(err.count, Vec2u::new(10, 10));
        }
    }

    #[test]
    fn set_block_roundtrip() {
        let mut grid = Grid_World::new(&test_config()).unwrap();
        grid.set_block(Vec2i::new(3, 7), Grid_Block_Type::Rectangle)
            .unwrap();
        assert_eq!(
            grid.block_at(Vec2i::new(3, 7)),
            Ok(Grid_Block_Type::Rectangle)
        );
        assert_eq!(grid.block_at(Vec2i::new(7, 3)), Ok(Grid_Block_Type::None));
    }

    #[test]
    fn empty_terrain_does_not_affect_bodies() {
        let mut grid = Grid_World::new(&test_config()).unwrap();
        let mut mover = Rigid_Body::new(v2!(50., 50.), v2!(10., 10.));
        mover.velocity = v2!(3., 0.);
        let handle = grid.world.enable(mover);

        grid.run(&Update_Context { dt: 1. / 60. });

        let body = grid.world.get_body(handle).unwrap();
        assert_eq!(body.position, v2!(53., 50.));
        assert_eq!(body.velocity, v2!(3., 0.));
    }

    #[test]
    fn rectangle_cell_stops_a_moving_body() {
        let mut grid = Grid_World::new(&test_config()).unwrap();
        // Cell (3, 1) spans x in [96, 128), y in [32, 64).
        grid.set_block(Vec2i::new(3, 1), Grid_Block_Type::Rectangle)
            .unwrap();

        let mut mover = Rigid_Body::new(v2!(60., 33.), v2!(10., 10.));
        mover.velocity = v2!(30., 0.);
        let handle = grid.world.enable(mover);

        grid.run(&Update_Context { dt: 1. / 60. });

        // Integrated to x = 90, overlapping the cell; pushed back flush
        // against its left edge, velocity killed by the zero-bounce terrain.
        let body = grid.world.get_body(handle).unwrap();
        assert_eq!(body.position, v2!(86., 33.));
        assert_eq!(body.velocity, v2!(0., 0.));
    }

    #[test]
    fn unimplemented_cell_shapes_resolve_as_noops() {
        let mut grid = Grid_World::new(&test_config()).unwrap();
        grid.set_block(Vec2i::new(3, 1), Grid_Block_Type::Circle)
            .unwrap();
        grid.set_block(Vec2i::new(4, 1), Grid_Block_Type::Triangle)
            .unwrap();

        let mut mover = Rigid_Body::new(v2!(60., 33.), v2!(10., 10.));
        mover.velocity = v2!(30., 0.);
        let handle = grid.world.enable(mover);

        grid.run(&Update_Context { dt: 1. / 60. });

        assert_eq!(grid.world.get_body(handle).unwrap().position, v2!(90., 33.));
    }

    #[test]
    fn body_past_the_negative_grid_edge_does_not_panic() {
        let mut cfg = test_config();
        cfg.world.border_collide = false;
        let mut grid = Grid_World::new(&cfg).unwrap();
        grid.set_block(Vec2i::new(0, 0), Grid_Block_Type::Rectangle)
            .unwrap();

        let mut mover = Rigid_Body::new(v2!(-100., -100.), v2!(10., 10.));
        mover.velocity = v2!(1., 1.);
        let handle = grid.world.enable(mover);

        grid.run(&Update_Context { dt: 1. / 60. });

        // The covered cell range clamps to the grid; cell (0, 0) does not
        // overlap the body, so the body just integrates.
        let body = grid.world.get_body(handle).unwrap();
        assert_eq!(body.position, v2!(-99., -99.));
    }

    #[test]
    fn count_offset_shifts_cell_lookup() {
        let mut cfg = test_config();
        cfg.count_offset = Vec2i::new(2, 0);
        let mut grid = Grid_World::new(&cfg).unwrap();
        // With the offset, cell (1, 1) sits at world x in [96, 128).
        grid.set_block(Vec2i::new(1, 1), Grid_Block_Type::Rectangle)
            .unwrap();

        let mut mover = Rigid_Body::new(v2!(60., 33.), v2!(10., 10.));
        mover.velocity = v2!(30., 0.);
        let handle = grid.world.enable(mover);

        grid.run(&Update_Context { dt: 1. / 60. });

        assert_eq!(grid.world.get_body(handle).unwrap().position, v2!(86., 33.));
    }

    #[test]
    fn dynamic_pairs_still_resolve_in_a_grid_world() {
        let mut cfg = test_config();
        cfg.world.gravity = v2!(0., 10.);
        let mut grid = Grid_World::new(&cfg).unwrap();

        let mut faller = Rigid_Body::new(v2!(20., 94.), v2!(10., 10.));
        faller.velocity = v2!(0., 3.);
        let faller_handle = grid.world.enable(faller);

        let mut block = Rigid_Body::new(v2!(20., 100.), v2!(10., 10.));
        block.body_type = Body_Type::Static;
        grid.world.enable(block);

        grid.run(&Update_Context { dt: 1. / 60. });

        let body = grid.world.get_body(faller_handle).unwrap();
        assert_eq!(body.position, v2!(20., 90.));
        assert_eq!(body.velocity, v2!(0., 0.));
    }
}
