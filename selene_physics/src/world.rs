use crate::body::{Body_Type, Rigid_Body};
use crate::collide::{self, Collide_Settings};
use crate::collider::Collider;
use selene_alloc::gen_alloc::{Gen_Allocator, Gen_Index};
use selene_core::rand::{self, Default_Rng, Default_Rng_Seed};
use selene_math::rect::Rectf;
use selene_math::vector::{sanity_check_v, Vec2f};
use smallvec::SmallVec;

pub type Body_Handle = Gen_Index;

const INITIAL_SIZE: usize = 64;

/// Per-tick data fed by the surrounding frame loop.
#[derive(Copy, Clone, Debug, Default)]
pub struct Update_Context {
    /// Elapsed time since the previous tick, in seconds.
    pub dt: f32,
}

#[derive(Copy, Clone, Debug)]
pub struct World_Config {
    pub gravity: Vec2f,
    /// World extents, origin at (0, 0).
    pub size: Vec2f,
    pub border_collide: bool,
    pub collide: Collide_Settings,
    /// None seeds the corner-resolution rng from OS entropy.
    pub rng_seed: Option<Default_Rng_Seed>,
}

impl Default for World_Config {
    fn default() -> World_Config {
        World_Config {
            gravity: Vec2f::default(),
            size: Vec2f::default(),
            border_collide: true,
            collide: Collide_Settings::default(),
            rng_seed: None,
        }
    }
}

/// Owns the simulated bodies and advances them with a brute-force pairwise
/// broad phase. O(n^2) per tick, fine for small body counts.
///
/// Bodies are addressed by generational handles: disabling one frees its slot
/// without shifting the others, and stale handles are simply rejected.
/// Enabling or disabling bodies while `run` executes is not supported.
pub struct Physics_World {
    pub gravity: Vec2f,
    pub border_collide: bool,
    pub collide_settings: Collide_Settings,

    pub(crate) bounds: Rectf,
    pub(crate) boundary: Rigid_Body,

    pub(crate) body_alloc: Gen_Allocator,
    /// Indexed by a Body_Handle's index. Freed slots hold a default body,
    /// whose body type None keeps it out of the simulation.
    pub(crate) bodies: Vec<Rigid_Body>,

    pub(crate) rng: Default_Rng,
}

impl Physics_World {
    pub fn new(cfg: &World_Config) -> std::io::Result<Physics_World> {
        let seed = match cfg.rng_seed {
            Some(seed) => seed,
            None => rand::new_random_seed()?,
        };

        let mut boundary = Rigid_Body::new(Vec2f::default(), cfg.size);
        boundary.body_type = Body_Type::Static;
        boundary.set_collider(Collider::inner_rectangle(cfg.size));

        Ok(Physics_World {
            gravity: cfg.gravity,
            border_collide: cfg.border_collide,
            collide_settings: cfg.collide,
            bounds: Rectf::from_topleft_size(Vec2f::default(), cfg.size),
            boundary,
            body_alloc: Gen_Allocator::with_capacity(INITIAL_SIZE),
            bodies: vec![],
            rng: rand::new_rng_with_seed(seed),
        })
    }

    pub fn bounds(&self) -> Rectf {
        self.bounds
    }

    pub fn n_bodies(&self) -> usize {
        self.body_alloc.live_count()
    }

    /// Adds `body` to the simulation and returns a handle to it.
    pub fn enable(&mut self, body: Rigid_Body) -> Body_Handle {
        let handle = self.body_alloc.allocate();
        let slot = handle.index as usize;
        if slot >= self.bodies.len() {
            self.bodies.resize_with(slot + 1, Rigid_Body::default);
        }
        self.bodies[slot] = body;
        handle
    }

    /// Removes the body from the simulation. The handle becomes stale.
    pub fn disable(&mut self, handle: Body_Handle) {
        if self.body_alloc.is_valid(handle) {
            self.body_alloc.deallocate(handle);
            self.bodies[handle.index as usize] = Rigid_Body::default();
        } else {
            lwarn!("Tried to disable body with invalid handle {:?}", handle);
        }
    }

    pub fn get_body(&self, handle: Body_Handle) -> Option<&Rigid_Body> {
        if self.body_alloc.is_valid(handle) {
            Some(&self.bodies[handle.index as usize])
        } else {
            None
        }
    }

    pub fn get_body_mut(&mut self, handle: Body_Handle) -> Option<&mut Rigid_Body> {
        if self.body_alloc.is_valid(handle) {
            Some(&mut self.bodies[handle.index as usize])
        } else {
            None
        }
    }

    /// Advances the simulation by one tick: per dynamic body, apply gravity,
    /// integrate, resolve against every other body, then against the border.
    pub fn run(&mut self, ctx: &Update_Context) {
        let live = self.live_slots();
        for &slot in &live {
            if !self.step_body(slot, ctx) {
                continue;
            }
            self.resolve_pairs(slot, &live);
            if self.border_collide {
                self.resolve_border(slot);
            }
        }
    }

    pub(crate) fn live_slots(&self) -> SmallVec<[u32; 32]> {
        (0..self.bodies.len() as u32)
            .filter(|&slot| self.body_alloc.is_slot_live(slot))
            .collect()
    }

    /// Applies gravity and integrates the body's position. Returns false if
    /// the body does not move this tick and should skip collision resolution.
    pub(crate) fn step_body(&mut self, slot: u32, ctx: &Update_Context) -> bool {
        let gravity = self.gravity;
        let body = &mut self.bodies[slot as usize];
        match body.body_type {
            Body_Type::Dynamic => {
                body.velocity += gravity * ctx.dt;
            }
            Body_Type::Static | Body_Type::None => return false,
        }
        sanity_check_v(body.velocity);
        let velocity = body.velocity;
        body.position += velocity;
        true
    }

    /// Resolves `slot` against every other live body. The dynamic participant
    /// always takes the corrected role: when the other body is dynamic too, it
    /// is the one that gets pushed out.
    pub(crate) fn resolve_pairs(&mut self, slot: u32, live: &[u32]) {
        for &other_slot in live {
            if other_slot == slot {
                continue;
            }
            let (cur, other) = pair_mut(&mut self.bodies, slot as usize, other_slot as usize);
            if other.body_type == Body_Type::None {
                continue;
            }

            if other.body_type == Body_Type::Dynamic {
                collide::collide(other, cur, &self.collide_settings, &mut self.rng);
            } else {
                collide::collide(cur, other, &self.collide_settings, &mut self.rng);
            }
        }
    }

    pub(crate) fn resolve_border(&mut self, slot: u32) {
        let body = &mut self.bodies[slot as usize];
        collide::collide(body, &self.boundary, &self.collide_settings, &mut self.rng);
    }
}

fn pair_mut(bodies: &mut [Rigid_Body], a: usize, b: usize) -> (&mut Rigid_Body, &mut Rigid_Body) {
    debug_assert!(a != b);
    if a < b {
        let (first, second) = bodies.split_at_mut(b);
        (&mut first[a], &mut second[0])
    } else {
        let (first, second) = bodies.split_at_mut(a);
        (&mut second[0], &mut first[b])
    }
}
