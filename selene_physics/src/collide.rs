use crate::body::Rigid_Body;
use crate::collider::Collision_Shape;
use selene_core::rand::{self, Default_Rng};
use selene_math::rect::{rects_intersect, Rectf};

#[derive(Copy, Clone, Debug)]
pub struct Collide_Thresholds {
    /// Below this difference between the axis penetration ratios the hit
    /// counts as a corner collision.
    pub corner: f32,
    /// Resolved velocity components smaller than this are zeroed to stop
    /// bodies from jittering in place.
    pub min_velocity: f32,
}

impl Default for Collide_Thresholds {
    fn default() -> Collide_Thresholds {
        Collide_Thresholds {
            corner: 0.1,
            min_velocity: 0.004,
        }
    }
}

/// Which velocity axis gets the bounce when a collision lands on a corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Corner_Resolve {
    X_Axis,
    Y_Axis,
    Random,
}

impl Default for Corner_Resolve {
    fn default() -> Corner_Resolve {
        Corner_Resolve::Random
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Collide_Settings {
    pub thresholds: Collide_Thresholds,
    pub corner_resolve: Corner_Resolve,
}

/// A resolver corrects `a`'s position/velocity against `b` and reports whether
/// it considered the pair colliding. `a` is always the moving participant.
pub type Collide_Cb =
    fn(&mut Rigid_Body, &Rigid_Body, &Collide_Settings, &mut Default_Rng) -> bool;

fn collision_shape_type_index(shape: Collision_Shape) -> usize {
    match shape {
        Collision_Shape::Rectangle => 0,
        Collision_Shape::Circle => 1,
        Collision_Shape::Triangle => 2,
        Collision_Shape::Inner_Rectangle => 3,
    }
}

const N_COLLIDER_SHAPES: usize = 4;

// Indexed by [a shape][b shape]. A missing entry means the pair has no
// resolver defined yet and collides as a no-op.
const COLLIDE_CB_TABLE: [[Option<Collide_Cb>; N_COLLIDER_SHAPES]; N_COLLIDER_SHAPES] = [
    [Some(rect_with_rect), None, None, Some(rect_in_rect)],
    [None, None, None, None],
    [None, None, None, None],
    [None, None, None, None],
];

pub fn collide(
    a: &mut Rigid_Body,
    b: &Rigid_Body,
    settings: &Collide_Settings,
    rng: &mut Default_Rng,
) -> bool {
    let cb = COLLIDE_CB_TABLE[collision_shape_type_index(a.collider.shape)]
        [collision_shape_type_index(b.collider.shape)];
    match cb {
        Some(cb) => cb(a, b, settings, rng),
        None => false,
    }
}

fn world_rect(body: &Rigid_Body) -> Rectf {
    Rectf::from_topleft_size(body.position + body.collider.offset, body.collider.size)
}

/// Pushes `a` out of `b` along the axis of least relative penetration and
/// bounces the velocity on that axis. Penetration is measured as the distance
/// between the two centers divided by `b`'s half extents: when the two ratios
/// are nearly equal the hit landed on a corner, `a` is pushed out on both axes
/// and the corner policy picks which axis bounces.
fn rect_with_rect(
    a: &mut Rigid_Body,
    b: &Rigid_Body,
    settings: &Collide_Settings,
    rng: &mut Default_Rng,
) -> bool {
    let a_rect = world_rect(a);
    let b_rect = world_rect(b);

    if !rects_intersect(&a_rect, &b_rect) {
        return false;
    }

    let a_mid = a_rect.pos_center();
    let b_mid = b_rect.pos_center();

    let dx = (a_mid.x - b_mid.x) / (b_rect.width * 0.5);
    let dy = (a_mid.y - b_mid.y) / (b_rect.height * 0.5);

    if (dx.abs() - dy.abs()).abs() < settings.thresholds.corner {
        a.position.x = if dx < 0. {
            b_rect.x - a_rect.width
        } else {
            b_rect.x + b_rect.width
        } - a.collider.offset.x;
        a.position.y = if dy < 0. {
            b_rect.y - a_rect.height
        } else {
            b_rect.y + b_rect.height
        } - a.collider.offset.y;

        let bounce_on_x = match settings.corner_resolve {
            Corner_Resolve::X_Axis => true,
            Corner_Resolve::Y_Axis => false,
            Corner_Resolve::Random => rand::rand_01(rng) < 0.5,
        };
        if bounce_on_x {
            a.velocity.x = -a.velocity.x * b.collider.bounce.x;
        } else {
            a.velocity.y = -a.velocity.y * b.collider.bounce.y;
        }
    } else if dx.abs() > dy.abs() {
        a.position.x = if dx < 0. {
            b_rect.x - a_rect.width
        } else {
            b_rect.x + b_rect.width
        } - a.collider.offset.x;

        a.velocity.x = -a.velocity.x * b.collider.bounce.x;
    } else {
        a.position.y = if dy < 0. {
            b_rect.y - a_rect.height
        } else {
            b_rect.y + b_rect.height
        } - a.collider.offset.y;

        a.velocity.y = -a.velocity.y * b.collider.bounce.y;
    }

    if a.velocity.x.abs() < settings.thresholds.min_velocity {
        a.velocity.x = 0.;
    }
    if a.velocity.y.abs() < settings.thresholds.min_velocity {
        a.velocity.y = 0.;
    }

    true
}

/// Keeps `a` inside the extents of `b`'s rectangle, clamping per axis and
/// bouncing the velocity of any axis that hit. Unlike rect_with_rect this is
/// an unconditional clamp: it never reports "no collision" and applies no
/// corner tie-break.
fn rect_in_rect(
    a: &mut Rigid_Body,
    b: &Rigid_Body,
    _settings: &Collide_Settings,
    _rng: &mut Default_Rng,
) -> bool {
    let a_rect = world_rect(a);
    let b_rect = world_rect(b);

    if a_rect.x + a_rect.width > b_rect.width {
        a.position.x = b_rect.width - a_rect.width - a.collider.offset.x;
        a.velocity.x = -a.velocity.x * b.collider.bounce.x;
    } else if a_rect.x < b_rect.x {
        a.position.x = b_rect.x - a.collider.offset.x;
        a.velocity.x = -a.velocity.x * b.collider.bounce.x;
    }

    if a_rect.y + a_rect.height > b_rect.height {
        a.position.y = b_rect.height - a_rect.height - a.collider.offset.y;
        a.velocity.y = -a.velocity.y * b.collider.bounce.y;
    } else if a_rect.y < b_rect.y {
        a.position.y = b_rect.y - a.collider.offset.y;
        a.velocity.y = -a.velocity.y * b.collider.bounce.y;
    }

    true
}
