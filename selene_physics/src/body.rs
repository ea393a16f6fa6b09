use crate::collider::Collider;
use selene_math::vector::Vec2f;

/// How a body participates in the simulation:
/// none    is skipped entirely,
/// static  never moves but other bodies collide against it,
/// dynamic is integrated and collided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Body_Type {
    None,
    Static,
    Dynamic,
}

impl Default for Body_Type {
    // None doubles as the "empty slot" value inside the world's body arena.
    fn default() -> Body_Type {
        Body_Type::None
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Rigid_Body {
    pub position: Vec2f,
    pub size: Vec2f,
    pub velocity: Vec2f,
    pub body_type: Body_Type,
    pub collider: Collider,
}

impl Rigid_Body {
    /// A dynamic body with a rectangle collider matching its size.
    pub fn new(position: Vec2f, size: Vec2f) -> Rigid_Body {
        Rigid_Body {
            position,
            size,
            velocity: Vec2f::default(),
            body_type: Body_Type::Dynamic,
            collider: Collider::rectangle(size),
        }
    }

    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = collider;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collision_Shape;

    #[test]
    fn new_body_defaults() {
        let body = Rigid_Body::new(v2!(3., 4.), v2!(10., 20.));
        assert_eq!(body.body_type, Body_Type::Dynamic);
        assert!(body.velocity.is_zero());
        assert_eq!(body.collider.shape, Collision_Shape::Rectangle);
        assert_eq!(body.collider.size, v2!(10., 20.));
    }

    #[test]
    fn default_body_is_inert() {
        let body = Rigid_Body::default();
        assert_eq!(body.body_type, Body_Type::None);
    }
}
