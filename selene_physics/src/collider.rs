use selene_math::vector::Vec2f;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Collision_Shape {
    Rectangle,
    Circle,
    Triangle,
    /// Keeps a body contained inside this rectangle rather than outside it.
    /// Used for world boundaries.
    Inner_Rectangle,
}

impl Default for Collision_Shape {
    fn default() -> Collision_Shape {
        Collision_Shape::Rectangle
    }
}

/// A Collider is plain data: the shape tag selects the resolver, everything
/// else parametrizes it. It is owned by exactly one Rigid_Body.
#[derive(Copy, Clone, Debug, Default)]
pub struct Collider {
    pub shape: Collision_Shape,

    /// Relative to the owning body's position.
    pub offset: Vec2f,
    pub size: Vec2f,

    /// Per-axis velocity retention on bounce, in [0, 1].
    pub bounce: Vec2f,

    // Reserved: populated but not read by any resolver yet.
    pub friction: Vec2f,
}

impl Collider {
    pub fn rectangle(size: Vec2f) -> Collider {
        Collider {
            shape: Collision_Shape::Rectangle,
            size,
            ..Collider::default()
        }
    }

    pub fn inner_rectangle(size: Vec2f) -> Collider {
        Collider {
            shape: Collision_Shape::Inner_Rectangle,
            size,
            ..Collider::default()
        }
    }

    pub fn with_offset(self, offset: Vec2f) -> Collider {
        Collider { offset, ..self }
    }

    pub fn with_bounce(self, bounce: Vec2f) -> Collider {
        Collider { bounce, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_constructors() {
        let rect = Collider::rectangle(v2!(10., 20.));
        assert_eq!(rect.shape, Collision_Shape::Rectangle);
        assert_eq!(rect.size, v2!(10., 20.));
        assert!(rect.bounce.is_zero());
        assert!(rect.offset.is_zero());

        let inner = Collider::inner_rectangle(v2!(100., 50.));
        assert_eq!(inner.shape, Collision_Shape::Inner_Rectangle);
        assert_eq!(inner.size, v2!(100., 50.));
    }

    #[test]
    fn collider_builders() {
        let cld = Collider::rectangle(v2!(4., 4.))
            .with_offset(v2!(1., 2.))
            .with_bounce(v2!(0.5, 0.25));
        assert_eq!(cld.offset, v2!(1., 2.));
        assert_eq!(cld.bounce, v2!(0.5, 0.25));
        assert_eq!(cld.size, v2!(4., 4.));
    }
}
