use crate::vector::Vector2;
use std::fmt::Debug;
use std::ops::Add;

#[repr(C)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

pub type Rectf = Rect<f32>;
pub type Recti = Rect<i32>;

impl<T: Copy> Copy for Rect<T> {}

impl<T: Clone> Clone for Rect<T> {
    fn clone(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}

impl<T: Debug> Debug for Rect<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Rect {{ x: {:?}, y: {:?}, width: {:?}, height: {:?} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

impl<T: PartialEq> PartialEq for Rect<T> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            x: T::default(),
            y: T::default(),
            width: T::default(),
            height: T::default(),
        }
    }
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Rect<T> {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy> Rect<T> {
    pub fn from_topleft_size(topleft: Vector2<T>, size: Vector2<T>) -> Rect<T> {
        Rect {
            x: topleft.x,
            y: topleft.y,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vector2<T> {
        Vector2::new(self.width, self.height)
    }
}

impl<T> Rect<T>
where
    T: Add<Output = T> + Copy,
{
    /// Inclusive on all four edges.
    pub fn contains<V>(&self, pos: V) -> bool
    where
        T: PartialOrd,
        V: Into<Vector2<T>>,
    {
        let pos: Vector2<T> = pos.into();
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }
}

impl Rect<f32> {
    #[inline]
    pub fn pos_center(&self) -> Vector2<f32> {
        v2!(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// True iff the extents overlap on both axes. Touching edges do not count:
/// two rects sharing a border do not intersect.
pub fn rects_intersect<T>(a: &Rect<T>, b: &Rect<T>) -> bool
where
    T: PartialOrd + Add<Output = T> + Copy,
{
    if !(a.x + a.width > b.x) || !(b.x + b.width > a.x) {
        return false;
    }
    a.y + a.height > b.y && b.y + b.height > a.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let rect = Rect::new(0., 0., 10., 10.);
        assert!(rect.contains(v2!(5., 5.)));
        assert!(rect.contains(v2!(0., 0.)));
        assert!(rect.contains(v2!(10., 10.)));
        assert!(rect.contains(v2!(10., 0.)));
        assert!(!rect.contains(v2!(10.001, 5.)));
        assert!(!rect.contains(v2!(5., -0.001)));
    }

    #[test]
    fn rect_intersect_overlap() {
        let a = Rect::new(0., 0., 10., 10.);
        let b = Rect::new(5., 5., 10., 10.);
        assert!(rects_intersect(&a, &b));

        let far = Rect::new(100., 100., 5., 5.);
        assert!(!rects_intersect(&a, &far));

        // Overlap on one axis only is not an intersection.
        let beside = Rect::new(20., 0., 10., 10.);
        assert!(!rects_intersect(&a, &beside));
    }

    #[test]
    fn rect_intersect_touching_edges_do_not_count() {
        let a = Rect::new(0., 0., 10., 10.);
        let right = Rect::new(10., 0., 10., 10.);
        let below = Rect::new(0., 10., 10., 10.);
        let corner = Rect::new(10., 10., 10., 10.);
        assert!(!rects_intersect(&a, &right));
        assert!(!rects_intersect(&a, &below));
        assert!(!rects_intersect(&a, &corner));
    }

    #[test]
    fn rect_intersect_is_symmetric() {
        let pairs = [
            (Rect::new(0., 0., 10., 10.), Rect::new(5., 5., 10., 10.)),
            (Rect::new(0., 0., 10., 10.), Rect::new(10., 0., 10., 10.)),
            (Rect::new(-3., -3., 6., 6.), Rect::new(-1., -1., 1., 1.)),
            (Rect::new(0., 0., 4., 4.), Rect::new(50., 0., 4., 4.)),
        ];
        for (a, b) in &pairs {
            assert_eq!(rects_intersect(a, b), rects_intersect(b, a));
        }
    }

    #[test]
    fn rect_center() {
        let rect = Rect::new(5., 5., 10., 10.);
        assert_eq!(rect.pos_center(), v2!(10., 10.));
    }
}
