use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[repr(C)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

pub type Vec2f = Vector2<f32>;
pub type Vec2i = Vector2<i32>;
pub type Vec2u = Vector2<u32>;

impl<T> Vector2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy> From<(T, T)> for Vector2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vec2u> for Vec2f {
    fn from(v: Vec2u) -> Self {
        Self::new(v.x as _, v.y as _)
    }
}

impl From<Vec2i> for Vec2f {
    fn from(v: Vec2i) -> Self {
        Self::new(v.x as _, v.y as _)
    }
}

impl From<Vec2f> for Vec2i {
    fn from(v: Vec2f) -> Self {
        Self::new(v.x as _, v.y as _)
    }
}

impl From<Vec2u> for Vec2i {
    fn from(v: Vec2u) -> Self {
        Self::new(v.x as _, v.y as _)
    }
}

impl Vec2f {
    #[inline]
    pub fn magnitude2(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude2().sqrt()
    }

    /// Returns the normalized vector, or 0 if it has length 0.
    #[inline]
    pub fn normalized_or_zero(self) -> Self {
        let mag2 = self.magnitude2();
        if mag2 == 0. {
            return Self::default();
        }
        self * (1.0 / mag2.sqrt())
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0. && self.y == 0.
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.x = 0.;
        self.y = 0.;
    }
}

#[cfg(test)]
impl selene_test::approx_eq_testable::Approx_Eq_Testable for Vec2f {
    fn cmp_list(&self) -> Vec<f32> {
        vec![self.x, self.y]
    }
}

#[cfg(debug_assertions)]
#[inline(always)]
pub fn sanity_check_v(v: Vec2f) {
    debug_assert!(!v.x.is_nan());
    debug_assert!(!v.y.is_nan());
}

#[cfg(not(debug_assertions))]
pub fn sanity_check_v(_: Vec2f) {}

impl<T: Default> Default for Vector2<T> {
    fn default() -> Self {
        Self {
            x: T::default(),
            y: T::default(),
        }
    }
}

impl<T: Copy> Copy for Vector2<T> {}

impl<T: Clone> Clone for Vector2<T> {
    fn clone(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

impl<T: Debug> Debug for Vector2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{{ x: {:?}, y: {:?} }}", self.x, self.y)
    }
}

impl<T: PartialEq> PartialEq for Vector2<T> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<T: Eq> Eq for Vector2<T> {}

impl<T: Copy + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        v2!(-self.x, -self.y)
    }
}

impl<T: Copy + Add<Output = T>> Add for Vector2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        v2!(self.x + other.x, self.y + other.y)
    }
}

impl<T: Copy + Sub<Output = T>> Sub for Vector2<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        v2!(self.x - other.x, self.y - other.y)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vector2<T> {
    type Output = Self;

    fn mul(self, other: T) -> Self::Output {
        v2!(self.x * other, self.y * other)
    }
}

/// Component-wise product.
impl<T: Copy + Mul<Output = T>> Mul for Vector2<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        v2!(self.x * other.x, self.y * other.y)
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vector2<T> {
    type Output = Self;

    fn div(self, other: T) -> Self::Output {
        v2!(self.x / other, self.y / other)
    }
}

/// Component-wise quotient.
impl<T: Copy + Div<Output = T>> Div for Vector2<T> {
    type Output = Self;

    fn div(self, other: Self) -> Self::Output {
        v2!(self.x / other.x, self.y / other.y)
    }
}

impl<T: Copy + Add<Output = T>> AddAssign for Vector2<T> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<T: Copy + Sub<Output = T>> SubAssign for Vector2<T> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<T: Copy + Mul<Output = T>> MulAssign<T> for Vector2<T> {
    fn mul_assign(&mut self, other: T) {
        *self = *self * other;
    }
}

impl<T: Copy + Div<Output = T>> DivAssign<T> for Vector2<T> {
    fn div_assign(&mut self, other: T) {
        *self = *self / other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_arithmetic() {
        let a = v2!(1., 2.);
        let b = v2!(3., -4.);
        assert_eq!(a + b, v2!(4., -2.));
        assert_eq!(a - b, v2!(-2., 6.));
        assert_eq!(-a, v2!(-1., -2.));
        assert_eq!(a * 2., v2!(2., 4.));
        assert_eq!(b / 2., v2!(1.5, -2.));
        assert_eq!(a * b, v2!(3., -8.));
        assert_eq!(b / a, v2!(3., -2.));
    }

    #[test]
    fn vec_assign_ops() {
        let mut a = v2!(1., 1.);
        a += v2!(2., 3.);
        assert_eq!(a, v2!(3., 4.));
        a -= v2!(3., 4.);
        assert_eq!(a, v2!(0., 0.));
        let mut b = v2!(2., 4.);
        b *= 0.5;
        assert_eq!(b, v2!(1., 2.));
        b /= 2.;
        assert_eq!(b, v2!(0.5, 1.));
    }

    #[test]
    fn vec_magnitude_and_normalize() {
        use selene_test::assert_approx_eq;

        let v = v2!(3., 4.);
        assert_eq!(v.magnitude2(), 25.);
        assert_eq!(v.magnitude(), 5.);
        assert_approx_eq!(v.normalized_or_zero(), v2!(0.6, 0.8), eps = 1e-6);
        assert_eq!(v2!(0., 0.).normalized_or_zero(), v2!(0., 0.));
    }

    #[test]
    fn vec_zero() {
        let mut v = v2!(1., -1.);
        assert!(!v.is_zero());
        v.set_zero();
        assert!(v.is_zero());
        assert!(Vec2f::default().is_zero());
    }
}
