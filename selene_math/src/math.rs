pub fn clamp<T: PartialOrd>(x: T, min: T, max: T) -> T {
    debug_assert!(min <= max);
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_all_cases() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-5, 0, 10), 0);
        assert_eq!(clamp(15, 0, 10), 10);
        assert_eq!(clamp(0.5_f32, 0., 1.), 0.5);
    }
}
