// Implementation derived from https://github.com/BareRose/ranxoshi256/blob/master/ranxoshi256.h

pub type Default_Rng = Rand_Xoshiro256;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Default_Rng_Seed(pub [u8; 32]);

pub struct Rand_Xoshiro256 {
    state: [u64; 4],
}

pub fn new_random_seed() -> std::io::Result<Default_Rng_Seed> {
    let mut seed_buf = [0u8; 32];
    get_entropy_from_os(&mut seed_buf)?;
    Ok(Default_Rng_Seed(seed_buf))
}

pub fn new_rng_with_random_seed() -> std::io::Result<Rand_Xoshiro256> {
    Ok(new_rng_with_seed(new_random_seed()?))
}

pub fn new_rng_with_seed(seed: Default_Rng_Seed) -> Rand_Xoshiro256 {
    Rand_Xoshiro256::new_with_seed(seed.0)
}

/// Uniform in [0, 1].
pub fn rand_01(rng: &mut Rand_Xoshiro256) -> f32 {
    (rng.next() >> 32) as f32 / u32::max_value() as f32
}

pub fn rand_range(rng: &mut Rand_Xoshiro256, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max);
    min + rand_01(rng) * (max - min)
}

impl Rand_Xoshiro256 {
    pub fn new_with_seed(s: [u8; 32]) -> Rand_Xoshiro256 {
        let mut state = [0u64; 4];
        for (i, word) in state.iter_mut().enumerate() {
            let mut w = 0u64;
            for &byte in &s[i * 8..(i + 1) * 8] {
                w = (w << 8) | u64::from(byte);
            }
            *word = w;
        }
        Rand_Xoshiro256 { state }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let s = &mut self.state;
        let res = rotl(s[1].wrapping_mul(5), 7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = rotl(s[3], 45);
        res
    }
}

#[inline(always)]
fn rotl(x: u64, k: i32) -> u64 {
    (x << k) | (x >> (64 - k))
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn get_entropy_from_os(buf: &mut [u8]) -> std::io::Result<()> {
    use std::fs::File;
    use std::io::Read;

    let mut file = File::open("/dev/urandom")?;
    file.read_exact(buf)
}

#[cfg(target_os = "windows")]
mod win32 {
    use std::os::raw::*;
    pub(super) type PVOID = *mut c_void;
    pub(super) type BOOL = c_int;
    pub(super) type ULONG = c_ulong;

    extern "system" {
        #[link(name = "Advapi32")]
        #[link_name = "SystemFunction036"]
        pub(super) fn RtlGenRandom(buf: PVOID, buf_len: ULONG) -> BOOL;
    }
}

#[cfg(target_os = "windows")]
fn get_entropy_from_os(buf: &mut [u8]) -> std::io::Result<()> {
    if unsafe { win32::RtlGenRandom(buf.as_mut_ptr() as win32::PVOID, buf.len() as win32::ULONG) }
        != 0
    {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "RtlGenRandom call failed.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let seed = Default_Rng_Seed([42; 32]);
        let mut a = new_rng_with_seed(seed);
        let mut b = new_rng_with_seed(seed);
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn rand_01_stays_in_range() {
        let mut rng = new_rng_with_seed(Default_Rng_Seed([7; 32]));
        for _ in 0..1000 {
            let x = rand_01(&mut rng);
            assert!((0. ..=1.).contains(&x));
        }
    }

    #[test]
    fn rand_range_respects_bounds() {
        let mut rng = new_rng_with_seed(Default_Rng_Seed([3; 32]));
        for _ in 0..1000 {
            let x = rand_range(&mut rng, -4., 8.);
            assert!((-4. ..=8.).contains(&x));
        }
    }

    #[test]
    fn random_seed_gives_working_rng() {
        // Just exercise the OS entropy path; the sequence itself is arbitrary.
        let mut rng = new_rng_with_random_seed().unwrap();
        let _ = rng.next();
    }
}
