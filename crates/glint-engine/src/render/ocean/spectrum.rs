//! CPU side of the wave spectrum: the same math the simulation shaders run,
//! plus the random seed phases.

use std::f32::consts::{PI, TAU};

use rand::Rng;

pub const G: f32 = 9.81;
pub const KM: f32 = 370.0;

/// Signed frequency index of texel `coord`: `coord` in the lower half, `coord - resolution` above.
pub fn wave_index(coord: u32, resolution: u32) -> f32 {
    if (coord as f32) < resolution as f32 * 0.5 {
        coord as f32
    } else {
        coord as f32 - resolution as f32
    }
}

/// Wave vector of texel `(x, y)` for a patch of world size `size`.
pub fn wave_vector(x: u32, y: u32, resolution: u32, size: f32) -> [f32; 2] {
    let n = wave_index(x, resolution);
    let m = wave_index(y, resolution);
    [TAU * n / size, TAU * m / size]
}

/// Dispersion relation with capillary correction.
pub fn omega(k: f32) -> f32 {
    (G * k * (1.0 + (k / KM) * (k / KM))).sqrt()
}

/// Phase after `dt` seconds, wrapped into `[0, 2π)`.
pub fn advance_phase(phase: f32, k: f32, dt: f32) -> f32 {
    (phase + omega(k) * dt).rem_euclid(TAU)
}

/// Texel holding the conjugate frequency of `coord`.
pub fn conjugate_index(coord: u32, resolution: u32) -> u32 {
    (resolution - coord % resolution) % resolution
}

/// RGBA32F seed phases: R uniform in `[0, 2π)`, GBA zero.
pub fn seed_phases<R: Rng + ?Sized>(resolution: u32, rng: &mut R) -> Vec<f32> {
    let texels = resolution as usize * resolution as usize;
    let mut data = vec![0.0f32; texels * 4];
    for texel in data.chunks_exact_mut(4) {
        texel[0] = rng.random::<f32>() * 2.0 * PI;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wave_index_wraps_upper_half() {
        assert_eq!(wave_index(0, 8), 0.0);
        assert_eq!(wave_index(3, 8), 3.0);
        assert_eq!(wave_index(4, 8), -4.0);
        assert_eq!(wave_index(7, 8), -1.0);
    }

    #[test]
    fn wave_vector_scales_by_patch_size() {
        let k = wave_vector(1, 1023, 1024, 250.0);
        assert!((k[0] - TAU / 250.0).abs() < 1e-6);
        assert!((k[1] + TAU / 250.0).abs() < 1e-6);
        assert_eq!(wave_vector(0, 0, 1024, 250.0), [0.0, 0.0]);
    }

    #[test]
    fn omega_matches_deep_water_for_long_waves() {
        let k = 0.05;
        assert!((omega(k) - (G * k).sqrt()).abs() < 1e-4);
        assert_eq!(omega(0.0), 0.0);
        // Capillary term dominates at KM.
        assert!((omega(KM) - (2.0 * G * KM).sqrt()).abs() < 1e-2);
    }

    #[test]
    fn phase_wraps_into_range() {
        let p = advance_phase(6.0, 1.0, 1.0);
        assert!((0.0..TAU).contains(&p));
        assert!((p - (6.0 + G.sqrt() * (1.0 + 1.0 / (KM * KM)).sqrt() - TAU)).abs() < 1e-4);
        assert_eq!(advance_phase(1.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn conjugate_index_mirrors_with_repeat() {
        assert_eq!(conjugate_index(0, 16), 0);
        assert_eq!(conjugate_index(1, 16), 15);
        assert_eq!(conjugate_index(8, 16), 8);
        assert_eq!(conjugate_index(15, 16), 1);
    }

    #[test]
    fn seed_phases_fill_red_channel_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = seed_phases(16, &mut rng);
        assert_eq!(data.len(), 16 * 16 * 4);
        for texel in data.chunks_exact(4) {
            assert!((0.0..TAU).contains(&texel[0]));
            assert_eq!(&texel[1..], &[0.0, 0.0, 0.0]);
        }
        assert!(data.chunks_exact(4).any(|t| t[0] > 1.0));
    }

    #[test]
    fn seed_phases_are_reproducible() {
        let a = seed_phases(16, &mut StdRng::seed_from_u64(9));
        let b = seed_phases(16, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
