//! Step plan for the separable radix-2 Stockham FFT run as fragment passes.

use super::config::OceanError;

/// Texture a step reads or writes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FftSlot {
    Spectrum,
    Ping,
    Pong,
    Displacement,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FftDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FftStep {
    pub direction: FftDirection,
    pub subtransform_size: u32,
    pub input: FftSlot,
    pub output: FftSlot,
}

/// `2 * log2(resolution)` butterfly steps: all horizontal ones, then all vertical.
///
/// Each step reads what the previous one wrote. The first reads the spectrum and
/// the last writes the displacement map; in between, even steps write ping and
/// odd steps write pong.
#[derive(Debug, Clone)]
pub struct FftPlan {
    resolution: u32,
    steps: Vec<FftStep>,
}

impl FftPlan {
    pub fn new(resolution: u32) -> Result<Self, OceanError> {
        if resolution < 2 || !resolution.is_power_of_two() {
            return Err(OceanError::InvalidResolution { resolution, min: 2 });
        }

        let iterations = resolution.trailing_zeros();
        let total = iterations * 2;
        let mut steps = Vec::with_capacity(total as usize);
        let mut input = FftSlot::Spectrum;

        for i in 0..total {
            let direction = if i < iterations {
                FftDirection::Horizontal
            } else {
                FftDirection::Vertical
            };
            let output = if i == total - 1 {
                FftSlot::Displacement
            } else if i % 2 == 0 {
                FftSlot::Ping
            } else {
                FftSlot::Pong
            };
            steps.push(FftStep {
                direction,
                subtransform_size: 1 << ((i % iterations) + 1),
                input,
                output,
            });
            input = output;
        }

        Ok(Self { resolution, steps })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Butterfly stages per axis.
    pub fn iterations(&self) -> u32 {
        self.resolution.trailing_zeros()
    }

    pub fn steps(&self) -> &[FftStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::TAU;

    type Texel = [f64; 4];

    fn mul(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        (a.0 * b.0 - a.1 * b.1, a.1 * b.0 + a.0 * b.1)
    }

    // Same arithmetic as the subtransform fragment shader, one texel at a time.
    fn butterfly(index: u32, s: u32, n: u32, line: &[Texel]) -> Texel {
        let half = s / 2;
        let even_index = (index / s) * half + index % half;
        let even = line[even_index as usize];
        let odd = line[(even_index + n / 2) as usize];
        let arg = -TAU * index as f64 / s as f64;
        let tw = (arg.cos(), arg.sin());
        let a = mul(tw, (odd[0], odd[1]));
        let b = mul(tw, (odd[2], odd[3]));
        [even[0] + a.0, even[1] + a.1, even[2] + b.0, even[3] + b.1]
    }

    fn run(plan: &FftPlan, spectrum: &[Texel]) -> Vec<Texel> {
        let n = plan.resolution();
        let mut slots: [Vec<Texel>; 4] = Default::default();
        let slot = |s: FftSlot| s as usize;
        slots[slot(FftSlot::Spectrum)] = spectrum.to_vec();

        for step in plan.steps() {
            let input = slots[slot(step.input)].clone();
            let mut output = vec![[0.0; 4]; (n * n) as usize];
            for y in 0..n {
                for x in 0..n {
                    let texel = match step.direction {
                        FftDirection::Horizontal => {
                            let row = &input[(y * n) as usize..((y + 1) * n) as usize];
                            butterfly(x, step.subtransform_size, n, row)
                        }
                        FftDirection::Vertical => {
                            let column: Vec<Texel> =
                                (0..n).map(|r| input[(r * n + x) as usize]).collect();
                            butterfly(y, step.subtransform_size, n, &column)
                        }
                    };
                    output[(y * n + x) as usize] = texel;
                }
            }
            slots[slot(step.output)] = output;
        }

        slots[slot(FftSlot::Displacement)].clone()
    }

    fn naive_dft(n: u32, input: &[Texel]) -> Vec<Texel> {
        let mut out = vec![[0.0; 4]; (n * n) as usize];
        for ky in 0..n {
            for kx in 0..n {
                let mut acc = [0.0; 4];
                for y in 0..n {
                    for x in 0..n {
                        let arg = -TAU * ((kx * x) as f64 + (ky * y) as f64) / n as f64;
                        let w = (arg.cos(), arg.sin());
                        let v = input[(y * n + x) as usize];
                        let a = mul(w, (v[0], v[1]));
                        let b = mul(w, (v[2], v[3]));
                        acc[0] += a.0;
                        acc[1] += a.1;
                        acc[2] += b.0;
                        acc[3] += b.1;
                    }
                }
                out[(ky * n + kx) as usize] = acc;
            }
        }
        out
    }

    fn check_against_dft(n: u32) {
        let plan = FftPlan::new(n).unwrap();
        let mut rng = StdRng::seed_from_u64(n as u64);
        let input: Vec<Texel> = (0..n * n)
            .map(|_| std::array::from_fn(|_| rng.random_range(-1.0..1.0)))
            .collect();

        let fast = run(&plan, &input);
        let slow = naive_dft(n, &input);
        for (i, (a, b)) in fast.iter().zip(&slow).enumerate() {
            for c in 0..4 {
                assert!((a[c] - b[c]).abs() < 1e-9, "n={n} texel {i} channel {c}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn matches_naive_dft_8() {
        check_against_dft(8);
    }

    #[test]
    fn matches_naive_dft_16() {
        check_against_dft(16);
    }

    #[test]
    fn odd_iteration_count_still_chains() {
        // 32 = 2^5: the horizontal half ends on ping, unlike even powers.
        check_against_dft(32);
    }

    #[test]
    fn steps_chain_and_end_in_displacement() {
        let plan = FftPlan::new(1024).unwrap();
        let steps = plan.steps();
        assert_eq!(plan.iterations(), 10);
        assert_eq!(steps.len(), 20);
        assert_eq!(steps[0].input, FftSlot::Spectrum);
        assert_eq!(steps[19].output, FftSlot::Displacement);
        for pair in steps.windows(2) {
            assert_eq!(pair[1].input, pair[0].output);
            assert_ne!(pair[1].input, pair[1].output);
        }
        assert!(steps[..10].iter().all(|s| s.direction == FftDirection::Horizontal));
        assert!(steps[10..].iter().all(|s| s.direction == FftDirection::Vertical));
        assert_eq!(steps[0].subtransform_size, 2);
        assert_eq!(steps[9].subtransform_size, 1024);
        assert_eq!(steps[10].subtransform_size, 2);
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(FftPlan::new(12).is_err());
        assert!(FftPlan::new(1).is_err());
        assert!(FftPlan::new(2).is_ok());
    }
}
