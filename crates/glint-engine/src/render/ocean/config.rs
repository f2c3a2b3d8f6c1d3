use crate::paint::Color;

/// Errors raised by ocean configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OceanError {
    #[error("simulation resolution must be a power of two >= {min}, got {resolution}")]
    InvalidResolution { resolution: u32, min: u32 },

    #[error("patch size must be positive, got {0}")]
    InvalidSize(f32),

    #[error("wind vector must be non-zero")]
    ZeroWind,
}

/// Ocean simulation + shading parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OceanConfig {
    /// Side of the square simulation textures.
    pub resolution: u32,
    /// World-space side of the ocean mesh.
    pub geometry_size: f32,
    /// Mesh cells per side.
    pub geometry_resolution: u32,
    pub wind: [f32; 2],
    /// World-space side of the simulated patch.
    pub size: f32,
    /// Horizontal displacement strength.
    pub choppiness: f32,
    pub exposure: f32,
    pub ocean_color: [f32; 3],
    pub sky_color: [f32; 3],
    pub sun_direction: [f32; 3],
    pub clear_color: Color,
}

impl OceanConfig {
    pub const MIN_RESOLUTION: u32 = 16;

    pub fn validate(&self) -> Result<(), OceanError> {
        if !self.resolution.is_power_of_two() || self.resolution < Self::MIN_RESOLUTION {
            return Err(OceanError::InvalidResolution {
                resolution: self.resolution,
                min: Self::MIN_RESOLUTION,
            });
        }
        if !(self.size > 0.0) {
            return Err(OceanError::InvalidSize(self.size));
        }
        if self.wind[0] == 0.0 && self.wind[1] == 0.0 {
            return Err(OceanError::ZeroWind);
        }
        Ok(())
    }

    /// Scale applied to displacement texels on the mesh.
    ///
    /// The shading uniform takes the simulation resolution as its geometry size.
    pub fn displacement_scale(&self) -> f32 {
        self.resolution as f32 / self.size
    }
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            resolution: 1024,
            geometry_size: 512.0,
            geometry_resolution: 512,
            wind: [10.0, 10.0],
            size: 250.0,
            choppiness: 4.0,
            exposure: 0.34,
            ocean_color: [0.004, 0.016, 0.047],
            sky_color: [3.2, 9.6, 12.8],
            sun_direction: [1.0, 1.0, 1.0],
            clear_color: Color::new(1.0, 1.0, 1.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = OceanConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.resolution, 1024);
        assert_eq!(c.geometry_resolution, 512);
        assert!((c.displacement_scale() - 4.096).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_power_of_two_and_tiny_resolutions() {
        for resolution in [0, 8, 100, 1000] {
            let c = OceanConfig {
                resolution,
                ..Default::default()
            };
            assert_eq!(
                c.validate(),
                Err(OceanError::InvalidResolution { resolution, min: 16 })
            );
        }
        let c = OceanConfig {
            resolution: 16,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_size_and_wind() {
        let c = OceanConfig {
            size: 0.0,
            ..Default::default()
        };
        assert_eq!(c.validate(), Err(OceanError::InvalidSize(0.0)));

        let c = OceanConfig {
            wind: [0.0, 0.0],
            ..Default::default()
        };
        assert_eq!(c.validate(), Err(OceanError::ZeroWind));
    }
}
