use super::config::{OceanConfig, OceanError};

/// Ocean parameters plus the "initial spectrum is stale" flag.
///
/// Starts stale so the first frame builds the spectrum. Wind and size
/// changes mark it stale again; choppiness only affects the FFT output and
/// leaves it alone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpectrumState {
    config: OceanConfig,
    changed: bool,
}

impl SpectrumState {
    pub fn new(config: OceanConfig) -> Result<Self, OceanError> {
        config.validate()?;
        Ok(Self {
            config,
            changed: true,
        })
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    /// Whether the next frame has to rebuild the initial spectrum.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the flag and clears it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn set_wind(&mut self, wind: [f32; 2]) -> Result<(), OceanError> {
        self.apply(OceanConfig { wind, ..self.config })
    }

    pub fn set_size(&mut self, size: f32) -> Result<(), OceanError> {
        self.apply(OceanConfig { size, ..self.config })
    }

    pub fn set_choppiness(&mut self, choppiness: f32) {
        self.config.choppiness = choppiness;
    }

    fn apply(&mut self, next: OceanConfig) -> Result<(), OceanError> {
        next.validate()?;
        self.config = next;
        self.changed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_rebuilds_then_later_frames_do_not() {
        let mut s = SpectrumState::new(OceanConfig::default()).unwrap();
        assert!(s.take_changed());
        assert!(!s.take_changed());
        assert!(!s.is_changed());
    }

    #[test]
    fn wind_and_size_changes_mark_stale() {
        let mut s = SpectrumState::new(OceanConfig::default()).unwrap();
        s.take_changed();

        s.set_wind([4.0, 2.0]).unwrap();
        assert_eq!(s.config().wind, [4.0, 2.0]);
        assert!(s.take_changed());

        s.set_size(500.0).unwrap();
        assert_eq!(s.config().size, 500.0);
        assert!(s.take_changed());
        assert!(!s.take_changed());
    }

    #[test]
    fn choppiness_does_not_rebuild() {
        let mut s = SpectrumState::new(OceanConfig::default()).unwrap();
        s.take_changed();
        s.set_choppiness(2.5);
        assert_eq!(s.config().choppiness, 2.5);
        assert!(!s.is_changed());
    }

    #[test]
    fn rejected_wind_leaves_state_alone() {
        let mut s = SpectrumState::new(OceanConfig::default()).unwrap();
        s.take_changed();
        let before = *s.config();

        assert_eq!(s.set_wind([0.0, 0.0]), Err(OceanError::ZeroWind));
        assert_eq!(*s.config(), before);
        assert!(!s.is_changed());

        assert!(s.set_size(-1.0).is_err());
        assert_eq!(*s.config(), before);
        assert!(!s.is_changed());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = OceanConfig {
            wind: [0.0, 0.0],
            ..OceanConfig::default()
        };
        assert_eq!(SpectrumState::new(config), Err(OceanError::ZeroWind));
    }
}
