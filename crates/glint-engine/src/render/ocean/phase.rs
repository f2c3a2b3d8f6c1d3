/// One of the three phase textures.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PhaseSlot {
    /// Random starting phases, read once.
    Seed,
    Ping,
    Pong,
}

/// Ping-pong bookkeeping for the phase textures.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PhaseBuffers {
    ping: bool,
    initial: bool,
}

impl PhaseBuffers {
    pub fn new() -> Self {
        Self {
            ping: true,
            initial: true,
        }
    }

    /// Returns `(read, write)` for this frame's phase pass, then swaps.
    pub fn step(&mut self) -> (PhaseSlot, PhaseSlot) {
        let read = if self.initial {
            PhaseSlot::Seed
        } else {
            self.current()
        };
        let write = if self.ping {
            PhaseSlot::Pong
        } else {
            PhaseSlot::Ping
        };
        self.initial = false;
        self.ping = !self.ping;
        (read, write)
    }

    /// Texture holding the most recently written phases.
    pub fn current(&self) -> PhaseSlot {
        if self.ping {
            PhaseSlot::Ping
        } else {
            PhaseSlot::Pong
        }
    }

    /// Next step reads the seed again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PhaseBuffers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_reads_seed() {
        let mut p = PhaseBuffers::new();
        assert_eq!(p.step(), (PhaseSlot::Seed, PhaseSlot::Pong));
        assert_eq!(p.current(), PhaseSlot::Pong);
    }

    #[test]
    fn later_steps_alternate_and_read_last_write() {
        let mut p = PhaseBuffers::new();
        let (_, mut last) = p.step();
        for _ in 0..6 {
            let (read, write) = p.step();
            assert_eq!(read, last);
            assert_ne!(read, write);
            assert_ne!(read, PhaseSlot::Seed);
            assert_eq!(p.current(), write);
            last = write;
        }
    }

    #[test]
    fn reset_goes_back_to_seed() {
        let mut p = PhaseBuffers::new();
        p.step();
        p.step();
        p.step();
        p.reset();
        assert_eq!(p.step().0, PhaseSlot::Seed);
    }
}
