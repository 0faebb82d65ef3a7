use crate::timer::TIMER_DEC_PER_SECOND;

/// Host-side knobs. None of these change instruction semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed between two 60 Hz frames.
    pub instructions_per_frame: u32,
    /// Rate of delay / sound timer decrements; also the host frame rate.
    pub timer_hz: u64,
    /// Fixed seed for CXNN; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Window scale factor, one of 1, 2, 4, 8, 16 or 32.
    pub scale: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_frame: 10,
            timer_hz: TIMER_DEC_PER_SECOND,
            seed: None,
            scale: 16,
        }
    }
}
