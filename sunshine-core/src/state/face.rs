//! Mutable face state

/// Everything the host tells the face about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceState {
    /// Wall clock at the last event, epoch milliseconds
    pub now_ms: i64,
    pub ambient: bool,
    /// Panel has fewer color bits in ambient mode
    pub low_bit_ambient: bool,
    pub visible: bool,
    pub utc_offset_s: i32,
}

impl FaceState {
    pub fn new(utc_offset_s: i32) -> Self {
        Self {
            utc_offset_s,
            ..Self::default()
        }
    }

    /// Text should be drawn without anti-aliasing
    pub fn crisp_text(&self) -> bool {
        self.ambient && self.low_bit_ambient
    }
}
