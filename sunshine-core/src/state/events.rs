//! Events the engine consumes
//!
//! Host callbacks (visibility, power mode, properties, clock) and companion
//! link notifications all arrive through this one enum.

use sunshine_protocol::BridgeMessage;

use super::governor::TickToken;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Face shown or hidden
    VisibilityChanged(bool),
    /// Entered or left ambient mode
    AmbientModeChanged(bool),
    /// Device display properties, delivered once at setup
    PropertiesChanged { low_bit_ambient: bool },
    /// Wearer's zone changed
    TimeZoneChanged { utc_offset_s: i32 },
    /// Once-a-minute system tick (keeps ambient mode current)
    TimeTick,
    /// A scheduled redraw tick came due
    Tick(TickToken),
    /// Notification from the companion link
    Link(BridgeMessage),
}
