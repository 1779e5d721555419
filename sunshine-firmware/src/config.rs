//! Board and face settings
//!
//! Pin map for a Pico with a 240x240 ST7789 breakout:
//! - Companion UART0: TX GPIO0, RX GPIO1
//! - Panel SPI0: CLK GPIO18, MOSI GPIO19, CS GPIO17, DC GPIO16
//! - Backlight: GPIO20
//! - Wake button: GPIO15 to ground

use sunshine_core::config::Shape;

/// Panel edge in pixels (square panel)
pub const PANEL_SIZE: u16 = 240;

/// SPI clock for the panel; the ST7789 tolerates up to 62.5 MHz
pub const PANEL_SPI_HZ: u32 = 40_000_000;

pub const FACE_SHAPE: Shape = Shape::Square;

/// Local zone offset applied until the companion sends one
pub const UTC_OFFSET_S: i32 = 0;

/// Host 24-hour setting, read on every frame
pub const IS_24_HOUR: bool = true;

/// The panel dithers, so ambient text stays anti-aliased
pub const LOW_BIT_AMBIENT: bool = false;

/// Idle time before the face drops to ambient mode
pub const AMBIENT_TIMEOUT_MS: u64 = 15_000;

/// Interval of the system minute tick in ambient mode
pub const TIME_TICK_MS: u64 = 60_000;
