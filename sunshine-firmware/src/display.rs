//! ST7789 panel setup
//!
//! Reset is tied to the RUN pin, so the driver gets no reset line.

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::ColorInversion;
use mipidsi::{Builder, NoResetPin};

use crate::config::{PANEL_SIZE, PANEL_SPI_HZ};

pub type Panel = mipidsi::Display<
    SPIInterface<ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>, Output<'static>>,
    ST7789,
    NoResetPin,
>;

/// Why the panel failed to come up
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    ChipSelect,
    Init,
}

pub fn spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = PANEL_SPI_HZ;
    config
}

/// Bring up the panel
pub fn init_panel(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
) -> Result<Panel, PanelError> {
    let device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| PanelError::ChipSelect)?;
    let di = SPIInterface::new(device, dc);

    Builder::new(ST7789, di)
        .display_size(PANEL_SIZE, PANEL_SIZE)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .map_err(|_| PanelError::Init)
}
