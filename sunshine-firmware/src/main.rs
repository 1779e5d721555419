//! Sunshine - Weather Watch Face Firmware
//!
//! RP2040 firmware that shows time, date and the companion's latest
//! weather on a 240x240 ST7789 panel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sunshine_core::state::Event;

use crate::channels::EVENT_CHANNEL;
use crate::config::LOW_BIT_AMBIENT;

mod channels;
mod clock;
mod config;
mod display;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Backlight stays on for the life of the firmware
static BACKLIGHT: StaticCell<Output<'static>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sunshine firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Companion link UART (115200 baud default)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    // Panel
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    BACKLIGHT.init(Output::new(p.PIN_20, Level::High));
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display::spi_config());
    let panel = match display::init_panel(spi, cs, dc) {
        Ok(panel) => panel,
        Err(e) => {
            error!("Panel init failed: {:?}", e);
            return;
        }
    };
    info!("Panel initialized");

    let button = Input::new(p.PIN_15, Pull::Up);

    // Device properties arrive first, then the face becomes visible
    EVENT_CHANNEL
        .send(Event::PropertiesChanged {
            low_bit_ambient: LOW_BIT_AMBIENT,
        })
        .await;
    EVENT_CHANNEL.send(Event::VisibilityChanged(true)).await;

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::power_task(button)).unwrap();
    spawner.spawn(tasks::engine_task(panel)).unwrap();

    info!("All tasks spawned, firmware running");
}
