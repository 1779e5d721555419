//! Companion UART receive task
//!
//! Reassembles frames from the companion and forwards each decoded
//! message to the engine.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use sunshine_core::state::Event;
use sunshine_protocol::{BridgeMessage, FrameParser};

use crate::channels::EVENT_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeMessage::from_frame(&frame) {
                            Ok(message) => {
                                debug!("Link: {:?}", message);
                                EVENT_CHANNEL.send(Event::Link(message)).await;
                            }
                            Err(e) => warn!("Undecodable link message: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}
