//! Companion UART transmit task
//!
//! Drains the outbound queue filled by the engine's link calls.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use sunshine_protocol::frame::MAX_FRAME_SIZE;
use sunshine_protocol::WatchMessage;

use crate::channels::LINK_TX_CHANNEL;

#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let message = LINK_TX_CHANNEL.receive().await;
        send(&mut tx, &message, &mut buf).await;
    }
}

async fn send(tx: &mut BufferedUartTx, message: &WatchMessage, buf: &mut [u8]) {
    let len = match message.to_frame().and_then(|frame| frame.encode(buf)) {
        Ok(len) => len,
        Err(e) => {
            warn!("Failed to encode link message: {:?}", e);
            return;
        }
    };

    match tx.write_all(&buf[..len]).await {
        Ok(()) => trace!("TX: {} bytes", len),
        Err(e) => warn!("UART write error: {:?}", e),
    }
}
