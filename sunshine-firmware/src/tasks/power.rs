//! Power mode task
//!
//! Stands in for the host's power manager. The face stays interactive
//! while the wake button is in use, drops to ambient after an idle
//! timeout and then gets the once-a-minute system tick until the next
//! press.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use sunshine_core::state::Event;

use crate::channels::EVENT_CHANNEL;
use crate::config::{AMBIENT_TIMEOUT_MS, TIME_TICK_MS};

#[embassy_executor::task]
pub async fn power_task(mut button: Input<'static>) {
    info!("Power task started");

    loop {
        // Interactive: every press restarts the idle timeout
        match select(button.wait_for_falling_edge(), Timer::after_millis(AMBIENT_TIMEOUT_MS)).await
        {
            Either::First(()) => continue,
            Either::Second(()) => {}
        }

        debug!("Idle, entering ambient");
        EVENT_CHANNEL.send(Event::AmbientModeChanged(true)).await;

        loop {
            match select(button.wait_for_falling_edge(), Timer::after_millis(TIME_TICK_MS)).await {
                Either::First(()) => break,
                Either::Second(()) => EVENT_CHANNEL.send(Event::TimeTick).await,
            }
        }

        debug!("Wake button, leaving ambient");
        EVENT_CHANNEL.send(Event::AmbientModeChanged(false)).await;
    }
}
