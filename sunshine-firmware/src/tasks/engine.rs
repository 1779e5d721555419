//! Engine task
//!
//! Sole owner of the watch face engine. Waits for the next host or link
//! event or for the pending tick deadline, whichever comes first, feeds
//! it to the engine and repaints the panel when asked.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::clocks::RoscRng;
use embassy_time::Timer;

use sunshine_core::config::FaceConfig;
use sunshine_core::state::Event;
use sunshine_core::{Notice, Response, WatchFaceEngine};
use sunshine_display::{draw_frame, FontSet};

use crate::channels::EVENT_CHANNEL;
use crate::clock;
use crate::config::{FACE_SHAPE, IS_24_HOUR, PANEL_SIZE, UTC_OFFSET_S};
use crate::display::Panel;
use crate::link::{EmbassyTickScheduler, RoscEntropy, UartCompanionLink};

type Engine = WatchFaceEngine<EmbassyTickScheduler, UartCompanionLink, RoscEntropy>;

#[embassy_executor::task]
pub async fn engine_task(mut panel: Panel) {
    info!("Engine task started");

    let config = FaceConfig::for_shape(FACE_SHAPE);
    let fonts = FontSet::for_config(&config);
    let mut engine: Engine = WatchFaceEngine::new(
        config,
        UTC_OFFSET_S,
        EmbassyTickScheduler::new(),
        UartCompanionLink,
        RoscEntropy(RoscRng),
    );

    loop {
        let event = next_event(engine.scheduler()).await;
        if let Event::Tick(token) = event {
            engine.scheduler().clear(token);
        }

        trace!("Event: {:?}", event);
        let response = engine.handle(event, clock::now_ms());
        report(&response);

        if response.redraw {
            let ops = engine.draw(clock::now_ms(), PANEL_SIZE as i32, IS_24_HOUR, &fonts);
            if draw_frame(&mut panel, &ops, &fonts).is_err() {
                warn!("Panel write failed");
            }
        }
    }
}

/// Next queued event, or the pending tick if it comes due first
async fn next_event(scheduler: &EmbassyTickScheduler) -> Event {
    match scheduler.due() {
        Some(due) => match select(EVENT_CHANNEL.receive(), Timer::at(due.at)).await {
            Either::First(event) => event,
            Either::Second(()) => Event::Tick(due.token),
        },
        None => EVENT_CHANNEL.receive().await,
    }
}

fn report(response: &Response) {
    for notice in &response.notices {
        match notice {
            Notice::WeatherRequested(id) => info!("Weather requested: {}", id.as_str()),
            Notice::PublishFailed(e) => warn!("Weather request not sent: {:?}", e),
            Notice::PublishRejected => warn!("Companion rejected weather request"),
            Notice::LinkCallFailed(e) => warn!("Link call failed: {:?}", e),
            Notice::FieldRejected(key) => warn!("Ignoring mistyped weather field {}", key),
            Notice::ConnectionSuspended => warn!("Companion connection suspended"),
            Notice::ConnectionFailed { code } => error!("Companion connection failed: {}", code),
            Notice::StaleTick(token) => trace!("Stale tick {}", token.generation()),
        }
    }
}
