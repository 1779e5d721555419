//! The watch face engine
//!
//! One owner for the face state, weather snapshot, timer governor and sync
//! state. The host feeds it [`Event`]s on a single sequencing context and
//! calls [`WatchFaceEngine::draw`] whenever a redraw is due.

use heapless::Vec;
use sunshine_protocol::BridgeMessage;

use crate::config::FaceConfig;
use crate::render::{render, DrawList, Paints, Scene};
use crate::state::{Event, FaceState, TickOutcome, TickToken, TimerGovernor};
use crate::sync::{LinkState, RequestId, WeatherSync};
use crate::traits::{CompanionLink, EntropySource, LinkError, TextMetrics, TickScheduler};
use crate::weather::WeatherSnapshot;

/// Most notices a single event can raise
pub const MAX_NOTICES: usize = 6;

/// Something the host should know about but the face shrugs off
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// Weather request handed to the link
    WeatherRequested(RequestId),
    /// Weather request could not be queued
    PublishFailed(LinkError),
    /// Companion refused the weather request
    PublishRejected,
    /// Connect, disconnect or (un)subscribe could not be queued
    LinkCallFailed(LinkError),
    /// Weather key present with the wrong value type
    FieldRejected(&'static str),
    ConnectionSuspended,
    ConnectionFailed { code: u8 },
    /// Tick arrived after it was cancelled or replaced
    StaleTick(TickToken),
}

/// Outcome of one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Frame is out of date
    pub redraw: bool,
    pub notices: Vec<Notice, MAX_NOTICES>,
}

impl Response {
    pub fn note(&mut self, notice: Notice) {
        // Dropping surplus notices only loses log lines
        let _ = self.notices.push(notice);
    }
}

pub struct WatchFaceEngine<S, L, E>
where
    S: TickScheduler,
    L: CompanionLink,
    E: EntropySource,
{
    config: FaceConfig,
    state: FaceState,
    paints: Paints,
    weather: WeatherSnapshot,
    governor: TimerGovernor,
    sync: WeatherSync,
    scheduler: S,
    link: L,
    entropy: E,
}

impl<S, L, E> WatchFaceEngine<S, L, E>
where
    S: TickScheduler,
    L: CompanionLink,
    E: EntropySource,
{
    /// Engine for a hidden, interactive face with no weather yet
    pub fn new(config: FaceConfig, utc_offset_s: i32, scheduler: S, link: L, entropy: E) -> Self {
        let paints = Paints::new(&config.palette);
        Self {
            config,
            state: FaceState::new(utc_offset_s),
            paints,
            weather: WeatherSnapshot::new(),
            governor: TimerGovernor::new(),
            sync: WeatherSync::new(),
            scheduler,
            link,
            entropy,
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn state(&self) -> &FaceState {
        &self.state
    }

    pub fn paints(&self) -> &Paints {
        &self.paints
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn governor(&self) -> &TimerGovernor {
        &self.governor
    }

    pub fn sync(&self) -> &WeatherSync {
        &self.sync
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    #[cfg(test)]
    fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Process one event at wall-clock time `now_ms`
    pub fn handle(&mut self, event: Event, now_ms: i64) -> Response {
        self.state.now_ms = now_ms;
        let mut out = Response::default();

        match event {
            Event::VisibilityChanged(visible) => {
                self.state.visible = visible;
                if visible {
                    self.sync.start(&mut self.link, &mut out);
                    out.redraw = true;
                } else {
                    self.sync.stop(&mut self.link, &mut out);
                }
                self.update_timer();
            }
            Event::AmbientModeChanged(ambient) => {
                if self.state.ambient != ambient {
                    self.state.ambient = ambient;
                    self.apply_anti_alias();
                    out.redraw = true;
                }
                self.update_timer();
            }
            Event::PropertiesChanged { low_bit_ambient } => {
                self.state.low_bit_ambient = low_bit_ambient;
                self.apply_anti_alias();
            }
            Event::TimeZoneChanged { utc_offset_s } => {
                self.state.utc_offset_s = utc_offset_s;
                out.redraw = true;
            }
            Event::TimeTick => out.redraw = true,
            Event::Tick(token) => {
                let outcome = self.governor.on_tick(
                    token,
                    self.state.visible,
                    self.state.ambient,
                    now_ms,
                    &mut self.scheduler,
                );
                match outcome {
                    TickOutcome::Redraw => out.redraw = true,
                    TickOutcome::Stale => out.note(Notice::StaleTick(token)),
                }
            }
            Event::Link(message) => self.handle_link(message, &mut out),
        }

        out
    }

    fn handle_link(&mut self, message: BridgeMessage, out: &mut Response) {
        match message {
            BridgeMessage::Connected => {
                // Late answer to a connect we have since torn down
                if self.sync.state() != LinkState::Disconnected {
                    self.sync
                        .on_connected(&mut self.link, &mut self.entropy, out);
                }
            }
            BridgeMessage::ConnectionSuspended => self.sync.on_suspended(out),
            BridgeMessage::ConnectionFailed { code } => self.sync.on_failed(code, out),
            BridgeMessage::DataChanged(event) => {
                let icon_height = self.config.temp_text_size;
                if self
                    .sync
                    .on_data_changed(&event, &mut self.weather, icon_height, out)
                {
                    out.redraw = true;
                }
            }
            BridgeMessage::PutResult { ok } => self.sync.on_put_result(ok, out),
        }
    }

    fn update_timer(&mut self) {
        self.governor.evaluate(
            self.state.visible,
            self.state.ambient,
            self.state.now_ms,
            &mut self.scheduler,
        );
    }

    fn apply_anti_alias(&mut self) {
        self.paints.set_anti_alias(!self.state.crisp_text());
    }

    /// Lay out a frame for a surface `width` pixels wide.
    ///
    /// `is_24_hour` is the host's current setting; it is never cached.
    pub fn draw<M: TextMetrics>(
        &self,
        now_ms: i64,
        width: i32,
        is_24_hour: bool,
        metrics: &M,
    ) -> DrawList {
        let scene = Scene {
            width,
            now_ms,
            utc_offset_s: self.state.utc_offset_s,
            is_24_hour,
            ambient: self.state.ambient,
            weather: &self.weather,
            config: &self.config,
            paints: &self.paints,
        };
        render(&scene, metrics)
    }

    /// Cancel the pending tick and close the link. Also runs on drop.
    pub fn shutdown(&mut self) -> Response {
        let mut out = Response::default();
        self.governor.shutdown(&mut self.scheduler);
        self.sync.stop(&mut self.link, &mut out);
        out
    }
}

impl<S, L, E> Drop for WatchFaceEngine<S, L, E>
where
    S: TickScheduler,
    L: CompanionLink,
    E: EntropySource,
{
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
