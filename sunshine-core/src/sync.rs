//! Weather sync with the companion
//!
//! Two flows share only the snapshot: after every connect the watch
//! subscribes to the weather path and publishes one request carrying a fresh
//! random id; every change pushed under that path is merged into the
//! snapshot. Nothing is retried. Reconnecting is the link's business.

use heapless::String;
use sunshine_protocol::{DataError, DataEvent, DataItem, WEATHER_PATH};
use uuid::Builder;

use crate::engine::{Notice, Response};
use crate::traits::{CompanionLink, EntropySource, LinkError};
use crate::weather::{WeatherSnapshot, WeatherUpdate};

/// Hyphenated lower-case UUID
pub type RequestId = String<36>;

/// One outbound weather request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncRequest {
    pub id: RequestId,
}

impl SyncRequest {
    /// New request with a random (version 4) id
    pub fn generate<E: EntropySource>(entropy: &mut E) -> Self {
        let mut bytes = [0u8; 16];
        entropy.fill_bytes(&mut bytes);
        let uuid = Builder::from_random_bytes(bytes).into_uuid();

        let mut buf = uuid::Uuid::encode_buffer();
        let mut id = RequestId::new();
        let _ = id.push_str(uuid.hyphenated().encode_lower(&mut buf));
        Self { id }
    }

    pub fn to_item(&self) -> Result<DataItem, DataError> {
        DataItem::weather_request(&self.id)
    }
}

/// Connection as the engine last heard it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    Disconnected,
    /// Connect requested, or the link is recovering from a suspend
    Connecting,
    Connected,
}

#[derive(Debug, Clone)]
pub struct WeatherSync {
    state: LinkState,
    subscribed: bool,
    last_request: Option<SyncRequest>,
}

impl Default for WeatherSync {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherSync {
    pub fn new() -> Self {
        Self {
            state: LinkState::Disconnected,
            subscribed: false,
            last_request: None,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Id of the most recent request. Incoming pushes are not matched
    /// against it.
    pub fn last_request(&self) -> Option<&SyncRequest> {
        self.last_request.as_ref()
    }

    /// Face became visible: open the connection
    pub fn start<L: CompanionLink>(&mut self, link: &mut L, out: &mut Response) {
        if self.state != LinkState::Disconnected {
            return;
        }
        match link.connect() {
            Ok(()) => self.state = LinkState::Connecting,
            Err(e) => out.note(Notice::LinkCallFailed(e)),
        }
    }

    /// Face became invisible: unsubscribe and close
    pub fn stop<L: CompanionLink>(&mut self, link: &mut L, out: &mut Response) {
        if self.subscribed {
            self.subscribed = false;
            if let Err(e) = link.remove_listener(WEATHER_PATH) {
                out.note(Notice::LinkCallFailed(e));
            }
        }
        if self.state != LinkState::Disconnected {
            self.state = LinkState::Disconnected;
            if let Err(e) = link.disconnect() {
                out.note(Notice::LinkCallFailed(e));
            }
        }
    }

    /// Link is up: subscribe, then publish one request
    pub fn on_connected<L: CompanionLink, E: EntropySource>(
        &mut self,
        link: &mut L,
        entropy: &mut E,
        out: &mut Response,
    ) {
        self.state = LinkState::Connected;

        match link.add_listener(WEATHER_PATH) {
            Ok(()) => self.subscribed = true,
            Err(e) => out.note(Notice::LinkCallFailed(e)),
        }

        let request = SyncRequest::generate(entropy);
        let sent = match request.to_item() {
            Ok(item) => link.put_data_item(&item),
            Err(_) => Err(LinkError::Encode),
        };
        match sent {
            Ok(()) => out.note(Notice::WeatherRequested(request.id.clone())),
            Err(e) => out.note(Notice::PublishFailed(e)),
        }
        self.last_request = Some(request);
    }

    /// Link dropped; the bridge reconnects by itself and will report
    /// `Connected` again
    pub fn on_suspended(&mut self, out: &mut Response) {
        if self.state == LinkState::Connected {
            self.state = LinkState::Connecting;
        }
        self.subscribed = false;
        out.note(Notice::ConnectionSuspended);
    }

    /// Connect attempt failed; stays down until the face is shown again
    pub fn on_failed(&mut self, code: u8, out: &mut Response) {
        self.state = LinkState::Disconnected;
        self.subscribed = false;
        out.note(Notice::ConnectionFailed { code });
    }

    /// Outcome of an earlier publish
    pub fn on_put_result(&mut self, ok: bool, out: &mut Response) {
        if !ok {
            out.note(Notice::PublishRejected);
        }
    }

    /// Merge a weather push into `snapshot`. Returns whether anything
    /// changed and a redraw is due.
    pub fn on_data_changed(
        &mut self,
        event: &DataEvent,
        snapshot: &mut WeatherSnapshot,
        icon_height: u32,
        out: &mut Response,
    ) -> bool {
        if !self.subscribed || !event.is_change_at(WEATHER_PATH) {
            return false;
        }

        let update = WeatherUpdate::from_map(&event.item.map);
        for &key in &update.rejected {
            out.note(Notice::FieldRejected(key));
        }
        snapshot.apply(&update, icon_height)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sunshine_protocol::{Value, KEY_MAX_TEMP, KEY_MIN_TEMP, KEY_UUID};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        Connect,
        Disconnect,
        AddListener,
        RemoveListener,
        Put(DataItem),
    }

    /// Link that records calls and can be told to fail publishes
    #[derive(Debug, Default)]
    pub(crate) struct RecordingLink {
        pub calls: std::vec::Vec<Call>,
        pub fail_puts: bool,
    }

    impl CompanionLink for RecordingLink {
        fn connect(&mut self) -> Result<(), LinkError> {
            self.calls.push(Call::Connect);
            Ok(())
        }

        fn disconnect(&mut self) -> Result<(), LinkError> {
            self.calls.push(Call::Disconnect);
            Ok(())
        }

        fn add_listener(&mut self, path: &str) -> Result<(), LinkError> {
            assert_eq!(path, WEATHER_PATH);
            self.calls.push(Call::AddListener);
            Ok(())
        }

        fn remove_listener(&mut self, path: &str) -> Result<(), LinkError> {
            assert_eq!(path, WEATHER_PATH);
            self.calls.push(Call::RemoveListener);
            Ok(())
        }

        fn put_data_item(&mut self, item: &DataItem) -> Result<(), LinkError> {
            if self.fail_puts {
                return Err(LinkError::QueueFull);
            }
            self.calls.push(Call::Put(item.clone()));
            Ok(())
        }
    }

    /// Deterministic byte counter
    #[derive(Debug, Default)]
    pub(crate) struct CountingEntropy(pub u8);

    impl EntropySource for CountingEntropy {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest {
                *b = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }
    }

    fn push(entries: &[(&str, &str)]) -> DataEvent {
        let mut item = DataItem::new(WEATHER_PATH).unwrap();
        for (key, value) in entries {
            item.map.put_text(key, value).unwrap();
        }
        DataEvent::changed(item)
    }

    fn connected() -> (WeatherSync, RecordingLink) {
        let mut sync = WeatherSync::new();
        let mut link = RecordingLink::default();
        let mut out = Response::default();
        sync.start(&mut link, &mut out);
        sync.on_connected(&mut link, &mut CountingEntropy::default(), &mut out);
        (sync, link)
    }

    #[test]
    fn test_request_id_is_v4_uuid() {
        let request = SyncRequest::generate(&mut CountingEntropy(0));
        assert_eq!(request.id.as_str(), "00010203-0405-4607-8809-0a0b0c0d0e0f");
    }

    #[test]
    fn test_connect_subscribes_then_requests() {
        let (sync, link) = connected();

        assert_eq!(sync.state(), LinkState::Connected);
        assert!(sync.is_subscribed());
        assert_eq!(link.calls[0], Call::Connect);
        assert_eq!(link.calls[1], Call::AddListener);

        let Call::Put(item) = &link.calls[2] else {
            panic!("expected a publish");
        };
        assert!(item.is_weather());
        assert_eq!(item.map.len(), 1);
        assert_eq!(
            item.map.get(KEY_UUID),
            Some(&Value::text(sync.last_request().unwrap().id.as_str()).unwrap())
        );
    }

    #[test]
    fn test_each_connect_gets_fresh_id() {
        let mut sync = WeatherSync::new();
        let mut link = RecordingLink::default();
        let mut entropy = CountingEntropy::default();
        let mut out = Response::default();

        sync.on_connected(&mut link, &mut entropy, &mut out);
        let first = sync.last_request().unwrap().clone();
        sync.on_connected(&mut link, &mut entropy, &mut out);

        assert_ne!(sync.last_request().unwrap(), &first);
    }

    #[test]
    fn test_publish_failure_is_reported_not_retried() {
        let mut sync = WeatherSync::new();
        let mut link = RecordingLink {
            fail_puts: true,
            ..Default::default()
        };
        let mut out = Response::default();

        sync.on_connected(&mut link, &mut CountingEntropy::default(), &mut out);

        assert!(out
            .notices
            .contains(&Notice::PublishFailed(LinkError::QueueFull)));
        assert_eq!(link.calls, std::vec![Call::AddListener]);
        assert!(!out.redraw);
    }

    #[test]
    fn test_stop_unsubscribes_and_disconnects() {
        let (mut sync, mut link) = connected();
        link.calls.clear();

        sync.stop(&mut link, &mut Response::default());

        assert_eq!(link.calls, std::vec![Call::RemoveListener, Call::Disconnect]);
        assert_eq!(sync.state(), LinkState::Disconnected);
        assert!(!sync.is_subscribed());
    }

    #[test]
    fn test_start_twice_connects_once() {
        let mut sync = WeatherSync::new();
        let mut link = RecordingLink::default();
        let mut out = Response::default();

        sync.start(&mut link, &mut out);
        sync.start(&mut link, &mut out);
        assert_eq!(link.calls, std::vec![Call::Connect]);
    }

    #[test]
    fn test_push_merges_into_snapshot() {
        let (mut sync, _) = connected();
        let mut snapshot = WeatherSnapshot::new();
        let mut out = Response::default();

        let changed = sync.on_data_changed(
            &push(&[(KEY_MAX_TEMP, "20°"), (KEY_MIN_TEMP, "5°")]),
            &mut snapshot,
            18,
            &mut out,
        );

        assert!(changed);
        assert_eq!(snapshot.temperatures(), Some(("20°", "5°")));
    }

    #[test]
    fn test_push_ignored_when_not_subscribed() {
        let mut sync = WeatherSync::new();
        let mut snapshot = WeatherSnapshot::new();

        let changed = sync.on_data_changed(
            &push(&[(KEY_MAX_TEMP, "20°")]),
            &mut snapshot,
            18,
            &mut Response::default(),
        );
        assert!(!changed);
        assert_eq!(snapshot.max_temp(), None);
    }

    #[test]
    fn test_deletes_and_other_paths_ignored() {
        let (mut sync, _) = connected();
        let mut snapshot = WeatherSnapshot::new();
        let mut out = Response::default();

        let deleted = DataEvent::deleted(push(&[(KEY_MAX_TEMP, "20°")]).item);
        assert!(!sync.on_data_changed(&deleted, &mut snapshot, 18, &mut out));

        let mut other = DataItem::new("/steps").unwrap();
        other.map.put_text(KEY_MAX_TEMP, "20°").unwrap();
        assert!(!sync.on_data_changed(&DataEvent::changed(other), &mut snapshot, 18, &mut out));

        assert_eq!(snapshot, WeatherSnapshot::new());
    }

    #[test]
    fn test_suspend_then_reconnect_resubscribes() {
        let (mut sync, mut link) = connected();
        let mut out = Response::default();

        sync.on_suspended(&mut out);
        assert_eq!(sync.state(), LinkState::Connecting);
        assert!(!sync.is_subscribed());
        assert!(out.notices.contains(&Notice::ConnectionSuspended));

        link.calls.clear();
        sync.on_connected(&mut link, &mut CountingEntropy(7), &mut out);
        assert!(sync.is_subscribed());
        assert_eq!(link.calls[0], Call::AddListener);
    }

    #[test]
    fn test_failure_waits_for_next_start() {
        let mut sync = WeatherSync::new();
        let mut link = RecordingLink::default();
        let mut out = Response::default();
        sync.start(&mut link, &mut out);

        sync.on_failed(3, &mut out);
        assert_eq!(sync.state(), LinkState::Disconnected);
        assert!(out.notices.contains(&Notice::ConnectionFailed { code: 3 }));

        sync.start(&mut link, &mut out);
        assert_eq!(link.calls, std::vec![Call::Connect, Call::Connect]);
    }

    #[test]
    fn test_rejected_put_result_reported() {
        let mut sync = WeatherSync::new();
        let mut out = Response::default();
        sync.on_put_result(true, &mut out);
        assert!(out.notices.is_empty());

        sync.on_put_result(false, &mut out);
        assert!(out.notices.contains(&Notice::PublishRejected));
    }
}
