//! Key/value data items exchanged with the companion.
//!
//! The companion's data layer is a set of items addressed by path, each
//! holding a small map of typed values. The watch only ever touches the
//! weather path, so sizes are bounded for that use.

use heapless::{String, Vec};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Path shared by the weather request and the weather push
pub const WEATHER_PATH: &str = "/weather";

/// Correlation token in an outbound weather request
pub const KEY_UUID: &str = "uuid";
/// OpenWeatherMap condition code (i32)
pub const KEY_WEATHER_ID: &str = "weather_id";
/// Pre-formatted minimum temperature (text)
pub const KEY_MIN_TEMP: &str = "min_temp";
/// Pre-formatted maximum temperature (text)
pub const KEY_MAX_TEMP: &str = "max_temp";

pub const MAX_PATH_LEN: usize = 16;
pub const MAX_KEY_LEN: usize = 16;
/// Long enough for a hyphenated UUID
pub const MAX_TEXT_LEN: usize = 36;
pub const MAX_ENTRIES: usize = 4;

pub type Path = String<MAX_PATH_LEN>;
pub type Key = String<MAX_KEY_LEN>;
pub type Text = String<MAX_TEXT_LEN>;

/// Errors building or (de)serializing data items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataError {
    /// Map already holds `MAX_ENTRIES` distinct keys
    MapFull,
    PathTooLong,
    KeyTooLong,
    TextTooLong,
    /// Item does not fit the output buffer
    Encode,
    /// Bytes are not a valid item
    Decode,
}

/// A single typed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Int(i32),
    Text(Text),
}

impl Value {
    pub fn text(s: &str) -> Result<Self, DataError> {
        String::try_from(s)
            .map(Value::Text)
            .map_err(|_| DataError::TextTooLong)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Int(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Entry {
    key: Key,
    value: Value,
}

/// Small ordered map from key to value. Keys are unique.
///
/// On the wire it is the bare entry list. Decoding goes through `put`, so
/// a repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataMap {
    entries: Vec<Entry, MAX_ENTRIES>,
}

impl<'de> Deserialize<'de> for DataMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Entry, MAX_ENTRIES>::deserialize(deserializer)?;
        let mut map = DataMap::new();
        for Entry { key, value } in entries {
            map.put(&key, value)
                .map_err(|_| D::Error::custom("invalid map entry"))?;
        }
        Ok(map)
    }
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value under `key`
    pub fn put(&mut self, key: &str, value: Value) -> Result<(), DataError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return Ok(());
        }
        let key = String::try_from(key).map_err(|_| DataError::KeyTooLong)?;
        self.entries
            .push(Entry { key, value })
            .map_err(|_| DataError::MapFull)
    }

    pub fn put_int(&mut self, key: &str, value: i32) -> Result<(), DataError> {
        self.put(key, Value::Int(value))
    }

    pub fn put_text(&mut self, key: &str, value: &str) -> Result<(), DataError> {
        self.put(key, Value::text(value)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// A map published under a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataItem {
    pub path: Path,
    pub map: DataMap,
}

impl DataItem {
    pub fn new(path: &str) -> Result<Self, DataError> {
        Ok(Self {
            path: String::try_from(path).map_err(|_| DataError::PathTooLong)?,
            map: DataMap::new(),
        })
    }

    /// The request the watch publishes after each connect: a lone random token
    pub fn weather_request(request_id: &str) -> Result<Self, DataError> {
        let mut item = Self::new(WEATHER_PATH)?;
        item.map.put_text(KEY_UUID, request_id)?;
        Ok(item)
    }

    pub fn is_weather(&self) -> bool {
        self.path == WEATHER_PATH
    }

    /// Serialize into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], DataError> {
        postcard::to_slice(self, buf).map_err(|_| DataError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DataError> {
        postcard::from_bytes(bytes).map_err(|_| DataError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_existing_key() {
        let mut map = DataMap::new();
        map.put_text(KEY_MIN_TEMP, "5°").unwrap();
        map.put_text(KEY_MIN_TEMP, "10°").unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(KEY_MIN_TEMP).and_then(Value::as_text), Some("10°"));
    }

    #[test]
    fn test_typed_accessors() {
        let mut map = DataMap::new();
        map.put_int(KEY_WEATHER_ID, 800).unwrap();
        map.put_text(KEY_MAX_TEMP, "20°").unwrap();

        let id = map.get(KEY_WEATHER_ID).unwrap();
        assert_eq!(id.as_int(), Some(800));
        assert_eq!(id.as_text(), None);

        let max = map.get(KEY_MAX_TEMP).unwrap();
        assert_eq!(max.as_int(), None);
        assert_eq!(max.as_text(), Some("20°"));
        assert!(map.get(KEY_MIN_TEMP).is_none());
    }

    #[test]
    fn test_map_full() {
        let mut map = DataMap::new();
        for key in ["a", "b", "c", "d"] {
            map.put_int(key, 1).unwrap();
        }
        assert_eq!(map.put_int("e", 1), Err(DataError::MapFull));
        // Replacing still works on a full map
        assert_eq!(map.put_int("a", 2), Ok(()));
    }

    #[test]
    fn test_limits() {
        let mut map = DataMap::new();
        assert_eq!(
            map.put_int("a_key_that_is_far_too_long", 1),
            Err(DataError::KeyTooLong)
        );
        assert_eq!(
            map.put_text("k", "0123456789012345678901234567890123456789"),
            Err(DataError::TextTooLong)
        );
        assert_eq!(
            DataItem::new("/a/very/long/path/name").unwrap_err(),
            DataError::PathTooLong
        );
    }

    #[test]
    fn test_weather_request_shape() {
        let item = DataItem::weather_request("3f1c2a9e-0b7d-4c55-8e61-2d9a7b4c1f00").unwrap();

        assert!(item.is_weather());
        assert_eq!(item.map.len(), 1);
        assert_eq!(
            item.map.get(KEY_UUID).and_then(Value::as_text),
            Some("3f1c2a9e-0b7d-4c55-8e61-2d9a7b4c1f00")
        );
    }

    #[test]
    fn test_item_survives_the_wire() {
        let mut item = DataItem::new(WEATHER_PATH).unwrap();
        item.map.put_int(KEY_WEATHER_ID, 501).unwrap();
        item.map.put_text(KEY_MAX_TEMP, "21°").unwrap();

        let mut buf = [0u8; 128];
        let bytes = item.encode(&mut buf).unwrap();
        assert_eq!(DataItem::decode(bytes), Ok(item));
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(DataItem::decode(&[0xFF, 0xFF, 0xFF]), Err(DataError::Decode));
    }

    #[test]
    fn test_encode_into_tiny_buffer() {
        let item = DataItem::weather_request("abc").unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(item.encode(&mut buf), Err(DataError::Encode));
    }

    #[test]
    fn test_repeated_key_on_the_wire_keeps_last_value() {
        // Hand-built entry list, as a sloppy companion might send it
        let mut entries = Vec::<Entry, MAX_ENTRIES>::new();
        for temp in ["20°", "25°"] {
            entries
                .push(Entry {
                    key: String::try_from(KEY_MAX_TEMP).unwrap(),
                    value: Value::text(temp).unwrap(),
                })
                .unwrap();
        }
        let mut buf = [0u8; 64];
        let bytes = postcard::to_slice(&entries, &mut buf).unwrap();

        let map: DataMap = postcard::from_bytes(bytes).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(KEY_MAX_TEMP).and_then(Value::as_text), Some("25°"));
    }

    #[test]
    fn test_map_wire_form_is_entry_list() {
        let mut map = DataMap::new();
        map.put_int(KEY_WEATHER_ID, 800).unwrap();

        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        let from_map = postcard::to_slice(&map, &mut a).unwrap();
        let from_entries = postcard::to_slice(&map.entries, &mut b).unwrap();
        assert_eq!(from_map, from_entries);
    }
}
