//! Last known weather, merged field by field from companion pushes

use heapless::{String, Vec};
use sunshine_protocol::{DataMap, Text, KEY_MAX_TEMP, KEY_MIN_TEMP, KEY_WEATHER_ID};

use super::icon::{IconArt, WeatherIcon};

/// Fields carried by one push. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherUpdate {
    pub weather_id: Option<i32>,
    pub min_temp: Option<Text>,
    pub max_temp: Option<Text>,
    /// Keys that were present with the wrong value type
    pub rejected: Vec<&'static str, 3>,
}

impl WeatherUpdate {
    pub fn from_map(map: &DataMap) -> Self {
        let mut update = Self::default();

        if let Some(value) = map.get(KEY_WEATHER_ID) {
            match value.as_int() {
                Some(id) => update.weather_id = Some(id),
                None => update.reject(KEY_WEATHER_ID),
            }
        }
        update.max_temp = update.text_field(map, KEY_MAX_TEMP);
        update.min_temp = update.text_field(map, KEY_MIN_TEMP);

        update
    }

    fn text_field(&mut self, map: &DataMap, key: &'static str) -> Option<Text> {
        let value = map.get(key)?;
        let text = value.as_text().and_then(|t| Text::try_from(t).ok());
        if text.is_none() {
            self.reject(key);
        }
        text
    }

    fn reject(&mut self, key: &'static str) {
        // One slot per known key
        let _ = self.rejected.push(key);
    }

    pub fn is_empty(&self) -> bool {
        self.weather_id.is_none() && self.min_temp.is_none() && self.max_temp.is_none()
    }
}

/// What the render loop reads. Every field is optional on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSnapshot {
    weather_id: Option<i32>,
    art: Option<IconArt>,
    min_temp: Option<Text>,
    max_temp: Option<Text>,
}

impl WeatherSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the fields present in `update`, keeping the rest.
    ///
    /// A new condition code always replaces the art, so an unknown code
    /// clears a previously shown icon. Returns whether anything was applied.
    pub fn apply(&mut self, update: &WeatherUpdate, icon_height: u32) -> bool {
        if let Some(id) = update.weather_id {
            self.weather_id = Some(id);
            self.art = WeatherIcon::for_condition(id).map(|icon| IconArt::scaled(icon, icon_height));
        }
        if let Some(max) = &update.max_temp {
            self.max_temp = Some(max.clone());
        }
        if let Some(min) = &update.min_temp {
            self.min_temp = Some(min.clone());
        }
        !update.is_empty()
    }

    pub fn weather_id(&self) -> Option<i32> {
        self.weather_id
    }

    pub fn art(&self) -> Option<IconArt> {
        self.art
    }

    pub fn min_temp(&self) -> Option<&str> {
        self.min_temp.as_ref().map(String::as_str)
    }

    pub fn max_temp(&self) -> Option<&str> {
        self.max_temp.as_ref().map(String::as_str)
    }

    /// Both temperatures, or nothing: the weather row needs the pair
    pub fn temperatures(&self) -> Option<(&str, &str)> {
        Some((self.max_temp()?, self.min_temp()?))
    }
}
