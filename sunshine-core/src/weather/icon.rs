//! Weather condition code to icon table
//!
//! Codes follow the OpenWeatherMap condition list. Ranges are checked in
//! order and the first match wins.

/// Art shown beside the temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherIcon {
    Storm,
    LightRain,
    Rain,
    Snow,
    Fog,
    Clear,
    LightClouds,
    Clouds,
}

impl WeatherIcon {
    /// Icon for a condition code, or `None` for codes without art
    pub fn for_condition(weather_id: i32) -> Option<Self> {
        use WeatherIcon::*;

        match weather_id {
            200..=232 => Some(Storm),
            300..=321 => Some(LightRain),
            500..=504 => Some(Rain),
            511 => Some(Snow),
            520..=531 => Some(Rain),
            600..=622 => Some(Snow),
            // 761 (dust) lands here before the storm arm can see it
            701..=761 => Some(Fog),
            781 => Some(Storm),
            800 => Some(Clear),
            801 => Some(LightClouds),
            802..=804 => Some(Clouds),
            _ => None,
        }
    }

    /// Width and height of the source art; scaling keeps this ratio
    pub fn native_size(self) -> (u32, u32) {
        match self {
            WeatherIcon::Clear => (32, 32),
            WeatherIcon::Fog => (36, 32),
            _ => (40, 32),
        }
    }
}

/// An icon together with the size it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IconArt {
    pub icon: WeatherIcon,
    pub width: u32,
    pub height: u32,
}

impl IconArt {
    /// Scale `icon` to `height` pixels, preserving aspect ratio
    pub fn scaled(icon: WeatherIcon, height: u32) -> Self {
        let (w, h) = icon.native_size();
        Self {
            icon,
            width: height * w / h,
            height,
        }
    }
}
