//! Text paints and roles

use crate::config::{Color, Palette};

/// Which text a run is; selects font and paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRole {
    Time,
    AmPm,
    Date,
    MaxTemp,
    MinTemp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paint {
    pub color: Color,
    pub anti_alias: bool,
}

impl Paint {
    fn new(color: Color) -> Self {
        Self {
            color,
            anti_alias: true,
        }
    }
}

/// The face's text paints. The divider shares the date paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paints {
    time: Paint,
    am_pm: Paint,
    date: Paint,
    max_temp: Paint,
    min_temp: Paint,
}

impl Paints {
    pub fn new(palette: &Palette) -> Self {
        Self {
            time: Paint::new(palette.primary_text),
            am_pm: Paint::new(palette.primary_text),
            date: Paint::new(palette.secondary_text),
            max_temp: Paint::new(palette.primary_text),
            min_temp: Paint::new(palette.secondary_text),
        }
    }

    pub fn set_anti_alias(&mut self, on: bool) {
        for paint in [
            &mut self.time,
            &mut self.am_pm,
            &mut self.date,
            &mut self.max_temp,
            &mut self.min_temp,
        ] {
            paint.anti_alias = on;
        }
    }

    pub fn anti_alias(&self) -> bool {
        self.time.anti_alias
    }

    pub fn for_role(&self, role: TextRole) -> Paint {
        match role {
            TextRole::Time => self.time,
            TextRole::AmPm => self.am_pm,
            TextRole::Date => self.date,
            TextRole::MaxTemp => self.max_temp,
            TextRole::MinTemp => self.min_temp,
        }
    }

    pub fn divider(&self) -> Paint {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_reaches_every_role() {
        let mut paints = Paints::new(&Palette::default());
        paints.set_anti_alias(false);

        for role in [
            TextRole::Time,
            TextRole::AmPm,
            TextRole::Date,
            TextRole::MaxTemp,
            TextRole::MinTemp,
        ] {
            assert!(!paints.for_role(role).anti_alias);
        }
        assert!(!paints.divider().anti_alias);
    }
}
