//! Unit conversions and display formatting shared by tables, exports and charts.
//!
//! Paces are minutes per mile, durations are minutes, distances are meters
//! unless a function name says otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.34;

/// Feet in one meter
pub const FEET_PER_METER: f64 = 3.28084;

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Miles with two decimals, `0.00` when absent or zero
pub fn format_miles(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m != 0.0 => format!("{:.2}", meters_to_miles(m)),
        _ => "0.00".to_string(),
    }
}

/// Whole feet, `0` when absent or zero
pub fn format_feet(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m != 0.0 => format!("{:.0}", meters_to_feet(m)),
        _ => "0".to_string(),
    }
}

/// Pace in minutes per mile as `M:SS`
pub fn format_pace(pace: Option<f64>) -> String {
    let pace = match pace {
        Some(p) if p > 0.0 => p,
        _ => return "--:--".to_string(),
    };

    let mut minutes = pace.floor() as i64;
    let mut seconds = ((pace - pace.floor()) * 60.0).round() as i64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{}:{:02}", minutes, seconds)
}

/// Duration in minutes as `H:MM:SS`
pub fn format_clock_duration(minutes: Option<f64>) -> String {
    let minutes = match minutes {
        Some(m) if m > 0.0 => m,
        _ => return "--:--:--".to_string(),
    };

    let total_seconds = (minutes * 60.0).round() as i64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}

/// Duration in minutes as `Hh Mm`
pub fn format_hours_minutes(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) if m > 0.0 => {
            let hours = (m / 60.0).floor() as i64;
            let mins = (m % 60.0).floor() as i64;
            format!("{}h {}m", hours, mins)
        }
        _ => "Not set".to_string(),
    }
}

/// Parse a target duration written as `HH:MM:SS` into whole minutes.
///
/// Seconds are rounded to the nearest minute.
pub fn parse_target_duration(input: &str) -> Result<u32> {
    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(PlannerError::invalid_duration(
            "Format must be HH:MM:SS (e.g., 24:00:00 for 24 hours)",
        ));
    }

    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| PlannerError::invalid_duration("Invalid time format"))?;
    }
    let [hours, minutes, seconds] = values;

    if minutes >= 60 || seconds >= 60 {
        return Err(PlannerError::invalid_duration(
            "Minutes and seconds must be less than 60",
        ));
    }

    let total = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes + (seconds as f64 / 60.0).round() as u64))
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| PlannerError::invalid_duration("Duration is too large"))?;
    Ok(total)
}

/// Round a fractional duration to whole minutes, rejecting values that do
/// not fit a target duration
pub fn whole_minutes(minutes: f64) -> Result<u32> {
    let rounded = minutes.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > u32::MAX as f64 {
        return Err(PlannerError::invalid_duration(format!(
            "Duration out of range: {} minutes",
            minutes
        )));
    }
    Ok(rounded as u32)
}

/// Distance unit chosen in the backend settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

/// Elevation unit chosen in the backend settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElevationUnit {
    Meters,
    #[default]
    Feet,
}

/// Display preferences applied to terminal tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayUnits {
    pub distance: DistanceUnit,
    pub elevation: ElevationUnit,
}

impl DisplayUnits {
    pub fn new(distance: DistanceUnit, elevation: ElevationUnit) -> Self {
        Self {
            distance,
            elevation,
        }
    }

    pub fn distance_label(&self) -> &'static str {
        match self.distance {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
        }
    }

    pub fn elevation_label(&self) -> &'static str {
        match self.elevation {
            ElevationUnit::Meters => "m",
            ElevationUnit::Feet => "ft",
        }
    }

    /// Convert meters to the configured distance unit
    pub fn distance(&self, meters: f64) -> f64 {
        match self.distance {
            DistanceUnit::Miles => meters_to_miles(meters),
            DistanceUnit::Kilometers => meters / 1000.0,
        }
    }

    /// Convert meters to the configured elevation unit
    pub fn elevation(&self, meters: f64) -> f64 {
        match self.elevation {
            ElevationUnit::Meters => meters,
            ElevationUnit::Feet => meters_to_feet(meters),
        }
    }

    pub fn format_distance(&self, meters: Option<f64>) -> String {
        format!(
            "{:.2} {}",
            self.distance(meters.unwrap_or(0.0)),
            self.distance_label()
        )
    }

    pub fn format_elevation(&self, meters: Option<f64>) -> String {
        format!(
            "{:.0} {}",
            self.elevation(meters.unwrap_or(0.0)),
            self.elevation_label()
        )
    }

    /// Pace (min/mile) re-expressed per configured distance unit
    pub fn format_pace(&self, pace_per_mile: Option<f64>) -> String {
        let pace = match self.distance {
            DistanceUnit::Miles => pace_per_mile,
            DistanceUnit::Kilometers => pace_per_mile.map(|p| p * 1000.0 / METERS_PER_MILE),
        };
        format_pace(pace)
    }
}
