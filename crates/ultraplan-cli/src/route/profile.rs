//! Elevation profile series for charting
//!
//! Distances are miles and elevations feet, matching the chart axes.

use serde::Serialize;

use super::geodesy::cumulative_distances;
use crate::models::{RouteData, Waypoint, WaypointType};
use crate::units::{meters_to_feet, meters_to_miles};

/// Upper bound on plotted samples
pub const MAX_PROFILE_POINTS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub distance_miles: f64,
    pub elevation_feet: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMarker {
    pub label: String,
    pub waypoint_type: WaypointType,
    pub distance_miles: f64,
    pub elevation_feet: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub total_distance_miles: f64,
    pub min_elevation_feet: f64,
    pub max_elevation_feet: f64,
    /// Rounded feet, or `N/A` without route metadata
    pub elevation_gain_feet: String,
    pub elevation_loss_feet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationProfile {
    pub points: Vec<ProfilePoint>,
    pub markers: Vec<ProfileMarker>,
    pub stats: ProfileStats,
}

/// Chart colour for a waypoint marker
pub fn marker_color(waypoint_type: Option<WaypointType>) -> &'static str {
    match waypoint_type {
        Some(WaypointType::Checkpoint) => "rgb(59, 130, 246)",
        Some(WaypointType::Food) => "rgb(16, 185, 129)",
        Some(WaypointType::Water) => "rgb(6, 182, 212)",
        Some(WaypointType::Rest) => "rgb(139, 92, 246)",
        None => "rgb(107, 114, 128)",
    }
}

/// Keep every `ceil(n / max)`-th point
pub fn downsample<T: Copy>(points: &[T], max: usize) -> Vec<T> {
    if points.is_empty() || max == 0 {
        return Vec::new();
    }
    let step = points.len().div_ceil(max);
    points.iter().step_by(step).copied().collect()
}

fn format_feet_stat(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m != 0.0 => format!("{:.0}", meters_to_feet(m)),
        _ => "N/A".to_string(),
    }
}

/// Build the profile, or `None` when the route has no coordinates
pub fn build_profile(route: &RouteData, waypoints: &[Waypoint]) -> Option<ElevationProfile> {
    let coords = route.coordinates();
    if coords.is_empty() {
        return None;
    }

    let full: Vec<ProfilePoint> = cumulative_distances(coords)
        .into_iter()
        .zip(coords)
        .map(|(d, c)| ProfilePoint {
            distance_miles: meters_to_miles(d),
            elevation_feet: meters_to_feet(c[2]),
        })
        .collect();
    let points = downsample(&full, MAX_PROFILE_POINTS);

    let markers = waypoints
        .iter()
        .map(|wp| {
            let distance_miles = meters_to_miles(wp.distance_or_zero());
            let elevation_feet = nearest_point(&points, distance_miles)
                .map(|p| p.elevation_feet)
                .filter(|e| *e != 0.0)
                .or_else(|| wp.elevation.map(meters_to_feet))
                .unwrap_or(0.0);
            ProfileMarker {
                label: wp.chart_label(),
                waypoint_type: wp.waypoint_type,
                distance_miles,
                elevation_feet,
                color: marker_color(Some(wp.waypoint_type)),
            }
        })
        .collect();

    let min = points
        .iter()
        .map(|p| p.elevation_feet)
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.elevation_feet)
        .fold(f64::NEG_INFINITY, f64::max);
    let metadata = route.metadata.as_ref();

    let stats = ProfileStats {
        total_distance_miles: points.last().map(|p| p.distance_miles).unwrap_or(0.0),
        min_elevation_feet: min,
        max_elevation_feet: max,
        elevation_gain_feet: format_feet_stat(metadata.map(|m| m.elevation_gain_meters)),
        elevation_loss_feet: format_feet_stat(metadata.map(|m| m.elevation_loss_meters)),
    };

    Some(ElevationProfile {
        points,
        markers,
        stats,
    })
}

fn nearest_point(points: &[ProfilePoint], distance_miles: f64) -> Option<&ProfilePoint> {
    points.iter().min_by(|a, b| {
        (a.distance_miles - distance_miles)
            .abs()
            .total_cmp(&(b.distance_miles - distance_miles).abs())
    })
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line terminal rendering of the profile, `width` characters wide
pub fn sparkline(points: &[ProfilePoint], width: usize) -> String {
    if points.is_empty() || width == 0 {
        return String::new();
    }
    let columns = downsample(points, width);
    let min = columns
        .iter()
        .map(|p| p.elevation_feet)
        .fold(f64::INFINITY, f64::min);
    let max = columns
        .iter()
        .map(|p| p.elevation_feet)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    columns
        .iter()
        .map(|p| {
            if range <= 0.0 {
                return SPARK_LEVELS[0];
            }
            let level = ((p.elevation_feet - min) / range * 7.0).round() as usize;
            SPARK_LEVELS[level.min(7)]
        })
        .collect()
}
