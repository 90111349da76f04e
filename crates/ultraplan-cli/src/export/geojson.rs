//! GeoJSON map overlays for the route, waypoints and actual track

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::models::{Comparison, Coordinate, RouteData, Waypoint, WaypointType};
use crate::units::meters_to_miles;

pub const PLANNED_ROUTE_COLOR: &str = "#3b82f6";
pub const ACTUAL_ROUTE_COLOR: &str = "#ef4444";

/// Marker colour for a waypoint, START and FINISH first
pub fn waypoint_marker_color(waypoint: &Waypoint) -> &'static str {
    match waypoint.name.as_deref() {
        Some("START") => return "#10b981",
        Some("FINISH") => return "#ef4444",
        _ => {}
    }
    match waypoint.waypoint_type {
        WaypointType::Checkpoint => "#3b82f6",
        WaypointType::Food => "#f59e0b",
        WaypointType::Water => "#06b6d4",
        WaypointType::Rest => "#8b5cf6",
    }
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Route as a LineString in GeoJSON `[lon, lat, ele]` order
pub fn route_feature(coords: &[Coordinate], name: &str, color: &str) -> Feature {
    let line = coords.iter().map(|c| vec![c[1], c[0], c[2]]).collect();

    let mut props = JsonObject::new();
    props.insert("name".into(), JsonValue::from(name));
    props.insert("stroke".into(), JsonValue::from(color));
    props.insert("stroke-width".into(), JsonValue::from(3));
    feature(Value::LineString(line), props)
}

pub fn waypoint_feature(waypoint: &Waypoint) -> Feature {
    let mut position = vec![waypoint.longitude, waypoint.latitude];
    if let Some(ele) = waypoint.elevation {
        position.push(ele);
    }

    let mut props = JsonObject::new();
    props.insert("name".into(), JsonValue::from(waypoint.display_name()));
    props.insert("type".into(), JsonValue::from(waypoint.waypoint_type.as_str()));
    props.insert(
        "distance_miles".into(),
        JsonValue::from((meters_to_miles(waypoint.distance_or_zero()) * 100.0).round() / 100.0),
    );
    props.insert(
        "stop_time_minutes".into(),
        JsonValue::from(waypoint.stop_time_minutes),
    );
    props.insert(
        "comments".into(),
        waypoint
            .comments
            .clone()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
    );
    props.insert(
        "marker-color".into(),
        JsonValue::from(waypoint_marker_color(waypoint)),
    );
    match waypoint.name.as_deref() {
        Some("START") => {
            props.insert("marker-symbol".into(), JsonValue::from("S"));
        }
        Some("FINISH") => {
            props.insert("marker-symbol".into(), JsonValue::from("F"));
        }
        _ => {}
    }
    feature(Value::Point(position), props)
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Planned route plus waypoint markers
pub fn plan_map(route: &RouteData, waypoints: &[Waypoint]) -> FeatureCollection {
    let mut features = Vec::with_capacity(waypoints.len() + 1);
    if !route.coordinates().is_empty() {
        features.push(route_feature(
            route.coordinates(),
            "Planned route",
            PLANNED_ROUTE_COLOR,
        ));
    }
    features.extend(waypoints.iter().map(waypoint_feature));
    collection(features)
}

/// Planned route in blue and actual route in red
pub fn comparison_map(comparison: &Comparison) -> FeatureCollection {
    let mut features = Vec::new();
    if let Some(planned) = &comparison.planned_route {
        if !planned.coordinates.is_empty() {
            features.push(route_feature(
                &planned.coordinates,
                "Planned route",
                PLANNED_ROUTE_COLOR,
            ));
        }
    }
    if let Some(actual) = &comparison.actual_route {
        if !actual.coordinates.is_empty() {
            features.push(route_feature(
                &actual.coordinates,
                "Actual route",
                ACTUAL_ROUTE_COLOR,
            ));
        }
    }
    collection(features)
}
