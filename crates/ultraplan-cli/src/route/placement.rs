//! Placing and moving waypoints along a route
//!
//! Distances are entered in miles and stored in meters.

use crate::error::{PlannerError, Result};
use crate::models::{
    Coordinate, RouteData, Waypoint, WaypointDraft, WaypointType, WaypointUpdate,
};
use crate::units::{meters_to_miles, miles_to_meters};

use super::interpolate::coordinates_at_distance;

/// Edits smaller than this many miles keep the stored coordinates
pub const DISTANCE_CHANGE_THRESHOLD_MILES: f64 = 0.01;

/// Parse a user-entered distance in miles and check it against the route.
///
/// Returns the distance in meters.
pub fn validate_distance_miles(input: &str, total_distance_meters: f64) -> Result<f64> {
    let miles: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::invalid_param("Please enter a valid distance"))?;
    if !miles.is_finite() {
        return Err(PlannerError::invalid_param("Please enter a valid distance"));
    }
    if miles < 0.0 {
        return Err(PlannerError::invalid_param("Distance cannot be negative"));
    }

    let meters = miles_to_meters(miles);
    if meters > total_distance_meters {
        return Err(PlannerError::invalid_param(format!(
            "Distance cannot exceed route length ({:.2} mi)",
            meters_to_miles(total_distance_meters)
        )));
    }
    Ok(meters)
}

/// Order index for a new waypoint at `target_meters`: one past the last
/// existing waypoint strictly before it, or 1 when none is.
pub fn next_order_index(waypoints: &[Waypoint], target_meters: f64) -> i64 {
    let mut sorted: Vec<&Waypoint> = waypoints.iter().collect();
    sorted.sort_by(|a, b| a.distance_or_zero().total_cmp(&b.distance_or_zero()));

    let mut order_index = 1;
    for wp in sorted {
        if wp.distance_or_zero() < target_meters {
            order_index = wp.order_index.unwrap_or(0) + 1;
        }
    }
    order_index
}

pub fn default_waypoint_name(miles: f64) -> String {
    format!("Waypoint at {:.1} mi", miles)
}

/// Whether an edited distance moved far enough to re-interpolate
pub fn distance_changed(current_meters: Option<f64>, new_miles: f64) -> bool {
    let current_miles = meters_to_miles(current_meters.unwrap_or(0.0));
    (new_miles - current_miles).abs() > DISTANCE_CHANGE_THRESHOLD_MILES
}

/// User input for a new waypoint
#[derive(Debug, Clone, Default)]
pub struct NewWaypoint {
    pub distance_miles: String,
    pub name: Option<String>,
    pub waypoint_type: WaypointType,
    pub stop_time_minutes: u32,
    pub comments: Option<String>,
}

fn route_total(route: &RouteData) -> f64 {
    route.total_distance_meters().unwrap_or(0.0)
}

fn route_coords(route: &RouteData) -> Result<&[Coordinate]> {
    let coords = route.coordinates();
    if coords.is_empty() {
        return Err(PlannerError::EmptyRoute);
    }
    Ok(coords)
}

/// Build the create body for a waypoint placed on the route
pub fn plan_new_waypoint(
    event_id: &str,
    input: &NewWaypoint,
    route: &RouteData,
    existing: &[Waypoint],
) -> Result<WaypointDraft> {
    let coords = route_coords(route)?;
    let meters = validate_distance_miles(&input.distance_miles, route_total(route))?;
    let point = coordinates_at_distance(coords, meters)?;

    let name = match input.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => default_waypoint_name(meters_to_miles(meters)),
    };

    Ok(WaypointDraft {
        event_id: event_id.to_string(),
        name,
        waypoint_type: input.waypoint_type,
        latitude: point.latitude,
        longitude: point.longitude,
        elevation: point.elevation,
        distance_from_start: meters,
        order_index: next_order_index(existing, meters),
        stop_time_minutes: input.stop_time_minutes,
        comments: input.comments.clone().unwrap_or_default(),
    })
}

/// User edits to an existing waypoint
#[derive(Debug, Clone, Default)]
pub struct WaypointEdit {
    pub name: Option<String>,
    pub waypoint_type: Option<WaypointType>,
    pub stop_time_minutes: Option<u32>,
    pub comments: Option<String>,
    pub distance_miles: Option<String>,
}

/// Turn an edit into an update body, re-interpolating on a real move.
///
/// START and FINISH may only change type, stop time and comments.
pub fn plan_waypoint_edit(
    waypoint: &Waypoint,
    edit: &WaypointEdit,
    route: Option<&RouteData>,
) -> Result<WaypointUpdate> {
    let mut update = WaypointUpdate {
        name: edit.name.clone(),
        waypoint_type: edit.waypoint_type,
        stop_time_minutes: edit.stop_time_minutes,
        comments: edit.comments.clone(),
        ..Default::default()
    };

    if let Some(name) = &update.name {
        if waypoint.name.as_deref() != Some(name.as_str()) {
            waypoint.ensure_mutable("rename")?;
        } else {
            update.name = None;
        }
    }

    if let Some(input) = &edit.distance_miles {
        let new_miles: f64 = input
            .trim()
            .parse()
            .map_err(|_| PlannerError::invalid_param("Please enter a valid distance"))?;

        if distance_changed(waypoint.distance_from_start, new_miles) {
            waypoint.ensure_mutable("move")?;
            let route = route.ok_or(PlannerError::EmptyRoute)?;
            let coords = route_coords(route)?;
            let meters = validate_distance_miles(input, route_total(route))?;
            let point = coordinates_at_distance(coords, meters)?;

            update.latitude = Some(point.latitude);
            update.longitude = Some(point.longitude);
            update.elevation = Some(point.elevation);
            update.distance_from_start = Some(meters);
        }
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::RouteGeometry;
    use crate::models::GpxMetadata;
    use crate::route::geodesy::route_length;

    fn waypoint(name: &str, order_index: i64, meters: f64) -> Waypoint {
        Waypoint {
            id: format!("w{}", order_index),
            event_id: "e1".into(),
            name: Some(name.into()),
            waypoint_type: WaypointType::Checkpoint,
            latitude: 0.0,
            longitude: 0.0,
            elevation: None,
            stop_time_minutes: 0,
            comments: None,
            order_index: Some(order_index),
            distance_from_start: Some(meters),
            created_at: "2025-01-01T00:00:00".into(),
        }
    }

    fn route() -> RouteData {
        let coords = vec![[39.0, -120.0, 1000.0], [39.1, -120.0, 1400.0], [39.2, -120.0, 1200.0]];
        let total = route_length(&coords);
        RouteData {
            route: Some(RouteGeometry {
                coordinates: coords,
            }),
            metadata: Some(GpxMetadata {
                total_distance_meters: total,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_validate_distance() {
        assert!((validate_distance_miles("1", 5000.0).unwrap() - 1609.34).abs() < 1e-9);
        assert!(validate_distance_miles("abc", 5000.0).is_err());

        let neg = validate_distance_miles("-1", 5000.0).unwrap_err();
        assert!(neg.to_string().contains("negative"));

        let too_far = validate_distance_miles("10", 16093.4 / 2.0).unwrap_err();
        assert!(too_far.to_string().contains("(5.00 mi)"));
    }

    #[test]
    fn test_next_order_index() {
        let wps = vec![
            waypoint("START", 0, 0.0),
            waypoint("Aid 1", 1, 10_000.0),
            waypoint("Aid 2", 2, 20_000.0),
            waypoint("FINISH", 999, 40_000.0),
        ];
        assert_eq!(next_order_index(&wps, 15_000.0), 2);
        assert_eq!(next_order_index(&wps, 5_000.0), 1);
        assert_eq!(next_order_index(&wps, 25_000.0), 3);
        assert_eq!(next_order_index(&[], 25_000.0), 1);
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_waypoint_name(12.34), "Waypoint at 12.3 mi");
    }

    #[test]
    fn test_distance_changed_threshold() {
        let current = Some(miles_to_meters(10.0));
        assert!(!distance_changed(current, 10.005));
        assert!(distance_changed(current, 10.02));
        assert!(distance_changed(None, 0.5));
    }

    #[test]
    fn test_plan_new_waypoint() {
        let route = route();
        let input = NewWaypoint {
            distance_miles: "3".into(),
            waypoint_type: WaypointType::Water,
            stop_time_minutes: 2,
            ..Default::default()
        };
        let existing = vec![waypoint("START", 0, 0.0)];
        let draft = plan_new_waypoint("e1", &input, &route, &existing).unwrap();

        assert_eq!(draft.name, "Waypoint at 3.0 mi");
        assert_eq!(draft.order_index, 1);
        assert!(draft.latitude > 39.0 && draft.latitude < 39.1);
        assert!((draft.distance_from_start - miles_to_meters(3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_plan_new_waypoint_without_route() {
        let input = NewWaypoint {
            distance_miles: "1".into(),
            ..Default::default()
        };
        let err = plan_new_waypoint("e1", &input, &RouteData::default(), &[]).unwrap_err();
        assert!(matches!(err, PlannerError::EmptyRoute));
    }

    #[test]
    fn test_edit_cannot_move_finish() {
        let finish = waypoint("FINISH", 999, 20_000.0);
        let edit = WaypointEdit {
            distance_miles: Some("5".into()),
            ..Default::default()
        };
        let err = plan_waypoint_edit(&finish, &edit, Some(&route())).unwrap_err();
        assert_eq!(err.to_string(), "Cannot move FINISH waypoint");
    }

    #[test]
    fn test_edit_cannot_rename_start() {
        let start = waypoint("START", 0, 0.0);
        let edit = WaypointEdit {
            name: Some("Trailhead".into()),
            ..Default::default()
        };
        assert!(plan_waypoint_edit(&start, &edit, None).is_err());

        let same_name = WaypointEdit {
            name: Some("START".into()),
            stop_time_minutes: Some(3),
            ..Default::default()
        };
        let update = plan_waypoint_edit(&start, &same_name, None).unwrap();
        assert!(update.name.is_none());
        assert_eq!(update.stop_time_minutes, Some(3));
    }

    #[test]
    fn test_small_distance_edit_keeps_coordinates() {
        let wp = waypoint("Aid 1", 1, miles_to_meters(2.0));
        let edit = WaypointEdit {
            distance_miles: Some("2.005".into()),
            ..Default::default()
        };
        let update = plan_waypoint_edit(&wp, &edit, Some(&route())).unwrap();
        assert!(update.latitude.is_none());
        assert!(update.distance_from_start.is_none());
    }

    #[test]
    fn test_distance_edit_reinterpolates() {
        let wp = waypoint("Aid 1", 1, miles_to_meters(2.0));
        let edit = WaypointEdit {
            distance_miles: Some("4".into()),
            ..Default::default()
        };
        let update = plan_waypoint_edit(&wp, &edit, Some(&route())).unwrap();
        assert!(update.latitude.is_some());
        assert!((update.distance_from_start.unwrap() - miles_to_meters(4.0)).abs() < 1e-9);
    }
}
