//! Data models for the planner backend API

pub mod chat;
pub mod comparison;
pub mod document;
pub mod event;
pub mod leg;
pub mod route;
pub mod settings;
pub mod waypoint;

pub use chat::{ChatEvent, ChatMessage, ChatRequest, ChatSession, ChatSource, SearchInfo};
pub use comparison::{Comparison, ComparisonSummary, LegComparison, StoredRoute};
pub use document::Document;
pub use event::{Event, EventDraft, EventUpdate, FileTiming, GpxMetadata, UploadResponse};
pub use leg::{CalculatedLeg, CalculationResult};
pub use route::{Coordinate, RouteData};
pub use settings::{Settings, SettingsUpdate};
pub use waypoint::{Waypoint, WaypointDraft, WaypointType, WaypointUpdate};
