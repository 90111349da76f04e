pub mod chat;
pub mod compare;
pub mod config;
pub mod documents;
pub mod events;
pub mod plan;
pub mod settings;
pub mod waypoints;

pub use chat::{delete_session as delete_chat_session, repl as chat_repl, send as send_chat};
pub use compare::{map as comparison_map, show as show_comparison};
pub use events::EventFields;
pub use plan::{calculate as calculate_plan, show as show_plan};
pub use settings::{set as update_settings, show as show_settings};
