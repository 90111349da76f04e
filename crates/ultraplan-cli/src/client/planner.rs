//! Typed planner endpoints

use std::path::Path;

use bytes::Bytes;
use futures_util::Stream;

use super::api::PlannerClient;
use crate::error::Result;
use crate::models::{
    CalculatedLeg, CalculationResult, ChatRequest, ChatSession, Comparison, Document, Event,
    EventDraft, EventUpdate, RouteData, Settings, SettingsUpdate, UploadResponse, Waypoint,
    WaypointDraft, WaypointUpdate,
};

impl PlannerClient {
    // Events

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.get_json("/api/events").await
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        self.get_json(&format!("/api/events/{}", event_id)).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        self.post_json("/api/events", draft).await
    }

    pub async fn update_event(&self, event_id: &str, update: &EventUpdate) -> Result<Event> {
        self.put_json(&format!("/api/events/{}", event_id), update)
            .await
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.delete(&format!("/api/events/{}", event_id)).await
    }

    pub async fn upload_gpx(&self, event_id: &str, file: &Path) -> Result<UploadResponse> {
        self.upload(&format!("/api/events/{}/upload-gpx", event_id), file)
            .await
    }

    pub async fn upload_actual(&self, event_id: &str, file: &Path) -> Result<UploadResponse> {
        self.upload(&format!("/api/events/{}/upload-actual", event_id), file)
            .await
    }

    pub async fn get_route(&self, event_id: &str) -> Result<RouteData> {
        self.get_json(&format!("/api/events/{}/route", event_id))
            .await
    }

    pub async fn list_waypoints(&self, event_id: &str) -> Result<Vec<Waypoint>> {
        self.get_json(&format!("/api/events/{}/waypoints", event_id))
            .await
    }

    // Waypoints

    pub async fn get_waypoint(&self, waypoint_id: &str) -> Result<Waypoint> {
        self.get_json(&format!("/api/waypoints/{}", waypoint_id))
            .await
    }

    pub async fn create_waypoint(&self, draft: &WaypointDraft) -> Result<Waypoint> {
        self.post_json("/api/waypoints", draft).await
    }

    pub async fn update_waypoint(
        &self,
        waypoint_id: &str,
        update: &WaypointUpdate,
    ) -> Result<Waypoint> {
        self.put_json(&format!("/api/waypoints/{}", waypoint_id), update)
            .await
    }

    pub async fn delete_waypoint(&self, waypoint_id: &str) -> Result<()> {
        self.delete(&format!("/api/waypoints/{}", waypoint_id))
            .await
    }

    // Calculations

    pub async fn calculate(&self, event_id: &str) -> Result<CalculationResult> {
        self.post_empty(&format!(
            "/api/calculations/events/{}/calculate",
            event_id
        ))
        .await
    }

    pub async fn get_legs(&self, event_id: &str) -> Result<Vec<CalculatedLeg>> {
        self.get_json(&format!("/api/calculations/events/{}/legs", event_id))
            .await
    }

    pub async fn get_comparison(&self, event_id: &str) -> Result<Comparison> {
        self.get_json(&format!(
            "/api/calculations/events/{}/comparison",
            event_id
        ))
        .await
    }

    // Documents

    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        self.get_json("/api/documents").await
    }

    pub async fn get_document(&self, document_id: &str) -> Result<Document> {
        self.get_json(&format!("/api/documents/{}", document_id))
            .await
    }

    pub async fn upload_document(&self, file: &Path) -> Result<Document> {
        self.upload("/api/documents/upload", file).await
    }

    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        self.delete(&format!("/api/documents/{}", document_id))
            .await
    }

    // Settings

    pub async fn get_settings(&self) -> Result<Settings> {
        self.get_json("/api/settings").await
    }

    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        self.put_json("/api/settings", update).await
    }

    // Chat

    /// Start a chat turn; the body is an SSE byte stream
    pub async fn chat_stream(
        &self,
        request: &ChatRequest,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        self.post_stream("/api/chat", request).await
    }

    pub async fn list_chat_sessions(&self, event_id: Option<&str>) -> Result<Vec<ChatSession>> {
        match event_id {
            Some(id) => {
                self.get_json_query("/api/chat/sessions", &[("event_id", id)])
                    .await
            }
            None => self.get_json("/api/chat/sessions").await,
        }
    }

    pub async fn get_chat_session(&self, session_id: &str) -> Result<ChatSession> {
        self.get_json(&format!("/api/chat/sessions/{}", session_id))
            .await
    }

    pub async fn delete_chat_session(&self, session_id: &str) -> Result<()> {
        self.delete(&format!("/api/chat/sessions/{}", session_id))
            .await
    }
}
