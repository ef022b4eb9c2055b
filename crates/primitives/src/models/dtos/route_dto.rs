use crate::models::entities::route::Route;
use crate::models::enum_types::RouteStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRouteRequest {
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub destination_latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub destination_longitude: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteDto {
    pub id: Uuid,
    pub description: String,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub status: RouteStatus,
    pub assigned_to_email: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl RouteDto {
    /// `assignee_email` comes from the left join against users; both it and
    /// the description render as empty strings when absent.
    pub fn from_parts(route: &Route, assignee_email: Option<&str>) -> Self {
        Self {
            id: route.id,
            description: route.description.clone().unwrap_or_default(),
            destination_latitude: route.destination_latitude,
            destination_longitude: route.destination_longitude,
            status: route.status,
            assigned_to_email: assignee_email.unwrap_or_default().to_string(),
            started_at: route.started_at,
            completed_at: route.completed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableRouteDto {
    pub id: Uuid,
    pub description: String,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub status: RouteStatus,
}

impl From<&Route> for AvailableRouteDto {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id,
            description: route.description.clone().unwrap_or_default(),
            destination_latitude: route.destination_latitude,
            destination_longitude: route.destination_longitude,
            status: route.status,
        }
    }
}
