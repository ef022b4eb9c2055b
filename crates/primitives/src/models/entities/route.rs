use crate::models::enum_types::RouteStatus;
use crate::schema::routes;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// A physical transport leg. Created PENDING with no assignee; a courier
/// claims it (INITIATED) and either completes or cancellation ends it.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = routes)]
pub struct Route {
    pub id: Uuid,
    pub description: Option<String>,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub status: RouteStatus,
    pub assigned_to: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = routes)]
pub struct NewRoute<'a> {
    pub description: Option<&'a str>,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub status: RouteStatus,
}
