use crate::models::enum_types::DeliveryStatus;
use crate::schema::{deliveries, delivery_products};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// The shippable unit, linked 1:1 to its Route. The PIN is fixed at
/// creation and is the sole secret gating the DELIVERED transition; the QR
/// artifact is derived from the id after the first insert.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(belongs_to(crate::models::entities::route::Route))]
#[diesel(table_name = deliveries)]
pub struct Delivery {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub destination: Option<String>,
    pub package_location: String,
    pub pin: String,
    pub qr_code: Option<String>,
    pub created_date: DateTime<Utc>,
    pub delivery_start_date: Option<DateTime<Utc>>,
    pub delivery_end_date: Option<DateTime<Utc>>,
    pub route_id: Uuid,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = deliveries)]
pub struct NewDelivery<'a> {
    pub status: DeliveryStatus,
    pub destination: Option<&'a str>,
    pub package_location: &'a str,
    pub pin: &'a str,
    pub route_id: Uuid,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = delivery_products)]
pub struct NewDeliveryProduct {
    pub delivery_id: Uuid,
    pub product_id: Uuid,
}
