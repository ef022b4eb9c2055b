use crate::models::dtos::route_dto::RouteDto;
use crate::models::entities::delivery::Delivery;
use crate::models::entities::product::Product;
use crate::models::enum_types::DeliveryStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryRequest {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub package_location: String,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    #[validate(length(min = 1, message = "must reference at least one product"))]
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryDto {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub destination: Option<String>,
    pub package_location: String,
    pub pin: String,
    pub qr_code: Option<String>,
    pub created_date: DateTime<Utc>,
    pub delivery_start_date: Option<DateTime<Utc>>,
    pub delivery_end_date: Option<DateTime<Utc>>,
    pub products: Vec<ProductDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteDto>,
}

impl DeliveryDto {
    pub fn from_parts(delivery: &Delivery, products: &[Product], route: Option<RouteDto>) -> Self {
        Self {
            id: delivery.id,
            status: delivery.status,
            destination: delivery.destination.clone(),
            package_location: delivery.package_location.clone(),
            pin: delivery.pin.clone(),
            qr_code: delivery.qr_code.clone(),
            created_date: delivery.created_date,
            delivery_start_date: delivery.delivery_start_date,
            delivery_end_date: delivery.delivery_end_date,
            products: products.iter().map(ProductDto::from).collect(),
            route,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WarehousePackageDto {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub package_location: String,
    pub created_date: DateTime<Utc>,
}

impl From<&Delivery> for WarehousePackageDto {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id,
            status: delivery.status,
            package_location: delivery.package_location.clone(),
            created_date: delivery.created_date,
        }
    }
}
