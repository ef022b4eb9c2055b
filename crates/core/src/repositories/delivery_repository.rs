use chrono::Utc;
use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::delivery::{Delivery, NewDelivery, NewDeliveryProduct};
use entrega_primitives::models::entities::product::Product;
use entrega_primitives::models::enum_types::DeliveryStatus;
use entrega_primitives::schema::{deliveries, delivery_products, products, routes};
use uuid::Uuid;

pub struct DeliveryRepository;

impl DeliveryRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_delivery: NewDelivery,
    ) -> Result<Delivery, ApiError> {
        diesel::insert_into(deliveries::table)
            .values(&new_delivery)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        delivery_id: Uuid,
    ) -> Result<Option<Delivery>, ApiError> {
        deliveries::table
            .find(delivery_id)
            .select(Delivery::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Second phase of creation: the QR artifact needs the generated id.
    pub fn set_qr_code(
        conn: &mut PgConnection,
        delivery_id: Uuid,
        qr_code: &str,
    ) -> Result<Delivery, ApiError> {
        diesel::update(deliveries::table.find(delivery_id))
            .set(deliveries::qr_code.eq(qr_code))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn link_products(
        conn: &mut PgConnection,
        delivery_id: Uuid,
        product_ids: &[Uuid],
    ) -> Result<(), ApiError> {
        let rows: Vec<NewDeliveryProduct> = product_ids
            .iter()
            .map(|product_id| NewDeliveryProduct {
                delivery_id,
                product_id: *product_id,
            })
            .collect();

        diesel::insert_into(delivery_products::table)
            .values(&rows)
            .execute(conn)
            .map(|_| ())
            .map_err(ApiError::from)
    }

    pub fn products_for(
        conn: &mut PgConnection,
        delivery_id: Uuid,
    ) -> Result<Vec<Product>, ApiError> {
        delivery_products::table
            .inner_join(products::table)
            .filter(delivery_products::delivery_id.eq(delivery_id))
            .select(Product::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        delivery_id: Uuid,
        status: DeliveryStatus,
    ) -> Result<Delivery, ApiError> {
        diesel::update(deliveries::table.find(delivery_id))
            .set(deliveries::status.eq(status))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_delivered(
        conn: &mut PgConnection,
        delivery_id: Uuid,
    ) -> Result<Delivery, ApiError> {
        diesel::update(deliveries::table.find(delivery_id))
            .set((
                deliveries::status.eq(DeliveryStatus::Delivered),
                deliveries::delivery_end_date.eq(Utc::now()),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Warehouse view: packages whose route nobody has claimed yet.
    pub fn find_unassigned(conn: &mut PgConnection) -> Result<Vec<Delivery>, ApiError> {
        deliveries::table
            .inner_join(routes::table)
            .filter(routes::assigned_to.is_null())
            .filter(deliveries::status.eq(DeliveryStatus::NotDelivered))
            .select(Delivery::as_select())
            .order(deliveries::created_date.asc())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Delivery>, ApiError> {
        deliveries::table
            .inner_join(routes::table)
            .filter(routes::assigned_to.eq(user_id))
            .select(Delivery::as_select())
            .order(deliveries::created_date.desc())
            .load(conn)
            .map_err(ApiError::from)
    }
}
