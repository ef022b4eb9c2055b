use crate::app_state::AppState;
use crate::notifications::DeliveryEvent;
use crate::qr;
use crate::repositories::{DeliveryRepository, ProductRepository, RouteRepository, UserRepository};
use crate::secrets;
use diesel::{Connection, PgConnection};
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::delivery_dto::{
    CreateDeliveryRequest, DeliveryDto, WarehousePackageDto,
};
use entrega_primitives::models::dtos::route_dto::RouteDto;
use entrega_primitives::models::entities::delivery::{Delivery, NewDelivery};
use entrega_primitives::models::entities::route::NewRoute;
use entrega_primitives::models::enum_types::{DeliveryStatus, RouteStatus};
use http::StatusCode;
use std::collections::BTreeSet;
use tracing::{error, info};
use uuid::Uuid;

pub struct DeliveryService;

impl DeliveryService {
    /// Creation is two-phase by necessity (the QR artifact needs the
    /// generated id), so route insert, delivery insert, product links and
    /// the QR update all ride one transaction: a failure anywhere leaves
    /// no orphan route. Storage problems surface as a single opaque
    /// internal error.
    pub async fn create_delivery(
        state: &AppState,
        payload: CreateDeliveryRequest,
    ) -> Result<DeliveryDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let product_ids: Vec<Uuid> = payload
            .product_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let products = ProductRepository::find_by_ids(&mut conn, &product_ids)?;
        if products.len() != product_ids.len() {
            return Err(ApiError::invalid_state(
                "INVALID_PRODUCTS",
                "One or more referenced products do not exist",
            ));
        }

        let pin = secrets::generate_code();

        let delivery = conn
            .transaction::<Delivery, ApiError, _>(|conn| {
                let route = RouteRepository::create(
                    conn,
                    NewRoute {
                        description: None,
                        destination_latitude: payload.destination_latitude,
                        destination_longitude: payload.destination_longitude,
                        status: RouteStatus::Pending,
                    },
                )?;

                let delivery = DeliveryRepository::create(
                    conn,
                    NewDelivery {
                        status: DeliveryStatus::NotDelivered,
                        destination: None,
                        package_location: &payload.package_location,
                        pin: &pin,
                        route_id: route.id,
                    },
                )?;

                DeliveryRepository::link_products(conn, delivery.id, &product_ids)?;

                let qr_code = qr::encode_delivery_qr(delivery.id)?;
                DeliveryRepository::set_qr_code(conn, delivery.id, &qr_code)
            })
            .map_err(|e| {
                error!("delivery creation failed: {}", e);
                ApiError::Internal("An internal error occurred while creating the delivery".into())
            })?;

        info!(delivery_id = %delivery.id, "delivery created");

        state.notifier.dispatch(DeliveryEvent::Created {
            delivery_id: delivery.id,
            package_location: delivery.package_location.clone(),
        });

        Self::to_dto(&mut conn, delivery)
    }

    /// The PIN is the sole gate to DELIVERED. On a match the delivery and
    /// its route transition together or not at all.
    pub fn confirm_delivery(
        conn: &mut PgConnection,
        delivery_id: Uuid,
        pin: &str,
    ) -> Result<(), ApiError> {
        let delivery = Self::find_delivery(conn, delivery_id)?;

        if delivery.pin != pin {
            return Err(ApiError::invalid_secret(
                "INVALID_PIN",
                "Invalid pin",
                StatusCode::BAD_REQUEST,
            ));
        }

        conn.transaction::<_, ApiError, _>(|conn| {
            DeliveryRepository::mark_delivered(conn, delivery.id)?;
            RouteRepository::mark_completed(conn, delivery.route_id)?;
            Ok(())
        })?;

        info!(delivery_id = %delivery.id, "delivery confirmed");
        Ok(())
    }

    pub async fn cancel_delivery(state: &AppState, delivery_id: Uuid) -> Result<(), ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let delivery = Self::find_delivery(&mut conn, delivery_id)?;
        let route = RouteRepository::find_by_id(&mut conn, delivery.route_id)?;

        conn.transaction::<_, ApiError, _>(|conn| {
            DeliveryRepository::set_status(conn, delivery.id, DeliveryStatus::RejectedByUser)?;
            RouteRepository::cancel(conn, delivery.route_id)?;
            Ok(())
        })?;

        info!(delivery_id = %delivery.id, "delivery cancelled");

        if let Some(route) = route {
            if let Some(assigned_to) = route.assigned_to {
                state.notifier.dispatch(DeliveryEvent::Cancelled {
                    delivery_id: delivery.id,
                    description: route.description.unwrap_or_default(),
                    assigned_to,
                });
            }
        }

        Ok(())
    }

    pub fn get_delivery(
        conn: &mut PgConnection,
        delivery_id: Uuid,
    ) -> Result<DeliveryDto, ApiError> {
        let delivery = Self::find_delivery(conn, delivery_id)?;
        Self::to_dto(conn, delivery)
    }

    pub fn warehouse_packages(
        conn: &mut PgConnection,
    ) -> Result<Vec<WarehousePackageDto>, ApiError> {
        let deliveries = DeliveryRepository::find_unassigned(conn)?;
        Ok(deliveries.iter().map(WarehousePackageDto::from).collect())
    }

    pub fn deliveries_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<DeliveryDto>, ApiError> {
        let deliveries = DeliveryRepository::find_by_user(conn, user_id)?;
        deliveries
            .into_iter()
            .map(|delivery| Self::to_dto(conn, delivery))
            .collect()
    }

    fn find_delivery(conn: &mut PgConnection, delivery_id: Uuid) -> Result<Delivery, ApiError> {
        DeliveryRepository::find_by_id(conn, delivery_id)?
            .ok_or_else(|| ApiError::not_found("DELIVERY_NOT_FOUND", "Delivery not found"))
    }

    fn to_dto(conn: &mut PgConnection, delivery: Delivery) -> Result<DeliveryDto, ApiError> {
        let products = DeliveryRepository::products_for(conn, delivery.id)?;

        let route = match RouteRepository::find_by_id(conn, delivery.route_id)? {
            Some(route) => {
                let email = match route.assigned_to {
                    Some(user_id) => {
                        UserRepository::find_by_id(conn, user_id)?.map(|u| u.email)
                    }
                    None => None,
                };
                Some(RouteDto::from_parts(&route, email.as_deref()))
            }
            None => None,
        };

        Ok(DeliveryDto::from_parts(&delivery, &products, route))
    }
}
