use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::product::Product;
use entrega_primitives::schema::products;
use uuid::Uuid;

pub struct ProductRepository;

impl ProductRepository {
    pub fn find_by_ids(
        conn: &mut PgConnection,
        product_ids: &[Uuid],
    ) -> Result<Vec<Product>, ApiError> {
        products::table
            .filter(products::id.eq_any(product_ids))
            .select(Product::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }
}
