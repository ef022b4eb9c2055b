//! Seeds demo data for local development: a handful of warehouse products
//! and one verified courier account.

use diesel::prelude::*;
use entrega_core::services::auth_service::SignupService;
use entrega_primitives::models::entities::product::NewProduct;
use entrega_primitives::models::entities::user::NewUser;
use entrega_primitives::schema::{products, users};
use eyre::Report;
use secrecy::SecretString;
use tracing::info;

const DEMO_PRODUCTS: &[(&str, &str)] = &[
    ("Standing desk", "120x80cm, oak finish"),
    ("Monitor 27\"", "4K IPS panel"),
    ("Mechanical keyboard", "ISO layout, brown switches"),
    ("Laptop stand", "Aluminium, foldable"),
];

fn main() -> Result<(), Report> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let db_url = std::env::var("DATABASE_URL").map_err(|_| eyre::eyre!("DATABASE_URL must be set"))?;
    let mut conn = PgConnection::establish(&db_url)?;

    seed_products(&mut conn)?;
    seed_demo_user(&mut conn)?;

    info!("Seeding complete");
    Ok(())
}

fn seed_products(conn: &mut PgConnection) -> Result<(), Report> {
    let existing: i64 = products::table.count().get_result(conn)?;
    if existing > 0 {
        info!("Products already present ({}), skipping", existing);
        return Ok(());
    }

    let rows: Vec<NewProduct> = DEMO_PRODUCTS
        .iter()
        .map(|(name, description)| NewProduct {
            name,
            description: Some(description),
        })
        .collect();

    let inserted = diesel::insert_into(products::table)
        .values(&rows)
        .execute(conn)?;
    info!("Seeded {} products", inserted);
    Ok(())
}

fn seed_demo_user(conn: &mut PgConnection) -> Result<(), Report> {
    let email = "courier@entrega.app";

    let exists: i64 = users::table
        .filter(users::email.eq(email))
        .count()
        .get_result(conn)?;
    if exists > 0 {
        info!("Demo user already present, skipping");
        return Ok(());
    }

    let password = SecretString::from("Courier1");
    let password_hash =
        SignupService::hash_password(&password).map_err(|e| eyre::eyre!("{}", e))?;

    diesel::insert_into(users::table)
        .values(&NewUser {
            email,
            password_hash: &password_hash,
            first_name: "Demo",
            last_name: "Courier",
            email_verified: true,
        })
        .execute(conn)?;

    info!("Seeded demo user {} (password: Courier1)", email);
    Ok(())
}
