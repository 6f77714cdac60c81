//! Service tests against a live Postgres
//!
//! Set `DATABASE_URL` to a scratch database to run them; without it each test
//! returns early. Every fixture uses fresh ids and emails, so tests can share
//! one database and run in parallel.

use rust_decimal::Decimal;
use shared::{
    Business, CreateBusinessInput, CreateCustomerInput, CreateOrderInput, CreateOrderItemInput,
    CreateProductInput, CreateUserInput, Order, OrderItem, Product, User,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::*;
use crate::error::AppError;

const TEST_COST: u32 = 4;

async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    Some(pool)
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

async fn user(pool: &PgPool, role: &str) -> User {
    UserService::new(pool.clone(), TEST_COST)
        .create_user(CreateUserInput {
            full_name: Some("Amina Otieno".into()),
            email: Some(format!("{}@test.marketmtaani.com", Uuid::new_v4())),
            password: Some("password123".into()),
            role: Some(role.into()),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn business(pool: &PgPool) -> Business {
    let owner = user(pool, "vendor").await;
    BusinessService::new(pool.clone())
        .create_business(CreateBusinessInput {
            user_id: Some(owner.id),
            business_name: Some("Amina's Kikoi Stall".into()),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn product(pool: &PgPool, business_id: Uuid, price: i64) -> Product {
    ProductService::new(pool.clone())
        .create_product(CreateProductInput {
            business_id: Some(business_id),
            name: Some("Kikoi Wrap".into()),
            price: Some(dec(price)),
            stock_quantity: Some(50),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn order(pool: &PgPool) -> Order {
    let buyer = user(pool, "customer").await;
    let customer = CustomerService::new(pool.clone())
        .create_customer(CreateCustomerInput {
            user_id: Some(buyer.id),
            customer_type: Some("RETAILER".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    OrderService::new(pool.clone())
        .create_order(CreateOrderInput {
            customer_id: Some(customer.id),
            total_amount: Some(dec(0)),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn item(pool: &PgPool, order_id: Uuid, product: &Product, quantity: i32) -> OrderItem {
    OrderItemService::new(pool.clone())
        .create_order_item(CreateOrderItemInput {
            order_id: Some(order_id),
            product_id: Some(product.id),
            quantity: Some(quantity),
            unit_price: Some(product.price),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_revenue_of_unknown_business_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let err = AggregationService::new(pool)
        .business_total_revenue(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_unsold_product_and_business_report_zero() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    let kikoi = product(&pool, shop.id, 1500).await;
    let service = AggregationService::new(pool);

    let sold = service.product_total_units_sold(kikoi.id).await.unwrap();
    assert_eq!(sold.total_units_sold, 0);

    let revenue = service.business_total_revenue(shop.id).await.unwrap();
    assert_eq!(revenue.total_revenue, Decimal::ZERO);
}

#[tokio::test]
async fn test_revenue_and_units_over_stored_items() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    let dress = product(&pool, shop.id, 3500).await;
    let scarf = product(&pool, shop.id, 1000).await;
    let first = order(&pool).await;
    let second = order(&pool).await;
    item(&pool, first.id, &dress, 2).await;
    item(&pool, second.id, &scarf, 30).await;

    let service = AggregationService::new(pool);
    let revenue = service.business_total_revenue(shop.id).await.unwrap();
    assert_eq!(revenue.total_revenue, dec(37000));

    let sold = service.product_total_units_sold(scarf.id).await.unwrap();
    assert_eq!(sold.total_units_sold, 30);

    let report = service.revenue_report().await.unwrap();
    let row = report
        .iter()
        .find(|row| row.business_id == shop.id)
        .expect("business in report");
    assert_eq!(row.total_revenue, dec(37000));
    assert_eq!(row.units_sold, 32);
}

#[tokio::test]
async fn test_business_delete_cascades_to_products_and_items() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    let dress = product(&pool, shop.id, 3500).await;
    let basket = order(&pool).await;
    let sold = item(&pool, basket.id, &dress, 2).await;

    let summary = BusinessService::new(pool.clone())
        .delete_business(shop.id)
        .await
        .unwrap();
    assert_eq!(summary.businesses, 1);
    assert_eq!(summary.products, 1);
    assert_eq!(summary.order_items, 1);
    assert_eq!(summary.orders, 0);
    assert_eq!(summary.users, 0);

    let err = ProductService::new(pool.clone())
        .get_product(dress.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = OrderItemService::new(pool.clone())
        .get_order_item(sold.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // The buyer's order and the vendor's account survive
    assert!(OrderService::new(pool.clone()).get_order(basket.id).await.is_ok());
    assert!(UserService::new(pool, TEST_COST)
        .get_user(shop.user_id)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_user_delete_removes_owned_profiles() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    product(&pool, shop.id, 800).await;

    let summary = UserService::new(pool.clone(), TEST_COST)
        .delete_user(shop.user_id)
        .await
        .unwrap();
    assert_eq!(summary.users, 1);
    assert_eq!(summary.businesses, 1);
    assert_eq!(summary.products, 1);

    let err = BusinessService::new(pool)
        .get_business(shop.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_deleting_missing_record_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let err = ProductService::new(pool)
        .delete_product(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let existing = user(&pool, "customer").await;
    let err = UserService::new(pool, TEST_COST)
        .create_user(CreateUserInput {
            full_name: Some("Someone Else".into()),
            email: Some(existing.email.clone()),
            password: Some("password123".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    match err {
        AppError::Conflict { resource, .. } => assert_eq!(resource, "users_email_key"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dangling_reference_is_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let err = ProductService::new(pool)
        .create_product(CreateProductInput {
            business_id: Some(Uuid::new_v4()),
            name: Some("Orphan".into()),
            price: Some(dec(10)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_check_violation_names_the_column() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    let dress = product(&pool, shop.id, 3500).await;
    let basket = order(&pool).await;

    // Straight to the table, past the validators
    let err: AppError = sqlx::query(
        r#"
        INSERT INTO order_items (order_id, product_id, quantity, unit_price)
        VALUES ($1, $2, 1, 0)
        "#,
    )
    .bind(basket.id)
    .bind(dress.id)
    .execute(&pool)
    .await
    .unwrap_err()
    .into();
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "unit_price"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_price_beyond_column_is_rejected_before_storage() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;
    let err = ProductService::new(pool)
        .create_product(CreateProductInput {
            business_id: Some(shop.id),
            name: Some("Gold Jewellery Set".into()),
            price: Some(dec(100_000_000)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "price"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_numeric_overflow_is_validation_error() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let shop = business(&pool).await;

    let err: AppError = sqlx::query(
        r#"
        INSERT INTO products (business_id, name, price)
        VALUES ($1, 'Oversized', 1000000000)
        "#,
    )
    .bind(shop.id)
    .execute(&pool)
    .await
    .unwrap_err()
    .into();
    assert!(matches!(err, AppError::Validation { .. }));
}
