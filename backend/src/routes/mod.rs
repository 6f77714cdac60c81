//! Route definitions for the marketplace API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/users", user_routes())
        .nest("/businesses", business_routes())
        .nest("/customers", customer_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/order-items", order_item_routes())
        .nest("/reports", report_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
}

fn business_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_businesses).post(handlers::create_business),
        )
        .route(
            "/:business_id",
            get(handlers::get_business)
                .patch(handlers::update_business)
                .delete(handlers::delete_business),
        )
        .route("/:business_id/total_revenue", get(handlers::get_total_revenue))
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/:customer_id",
            get(handlers::get_customer)
                .patch(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .patch(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/total_sold", get(handlers::get_total_sold))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order)
                .patch(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route(
            "/:order_id/items",
            get(handlers::list_order_items_of_order).post(handlers::add_order_item),
        )
}

fn order_item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_order_items).post(handlers::create_order_item),
        )
        .route(
            "/:item_id",
            get(handlers::get_order_item)
                .patch(handlers::update_order_item)
                .delete(handlers::delete_order_item),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new().route("/revenue", get(handlers::get_revenue_report))
}
