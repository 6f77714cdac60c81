//! Transactional cascade deletes
//!
//! Loads the ownership graph below a delete root, plans the cascade and
//! deletes leaf-first in one transaction. A failure at any step drops the
//! transaction, which rolls every delete back.

use shared::{CascadePlan, DeleteRoot, DeletionSummary, OrderItemLink, OwnedBy, OwnershipGraph};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CascadeService {
    db: PgPool,
}

impl CascadeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Delete `root` and every record it owns
    pub async fn delete(&self, root: DeleteRoot) -> AppResult<DeletionSummary> {
        let mut tx = self.db.begin().await?;

        lock_root(&mut tx, root).await?;
        let graph = load_graph(&mut tx, root).await?;
        let plan = graph.plan(root);
        let summary = execute(&mut tx, &plan).await?;

        tx.commit().await?;

        tracing::info!(?root, ?summary, "Cascade delete committed");
        Ok(summary)
    }
}

/// Lock the root row, failing with NotFound when it does not exist
async fn lock_root(tx: &mut Transaction<'_, Postgres>, root: DeleteRoot) -> AppResult<()> {
    let (sql, id, resource) = match root {
        DeleteRoot::User(id) => ("SELECT id FROM users WHERE id = $1 FOR UPDATE", id, "User"),
        DeleteRoot::Business(id) => (
            "SELECT id FROM businesses WHERE id = $1 FOR UPDATE",
            id,
            "Business",
        ),
        DeleteRoot::Customer(id) => (
            "SELECT id FROM customers WHERE id = $1 FOR UPDATE",
            id,
            "Customer",
        ),
        DeleteRoot::Product(id) => (
            "SELECT id FROM products WHERE id = $1 FOR UPDATE",
            id,
            "Product",
        ),
        DeleteRoot::Order(id) => ("SELECT id FROM orders WHERE id = $1 FOR UPDATE", id, "Order"),
        DeleteRoot::OrderItem(id) => (
            "SELECT id FROM order_items WHERE id = $1 FOR UPDATE",
            id,
            "Order item",
        ),
    };

    sqlx::query_scalar::<_, Uuid>(sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(resource))?;

    Ok(())
}

/// Load every ownership edge reachable from `root`
async fn load_graph(
    tx: &mut Transaction<'_, Postgres>,
    root: DeleteRoot,
) -> AppResult<OwnershipGraph> {
    let mut graph = OwnershipGraph::default();

    let user_ids: Vec<Uuid> = match root {
        DeleteRoot::User(id) => vec![id],
        _ => Vec::new(),
    };

    graph.businesses = sqlx::query_as::<_, OwnedBy>(
        "SELECT id, user_id AS owner_id FROM businesses WHERE user_id = ANY($1)",
    )
    .bind(&user_ids)
    .fetch_all(&mut **tx)
    .await?;

    graph.customers = sqlx::query_as::<_, OwnedBy>(
        "SELECT id, user_id AS owner_id FROM customers WHERE user_id = ANY($1)",
    )
    .bind(&user_ids)
    .fetch_all(&mut **tx)
    .await?;

    let mut business_ids: Vec<Uuid> = graph.businesses.iter().map(|b| b.id).collect();
    if let DeleteRoot::Business(id) = root {
        business_ids.push(id);
    }
    graph.products = sqlx::query_as::<_, OwnedBy>(
        "SELECT id, business_id AS owner_id FROM products WHERE business_id = ANY($1)",
    )
    .bind(&business_ids)
    .fetch_all(&mut **tx)
    .await?;

    let mut customer_ids: Vec<Uuid> = graph.customers.iter().map(|c| c.id).collect();
    if let DeleteRoot::Customer(id) = root {
        customer_ids.push(id);
    }
    graph.orders = sqlx::query_as::<_, OwnedBy>(
        "SELECT id, customer_id AS owner_id FROM orders WHERE customer_id = ANY($1)",
    )
    .bind(&customer_ids)
    .fetch_all(&mut **tx)
    .await?;

    let mut product_ids: Vec<Uuid> = graph.products.iter().map(|p| p.id).collect();
    if let DeleteRoot::Product(id) = root {
        product_ids.push(id);
    }
    let mut order_ids: Vec<Uuid> = graph.orders.iter().map(|o| o.id).collect();
    if let DeleteRoot::Order(id) = root {
        order_ids.push(id);
    }
    graph.order_items = sqlx::query_as::<_, OrderItemLink>(
        r#"
        SELECT id, order_id, product_id
        FROM order_items
        WHERE order_id = ANY($1) OR product_id = ANY($2)
        FOR UPDATE
        "#,
    )
    .bind(&order_ids)
    .bind(&product_ids)
    .fetch_all(&mut **tx)
    .await?;

    Ok(graph)
}

/// Delete the planned rows, children before parents
async fn execute(
    tx: &mut Transaction<'_, Postgres>,
    plan: &CascadePlan,
) -> AppResult<DeletionSummary> {
    Ok(DeletionSummary {
        order_items: delete_ids(tx, "order_items", &plan.order_item_ids()).await?,
        orders: delete_ids(tx, "orders", &plan.order_ids()).await?,
        products: delete_ids(tx, "products", &plan.product_ids()).await?,
        customers: delete_ids(tx, "customers", &plan.customer_ids()).await?,
        businesses: delete_ids(tx, "businesses", &plan.business_ids()).await?,
        users: delete_ids(tx, "users", &plan.user_ids()).await?,
    })
}

async fn delete_ids(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    ids: &[Uuid],
) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ANY($1)"))
        .bind(ids)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
