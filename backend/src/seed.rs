//! Demo marketplace data
//!
//! `marketplace-server seed` clears every table and loads a small Eastleigh
//! marketplace: five vendors, two customers and a couple of orders. Records
//! go through the same validation as API input and are written in one
//! transaction.

use rust_decimal::Decimal;
use shared::{
    CreateBusinessInput, CreateCustomerInput, CreateOrderInput, CreateOrderItemInput,
    CreateProductInput, CreateUserInput, NewBusiness, NewCustomer, NewOrder, NewOrderItem,
    NewProduct, NewUser,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::AppResult;

const SEED_PASSWORD: &str = "password123";

/// (full name, email, phone, role)
const USERS: &[(&str, &str, &str, &str)] = &[
    ("Fatuma Mohamed", "fatuma@marketmtaani.com", "0712345678", "vendor"),
    ("Ahmed Hassan", "ahmed@marketmtaani.com", "0723456789", "vendor"),
    ("Halima Ibrahim", "halima@marketmtaani.com", "0734567890", "vendor"),
    ("Amina Ali", "amina@marketmtaani.com", "0745678901", "vendor"),
    ("Hassan Abdi", "hassan@marketmtaani.com", "0756789012", "vendor"),
    ("Grace Wanjiru", "grace@marketmtaani.com", "0767890123", "customer"),
    ("John Kamau", "john@marketmtaani.com", "0778901234", "customer"),
];

/// (owner user index, name, verification status, rating)
const BUSINESSES: &[(usize, &str, &str, &str)] = &[
    (0, "Fatuma's Fashion House", "verified", "4.8"),
    (1, "Ahmed's Shoe Palace", "verified", "4.7"),
    (2, "Halima's Perfume Paradise", "verified", "4.9"),
    (3, "Amina's Jewelry & Accessories", "verified", "4.6"),
    (4, "Hassan's Style Hub", "pending", "4.5"),
];

struct ProductSeed {
    business: usize,
    name: &'static str,
    description: &'static str,
    price: i64,
    bulk: Option<(i64, i32)>,
    stock: i32,
    category: i32,
}

const fn product(
    business: usize,
    name: &'static str,
    description: &'static str,
    price: i64,
    bulk: Option<(i64, i32)>,
    stock: i32,
    category: i32,
) -> ProductSeed {
    ProductSeed {
        business,
        name,
        description,
        price,
        bulk,
        stock,
        category,
    }
}

const PRODUCTS: &[ProductSeed] = &[
    // Clothing
    product(
        0,
        "Elegant Evening Dress",
        "Beautiful evening dress perfect for special occasions",
        3500,
        Some((3000, 5)),
        25,
        1,
    ),
    product(
        0,
        "Ladies Casual Blouse",
        "Comfortable and stylish casual blouse",
        1200,
        Some((1000, 10)),
        50,
        1,
    ),
    product(
        0,
        "Men's Formal Suit",
        "Premium quality formal suit for men",
        8500,
        None,
        15,
        1,
    ),
    product(
        0,
        "Women's Maxi Dress",
        "Flowing maxi dress in vibrant colors",
        2800,
        Some((2500, 8)),
        30,
        1,
    ),
    product(
        0,
        "Men's Casual Shirt",
        "Cotton casual shirt for everyday wear",
        1500,
        Some((1300, 10)),
        40,
        1,
    ),
    // Footwear
    product(
        1,
        "Ladies High Heels",
        "Elegant high heels for special occasions",
        3200,
        Some((2800, 6)),
        20,
        2,
    ),
    product(
        1,
        "Men's Leather Shoes",
        "Premium leather formal shoes",
        4500,
        None,
        18,
        2,
    ),
    product(
        1,
        "Ladies Sandals",
        "Comfortable summer sandals",
        1800,
        Some((1500, 10)),
        45,
        2,
    ),
    product(
        1,
        "Men's Sneakers",
        "Sporty and comfortable sneakers",
        3800,
        None,
        25,
        2,
    ),
    product(1, "Ladies Boots", "Stylish ankle boots", 4200, None, 12, 2),
    // Perfumes
    product(
        2,
        "Luxury French Perfume",
        "Exquisite long-lasting fragrance",
        5500,
        None,
        30,
        3,
    ),
    product(
        2,
        "Arabian Oud Perfume",
        "Traditional Arabian oud fragrance",
        6200,
        None,
        20,
        3,
    ),
    product(
        2,
        "Floral Body Spray",
        "Fresh floral scent body spray",
        1200,
        Some((1000, 12)),
        60,
        3,
    ),
    product(
        2,
        "Men's Cologne",
        "Masculine and sophisticated cologne",
        3800,
        None,
        25,
        3,
    ),
    product(
        2,
        "Unisex Perfume Set",
        "Set of 3 unisex perfumes",
        4500,
        None,
        15,
        3,
    ),
    // Jewelry and accessories
    product(
        3,
        "Gold Plated Necklace",
        "Beautiful gold plated necklace",
        2800,
        None,
        35,
        4,
    ),
    product(
        3,
        "Ladies Handbag",
        "Genuine leather handbag",
        3500,
        Some((3000, 5)),
        22,
        4,
    ),
    product(
        3,
        "Fashion Sunglasses",
        "Trendy UV protection sunglasses",
        1500,
        Some((1200, 10)),
        50,
        4,
    ),
    product(
        3,
        "Silver Earrings",
        "Elegant silver earrings",
        1800,
        None,
        40,
        4,
    ),
    product(
        3,
        "Designer Watch",
        "Luxury designer watch",
        8500,
        None,
        10,
        4,
    ),
    product(
        3,
        "Leather Belt",
        "Premium leather belt",
        1200,
        Some((1000, 15)),
        45,
        4,
    ),
    // Mixed fashion
    product(
        4,
        "Denim Jacket",
        "Trendy denim jacket for all seasons",
        3200,
        None,
        20,
        1,
    ),
    product(
        4,
        "Sports Cap",
        "Comfortable sports cap",
        800,
        Some((650, 20)),
        100,
        4,
    ),
    product(4, "Wallet", "Genuine leather wallet", 1500, None, 35, 4),
    product(
        4,
        "Fashion Scarf",
        "Silk fashion scarf",
        1200,
        Some((1000, 12)),
        40,
        4,
    ),
];

/// Row counts written by [`run`]
#[derive(Debug, Default)]
pub struct SeedReport {
    pub users: usize,
    pub businesses: usize,
    pub products: usize,
    pub customers: usize,
    pub orders: usize,
    pub order_items: usize,
}

/// Replace all marketplace data with the demo set
pub async fn run(db: &PgPool, bcrypt_cost: u32) -> AppResult<SeedReport> {
    let mut tx = db.begin().await?;
    let mut report = SeedReport::default();

    tracing::info!("Clearing existing data...");
    sqlx::query("TRUNCATE order_items, orders, products, customers, businesses, users")
        .execute(&mut *tx)
        .await?;

    let mut user_ids = Vec::with_capacity(USERS.len());
    for &(full_name, email, phone, role) in USERS {
        let new = NewUser::validate(
            CreateUserInput {
                full_name: Some(full_name.into()),
                email: Some(email.into()),
                password: Some(SEED_PASSWORD.into()),
                phone: Some(phone.into()),
                role: Some(role.into()),
                status: Some("active".into()),
            },
            bcrypt_cost,
        )?;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (full_name, email, password_hash, phone, role, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.phone)
        .bind(&new.role)
        .bind(&new.status)
        .fetch_one(&mut *tx)
        .await?;
        user_ids.push(id);
    }
    report.users = user_ids.len();

    let mut business_ids = Vec::with_capacity(BUSINESSES.len());
    for &(owner, name, status, rating) in BUSINESSES {
        let new = NewBusiness::validate(CreateBusinessInput {
            user_id: Some(user_ids[owner]),
            business_name: Some(name.into()),
            verification_status: Some(status.into()),
            rating: rating.parse::<Decimal>().ok(),
        })?;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO businesses (user_id, business_name, verification_status, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.user_id)
        .bind(&new.business_name)
        .bind(new.verification_status.as_str())
        .bind(new.rating)
        .fetch_one(&mut *tx)
        .await?;
        business_ids.push(id);
    }
    report.businesses = business_ids.len();

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for seed in PRODUCTS {
        let new = NewProduct::validate(CreateProductInput {
            business_id: Some(business_ids[seed.business]),
            category_id: Some(seed.category),
            name: Some(seed.name.into()),
            description: Some(seed.description.into()),
            price: Some(Decimal::from(seed.price)),
            bulk_price: seed.bulk.map(|(price, _)| Decimal::from(price)),
            min_bulk_quantity: seed.bulk.map(|(_, quantity)| quantity),
            stock_quantity: Some(seed.stock),
        })?;
        product_ids.push(insert_product(&mut tx, &new).await?);
    }
    report.products = product_ids.len();

    let customers = [
        (user_ids[5], "RETAILER", None),
        (user_ids[6], "WHOLESALER", Some("Kamau Fashion Wholesale")),
    ];
    let mut customer_ids = Vec::with_capacity(customers.len());
    for (user_id, customer_type, business_name) in customers {
        let new = NewCustomer::validate(CreateCustomerInput {
            user_id: Some(user_id),
            customer_type: Some(customer_type.into()),
            business_name: business_name.map(Into::into),
            address: None,
        })?;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO customers (user_id, customer_type, business_name, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.user_id)
        .bind(new.customer_type.as_str())
        .bind(&new.business_name)
        .bind(&new.address)
        .fetch_one(&mut *tx)
        .await?;
        customer_ids.push(id);
    }
    report.customers = customer_ids.len();

    let orders = [
        CreateOrderInput {
            customer_id: Some(customer_ids[0]),
            order_type: Some("retail".into()),
            total_amount: Some(Decimal::from(7200)),
            order_status: Some("completed".into()),
            payment_status: Some("paid".into()),
            payment_method: Some("mpesa".into()),
            transaction_reference: Some("QX123ABC".into()),
            delivery_address: Some("Eastleigh 10th Street, House 45".into()),
            delivery_status: Some("delivered".into()),
        },
        CreateOrderInput {
            customer_id: Some(customer_ids[1]),
            order_type: Some("wholesale".into()),
            total_amount: Some(Decimal::from(45000)),
            order_status: Some("processing".into()),
            payment_status: Some("paid".into()),
            payment_method: Some("bank_transfer".into()),
            transaction_reference: Some("BT456DEF".into()),
            delivery_address: Some("Eastleigh Business Center, Shop 23".into()),
            delivery_status: Some("in_transit".into()),
        },
    ];
    let mut order_ids = Vec::with_capacity(orders.len());
    for input in orders {
        let new = NewOrder::validate(input)?;
        order_ids.push(insert_order(&mut tx, &new).await?);
    }
    report.orders = order_ids.len();

    // Evening dress at retail, blouses and sandals at bulk price
    let items = [
        (order_ids[0], product_ids[0], 2, 3500),
        (order_ids[1], product_ids[1], 30, 1000),
        (order_ids[1], product_ids[7], 10, 1500),
    ];
    for (order_id, product_id, quantity, unit_price) in items {
        let new = NewOrderItem::validate(CreateOrderItemInput {
            order_id: Some(order_id),
            product_id: Some(product_id),
            quantity: Some(quantity),
            unit_price: Some(Decimal::from(unit_price)),
        })?;
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(new.order_id)
        .bind(new.product_id)
        .bind(new.quantity)
        .bind(new.unit_price)
        .execute(&mut *tx)
        .await?;
        report.order_items += 1;
    }

    tx.commit().await?;

    tracing::info!(?report, "Database seeding completed");
    Ok(report)
}

async fn insert_product(tx: &mut Transaction<'_, Postgres>, new: &NewProduct) -> AppResult<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO products (
            business_id, category_id, name, description, price,
            bulk_price, min_bulk_quantity, stock_quantity
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(new.business_id)
    .bind(new.category_id)
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.price)
    .bind(new.bulk_price)
    .bind(new.min_bulk_quantity)
    .bind(new.stock_quantity)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

async fn insert_order(tx: &mut Transaction<'_, Postgres>, new: &NewOrder) -> AppResult<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO orders (
            customer_id, order_type, total_amount, order_status, payment_status,
            payment_method, transaction_reference, delivery_address, delivery_status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(new.customer_id)
    .bind(&new.order_type)
    .bind(new.total_amount)
    .bind(new.order_status.as_str())
    .bind(new.payment_status.as_str())
    .bind(&new.payment_method)
    .bind(&new.transaction_reference)
    .bind(&new.delivery_address)
    .bind(new.delivery_status.as_str())
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalogue_shape() {
        assert_eq!(USERS.len(), 7);
        assert_eq!(BUSINESSES.len(), 5);
        assert_eq!(PRODUCTS.len(), 25);
        assert!(PRODUCTS.iter().all(|p| p.business < BUSINESSES.len()));
        assert!(BUSINESSES.iter().all(|&(owner, ..)| owner < USERS.len()));
    }

    #[test]
    fn test_seed_products_pass_validation() {
        for seed in PRODUCTS {
            let result = NewProduct::validate(CreateProductInput {
                business_id: Some(Uuid::nil()),
                category_id: Some(seed.category),
                name: Some(seed.name.into()),
                description: Some(seed.description.into()),
                price: Some(Decimal::from(seed.price)),
                bulk_price: seed.bulk.map(|(price, _)| Decimal::from(price)),
                min_bulk_quantity: seed.bulk.map(|(_, quantity)| quantity),
                stock_quantity: Some(seed.stock),
            });
            assert!(result.is_ok(), "{} failed validation", seed.name);
        }
    }
}
