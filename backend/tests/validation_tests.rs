//! Input validation tests
//!
//! Covers required fields, numeric bounds, enumerated statuses and update
//! merging for every marketplace entity.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::validation::{
    validate_email, validate_full_name, validate_price, validate_quantity, validate_rating,
};
use shared::{
    CreateBusinessInput, CreateCustomerInput, CreateOrderInput, CreateOrderItemInput,
    CreateProductInput, NewBusiness, NewCustomer, NewOrder, NewOrderItem, NewProduct, OrderStatus,
    Product, ProductChanges, UpdateProductInput, VerificationStatus,
};
use std::str::FromStr;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product_input(price: &str) -> CreateProductInput {
    CreateProductInput {
        business_id: Some(Uuid::new_v4()),
        name: Some("Ladies Sandals".into()),
        price: Some(dec(price)),
        ..Default::default()
    }
}

fn order_item_input(quantity: i32) -> CreateOrderItemInput {
    CreateOrderItemInput {
        order_id: Some(Uuid::new_v4()),
        product_id: Some(Uuid::new_v4()),
        quantity: Some(quantity),
        unit_price: Some(dec("1500")),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_product_price_boundary() {
        let err = NewProduct::validate(product_input("-1")).unwrap_err();
        assert_eq!(err.field, "price");

        let product = NewProduct::validate(product_input("0")).unwrap();
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.stock_quantity, 0);
    }

    #[test]
    fn test_product_requires_name() {
        let input = CreateProductInput {
            name: None,
            ..product_input("100")
        };
        let err = NewProduct::validate(input).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_order_item_quantity_boundary() {
        let err = NewOrderItem::validate(order_item_input(0)).unwrap_err();
        assert_eq!(err.field, "quantity");

        assert!(NewOrderItem::validate(order_item_input(1)).is_ok());
    }

    #[test]
    fn test_order_item_unit_price_must_be_positive() {
        let input = CreateOrderItemInput {
            unit_price: Some(Decimal::ZERO),
            ..order_item_input(2)
        };
        assert_eq!(NewOrderItem::validate(input).unwrap_err().field, "unit_price");
    }

    #[test]
    fn test_order_status_values() {
        let bad = CreateOrderInput {
            customer_id: Some(Uuid::new_v4()),
            total_amount: Some(dec("7200")),
            order_status: Some("shipped_fast".into()),
            ..Default::default()
        };
        let err = NewOrder::validate(bad).unwrap_err();
        assert_eq!(err.field, "order_status");
        assert!(err.message.contains("completed"));

        let good = CreateOrderInput {
            customer_id: Some(Uuid::new_v4()),
            total_amount: Some(dec("7200")),
            order_status: Some("completed".into()),
            ..Default::default()
        };
        assert_eq!(NewOrder::validate(good).unwrap().order_status, OrderStatus::Completed);
    }

    #[test]
    fn test_order_defaults() {
        let order = NewOrder::validate(CreateOrderInput {
            customer_id: Some(Uuid::new_v4()),
            total_amount: Some(dec("45000")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.payment_status.as_str(), "unpaid");
        assert_eq!(order.delivery_status.as_str(), "not_shipped");
    }

    #[test]
    fn test_business_rating_bounds() {
        let input = |rating: &str| CreateBusinessInput {
            user_id: Some(Uuid::new_v4()),
            business_name: Some("Hassan's Style Hub".into()),
            verification_status: None,
            rating: Some(dec(rating)),
        };

        assert_eq!(NewBusiness::validate(input("5.1")).unwrap_err().field, "rating");
        let business = NewBusiness::validate(input("4.5")).unwrap();
        assert_eq!(business.verification_status, VerificationStatus::Pending);
    }

    #[test]
    fn test_customer_type_is_required_and_checked() {
        let missing = CreateCustomerInput {
            user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(NewCustomer::validate(missing).unwrap_err().field, "customer_type");

        let unknown = CreateCustomerInput {
            user_id: Some(Uuid::new_v4()),
            customer_type: Some("RESELLER".into()),
            ..Default::default()
        };
        assert_eq!(NewCustomer::validate(unknown).unwrap_err().field, "customer_type");

        let wholesaler = CreateCustomerInput {
            user_id: Some(Uuid::new_v4()),
            customer_type: Some("WHOLESALER".into()),
            business_name: Some("Kamau Fashion Wholesale".into()),
            ..Default::default()
        };
        assert!(NewCustomer::validate(wholesaler).is_ok());
    }

    #[test]
    fn test_update_merge_revalidates() {
        let stored = Product {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            category_id: Some(1),
            name: "Elegant Evening Dress".into(),
            description: None,
            price: dec("3500"),
            bulk_price: Some(dec("3000")),
            min_bulk_quantity: Some(5),
            stock_quantity: 25,
            created_at: chrono::Utc::now(),
        };

        let bad = UpdateProductInput {
            price: Some(dec("-5")),
            ..Default::default()
        };
        assert_eq!(ProductChanges::apply(&stored, bad).unwrap_err().field, "price");

        let restock = UpdateProductInput {
            stock_quantity: Some(40),
            ..Default::default()
        };
        let changes = ProductChanges::apply(&stored, restock).unwrap();
        assert_eq!(changes.stock_quantity, 40);
        assert_eq!(changes.price, dec("3500"));
        assert_eq!(changes.name, "Elegant Evening Dress");
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert!(validate_email("fatuma.marketmtaani.com").is_err());
        assert_eq!(
            validate_email("  fatuma@marketmtaani.com ").unwrap(),
            "fatuma@marketmtaani.com"
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Re-validating an accepted value yields the same value
    #[test]
    fn prop_text_validation_is_idempotent(
        local in "[a-z]{1,12}",
        domain in "[a-z]{1,12}",
        pad in " {0,3}",
    ) {
        let raw = format!("{pad}{local}@{domain}.co.ke{pad}");
        let once = validate_email(&raw).unwrap();
        prop_assert_eq!(validate_email(&once).unwrap(), once);

        let name = format!("{pad}{local}{pad}");
        let once = validate_full_name(&name).unwrap();
        prop_assert_eq!(validate_full_name(&once).unwrap(), once);
    }

    /// Prices are accepted exactly when non-negative
    #[test]
    fn prop_price_sign(cents in -1_000_000i64..1_000_000i64) {
        let price = Decimal::new(cents, 2);
        prop_assert_eq!(validate_price(price).is_ok(), cents >= 0);
    }

    /// Quantities are accepted exactly when positive
    #[test]
    fn prop_quantity_sign(quantity in -1_000i32..1_000i32) {
        prop_assert_eq!(validate_quantity(quantity).is_ok(), quantity > 0);
    }

    /// Ratings are accepted exactly within [0, 5]
    #[test]
    fn prop_rating_range(tenths in -100i64..100i64) {
        let rating = Decimal::new(tenths, 1);
        prop_assert_eq!(validate_rating(Some(rating)).is_ok(), (0..=50).contains(&tenths));
    }

    /// Validating the same input twice gives the same record
    #[test]
    fn prop_product_validation_is_deterministic(
        cents in 0i64..10_000_000i64,
        stock in 0i32..10_000,
    ) {
        let input = CreateProductInput {
            business_id: Some(Uuid::nil()),
            name: Some("Wallet".into()),
            price: Some(Decimal::new(cents, 2)),
            stock_quantity: Some(stock),
            ..Default::default()
        };
        let first = NewProduct::validate(input.clone()).unwrap();
        let second = NewProduct::validate(input).unwrap();
        prop_assert_eq!(first.price, second.price);
        prop_assert_eq!(first.stock_quantity, second.stock_quantity);
        prop_assert_eq!(first.name, second.name);
    }
}
