//! Cascade planning for deletes
//!
//! Ownership in the marketplace forms a small DAG:
//!
//! ```text
//! user ──┬── business ── product ──┐
//!        └── customer ── order ────┴── order item
//! ```
//!
//! Deleting a record removes everything below it. [`OwnershipGraph::plan`]
//! computes that set from the rows the caller loaded, so the storage layer
//! only has to execute the deletes leaf-first inside one transaction.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

/// The record a delete starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoot {
    User(Uuid),
    Business(Uuid),
    Customer(Uuid),
    Product(Uuid),
    Order(Uuid),
    OrderItem(Uuid),
}

/// A child row and the id of the row that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OwnedBy {
    pub id: Uuid,
    pub owner_id: Uuid,
}

/// An order item and both of its parents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItemLink {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
}

/// Ownership edges around a delete root
#[derive(Debug, Clone, Default)]
pub struct OwnershipGraph {
    /// business → user
    pub businesses: Vec<OwnedBy>,
    /// customer → user
    pub customers: Vec<OwnedBy>,
    /// product → business
    pub products: Vec<OwnedBy>,
    /// order → customer
    pub orders: Vec<OwnedBy>,
    pub order_items: Vec<OrderItemLink>,
}

/// Every id a delete removes, per table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    pub users: BTreeSet<Uuid>,
    pub businesses: BTreeSet<Uuid>,
    pub customers: BTreeSet<Uuid>,
    pub products: BTreeSet<Uuid>,
    pub orders: BTreeSet<Uuid>,
    pub order_items: BTreeSet<Uuid>,
}

/// Row counts removed by a delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub users: u64,
    pub businesses: u64,
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
}

impl OwnershipGraph {
    /// Compute the records removed when `root` is deleted
    pub fn plan(&self, root: DeleteRoot) -> CascadePlan {
        let mut plan = CascadePlan::default();

        match root {
            DeleteRoot::User(id) => {
                plan.users.insert(id);
            }
            DeleteRoot::Business(id) => {
                plan.businesses.insert(id);
            }
            DeleteRoot::Customer(id) => {
                plan.customers.insert(id);
            }
            DeleteRoot::Product(id) => {
                plan.products.insert(id);
            }
            DeleteRoot::Order(id) => {
                plan.orders.insert(id);
            }
            DeleteRoot::OrderItem(id) => {
                plan.order_items.insert(id);
            }
        }

        // Walk the DAG top-down; each level only depends on the ones above it
        collect_owned(&self.businesses, &plan.users, &mut plan.businesses);
        collect_owned(&self.customers, &plan.users, &mut plan.customers);
        collect_owned(&self.products, &plan.businesses, &mut plan.products);
        collect_owned(&self.orders, &plan.customers, &mut plan.orders);

        for item in &self.order_items {
            if plan.orders.contains(&item.order_id) || plan.products.contains(&item.product_id) {
                plan.order_items.insert(item.id);
            }
        }

        plan
    }
}

fn collect_owned(edges: &[OwnedBy], owners: &BTreeSet<Uuid>, into: &mut BTreeSet<Uuid>) {
    into.extend(
        edges
            .iter()
            .filter(|edge| owners.contains(&edge.owner_id))
            .map(|edge| edge.id),
    );
}

impl CascadePlan {
    pub fn summary(&self) -> DeletionSummary {
        DeletionSummary {
            users: self.users.len() as u64,
            businesses: self.businesses.len() as u64,
            customers: self.customers.len() as u64,
            products: self.products.len() as u64,
            orders: self.orders.len() as u64,
            order_items: self.order_items.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary() == DeletionSummary::default()
    }

    pub fn user_ids(&self) -> Vec<Uuid> {
        ids(&self.users)
    }

    pub fn business_ids(&self) -> Vec<Uuid> {
        ids(&self.businesses)
    }

    pub fn customer_ids(&self) -> Vec<Uuid> {
        ids(&self.customers)
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        ids(&self.products)
    }

    pub fn order_ids(&self) -> Vec<Uuid> {
        ids(&self.orders)
    }

    pub fn order_item_ids(&self) -> Vec<Uuid> {
        ids(&self.order_items)
    }
}

fn ids(set: &BTreeSet<Uuid>) -> Vec<Uuid> {
    set.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_order_delete_takes_only_its_items() {
        let graph = OwnershipGraph {
            order_items: vec![
                OrderItemLink {
                    id: id(10),
                    order_id: id(1),
                    product_id: id(5),
                },
                OrderItemLink {
                    id: id(11),
                    order_id: id(2),
                    product_id: id(5),
                },
            ],
            ..Default::default()
        };
        let plan = graph.plan(DeleteRoot::Order(id(1)));
        assert_eq!(plan.order_ids(), vec![id(1)]);
        assert_eq!(plan.order_item_ids(), vec![id(10)]);
        assert!(plan.products.is_empty());
    }

    #[test]
    fn test_single_item_delete() {
        let plan = OwnershipGraph::default().plan(DeleteRoot::OrderItem(id(7)));
        assert_eq!(plan.summary().order_items, 1);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_empty_plan() {
        assert!(CascadePlan::default().is_empty());
    }
}
