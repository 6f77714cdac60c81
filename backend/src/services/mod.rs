//! Business logic services for the marketplace

pub mod aggregation;
pub mod business;
pub mod cascade;
pub mod customer;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

pub use aggregation::AggregationService;
pub use business::BusinessService;
pub use cascade::CascadeService;
pub use customer::CustomerService;
pub use order::OrderService;
pub use order_item::OrderItemService;
pub use product::ProductService;
pub use user::UserService;

#[cfg(test)]
mod tests;
