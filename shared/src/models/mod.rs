//! Domain models for the marketplace

mod business;
mod customer;
mod order;
mod order_item;
mod product;
mod user;

pub use business::*;
pub use customer::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
pub use user::*;
