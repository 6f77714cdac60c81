//! HTTP handlers

pub mod business;
pub mod customer;
pub mod health;
pub mod order;
pub mod order_item;
pub mod product;
pub mod report;
pub mod user;

pub use business::*;
pub use customer::*;
pub use health::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
pub use report::*;
pub use user::*;
