pub mod auth;
pub mod carts;
pub mod classes;
pub mod health;
pub mod instructors;
pub mod manage;
pub mod payments;
pub mod users;
