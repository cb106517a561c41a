pub mod cart_service;
pub mod class_service;
pub mod payment_service;
pub mod stripe_service;
pub mod token_service;
pub mod user_service;
