pub mod cart;
pub mod class;
pub mod instructor;
pub mod payment;
pub mod user;

pub use cart::*;
pub use class::*;
pub use instructor::*;
pub use payment::*;
pub use user::*;
