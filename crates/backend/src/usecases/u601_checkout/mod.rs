pub mod executor;
pub mod gateway_client;

pub use executor::{CheckoutError, CheckoutExecutor};
pub use gateway_client::{PaymentGateway, SnapClient};
