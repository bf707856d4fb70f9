pub mod u601_checkout;
