pub mod api;
pub mod config;
pub mod confirm;
pub mod error;
pub mod notify;
pub mod payment;

pub use config::Config;
pub use error::{CajaError, Result};
pub use payment::{InvoiceSnapshot, PaymentIntent, PaymentMethod};
