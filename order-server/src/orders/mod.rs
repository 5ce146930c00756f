//! Order/table coordination core
//!
//! - [`Cart`]: in-session accumulator fed by menu lookups
//! - [`numbering`]: per-restaurant-per-day order numbers
//! - [`CheckoutService`]: cart → durable order + occupied table
//! - [`OrderWorkflow`]: status transitions + table release

pub mod cart;
pub mod checkout;
pub mod numbering;
pub mod workflow;

pub use cart::{Cart, CartItem};
pub use checkout::CheckoutService;
pub use workflow::OrderWorkflow;
