//! Cart
//!
//! A mutable, salon-scoped collection of services waiting to be booked.

pub mod errors;
pub mod line_item;
pub mod store;

pub use errors::CartError;
pub use line_item::LineItem;
pub use store::{AddOutcome, CartStore, SALON_SWITCH_MESSAGE, parse_quantity};
