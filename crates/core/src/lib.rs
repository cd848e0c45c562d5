//! Salon Booking
//!
//! The cart-to-booking core of a salon reservation client: a salon-scoped
//! cart that persists itself to a durable key-value store, and a submitter
//! that validates the cart against the chosen slot and turns it into a
//! booking. Remote calls, storage and user prompts are injected.

pub mod backend;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod clock;
pub mod ids;
pub mod prelude;
pub mod prompt;
pub mod storage;
