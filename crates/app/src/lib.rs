//! Salon booking application: the HTTP backend client, the cart file, the
//! terminal prompt and the wiring that hands them to the booking core.

pub mod backend;
pub mod config;
pub mod context;
pub mod observability;
pub mod prompt;
pub mod storage;
pub mod summary;
