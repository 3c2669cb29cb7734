//! Functional core for the usercrud service.
//!
//! Everything in this crate is free of I/O: the user entity and its
//! validation rules, the repository contract that storage backends
//! implement, and the error taxonomy shared by all of them.

pub mod serde;
pub mod storage;
pub mod user;
