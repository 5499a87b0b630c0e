//! Domain models for the clinic portal.
//!
//! This module contains the entities (doctors, medicines, the patient record),
//! the cart, the pure filtering and chart projection engines, and the
//! in-memory store that owns all mutable state.

pub mod cart;
pub mod chart;
pub mod filter;
pub mod patient;
pub mod seed;
pub mod store;

mod config;
pub use config::Config;

mod doctor;
pub use doctor::Doctor;

mod medicine;
pub use medicine::{Medicine, MedicineId, Rupees};
