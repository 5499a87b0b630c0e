//! Clinic Portal
//!
//! An in-memory clinic front end: browse doctors and book appointments, fill
//! a pharmacy cart, and chart the patient's vital signs.

pub mod domain;
pub use domain::{
    Config, Doctor, Medicine, MedicineId, Rupees,
    chart::{ChartLayout, ChartProjection},
    seed::Seed,
    store::Store,
};

/// Event dispatch and render snapshots.
pub mod portal;
pub use portal::{Event, Outcome, Portal, Snapshot};
