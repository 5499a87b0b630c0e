//! Initial data for the store.
//!
//! [`Seed::demo`] holds the built-in demo catalogue. A seed can also be read
//! from a TOML file with the same shape, so the portal can be pointed at a
//! different set of doctors and medicines without recompiling.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    Doctor, Medicine, MedicineId, Rupees,
    patient::{Appointment, PatientRecord, Prescription, VitalReading},
};

/// The collections a [`Store`](crate::Store) starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Doctors available for booking.
    pub doctors: Vec<Doctor>,
    /// The pharmacy catalogue.
    pub medicines: Vec<Medicine>,
    /// The patient's record.
    pub patient: PatientRecord,
}

/// Errors that can occur when loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for a seed.
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two doctors share an id.
    #[error("duplicate doctor id {0}")]
    DuplicateDoctor(u32),
    /// Two medicines share an id.
    #[error("duplicate medicine id {0}")]
    DuplicateMedicine(MedicineId),
    /// A doctor's rating is outside 0 to 5.
    #[error("doctor {id} has rating {rating}, expected a value between 0 and 5")]
    InvalidRating {
        /// The offending doctor.
        id: u32,
        /// The rating found.
        rating: f32,
    },
}

impl Seed {
    /// Loads and validates a seed from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it fails
    /// [`Seed::validate`].
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        let seed: Self = toml::from_str(&content)?;
        seed.validate()?;
        tracing::debug!(
            "Loaded seed from {}: {} doctors, {} medicines",
            path.display(),
            seed.doctors.len(),
            seed.medicines.len()
        );
        Ok(seed)
    }

    /// Checks the identity and range invariants of the seed data.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate id or out-of-range rating found.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut doctor_ids = HashSet::new();
        for doctor in &self.doctors {
            if !doctor_ids.insert(doctor.id) {
                return Err(SeedError::DuplicateDoctor(doctor.id));
            }
            if !doctor.has_valid_rating() {
                return Err(SeedError::InvalidRating {
                    id: doctor.id,
                    rating: doctor.rating,
                });
            }
        }

        let mut medicine_ids = HashSet::new();
        for medicine in &self.medicines {
            if !medicine_ids.insert(&medicine.id) {
                return Err(SeedError::DuplicateMedicine(medicine.id.clone()));
            }
        }

        Ok(())
    }

    /// The built-in demo data.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            doctors: vec![
                doctor(1, "Dr. Asha Reddy", "Internal Medicine", "Tirupati", 4.8, "Tomorrow 10:30"),
                doctor(2, "Dr. Vikram Rao", "Cardiology", "Renigunta", 4.6, "Fri 09:00"),
                doctor(3, "Dr. Meera Iyer", "Pediatrics", "Tirupati", 4.7, "Sat 11:15"),
                doctor(4, "Dr. Sameer Khan", "Dermatology", "Chittoor", 4.5, "Mon 13:00"),
            ],
            medicines: vec![
                medicine("M-101", "Paracetamol 500mg", "Fever, pain relief", 25, 42),
                medicine("M-102", "Amoxicillin 250mg", "Bacterial infections", 68, 20),
                medicine("M-103", "Cetirizine 10mg", "Allergy relief", 18, 60),
                medicine("M-104", "ORS Sachet", "Hydration support", 12, 100),
                medicine("M-105", "Ibuprofen 200mg", "Inflammation & pain", 30, 35),
            ],
            patient: PatientRecord {
                vitals: vec![
                    vital("09:00", 78, 120, 98),
                    vital("12:00", 82, 118, 97),
                    vital("15:00", 76, 115, 98),
                    vital("18:00", 80, 119, 97),
                    vital("21:00", 74, 116, 98),
                ],
                appointments: Appointment::new("Dr. Asha Reddy", "2026-01-10", "10:30", "Follow-up")
                    .into_iter()
                    .collect(),
                prescriptions: vec![
                    prescription("Paracetamol 500mg", "1 tab x 3/day", "Take after meals"),
                    prescription("Cetirizine 10mg", "1 tab at night", "For allergies"),
                ],
            },
        }
    }
}

fn doctor(
    id: u32,
    name: &str,
    specialty: &str,
    location: &str,
    rating: f32,
    next_available: &str,
) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        location: location.to_string(),
        rating,
        next_available: next_available.to_string(),
    }
}

fn medicine(id: &str, name: &str, usage: &str, price: u64, stock: u32) -> Medicine {
    Medicine {
        id: MedicineId::new(id),
        name: name.to_string(),
        usage: usage.to_string(),
        price: Rupees::new(price),
        stock,
    }
}

fn vital(t: &str, hr: i32, bp: i32, spo2: i32) -> VitalReading {
    VitalReading {
        t: t.to_string(),
        hr,
        bp,
        spo2,
    }
}

fn prescription(name: &str, dose: &str, notes: &str) -> Prescription {
    Prescription {
        name: name.to_string(),
        dose: dose.to_string(),
        notes: notes.to_string(),
    }
}
