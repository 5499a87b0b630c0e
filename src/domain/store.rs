//! The in-memory domain store.
//!
//! The [`Store`] is the single owner of every mutable piece of portal state:
//! the patient's appointments and the shopping cart. The doctor and medicine
//! catalogues and the rest of the patient record are fixed once the store is
//! built. Readers get owned snapshots or shared borrows; nothing outside the
//! store mutates entity state.

use chrono::{DateTime, Utc};
use nonempty::NonEmpty;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Doctor, Medicine, MedicineId, Rupees,
    cart::{Cart, CartLine},
    patient::{Appointment, PatientRecord, Prescription, ValidationError, VitalReading},
    seed::Seed,
};

/// No medicine with the requested id exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("medicine {0} not found")]
pub struct NotFound(pub MedicineId);

/// Checkout was attempted with nothing in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("your cart is empty")]
pub struct EmptyCartError;

/// Confirmation of a demo order.
///
/// The order is not kept anywhere; the receipt is all that remains of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// The cart lines that were ordered.
    pub lines: Vec<CartLine>,
    /// Total price of the order.
    pub total: Rupees,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// The portal's state.
#[derive(Debug, Clone)]
pub struct Store {
    doctors: Vec<Doctor>,
    medicines: Vec<Medicine>,
    patient: PatientRecord,
    cart: Cart,
}

impl Default for Store {
    fn default() -> Self {
        Self::demo()
    }
}

impl Store {
    /// Creates a store from seed data, with an empty cart.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            doctors: seed.doctors,
            medicines: seed.medicines,
            patient: seed.patient,
            cart: Cart::default(),
        }
    }

    /// A store holding the built-in demo data.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(Seed::demo())
    }

    /// A snapshot of every doctor, in seed order.
    #[must_use]
    pub fn list_doctors(&self) -> Vec<Doctor> {
        self.doctors.clone()
    }

    /// A snapshot of every medicine, in seed order.
    #[must_use]
    pub fn list_medicines(&self) -> Vec<Medicine> {
        self.medicines.clone()
    }

    /// Borrows the doctor catalogue.
    #[must_use]
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Borrows the medicine catalogue.
    #[must_use]
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    /// Looks up a medicine by id.
    #[must_use]
    pub fn medicine(&self, id: &MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|medicine| &medicine.id == id)
    }

    /// The patient's vital readings, oldest first.
    #[must_use]
    pub fn vitals(&self) -> &[VitalReading] {
        &self.patient.vitals
    }

    /// The vital readings as a non-empty sequence, if there are any.
    #[must_use]
    pub fn vitals_non_empty(&self) -> Option<NonEmpty<VitalReading>> {
        NonEmpty::from_slice(&self.patient.vitals)
    }

    /// The patient's appointments, in booking order.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.patient.appointments
    }

    /// The patient's prescriptions.
    #[must_use]
    pub fn prescriptions(&self) -> &[Prescription] {
        &self.patient.prescriptions
    }

    /// The shopping cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Books an appointment and appends it to the patient record.
    ///
    /// No check is made against existing appointments: double bookings are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `date`, `time` or `reason` is blank.
    #[instrument(level = "debug", skip(self))]
    pub fn book_appointment(
        &mut self,
        doctor: &str,
        date: &str,
        time: &str,
        reason: &str,
    ) -> Result<Appointment, ValidationError> {
        let appointment = Appointment::new(doctor, date, time, reason)?;
        self.patient.appointments.push(appointment.clone());
        tracing::info!("Booked appointment: {appointment}");
        Ok(appointment)
    }

    /// Adds one unit of a medicine to the cart and returns its line.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no medicine has the given id.
    #[instrument(level = "debug", skip(self))]
    pub fn add_to_cart(&mut self, id: &MedicineId) -> Result<CartLine, NotFound> {
        let medicine = self
            .medicine(id)
            .cloned()
            .ok_or_else(|| NotFound(id.clone()))?;
        Ok(self.cart.add(&medicine).clone())
    }

    /// Removes a medicine's line from the cart.
    ///
    /// Returns the removed line, or `None` (leaving the cart untouched) if
    /// the medicine was not in the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_from_cart(&mut self, id: &MedicineId) -> Option<CartLine> {
        self.cart.remove(id)
    }

    /// The current cart total, recomputed from the lines.
    #[must_use]
    pub fn cart_total(&self) -> Rupees {
        self.cart.total()
    }

    /// Places a demo order for everything in the cart and empties it.
    ///
    /// Stock levels are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCartError`] if the cart is empty; the store is left
    /// unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn checkout(&mut self) -> Result<Receipt, EmptyCartError> {
        if self.cart.is_empty() {
            return Err(EmptyCartError);
        }

        let total = self.cart.total();
        let lines = self.cart.take();
        tracing::info!("Order placed: {} line(s), {total}", lines.len());

        Ok(Receipt {
            lines,
            total,
            placed_at: Utc::now(),
        })
    }
}
