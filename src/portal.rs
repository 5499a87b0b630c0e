//! Event dispatch for the portal.
//!
//! A [`Portal`] wraps the [`Store`] together with the current search queries
//! and chart layout. A view relays each user action as an [`Event`]; the
//! portal handles it to completion and returns an [`Outcome`] or an
//! [`Error`]. After any event the view can ask for a fresh [`Snapshot`] to
//! redraw from.
//!
//! Because [`Portal::handle`] takes `&mut self`, at most one event is ever in
//! flight, and events are applied in the order they are delivered.

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Doctor, Medicine, MedicineId, Rupees,
    cart::CartLine,
    chart::{self, ChartLayout, ChartProjection},
    filter::Query,
    patient::{Appointment, Prescription, ValidationError, VitalReading},
    store::{EmptyCartError, NotFound, Receipt, Store},
};

/// A user action relayed by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The doctor search box changed.
    SearchDoctors(String),
    /// The pharmacy search box changed.
    SearchMedicines(String),
    /// The booking form was submitted.
    BookAppointment {
        /// Name of the doctor being booked.
        doctor: String,
        /// Requested date.
        date: String,
        /// Requested time.
        time: String,
        /// Reason for the visit.
        reason: String,
    },
    /// "Add to cart" was pressed for a medicine.
    AddToCart(MedicineId),
    /// "Remove" was pressed on a cart line.
    RemoveFromCart(MedicineId),
    /// "Checkout" was pressed.
    Checkout,
}

/// The direct result of handling an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// Doctors matching the new search.
    Doctors(Vec<Doctor>),
    /// Medicines matching the new search.
    Medicines(Vec<Medicine>),
    /// The appointment that was booked.
    Booked(Appointment),
    /// The cart line that was added to.
    Added(CartLine),
    /// The cart line that was removed, if the medicine was in the cart.
    Removed(Option<CartLine>),
    /// The order that was placed.
    CheckedOut(Receipt),
}

/// Any failure an [`Event`] can produce.
///
/// All of these are recoverable and meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A booking field was blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The medicine does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFound),
    /// Checkout with nothing in the cart.
    #[error(transparent)]
    EmptyCart(#[from] EmptyCartError),
}

/// Everything a view needs to render the portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Doctors matching the current doctor search.
    pub doctors: Vec<Doctor>,
    /// Medicines matching the current pharmacy search.
    pub medicines: Vec<Medicine>,
    /// Cart contents.
    pub cart: Vec<CartLine>,
    /// Cart total.
    pub cart_total: Rupees,
    /// Appointments, in booking order.
    pub appointments: Vec<Appointment>,
    /// Prescriptions.
    pub prescriptions: Vec<Prescription>,
    /// Vital readings, oldest first.
    pub vitals: Vec<VitalReading>,
    /// The vitals chart; absent when there are no readings.
    pub chart: Option<ChartProjection>,
}

/// The portal: store, search state and chart layout.
#[derive(Debug, Clone)]
pub struct Portal {
    store: Store,
    doctor_query: Query,
    medicine_query: Query,
    layout: ChartLayout,
}

impl Default for Portal {
    fn default() -> Self {
        Self::new(Store::demo(), ChartLayout::default())
    }
}

impl Portal {
    /// Creates a portal with empty search queries.
    #[must_use]
    pub fn new(store: Store, layout: ChartLayout) -> Self {
        Self {
            store,
            doctor_query: Query::default(),
            medicine_query: Query::default(),
            layout,
        }
    }

    /// Borrows the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Handles a single event.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the store rejects the operation. Searches never
    /// fail; an unmatched query yields an empty list.
    #[instrument(level = "debug", skip(self))]
    pub fn handle(&mut self, event: Event) -> Result<Outcome, Error> {
        let outcome = match event {
            Event::SearchDoctors(query) => {
                self.doctor_query = Query::new(&query);
                Outcome::Doctors(self.doctors())
            }
            Event::SearchMedicines(query) => {
                self.medicine_query = Query::new(&query);
                Outcome::Medicines(self.medicines())
            }
            Event::BookAppointment {
                doctor,
                date,
                time,
                reason,
            } => Outcome::Booked(self.store.book_appointment(&doctor, &date, &time, &reason)?),
            Event::AddToCart(id) => Outcome::Added(self.store.add_to_cart(&id)?),
            Event::RemoveFromCart(id) => Outcome::Removed(self.store.remove_from_cart(&id)),
            Event::Checkout => Outcome::CheckedOut(self.store.checkout()?),
        };
        Ok(outcome)
    }

    /// Doctors matching the current doctor search.
    #[must_use]
    pub fn doctors(&self) -> Vec<Doctor> {
        self.doctor_query
            .filter(self.store.doctors())
            .cloned()
            .collect()
    }

    /// Medicines matching the current pharmacy search.
    #[must_use]
    pub fn medicines(&self) -> Vec<Medicine> {
        self.medicine_query
            .filter(self.store.medicines())
            .cloned()
            .collect()
    }

    /// The vitals chart for the current readings.
    #[must_use]
    pub fn chart(&self) -> Option<ChartProjection> {
        self.store
            .vitals_non_empty()
            .map(|vitals| chart::project(&vitals, &self.layout))
    }

    /// A render-ready copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doctors: self.doctors(),
            medicines: self.medicines(),
            cart: self.store.cart().lines().to_vec(),
            cart_total: self.store.cart_total(),
            appointments: self.store.appointments().to_vec(),
            prescriptions: self.store.prescriptions().to_vec(),
            vitals: self.store.vitals().to_vec(),
            chart: self.chart(),
        }
    }
}
