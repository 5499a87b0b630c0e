use serde::{Deserialize, Serialize};

/// A doctor who can be booked through the portal.
///
/// Doctors are loaded once from the seed data and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique identifier.
    pub id: u32,
    /// Full name, including title (e.g. `Dr. Asha Reddy`).
    pub name: String,
    /// Medical specialty.
    pub specialty: String,
    /// Town or clinic location.
    pub location: String,
    /// Average patient rating, between 0 and 5.
    pub rating: f32,
    /// Free-text label for the next open slot (e.g. `Fri 09:00`).
    pub next_available: String,
}

impl Doctor {
    /// The inclusive range a rating must fall in.
    pub const RATING_RANGE: std::ops::RangeInclusive<f32> = 0.0..=5.0;

    /// Whether the rating lies within [`Doctor::RATING_RANGE`].
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        Self::RATING_RANGE.contains(&self.rating)
    }
}
