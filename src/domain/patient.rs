//! The patient record: vital-sign history, appointments and prescriptions.

use std::fmt;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A single set of vital signs taken at a point in the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalReading {
    /// Time label, e.g. `09:00`.
    pub t: String,
    /// Heart rate in beats per minute.
    pub hr: i32,
    /// Systolic blood pressure in mmHg.
    pub bp: i32,
    /// Oxygen saturation, in percent.
    pub spo2: i32,
}

impl fmt::Display for VitalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} • HR {} bpm • BP {} • SpO₂ {}%",
            self.t, self.hr, self.bp, self.spo2
        )
    }
}

/// The booking form fields that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    /// The appointment date.
    Date,
    /// The appointment time.
    Time,
    /// The reason for the visit.
    Reason,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Reason => "reason",
        })
    }
}

/// A booking was rejected because a required field was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("appointment {field} is required")]
pub struct ValidationError {
    /// The first blank field, checked in date, time, reason order.
    pub field: BookingField,
}

/// A booked appointment.
///
/// Appointments read from seed data go through the same checks as
/// [`Appointment::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppointmentForm")]
pub struct Appointment {
    /// Name of the doctor the appointment is with.
    #[serde(rename = "with")]
    pub doctor: String,
    /// ISO-8601 date, e.g. `2026-02-01`.
    pub date: NonEmptyString,
    /// Time of day, e.g. `10:00`.
    pub time: NonEmptyString,
    /// Reason for the visit.
    pub reason: NonEmptyString,
}

impl Appointment {
    /// Builds an appointment from raw form input.
    ///
    /// Date, time and reason are trimmed and stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is blank
    /// after trimming.
    pub fn new(
        doctor: impl Into<String>,
        date: &str,
        time: &str,
        reason: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            doctor: doctor.into(),
            date: required(date, BookingField::Date)?,
            time: required(time, BookingField::Time)?,
            reason: required(reason, BookingField::Reason)?,
        })
    }
}

/// Unvalidated appointment fields, as they appear in a seed file.
#[derive(Deserialize)]
struct AppointmentForm {
    #[serde(rename = "with")]
    doctor: String,
    date: String,
    time: String,
    reason: String,
}

impl TryFrom<AppointmentForm> for Appointment {
    type Error = ValidationError;

    fn try_from(form: AppointmentForm) -> Result<Self, Self::Error> {
        Self::new(form.doctor, &form.date, &form.time, &form.reason)
    }
}

fn required(value: &str, field: BookingField) -> Result<NonEmptyString, ValidationError> {
    NonEmptyString::new(value.trim().to_string()).map_err(|_| ValidationError { field })
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} • {} • {}",
            self.date, self.time, self.doctor, self.reason
        )
    }
}

/// A prescribed medicine. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Medicine name.
    pub name: String,
    /// Dosage instructions.
    pub dose: String,
    /// Additional notes.
    pub notes: String,
}

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {} ({})", self.name, self.dose, self.notes)
    }
}

/// Everything the portal knows about the signed-in patient.
///
/// Any list left out of a seed file starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRecord {
    /// Vital readings in chronological order.
    pub vitals: Vec<VitalReading>,
    /// Appointments in booking order.
    pub appointments: Vec<Appointment>,
    /// Current prescriptions.
    pub prescriptions: Vec<Prescription>,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("", "10:00", "checkup", BookingField::Date; "empty date")]
    #[test_case("2026-02-01", "  ", "checkup", BookingField::Time; "blank time")]
    #[test_case("2026-02-01", "10:00", "\t\n", BookingField::Reason; "blank reason")]
    #[test_case("", "", "", BookingField::Date; "all blank reports date first")]
    fn blank_fields_are_rejected(date: &str, time: &str, reason: &str, field: BookingField) {
        let error = Appointment::new("Dr. X", date, time, reason).unwrap_err();
        assert_eq!(error, ValidationError { field });
    }

    #[test]
    fn fields_are_stored_trimmed() {
        let appointment = Appointment::new("Dr. X", " 2026-02-01", "10:00 ", "  checkup ").unwrap();
        assert_eq!(appointment.date.as_str(), "2026-02-01");
        assert_eq!(appointment.time.as_str(), "10:00");
        assert_eq!(appointment.reason.as_str(), "checkup");
    }

    #[test]
    fn display_formats_match_dashboard_lists() {
        let reading = VitalReading {
            t: "09:00".to_string(),
            hr: 78,
            bp: 120,
            spo2: 98,
        };
        assert_eq!(reading.to_string(), "09:00 • HR 78 bpm • BP 120 • SpO₂ 98%");

        let appointment =
            Appointment::new("Dr. Asha Reddy", "2026-01-10", "10:30", "Follow-up").unwrap();
        assert_eq!(
            appointment.to_string(),
            "2026-01-10 10:30 • Dr. Asha Reddy • Follow-up"
        );

        let prescription = Prescription {
            name: "Cetirizine 10mg".to_string(),
            dose: "1 tab at night".to_string(),
            notes: "For allergies".to_string(),
        };
        assert_eq!(
            prescription.to_string(),
            "Cetirizine 10mg — 1 tab at night (For allergies)"
        );
    }

    #[test]
    fn deserialising_trims_fields() {
        let appointment: Appointment = toml::from_str(
            "with = \"Dr. X\"\ndate = \" 2026-02-01 \"\ntime = \"10:00\"\nreason = \"checkup\"\n",
        )
        .unwrap();

        assert_eq!(appointment.date.as_str(), "2026-02-01");
    }

    #[test_case("   ", "10:00", "checkup", "appointment date is required"; "blank date")]
    #[test_case("2026-02-01", "10:00", "   ", "appointment reason is required"; "blank reason")]
    fn deserialising_rejects_blank_fields(date: &str, time: &str, reason: &str, message: &str) {
        let toml = format!(
            "with = \"Dr. X\"\ndate = \"{date}\"\ntime = \"{time}\"\nreason = \"{reason}\"\n"
        );

        let error = toml::from_str::<Appointment>(&toml).unwrap_err();

        assert!(error.to_string().contains(message), "{error}");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let record: PatientRecord = toml::from_str(
            "[[vitals]]\nt = \"08:00\"\nhr = 71\nbp = 121\nspo2 = 99\n",
        )
        .unwrap();

        assert_eq!(record.vitals.len(), 1);
        assert!(record.appointments.is_empty());
        assert!(record.prescriptions.is_empty());
    }

    #[test]
    fn validation_error_message_names_field() {
        let error = ValidationError {
            field: BookingField::Reason,
        };
        assert_eq!(error.to_string(), "appointment reason is required");
    }
}
