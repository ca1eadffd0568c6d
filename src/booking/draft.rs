//! Booking draft: the data the step components collect.
//!
//! The draft is an explicit container handed to each step component; nothing
//! about it lives in module-level state.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Catalog;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").expect("valid phone regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

const MAX_NAME_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;

/// Patient form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientField {
    FullName,
    Phone,
    Email,
    DateOfBirth,
    Notes,
}

impl PatientField {
    pub fn all() -> &'static [PatientField] {
        &[
            PatientField::FullName,
            PatientField::Phone,
            PatientField::Email,
            PatientField::DateOfBirth,
            PatientField::Notes,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            PatientField::FullName => "Full name",
            PatientField::Phone => "Phone",
            PatientField::Email => "Email (optional)",
            PatientField::DateOfBirth => "Date of birth (YYYY-MM-DD)",
            PatientField::Notes => "Notes (optional)",
        }
    }
}

/// A single failing form field
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}: {message}", .field.label())]
pub struct FieldError {
    pub field: PatientField,
    pub message: String,
}

impl FieldError {
    fn new(field: PatientField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Please choose a service")]
    MissingService,
    #[error("Please choose a doctor")]
    MissingDoctor,
    #[error("Please choose a time slot")]
    MissingSlot,
    #[error("Unknown service '{0}'")]
    UnknownService(String),
    #[error("Unknown doctor '{0}'")]
    UnknownDoctor(String),
    #[error("{doctor} does not provide {service}")]
    DoctorNotInDepartment { doctor: String, service: String },
    #[error("The selected time is no longer available")]
    SlotUnavailable,
    #[error("Please correct {} field(s)", .0.len())]
    InvalidPatient(Vec<FieldError>),
}

/// Patient details collected on the second step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub notes: String,
}

impl PatientForm {
    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::FullName => &self.full_name,
            PatientField::Phone => &self.phone,
            PatientField::Email => &self.email,
            PatientField::DateOfBirth => &self.date_of_birth,
            PatientField::Notes => &self.notes,
        }
    }

    pub fn get_mut(&mut self, field: PatientField) -> &mut String {
        match field {
            PatientField::FullName => &mut self.full_name,
            PatientField::Phone => &mut self.phone,
            PatientField::Email => &mut self.email,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Notes => &mut self.notes,
        }
    }

    /// Validate against today's date
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.validate_on(Utc::now().date_naive())
    }

    /// Validate every field, collecting all failures
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.full_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(PatientField::FullName, "is required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                PatientField::FullName,
                format!("must be at most {MAX_NAME_LEN} characters"),
            ));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(FieldError::new(PatientField::Phone, "is required"));
        } else if !PHONE_RE.is_match(phone) {
            errors.push(FieldError::new(PatientField::Phone, "is not a valid phone number"));
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            errors.push(FieldError::new(PatientField::Email, "is not a valid email address"));
        }

        match NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d") {
            Ok(date) if date > today => {
                errors.push(FieldError::new(PatientField::DateOfBirth, "cannot be in the future"));
            }
            Ok(_) => {}
            Err(_) => errors.push(FieldError::new(
                PatientField::DateOfBirth,
                "must be a date like 1990-04-21",
            )),
        }

        if self.notes.chars().count() > MAX_NOTES_LEN {
            errors.push(FieldError::new(
                PatientField::Notes,
                format!("must be at most {MAX_NOTES_LEN} characters"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Everything selected so far in the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    service_id: Option<String>,
    doctor_id: Option<String>,
    slot: Option<NaiveDateTime>,
    pub patient: PatientForm,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_id(&self) -> Option<&str> {
        self.service_id.as_deref()
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor_id.as_deref()
    }

    pub fn slot(&self) -> Option<NaiveDateTime> {
        self.slot
    }

    /// Choose a service. A different service clears doctor and slot.
    pub fn select_service(&mut self, service_id: impl Into<String>) {
        let service_id = service_id.into();
        if self.service_id.as_deref() != Some(service_id.as_str()) {
            self.doctor_id = None;
            self.slot = None;
        }
        self.service_id = Some(service_id);
    }

    /// Choose a doctor. A different doctor clears the slot.
    pub fn select_doctor(&mut self, doctor_id: impl Into<String>) {
        let doctor_id = doctor_id.into();
        if self.doctor_id.as_deref() != Some(doctor_id.as_str()) {
            self.slot = None;
        }
        self.doctor_id = Some(doctor_id);
    }

    pub fn select_slot(&mut self, slot: NaiveDateTime) {
        self.slot = Some(slot);
    }

    pub fn clear_selection(&mut self) {
        self.service_id = None;
        self.doctor_id = None;
        self.slot = None;
    }

    /// Check the first step's selection against the catalog
    pub fn validate_selection(&self, catalog: &Catalog) -> Result<(), DraftError> {
        let service_id = self.service_id.as_deref().ok_or(DraftError::MissingService)?;
        let doctor_id = self.doctor_id.as_deref().ok_or(DraftError::MissingDoctor)?;
        let slot = self.slot.ok_or(DraftError::MissingSlot)?;

        let service = catalog
            .service(service_id)
            .ok_or_else(|| DraftError::UnknownService(service_id.to_string()))?;
        let doctor = catalog
            .doctor(doctor_id)
            .ok_or_else(|| DraftError::UnknownDoctor(doctor_id.to_string()))?;

        if doctor.department_id != service.department_id {
            return Err(DraftError::DoctorNotInDepartment {
                doctor: doctor.name.clone(),
                service: service.name.clone(),
            });
        }
        if !doctor.has_slot(&slot) {
            return Err(DraftError::SlotUnavailable);
        }
        Ok(())
    }

    pub fn validate_patient(&self) -> Result<(), DraftError> {
        self.patient.validate().map_err(DraftError::InvalidPatient)
    }

    /// Re-validate everything and produce a confirmation
    pub fn submit(&self, catalog: &Catalog) -> Result<BookingConfirmation, DraftError> {
        self.validate_selection(catalog)?;
        self.validate_patient()?;

        // Both lookups succeeded in validate_selection
        let (Some(service), Some(doctor), Some(slot)) = (
            self.service_id.as_deref().and_then(|id| catalog.service(id)),
            self.doctor_id.as_deref().and_then(|id| catalog.doctor(id)),
            self.slot,
        ) else {
            return Err(DraftError::MissingService);
        };

        let confirmation = BookingConfirmation {
            reference: Uuid::new_v4(),
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.display_name(),
            slot,
            duration_minutes: service.duration_minutes,
            price: service.price,
            patient_name: self.patient.full_name.trim().to_string(),
            created_at: Utc::now(),
        };
        tracing::info!(
            reference = %confirmation.reference,
            service = %confirmation.service_id,
            doctor = %confirmation.doctor_id,
            slot = %confirmation.slot,
            "booking submitted"
        );
        Ok(confirmation)
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub reference: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub slot: NaiveDateTime,
    pub duration_minutes: u32,
    pub price: f64,
    pub patient_name: String,
    pub created_at: DateTime<Utc>,
}

impl BookingConfirmation {
    /// Short human-friendly reference, e.g. "CF-1A2B3C4D"
    pub fn short_reference(&self) -> String {
        let simple = self.reference.simple().to_string();
        format!("CF-{}", simple[..8].to_uppercase())
    }
}
