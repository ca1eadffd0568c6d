//! Clinic catalog: departments, doctors and bookable services.
//!
//! Content payloads arrive as loosely shaped JSON. Everything is normalized
//! here, at the ingestion boundary, into one canonical shape:
//! - ids may be strings or numbers
//! - a doctor's `title` may be a string or an object (`{"text": ..}` / `{"en": ..}`)
//! - a collection may be a bare array or wrapped in `{"data": [..]}` / `{"items": [..]}`
//! - slots that don't parse as local date-times are dropped

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod source;

pub use source::{content_source_from_config, ContentSource};

/// Slot formats accepted from content payloads
const SLOT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Kinds of content the catalog is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Departments,
    Doctors,
    Services,
}

impl ContentKind {
    pub fn key(self) -> &'static str {
        match self {
            ContentKind::Departments => "departments",
            ContentKind::Doctors => "doctors",
            ContentKind::Services => "services",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} payload is not a list")]
    NotAList { kind: &'static str },
    #[error("invalid {kind} entry: {source}")]
    InvalidEntry {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("doctor '{doctor}' references unknown department '{department}'")]
    UnknownDepartment { doctor: String, department: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub department_id: String,
    pub slots: Vec<NaiveDateTime>,
}

impl Doctor {
    /// Name with title, e.g. "Amara Osei, Consultant Cardiologist"
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{}, {}", self.name, title),
            None => self.name.clone(),
        }
    }

    pub fn has_slot(&self, slot: &NaiveDateTime) -> bool {
        self.slots.contains(slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub duration_minutes: u32,
    pub price: f64,
}

/// Normalized catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub departments: Vec<Department>,
    pub doctors: Vec<Doctor>,
    pub services: Vec<Service>,
}

impl Catalog {
    /// Fetch every content kind from the source and normalize it
    pub async fn load(source: &dyn ContentSource) -> Result<Self> {
        let departments = source
            .fetch(ContentKind::Departments)
            .await
            .context("Failed to fetch departments")?;
        let doctors = source
            .fetch(ContentKind::Doctors)
            .await
            .context("Failed to fetch doctors")?;
        let services = source
            .fetch(ContentKind::Services)
            .await
            .context("Failed to fetch services")?;

        let catalog = Self::from_payloads(departments, doctors, services)?;
        tracing::info!(
            source = source.name(),
            departments = catalog.departments.len(),
            doctors = catalog.doctors.len(),
            services = catalog.services.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from raw content payloads
    pub fn from_payloads(
        departments: Value,
        doctors: Value,
        services: Value,
    ) -> Result<Self, CatalogError> {
        let departments: Vec<Department> = entries::<RawDepartment>(ContentKind::Departments, departments)?
            .into_iter()
            .map(|raw| Department {
                id: raw.id.into_string(),
                name: raw.name,
            })
            .collect();

        let doctors: Vec<Doctor> = entries::<RawDoctor>(ContentKind::Doctors, doctors)?
            .into_iter()
            .map(RawDoctor::normalize)
            .collect();

        let services = entries::<RawService>(ContentKind::Services, services)?
            .into_iter()
            .map(|raw| Service {
                id: raw.id.into_string(),
                name: raw.name,
                department_id: raw.department_id.into_string(),
                duration_minutes: raw.duration_minutes,
                price: raw.price,
            })
            .collect();

        for doctor in &doctors {
            if !departments.iter().any(|d| d.id == doctor.department_id) {
                return Err(CatalogError::UnknownDepartment {
                    doctor: doctor.id.clone(),
                    department: doctor.department_id.clone(),
                });
            }
        }

        Ok(Self {
            departments,
            doctors,
            services,
        })
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Doctors in the department that offers the service
    pub fn doctors_for_service(&self, service_id: &str) -> Vec<&Doctor> {
        match self.service(service_id) {
            Some(service) => self
                .doctors
                .iter()
                .filter(|d| d.department_id == service.department_id)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Unwrap a collection payload and deserialize each entry
fn entries<T: for<'de> Deserialize<'de>>(
    kind: ContentKind,
    payload: Value,
) -> Result<Vec<T>, CatalogError> {
    let list = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("items")) {
            Some(Value::Array(items)) => items,
            _ => return Err(CatalogError::NotAList { kind: kind.key() }),
        },
        _ => return Err(CatalogError::NotAList { kind: kind.key() }),
    };

    list.into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|source| CatalogError::InvalidEntry {
                kind: kind.key(),
                source,
            })
        })
        .collect()
}

pub(crate) fn parse_slot(raw: &str) -> Option<NaiveDateTime> {
    SLOT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTitle {
    Plain(String),
    Localized {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        en: Option<String>,
    },
}

impl RawTitle {
    fn into_text(self) -> Option<String> {
        let text = match self {
            RawTitle::Plain(text) => Some(text),
            RawTitle::Localized { text, en } => text.or(en),
        };
        text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct RawDepartment {
    id: RawId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawDoctor {
    id: RawId,
    name: String,
    #[serde(default)]
    title: Option<RawTitle>,
    #[serde(alias = "department")]
    department_id: RawId,
    #[serde(default)]
    slots: Vec<String>,
}

impl RawDoctor {
    fn normalize(self) -> Doctor {
        let id = self.id.into_string();
        let mut slots: Vec<NaiveDateTime> = self
            .slots
            .iter()
            .filter_map(|raw| {
                let slot = parse_slot(raw);
                if slot.is_none() {
                    tracing::warn!(doctor = %id, slot = %raw, "dropping malformed slot");
                }
                slot
            })
            .collect();
        slots.sort();
        slots.dedup();

        Doctor {
            id,
            name: self.name,
            title: self.title.and_then(RawTitle::into_text),
            department_id: self.department_id.into_string(),
            slots,
        }
    }
}

fn default_duration() -> u32 {
    30
}

#[derive(Debug, Deserialize)]
struct RawService {
    id: RawId,
    name: String,
    #[serde(alias = "department")]
    department_id: RawId,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    #[serde(default)]
    price: f64,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Catalog parsed from the bundled content
    pub(crate) fn sample_catalog() -> Catalog {
        let content: Value = serde_json::from_str(source::EMBEDDED_CATALOG).unwrap();
        Catalog::from_payloads(
            content["departments"].clone(),
            content["doctors"].clone(),
            content["services"].clone(),
        )
        .unwrap()
    }

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = sample_catalog();
        assert_eq!(catalog.departments.len(), 4);
        assert_eq!(catalog.doctors.len(), 5);
        assert_eq!(catalog.services.len(), 5);
    }

    #[test]
    fn test_title_shapes_are_normalized() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.doctor("dr-amara-osei").unwrap().title.as_deref(),
            Some("Consultant Cardiologist")
        );
        assert_eq!(
            catalog.doctor("dr-lukas-meyer").unwrap().title.as_deref(),
            Some("Cardiac Imaging Specialist")
        );
        assert_eq!(
            catalog.doctor("dr-ines-carvalho").unwrap().title.as_deref(),
            Some("Dermatologist")
        );
        assert_eq!(catalog.doctor("dr-kenji-watanabe").unwrap().title, None);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let catalog = sample_catalog();
        let doctor = catalog.doctor("17").unwrap();
        assert_eq!(doctor.department_id, "4");
        assert_eq!(catalog.department("4").unwrap().name, "General Practice");
    }

    #[test]
    fn test_malformed_slots_are_dropped() {
        let catalog = sample_catalog();
        assert_eq!(catalog.doctor("17").unwrap().slots.len(), 3);
    }

    #[test]
    fn test_service_defaults() {
        let catalog = sample_catalog();
        let gp = catalog.service("gp-visit").unwrap();
        assert_eq!(gp.duration_minutes, 30);
    }

    #[test]
    fn test_doctors_for_service() {
        let catalog = sample_catalog();
        let ids: Vec<_> = catalog
            .doctors_for_service("ecg")
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["dr-amara-osei", "dr-lukas-meyer"]);
        assert!(catalog.doctors_for_service("unknown").is_empty());
    }

    #[test]
    fn test_wrapped_collections() {
        let catalog = Catalog::from_payloads(
            json!({ "data": [{ "id": 1, "name": "Radiology" }] }),
            json!({ "items": [{ "id": "d1", "name": "Sam Lee", "department": 1 }] }),
            json!([]),
        )
        .unwrap();
        assert_eq!(catalog.doctor("d1").unwrap().department_id, "1");
    }

    #[test]
    fn test_non_list_payload_is_rejected() {
        let err = Catalog::from_payloads(json!("nope"), json!([]), json!([])).unwrap_err();
        assert!(matches!(err, CatalogError::NotAList { kind: "departments" }));
    }

    #[test]
    fn test_unknown_department_is_rejected() {
        let err = Catalog::from_payloads(
            json!([]),
            json!([{ "id": "d1", "name": "Sam Lee", "department_id": "x" }]),
            json!([]),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDepartment { .. }));
    }

    #[test]
    fn test_display_name() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.doctor("dr-amara-osei").unwrap().display_name(),
            "Amara Osei, Consultant Cardiologist"
        );
        assert_eq!(
            catalog.doctor("dr-kenji-watanabe").unwrap().display_name(),
            "Kenji Watanabe"
        );
    }
}
