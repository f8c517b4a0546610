use serde::{Deserialize, Serialize};

use super::lenient;

/// A patient profile as stored by the intake process. Read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient::string_or_empty"
    )]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
    #[serde(
        default,
        alias = "schedule",
        deserialize_with = "lenient::record_list"
    )]
    pub daily_schedule: Vec<ScheduleEntry>,
    #[serde(default, alias = "family", deserialize_with = "lenient::record_list")]
    pub family_members: Vec<FamilyMember>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<Caregiver>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Patient {
    /// `preferredName`, else `firstName lastName`, else "Unknown".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.preferred_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            "Unknown".to_string()
        } else {
            full
        }
    }

    /// All medications across conditions, in condition order.
    pub fn medications(&self) -> impl Iterator<Item = &Medication> {
        self.conditions.iter().flat_map(|c| c.medications.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub reminder_times: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(default, alias = "activity", deserialize_with = "lenient::string_or_empty")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub relation: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Caregiver {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_stored_patient() {
        let patient: Patient = serde_json::from_value(json!({
            "_id": "688c51b43b594570587685ee",
            "preferredName": "Maggie",
            "firstName": "Margaret",
            "lastName": "Thompson",
            "age": 78,
            "gender": "female",
            "conditions": [{
                "name": "Type 2 Diabetes",
                "severity": "moderate",
                "medications": [{
                    "name": "Metformin",
                    "dosage": "500mg",
                    "frequency": "twice daily",
                    "reminderTimes": ["08:00", "20:00"]
                }]
            }],
            "interests": ["baking", "gardening"],
            "caregiver": {"name": "Lisa", "relationship": "companion"},
            "preferences": {"tone": "warm"}
        }))
        .unwrap();

        assert_eq!(patient.id, "688c51b43b594570587685ee");
        assert_eq!(patient.display_name(), "Maggie");
        assert_eq!(patient.age, Some(78));
        assert_eq!(patient.medications().count(), 1);
        assert_eq!(
            patient.conditions[0].medications[0].reminder_times,
            vec!["08:00", "20:00"]
        );
        assert_eq!(patient.caregiver.unwrap().name, "Lisa");
    }

    #[test]
    fn display_name_falls_back_to_full_name_then_unknown() {
        let mut patient = Patient {
            first_name: Some("Margaret".into()),
            last_name: Some("Thompson".into()),
            ..Default::default()
        };
        assert_eq!(patient.display_name(), "Margaret Thompson");

        patient.first_name = None;
        patient.last_name = None;
        assert_eq!(patient.display_name(), "Unknown");
    }

    #[test]
    fn malformed_nested_records_are_skipped() {
        let patient: Patient = serde_json::from_value(json!({
            "_id": "p1",
            "age": "eighty",
            "conditions": [{"name": "Arthritis"}, "not a condition"],
            "caregiver": "Lisa"
        }))
        .unwrap();

        assert_eq!(patient.age, None);
        assert_eq!(patient.conditions.len(), 1);
        assert!(patient.caregiver.is_none());
    }
}
