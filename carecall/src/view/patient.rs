use serde::{Deserialize, Serialize};

use crate::models::{Condition, FamilyMember, Medication, Patient, ScheduleEntry};

/// One row of the patient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientCard {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<String>,
}

impl From<&Patient> for PatientCard {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.display_name(),
            age: patient.age,
            gender: patient.gender.clone(),
            conditions: patient
                .conditions
                .iter()
                .map(|c| c.name.clone())
                .filter(|n| !n.is_empty())
                .collect(),
            caregiver: patient.caregiver.as_ref().map(|c| c.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub medications: Vec<String>,
}

impl From<&Condition> for ConditionView {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name.clone(),
            severity: condition.severity.clone(),
            notes: condition.notes.clone(),
            medications: condition.medications.iter().map(format_medication).collect(),
        }
    }
}

/// The profile panel opened from a patient card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub conditions: Vec<ConditionView>,
    pub interests: Vec<String>,
    pub schedule: Vec<String>,
    pub family: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_style: Option<String>,
}

impl From<&Patient> for PatientProfile {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.display_name(),
            age: patient.age,
            gender: patient.gender.clone(),
            conditions: patient.conditions.iter().map(ConditionView::from).collect(),
            interests: patient.interests.clone(),
            schedule: patient.daily_schedule.iter().map(format_schedule_entry).collect(),
            family: patient.family_members.iter().map(format_family_member).collect(),
            caregiver: patient.caregiver.as_ref().map(|c| match &c.relationship {
                Some(rel) => format!("{} ({rel})", c.name),
                None => c.name.clone(),
            }),
            interaction_style: patient.preferences.as_ref().and_then(|p| p.tone.clone()),
        }
    }
}

/// `"<name> <dosage>, <frequency> at <times>"`, dropping whatever is missing.
pub fn format_medication(med: &Medication) -> String {
    let mut out = med.name.clone();
    if let Some(dosage) = &med.dosage {
        out.push(' ');
        out.push_str(dosage);
    }
    if let Some(frequency) = &med.frequency {
        out.push_str(", ");
        out.push_str(frequency);
    }
    if !med.reminder_times.is_empty() {
        out.push_str(" at ");
        out.push_str(&med.reminder_times.join(", "));
    }
    out
}

fn format_schedule_entry(entry: &ScheduleEntry) -> String {
    if entry.time.is_empty() {
        entry.event.clone()
    } else {
        format!("{}: {}", entry.time, entry.event)
    }
}

fn format_family_member(member: &FamilyMember) -> String {
    let mut out = match member.count {
        Some(n) if n > 1 => format!("{} ({n})", member.relation),
        _ => member.relation.clone(),
    };
    if let Some(location) = &member.location {
        out.push_str(" in ");
        out.push_str(location);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Caregiver, Preferences};
    use pretty_assertions::assert_eq;

    fn patient() -> Patient {
        Patient {
            id: "p1".into(),
            preferred_name: Some("Maggie".into()),
            age: Some(78),
            conditions: vec![Condition {
                name: "Type 2 Diabetes".into(),
                severity: Some("moderate".into()),
                notes: None,
                medications: vec![Medication {
                    name: "Metformin".into(),
                    dosage: Some("500mg".into()),
                    frequency: Some("twice daily".into()),
                    reminder_times: vec!["08:00".into(), "20:00".into()],
                }],
            }],
            interests: vec!["baking".into()],
            daily_schedule: vec![ScheduleEntry {
                event: "Breakfast".into(),
                time: "08:00".into(),
            }],
            family_members: vec![
                FamilyMember {
                    relation: "daughter".into(),
                    location: Some("Boston".into()),
                    count: None,
                },
                FamilyMember {
                    relation: "grandchildren".into(),
                    location: None,
                    count: Some(3),
                },
            ],
            caregiver: Some(Caregiver {
                name: "Lisa".into(),
                relationship: Some("companion".into()),
            }),
            preferences: Some(Preferences {
                tone: Some("warm".into()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn card_summarizes_patient() {
        let card = PatientCard::from(&patient());
        assert_eq!(card.name, "Maggie");
        assert_eq!(card.conditions, vec!["Type 2 Diabetes"]);
        assert_eq!(card.caregiver.as_deref(), Some("Lisa"));
    }

    #[test]
    fn profile_formats_nested_records() {
        let profile = PatientProfile::from(&patient());
        assert_eq!(
            profile.conditions[0].medications,
            vec!["Metformin 500mg, twice daily at 08:00, 20:00"]
        );
        assert_eq!(profile.schedule, vec!["08:00: Breakfast"]);
        assert_eq!(profile.family, vec!["daughter in Boston", "grandchildren (3)"]);
        assert_eq!(profile.caregiver.as_deref(), Some("Lisa (companion)"));
        assert_eq!(profile.interaction_style.as_deref(), Some("warm"));
    }

    #[test]
    fn medication_format_drops_missing_parts() {
        let med = Medication {
            name: "Lisinopril".into(),
            dosage: Some("10mg".into()),
            ..Default::default()
        };
        assert_eq!(format_medication(&med), "Lisinopril 10mg");
    }

    #[test]
    fn sparse_patient_still_renders() {
        let profile = PatientProfile::from(&Patient::default());
        assert_eq!(profile.name, "Unknown");
        assert!(profile.conditions.is_empty());
        assert!(profile.caregiver.is_none());
    }
}
