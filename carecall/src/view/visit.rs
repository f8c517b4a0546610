use serde::{Deserialize, Serialize};

use crate::analytics::chronological;
use crate::models::{ConversationContext, Visit};
use crate::vocabulary::{enthusiasm_for_mood, mood_status, normalize_label, Enthusiasm, Status};

/// Topic shown when a visit recorded no small talk.
pub const NO_TOPIC: &str = "No specific topic discussed";

/// One labelled value on a visit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Highlight {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Highlight {
    fn new(label: &str, value: impl Into<String>, status: Option<Status>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitHighlights {
    pub visit_id: String,
    /// `YYYY-MM-DD HH:MM`, or the raw timestamp if it could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<String>,
    pub highlights: Vec<Highlight>,
}

impl VisitHighlights {
    /// Mood, food, sleep and risk are always shown. Everything else only
    /// when the visit recorded it.
    pub fn build(visit: &Visit) -> Self {
        let summary = visit.summary.as_ref();
        let mut highlights = Vec::new();

        let mood = normalize_label(visit.mood());
        highlights.push(Highlight::new(
            "Mood",
            mood.as_deref().map(capitalize).unwrap_or_else(|| "Unknown".into()),
            Some(mood_status(visit.mood())),
        ));

        if let Some(pain) = summary.and_then(|s| s.pain_report) {
            highlights.push(Highlight::new("Pain", format!("{pain}/10"), None));
        }

        if let Some(taken) = summary.and_then(|s| s.medications_taken) {
            let (value, status) = if taken {
                ("Taken", Status::Good)
            } else {
                ("Missed", Status::Danger)
            };
            highlights.push(Highlight::new("Medications", value, Some(status)));
        }

        highlights.push(Highlight::new(
            "Food Intake",
            capitalize(&visit.food_intake_label()),
            None,
        ));
        highlights.push(Highlight::new(
            "Sleep Quality",
            capitalize(&visit.sleep_quality_label()),
            None,
        ));

        if let Some(memory) = summary.and_then(|s| s.memory_issues_noted) {
            let status = if memory { Status::Warning } else { Status::Good };
            highlights.push(Highlight::new("Memory Issues", yes_no(memory), Some(status)));
        }

        if let Some(mobile) = summary.and_then(|s| s.able_to_leave_house) {
            highlights.push(Highlight::new("Able to Leave House", yes_no(mobile), None));
        }

        if let Some(topic) = visit.small_talk_topic().filter(|t| !t.trim().is_empty()) {
            highlights.push(Highlight::new("Topic", topic.trim(), None));
        }

        let risk = visit.risk_level();
        let value = match visit.risk_confidence() {
            Some(confidence) => format!("{risk} ({:.0}%)", confidence * 100.0),
            None => risk.to_string(),
        };
        highlights.push(Highlight::new("Hospitalization Risk", value, Some(risk.status())));

        Self {
            visit_id: visit.id.clone(),
            recorded_at: display_time(visit),
            caregiver: visit.caregiver.clone(),
            highlights,
        }
    }

    pub fn get(&self, label: &str) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.label == label)
    }
}

/// Everything shown in the visit modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitDetail {
    #[serde(flatten)]
    pub summary: VisitHighlights,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationContext>,
    pub needs_follow_up: bool,
    pub appointment_missed: bool,
}

impl VisitDetail {
    pub fn build(visit: &Visit) -> Self {
        let analysis = visit.analysis.as_ref();
        Self {
            summary: VisitHighlights::build(visit),
            key_insights: analysis.map(|a| a.key_insights.clone()).unwrap_or_default(),
            recommendations: analysis
                .map(|a| a.recommendations.clone())
                .unwrap_or_default(),
            risk_factors: analysis.map(|a| a.risk_factors.clone()).unwrap_or_default(),
            conversation: analysis.and_then(|a| a.conversation_context.clone()),
            needs_follow_up: visit.needs_follow_up(),
            appointment_missed: visit
                .summary
                .as_ref()
                .and_then(|s| s.markers.as_ref())
                .and_then(|m| m.appointment_missed)
                .unwrap_or(false),
        }
    }
}

/// What the next call should know about the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastVisitContext {
    pub visit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub enthusiasm: Enthusiasm,
    pub topic: String,
    pub key_insights: Vec<String>,
}

impl LastVisitContext {
    /// Context from the chronologically latest visit, `None` without visits.
    pub fn from_visits(visits: &[Visit]) -> Option<Self> {
        let last = *chronological(visits).last()?;
        Some(Self {
            visit_id: last.id.clone(),
            recorded_at: display_time(last),
            mood: normalize_label(last.mood()),
            enthusiasm: enthusiasm_for_mood(last.mood()),
            topic: last
                .small_talk_topic()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(NO_TOPIC)
                .to_string(),
            key_insights: last
                .analysis
                .as_ref()
                .map(|a| a.key_insights.clone())
                .unwrap_or_default(),
        })
    }
}

fn display_time(visit: &Visit) -> Option<String> {
    match visit.recorded_at() {
        Some(t) => Some(t.format("%Y-%m-%d %H:%M").to_string()),
        None => visit.timestamp.clone(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HospitalizationPrediction, VisitAnalysis, VisitSummary};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_visit() -> Visit {
        serde_json::from_value(json!({
            "_id": "v1",
            "patientId": "p1",
            "caregiver": "Lisa",
            "timestamp": "2025-08-01T14:30:00.123000",
            "summary": {
                "medicationsTaken": false,
                "painReport": 6,
                "mood": "Tired",
                "memoryIssuesNoted": true,
                "foodIntake": "low",
                "sleepQuality": "poor",
                "ableToLeaveHouse": false,
                "smallTalkTopic": "Gardening",
                "markers": {"needsFollowUp": true, "appointmentMissed": false}
            },
            "openaiAnalysis": {
                "keyInsights": ["Skipped evening dose"],
                "recommendations": ["Call pharmacy"],
                "riskFactors": ["Missed medication"],
                "conversationContext": {"enthusiasmLevel": "low", "followUpTopics": ["garden"]}
            },
            "hospitalizationPrediction": {"riskLevel": "HIGH", "confidence": 0.856}
        }))
        .unwrap()
    }

    #[test]
    fn highlights_for_a_complete_visit() {
        let h = VisitHighlights::build(&full_visit());
        assert_eq!(h.recorded_at.as_deref(), Some("2025-08-01 14:30"));

        let mood = h.get("Mood").unwrap();
        assert_eq!(mood.value, "Tired");
        assert_eq!(mood.status, Some(Status::Warning));

        assert_eq!(h.get("Pain").unwrap().value, "6/10");
        let meds = h.get("Medications").unwrap();
        assert_eq!((meds.value.as_str(), meds.status), ("Missed", Some(Status::Danger)));
        assert_eq!(h.get("Food Intake").unwrap().value, "Low");
        assert_eq!(h.get("Sleep Quality").unwrap().value, "Poor");
        assert_eq!(h.get("Memory Issues").unwrap().value, "Yes");
        assert_eq!(h.get("Able to Leave House").unwrap().value, "No");
        assert_eq!(h.get("Topic").unwrap().value, "Gardening");

        let risk = h.get("Hospitalization Risk").unwrap();
        assert_eq!(risk.value, "HIGH (86%)");
        assert_eq!(risk.status, Some(Status::Danger));
    }

    #[test]
    fn sparse_visit_shows_defaults_only() {
        let h = VisitHighlights::build(&Visit::default());
        let labels: Vec<&str> = h.highlights.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Mood", "Food Intake", "Sleep Quality", "Hospitalization Risk"]
        );
        assert_eq!(h.get("Mood").unwrap().value, "Unknown");
        assert_eq!(h.get("Mood").unwrap().status, Some(Status::Warning));
        assert_eq!(h.get("Food Intake").unwrap().value, "Unknown");
        let risk = h.get("Hospitalization Risk").unwrap();
        assert_eq!((risk.value.as_str(), risk.status), ("LOW", Some(Status::Good)));
    }

    #[test]
    fn taken_medication_is_good() {
        let visit = Visit {
            summary: Some(VisitSummary {
                medications_taken: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let h = VisitHighlights::build(&visit);
        assert_eq!(h.get("Medications").unwrap().status, Some(Status::Good));
    }

    #[test]
    fn detail_carries_analysis_lists_and_markers() {
        let detail = VisitDetail::build(&full_visit());
        assert_eq!(detail.key_insights, vec!["Skipped evening dose"]);
        assert_eq!(detail.recommendations, vec!["Call pharmacy"]);
        assert_eq!(detail.risk_factors, vec!["Missed medication"]);
        assert!(detail.needs_follow_up);
        assert!(!detail.appointment_missed);
        assert_eq!(
            detail.conversation.unwrap().follow_up_topics,
            vec!["garden"]
        );

        let json = serde_json::to_value(VisitDetail::build(&full_visit())).unwrap();
        assert_eq!(json["visitId"], "v1");
        assert_eq!(json["keyInsights"][0], "Skipped evening dose");
    }

    #[test]
    fn last_visit_context_uses_latest_visit() {
        let older = Visit {
            id: "old".into(),
            timestamp: Some("2025-08-01T09:00:00".into()),
            summary: Some(VisitSummary {
                mood: Some("sad".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let newer = Visit {
            id: "new".into(),
            timestamp: Some("2025-08-03T09:00:00".into()),
            summary: Some(VisitSummary {
                mood: Some("Excited".into()),
                small_talk_topic: Some("grandchildren".into()),
                ..Default::default()
            }),
            analysis: Some(VisitAnalysis {
                key_insights: vec!["Looking forward to visit".into()],
                hospitalization_prediction: Some(HospitalizationPrediction::default()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let ctx = LastVisitContext::from_visits(&[newer, older]).unwrap();
        assert_eq!(ctx.visit_id, "new");
        assert_eq!(ctx.mood.as_deref(), Some("excited"));
        assert_eq!(ctx.enthusiasm, Enthusiasm::High);
        assert_eq!(ctx.topic, "grandchildren");
        assert_eq!(ctx.key_insights, vec!["Looking forward to visit"]);
    }

    #[test]
    fn last_visit_context_defaults() {
        assert!(LastVisitContext::from_visits(&[]).is_none());

        let ctx = LastVisitContext::from_visits(&[Visit::default()]).unwrap();
        assert_eq!(ctx.enthusiasm, Enthusiasm::Unknown);
        assert_eq!(ctx.topic, NO_TOPIC);
        assert!(ctx.key_insights.is_empty());
    }
}
