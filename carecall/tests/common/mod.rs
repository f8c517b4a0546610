//! Record-store fixtures shaped like the documents the call pipeline writes.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carecall::config::StoreConfig;
use carecall::store::HttpVisitStore;

pub const PATIENT_ID: &str = "688c51b43b594570587685ee";

pub fn patient() -> Value {
    json!({
        "_id": PATIENT_ID,
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
        "createdAt": "2025-07-30T12:00:00"
    })
}

/// Two visits, newest first as the store sorts them.
pub fn visits() -> Value {
    json!([
        {
            "_id": "v2",
            "patientId": PATIENT_ID,
            "caregiver": "Lisa",
            "timestamp": "2025-08-02T14:30:00.123000",
            "summary": {
                "medicationsTaken": true,
                "painReport": 2,
                "mood": "happy",
                "foodIntake": "low",
                "sleepQuality": "good",
                "smallTalkTopic": "Baking",
                "markers": {"needsFollowUp": false}
            },
            "openaiAnalysis": {
                "keyInsights": ["Enjoyed talking about baking"],
                "conversationContext": {"enthusiasmLevel": "high"}
            },
            "hospitalizationPrediction": {"riskLevel": "LOW", "confidence": 0.82, "prediction": 0}
        },
        {
            "_id": "v1",
            "patientId": PATIENT_ID,
            "caregiver": "Lisa",
            "timestamp": "2025-08-01T09:00:00",
            "summary": {
                "medicationsTaken": false,
                "painReport": 8,
                "mood": "sad",
                "foodIntake": "normal",
                "sleepQuality": "poor",
                "markers": {"needsFollowUp": true}
            }
        }
    ])
}

pub async fn mock_store() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": {
                "totalPatients": 1,
                "totalVisits": 2,
                "recentVisits": 2,
                "needsFollowUp": 1,
                "highRiskPatients": 0
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/patients"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "patients": [patient()]})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/patients/{PATIENT_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "patient": patient()})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/patients/{PATIENT_ID}/visits")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "visits": visits()})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/patients/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "error": "Patient not found"})),
        )
        .mount(&server)
        .await;

    server
}

pub fn store_for(server: &MockServer) -> HttpVisitStore {
    HttpVisitStore::new(&StoreConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .expect("store client")
}
