//! Live tests against a real Bullhorn cluster.
//!
//! These tests are opt-in and require environment variables to be set:
//! - BULLHORN_DOMAIN: Cluster domain, e.g. `bullhornstaffing.com`
//! - BULLHORN_CLIENT_ID / BULLHORN_CLIENT_SECRET: OAuth client identity
//! - BULLHORN_USER / BULLHORN_PASSWORD: API account credentials
//!
//! Tests are skipped if any variable is not set. The target cluster must
//! hold a corporate user with id 5 and a candidate with id 505.

use bullhorn_rest::{BullhornClient, ClientConfig, Credentials};

/// Get live configuration and credentials from environment.
/// Returns None if not set, causing tests to be skipped.
fn live_setup() -> Option<(ClientConfig, Credentials)> {
    let config = ClientConfig::from_env().ok()?;
    let username = std::env::var("BULLHORN_USER").ok()?;
    let password = std::env::var("BULLHORN_PASSWORD").ok()?;
    Some((config, Credentials::new(username, password)))
}

#[tokio::test]
async fn test_live_session_lifecycle() {
    let Some((config, credentials)) = live_setup() else {
        eprintln!("Skipping test_live_session_lifecycle: BULLHORN_* not set");
        return;
    };

    let mut client = BullhornClient::new(config).unwrap();

    let session = client.connect(&credentials).await.unwrap();
    assert!(!session.key().is_empty());

    let user = client.corporate_user(5).await.unwrap();
    assert!(user["userType"].is_object() || user["userType"].is_null());

    let candidate = client.candidate(505).await.unwrap();
    assert_eq!(candidate["id"], 505);

    let vitals = client.candidate_vitals(505).await.unwrap();
    assert!(vitals.get("email").is_some());

    // Entity reads share the session freely
    let (history, education) = tokio::join!(
        client.candidate_work_history(505),
        client.candidate_education_history(505)
    );
    assert!(history.is_ok());
    assert!(education.is_ok());

    let status = client.logout().await.unwrap();
    assert_eq!(status, 200);
    assert!(!client.has_session());
}
