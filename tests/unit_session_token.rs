use ajs_admin::config::session::SessionConfig;
use ajs_admin::utils::session::{
    SESSION_TTL_SECS, SessionClaims, UserProfile, decode_session_token, issue_session_token,
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

fn get_test_session_config() -> SessionConfig {
    SessionConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        cookie_secure: false,
        idle_timeout_secs: 900,
        countdown_secs: 60,
    }
}

fn sample_profile() -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        email: "jane@ajs.example".to_string(),
        username: Some("jane".to_string()),
        role: Some("teacher".to_string()),
        full_name: "Jane Doe".to_string(),
        account_id: Some("AJS-042".to_string()),
        school: Some("Northside High".to_string()),
        must_change_password: false,
    }
}

#[test]
fn test_issue_session_token_success() {
    let config = get_test_session_config();
    let profile = sample_profile();

    let token = issue_session_token(&profile, &config).unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_round_trip_preserves_claims() {
    let config = get_test_session_config();
    let profile = sample_profile();

    let token = issue_session_token(&profile, &config).unwrap();
    let claims = decode_session_token(&token, &config).unwrap();

    assert_eq!(claims.sub, profile.id.to_string());
    assert_eq!(claims.role.as_deref(), Some("teacher"));
    assert_eq!(claims.email, "jane@ajs.example");
    assert_eq!(claims.account_id.as_deref(), Some("AJS-042"));
    assert_eq!(claims.full_name, "Jane Doe");
    assert_eq!(claims.school.as_deref(), Some("Northside High"));
    assert!(!claims.must_change_password);
    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
}

#[test]
fn test_optional_fields_survive_as_none() {
    let config = get_test_session_config();
    let mut profile = sample_profile();
    profile.role = None;
    profile.account_id = None;
    profile.school = None;

    let token = issue_session_token(&profile, &config).unwrap();
    let claims = decode_session_token(&token, &config).unwrap();

    assert_eq!(claims.role, None);
    assert_eq!(claims.account_id, None);
    assert_eq!(claims.school, None);
}

#[test]
fn test_decode_rejects_wrong_secret() {
    let config = get_test_session_config();
    let other = SessionConfig {
        secret: "a_completely_different_secret".to_string(),
        ..get_test_session_config()
    };

    let token = issue_session_token(&sample_profile(), &config).unwrap();
    assert!(decode_session_token(&token, &other).is_err());
}

#[test]
fn test_decode_rejects_expired_token() {
    let config = get_test_session_config();
    let now = Utc::now().timestamp();

    // Well past the default validation leeway.
    let claims = SessionClaims {
        sub: Uuid::new_v4().to_string(),
        role: Some("admin".to_string()),
        email: "old@ajs.example".to_string(),
        account_id: None,
        full_name: "Old Session".to_string(),
        school: None,
        must_change_password: false,
        iat: now - 7200,
        exp: now - 3600,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(decode_session_token(&token, &config).is_err());
}

#[test]
fn test_decode_rejects_malformed_token() {
    let config = get_test_session_config();

    assert!(decode_session_token("not.a.token", &config).is_err());
    assert!(decode_session_token("", &config).is_err());
    assert!(decode_session_token("a.b", &config).is_err());
}

#[test]
fn test_decode_rejects_token_missing_required_claim() {
    let config = get_test_session_config();
    let now = Utc::now().timestamp();

    // A token signed with the right key but lacking the full claim set
    // must not decode.
    #[derive(serde::Serialize)]
    struct PartialClaims {
        sub: String,
        iat: i64,
        exp: i64,
    }

    let token = encode(
        &Header::default(),
        &PartialClaims {
            sub: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 3600,
        },
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(decode_session_token(&token, &config).is_err());
}

#[test]
fn test_tampered_payload_fails_signature_check() {
    let config = get_test_session_config();
    let token = issue_session_token(&sample_profile(), &config).unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let forged_payload = "eyJzdWIiOiJmb3JnZWQifQ";
    parts[1] = forged_payload;
    let tampered = parts.join(".");

    assert!(decode_session_token(&tampered, &config).is_err());
}
