//! Integration tests for the portal's session lifecycle.
//!
//! These tests require:
//! - A running Meridian Lab API with seeded test accounts
//! - The portal running against it (cargo run -p meridian-portal)
//!
//! Run with: cargo test -p meridian-integration-tests -- --ignored

use reqwest::StatusCode;

use meridian_integration_tests::{client, portal_base_url, sign_in, test_account};
use meridian_portal::guard::{LANDING_PATH, SIGNIN_PATH};

#[tokio::test]
#[ignore = "Requires running portal and lab API"]
async fn test_anonymous_guarded_route_redirects_to_signin() {
    let client = client();
    let base_url = portal_base_url();

    for path in ["/dashboard", "/bookings", "/customers", "/audit-logs"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to get guarded route");

        assert!(resp.status().is_redirection(), "{path} did not redirect");
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("redirect without location");
        assert_eq!(location, SIGNIN_PATH, "{path} redirected to {location}");
    }
}

#[tokio::test]
#[ignore = "Requires running portal and lab API"]
async fn test_anonymous_signin_page_renders() {
    let client = client();
    let base_url = portal_base_url();

    let resp = client
        .get(format!("{base_url}/signin"))
        .send()
        .await
        .expect("Failed to get sign-in page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Sign in"));
}

#[tokio::test]
#[ignore = "Requires running portal and lab API"]
async fn test_invalid_login_shows_inline_error_and_stays_anonymous() {
    let client = client();
    let base_url = portal_base_url();

    let resp = client
        .post(format!("{base_url}/signin"))
        .form(&[("email", "nobody@meridiandx.example"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to post sign-in form");

    // Failed logins re-render the form inline rather than redirecting.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid email or password"));

    // And the session is still anonymous.
    let resp = client
        .get(format!("{base_url}/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_STAFF_* account"]
async fn test_login_roundtrip_reaches_dashboard() {
    let Some((email, password)) = test_account("STAFF") else {
        panic!("TEST_STAFF_EMAIL / TEST_STAFF_PASSWORD not set");
    };

    let client = client();
    let base_url = portal_base_url();

    sign_in(&client, &email, &password).await;

    // The identity resolved by /auth/me now renders on the dashboard.
    let resp = client
        .get(format!("{base_url}/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Dashboard"));
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_STAFF_* account"]
async fn test_authenticated_signin_redirects_to_landing() {
    let Some((email, password)) = test_account("STAFF") else {
        panic!("TEST_STAFF_EMAIL / TEST_STAFF_PASSWORD not set");
    };

    let client = client();
    let base_url = portal_base_url();

    sign_in(&client, &email, &password).await;

    // Guests-only page bounces authenticated sessions to the landing route.
    let resp = client
        .get(format!("{base_url}/signin"))
        .send()
        .await
        .expect("Failed to get sign-in page");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some(LANDING_PATH)
    );
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_STAFF_* account"]
async fn test_logout_demotes_session_immediately() {
    let Some((email, password)) = test_account("STAFF") else {
        panic!("TEST_STAFF_EMAIL / TEST_STAFF_PASSWORD not set");
    };

    let client = client();
    let base_url = portal_base_url();

    sign_in(&client, &email, &password).await;

    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to post logout");
    assert!(resp.status().is_redirection());

    // The very next guarded navigation goes back to sign-in.
    let resp = client
        .get(format!("{base_url}/bookings"))
        .send()
        .await
        .expect("Failed to get bookings");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some(SIGNIN_PATH)
    );
}
