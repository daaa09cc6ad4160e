//! Integration tests for role-based route gating.
//!
//! These tests require:
//! - A running Meridian Lab API with seeded accounts for each role
//! - The portal running against it
//!
//! Run with: cargo test -p meridian-integration-tests -- --ignored

use reqwest::StatusCode;

use meridian_integration_tests::{client, portal_base_url, sign_in, test_account};
use meridian_portal::guard::UNAUTHORIZED_PATH;

/// Assert that `path` redirects the signed-in client to `/unauthorized`.
async fn assert_unauthorized(client: &reqwest::Client, path: &str) {
    let base_url = portal_base_url();
    let resp = client
        .get(format!("{base_url}{path}"))
        .send()
        .await
        .expect("Failed to get route");

    assert!(resp.status().is_redirection(), "{path} did not redirect");
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some(UNAUTHORIZED_PATH),
        "{path} did not land on /unauthorized"
    );
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_TECHNICIAN_* account"]
async fn test_technician_is_kept_out_of_staff_routes() {
    let Some((email, password)) = test_account("TECHNICIAN") else {
        panic!("TEST_TECHNICIAN_EMAIL / TEST_TECHNICIAN_PASSWORD not set");
    };

    let client = client();
    sign_in(&client, &email, &password).await;

    for path in ["/bookings", "/customers", "/payments", "/branches"] {
        assert_unauthorized(&client, path).await;
    }

    // But the work queue renders.
    let base_url = portal_base_url();
    let resp = client
        .get(format!("{base_url}/worklist"))
        .send()
        .await
        .expect("Failed to get worklist");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_CUSTOMER_* account"]
async fn test_customer_sees_only_their_own_views() {
    let Some((email, password)) = test_account("CUSTOMER") else {
        panic!("TEST_CUSTOMER_EMAIL / TEST_CUSTOMER_PASSWORD not set");
    };

    let client = client();
    sign_in(&client, &email, &password).await;

    for path in ["/bookings", "/worklist", "/reports/revenue", "/audit-logs"] {
        assert_unauthorized(&client, path).await;
    }

    let base_url = portal_base_url();
    let resp = client
        .get(format!("{base_url}/my/bookings"))
        .send()
        .await
        .expect("Failed to get my bookings");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal, lab API, and TEST_BRANCH_ADMIN_* account"]
async fn test_branch_admin_is_kept_out_of_super_admin_routes() {
    let Some((email, password)) = test_account("BRANCH_ADMIN") else {
        panic!("TEST_BRANCH_ADMIN_EMAIL / TEST_BRANCH_ADMIN_PASSWORD not set");
    };

    let client = client();
    sign_in(&client, &email, &password).await;

    assert_unauthorized(&client, "/branches").await;
    assert_unauthorized(&client, "/audit-logs").await;

    // Manager routes still render.
    let base_url = portal_base_url();
    for path in ["/technicians", "/reports/revenue"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to get route");
        assert_eq!(resp.status(), StatusCode::OK, "{path} did not render");
    }
}

#[tokio::test]
#[ignore = "Requires running portal and lab API"]
async fn test_unauthorized_page_renders_for_everyone() {
    let client = client();
    let base_url = portal_base_url();

    let resp = client
        .get(format!("{base_url}/unauthorized"))
        .send()
        .await
        .expect("Failed to get unauthorized page");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/no-such-page"))
        .send()
        .await
        .expect("Failed to get missing page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
