// Common test utilities for end-to-end tests.

use serde_json::Value;
use std::time::Duration;

pub const CHESS_CLUB: &str = "Chess Club";
pub const PROGRAMMING_CLASS: &str = "Programming Class";

/// Builds an HTTP client with a bounded timeout.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("build http client")
}

/// Builds `/activities/{activity}/{action}` with the name percent-encoded.
pub fn activity_url(base: &str, activity: &str, action: &str) -> String {
    format!(
        "{}/activities/{}/{}",
        base,
        urlencoding::encode(activity),
        action
    )
}

/// Reads status and JSON body from a response.
pub async fn into_json(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

/// GET /activities, asserting 200.
pub async fn list_activities(base: &str) -> Value {
    let resp = assert_ok(client().get(format!("{}/activities", base)).send().await);
    let (status, body) = into_json(resp).await;
    assert_equal(200, status);
    body
}

/// POST /activities/{activity}/signup?email=...
pub async fn signup(base: &str, activity: &str, email: &str) -> (u16, Value) {
    let resp = assert_ok(
        client()
            .post(activity_url(base, activity, "signup"))
            .query(&[("email", email)])
            .send()
            .await,
    );
    into_json(resp).await
}

/// DELETE /activities/{activity}/unregister?email=...
pub async fn unregister(base: &str, activity: &str, email: &str) -> (u16, Value) {
    let resp = assert_ok(
        client()
            .delete(activity_url(base, activity, "unregister"))
            .query(&[("email", email)])
            .send()
            .await,
    );
    into_json(resp).await
}

/// Extracts the participant list of one activity from a listing.
pub fn participants(activities: &Value, activity: &str) -> Vec<String> {
    activities[activity]["participants"]
        .as_array()
        .unwrap_or_else(|| panic!("{} has no participants array", activity))
        .iter()
        .map(|p| p.as_str().expect("participant is a string").to_string())
        .collect()
}

/// Asserts that a result is Ok and unwraps it.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + std::fmt::Debug>(want: T, got: T) {
    if want != got {
        panic!("want={:?} got={:?}", want, got);
    }
}
