// End-to-end tests for DELETE /activities/{activity_name}/unregister.

use crate::tests::support::{
    activity_url, assert_equal, assert_ok, client, into_json, list_activities, participants,
    unregister, DirectoryServer, CHESS_CLUB, PROGRAMMING_CLASS,
};

#[tokio::test]
async fn test_unregister_successful() {
    let server = DirectoryServer::start().await;

    let (status, body) = unregister(server.base(), CHESS_CLUB, "michael@mergington.edu").await;
    assert_equal(200, status);
    assert_eq!(
        body["message"],
        "Unregistered michael@mergington.edu from Chess Club"
    );

    let data = list_activities(server.base()).await;
    assert_eq!(
        participants(&data, CHESS_CLUB),
        vec!["daniel@mergington.edu"]
    );
}

#[tokio::test]
async fn test_unregister_non_existent_activity() {
    let server = DirectoryServer::start().await;

    let (status, body) =
        unregister(server.base(), "Non Existent Activity", "test@mergington.edu").await;
    assert_equal(404, status);
    assert_eq!(body["detail"], "Activity not found");
}

#[tokio::test]
async fn test_unregister_not_registered_student() {
    let server = DirectoryServer::start().await;

    let (status, body) =
        unregister(server.base(), CHESS_CLUB, "notregistered@mergington.edu").await;
    assert_equal(400, status);
    assert_eq!(
        body["detail"],
        "notregistered@mergington.edu is not registered for this activity"
    );
}

/// A student enrolled elsewhere is still "not registered" here.
#[tokio::test]
async fn test_unregister_member_of_other_activity() {
    let server = DirectoryServer::start().await;

    let (status, _) = unregister(server.base(), CHESS_CLUB, "emma@mergington.edu").await;
    assert_equal(400, status);

    let data = list_activities(server.base()).await;
    assert!(participants(&data, PROGRAMMING_CLASS).contains(&"emma@mergington.edu".to_string()));
}

#[tokio::test]
async fn test_unregister_reduces_participant_count() {
    let server = DirectoryServer::start().await;

    let before = participants(&list_activities(server.base()).await, PROGRAMMING_CLASS).len();

    let (status, _) = unregister(server.base(), PROGRAMMING_CLASS, "emma@mergington.edu").await;
    assert_equal(200, status);

    let after = participants(&list_activities(server.base()).await, PROGRAMMING_CLASS).len();
    assert_equal(before - 1, after);
}

#[tokio::test]
async fn test_unregister_twice_fails_second_time() {
    let server = DirectoryServer::start().await;

    let (first, _) = unregister(server.base(), CHESS_CLUB, "daniel@mergington.edu").await;
    let (second, body) = unregister(server.base(), CHESS_CLUB, "daniel@mergington.edu").await;
    assert_equal(200, first);
    assert_equal(400, second);
    assert_eq!(
        body["detail"],
        "daniel@mergington.edu is not registered for this activity"
    );
}

#[tokio::test]
async fn test_unregister_without_email_is_rejected() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .delete(activity_url(server.base(), CHESS_CLUB, "unregister"))
            .send()
            .await,
    );
    let (status, body) = into_json(resp).await;
    assert_equal(422, status);
    assert_eq!(body["detail"], "missing required query parameter: email");
}

#[tokio::test]
async fn test_unregister_repeated_email_uses_last_value() {
    let server = DirectoryServer::start().await;

    let resp = assert_ok(
        client()
            .delete(activity_url(server.base(), CHESS_CLUB, "unregister"))
            .query(&[("email", "michael@mergington.edu"), ("email", "daniel@mergington.edu")])
            .send()
            .await,
    );
    let (status, body) = into_json(resp).await;
    assert_equal(200, status);
    assert_eq!(body["message"], "Unregistered daniel@mergington.edu from Chess Club");
    assert_eq!(
        participants(&list_activities(server.base()).await, CHESS_CLUB),
        vec!["michael@mergington.edu"]
    );
}
