mod support;

use httpmock::prelude::*;
use mailosaur_client::{Error, ErrorKind, ListParams, SearchCriteria, SearchMatch, SearchParams};
use serde_json::json;

fn summary(id: &str, subject: &str) -> serde_json::Value {
    json!({
        "id": id,
        "server": "srv",
        "from": [{ "name": "Sender", "email": "sender@example.com" }],
        "to": [{ "name": "", "email": "inbox@srv.mailosaur.net" }],
        "received": "2024-05-01T10:00:00Z",
        "subject": subject,
        "summary": "",
        "attachments": 0
    })
}

#[tokio::test]
async fn search_returns_first_match() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .query_param("server", "srv")
                .query_param_exists("receivedAfter")
                .header("authorization", support::AUTHORIZATION)
                .json_body_partial(r#"{"subject":"abc","match":"ALL"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "items": [summary("m1", "abc 123")] }));
        })
        .await;

    let client = support::client(&server);
    let result = client
        .messages()
        .search(&SearchParams::new("srv"), &SearchCriteria::new().subject("abc"))
        .await
        .unwrap();

    search.assert_hits_async(1).await;
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, "m1");
    assert_eq!(result.items[0].from[0].email, "sender@example.com");
}

#[tokio::test]
async fn search_sends_any_match_mode() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .json_body_partial(r#"{"sentTo":"a@srv.mailosaur.net","match":"ANY"}"#);
            then.status(200).json_body(json!({ "items": [summary("m1", "x")] }));
        })
        .await;

    let client = support::client(&server);
    let criteria = SearchCriteria::new()
        .sent_to("a@srv.mailosaur.net")
        .match_mode(SearchMatch::Any);
    client
        .messages()
        .search(&SearchParams::new("srv"), &criteria)
        .await
        .unwrap();

    search.assert_hits_async(1).await;
}

#[tokio::test]
async fn zero_timeout_makes_a_single_request() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "5000")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = support::client(&server);
    let result = client
        .messages()
        .search(
            &SearchParams::new("srv").timeout(0),
            &SearchCriteria::new().subject("abc"),
        )
        .await
        .unwrap();

    search.assert_hits_async(1).await;
    assert!(result.items.is_empty());
}

#[tokio::test]
async fn suppressed_timeout_returns_empty_result() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "1000")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = support::client(&server);
    let result = client
        .messages()
        .search(
            &SearchParams::new("srv").timeout(1).error_on_timeout(false),
            &SearchCriteria::new().sent_from("neverfound@example.com"),
        )
        .await
        .unwrap();

    search.assert_hits_async(1).await;
    assert!(result.items.is_empty());
}

#[tokio::test]
async fn search_timeout_is_an_error_by_default() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "1000")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = support::client(&server);
    let err = client
        .messages()
        .search(
            &SearchParams::new("srv").timeout(1),
            &SearchCriteria::new().subject("abc"),
        )
        .await
        .unwrap_err();

    search.assert_hits_async(1).await;
    assert!(matches!(err, Error::SearchTimeout));
    assert_eq!(err.kind().as_str(), "search_timeout");
}

#[tokio::test]
async fn rejected_search_is_not_retried() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(400).json_body(json!({
                "errors": [{
                    "field": "sentFrom",
                    "detail": [{ "description": "Must be a valid email address" }]
                }]
            }));
        })
        .await;

    let client = support::client(&server);
    let err = client
        .messages()
        .search(
            &SearchParams::new("srv"),
            &SearchCriteria::new().sent_from(".not_an_email_address"),
        )
        .await
        .unwrap_err();

    search.assert_hits_async(1).await;
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.to_string(), "(sentFrom) Must be a valid email address\r\n");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert!(err.body().unwrap().contains("sentFrom"));
}

#[tokio::test]
async fn get_fetches_the_single_match() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .query_param("server", "srv")
                .query_param("itemsPerPage", "1")
                .query_param_exists("receivedAfter");
            then.status(200)
                .json_body(json!({ "items": [summary("m1", "Welcome")] }));
        })
        .await;
    let fetch = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/messages/m1");
            then.status(200).json_body(json!({
                "id": "m1",
                "subject": "Welcome",
                "server": "srv",
                "text": { "body": "hello", "links": [] },
                "attachments": [{ "id": "a1", "contentType": "image/png", "fileName": "cat.png", "length": 82138 }]
            }));
        })
        .await;

    let client = support::client(&server);
    let message = client
        .messages()
        .get(
            &SearchParams::new("srv"),
            &SearchCriteria::new().sent_to("inbox@srv.mailosaur.net"),
        )
        .await
        .unwrap();

    search.assert_hits_async(1).await;
    fetch.assert_hits_async(1).await;
    assert_eq!(message.subject, "Welcome");
    assert_eq!(message.text.unwrap().body, "hello");
    assert_eq!(message.attachments[0].file_name, "cat.png");
    assert_eq!(message.attachments[0].length, Some(82138));
}

#[tokio::test]
async fn get_by_id_not_found_is_invalid_request() {
    let server = MockServer::start_async().await;
    let fetch = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/messages/efe907e9-74ed-4113-a3e0-a3d41d914765");
            then.status(404);
        })
        .await;

    let client = support::client(&server);
    let err = client
        .messages()
        .get_by_id("efe907e9-74ed-4113-a3e0-a3d41d914765")
        .await
        .unwrap_err();

    fetch.assert_hits_async(1).await;
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.to_string(), "Not found, check input parameters.");
}

#[tokio::test]
async fn list_passes_paging_parameters() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/messages")
                .query_param("server", "srv")
                .query_param("page", "2")
                .query_param("itemsPerPage", "5");
            then.status(200).json_body(json!({
                "items": [summary("m1", "one"), summary("m2", "two")]
            }));
        })
        .await;

    let client = support::client(&server);
    let result = client
        .messages()
        .list(&ListParams::new("srv").page(2).items_per_page(5))
        .await
        .unwrap();

    list.assert_hits_async(1).await;
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[1].subject, "two");
}

#[tokio::test]
async fn delete_all_expects_no_content() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/messages")
                .query_param("server", "srv");
            then.status(204);
        })
        .await;

    let client = support::client(&server);
    client.messages().delete_all("srv").await.unwrap();

    delete.assert_hits_async(1).await;
}

#[tokio::test]
async fn unauthorized_request_reports_authentication_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/messages/m1");
            then.status(401);
        })
        .await;

    let client = support::client(&server);
    let err = client.messages().get_by_id("m1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.to_string(), "Authentication failed, check your API key.");
}

#[tokio::test]
async fn search_waits_for_late_delivery_on_server_schedule() {
    let empty = r#"{"items":[]}"#;
    let found = json!({ "items": [summary("m1", "abc")] }).to_string();
    let server = support::ScriptedServer::start(vec![
        support::reply("200 OK", Some("1000,2000"), empty),
        support::reply("200 OK", Some("1000,2000"), empty),
        support::reply("200 OK", None, &found),
    ])
    .await;

    let client = support::client_for(&server.base_url);
    let start = std::time::Instant::now();
    let result = client
        .messages()
        .search(&SearchParams::new("srv"), &SearchCriteria::new().subject("abc"))
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(server.hits(), 3);
    assert_eq!(result.items[0].id, "m1");
    // 1s then 2s, where the default schedule would wait 1s twice
    assert!(elapsed >= std::time::Duration::from_secs(3), "{elapsed:?}");
    assert!(elapsed < std::time::Duration::from_secs(5), "{elapsed:?}");
}

#[tokio::test]
async fn server_delay_longer_than_timeout_stops_after_one_request() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "3000")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = support::client(&server);
    let err = client
        .messages()
        .search(
            &SearchParams::new("srv").timeout(2),
            &SearchCriteria::new().subject("abc"),
        )
        .await
        .unwrap_err();

    search.assert_hits_async(1).await;
    assert!(matches!(err, Error::SearchTimeout));
}
