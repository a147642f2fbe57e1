use mockito::{Matcher, Server};
use taskpager::client::ApiClient;
use taskpager::model::Filter;

#[tokio::test]
async fn test_fetch_sends_page_and_limit() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tasks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"title":"A","description":"d","priority":"low","completed":false}]"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), true).unwrap();
    let tasks = client.fetch_page(2, 1, &Filter::default()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 1);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(tasks[0].description, "d");
    assert_eq!(tasks[0].priority, "low");
    assert!(!tasks[0].completed);
}

#[tokio::test]
async fn test_fetch_forwards_filters() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tasks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("completed".into(), "true".into()),
            Matcher::UrlEncoded("priority".into(), "low".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let filter = Filter {
        completed: Some(true),
        priority: Some("low".to_string()),
    };
    let client = ApiClient::new(&server.url(), true).unwrap();
    let tasks = client.fetch_page(1, 10, &filter).await.unwrap();

    mock.assert_async().await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_non_ok_status_is_an_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tasks")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), true).unwrap();
    let result = client.fetch_page(1, 1, &Filter::default()).await;

    mock.assert_async().await;
    let err = result.unwrap_err();
    assert!(err.contains("500"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_paging_envelope_is_rejected() {
    // The server contract is a bare array; an {items, total} wrapper is
    // a malformed payload, not something to silently unwrap.
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/tasks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [], "total": 0}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), true).unwrap();
    let result = client.fetch_page(1, 1, &Filter::default()).await;

    assert!(result.unwrap_err().contains("Malformed"));
}

#[tokio::test]
async fn test_optional_fields_default_and_timestamps_parse() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/tasks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":7,"title":"Only title","completed":true,"due_date":"2026-02-14T12:00:00",
                 "created_at":"2026-01-05T09:30:00","updated_at":"2026-01-06T10:00:00"}]"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), true).unwrap();
    let tasks = client.fetch_page(1, 1, &Filter::default()).await.unwrap();

    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.description, "");
    assert_eq!(task.priority, "");
    assert_eq!(task.status_label(), "Done");
    assert!(task.due_date.is_some());
    assert!(task.created_at.is_some());
    assert!(task.updated_at.is_some());
}

#[test]
fn test_invalid_base_url_is_rejected() {
    assert!(ApiClient::new("not a url", true).is_err());
    assert!(ApiClient::new("/just/a/path", true).is_err());
}
