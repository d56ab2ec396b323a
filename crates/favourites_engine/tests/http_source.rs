use std::time::Duration;

use favourites_engine::{
    FavouritesSource, RemoteError, ReqwestSource, SourceSettings, TransportKind,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_BODY: &str = r#"{
    "data": [
        {"desc":"","icon":"","id":11,"link":"https://www.rust-lang.org","name":"Rust","order":0,"userId":7,"visible":1},
        {"id":12,"link":"https://docs.rs","name":"Docs","userId":7,"visible":0}
    ],
    "errorCode": 0,
    "errorMsg": ""
}"#;

fn source_for(server: &MockServer) -> ReqwestSource {
    let settings = SourceSettings {
        base_url: server.uri(),
        session_cookie: Some("loginUserName=rustacean; token_pass=abc".to_string()),
        ..SourceSettings::default()
    };
    ReqwestSource::new(settings).expect("client builds")
}

fn transport_kind(err: RemoteError) -> TransportKind {
    match err {
        RemoteError::Transport(failure) => failure.kind,
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn lists_favourites_with_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .and(header("cookie", "loginUserName=rustacean; token_pass=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LIST_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let list = source_for(&server).fetch_favourites().await.expect("list ok");

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, 11);
    assert_eq!(list[0].link, "https://www.rust-lang.org");
    assert_eq!(list[0].user_id, 7);
    assert_eq!(list[1].name, "Docs");
    assert_eq!(list[1].visible, 0);
    assert_eq!(list[1].desc, "");
}

#[tokio::test]
async fn null_data_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":null,"errorCode":0,"errorMsg":""}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let list = source_for(&server).fetch_favourites().await.expect("list ok");
    assert!(list.is_empty());
}

#[tokio::test]
async fn non_zero_error_code_is_a_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":null,"errorCode":-1001,"errorMsg":"please login first"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_favourites().await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::Server {
            code: -1001,
            message: "please login first".to_string()
        }
    );
}

#[tokio::test]
async fn http_error_status_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_favourites().await.unwrap_err();
    assert_eq!(transport_kind(err), TransportKind::HttpStatus(502));
}

#[tokio::test]
async fn garbage_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_favourites().await.unwrap_err();
    assert_eq!(transport_kind(err), TransportKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(LIST_BODY, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = SourceSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..SourceSettings::default()
    };
    let source = ReqwestSource::new(settings).expect("client builds");

    let err = source.fetch_favourites().await.unwrap_err();
    assert_eq!(transport_kind(err), TransportKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LIST_BODY, "application/json"))
        .mount(&server)
        .await;

    let settings = SourceSettings {
        base_url: server.uri(),
        max_bytes: 16,
        ..SourceSettings::default()
    };
    let source = ReqwestSource::new(settings).expect("client builds");

    let err = source.fetch_favourites().await.unwrap_err();
    assert_eq!(transport_kind(err), TransportKind::TooLarge { max_bytes: 16 });
}

#[tokio::test]
async fn delete_posts_form_encoded_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lg/collect/deletetool/json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("id=12"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":null,"errorCode":0,"errorMsg":""}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    source_for(&server)
        .delete_favourite(12)
        .await
        .expect("delete ok");
}

#[tokio::test]
async fn envelope_without_data_field_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lg/collect/usertools/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"errorCode":0,"errorMsg":""}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lg/collect/deletetool/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"errorCode":0}"#, "application/json"))
        .mount(&server)
        .await;

    let source = source_for(&server);
    assert!(source.fetch_favourites().await.expect("list ok").is_empty());
    source.delete_favourite(3).await.expect("delete ok");
}

#[tokio::test]
async fn delete_rejected_by_server_keeps_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lg/collect/deletetool/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":null,"errorCode":-1,"errorMsg":"website does not exist"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = source_for(&server).delete_favourite(99).await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::Server {
            code: -1,
            message: "website does not exist".to_string()
        }
    );
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    let settings = SourceSettings {
        // Port 9 (discard) on loopback is closed on CI runners.
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
        ..SourceSettings::default()
    };
    let source = ReqwestSource::new(settings).expect("client builds");

    let err = source.fetch_favourites().await.unwrap_err();
    let kind = transport_kind(err);
    assert!(
        matches!(kind, TransportKind::Network | TransportKind::Timeout),
        "unexpected kind {kind:?}"
    );
}
