use rudav::{DavClient, DavConfig, ResourceKind, Session};

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let config = DavConfig::from_url(&server.uri()).expect("mock server uri");
    Session::new(DavClient::new(config).expect("client"))
}

fn listing_body() -> &'static str {
    r#"<?xml version="1.0"?>
    <d:multistatus xmlns:d="DAV:">
        <d:response>
            <d:href>/docs/</d:href>
            <d:propstat>
                <d:prop>
                    <d:getlastmodified>Mon, 01 Jan 2024 12:00:00 GMT</d:getlastmodified>
                    <d:getetag>"self"</d:getetag>
                    <d:resourcetype><d:collection/></d:resourcetype>
                </d:prop>
                <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
        </d:response>
        <d:response>
            <d:href>/docs/reports/</d:href>
            <d:propstat>
                <d:prop>
                    <d:getetag>"dir"</d:getetag>
                    <d:resourcetype><d:collection/></d:resourcetype>
                </d:prop>
                <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
        </d:response>
        <d:response>
            <d:href>/docs/notes.txt</d:href>
            <d:propstat>
                <d:prop>
                    <d:getcontentlength>42</d:getcontentlength>
                    <d:getcontenttype>text/plain</d:getcontenttype>
                    <d:getetag>"file"</d:getetag>
                    <d:resourcetype/>
                </d:prop>
                <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
        </d:response>
    </d:multistatus>"#
}

#[tokio::test]
async fn test_ls_strips_the_self_entry() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/docs/"))
        .and(header("Depth", "1"))
        .respond_with(ResponseTemplate::new(207).set_body_string(listing_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    assert_eq!(session.cwd(), "/docs/");

    // three entries in the listing, the directory itself is dropped
    let entries = session.ls(".").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].href, "/docs/reports/");
    assert!(entries[0].is_collection());
    assert_eq!(
        entries[1].kind,
        ResourceKind::File {
            size: 42,
            content_type: "text/plain".to_string()
        }
    );
}

#[tokio::test]
async fn test_ls_resolves_relative_paths_against_cwd() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .and(path("/a/b/c/"))
        .respond_with(ResponseTemplate::new(207).set_body_string(
            r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:"></d:multistatus>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("/a/b");
    let entries = session.ls("c").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_cd_needs_no_round_trip_and_never_fails() {
    // no mocks mounted: any request would 404 the mock server
    let server = MockServer::start().await;
    let mut session = session_for(&server);

    session.cd("/definitely/not/there");
    assert_eq!(session.cwd(), "/definitely/not/there/");
    session.cd("../..");
    assert_eq!(session.cwd(), "/definitely/");
    session.cd("..");
    session.cd("..");
    assert_eq!(session.cwd(), "/");
}

#[tokio::test]
async fn test_round_trip_failure_surfaces_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session.ls("/nope").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_mkdir_conflict_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .and(path("/existing/"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session.mkdir("existing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(405));
}

#[tokio::test]
async fn test_upload_puts_bytes_at_resolved_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/docs/notes.txt"))
        .and(body_string("hello webdav"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    session.upload("notes.txt", b"hello webdav").await.unwrap();
}

#[tokio::test]
async fn test_download_returns_body_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file content".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    let content = session.download("notes.txt").await.unwrap();
    assert_eq!(content, b"file content");
}

#[tokio::test]
async fn test_mv_resolves_source_and_directory_target() {
    let server = MockServer::start().await;
    let destination = format!("{}/archive/notes.txt", server.uri());
    Mock::given(method("MOVE"))
        .and(path("/docs/notes.txt"))
        .and(header("Destination", destination.as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    session.mv("notes.txt", "/archive").await.unwrap();
}

#[tokio::test]
async fn test_mv_to_file_target_is_a_rename() {
    let server = MockServer::start().await;
    let destination = format!("{}/docs/b.txt", server.uri());
    Mock::given(method("MOVE"))
        .and(path("/docs/notes.txt"))
        .and(header("Destination", destination.as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    // a file-shaped target keeps its name instead of gaining the source's
    session.mv("notes.txt", "b.txt").await.unwrap();
}

#[tokio::test]
async fn test_cp_to_directory_target_appends_source_name() {
    let server = MockServer::start().await;
    let destination = format!("{}/archive/notes.txt", server.uri());
    Mock::given(method("COPY"))
        .and(path("/docs/notes.txt"))
        .and(header("Destination", destination.as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    session.cp("notes.txt", "/archive/").await.unwrap();
}

#[tokio::test]
async fn test_rm_deletes_resolved_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/docs/notes.txt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.cd("docs");
    session.rm("notes.txt").await.unwrap();
}
