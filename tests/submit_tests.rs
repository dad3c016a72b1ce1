//! Integration tests against a mock processing server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use upload_submitter::status::{IN_PROGRESS, NO_FILE_PROMPT};
use upload_submitter::{
    Category, FileSelection, MemoryStatus, SelectedFile, SubmitError, SubmitOutcome,
    SubmitterClient, UploadSubmitter,
};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    client: SubmitterClient,
    selection: FileSelection,
    status: MemoryStatus,
    submitter: UploadSubmitter,
}

fn harness(base_url: &str, timeout: Duration) -> Harness {
    let client = SubmitterClient::builder()
        .base_url(base_url)
        .timeout(timeout)
        .build()
        .unwrap();
    let selection = FileSelection::new();
    let status = MemoryStatus::new();
    let submitter = client.submitter(Arc::new(selection.clone()), Arc::new(status.clone()));
    Harness {
        client,
        selection,
        status,
        submitter,
    }
}

fn category(label: &str) -> Category {
    Category::new(label).unwrap()
}

#[tokio::test]
async fn test_posts_multipart_form_to_process() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="category""#))
        .and(body_string_contains(r#"name="file"; filename="input.docx""#))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"download": "/download/input_edited.docx"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_secs(10));
    h.selection
        .choose(SelectedFile::new("input.docx", b"PK-docx-payload".to_vec()));

    let outcome = h.submitter.submit(&category("senior")).await.unwrap();

    assert_eq!(outcome.download(), Some("/download/input_edited.docx"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("PK-docx-payload"));
    assert!(body.contains("\r\n\r\nsenior\r\n"));
    assert_eq!(body.matches("Content-Disposition: form-data").count(), 2);
}

#[tokio::test]
async fn test_no_selection_never_contacts_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_secs(10));

    let outcome = h.submitter.submit(&category("regular")).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::NoSelection);
    assert_eq!(h.status.text(), NO_FILE_PROMPT);
}

#[tokio::test]
async fn test_server_rejection_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid category"})))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_secs(10));
    h.selection.choose(SelectedFile::new("a.docx", vec![1, 2, 3]));

    let outcome = h.submitter.submit(&category("bogus")).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "Invalid category".to_string()
        }
    );
    assert_eq!(h.status.text(), "Error: Invalid category");
}

#[tokio::test]
async fn test_in_progress_visible_while_waiting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"download": "/files/out.docx"}))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let h = Arc::new(harness(&server.uri(), Duration::from_secs(10)));
    h.selection.choose(SelectedFile::new("a.docx", vec![1]));

    let task = {
        let h = Arc::clone(&h);
        tokio::spawn(async move { h.submitter.submit(&category("regular")).await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.status.text(), IN_PROGRESS);

    let outcome = task.await.unwrap().unwrap();
    assert!(outcome.is_completed());
    let current = h.status.current().unwrap();
    assert_eq!(current.href(), Some("/files/out.docx"));
    assert_eq!(
        current.to_html(),
        r#"Done. <a href="/files/out.docx">Download edited file</a>"#
    );
}

#[tokio::test]
async fn test_timeout_reported_in_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"download": "/late.docx"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_millis(300));
    h.selection.choose(SelectedFile::new("a.docx", vec![1]));

    let result = h.submitter.submit(&category("regular")).await;

    assert!(matches!(result, Err(SubmitError::Timeout { .. })));
    assert_eq!(h.status.text(), "Error: the server took too long to respond");
}

#[tokio::test]
async fn test_html_error_page_reported_as_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_secs(10));
    h.selection.choose(SelectedFile::new("a.docx", vec![1]));

    let result = h.submitter.submit(&category("regular")).await;

    assert!(matches!(
        result,
        Err(SubmitError::Server {
            status_code: 500,
            ..
        })
    ));
    assert_eq!(h.status.text(), "Error: the server failed with HTTP 500");
}

#[tokio::test]
async fn test_unreachable_server_reported() {
    let h = harness("http://127.0.0.1:1", Duration::from_secs(5));
    h.selection.choose(SelectedFile::new("a.docx", vec![1]));

    let result = h.submitter.submit(&category("regular")).await;

    assert!(matches!(result, Err(SubmitError::Network { .. })));
    assert_eq!(h.status.text(), "Error: could not reach the server");
}

#[tokio::test]
async fn test_download_link_can_be_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"download": "/download/a_edited.docx"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download/a_edited.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"edited-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Duration::from_secs(10));
    h.selection.choose(SelectedFile::new("a.docx", vec![1]));

    let outcome = h.submitter.submit(&category("nondrugs")).await.unwrap();
    let href = outcome.download().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a_edited.docx");
    let written = h.client.downloads().save(href, &target).await.unwrap();

    assert_eq!(written, 12);
    assert_eq!(std::fs::read(&target).unwrap(), b"edited-bytes");
}
