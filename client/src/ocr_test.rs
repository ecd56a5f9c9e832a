use super::*;

#[tokio::test]
async fn non_image_mime_is_rejected_before_upload() {
    // Unroutable base URL: any network attempt would surface as a different
    // error variant.
    let client = OcrClient::new("http://invalid.localdomain:1");

    let err = client
        .process_image("notes.pdf", "application/pdf", vec![1, 2, 3])
        .await
        .expect_err("pdf must be rejected");

    assert!(matches!(err, OcrError::Validation(_)));
    assert!(err.diagnostics().is_none());
    assert!(err.to_string().contains("application/pdf"));
}

#[tokio::test]
async fn network_failure_carries_file_diagnostics() {
    let client = OcrClient::new("http://invalid.localdomain:1");

    let err = client
        .process_image("scan.png", "image/png", vec![0; 128])
        .await
        .expect_err("unroutable host must fail");

    let diagnostics = err.diagnostics().expect("network errors carry diagnostics");
    assert_eq!(diagnostics.file_name, "scan.png");
    assert_eq!(diagnostics.file_type, "image/png");
    assert_eq!(diagnostics.file_size, 128);
    assert!(diagnostics.http_status.is_none());
    assert!(diagnostics.detail.is_some());
}

#[test]
fn diagnostics_serialize_without_absent_fields() {
    let diagnostics = OcrDiagnostics::new("scan.png", "image/png", 42);
    let value = serde_json::to_value(&diagnostics).unwrap();

    assert_eq!(value["fileName"], "scan.png");
    assert_eq!(value["fileSize"], 42);
    assert!(value.get("httpStatus").is_none());
    assert!(value.get("jobId").is_none());
}
