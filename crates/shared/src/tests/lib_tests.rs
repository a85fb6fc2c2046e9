use crate::{
    error::{ErrorKind, UploadError, GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE},
    protocol::{UploadResponse, SUCCESS_MESSAGE},
};

#[test]
fn decodes_success_body_from_backend() {
    let body: UploadResponse = serde_json::from_str(
        r#"{"message":"Video processed successfully","output_url":"/download/processed_a.mp4"}"#,
    )
    .expect("decode");
    assert!(body.is_well_formed_success());
    assert_eq!(body.output_url.as_deref(), Some("/download/processed_a.mp4"));
}

#[test]
fn decodes_error_only_body() {
    let body: UploadResponse =
        serde_json::from_str(r#"{"error":"No file selected"}"#).expect("decode");
    assert!(!body.is_well_formed_success());
    assert_eq!(body.failure_message(), Some("No file selected"));
}

#[test]
fn success_literal_must_match_exactly() {
    let body = UploadResponse {
        message: Some("video processed successfully".to_string()),
        output_url: Some("/out.mp4".to_string()),
        error: None,
    };
    assert!(!body.is_well_formed_success());
    assert_eq!(body.failure_message(), Some("video processed successfully"));
}

#[test]
fn success_without_output_url_is_not_well_formed() {
    let body = UploadResponse {
        message: Some(SUCCESS_MESSAGE.to_string()),
        output_url: None,
        error: None,
    };
    assert!(!body.is_well_formed_success());
    assert_eq!(body.failure_message(), None);
}

#[test]
fn message_is_preferred_over_error_field() {
    let body = UploadResponse {
        message: Some("bad file".to_string()),
        output_url: None,
        error: Some("ffmpeg exited".to_string()),
    };
    assert_eq!(body.failure_message(), Some("bad file"));
}

#[test]
fn user_message_falls_back_when_nothing_descriptive() {
    assert_eq!(
        UploadError::Transport { message: None }.user_message(),
        GENERIC_FAILURE_MESSAGE
    );
    assert_eq!(
        UploadError::Malformed {
            message: Some("   ".to_string())
        }
        .user_message(),
        GENERIC_FAILURE_MESSAGE
    );
    assert_eq!(UploadError::MissingInput.user_message(), NO_FILE_MESSAGE);
}

#[test]
fn user_message_uses_backend_text_verbatim() {
    let err = UploadError::Rejected {
        status: 500,
        message: Some("Error extracting audio: boom".to_string()),
    };
    assert_eq!(err.user_message(), "Error extracting audio: boom");
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn blank_message_falls_through_to_error_field() {
    let body = UploadResponse {
        message: Some("  ".to_string()),
        output_url: None,
        error: Some("No file selected".to_string()),
    };
    assert_eq!(body.failure_message(), Some("No file selected"));
}

#[test]
fn failure_text_is_kept_verbatim() {
    let body: UploadResponse =
        serde_json::from_str(r#"{"message":"  bad file\n"}"#).expect("decode");
    assert_eq!(body.failure_message(), Some("  bad file\n"));

    let err = UploadError::Malformed {
        message: body.failure_message().map(str::to_owned),
    };
    assert_eq!(err.user_message(), "  bad file\n");
}
