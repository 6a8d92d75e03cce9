use speechnote::{AudioCapture, FileCapture, TranscribeError};
use std::io::Write;

fn temp_audio(suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("speechnote-test")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(b"not real audio").unwrap();
    file
}

#[tokio::test]
async fn test_capture_yields_asset_with_m4a_mime() {
    let file = temp_audio(".m4a");
    let mut capture = FileCapture::new(file.path());

    assert!(!capture.is_capturing());
    capture.start().await.unwrap();
    assert!(capture.is_capturing());

    let asset = capture.stop().await.unwrap();
    assert!(!capture.is_capturing());
    assert_eq!(asset.mime_type, "audio/m4a");
    assert_eq!(asset.location, file.path().display().to_string());
    assert!(asset.file_name.ends_with(".m4a"));
}

#[tokio::test]
async fn test_wav_extension_maps_to_wav_mime() {
    let file = temp_audio(".wav");
    let mut capture = FileCapture::new(file.path());

    capture.start().await.unwrap();
    let asset = capture.stop().await.unwrap();
    assert_eq!(asset.mime_type, "audio/wav");
}

#[tokio::test]
async fn test_unknown_extension_falls_back_to_octet_stream() {
    let file = temp_audio(".dat");
    let mut capture = FileCapture::new(file.path());

    capture.start().await.unwrap();
    let asset = capture.stop().await.unwrap();
    assert_eq!(asset.mime_type, "application/octet-stream");
}

#[tokio::test]
async fn test_missing_file_fails_start() {
    let mut capture = FileCapture::new("/nonexistent/recording.m4a");

    let err = capture.start().await.unwrap_err();
    assert!(matches!(err, TranscribeError::Capture(_)));
    assert!(!capture.is_capturing());
}
