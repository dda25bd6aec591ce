use super::*;

fn io_error(kind: std::io::ErrorKind) -> std::io::Error {
    std::io::Error::new(kind, "boom")
}

#[test]
fn test_error_type_identifiers() {
    let e = ProfilerError::WorkspaceUnreadable {
        path: PathBuf::from("/nope"),
        source: io_error(std::io::ErrorKind::NotFound),
    };
    assert_eq!(e.error_type(), "Workspace");

    let e = ProfilerError::Git("bad reflog".into());
    assert_eq!(e.error_type(), "Git");

    let e = ProfilerError::Cancelled;
    assert_eq!(e.error_type(), "Cancelled");
}

#[test]
fn test_io_with_context_message() {
    let e = ProfilerError::io_with_context(
        io_error(std::io::ErrorKind::PermissionDenied),
        PathBuf::from("out/profile.json"),
        "rename",
    );
    let msg = e.message();
    assert!(msg.contains("rename"), "message was: {msg}");
    assert!(msg.contains("out/profile.json"), "message was: {msg}");
}

#[test]
fn test_io_from_conversion() {
    let e: ProfilerError = io_error(std::io::ErrorKind::Other).into();
    assert_eq!(e.error_type(), "IO");
}

#[test]
fn test_version_incompatible_is_distinguishable() {
    let e = ProfilerError::VersionIncompatible {
        found: "1".into(),
        expected: "2".into(),
    };
    assert!(e.is_version_incompatible());
    assert!(e.message().contains('1'));
    assert!(e.message().contains('2'));

    let other = ProfilerError::Cancelled;
    assert!(!other.is_version_incompatible());
}

#[test]
fn test_suggestions_present_for_user_facing_errors() {
    let e = ProfilerError::VersionIncompatible {
        found: "0".into(),
        expected: "2".into(),
    };
    assert!(e.suggestion().is_some());

    let e = ProfilerError::io_with_path(
        io_error(std::io::ErrorKind::NotFound),
        PathBuf::from("x"),
    );
    assert_eq!(e.suggestion(), Some("Verify the file path exists"));

    assert!(ProfilerError::Cancelled.suggestion().is_none());
}

#[test]
fn test_display_includes_context() {
    let e = ProfilerError::io_with_context(
        io_error(std::io::ErrorKind::Other),
        PathBuf::from("a/b"),
        "write temp file",
    );
    let rendered = e.to_string();
    assert!(rendered.contains("write temp file"), "rendered: {rendered}");
}
