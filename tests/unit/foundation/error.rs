use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReplayError::shape("x")
            .to_string()
            .contains("shape mismatch:")
    );
    assert!(
        ReplayError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReplayError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        ReplayError::UnknownLabel { label: 7, row: 3 }.to_string(),
        "unknown label 7 at row 3"
    );
}

#[test]
fn reducer_and_renderer_keep_source_message() {
    let err = ReplayError::reducer(anyhow::anyhow!("diverged"));
    assert!(err.to_string().contains("reducer failure: diverged"));

    let err = ReplayError::renderer(std::io::Error::other("disk full"));
    assert!(err.to_string().contains("renderer failure: disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReplayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ReplayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReplayError::Serde(_)));
}
