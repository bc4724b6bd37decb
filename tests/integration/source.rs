//! Source selection integration tests
//!
//! Stream and file playback are mutually exclusive; activating one clears
//! the other before media is loaded into the engine.

use crate::helpers::*;
use fxrack::MediaInput;

#[test]
fn test_stream_clears_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("loop.wav");
    std::fs::write(&file, b"RIFF").unwrap();

    let mut rack = test_rack();
    rack.use_file(&file).unwrap();
    assert_eq!(rack.source().file(), Some(file.as_path()));

    rack.use_stream("  http://stream.example/jazz  ").unwrap();
    assert_eq!(rack.source().file(), None);
    assert_eq!(rack.source().stream_url(), Some("http://stream.example/jazz"));
    assert_eq!(
        rack.engine().media(),
        Some(&MediaInput::Stream("http://stream.example/jazz".into()))
    );
    assert!(rack.engine().is_playing());
}

#[test]
fn test_file_clears_stream() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("take.ogg");
    std::fs::write(&file, [1u8, 2, 3, 4]).unwrap();

    let mut rack = test_rack();
    rack.use_stream("http://stream.example/news").unwrap();
    rack.use_file(&file).unwrap();

    assert_eq!(rack.source().stream_url(), None);
    match rack.engine().media() {
        Some(MediaInput::Blob { path, bytes }) => {
            assert_eq!(path, &file);
            assert_eq!(&bytes[..], &[1, 2, 3, 4]);
        }
        other => panic!("expected a blob, got {:?}", other),
    }
}

#[test]
fn test_activation_resumes_engine() {
    let mut rack = test_rack();
    assert!(!rack.engine().is_running());

    rack.use_stream("http://stream.example/live").unwrap();
    assert!(rack.engine().is_running());
}

#[test]
fn test_empty_url_rejected() {
    let mut rack = test_rack();
    let err = rack.use_stream("   ").unwrap_err();
    assert!(matches!(
        err.as_core(),
        Some(fxrack::core::Error::InvalidSource(_))
    ));
    assert!(!rack.engine().is_playing());
    assert!(!rack.engine().is_running());
}

#[test]
fn test_empty_path_does_not_resume() {
    let mut rack = test_rack();
    assert!(rack.use_file("").is_err());
    assert!(!rack.engine().is_running());
    assert!(rack.source().file().is_none());
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut rack = test_rack();

    let err = rack.use_file(dir.path().join("gone.mp3")).unwrap_err();
    assert!(matches!(
        err.as_core(),
        Some(fxrack::core::Error::InvalidSource(_))
    ));
    assert!(rack.engine().media().is_none());
}

/// Switching sources never touches the effect chain.
#[test]
fn test_source_switch_keeps_chain() {
    let mut rack = test_rack();
    rack.append("gain");
    rack.append("reverb");
    let edges = sorted_edges(&rack);

    rack.use_stream("http://stream.example/a").unwrap();
    rack.use_stream("http://stream.example/b").unwrap();

    assert_eq!(sorted_edges(&rack), edges);
    assert_single_path(&rack);
}
