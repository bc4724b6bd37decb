//! Selection of the single media source feeding the chain.
//!
//! A network stream and a local file are mutually exclusive: selecting one
//! clears the other, so exactly one of them feeds the source node.

use crate::engine::MediaInput;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelector {
    stream_url: Option<String>,
    file: Option<PathBuf>,
}

impl SourceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a network stream, clearing any file selection.
    pub fn use_stream(&mut self, url: impl Into<String>) -> Result<&str> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(Error::InvalidSource("stream URL is empty".into()));
        }
        self.file = None;
        Ok(self.stream_url.insert(url).as_str())
    }

    /// Select a local file, clearing any stream selection.
    pub fn use_file(&mut self, path: impl Into<PathBuf>) -> Result<&Path> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidSource("file path is empty".into()));
        }
        self.stream_url = None;
        Ok(self.file.insert(path).as_path())
    }

    pub fn stream_url(&self) -> Option<&str> {
        self.stream_url.as_deref()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Media for the current selection; a file is read into memory.
    pub fn media_input(&self) -> Result<Option<MediaInput>> {
        match (&self.stream_url, &self.file) {
            (Some(url), _) => Ok(Some(MediaInput::Stream(url.clone()))),
            (None, Some(path)) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    Error::InvalidSource(format!("cannot read {}: {}", path.display(), e))
                })?;
                Ok(Some(MediaInput::Blob {
                    path: path.clone(),
                    bytes: Arc::from(bytes),
                }))
            }
            (None, None) => Ok(None),
        }
    }
}
