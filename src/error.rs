//! Centralized error type for the fxrack umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] fxrack_core::Error),

    #[error("Analysis: {0}")]
    Analysis(#[from] fxrack_analysis::Error),
}

impl Error {
    /// The core error, if this wraps one.
    pub fn as_core(&self) -> Option<&fxrack_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
