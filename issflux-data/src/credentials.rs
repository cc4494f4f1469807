//! Write-token loading.
//!
//! The token lives in a plain-text file holding the secret and nothing else.
//! It is re-read on every flush so a rotated token takes effect without a
//! restart.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;

/// Failures reading the token file.
///
/// These never reach the relay loop: [`TokenFile::resolve`] swaps them for an
/// empty token and lets the store reject the unauthenticated write.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No token file was configured.
    #[error("no token file configured")]
    NotConfigured,
    /// The token file could not be read.
    #[error("failed to read token file {path:?}: {source}")]
    Read {
        /// Configured token file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Location of the write token.
///
/// `Debug` shows the path only; the secret is never held between reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFile {
    path: Option<Utf8PathBuf>,
}

impl TokenFile {
    /// Read the token from `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// No token file; every write goes out with an empty token.
    #[must_use]
    pub const fn none() -> Self {
        Self { path: None }
    }

    /// Configured path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Read and trim the token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotConfigured`] without a path and
    /// [`CredentialError::Read`] when the file cannot be read.
    pub fn read(&self) -> Result<String, CredentialError> {
        let path = self.path.as_deref().ok_or(CredentialError::NotConfigured)?;
        let contents =
            issflux_fs::read_utf8_to_string(path).map_err(|source| CredentialError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(contents.trim().to_owned())
    }

    /// Read the token, substituting an empty string on any failure.
    #[must_use]
    pub fn resolve(&self) -> String {
        self.read().unwrap_or_else(|err| {
            debug!("using empty write token: {err}");
            String::new()
        })
    }
}

impl From<Option<Utf8PathBuf>> for TokenFile {
    fn from(path: Option<Utf8PathBuf>) -> Self {
        Self { path }
    }
}
