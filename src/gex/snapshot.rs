//! Checksummed packaging of GEX results for caching and transport.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

use super::error::SnapshotError;
use super::types::GexResult;

/// Format version used for checksum-enabled GEX result packages.
pub const GEX_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for [`GexResult`] instances.
///
/// A caller-side cache or transport can serialize the package, store it, and
/// later verify the payload was not corrupted or truncated before trusting
/// the numbers inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexResultPackage {
    /// Version of the package schema for forward compatibility.
    pub version: u32,
    /// Result payload.
    pub result: GexResult,
    /// Hex-encoded SHA-256 checksum of the serialized result.
    pub checksum: String,
}

impl GexResultPackage {
    /// Creates a new package computing the checksum of the result contents.
    pub fn new(result: GexResult) -> Result<Self, SnapshotError> {
        let checksum = Self::compute_checksum(&result)?;
        trace!("packaged GEX result with checksum {checksum}");

        Ok(Self {
            version: GEX_SNAPSHOT_FORMAT_VERSION,
            result,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|error| SnapshotError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(data).map_err(|error| SnapshotError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the checksum and version.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != GEX_SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                version: self.version,
                expected: GEX_SNAPSHOT_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.result)?;
        if computed != self.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated result.
    pub fn into_result(self) -> Result<GexResult, SnapshotError> {
        self.validate()?;
        Ok(self.result)
    }

    fn compute_checksum(result: &GexResult) -> Result<String, SnapshotError> {
        let payload =
            serde_json::to_vec(result).map_err(|error| SnapshotError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum_bytes = hasher.finalize();
        Ok(format!("{checksum_bytes:x}"))
    }
}
