use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::ProfileSubmission;

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to open profile file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode profile row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to decode profile json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads batches of submissions from CSV; headers are the submission's field names and
/// optional columns may be left out entirely.
pub struct ProfileImporter;

impl ProfileImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<ProfileSubmission>, ProfileImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a single submission from a JSON document.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<ProfileSubmission, ProfileImportError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<ProfileSubmission, ProfileImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProfileSubmission>, ProfileImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut submissions = Vec::new();

        for row in csv_reader.deserialize::<ProfileSubmission>() {
            submissions.push(row?);
        }

        Ok(submissions)
    }
}
