use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use canvas_api::assignment::AssignmentId;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use tokio::fs;
use tracing::info;

pub const RAW_DATA_DIR: &str = "raw_data";

/// Writes API responses as they were received into one directory, one file per listing.
#[derive(Debug, Clone)]
pub struct RawDumper {
    dir: PathBuf,
}

impl RawDumper {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Overwrites `filename` in the dump directory, creating the directory first if needed. The
    /// write is not atomic; an interrupted write leaves a truncated file behind.
    pub async fn save(&self, data: &impl Serialize, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("could not create `{}`", self.dir.display()))?;

        let path = self.dir.join(filename);
        let contents = to_pretty_json(data)?;
        fs::write(&path, contents)
            .await
            .with_context(|| format!("could not write `{}`", path.display()))?;

        info!(filename, "saved");
        Ok(path)
    }
}

/// Four-space indentation, non-ASCII left unescaped.
fn to_pretty_json(data: &impl Serialize) -> Result<Vec<u8>> {
    let mut contents = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut contents, formatter);
    data.serialize(&mut serializer)
        .context("could not serialize JSON")?;
    Ok(contents)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFile {
    Assignments,
    Students,
    Submissions(AssignmentId),
}

impl RawFile {
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RawFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawFile::Assignments => f.write_str("assignments.json"),
            RawFile::Students => f.write_str("students.json"),
            RawFile::Submissions(assignment) => write!(f, "submissions_{assignment}.json"),
        }
    }
}
