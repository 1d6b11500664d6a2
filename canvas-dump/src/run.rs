use std::path::PathBuf;

use anyhow::{Context, Result};
use canvas_api::assignment::Assignment;
use canvas_api::client::Client;
use canvas_api::services::canvas_service::CanvasService;
use tracing::info;

use crate::dump::{RawDumper, RawFile};

/// Fetches and saves the course's assignments, then its students, then each assignment's
/// submissions in listing order. Each assignment is read just before its submissions are fetched,
/// so a malformed entry only stops the entries after it. Stops at the first error; files saved
/// before it stay on disk. Returns the paths written, in order.
pub async fn dump_course(
    canvas: &mut Client<impl CanvasService>,
    dumper: &RawDumper,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    info!("fetching assignments");
    let assignments = canvas
        .get_assignments()
        .await
        .context("could not get assignments from Canvas")?;
    written.push(save(dumper, &assignments, RawFile::Assignments).await?);

    info!("fetching students");
    let students = canvas
        .get_students()
        .await
        .context("could not get students from Canvas")?;
    written.push(save(dumper, &students, RawFile::Students).await?);

    info!("fetching submissions per assignment");
    for item in Assignment::items(&assignments)? {
        let assignment = Assignment::from_item(item)?;
        info!(
            name = assignment.display_name(),
            id = %assignment.id(),
            "fetching submissions"
        );
        let submissions = canvas
            .get_submissions(assignment.id())
            .await
            .with_context(|| {
                format!(
                    "could not get submissions for \"{}\" from Canvas",
                    assignment.display_name()
                )
            })?;
        let file = RawFile::Submissions(assignment.id().clone());
        written.push(save(dumper, &submissions, file).await?);
    }

    Ok(written)
}

async fn save(dumper: &RawDumper, data: &serde_json::Value, file: RawFile) -> Result<PathBuf> {
    dumper
        .save(data, &file.filename())
        .await
        .with_context(|| format!("could not save {file}"))
}
