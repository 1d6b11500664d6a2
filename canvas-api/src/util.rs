use anyhow::{Context, Result};
use url::Url;

use crate::assignment::AssignmentId;
use crate::course::CourseId;

pub const API_PATH: &str = "/api/v1";
pub const ASSIGNMENTS_COURSE_PATH: &str = "/assignments";
pub const STUDENTS_COURSE_PATH: &str = "/users?enrollment_type[]=student";
pub const SUBMISSIONS_ASSIGNMENT_PATH: &str = "/submissions";

/// Joins `domain` (with or without a trailing slash) and an absolute `path`.
pub fn canvas_url(domain: &str, path: &str) -> Result<Url> {
    let url = format!("{}{path}", domain.trim_end_matches('/'));
    Url::parse(&url).with_context(|| format!("`{url}` is not a valid Canvas URL"))
}

pub fn canvas_course_path(course_id: &CourseId, path: &str) -> String {
    format!("{API_PATH}/courses/{course_id}{path}")
}

pub fn canvas_assignment_path(
    course_id: &CourseId,
    assignment: &AssignmentId,
    path: &str,
) -> String {
    canvas_course_path(course_id, &format!("/assignments/{assignment}{path}"))
}
