use anyhow::{Context, Result};
use serde_json::Value;
use tower::ServiceExt;
use tracing::info;

use crate::assignment::AssignmentId;
use crate::config::CanvasConfig;
use crate::services::canvas_service::{self, CanvasRequest, CanvasService};
use crate::util::*;

/// Builds a client that talks to the real Canvas API described by `config`.
pub fn client(config: CanvasConfig) -> Result<Client<impl CanvasService>> {
    let service = canvas_service::service(config.clone())?;
    Ok(Client::new(service, config))
}

/// Course-scoped Canvas client. Each call issues exactly one GET and returns the decoded body as
/// is; only the first page of a paginated listing is returned.
#[derive(Debug)]
pub struct Client<Service> {
    service: Service,
    config: CanvasConfig,
}

impl<Service: CanvasService> Client<Service> {
    pub fn new(service: Service, config: CanvasConfig) -> Self {
        Self { service, config }
    }

    async fn get(&mut self, request: CanvasRequest) -> Result<Value> {
        info!(path = request.path(), "preparing Canvas request");
        (&mut self.service).oneshot(request).await
    }

    fn course_path(&self, path: &str) -> Result<String> {
        let course_id = self.config.course_id()?;
        Ok(canvas_course_path(course_id, path))
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_assignments(&mut self) -> Result<Value> {
        let path = self.course_path(ASSIGNMENTS_COURSE_PATH)?;
        self.get(CanvasRequest::get(path))
            .await
            .context("could not get assignments")
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_students(&mut self) -> Result<Value> {
        let path = self.course_path(STUDENTS_COURSE_PATH)?;
        self.get(CanvasRequest::get(path))
            .await
            .context("could not get students")
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_submissions(&mut self, assignment: &AssignmentId) -> Result<Value> {
        let course_id = self.config.course_id()?;
        let path = canvas_assignment_path(course_id, assignment, SUBMISSIONS_ASSIGNMENT_PATH);
        self.get(CanvasRequest::get(path))
            .await
            .with_context(|| format!("could not get submissions for assignment {assignment}"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tower::service_fn;

    use super::*;
    use crate::course::CourseId;

    fn config() -> CanvasConfig {
        CanvasConfig::new(
            "https://canvas.example.edu".to_owned(),
            CourseId::new("42".to_owned()),
            "tok".to_owned(),
        )
    }

    fn recording_client(
        config: CanvasConfig,
    ) -> (Client<impl CanvasService>, Arc<Mutex<Vec<CanvasRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let service = service_fn(move |request: CanvasRequest| {
            log.lock().unwrap().push(request);
            async { anyhow::Ok(json!([])) }
        });
        (Client::new(service, config), seen)
    }

    #[tokio::test]
    async fn endpoints_are_scoped_to_the_course() {
        let (mut client, seen) = recording_client(config());

        client.get_assignments().await.unwrap();
        client.get_students().await.unwrap();
        client
            .get_submissions(&AssignmentId::new("101".to_owned()))
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        let paths: Vec<_> = seen.iter().map(CanvasRequest::path).collect();
        assert_eq!(
            paths,
            [
                "/api/v1/courses/42/assignments",
                "/api/v1/courses/42/users?enrollment_type[]=student",
                "/api/v1/courses/42/assignments/101/submissions",
            ]
        );
        assert!(seen.iter().all(|request| request.method() == "GET"));
    }

    #[tokio::test]
    async fn missing_course_id_fails_without_a_request() {
        let config = CanvasConfig::from_lookup(|name| match name {
            "CANVAS_DOMAIN" => Some("https://canvas.example.edu".to_owned()),
            "CANVAS_API_TOKEN" => Some("tok".to_owned()),
            _ => None,
        });
        let (mut client, seen) = recording_client(config);

        let err = client.get_assignments().await.unwrap_err();

        assert!(format!("{err:#}").contains("CANVAS_COURSE_ID"));
        assert!(seen.lock().unwrap().is_empty());
    }
}
