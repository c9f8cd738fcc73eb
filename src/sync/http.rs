use super::SyncService;
use crate::error::SyncError;
use crate::task::Task;
use reqwest::{Client, Method};
use serde::Serialize;

struct Session {
    runtime: tokio::runtime::Runtime,
    client: Client,
}

/// Pushes task changes as JSON to a remote endpoint.
///
/// `POST /tasks` adds, `PUT /tasks` updates, `DELETE /tasks` removes (the task
/// travels in the body) and `PUT /tasks/all` replaces the whole list.
pub struct HttpSyncService {
    base_url: String,
    session: Option<Session>,
}

impl HttpSyncService {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpSyncService {
            base_url: base_url.into(),
            session: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn send<T: Serialize + ?Sized>(&self, method: Method, path: &str, body: &T) -> Result<(), SyncError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| SyncError::Unavailable("sync has not been started".to_string()))?;
        let url = self.url(path);
        log::debug!("Sync {} {}", method, url);

        let response = session
            .runtime
            .block_on(session.client.request(method, &url).json(body).send())
            .map_err(|e| SyncError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl SyncService for HttpSyncService {
    fn start(&mut self) -> Result<(), SyncError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| SyncError::Unavailable(format!("could not start runtime: {}", e)))?;
        self.session = Some(Session {
            runtime,
            client: Client::new(),
        });
        log::debug!("Sync session opened for {}", self.base_url);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SyncError> {
        self.session = None;
        Ok(())
    }

    fn add_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.send(Method::POST, "/tasks", task)
    }

    fn delete_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.send(Method::DELETE, "/tasks", task)
    }

    fn update_task(&mut self, task: &Task) -> Result<(), SyncError> {
        self.send(Method::PUT, "/tasks", task)
    }

    fn update_task_list(&mut self, tasks: &[Task]) -> Result<(), SyncError> {
        self.send(Method::PUT, "/tasks/all", tasks)
    }
}
