//! Defines a gitab project

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::gitlab::connection::Connection;

/// Defines a [gitlab project](https://docs.gitlab.com/api/projects/#get-a-single-project)
///
/// Only what is needed to know if the project is still there
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    /// Project id
    pub id: usize,
    /// Set when the project is pending deletion
    #[serde(default)]
    pub marked_for_deletion_at: Option<String>,
}

impl Project {
    /// Get a single project, `project` being its id or its full path
    #[instrument(skip(connection), err)]
    pub async fn get(connection: &Connection, project: &str) -> Result<Self, reqwest::Error> {
        let url = connection.project_url(project, "");

        debug!("getting project");

        connection
            .send(connection.http_client.get(&url))
            .await?
            .json::<Self>()
            .await
    }
}
