//! Defines the [Jenkins integration](https://docs.gitlab.com/api/project_integrations/#jenkins) of a gitlab project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::gitlab::connection::Connection;

/// Path of the integration, relative to the project
const JENKINS_PATH: &str = "/integrations/jenkins";

/// Properties of the integration, as returned by gitlab
///
/// The password is never sent back
#[derive(Clone, Debug, Default, Deserialize)]
pub struct JenkinsCiProperties {
    /// Jenkins URL
    #[serde(default)]
    pub jenkins_url: String,
    /// Name of the Jenkins project
    #[serde(default)]
    pub project_name: String,
    /// Username used to authenticate against Jenkins
    #[serde(default)]
    pub username: String,
}

/// Defines the settings of a Jenkins integration
#[derive(Clone, Debug, Deserialize)]
#[expect(clippy::struct_excessive_bools, reason = "gitlab sends one flag per event")]
pub struct JenkinsCiService {
    /// Integration title, `Jenkins`
    #[serde(default)]
    pub title: String,
    /// Creation date, missing when the integration has never been configured
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update date
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Active
    #[serde(default)]
    pub active: bool,
    /// Push events
    #[serde(default)]
    pub push_events: bool,
    /// Issues events
    #[serde(default)]
    pub issues_events: bool,
    /// Commit events
    #[serde(default)]
    pub commit_events: bool,
    /// Merge requests events
    #[serde(default)]
    pub merge_requests_events: bool,
    /// Tag push events
    #[serde(default)]
    pub tag_push_events: bool,
    /// Note events
    #[serde(default)]
    pub note_events: bool,
    /// Pipeline events
    #[serde(default)]
    pub pipeline_events: bool,
    /// Job events
    #[serde(default)]
    pub job_events: bool,
    /// Jenkins specific settings
    #[serde(default)]
    pub properties: JenkinsCiProperties,
}

/// Body of the `PUT` request creating or updating the integration
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[expect(clippy::struct_excessive_bools, reason = "gitlab expects one flag per event")]
pub struct SetJenkinsCiOptions {
    /// Jenkins URL
    pub jenkins_url: String,
    /// Name of the Jenkins project
    pub project_name: String,
    /// Username used to authenticate against Jenkins
    pub username: String,
    /// Password used to authenticate against Jenkins
    pub password: String,
    /// Trigger an event on push
    pub push_events: bool,
    /// Trigger an event when a merge request is created, updated or merged
    pub merge_requests_events: bool,
    /// Trigger an event when a tag is pushed
    pub tag_push_events: bool,
}

/// Get the Jenkins integration of `project`
#[instrument(skip(connection), err)]
pub async fn get(
    connection: &Connection,
    project: &str,
) -> Result<JenkinsCiService, reqwest::Error> {
    let url = connection.project_url(project, JENKINS_PATH);

    debug!("getting jenkins integration");

    connection
        .send(connection.http_client.get(&url))
        .await?
        .json::<JenkinsCiService>()
        .await
}

/// Create or update the Jenkins integration of `project`
///
/// This call is idempotent, gitlab keeps a single Jenkins integration per project
#[instrument(skip(connection, options), err)]
pub async fn set(
    connection: &Connection,
    project: &str,
    options: &SetJenkinsCiOptions,
) -> Result<(), reqwest::Error> {
    let url = connection.project_url(project, JENKINS_PATH);

    debug!("setting jenkins integration");

    connection
        .send(connection.http_client.put(&url).json(options))
        .await?;
    Ok(())
}

/// Disable the Jenkins integration of `project`
#[instrument(skip(connection), err)]
pub async fn delete(connection: &Connection, project: &str) -> Result<(), reqwest::Error> {
    let url = connection.project_url(project, JENKINS_PATH);

    debug!("deleting jenkins integration");

    connection.send(connection.http_client.delete(&url)).await?;
    Ok(())
}
