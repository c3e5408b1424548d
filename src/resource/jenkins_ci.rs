//! The `gitlab_service_jenkins_ci` resource
//!
//! The resource identifier is the gitlab project reference (id or full path),
//! gitlab keeps at most one Jenkins integration per project.

use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use crate::error::BoxedError;
use crate::gitlab::connection::Connection;
use crate::gitlab::jenkins::{self, SetJenkinsCiOptions};
use crate::gitlab::project::Project;
use crate::resource::data::ResourceData;
use crate::resource::schema::{Attribute, AttributeMode, AttributeType, Schema, validate_url};

/// Name of the resource type
pub const RESOURCE_TYPE: &str = "gitlab_service_jenkins_ci";

/// Event flags gitlab reports but that can't be configured through this resource
const READ_ONLY_EVENTS: [&str; 5] = [
    "issues_events",
    "commit_events",
    "note_events",
    "pipeline_events",
    "job_events",
];

/// Builds the schema of the resource
pub fn schema() -> Schema {
    let mut schema = Schema::new()
        .add_attribute(
            Attribute::new("project", AttributeType::String, AttributeMode::Required).force_new(),
        )
        .add_attribute(Attribute::new(
            "title",
            AttributeType::String,
            AttributeMode::Computed,
        ))
        .add_attribute(Attribute::new(
            "created_at",
            AttributeType::String,
            AttributeMode::Computed,
        ))
        .add_attribute(Attribute::new(
            "updated_at",
            AttributeType::String,
            AttributeMode::Computed,
        ))
        .add_attribute(Attribute::new(
            "active",
            AttributeType::Bool,
            AttributeMode::Computed,
        ))
        .add_attribute(
            Attribute::new("url", AttributeType::String, AttributeMode::Required)
                .validate_with(validate_url),
        )
        .add_attribute(Attribute::new(
            "project_name",
            AttributeType::String,
            AttributeMode::Required,
        ))
        .add_attribute(Attribute::new(
            "username",
            AttributeType::String,
            AttributeMode::Required,
        ))
        .add_attribute(
            Attribute::new("password", AttributeType::String, AttributeMode::Required).sensitive(),
        );

    for name in ["push_events", "merge_requests_events", "tag_push_events"] {
        schema = schema.add_attribute(Attribute::new(
            name,
            AttributeType::Bool,
            AttributeMode::OptionalComputed,
        ));
    }

    for name in READ_ONLY_EVENTS {
        schema = schema.add_attribute(Attribute::new(
            name,
            AttributeType::Bool,
            AttributeMode::Computed,
        ));
    }

    schema
}

/// Builds the body of the `PUT` request from the configuration
pub fn expand_options(data: &ResourceData) -> SetJenkinsCiOptions {
    SetJenkinsCiOptions {
        jenkins_url: data.get_str("url").to_owned(),
        project_name: data.get_str("project_name").to_owned(),
        username: data.get_str("username").to_owned(),
        password: data.get_str("password").to_owned(),
        push_events: data.get_bool("push_events"),
        merge_requests_events: data.get_bool("merge_requests_events"),
        tag_push_events: data.get_bool("tag_push_events"),
    }
}

/// Creates the integration, then reads it back into `data`
#[instrument(skip_all, err, fields(project = data.get_str("project")))]
pub async fn create(connection: &Connection, data: &mut ResourceData) -> Result<(), BoxedError> {
    schema().validate(data)?;

    let project = data.get_str("project").to_owned();
    let options = expand_options(data);

    info!("Create Gitlab Jenkins CI service");

    jenkins::set(connection, &project, &options).await?;

    data.set_id(&project);

    read(connection, data).await
}

/// Refreshes `data` with what gitlab reports
///
/// If the project doesn't exist anymore, the id is cleared and no error is returned
#[instrument(skip_all, err, fields(project = data.get_str("project")))]
pub async fn read(connection: &Connection, data: &mut ResourceData) -> Result<(), BoxedError> {
    let project = data.get_str("project").to_owned();

    match Project::get(connection, &project).await {
        Ok(found) => {
            if let Some(date) = found.marked_for_deletion_at {
                info!(
                    "Removing Gitlab Jenkins CI service {} because project {project} is marked for deletion since {date}",
                    data.id
                );
                data.set_id("");
                return Ok(());
            }
            debug!("project {project} has id {}", found.id);
        }
        Err(err) => {
            if err.status() == Some(StatusCode::NOT_FOUND) {
                info!(
                    "Removing Gitlab Jenkins CI service {} because project {project} not found",
                    data.id
                );
                data.set_id("");
                return Ok(());
            }
            return Err(err.into());
        }
    }

    debug!("Read Gitlab Jenkins CI service {}", data.id);

    let service = jenkins::get(connection, &project).await?;

    // The API returns empty strings for properties it doesn't know about
    if !service.properties.jenkins_url.is_empty() {
        data.set("url", service.properties.jenkins_url);
    }
    if !service.properties.project_name.is_empty() {
        data.set("project_name", service.properties.project_name);
    }
    if !service.properties.username.is_empty() {
        data.set("username", service.properties.username);
    }

    data.set("title", service.title);
    data.set(
        "created_at",
        service
            .created_at
            .map(|date| date.to_rfc3339())
            .unwrap_or_default(),
    );
    data.set(
        "updated_at",
        service
            .updated_at
            .map(|date| date.to_rfc3339())
            .unwrap_or_default(),
    );
    data.set("active", service.active);
    data.set("push_events", service.push_events);
    data.set("issues_events", service.issues_events);
    data.set("commit_events", service.commit_events);
    data.set("merge_requests_events", service.merge_requests_events);
    data.set("tag_push_events", service.tag_push_events);
    data.set("note_events", service.note_events);
    data.set("pipeline_events", service.pipeline_events);
    data.set("job_events", service.job_events);

    Ok(())
}

/// Updates the integration, the `PUT` call being idempotent this is the same as [`create`]
///
/// `project` is force-new: when it no longer matches the id, the integration of the
/// previous project is deleted before the new one is created
#[instrument(skip_all, err, fields(id = %data.id, project = data.get_str("project")))]
pub async fn update(connection: &Connection, data: &mut ResourceData) -> Result<(), BoxedError> {
    if !data.is_removed() && data.id != data.get_str("project") {
        schema().validate(data)?;

        info!(
            "Replacing Gitlab Jenkins CI service {} by one on project {}",
            data.id,
            data.get_str("project")
        );

        jenkins::delete(connection, &data.id).await?;
        data.set_id("");
    }

    create(connection, data).await
}

/// Removes the integration from the project
#[instrument(skip_all, err, fields(project = data.get_str("project")))]
pub async fn delete(connection: &Connection, data: &ResourceData) -> Result<(), BoxedError> {
    info!("Delete Gitlab Jenkins CI service {}", data.id);

    Ok(jenkins::delete(connection, data.get_str("project")).await?)
}

/// Imports an existing integration, `id` being the project reference
///
/// Only `project` is known at this point, a [`read`] fills the rest except the password
/// which gitlab never sends back
pub fn import(id: &str) -> ResourceData {
    let mut data = ResourceData::with_id(id);
    data.set("project", id);
    data
}
