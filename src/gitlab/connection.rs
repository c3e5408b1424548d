//! Defines a connection to gitlab
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use tracing::{debug, error};

/// Infos needed to connect to gitlab
#[derive(Clone)]
pub struct Connection {
    /// API root, for example `https://gitlab.com/api/v4`
    pub base_url: String,
    /// [`reqwest`] client
    pub http_client: Client,
    /// Authentication token
    pub token: String,
}

impl Connection {
    /// Creates a new [`Connection`]
    pub fn new(
        base_url: &str,
        token: String,
        accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        let http_client = ClientBuilder::new()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
            token,
        })
    }

    /// Builds the URL of a project scoped endpoint
    ///
    /// `project` can be a numeric id or a path like `group/project`, it is url-encoded here
    pub fn project_url(&self, project: &str, path: &str) -> String {
        format!(
            "{}/projects/{}{path}",
            self.base_url,
            urlencoding::encode(project)
        )
    }

    /// Sends `request` with the authentication header
    ///
    /// If gitlab answers with an error status, the response body is logged and the
    /// original [`reqwest::Error`] is returned so that the caller can still check its status
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let resp = request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;

        debug!("{} {}", resp.status(), resp.url());

        let err_copy = resp.error_for_status_ref().map(|_| ()); // Keep the error for later if needed
        if let Err(err) = err_copy {
            let url = resp.url().to_string();
            let status = err.status().unwrap_or_default();
            error!("{url} - {status} : {}", resp.text().await.unwrap_or_default());
            return Err(err);
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::Connection;

    #[test]
    /// Check that project paths are url-encoded and trailing slashes are ignored
    fn project_url_encodes_paths() {
        let connection =
            Connection::new("https://gitlab.example.com/api/v4/", "token".to_owned(), false)
                .unwrap();

        assert_eq!(
            connection.project_url("42", "/integrations/jenkins"),
            "https://gitlab.example.com/api/v4/projects/42/integrations/jenkins"
        );
        assert_eq!(
            connection.project_url("group/sub/project", ""),
            "https://gitlab.example.com/api/v4/projects/group%2Fsub%2Fproject"
        );
    }
}
