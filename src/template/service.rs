use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::nav::LoadConfig;

/// Distinguished status the template controller answers when a saved
/// template fails server-side validation. Recoverable: resubmitting
/// with `skip_validate=1` forces the save through.
pub const VALIDATION_REJECTED_STATUS: u16 = 418;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid request URL {url:?}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Event-facing rendition of a `ServiceError`: plain data, comparable,
/// safe to carry through outcome channels and app events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    Transport { message: String },
    Rejected { status: u16, message: String },
}

impl From<ServiceError> for ServiceFailure {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected { status, message } => Self::Rejected { status, message },
            other => Self::Transport {
                message: other.to_string(),
            },
        }
    }
}

impl ServiceFailure {
    pub fn is_validation_rejection(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status == VALIDATION_REJECTED_STATUS)
    }

    /// Text shown to the user in dialogs and panel bodies.
    pub fn display_message(&self) -> String {
        match self {
            Self::Transport { message } => message.clone(),
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            Self::Rejected { status, .. } => format!("request rejected with status {status}"),
        }
    }
}

/// The panel service: server-rendered panel bodies plus the template
/// controller's get / create / set endpoints. `base` is the per-panel
/// template controller path.
#[async_trait]
pub trait PanelService: Send + Sync {
    async fn fetch_panel(&self, cnf: &LoadConfig) -> Result<String, ServiceError>;
    async fn get_template(&self, base: &str, name: &str) -> Result<String, ServiceError>;
    async fn create_template(&self, base: &str, name: &str) -> Result<(), ServiceError>;
    async fn set_template(
        &self,
        base: &str,
        name: &str,
        content: &str,
        skip_validate: bool,
    ) -> Result<(), ServiceError>;
}

pub struct HttpPanelService {
    client: reqwest::Client,
    root: Url,
}

impl HttpPanelService {
    pub fn connect(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let root = Url::parse(base_url).map_err(|err| {
            AppError::invalid_argument(format!("invalid service base URL {base_url:?}: {err}"))
        })?;
        if !matches!(root.scheme(), "http" | "https") {
            return Err(AppError::invalid_argument(format!(
                "service base URL must be http or https: {base_url:?}"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| AppError::http(source, "failed to build HTTP client"))?;
        Ok(Self { client, root })
    }

    fn absolute(&self, path: &str) -> Result<Url, ServiceError> {
        self.root.join(path).map_err(|source| ServiceError::BadUrl {
            url: path.to_string(),
            source,
        })
    }

    fn panel_url(&self, cnf: &LoadConfig) -> Result<Url, ServiceError> {
        let mut url = self.absolute(&cnf.url)?;
        if !cnf.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &cnf.params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    // Template names are already sanitized of line breaks; beyond that
    // they pass through verbatim, matching the controller's routing.
    fn template_url(&self, base: &str, op: &str, name: &str) -> Result<Url, ServiceError> {
        self.absolute(&format!("{}/{op}/{name}", base.trim_end_matches('/')))
    }

    async fn read_ok(
        url: Url,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<String, ServiceError> {
        let response = sent.map_err(|source| ServiceError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ServiceError::Transport {
                url: url.to_string(),
                source,
            })?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

#[async_trait]
impl PanelService for HttpPanelService {
    async fn fetch_panel(&self, cnf: &LoadConfig) -> Result<String, ServiceError> {
        let url = self.panel_url(cnf)?;
        let sent = self.client.get(url.clone()).send().await;
        Self::read_ok(url, sent).await
    }

    async fn get_template(&self, base: &str, name: &str) -> Result<String, ServiceError> {
        let url = self.template_url(base, "get", name)?;
        let sent = self.client.get(url.clone()).send().await;
        Self::read_ok(url, sent).await
    }

    async fn create_template(&self, base: &str, name: &str) -> Result<(), ServiceError> {
        let url = self.template_url(base, "create", name)?;
        let sent = self.client.get(url.clone()).send().await;
        Self::read_ok(url, sent).await.map(|_| ())
    }

    async fn set_template(
        &self,
        base: &str,
        name: &str,
        content: &str,
        skip_validate: bool,
    ) -> Result<(), ServiceError> {
        let url = self.template_url(base, "set", name)?;
        let mut params: Vec<(&str, &str)> = vec![("content", content)];
        if skip_validate {
            params.push(("skip_validate", "1"));
        }
        let sent = self.client.post(url.clone()).form(&params).send().await;
        Self::read_ok(url, sent).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::nav::LoadConfig;

    use super::{HttpPanelService, ServiceFailure, VALIDATION_REJECTED_STATUS};

    fn service() -> HttpPanelService {
        HttpPanelService::connect("http://workbench.test/app", Duration::from_secs(1))
            .expect("service should connect")
    }

    #[test]
    fn connect_rejects_non_http_urls() {
        assert!(HttpPanelService::connect("ftp://host", Duration::from_secs(1)).is_err());
        assert!(HttpPanelService::connect("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn template_url_joins_base_op_and_name() {
        let url = service()
            .template_url("/tpl", "get", "site/header")
            .expect("url should build");
        assert_eq!(url.as_str(), "http://workbench.test/tpl/get/site/header");

        let trailing = service()
            .template_url("/tpl/", "set", "footer")
            .expect("url should build");
        assert_eq!(trailing.as_str(), "http://workbench.test/tpl/set/footer");
    }

    #[test]
    fn panel_url_appends_encoded_params() {
        let url = service()
            .panel_url(&LoadConfig {
                url: "/grid/items".to_string(),
                params: vec![("q".to_string(), "a b".to_string())],
            })
            .expect("url should build");
        assert_eq!(url.as_str(), "http://workbench.test/grid/items?q=a+b");
    }

    #[test]
    fn validation_rejection_is_recognized_by_status() {
        let failure = ServiceFailure::Rejected {
            status: VALIDATION_REJECTED_STATUS,
            message: "bad token on line 3".to_string(),
        };
        assert!(failure.is_validation_rejection());
        assert_eq!(failure.display_message(), "bad token on line 3");

        let other = ServiceFailure::Rejected {
            status: 500,
            message: String::new(),
        };
        assert!(!other.is_validation_rejection());
        assert_eq!(other.display_message(), "request rejected with status 500");
    }
}
