use crate::auth::{AuthMethod, StaticTokenAuth, TokenFileAuth};
use crate::error::VaultError;
use crate::models::{ListResponse, MountInfo, ReadResponse};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Mount table endpoint, relative to `/v1`
pub const MOUNTS_PATH: &str = "sys/mounts";

pub struct VaultClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    token_file: Option<PathBuf>,
    namespace: Option<String>,
    application_name: Option<String>,
    timeout: Duration,
}

impl Default for VaultClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            token_file: None,
            namespace: None,
            application_name: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn resolve_config(&self) -> Result<ResolvedConfig, VaultError> {
        let base_url = non_empty(self.base_url.clone())
            .or_else(|| non_empty(std::env::var("VAULT_ADDR").ok()))
            .ok_or(VaultError::VaultNotDetected)?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| VaultError::InvalidAddress(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(VaultError::InvalidAddress(base_url.to_string()));
        }

        let credential = match non_empty(self.token.clone())
            .or_else(|| non_empty(std::env::var("VAULT_TOKEN").ok()))
        {
            Some(token) => Credential::Token(token),
            None => self
                .token_file
                .clone()
                .or_else(|| TokenFileAuth::default_path().filter(|p| p.is_file()))
                .map(Credential::TokenFile)
                .ok_or(VaultError::TokenNotFound)?,
        };

        let namespace = non_empty(self.namespace.clone())
            .or_else(|| non_empty(std::env::var("VAULT_NAMESPACE").ok()));

        Ok(ResolvedConfig {
            base_url,
            credential,
            namespace,
            application_name: self.application_name.clone(),
            timeout: self.timeout,
        })
    }

    pub async fn build(self) -> Result<VaultClient, VaultError> {
        let config = self.resolve_config()?;

        let auth_method: Box<dyn AuthMethod> = match config.credential {
            Credential::Token(token) => Box::new(StaticTokenAuth::new(token)),
            Credential::TokenFile(path) => Box::new(TokenFileAuth::new(path)),
        };
        let token = auth_method.authenticate(config.base_url.as_str()).await?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        Ok(VaultClient {
            base_url: config.base_url,
            token,
            namespace: config.namespace,
            application_name: config.application_name,
            http,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

enum Credential {
    Token(String),
    TokenFile(PathBuf),
}

struct ResolvedConfig {
    base_url: Url,
    credential: Credential,
    namespace: Option<String>,
    application_name: Option<String>,
    timeout: Duration,
}

pub struct VaultClient {
    base_url: Url,
    token: String,
    namespace: Option<String>,
    application_name: Option<String>,
    http: reqwest::Client,
}

impl VaultClient {
    pub async fn from_env() -> Result<Self, VaultError> {
        VaultClientBuilder::new().build().await
    }

    pub fn builder() -> VaultClientBuilder {
        VaultClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// List the keys directly under `path`. Folder keys end with `/`.
    pub async fn list(&self, path: &str) -> Result<ListResponse, VaultError> {
        #[derive(Deserialize)]
        struct ListBody {
            data: Option<ListData>,
        }

        #[derive(Deserialize)]
        struct ListData {
            keys: Option<Vec<String>>,
        }

        tracing::debug!(path, "Listing Vault path");

        let body: Option<ListBody> = self
            .fetch(self.request(path)?.query(&[("list", "true")]))
            .await?;

        Ok(match body {
            None => ListResponse::Absent,
            Some(body) => ListResponse::from_keys(
                body.data.and_then(|data| data.keys).unwrap_or_default(),
            ),
        })
    }

    /// Check what Vault holds at `path` without handing back the body.
    pub async fn read(&self, path: &str) -> Result<ReadResponse, VaultError> {
        #[derive(Deserialize)]
        struct ReadBody {
            data: Option<serde_json::Value>,
        }

        tracing::debug!(path, "Reading Vault path");

        let body: Option<ReadBody> = self.fetch(self.request(path)?).await?;

        let Some(body) = body else {
            return Ok(ReadResponse::Absent);
        };

        Ok(match body.data {
            None | Some(serde_json::Value::Null) => ReadResponse::Empty,
            Some(serde_json::Value::Object(map)) if map.is_empty() => ReadResponse::Empty,
            Some(_) => ReadResponse::Present,
        })
    }

    /// All mounted secrets engines, keyed by mount path (e.g. `secret/`)
    pub async fn list_mounts(&self) -> Result<BTreeMap<String, MountInfo>, VaultError> {
        #[derive(Deserialize)]
        struct MountsBody {
            data: BTreeMap<String, MountInfo>,
        }

        tracing::debug!("Listing Vault mounts");

        let body: Option<MountsBody> = self.fetch(self.request(MOUNTS_PATH)?).await?;
        body.map(|body| body.data)
            .ok_or_else(|| VaultError::InvalidResponse(format!("empty {} response", MOUNTS_PATH)))
    }

    /// `{base}/v1/{path}` with every segment percent-encoded.
    /// A trailing `/` in `path` is kept, Vault needs it on folder lists.
    fn url(&self, path: &str) -> Result<Url, VaultError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VaultError::InvalidAddress(self.base_url.to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    fn request(&self, path: &str) -> Result<RequestBuilder, VaultError> {
        let mut request = self
            .http
            .get(self.url(path)?)
            .header("X-Vault-Token", &self.token);

        if let Some(ref namespace) = self.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }

        if let Some(ref app_name) = self.application_name {
            request = request.header("User-Agent", app_name);
        }

        Ok(request)
    }

    /// Send a request; `None` when Vault has nothing at the path.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, VaultError> {
        let response = request
            .send()
            .await
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VaultError::ClientError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| VaultError::InvalidResponse(e.to_string()))
    }
}

/// Vault reports failures as `{"errors": [...]}`
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ => body.to_string(),
    }
}
