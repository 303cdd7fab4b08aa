use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ragchat_logging::{rc_debug, rc_info};

use crate::{ServiceError, ServiceSettings, ServiceStatus, UploadFile, UploadReceipt};

/// The remote question-answering service.
#[async_trait::async_trait]
pub trait QaService: Send + Sync {
    async fn status(&self) -> Result<ServiceStatus, ServiceError>;

    async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ServiceError>;

    /// Returns the raw `answer` field; `null` when the service omitted it.
    async fn ask(&self, question: &str) -> Result<Value, ServiceError>;
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskReply {
    #[serde(default)]
    answer: Value,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    detail: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestQaClient {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestQaClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl QaService for ReqwestQaClient {
    async fn status(&self) -> Result<ServiceStatus, ServiceError> {
        let url = self.settings.endpoint("status")?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }
        decode(&body)
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ServiceError> {
        let url = self.settings.endpoint("upload")?;
        rc_info!("Uploading {} ({} bytes)", file.name, file.bytes.len());

        let mime = mime_for(&file.name);
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;

        // Any body that is not the expected JSON counts as a transport failure.
        let reply: UploadReply = decode(&body)?;
        if status.is_success() && reply.success {
            Ok(UploadReceipt {
                message: reply.message,
            })
        } else {
            Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail: reply.detail.map(detail_text),
            })
        }
    }

    async fn ask(&self, question: &str) -> Result<Value, ServiceError> {
        let url = self.settings.endpoint("ask")?;
        let response = self
            .client
            .post(url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;
        rc_debug!("Ask answered with http {}", status.as_u16());
        if !status.is_success() {
            return Err(rejection(status, &body));
        }
        let reply: AskReply = decode(&body)?;
        Ok(reply.answer)
    }
}

async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>), ServiceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    Ok((status, body.to_vec()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(body).map_err(|err| ServiceError::Decode(err.to_string()))
}

fn rejection(status: StatusCode, body: &[u8]) -> ServiceError {
    let detail = serde_json::from_slice::<ErrorReply>(body)
        .ok()
        .and_then(|reply| reply.detail)
        .map(detail_text);
    ServiceError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Validation errors carry structured detail; show anything that is not a string as JSON.
fn detail_text(detail: Value) -> String {
    match detail {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let is_text = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Transport(format!("timeout: {err}"));
    }
    if err.is_decode() {
        return ServiceError::Decode(err.to_string());
    }
    ServiceError::Transport(err.to_string())
}
