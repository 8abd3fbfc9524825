mod firestore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::SiteError;
use crate::session::{AdminSession, AuthState};
use crate::store::{Attachment, BlobStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    /// Google-style error bodies carry `{"error": {"message": ...}}`; prefer
    /// that message over the raw body.
    fn http(status: reqwest::StatusCode, body: &str) -> Self {
        let message = backend_message(body)
            .map(|m| format!("{m} ({status})"))
            .unwrap_or_else(|| format!("Request failed ({status}): {body}"));
        Self {
            kind: ApiErrorKind::Http,
            message,
        }
    }
}

fn backend_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

impl From<SignInResponse> for AdminSession {
    fn from(r: SignInResponse) -> Self {
        Self {
            uid: r.local_id,
            email: r.email,
            id_token: r.id_token,
            refresh_token: r.refresh_token,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    name: String,
    #[serde(default)]
    download_tokens: Option<String>,
}

/// REST client for the managed backend: documents, blobs and sign-in.
///
/// Reads the current id token from `AuthState` on every request, so a
/// sign-in or sign-out takes effect without rebuilding the client.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) config: BackendConfig,
    auth: AuthState,
}

impl ApiClient {
    pub fn new(config: BackendConfig, auth: AuthState) -> Self {
        Self { config, auth }
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        scheme: &str,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("{scheme} {token}"));
        }
        req
    }

    async fn dispatch(req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, &body))
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        Self::dispatch(Self::with_auth_headers(req, "Bearer", self.auth.id_token())).await
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        self.send(req).await?.json().await.map_err(ApiError::parse)
    }

    /// Email/password sign-in. Does not touch `AuthState`; the caller decides
    /// what to do with the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, SiteError> {
        let res = self
            .request_sign_in(email, password)
            .await
            .map_err(SiteError::auth)?;
        Ok(res.into())
    }

    async fn request_sign_in(&self, email: &str, password: &str) -> ApiResult<SignInResponse> {
        let req = reqwest::Client::new()
            .post(self.config.sign_in_url())
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            });
        Self::dispatch(req).await?.json().await.map_err(ApiError::parse)
    }

    fn download_url(&self, object_name: &str, token: &str) -> String {
        format!(
            "{}/{}?alt=media&token={}",
            self.config.storage_base(),
            urlencoding::encode(object_name),
            urlencoding::encode(token)
        )
    }

    async fn upload_object(&self, path: &str, attachment: &Attachment) -> ApiResult<String> {
        let content_type = if attachment.content_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            attachment.content_type.as_str()
        };
        let req = reqwest::Client::new()
            .post(self.config.storage_base())
            .query(&[
                ("uploadType", "media"),
                ("name", path),
                ("key", self.config.api_key.as_str()),
            ])
            .header("Content-Type", content_type)
            .body(attachment.bytes.clone());
        let req = Self::with_auth_headers(req, "Firebase", self.auth.id_token());
        let res: UploadResponse = Self::dispatch(req)
            .await?
            .json()
            .await
            .map_err(ApiError::parse)?;

        // Several tokens may be listed, comma separated; any of them works.
        let token = res
            .download_tokens
            .as_deref()
            .and_then(|t| t.split(',').next())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::parse("upload response carried no download token"))?;
        Ok(self.download_url(&res.name, token))
    }
}

#[async_trait(?Send)]
impl BlobStore for ApiClient {
    async fn upload(&self, path: &str, attachment: &Attachment) -> Result<String, SiteError> {
        self.upload_object(path, attachment)
            .await
            .map_err(SiteError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = BackendConfig {
            api_key: "k".into(),
            project_id: "quirk".into(),
            storage_bucket: "quirk.appspot.com".into(),
            ..Default::default()
        };
        ApiClient::new(config, AuthState::new())
    }

    #[test]
    fn test_http_error_prefers_backend_message() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        let e = ApiError::http(reqwest::StatusCode::FORBIDDEN, body);
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(
            e.message,
            "Missing or insufficient permissions. (403 Forbidden)"
        );
    }

    #[test]
    fn test_http_error_falls_back_to_body() {
        let e = ApiError::http(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(e.message, "Request failed (502 Bad Gateway): upstream down");
    }

    #[test]
    fn test_download_url_encodes_object_path() {
        let url = client().download_url("books/1700000000000_my cover.png", "tok-1");
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/quirk.appspot.com/o/books%2F1700000000000_my%20cover.png?alt=media&token=tok-1"
        );
    }

    #[test]
    fn test_sign_in_response_maps_to_session() {
        let json = r#"{
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "uid-1",
            "email": "admin@quirkitopia.space",
            "displayName": "",
            "idToken": "id",
            "registered": true,
            "refreshToken": "refresh",
            "expiresIn": "3600"
        }"#;
        let res: SignInResponse = serde_json::from_str(json).unwrap();
        let session = AdminSession::from(res);
        assert_eq!(session.uid, "uid-1");
        assert_eq!(session.id_token, "id");
    }

    #[test]
    fn test_sign_in_request_shape() {
        let body = serde_json::to_value(SignInRequest {
            email: "a@b.com",
            password: "pw",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(body["returnSecureToken"], serde_json::json!(true));
    }
}
