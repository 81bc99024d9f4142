//! Loyalty API client
//!
//! [`LoyaltyApi`] is the seam the list synchronizer and submission pipeline talk
//! to; [`HttpLoyaltyApi`] is the reqwest implementation used by the app.

use crate::error::ApiError;
use crate::types::{ConfigPayload, Tier, TierConfig, TierPayload};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

const TIER_LIST: &str = "loyalty/tier/list";
const TIER_UPDATE: &str = "loyalty/tier/update";
const TIER_DELETE: &str = "loyalty/tier/delete";
const CONFIG_LIST: &str = "loyalty/config/list";
const CONFIG_UPDATE: &str = "loyalty/config/update";
const CONFIG_DELETE: &str = "loyalty/config/delete";

/// Tells the backend gateway not to run its global 401 handling for this call
pub const SKIP_401_INTERCEPTOR: &str = "X-Skip-401-Interceptor";

#[async_trait]
pub trait LoyaltyApi: Send + Sync {
    async fn list_tiers(&self, token: &str) -> Result<Vec<Tier>, ApiError>;

    /// Create or update, depending on `payload.operation`
    async fn save_tier(&self, token: &str, payload: &TierPayload) -> Result<(), ApiError>;

    async fn delete_tier(&self, token: &str, tier_id: i64) -> Result<(), ApiError>;

    async fn list_configs(&self, token: &str) -> Result<Vec<TierConfig>, ApiError>;

    async fn save_config(&self, token: &str, payload: &ConfigPayload) -> Result<(), ApiError>;

    /// Sent without an Authorization header
    async fn delete_config(&self, config_id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpLoyaltyApi {
    client: Client,
    base_url: String,
}

impl HttpLoyaltyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client that never goes through a system proxy, for local test servers
    #[cfg(test)]
    fn local(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .expect("build reqwest client"),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        build_url(&self.base_url, path, query)
    }
}

#[async_trait]
impl LoyaltyApi for HttpLoyaltyApi {
    async fn list_tiers(&self, token: &str) -> Result<Vec<Tier>, ApiError> {
        let url = self.url(TIER_LIST, &[])?;
        debug!(%url, "GET tier list");

        let response = self.client.get(url).bearer_auth(token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn save_tier(&self, token: &str, payload: &TierPayload) -> Result<(), ApiError> {
        let url = self.url(TIER_UPDATE, &[])?;
        debug!(%url, operation = ?payload.operation, "POST tier");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(SKIP_401_INTERCEPTOR, "true")
            .json(payload)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_tier(&self, token: &str, tier_id: i64) -> Result<(), ApiError> {
        let url = self.url(TIER_DELETE, &[("tier_id", tier_id.to_string())])?;
        debug!(%url, "DELETE tier");

        let response = self.client.delete(url).bearer_auth(token).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn list_configs(&self, token: &str) -> Result<Vec<TierConfig>, ApiError> {
        let url = self.url(CONFIG_LIST, &[])?;
        debug!(%url, "GET config list");

        let response = self.client.get(url).bearer_auth(token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn save_config(&self, token: &str, payload: &ConfigPayload) -> Result<(), ApiError> {
        let url = self.url(CONFIG_UPDATE, &[])?;
        debug!(%url, "POST config");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_config(&self, config_id: i64) -> Result<(), ApiError> {
        let url = self.url(CONFIG_DELETE, &[("id", config_id.to_string())])?;
        debug!(%url, "DELETE config");

        let response = self.client.delete(url).send().await?;
        check(response).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turn non-2xx responses into `ApiError::Status`, keeping the body's message
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Join an endpoint path (and query) onto the configured base URL
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    query: &[(&str, String)],
) -> Result<Url, ApiError> {
    // Without a trailing slash `join` would replace the last base segment
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let mut url = Url::parse(&base)?.join(path.trim_start_matches('/'))?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Operation, TierPayloadConstraints};
    use axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, Method, StatusCode, Uri},
        response::{IntoResponse, Response as AxumResponse},
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        path: String,
        query: Option<String>,
        authorization: Option<String>,
        skip_401: Option<String>,
        body: Option<Value>,
    }

    type Responder = Arc<dyn Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync>;

    #[derive(Clone)]
    struct ServerState {
        requests: Arc<Mutex<Vec<Recorded>>>,
        respond: Responder,
    }

    async fn record(
        State(state): State<ServerState>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> AxumResponse {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let (status, reply) = (state.respond)(&method, uri.path());
        state.requests.lock().await.push(Recorded {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: header("authorization"),
            skip_401: header("x-skip-401-interceptor"),
            body: serde_json::from_slice(&body).ok(),
        });

        (status, Json(reply)).into_response()
    }

    async fn spawn_server(
        respond: impl Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync + 'static,
    ) -> (String, Arc<Mutex<Vec<Recorded>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let state = ServerState {
            requests: Arc::new(Mutex::new(Vec::new())),
            respond: Arc::new(respond),
        };
        let requests = Arc::clone(&state.requests);
        let app = Router::new().fallback(record).with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/"), requests)
    }

    fn ok(_: &Method, _: &str) -> (StatusCode, Value) {
        (StatusCode::OK, json!({}))
    }

    fn sample_payload(tier_id: Option<i64>) -> TierPayload {
        TierPayload {
            tier_name: "Gold".to_string(),
            is_active: true,
            is_special: false,
            no_of_purchase_from: 1,
            no_of_purchase_to: 5,
            operation: if tier_id.is_some() {
                Operation::Update
            } else {
                Operation::Create
            },
            constraints: TierPayloadConstraints {
                order_online: 0.1,
                referral: 1,
                review_product: 1,
            },
            tier_id,
        }
    }

    #[test]
    fn test_build_url_basic() {
        let url = build_url("http://localhost:5000/", "loyalty/tier/list", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/loyalty/tier/list");
    }

    #[test]
    fn test_build_url_keeps_base_path_without_trailing_slash() {
        let url = build_url("https://api.example.com/v1", "loyalty/tier/list", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/loyalty/tier/list");
    }

    #[test]
    fn test_build_url_with_query() {
        let url = build_url(
            "http://localhost:5000",
            "loyalty/tier/delete",
            &[("tier_id", "7".to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/loyalty/tier/delete?tier_id=7"
        );
    }

    #[test]
    fn test_build_url_invalid_base() {
        let err = build_url("not a valid url", "loyalty/tier/list", &[]).unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[tokio::test]
    async fn test_list_tiers_sends_bearer_and_keeps_order() {
        let (base, requests) = spawn_server(|_, _| {
            (
                StatusCode::OK,
                json!([
                    {"id": 9, "tier_name": "Platinum"},
                    {"tier_id": 3, "tier_name": "Bronze"}
                ]),
            )
        })
        .await;

        let api = HttpLoyaltyApi::local(base);
        let tiers = api.list_tiers("tok").await.unwrap();
        let ids: Vec<_> = tiers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(9), Some(3)]);

        let requests = requests.lock().await;
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/loyalty/tier/list");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_save_tier_sets_skip_interceptor_header() {
        let (base, requests) = spawn_server(ok).await;
        let api = HttpLoyaltyApi::local(base);

        api.save_tier("tok", &sample_payload(Some(4))).await.unwrap();

        let requests = requests.lock().await;
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/loyalty/tier/update");
        assert_eq!(request.skip_401.as_deref(), Some("true"));
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));

        let body = request.body.clone().unwrap();
        assert_eq!(body["operation"], json!("update"));
        assert_eq!(body["tier_id"], json!(4));
        assert_eq!(body["constraints"]["REFERRAL"], json!(1));
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let (base, _) = spawn_server(|_, _| {
            (
                StatusCode::UNAUTHORIZED,
                json!({"message": "Token expired"}),
            )
        })
        .await;
        let api = HttpLoyaltyApi::local(base);

        let err = api.save_tier("tok", &sample_payload(None)).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Token expired"));
    }

    #[tokio::test]
    async fn test_delete_tier_uses_tier_id_query() {
        let (base, requests) = spawn_server(ok).await;
        let api = HttpLoyaltyApi::local(base);

        api.delete_tier("tok", 7).await.unwrap();

        let requests = requests.lock().await;
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path, "/loyalty/tier/delete");
        assert_eq!(requests[0].query.as_deref(), Some("tier_id=7"));
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_delete_config_has_no_authorization_header() {
        let (base, requests) = spawn_server(ok).await;
        let api = HttpLoyaltyApi::local(base);

        api.delete_config(4).await.unwrap();

        let requests = requests.lock().await;
        assert_eq!(requests[0].path, "/loyalty/config/delete");
        assert_eq!(requests[0].query.as_deref(), Some("id=4"));
        assert_eq!(requests[0].authorization, None);
    }

    #[tokio::test]
    async fn test_list_configs_decodes_nested_constraints() {
        let (base, _) = spawn_server(|_, _| {
            (
                StatusCode::OK,
                json!([{
                    "id": 1,
                    "description": "Main",
                    "default_tier": {"id": 2},
                    "constraints": {
                        "ORDER_ONLINE": {"ratio_from": "100", "ratio_to": "5"},
                        "REFERRAL": {"ratio_from": "1", "ratio_to": "1", "amount": "40"}
                    }
                }]),
            )
        })
        .await;
        let api = HttpLoyaltyApi::local(base);

        let configs = api.list_configs("tok").await.unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].referral.amount.as_deref(), Some("40"));
        assert_eq!(configs[0].review_product.amount, None);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpLoyaltyApi::local(format!("http://{addr}"));
        let err = api.list_tiers("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
