//! HTTP client for the remote banking service.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use bankview_core::ledger::types::{Account, RawTransaction};
use bankview_core::session::{
    AuthApi, AuthResponse, Credentials, ForgotPasswordResponse, RegisterData,
    ResetPasswordResponse,
};
use bankview_core::transfer::{TransferGateway, TransferRequest};
use bankview_shared::config::ApiConfig;
use bankview_shared::{AppError, AppResult};

/// Client for the banking service's REST API.
///
/// Cheap to clone; all clones share the connection pool and the bearer
/// token. The token is installed by the session layer after login or
/// restore and cleared on logout.
#[derive(Debug, Clone)]
pub struct HttpBankingApi {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpBankingApi {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| AppError::Config(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Installs the bearer token sent with subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    /// Returns the currently installed bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().map(|slot| slot.clone()).unwrap_or_default()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .authorize(self.http.get(&url).query(query))
            .send()
            .await
            .map_err(|err| AppError::Remote(err.to_string()))?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self
            .authorize(self.http.post(&url).json(body))
            .send()
            .await
            .map_err(|err| AppError::Remote(err.to_string()))?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote(format!("{path} returned {status}")));
        }
        response
            .json()
            .await
            .map_err(|err| AppError::Remote(format!("{path} returned an unreadable body: {err}")))
    }

    /// Fetches accounts, optionally scoped to one customer.
    pub async fn fetch_accounts(&self, customer_id: Option<i64>) -> AppResult<Vec<Account>> {
        let mut query = Vec::new();
        if let Some(id) = customer_id {
            query.push(("customerId", id.to_string()));
        }
        self.get_json("accounts", &query).await
    }

    /// Fetches raw transactions, optionally scoped to one account.
    pub async fn fetch_transactions(
        &self,
        account_id: Option<i64>,
    ) -> AppResult<Vec<RawTransaction>> {
        let mut query = Vec::new();
        if let Some(id) = account_id {
            query.push(("accountId", id.to_string()));
        }
        self.get_json("accounts/transactions", &query).await
    }
}

impl AuthApi for HttpBankingApi {
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthResponse> {
        self.post_json("auth/login", credentials).await
    }

    async fn register(&self, data: &RegisterData) -> AppResult<AuthResponse> {
        self.post_json("auth/register", data).await
    }

    async fn forgot_password(&self, email: &str) -> AppResult<ForgotPasswordResponse> {
        self.post_json("auth/forgot-password", &json!({ "email": email }))
            .await
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> AppResult<ResetPasswordResponse> {
        self.post_json(
            "auth/reset-password",
            &json!({ "token": token, "newPassword": new_password }),
        )
        .await
    }
}

impl TransferGateway for HttpBankingApi {
    async fn create_transfer(&self, request: &TransferRequest) -> AppResult<()> {
        let url = self.endpoint("accounts/transfer");
        debug!(%url, "POST");
        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await
            .map_err(|err| AppError::Remote(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::Remote(format!("accounts/transfer returned {status}")))
        }
    }

    async fn fetch_accounts(&self) -> AppResult<Vec<Account>> {
        Self::fetch_accounts(self, None).await
    }
}
