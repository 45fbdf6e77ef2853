// 类型化的 JSON-RPC 客户端
use std::sync::atomic::{AtomicU64, Ordering};

use account_application::ErrorKind;
use account_domain::{Account, AccountId};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::rpc::types::{
    AccountResult, AccountsResult, GetAccountParams, GetAccountsParams, PostAccountParams,
    RpcRequest, RpcResponse, methods,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// 服务端返回的错误；`kind` 对应服务端的错误种类
    #[error("rpc error {code}: {message}")]
    Remote {
        code: i32,
        message: String,
        kind: Option<String>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Remote { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound.as_str())
    }
}

pub struct AccountClient {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl AccountClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
            request_id: AtomicU64::new(1),
        }
    }

    pub async fn post_account(&self, name: &str) -> Result<Account, ClientError> {
        let params = PostAccountParams {
            name: name.to_string(),
        };
        let result: AccountResult = self.call(methods::POST_ACCOUNT, &params).await?;
        Ok(result.account.into())
    }

    pub async fn get_account(&self, id: &AccountId) -> Result<Account, ClientError> {
        let params = GetAccountParams {
            id: id.to_string(),
        };
        let result: AccountResult = self.call(methods::GET_ACCOUNT, &params).await?;
        Ok(result.account.into())
    }

    pub async fn get_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>, ClientError> {
        let params = GetAccountsParams { skip, take };
        let result: AccountsResult = self.call(methods::GET_ACCOUNTS, &params).await?;
        Ok(result.accounts.into_iter().map(Account::from).collect())
    }

    /// 方法目录，原样返回
    pub async fn discover(&self) -> Result<Value, ClientError> {
        self.call(methods::DISCOVER, &Value::Null).await
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, ClientError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let params =
            serde_json::to_value(params).map_err(|e| ClientError::Malformed(e.to_string()))?;
        let request = RpcRequest::new(method, params, id);

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(ClientError::Remote {
                code: error.code,
                kind: error.kind().map(str::to_string),
                message: error.message,
            });
        }
        let result = response
            .result
            .ok_or_else(|| ClientError::Malformed(format!("{method}: missing result")))?;
        serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}
