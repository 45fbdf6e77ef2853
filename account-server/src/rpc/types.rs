// JSON-RPC 2.0 协议类型（服务端与客户端共用）
use account_application::{AppError, ErrorKind};
use account_domain::{Account, AccountId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const JSONRPC_VERSION: &str = "2.0";

/// 暴露的方法名
pub mod methods {
    pub const POST_ACCOUNT: &str = "PostAccount";
    pub const GET_ACCOUNT: &str = "GetAccount";
    pub const GET_ACCOUNTS: &str = "GetAccounts";
    pub const DISCOVER: &str = "rpc.discover";
}

/// 错误码：-32700..-32600 为协议保留段，-32001 起为业务错误
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const NOT_FOUND: i32 = -32001;
    pub const ALREADY_EXISTS: i32 = -32002;
    pub const CANCELED: i32 = -32003;
    pub const DEADLINE_EXCEEDED: i32 = -32004;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: Value::from(id),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub id: Value,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {reason}"))
    }

    pub fn invalid_request(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("Invalid request: {reason}"))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(codes::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_PARAMS, format!("Invalid params: {reason}"))
            .with_kind(ErrorKind::InvalidArgument)
    }

    pub fn internal(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::INTERNAL_ERROR, format!("Internal error: {reason}"))
    }

    fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.data = Some(json!({ "kind": kind.as_str() }));
        self
    }

    /// 业务错误种类（`data.kind`），协议错误没有该字段
    pub fn kind(&self) -> Option<&str> {
        self.data.as_ref()?.get("kind")?.as_str()
    }
}

impl From<AppError> for RpcError {
    fn from(err: AppError) -> Self {
        let kind = err.kind();
        let code = match kind {
            ErrorKind::NotFound => codes::NOT_FOUND,
            ErrorKind::AlreadyExists => codes::ALREADY_EXISTS,
            ErrorKind::Canceled => codes::CANCELED,
            ErrorKind::DeadlineExceeded => codes::DEADLINE_EXCEEDED,
            ErrorKind::InvalidArgument => codes::INVALID_PARAMS,
            ErrorKind::Unavailable => codes::INTERNAL_ERROR,
        };
        Self::new(code, err.to_string()).with_kind(kind)
    }
}

// Method-specific parameter types
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostAccountParams {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GetAccountParams {
    pub id: String,
}

/// 缺省字段按 0 处理
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct GetAccountsParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub take: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountDto {
    pub id: String,
    pub name: String,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        let (id, name) = account.into_parts();
        Self {
            id: id.into_inner(),
            name,
        }
    }
}

impl From<AccountDto> for Account {
    fn from(dto: AccountDto) -> Self {
        Account::new(AccountId::from(dto.id), dto.name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountResult {
    pub account: AccountDto,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountsResult {
    pub accounts: Vec<AccountDto>,
}
