use super::discover;
use super::types::*;
use crate::rpc::RpcState;
use account_domain::{AccountId, RequestContext};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Main dispatcher: routes incoming JSON-RPC requests to the correct handler.
pub async fn handle_rpc_request(State(state): State<RpcState>, body: Bytes) -> Json<RpcResponse> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return Json(RpcResponse::failure(Value::Null, RpcError::parse_error(e))),
    };
    let req: RpcRequest = match serde_json::from_value(raw) {
        Ok(r) => r,
        Err(e) => return Json(RpcResponse::failure(Value::Null, RpcError::invalid_request(e))),
    };
    if req.jsonrpc != JSONRPC_VERSION {
        return Json(RpcResponse::failure(
            req.id,
            RpcError::invalid_request(format!("unsupported jsonrpc version {:?}", req.jsonrpc)),
        ));
    }

    debug!(method = %req.method, id = %req.id, "rpc request");

    // 调用被放弃（连接断开导致 future 被丢弃）时取消上下文
    let ctx = state.request_context(&req.id);
    let _cancel_on_drop = ctx.cancel_on_drop();

    let result = match req.method.as_str() {
        methods::POST_ACCOUNT => handle_post_account(&state, &ctx, req.params).await,
        methods::GET_ACCOUNT => handle_get_account(&state, &ctx, req.params).await,
        methods::GET_ACCOUNTS => handle_get_accounts(&state, &ctx, req.params).await,
        methods::DISCOVER => Ok(discover::catalog()),
        _ => Err(RpcError::method_not_found(&req.method)),
    };

    match result {
        Ok(val) => Json(RpcResponse::success(req.id, val)),
        Err(err) => {
            debug!(
                method = %req.method,
                code = err.code,
                message = %err.message,
                "rpc request failed"
            );
            Json(RpcResponse::failure(req.id, err))
        }
    }
}

async fn handle_post_account(
    state: &RpcState,
    ctx: &RequestContext,
    params: Value,
) -> Result<Value, RpcError> {
    let params: PostAccountParams = parse_params(params)?;
    let account = state.service.post_account(ctx, params.name).await?;
    to_json(&AccountResult {
        account: account.into(),
    })
}

async fn handle_get_account(
    state: &RpcState,
    ctx: &RequestContext,
    params: Value,
) -> Result<Value, RpcError> {
    let params: GetAccountParams = parse_params(params)?;
    let account = state
        .service
        .get_account(ctx, &AccountId::from(params.id))
        .await?;
    to_json(&AccountResult {
        account: account.into(),
    })
}

async fn handle_get_accounts(
    state: &RpcState,
    ctx: &RequestContext,
    params: Value,
) -> Result<Value, RpcError> {
    // 未携带 params 视为未分页
    let params: GetAccountsParams = if params.is_null() {
        GetAccountsParams::default()
    } else {
        parse_params(params)?
    };
    let accounts = state
        .service
        .get_accounts(ctx, params.skip, params.take)
        .await?;
    to_json(&AccountsResult {
        accounts: accounts.into_iter().map(AccountDto::from).collect(),
    })
}

/// `GET /health`：透传一次存储 ping
pub async fn handle_health(State(state): State<RpcState>) -> (StatusCode, Json<Value>) {
    let ctx = state.request_context(&Value::Null);
    match state.service.health(&ctx).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": err.to_string() })),
            )
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(RpcError::invalid_params)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}
