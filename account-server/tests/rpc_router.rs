use std::sync::Arc;
use std::time::Duration;

use account_application::AccountServiceImpl;
use account_domain::persist::{AccountRepository, InMemoryAccountRepository};
use account_domain::{Account, AccountId, DomainResult, RequestContext};
use account_server::rpc::types::codes;
use account_server::{RpcState, router};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with<R: AccountRepository + 'static>(repository: R, timeout: Duration) -> Router {
    let service = Arc::new(AccountServiceImpl::new(repository));
    router(RpcState::new(service, timeout))
}

fn app() -> Router {
    app_with(InMemoryAccountRepository::new(), Duration::from_secs(5))
}

async fn send(app: &Router, body: impl Into<Body>) -> Value {
    let request = Request::post("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn call(app: &Router, method: &str, params: Value) -> Value {
    let body = json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": 1 });
    send(app, body.to_string()).await
}

#[tokio::test]
async fn post_then_get_account() {
    let app = app();
    let created = call(&app, "PostAccount", json!({ "name": "alice" })).await;
    assert_eq!(created["id"], 1);
    let account = &created["result"]["account"];
    assert_eq!(account["name"], "alice");
    let id = account["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let fetched = call(&app, "GetAccount", json!({ "id": id })).await;
    assert_eq!(&fetched["result"]["account"], account);
}

#[tokio::test]
async fn get_accounts_lists_newest_first() {
    let app = app();
    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        let created = call(&app, "PostAccount", json!({ "name": name })).await;
        ids.push(created["result"]["account"]["id"].as_str().unwrap().to_string());
    }

    let page = call(&app, "GetAccounts", json!({ "skip": 1, "take": 2 })).await;
    let listed: Vec<&str> = page["result"]["accounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[1].as_str(), ids[0].as_str()]);

    // 缺省分页参数视为 skip=0,take=0，即返回前 100 条
    let all = call(&app, "GetAccounts", Value::Null).await;
    assert_eq!(all["result"]["accounts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let app = app();
    let res = call(&app, "GetAccount", json!({ "id": "missing" })).await;
    assert_eq!(res["error"]["code"], codes::NOT_FOUND);
    assert_eq!(res["error"]["data"]["kind"], "not_found");
    assert!(res.get("result").is_none());
}

#[tokio::test]
async fn blank_name_is_invalid_params() {
    let app = app();
    let res = call(&app, "PostAccount", json!({ "name": "   " })).await;
    assert_eq!(res["error"]["code"], codes::INVALID_PARAMS);
    assert_eq!(res["error"]["data"]["kind"], "invalid_argument");

    let res = call(&app, "PostAccount", json!({ "nickname": "x" })).await;
    assert_eq!(res["error"]["code"], codes::INVALID_PARAMS);

    let res = call(&app, "GetAccounts", json!({ "skip": -1 })).await;
    assert_eq!(res["error"]["code"], codes::INVALID_PARAMS);
}

#[tokio::test]
async fn protocol_errors() {
    let app = app();

    let res = send(&app, "{not json").await;
    assert_eq!(res["error"]["code"], codes::PARSE_ERROR);
    assert_eq!(res["id"], Value::Null);

    let res = send(&app, json!({ "jsonrpc": "2.0", "id": 3 }).to_string()).await;
    assert_eq!(res["error"]["code"], codes::INVALID_REQUEST);

    let res = send(
        &app,
        json!({ "jsonrpc": "1.0", "method": "GetAccounts", "id": 4 }).to_string(),
    )
    .await;
    assert_eq!(res["error"]["code"], codes::INVALID_REQUEST);
    assert_eq!(res["id"], 4);

    let res = call(&app, "DeleteAccount", json!({})).await;
    assert_eq!(res["error"]["code"], codes::METHOD_NOT_FOUND);
    assert!(res["error"].get("data").is_none());
}

#[tokio::test]
async fn discover_describes_methods() {
    let app = app();
    let res = call(&app, "rpc.discover", Value::Null).await;
    let catalog = &res["result"];
    assert_eq!(catalog["service"], "account.AccountService");
    let names: Vec<&str> = catalog["methods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"PostAccount"));
    assert!(names.contains(&"GetAccount"));
    assert!(names.contains(&"GetAccounts"));
}

#[tokio::test]
async fn health_reports_store_state() {
    let repository = InMemoryAccountRepository::new();
    let app = app_with(repository.clone(), Duration::from_secs(5));

    let get_health = || Request::get("/health").body(Body::empty()).unwrap();

    let response = app.clone().oneshot(get_health()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    repository.close().await;
    let response = app.clone().oneshot(get_health()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// 存储调用永不返回，只能被上下文中止
struct StalledRepository;

#[async_trait]
impl AccountRepository for StalledRepository {
    async fn put_account(&self, ctx: &RequestContext, _account: &Account) -> DomainResult<()> {
        ctx.run(std::future::pending()).await
    }

    async fn get_account_by_id(
        &self,
        ctx: &RequestContext,
        _id: &AccountId,
    ) -> DomainResult<Account> {
        ctx.run(std::future::pending()).await
    }

    async fn list_accounts(
        &self,
        ctx: &RequestContext,
        _skip: u64,
        _take: u64,
    ) -> DomainResult<Vec<Account>> {
        ctx.run(std::future::pending()).await
    }

    async fn ping(&self, ctx: &RequestContext) -> DomainResult<()> {
        ctx.run(std::future::pending()).await
    }

    async fn close(&self) {}
}

#[tokio::test]
async fn request_timeout_surfaces_as_deadline_exceeded() {
    let app = app_with(StalledRepository, Duration::from_millis(50));
    let res = call(&app, "GetAccounts", json!({ "skip": 0, "take": 10 })).await;
    assert_eq!(res["error"]["code"], codes::DEADLINE_EXCEEDED);
    assert_eq!(res["error"]["data"]["kind"], "deadline_exceeded");
}
