//! 远程调用适配层（JSON-RPC 2.0 over HTTP）
//!
//! - `POST /`：业务方法与 `rpc.discover` 自省；
//! - `GET /health`：存储存活检查。
//!
//! 每次调用构造独立的 [`RequestContext`]，带有配置的截止时间；
//! 连接断开导致处理 future 被丢弃时，上下文随之取消。
pub mod discover;
pub mod handlers;
pub mod types;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use account_application::AccountService;
use account_domain::RequestContext;
use axum::Router;
use axum::routing::{get, post};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct RpcState {
    pub service: Arc<dyn AccountService>,
    pub request_timeout: Duration,
}

impl RpcState {
    pub fn new(service: Arc<dyn AccountService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// 请求 id 作为关联 ID 写入日志
    pub(crate) fn request_context(&self, id: &Value) -> RequestContext {
        let correlation_id = match id {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        RequestContext::builder()
            .maybe_correlation_id(correlation_id)
            .build()
            .with_timeout(self.request_timeout)
    }
}

pub fn router(state: RpcState) -> Router {
    Router::new()
        .route("/", post(handlers::handle_rpc_request))
        .route("/health", get(handlers::handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct RpcServer {
    listener: TcpListener,
    state: RpcState,
}

impl RpcServer {
    /// 绑定监听地址；失败即返回，由调用方决定终止进程
    pub async fn bind(
        addr: SocketAddr,
        service: Arc<dyn AccountService>,
        request_timeout: Duration,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            state: RpcState::new(service, request_timeout),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// 持续服务直到 `shutdown` 完成，随后等待在途请求结束
    pub async fn serve<S>(self, shutdown: S) -> std::io::Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        info!(addr = ?self.listener.local_addr().ok(), "rpc server listening");
        let app = router(self.state);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
