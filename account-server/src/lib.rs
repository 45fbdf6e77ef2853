pub mod client;
pub mod config;
pub mod retry;
pub mod rpc;
pub mod startup;
pub mod telemetry;

pub use client::{AccountClient, ClientError};
pub use config::{ConfigError, ServiceConfig};
pub use rpc::{RpcServer, RpcState, router};
