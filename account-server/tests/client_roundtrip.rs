use std::sync::Arc;
use std::time::Duration;

use account_application::AccountServiceImpl;
use account_domain::AccountId;
use account_domain::entity::Entity;
use account_domain::persist::InMemoryAccountRepository;
use account_server::rpc::RpcServer;
use account_server::rpc::types::codes;
use account_server::{AccountClient, ClientError};
use anyhow::Result as AnyResult;
use tokio::sync::oneshot;

struct Running {
    client: AccountClient,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<std::io::Result<()>>,
}

async fn start() -> AnyResult<Running> {
    let service = Arc::new(AccountServiceImpl::new(InMemoryAccountRepository::new()));
    let server = RpcServer::bind("127.0.0.1:0".parse()?, service, Duration::from_secs(5)).await?;
    let addr = server.local_addr()?;

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(async move {
        let _ = stopped.await;
    }));

    Ok(Running {
        client: AccountClient::new(format!("http://{addr}/")),
        stop,
        handle,
    })
}

#[tokio::test]
async fn client_round_trip() -> AnyResult<()> {
    let running = start().await?;
    let client = &running.client;

    let alice = client.post_account("alice").await?;
    let bob = client.post_account("bob").await?;
    assert_eq!(alice.name(), "alice");
    assert!(alice.id() < bob.id());

    assert_eq!(client.get_account(alice.id()).await?, alice);
    assert_eq!(client.get_accounts(0, 0).await?, vec![bob.clone(), alice.clone()]);
    assert_eq!(client.get_accounts(1, 10).await?, vec![alice]);

    let err = client
        .get_account(&AccountId::from("missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::Remote { code, .. } if code == codes::NOT_FOUND));

    let catalog = client.discover().await?;
    assert!(catalog["methods"].as_array().is_some_and(|m| m.len() == 4));

    running.stop.send(()).ok();
    running.handle.await??;
    Ok(())
}

#[tokio::test]
async fn binding_an_occupied_port_fails() -> AnyResult<()> {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = occupied.local_addr()?;
    let service = Arc::new(AccountServiceImpl::new(InMemoryAccountRepository::new()));

    let result = RpcServer::bind(addr, service, Duration::from_secs(5)).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = AccountClient::new("http://127.0.0.1:1/");
    let err = client.post_account("nobody").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_not_found());
}
