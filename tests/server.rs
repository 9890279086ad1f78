#![cfg(feature = "server")]

mod common;

use anyhow::Result;
use cidgate::server::{bind_listener, serve, Server};
use cidgate::GatewayRuntime;
use common::Fixture;
use std::time::Duration;

#[tokio::test]
async fn test_server_endpoints() -> Result<()> {
    let fx = Fixture::new();
    let k = fx.add_fnord()?;
    let root = fx.add_index_tree()?;
    fx.publish_cid("example.net", &root)?;

    let (base_url, server_handle) = common::start_test_server(fx.router()?).await?;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    // Content by identifier
    let res = client.get(format!("{}/ipfs/{}", base_url, k)).send().await?;
    assert!(res.status().is_success());
    assert_eq!(res.text().await?, "fnord");

    // Version
    let res = client.get(format!("{}/version", base_url)).send().await?;
    assert!(res.status().is_success());
    let body = res.text().await?;
    assert!(body.contains("Commit: theshortcommithash"));

    // Hostname routing through an explicit Host header
    let res = client
        .get(format!("{}/foo", base_url))
        .header("host", "example.net")
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 302);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/foo/")
    );

    let res = client
        .get(format!("{}/foo/", base_url))
        .header("host", "example.net")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert_eq!(res.text().await?, "_");

    // CORS is permissive
    let res = client
        .get(format!("{}/ipfs/{}", base_url, k))
        .header("origin", "https://elsewhere.example")
        .send()
        .await?;
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    server_handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_graceful_shutdown() -> Result<()> {
    let fx = Fixture::new();
    let k = fx.add_fnord()?;
    let server = Server::new(fx.names.clone(), fx.store.clone(), fx.config())?;

    let listener = bind_listener("127.0.0.1", 0).await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let runtime = GatewayRuntime::new();
    let shutdown = runtime.clone();
    let server_task = tokio::spawn(async move { serve(listener, &server, &runtime).await });

    let res = reqwest::get(format!("{}/ipfs/{}", base_url, k)).await?;
    assert_eq!(res.text().await?, "fnord");

    shutdown.trigger_shutdown();
    tokio::time::timeout(Duration::from_secs(5), server_task).await???;
    Ok(())
}
