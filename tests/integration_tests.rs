use anyhow::Result;
use small_rack::{CookieApp, ExampleServer, ExtendedApp, GlobalContext, RackHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn localhost() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

async fn start_extended(context: &GlobalContext, mount: &str) -> Result<ExampleServer> {
    let handler = RackHandler::new(Arc::new(ExtendedApp::new(context.clone()))).mounted_at(mount)?;
    handler.init(context);
    Ok(ExampleServer::start(handler, localhost()).await?)
}

fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_cookie_app_sets_multiple_cookies() -> Result<()> {
    let server = ExampleServer::start(RackHandler::new(Arc::new(CookieApp::new())), localhost()).await?;
    let client = reqwest::Client::new();

    // 不論先前請求為何，每次都回傳兩個 cookie
    for _ in 0..2 {
        let response = client.get(server.url("/set-multiple-cookies")?).send().await?;
        assert_eq!(response.status(), 200);
        assert_eq!(set_cookies(&response), vec!["foo=bar", "bar=foo"]);
        assert!(response.bytes().await?.is_empty());
    }

    let response = client.get(server.url("/legen-wait-for-it")?).send().await?;
    assert_eq!(response.status(), 404);

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_extended_app_sets_multiple_cookies() -> Result<()> {
    let context = GlobalContext::new();
    let server = start_extended(&context, "/*").await?;

    let response = reqwest::get(server.url("/set-multiple-cookies")?).await?;
    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.contains(&"foo=bar".to_string()));
    assert!(cookies.contains(&"bar=foo".to_string()));

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_global_vars_set_by_host() -> Result<()> {
    let context = GlobalContext::new();
    let server = start_extended(&context, "/*").await?;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/global_vars")?).send().await?;
    assert_eq!(response.status(), 200);
    assert!(response.bytes().await?.is_empty());

    context.clear();
    let response = client.get(server.url("/global_vars")?).send().await?;
    assert_eq!(response.status(), 404);
    assert!(response.bytes().await?.is_empty());

    context.register();
    let response = client.get(server.url("/global_vars")?).send().await?;
    assert_eq!(response.status(), 200);

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_global_vars_without_host_registration() -> Result<()> {
    let context = GlobalContext::new();
    let handler = RackHandler::new(Arc::new(ExtendedApp::new(context.clone())));
    let server = ExampleServer::start(handler, localhost()).await?;

    let response = reqwest::get(server.url("/global_vars")?).await?;
    assert_eq!(response.status(), 404);

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_legen_wait_for_it() -> Result<()> {
    let context = GlobalContext::new();
    let server = start_extended(&context, "/*").await?;

    let start = Instant::now();
    let response = reqwest::get(server.url("/legen-wait-for-it")?).await?;
    assert_eq!(response.status(), 200);
    let body = response.text().await?;

    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(body, "dary!");

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_mounted_server() -> Result<()> {
    let context = GlobalContext::new();
    let server = start_extended(&context, "/app/*").await?;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/app/global_vars")?).send().await?;
    assert_eq!(response.status(), 200);

    let response = client.get(server.url("/app/set-multiple-cookies")?).send().await?;
    assert_eq!(set_cookies(&response), vec!["foo=bar", "bar=foo"]);

    let response = client.get(server.url("/global_vars")?).send().await?;
    assert_eq!(response.status(), 404);

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_server_reports_ephemeral_port() -> Result<()> {
    let server = ExampleServer::start(RackHandler::new(Arc::new(CookieApp::new())), localhost()).await?;
    assert_ne!(server.port(), 0);
    assert_eq!(server.url("/x")?.port(), Some(server.port()));
    server.stop().await?;
    Ok(())
}
