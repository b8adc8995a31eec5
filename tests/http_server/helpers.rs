use std::{net::SocketAddr, sync::Arc};

use reqwest::Client;
use tokio::task;
use widget_host::{
    config::AppConfig,
    engine::ScriptHost,
    http_server::{self, ApiState},
};

pub fn create_test_host() -> Arc<ScriptHost> {
    Arc::new(ScriptHost::new(&AppConfig::default()).expect("Failed to create script host"))
}

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_host(create_test_host()).await
    }

    pub async fn with_host(host: Arc<ScriptHost>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let address = listener.local_addr().expect("Failed to get address");

        let server_handle = task::spawn(async move {
            http_server::serve(listener, ApiState { host }).await.expect("Server failed");
        });

        Self { address, server_handle, client: Client::new() }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("http://{}{}", self.address, path);
        self.client.post(&url)
    }

    pub fn cleanup(self) {
        self.server_handle.abort();
    }
}
