//! Infra compartilhada dos testes: um backend de mentira (axum) numa
//! porta efêmera e uma sessão em memória. O cliente de verdade fala HTTP
//! com ele, exatamente como falaria com o servidor real.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use client::api::http::ApiHttp;
use client::session::store::{MemorySessionStorage, SessionStore};

/// Sobe o stub e devolve a base URL (`http://127.0.0.1:porta`).
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Sessão em memória já ligada à célula de token do transporte.
pub fn memory_session(http: &ApiHttp) -> Arc<SessionStore> {
    Arc::new(
        SessionStore::new(Box::new(MemorySessionStorage::new()), http.token_cell()).unwrap(),
    )
}
