//! A sessão durável: restauração no arranque, merge de perfil com
//! re-persistência e a invariante "token e usuário juntos ou nada".

mod common;

use std::path::PathBuf;

use client::api::http::ApiHttp;
use client::common::error::AppError;
use client::models::auth::{Role, Session, User, UserInfoPatch};
use client::session::store::{FileSessionStorage, SessionStore};

fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!("client-session-{}.json", uuid::Uuid::new_v4()))
}

fn sample_session() -> Session {
    Session {
        token: "t1".to_string(),
        user: User {
            id: None,
            username: "alice".to_string(),
            full_name: Some("Alice Tran".to_string()),
            email: Some("alice@example.com".to_string()),
            phone_number: None,
            address: None,
            role: Role::Staff,
        },
    }
}

fn file_store(path: &PathBuf, http: &ApiHttp) -> SessionStore {
    SessionStore::new(Box::new(FileSessionStorage::new(path)), http.token_cell()).unwrap()
}

// ---------------------------------------------------------------------------
// Recarregar o programa restaura exatamente a mesma sessão
// ---------------------------------------------------------------------------

#[test]
fn a_persisted_session_survives_a_restart() {
    let path = temp_session_path();

    let http = ApiHttp::new("http://localhost:0");
    let store = file_store(&path, &http);
    assert!(store.current().is_none());
    store.establish(sample_session()).unwrap();

    // "Reinicia": outro processo abrindo o mesmo arquivo.
    let http2 = ApiHttp::new("http://localhost:0");
    let store2 = file_store(&path, &http2);
    let restored = store2.current().unwrap();
    assert_eq!(restored.token, "t1");
    assert_eq!(restored.user.username, "alice");
    assert_eq!(restored.user.role, Role::Staff);

    // O token restaurado já fica disponível para o transporte.
    assert_eq!(http2.token_cell().read().unwrap().as_deref(), Some("t1"));

    store2.clear();
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// Token e usuário: ambos presentes ou ambos ausentes, nunca metade
// ---------------------------------------------------------------------------

#[test]
fn session_is_all_or_nothing() {
    let path = temp_session_path();
    let http = ApiHttp::new("http://localhost:0");
    let store = file_store(&path, &http);

    store.establish(sample_session()).unwrap();
    let current = store.current().unwrap();
    assert!(!current.token.is_empty());
    assert!(!current.user.username.is_empty());
    assert!(http.token_cell().read().unwrap().is_some());

    store.clear();
    assert!(store.current().is_none());
    assert!(store.user().is_none());
    assert!(store.role().is_none());
    assert!(http.token_cell().read().unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

// ---------------------------------------------------------------------------
// Atualização de perfil: merge raso + re-persistência
// ---------------------------------------------------------------------------

#[test]
fn profile_updates_merge_and_are_repersisted() {
    let path = temp_session_path();
    let http = ApiHttp::new("http://localhost:0");
    let store = file_store(&path, &http);
    store.establish(sample_session()).unwrap();

    let updated = store
        .update_user_info(&UserInfoPatch {
            email: Some("novo@example.com".to_string()),
            address: Some("Quận 1, TP.HCM".to_string()),
            ..UserInfoPatch::default()
        })
        .unwrap();

    // Campos do patch trocados, o resto intacto.
    assert_eq!(updated.email.as_deref(), Some("novo@example.com"));
    assert_eq!(updated.full_name.as_deref(), Some("Alice Tran"));

    // A cópia durável já reflete o merge (e o token não mudou).
    let http2 = ApiHttp::new("http://localhost:0");
    let reopened = file_store(&path, &http2);
    let restored = reopened.current().unwrap();
    assert_eq!(restored.user.email.as_deref(), Some("novo@example.com"));
    assert_eq!(restored.user.address.as_deref(), Some("Quận 1, TP.HCM"));
    assert_eq!(restored.token, "t1");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn profile_update_without_a_session_is_rejected() {
    let path = temp_session_path();
    let http = ApiHttp::new("http://localhost:0");
    let store = file_store(&path, &http);

    let err = store
        .update_user_info(&UserInfoPatch::default())
        .unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
}

// ---------------------------------------------------------------------------
// Arquivo de sessão ilegível: descarta e segue sem sessão
// ---------------------------------------------------------------------------

#[test]
fn a_corrupted_session_file_is_discarded() {
    let path = temp_session_path();
    std::fs::write(&path, "isto não é json").unwrap();

    let http = ApiHttp::new("http://localhost:0");
    let store = file_store(&path, &http);
    assert!(store.current().is_none());
    assert!(http.token_cell().read().unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}
