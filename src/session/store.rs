// src/session/store.rs

use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use crate::{
    api::http::TokenCell,
    common::error::AppError,
    models::auth::{Role, Session, User, UserInfoPatch},
};

// Onde a sessão durável mora. A sessão inteira (token + usuário) é um
// documento só: nunca existe token persistido sem usuário, nem o contrário.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<Session>, AppError>;
    fn save(&self, session: &Session) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

// Implementação de verdade: um arquivo JSON no disco.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<Session>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            // Arquivo corrompido: tratamos como "sem sessão" e seguimos.
            Err(e) => {
                tracing::warn!("Sessão salva ilegível ({}), descartando: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// Implementação em memória, para os testes injetarem.
#[derive(Default)]
pub struct MemorySessionStorage {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

// A sessão viva do processo. Fonte única da identidade para o bloqueio
// de interface; toda mutação reescreve a cópia durável, então recarregar
// o programa restaura a mesma sessão.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
    token_cell: TokenCell,
}

impl SessionStore {
    // Restaura a sessão durável (se houver) e publica o token para o
    // transporte HTTP.
    pub fn new(storage: Box<dyn SessionStorage>, token_cell: TokenCell) -> Result<Self, AppError> {
        let restored = storage.load()?;
        if let Some(session) = &restored {
            tracing::info!("🔑 Sessão restaurada para '{}'.", session.user.username);
        }
        Self::publish_token(&token_cell, restored.as_ref().map(|s| s.token.clone()));
        Ok(Self {
            storage,
            current: RwLock::new(restored),
            token_cell,
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|session| session.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.current().map(|session| session.user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    // Grava a nova sessão. Primeiro o disco, depois a memória: se a
    // persistência falhar, nada muda e o chamador recebe o erro.
    pub fn establish(&self, session: Session) -> Result<(), AppError> {
        self.storage.save(&session)?;
        Self::publish_token(&self.token_cell, Some(session.token.clone()));
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        Ok(())
    }

    // Limpeza local incondicional. A memória e o token sempre são zerados;
    // uma falha ao remover o arquivo vira aviso, não erro.
    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Self::publish_token(&self.token_cell, None);
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Falha ao remover a sessão durável (ignorada): {}", e);
        }
    }

    // Merge raso no usuário guardado, com re-persistência.
    pub fn update_user_info(&self, patch: &UserInfoPatch) -> Result<User, AppError> {
        let mut session = self.current().ok_or(AppError::NotAuthenticated)?;
        session.user.merge(patch);
        self.storage.save(&session)?;
        let user = session.user.clone();
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        Ok(user)
    }

    fn publish_token(cell: &TokenCell, token: Option<String>) {
        *cell.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}
