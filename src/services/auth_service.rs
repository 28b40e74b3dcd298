// src/services/auth_service.rs

use std::sync::Arc;

use crate::{
    api::auth_api::AuthApi,
    common::error::AppError,
    models::auth::{
        LoginPayload, RegisterEmployeePayload, RegisterGuestPayload, RegisterPartnerPayload,
        Session, User, UserInfoPatch,
    },
    session::store::SessionStore,
};

// Orquestra autenticação entre o gateway e a sessão durável.
#[derive(Clone)]
pub struct AuthService {
    auth_api: AuthApi,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(auth_api: AuthApi, session: Arc<SessionStore>) -> Self {
        Self { auth_api, session }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        // 1. Chama o endpoint. Se o servidor rejeitar, a sessão local
        //    não é tocada: ela só muda depois de uma resposta de sucesso.
        let response = self
            .auth_api
            .login(&LoginPayload {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        // 2. Monta e persiste a sessão (token + usuário num passo só).
        let session = Session {
            token: response.access_token,
            user: response.user,
        };
        self.session.establish(session.clone())?;

        tracing::info!("✅ Login de '{}' ({}).", session.user.username, session.user.role.as_str());
        Ok(session)
    }

    // Logout é melhor esforço no servidor e garantido no cliente:
    // a limpeza local acontece mesmo se a notificação falhar.
    pub async fn logout(&self) {
        if let Err(e) = self.auth_api.logout().await {
            tracing::warn!("Logout no servidor falhou (ignorado): {}", e);
        }
        self.session.clear();
    }

    pub async fn register_guest(&self, payload: &RegisterGuestPayload) -> Result<(), AppError> {
        self.auth_api.register_guest(payload).await
    }

    pub async fn register_partner(
        &self,
        payload: &RegisterPartnerPayload,
    ) -> Result<(), AppError> {
        self.auth_api.register_partner(payload).await
    }

    pub async fn register_employee(
        &self,
        payload: &RegisterEmployeePayload,
    ) -> Result<(), AppError> {
        self.auth_api.register_employee(payload).await
    }

    // Merge raso no perfil guardado; a cópia durável é reescrita.
    pub fn update_user_info(&self, patch: &UserInfoPatch) -> Result<User, AppError> {
        self.session.update_user_info(patch)
    }
}
