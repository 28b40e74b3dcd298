// src/api/auth_api.rs

use crate::{
    api::http::ApiHttp,
    common::error::AppError,
    models::auth::{
        LoginPayload, LoginResponse, RegisterEmployeePayload, RegisterGuestPayload,
        RegisterPartnerPayload,
    },
};

// Gateway das rotas de autenticação. Mapeamento fino método → verbo+rota;
// nenhuma regra de negócio aqui.
#[derive(Clone)]
pub struct AuthApi {
    http: ApiHttp,
}

impl AuthApi {
    pub fn new(http: ApiHttp) -> Self {
        Self { http }
    }

    // Um 401 aqui é "credenciais rejeitadas", não "sessão expirada":
    // vira a variante própria, carregando a mensagem do servidor.
    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse, AppError> {
        match self.http.post("/api/auth/login", payload).await {
            Err(AppError::ApiError {
                status: 401,
                message,
            }) => Err(AppError::InvalidCredentials(message)),
            other => other,
        }
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.http.post_empty_unit("/api/auth/logout").await
    }

    pub async fn register_guest(&self, payload: &RegisterGuestPayload) -> Result<(), AppError> {
        self.http.post_unit("/api/auth/register/guest", payload).await
    }

    pub async fn register_partner(
        &self,
        payload: &RegisterPartnerPayload,
    ) -> Result<(), AppError> {
        self.http
            .post_unit("/api/auth/register/partner", payload)
            .await
    }

    pub async fn register_employee(
        &self,
        payload: &RegisterEmployeePayload,
    ) -> Result<(), AppError> {
        self.http
            .post_unit("/api/auth/register/employee", payload)
            .await
    }
}
