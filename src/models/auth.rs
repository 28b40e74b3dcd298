// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Os papéis que o backend conhece. O cliente só usa isso para o bloqueio
// de interface (tabela de capacidades); a autorização real é do servidor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Guest,
    Tenant,
    Partner,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Tenant => "TENANT",
            Role::Partner => "PARTNER",
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GUEST" => Ok(Role::Guest),
            "TENANT" => Ok(Role::Tenant),
            "PARTNER" => Ok(Role::Partner),
            "STAFF" => Ok(Role::Staff),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("papel desconhecido: {}", other)),
        }
    }
}

// O usuário autenticado, do jeito que o servidor o descreve.
// O `id` é opcional porque a resposta de login pode vir resumida
// (username + papel); o perfil completo chega nas rotas de gestão.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<Uuid>,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

impl User {
    // Merge raso: só os campos presentes no patch são sobrescritos.
    pub fn merge(&mut self, patch: &UserInfoPatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(phone_number) = &patch.phone_number {
            self.phone_number = Some(phone_number.clone());
        }
        if let Some(address) = &patch.address {
            self.address = Some(address.clone());
        }
    }
}

// A sessão durável: token e usuário vivem juntos num único registro,
// então nunca existe meio-login persistido.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
}

// Atualização parcial do perfil guardado na sessão.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

// Dados para login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

// Resposta de autenticação: o token vem num campo próprio e os dados do
// usuário achatados no mesmo objeto.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub user: User,
}

// --- Payloads de registro (um por tipo de conta) ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterGuestPayload {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPartnerPayload {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployeePayload {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub branch_code: String,
    pub role: Role,
}
