// src/config.rs

use std::{env, sync::Arc};

use crate::{
    api::{
        auth_api::AuthApi, contract_api::ContractApi, http::ApiHttp,
        management_api::ManagementApi, reservation_api::ReservationApi,
        settings_api::SettingsApi,
    },
    services::auth_service::AuthService,
    session::store::{FileSessionStorage, SessionStore},
};

// O estado compartilhado pelos comandos: os gateways de recurso,
// a sessão durável e o serviço de autenticação.
pub struct AppState {
    pub auth_api: AuthApi,
    pub reservation_api: ReservationApi,
    pub contract_api: ContractApi,
    pub management_api: ManagementApi,
    pub settings_api: SettingsApi,
    pub session: Arc<SessionStore>,
    pub auth_service: AuthService,
}

impl AppState {
    // Carrega as configurações e monta o AppState.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let session_file =
            env::var("SESSION_FILE").unwrap_or_else(|_| ".session.json".to_string());

        // --- Monta o gráfico de dependências ---
        let http = ApiHttp::new(base_url.clone());
        let session = Arc::new(SessionStore::new(
            Box::new(FileSessionStorage::new(&session_file)),
            http.token_cell(),
        )?);

        let auth_api = AuthApi::new(http.clone());
        let auth_service = AuthService::new(auth_api.clone(), session.clone());

        tracing::debug!("Cliente apontando para {}", base_url);

        Ok(Self {
            auth_api,
            reservation_api: ReservationApi::new(http.clone()),
            contract_api: ContractApi::new(http.clone()),
            management_api: ManagementApi::new(http.clone()),
            settings_api: SettingsApi::new(http),
            session,
            auth_service,
        })
    }
}
