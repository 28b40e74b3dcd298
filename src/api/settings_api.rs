// src/api/settings_api.rs

use crate::{
    api::http::ApiHttp,
    common::error::AppError,
    models::settings::{SystemConfig, UpdateSystemConfigPayload},
};

// Gateway da configuração global do sistema (registro único).
#[derive(Clone)]
pub struct SettingsApi {
    http: ApiHttp,
}

impl SettingsApi {
    pub fn new(http: ApiHttp) -> Self {
        Self { http }
    }

    pub async fn get(&self) -> Result<SystemConfig, AppError> {
        self.http.get("/api/system-config").await
    }

    pub async fn update(
        &self,
        payload: &UpdateSystemConfigPayload,
    ) -> Result<SystemConfig, AppError> {
        self.http.put("/api/system-config", payload).await
    }
}
