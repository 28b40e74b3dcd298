// src/api/management_api.rs

use uuid::Uuid;

use crate::{
    api::http::ApiHttp,
    common::error::AppError,
    models::management::{
        EmployeeProfile, EmployeeStatus, PartnerProfile, PartnerProfilePatch, TenantProfile,
        TenantProfilePatch,
    },
};

// Gateway das rotas de gestão de perfis (inquilinos, parceiros, funcionários).
#[derive(Clone)]
pub struct ManagementApi {
    http: ApiHttp,
}

impl ManagementApi {
    pub fn new(http: ApiHttp) -> Self {
        Self { http }
    }

    pub async fn get_tenant(&self, id: Uuid) -> Result<TenantProfile, AppError> {
        self.http
            .get(&format!("/api/management/tenants/{}", id))
            .await
    }

    pub async fn update_tenant(
        &self,
        id: Uuid,
        patch: &TenantProfilePatch,
    ) -> Result<TenantProfile, AppError> {
        self.http
            .patch(&format!("/api/management/tenants/{}", id), patch)
            .await
    }

    pub async fn get_partner(&self, id: Uuid) -> Result<PartnerProfile, AppError> {
        self.http
            .get(&format!("/api/management/partners/{}", id))
            .await
    }

    pub async fn update_partner(
        &self,
        id: Uuid,
        patch: &PartnerProfilePatch,
    ) -> Result<PartnerProfile, AppError> {
        self.http
            .patch(&format!("/api/management/partners/{}", id), patch)
            .await
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<EmployeeProfile, AppError> {
        self.http
            .get(&format!("/api/management/employees/{}", id))
            .await
    }

    // O status vai como query param, não como corpo.
    pub async fn update_employee_status(
        &self,
        id: Uuid,
        status: EmployeeStatus,
    ) -> Result<EmployeeProfile, AppError> {
        self.http
            .patch_with_query(
                &format!("/api/management/employees/{}/status", id),
                &[("status", status.as_str().to_string())],
            )
            .await
    }
}
