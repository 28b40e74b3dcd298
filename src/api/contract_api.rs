// src/api/contract_api.rs

use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::{
    api::http::ApiHttp,
    common::error::AppError,
    models::contract::{
        ConfirmDepositPayload, Contract, ContractDraft, MomoPaymentResponse,
    },
};

// Gateway das rotas de contrato. Inclui as duas chamadas fora do JSON:
// o download binário do .docx e o upload multipart do contrato assinado.
#[derive(Clone)]
pub struct ContractApi {
    http: ApiHttp,
}

impl ContractApi {
    pub fn new(http: ApiHttp) -> Self {
        Self { http }
    }

    pub async fn create(&self, draft: &ContractDraft) -> Result<Contract, AppError> {
        self.http.post("/api/contracts", draft).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Contract, AppError> {
        self.http.get(&format!("/api/contracts/{}", id)).await
    }

    pub async fn update(&self, id: Uuid, draft: &ContractDraft) -> Result<Contract, AppError> {
        self.http.put(&format!("/api/contracts/{}", id), draft).await
    }

    // O .docx gerado pelo servidor, em bytes crus.
    pub async fn download(&self, id: Uuid) -> Result<Vec<u8>, AppError> {
        self.http
            .get_bytes(&format!("/api/contracts/{}/download", id))
            .await
    }

    // Upload multipart do contrato assinado. Uma chamada por confirmação:
    // quem garante isso é o fluxo, aqui é só o envio.
    pub async fn upload_signed(
        &self,
        id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Contract, AppError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        self.http
            .post_multipart(&format!("/api/contracts/{}/upload-signed", id), form)
            .await
    }

    pub async fn confirm_deposit(
        &self,
        id: Uuid,
        payload: &ConfirmDepositPayload,
    ) -> Result<Contract, AppError> {
        self.http
            .put(&format!("/api/contracts/{}/confirm-deposit", id), payload)
            .await
    }

    pub async fn initiate_deposit_momo(&self, id: Uuid) -> Result<MomoPaymentResponse, AppError> {
        self.http
            .post_empty(&format!("/api/contracts/{}/deposit/momo", id))
            .await
    }
}
