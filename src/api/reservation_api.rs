// src/api/reservation_api.rs

use uuid::Uuid;

use crate::{
    api::http::ApiHttp,
    common::error::AppError,
    models::{
        contract::{Contract, ContractPrefill},
        reservation::{CreateReservationPayload, Reservation, ReservationStatus},
    },
};

// Gateway das rotas de reserva. Filtro e busca são repassados como
// parâmetros: quem filtra é o servidor, nunca o cliente.
#[derive(Clone)]
pub struct ReservationApi {
    http: ApiHttp,
}

impl ReservationApi {
    pub fn new(http: ApiHttp) -> Self {
        Self { http }
    }

    // --- Listagens ---

    pub async fn list_by_status(
        &self,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, AppError> {
        self.http
            .get(&format!("/api/reservations/status/{}", status.as_str()))
            .await
    }

    pub async fn list_my_branch(&self) -> Result<Vec<Reservation>, AppError> {
        self.http.get("/api/reservations/my-branch").await
    }

    pub async fn search(&self, q: &str) -> Result<Vec<Reservation>, AppError> {
        self.http
            .get_with_query("/api/reservations/search", &[("q", q.to_string())])
            .await
    }

    pub async fn list_mine(&self) -> Result<Vec<Reservation>, AppError> {
        self.http.get("/api/reservations/my-reservations").await
    }

    // --- Criação e transições ---

    pub async fn create(&self, payload: &CreateReservationPayload) -> Result<Reservation, AppError> {
        self.http.post("/api/reservations", payload).await
    }

    pub async fn cancel(&self, id: Uuid) -> Result<(), AppError> {
        self.http
            .delete_unit(&format!("/api/reservations/{}", id))
            .await
    }

    pub async fn confirm(&self, id: Uuid) -> Result<(), AppError> {
        self.http
            .put_empty_unit(&format!("/api/reservations/{}/confirm", id))
            .await
    }

    pub async fn mark_completed(&self, id: Uuid) -> Result<(), AppError> {
        self.http
            .put_empty_unit(&format!("/api/reservations/{}/mark-completed", id))
            .await
    }

    pub async fn mark_no_show(&self, id: Uuid) -> Result<(), AppError> {
        self.http
            .put_empty_unit(&format!("/api/reservations/{}/mark-no-show", id))
            .await
    }

    pub async fn mark_contracted(&self, id: Uuid) -> Result<(), AppError> {
        self.http
            .put_empty_unit(&format!("/api/reservations/{}/mark-contracted", id))
            .await
    }

    // --- Ponte para o fluxo de contrato ---

    pub async fn contract_prefill(&self, id: Uuid) -> Result<ContractPrefill, AppError> {
        self.http
            .get(&format!("/api/reservations/{}/contract-prefill", id))
            .await
    }

    pub async fn convert_to_contract(&self, id: Uuid) -> Result<Contract, AppError> {
        self.http
            .post_empty(&format!("/api/reservations/{}/convert-to-contract", id))
            .await
    }
}
