// src/services/reservation_service.rs

use uuid::Uuid;

use crate::{
    api::reservation_api::ReservationApi,
    common::error::AppError,
    models::{
        contract::Contract,
        reservation::{CreateReservationPayload, Reservation, ReservationAction, ReservationStatus},
    },
};

// O quadro de reservas: a cópia local da listagem mais as transições que
// a tela oferece. O servidor decide tudo; aqui só refletimos o resultado.
pub struct ReservationWorkflow {
    api: ReservationApi,
    items: Vec<Reservation>,
}

impl ReservationWorkflow {
    pub fn new(api: ReservationApi) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Reservation] {
        &self.items
    }

    // --- Listagens (filtro e busca rodam no servidor) ---

    pub async fn refresh_by_status(
        &mut self,
        status: ReservationStatus,
    ) -> Result<&[Reservation], AppError> {
        self.items = self.api.list_by_status(status).await?;
        Ok(&self.items)
    }

    pub async fn refresh_my_branch(&mut self) -> Result<&[Reservation], AppError> {
        self.items = self.api.list_my_branch().await?;
        Ok(&self.items)
    }

    pub async fn refresh_search(&mut self, q: &str) -> Result<&[Reservation], AppError> {
        self.items = self.api.search(q).await?;
        Ok(&self.items)
    }

    pub async fn refresh_mine(&mut self) -> Result<&[Reservation], AppError> {
        self.items = self.api.list_mine().await?;
        Ok(&self.items)
    }

    pub async fn create(&self, payload: &CreateReservationPayload) -> Result<Reservation, AppError> {
        self.api.create(payload).await
    }

    // --- Transições ---

    // Confirma a reserva. Em caso de sucesso o status local vira RESERVED
    // na hora, sem esperar nova listagem.
    pub async fn approve(&mut self, id: Uuid) -> Result<(), AppError> {
        self.ensure_action(id, ReservationAction::Confirm)?;
        self.api.confirm(id).await?;
        self.patch_status(id, ReservationStatus::Reserved);
        Ok(())
    }

    // Cancelar é irreversível: sem `confirmed` não sai nenhuma requisição.
    pub async fn cancel(&mut self, id: Uuid, confirmed: bool) -> Result<(), AppError> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired);
        }
        self.ensure_action(id, ReservationAction::Cancel)?;
        self.api.cancel(id).await?;
        self.patch_status(id, ReservationStatus::Cancelled);
        Ok(())
    }

    pub async fn mark_completed(&mut self, id: Uuid) -> Result<(), AppError> {
        self.ensure_action(id, ReservationAction::MarkCompleted)?;
        self.api.mark_completed(id).await?;
        self.patch_status(id, ReservationStatus::Completed);
        Ok(())
    }

    pub async fn mark_no_show(&mut self, id: Uuid) -> Result<(), AppError> {
        self.ensure_action(id, ReservationAction::MarkNoShow)?;
        self.api.mark_no_show(id).await?;
        self.patch_status(id, ReservationStatus::NoShow);
        Ok(())
    }

    // Converte em contrato: o servidor cria o contrato PENDING e em
    // seguida a reserva é marcada como contratada. O status da reserva
    // em si não muda aqui.
    pub async fn convert_to_contract(&mut self, id: Uuid) -> Result<Contract, AppError> {
        self.ensure_action(id, ReservationAction::ConvertToContract)?;
        let contract = self.api.convert_to_contract(id).await?;
        self.api.mark_contracted(id).await?;
        Ok(contract)
    }

    // --- Helpers ---

    fn find(&self, id: Uuid) -> Result<&Reservation, AppError> {
        self.items
            .iter()
            .find(|reservation| reservation.id == id)
            .ok_or(AppError::ReservationNotFound)
    }

    // Bloqueio local por status, antes de qualquer rede. De novo: UX.
    // Se dois funcionários correrem, o servidor é o árbitro.
    fn ensure_action(&self, id: Uuid, action: ReservationAction) -> Result<(), AppError> {
        let reservation = self.find(id)?;
        if !reservation.status.available_actions().contains(&action) {
            return Err(AppError::InvalidState {
                action: action.as_str(),
                status: reservation.status.as_str().to_string(),
            });
        }
        Ok(())
    }

    // O patch otimista aplicado DEPOIS do sucesso do servidor.
    // Corrida conhecida: outra pessoa pode ter transicionado a mesma
    // reserva no meio tempo; a próxima listagem é quem vale.
    fn patch_status(&mut self, id: Uuid, status: ReservationStatus) {
        if let Some(reservation) = self.items.iter_mut().find(|r| r.id == id) {
            reservation.status = status;
        }
    }
}
