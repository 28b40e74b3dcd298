// src/models/reservation.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// --- Enums ---

// O ciclo de vida da reserva é calculado no servidor; aqui só espelhamos.
// Estados terminais não oferecem mais nenhuma ação ao usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    PendingConfirmation,
    Reserved,
    Completed,
    NoShow,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::PendingConfirmation => "PENDING_CONFIRMATION",
            ReservationStatus::Reserved => "RESERVED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::NoShow => "NO_SHOW",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed
                | ReservationStatus::NoShow
                | ReservationStatus::Cancelled
        )
    }

    // As transições que o status atual oferece. A lista é por status;
    // o papel do usuário é filtrado em outro lugar (tabela de capacidades).
    pub fn available_actions(&self) -> &'static [ReservationAction] {
        match self {
            ReservationStatus::PendingConfirmation => {
                &[ReservationAction::Confirm, ReservationAction::Cancel]
            }
            ReservationStatus::Reserved => &[
                ReservationAction::ConvertToContract,
                ReservationAction::MarkCompleted,
                ReservationAction::MarkNoShow,
                ReservationAction::Cancel,
            ],
            // Estados terminais: nenhuma ação de mutação.
            ReservationStatus::Completed
            | ReservationStatus::NoShow
            | ReservationStatus::Cancelled => &[],
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING_CONFIRMATION" => Ok(ReservationStatus::PendingConfirmation),
            "RESERVED" => Ok(ReservationStatus::Reserved),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            "NO_SHOW" => Ok(ReservationStatus::NoShow),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("status de reserva desconhecido: {}", other)),
        }
    }
}

// As ações que a tela de reservas pode disparar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    Confirm,
    Cancel,
    ConvertToContract,
    MarkCompleted,
    MarkNoShow,
}

impl ReservationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationAction::Confirm => "confirm",
            ReservationAction::Cancel => "cancel",
            ReservationAction::ConvertToContract => "convert-to-contract",
            ReservationAction::MarkCompleted => "mark-completed",
            ReservationAction::MarkNoShow => "mark-no-show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitSlot {
    Morning,
    Afternoon,
}

impl FromStr for VisitSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MORNING" => Ok(VisitSlot::Morning),
            "AFTERNOON" => Ok(VisitSlot::Afternoon),
            other => Err(format!("turno de visita desconhecido: {}", other)),
        }
    }
}

// --- Structs ---

// Uma reserva do jeito que o servidor devolve. O cliente guarda uma cópia
// transitória por listagem, atualizada por uma nova busca.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub reservation_code: String,
    pub room_code: String,
    pub room_id: Uuid,
    pub tenant_name: String,
    pub tenant_phone_number: Option<String>,
    pub tenant_email: Option<String>,
    pub reservation_date: Option<DateTime<Utc>>,
    pub visit_date: Option<NaiveDate>,
    pub visit_slot: Option<VisitSlot>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

// Dados para criar uma reserva (hóspede/inquilino).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationPayload {
    pub room_id: Uuid,
    pub visit_date: NaiveDate,
    pub visit_slot: VisitSlot,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirmation_offers_confirm_and_cancel() {
        let actions = ReservationStatus::PendingConfirmation.available_actions();
        assert_eq!(
            actions,
            &[ReservationAction::Confirm, ReservationAction::Cancel]
        );
    }

    #[test]
    fn reserved_does_not_offer_confirm() {
        let actions = ReservationStatus::Reserved.available_actions();
        assert!(!actions.contains(&ReservationAction::Confirm));
        assert_eq!(
            actions,
            &[
                ReservationAction::ConvertToContract,
                ReservationAction::MarkCompleted,
                ReservationAction::MarkNoShow,
                ReservationAction::Cancel,
            ]
        );
    }

    #[test]
    fn terminal_states_offer_nothing() {
        for status in [
            ReservationStatus::Completed,
            ReservationStatus::NoShow,
            ReservationStatus::Cancelled,
        ] {
            assert!(status.is_terminal());
            assert!(status.available_actions().is_empty());
        }
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        let status: ReservationStatus = serde_json::from_str("\"PENDING_CONFIRMATION\"").unwrap();
        assert_eq!(status, ReservationStatus::PendingConfirmation);
        assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
    }
}
