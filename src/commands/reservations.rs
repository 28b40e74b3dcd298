// src/commands/reservations.rs

use chrono::NaiveDate;
use clap::Subcommand;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reservation::{CreateReservationPayload, Reservation, ReservationStatus, VisitSlot},
    services::capabilities::{require, Capability},
    services::reservation_service::ReservationWorkflow,
};

#[derive(Subcommand, Debug)]
pub enum ReservationsCommand {
    /// Lista reservas (da filial, por status, por busca ou as minhas)
    List {
        #[arg(long, conflicts_with_all = ["search", "mine"])]
        status: Option<ReservationStatus>,
        #[arg(long, conflicts_with = "mine")]
        search: Option<String>,
        #[arg(long)]
        mine: bool,
    },
    /// Cria uma reserva de visita
    Create {
        #[arg(long)]
        room_id: Uuid,
        #[arg(long)]
        visit_date: NaiveDate,
        #[arg(long)]
        visit_slot: VisitSlot,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Confirma uma reserva pendente
    Approve { id: Uuid },
    /// Cancela uma reserva (irreversível; exige --yes)
    Cancel {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
    /// Marca a visita como concluída
    Complete { id: Uuid },
    /// Marca não comparecimento
    NoShow { id: Uuid },
    /// Converte a reserva em contrato
    Convert { id: Uuid },
}

pub async fn run(state: &AppState, command: ReservationsCommand) -> Result<(), AppError> {
    let role = state.session.role();

    match command {
        ReservationsCommand::List {
            status,
            search,
            mine,
        } => {
            let mut workflow = ReservationWorkflow::new(state.reservation_api.clone());
            // O servidor filtra; o cliente só repassa o critério.
            let items = if mine {
                require(role, Capability::ReservationsCreate)?;
                workflow.refresh_mine().await?
            } else if let Some(q) = search {
                require(role, Capability::ReservationsView)?;
                workflow.refresh_search(&q).await?
            } else if let Some(status) = status {
                require(role, Capability::ReservationsView)?;
                workflow.refresh_by_status(status).await?
            } else {
                require(role, Capability::ReservationsView)?;
                workflow.refresh_my_branch().await?
            };
            print_board(items);
        }

        ReservationsCommand::Create {
            room_id,
            visit_date,
            visit_slot,
            notes,
        } => {
            require(role, Capability::ReservationsCreate)?;
            let workflow = ReservationWorkflow::new(state.reservation_api.clone());
            let reservation = workflow
                .create(&CreateReservationPayload {
                    room_id,
                    visit_date,
                    visit_slot,
                    notes,
                })
                .await?;
            println!(
                "Reserva {} criada ({}).",
                reservation.reservation_code,
                reservation.status.as_str()
            );
        }

        ReservationsCommand::Approve { id } => {
            require(role, Capability::ReservationsTransition)?;
            let mut workflow = load_board(state).await?;
            workflow.approve(id).await?;
            println!("Reserva confirmada (RESERVED).");
        }

        ReservationsCommand::Cancel { id, yes } => {
            require(role, Capability::ReservationsTransition)?;
            let mut workflow = load_board(state).await?;
            workflow.cancel(id, yes).await?;
            println!("Reserva cancelada.");
        }

        ReservationsCommand::Complete { id } => {
            require(role, Capability::ReservationsTransition)?;
            let mut workflow = load_board(state).await?;
            workflow.mark_completed(id).await?;
            println!("Visita marcada como concluída.");
        }

        ReservationsCommand::NoShow { id } => {
            require(role, Capability::ReservationsTransition)?;
            let mut workflow = load_board(state).await?;
            workflow.mark_no_show(id).await?;
            println!("Reserva marcada como não comparecimento.");
        }

        ReservationsCommand::Convert { id } => {
            require(role, Capability::ReservationsTransition)?;
            require(role, Capability::ContractsManage)?;
            let mut workflow = load_board(state).await?;
            let contract = workflow.convert_to_contract(id).await?;
            println!(
                "Contrato {} criado ({}). Continue em `contracts update/upload-signed`.",
                contract.id,
                contract.status.as_str()
            );
        }
    }

    Ok(())
}

// As transições partem sempre da listagem da filial: o comando age sobre
// o que a tela mostraria.
async fn load_board(state: &AppState) -> Result<ReservationWorkflow, AppError> {
    let mut workflow = ReservationWorkflow::new(state.reservation_api.clone());
    workflow.refresh_my_branch().await?;
    Ok(workflow)
}

fn print_board(items: &[Reservation]) {
    if items.is_empty() {
        println!("Nenhuma reserva encontrada.");
        return;
    }
    for reservation in items {
        let actions: Vec<&str> = reservation
            .status
            .available_actions()
            .iter()
            .map(|action| action.as_str())
            .collect();
        println!(
            "{}  {}  quarto {}  {}  [{}]  ações: {}",
            reservation.id,
            reservation.reservation_code,
            reservation.room_code,
            reservation.tenant_name,
            reservation.status.as_str(),
            if actions.is_empty() {
                "-".to_string()
            } else {
                actions.join(", ")
            }
        );
    }
}
