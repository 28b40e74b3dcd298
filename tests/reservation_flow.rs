//! O quadro de reservas contra o backend de mentira: patch otimista,
//! bloqueio por status antes da rede, confirmação obrigatória no
//! cancelamento e repasse de filtro/busca para o servidor.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use client::api::http::ApiHttp;
use client::api::reservation_api::ReservationApi;
use client::common::error::AppError;
use client::models::contract::ContractStatus;
use client::models::reservation::ReservationStatus;
use client::services::reservation_service::ReservationWorkflow;

#[derive(Clone)]
struct StubState {
    reservation_id: Uuid,
    initial_status: &'static str,
    confirm_ok: bool,
    list_hits: Arc<AtomicUsize>,
    confirm_hits: Arc<AtomicUsize>,
    delete_hits: Arc<AtomicUsize>,
    completed_hits: Arc<AtomicUsize>,
    contracted_hits: Arc<AtomicUsize>,
    last_search: Arc<Mutex<Option<String>>>,
    last_status_filter: Arc<Mutex<Option<String>>>,
}

impl StubState {
    fn new(initial_status: &'static str) -> Self {
        Self {
            reservation_id: Uuid::new_v4(),
            initial_status,
            confirm_ok: true,
            list_hits: Arc::new(AtomicUsize::new(0)),
            confirm_hits: Arc::new(AtomicUsize::new(0)),
            delete_hits: Arc::new(AtomicUsize::new(0)),
            completed_hits: Arc::new(AtomicUsize::new(0)),
            contracted_hits: Arc::new(AtomicUsize::new(0)),
            last_search: Arc::new(Mutex::new(None)),
            last_status_filter: Arc::new(Mutex::new(None)),
        }
    }

    fn reservation_json(&self) -> Value {
        json!({
            "id": self.reservation_id,
            "reservationCode": "RSV-001",
            "roomCode": "P101",
            "roomId": Uuid::new_v4(),
            "tenantName": "Nguyen Van A",
            "tenantPhoneNumber": "0901234567",
            "tenantEmail": "a@example.com",
            "reservationDate": "2026-08-01T08:30:00Z",
            "visitDate": "2026-08-10",
            "visitSlot": "MORNING",
            "status": self.initial_status,
            "notes": null
        })
    }
}

async fn my_branch(State(st): State<StubState>) -> Json<Value> {
    st.list_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([st.reservation_json()]))
}

async fn search(
    State(st): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    *st.last_search.lock().unwrap() = params.get("q").cloned();
    Json(json!([st.reservation_json()]))
}

async fn by_status(State(st): State<StubState>, Path(status): Path<String>) -> Json<Value> {
    *st.last_status_filter.lock().unwrap() = Some(status);
    Json(json!([st.reservation_json()]))
}

async fn confirm(State(st): State<StubState>, Path(_id): Path<Uuid>) -> Response {
    st.confirm_hits.fetch_add(1, Ordering::SeqCst);
    if st.confirm_ok {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "Reserva já cancelada por outro funcionário"})),
        )
            .into_response()
    }
}

async fn cancel(State(st): State<StubState>, Path(_id): Path<Uuid>) -> StatusCode {
    st.delete_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn mark_completed(State(st): State<StubState>, Path(_id): Path<Uuid>) -> StatusCode {
    st.completed_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn mark_contracted(State(st): State<StubState>, Path(_id): Path<Uuid>) -> StatusCode {
    st.contracted_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn convert(State(st): State<StubState>, Path(_id): Path<Uuid>) -> Json<Value> {
    Json(json!({
        "id": Uuid::new_v4(),
        "branchCode": "B01",
        "roomNumber": "P101",
        "fullName": "Nguyen Van A",
        "phoneNumber": "0901234567",
        "email": "a@example.com",
        "address": null,
        "cccd": "012345678901",
        "studentId": null,
        "university": null,
        "deposit": 1500000.0,
        "startDate": null,
        "endDate": "2027-01-31",
        "status": "PENDING",
        "signedContractUrl": null,
        "depositInvoiceUrl": null,
        "depositReceiptUrl": null
    }))
}

fn stub_router(st: StubState) -> Router {
    Router::new()
        .route("/api/reservations/my-branch", get(my_branch))
        .route("/api/reservations/search", get(search))
        .route("/api/reservations/status/{status}", get(by_status))
        .route("/api/reservations/{id}/confirm", put(confirm))
        .route("/api/reservations/{id}", delete(cancel))
        .route("/api/reservations/{id}/mark-completed", put(mark_completed))
        .route("/api/reservations/{id}/mark-contracted", put(mark_contracted))
        .route("/api/reservations/{id}/convert-to-contract", post(convert))
        .with_state(st)
}

async fn workflow_for(st: &StubState) -> ReservationWorkflow {
    let base = common::spawn_stub(stub_router(st.clone())).await;
    ReservationWorkflow::new(ReservationApi::new(ApiHttp::new(base)))
}

// ---------------------------------------------------------------------------
// Aprovar aplica o patch otimista sem nova listagem
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approve_patches_the_local_status_to_reserved() {
    let st = StubState::new("PENDING_CONFIRMATION");
    let mut workflow = workflow_for(&st).await;

    workflow.refresh_my_branch().await.unwrap();
    workflow.approve(st.reservation_id).await.unwrap();

    assert_eq!(workflow.items()[0].status, ReservationStatus::Reserved);
    // Uma listagem só: o RESERVED veio do patch local, não de re-fetch.
    assert_eq!(st.list_hits.load(Ordering::SeqCst), 1);
    assert_eq!(st.confirm_hits.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Falha do servidor deixa a lista local intocada
// ---------------------------------------------------------------------------

#[tokio::test]
async fn a_failed_transition_leaves_the_list_unchanged() {
    let mut st = StubState::new("PENDING_CONFIRMATION");
    st.confirm_ok = false;
    let mut workflow = workflow_for(&st).await;

    workflow.refresh_my_branch().await.unwrap();
    let err = workflow.approve(st.reservation_id).await.unwrap_err();

    assert_eq!(
        err.user_message(),
        "Reserva já cancelada por outro funcionário"
    );
    assert_eq!(
        workflow.items()[0].status,
        ReservationStatus::PendingConfirmation
    );
}

// ---------------------------------------------------------------------------
// Bloqueio por status acontece antes de qualquer rede
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approve_on_a_reserved_reservation_is_rejected_locally() {
    let st = StubState::new("RESERVED");
    let mut workflow = workflow_for(&st).await;

    workflow.refresh_my_branch().await.unwrap();
    let err = workflow.approve(st.reservation_id).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidState { .. }));
    assert_eq!(st.confirm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn terminal_states_reject_every_transition_locally() {
    let st = StubState::new("COMPLETED");
    let mut workflow = workflow_for(&st).await;
    workflow.refresh_my_branch().await.unwrap();

    assert!(workflow.approve(st.reservation_id).await.is_err());
    assert!(workflow.cancel(st.reservation_id, true).await.is_err());
    assert!(workflow.mark_no_show(st.reservation_id).await.is_err());

    assert_eq!(st.confirm_hits.load(Ordering::SeqCst), 0);
    assert_eq!(st.delete_hits.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Cancelar exige confirmação explícita (irreversível, sem undo)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancel_without_confirmation_never_reaches_the_network() {
    let st = StubState::new("RESERVED");
    let mut workflow = workflow_for(&st).await;
    workflow.refresh_my_branch().await.unwrap();

    let err = workflow.cancel(st.reservation_id, false).await.unwrap_err();
    assert!(matches!(err, AppError::ConfirmationRequired));
    assert_eq!(st.delete_hits.load(Ordering::SeqCst), 0);

    // Com a confirmação, a chamada sai e o status local vira CANCELLED.
    workflow.cancel(st.reservation_id, true).await.unwrap();
    assert_eq!(st.delete_hits.load(Ordering::SeqCst), 1);
    assert_eq!(workflow.items()[0].status, ReservationStatus::Cancelled);
}

// ---------------------------------------------------------------------------
// O patch otimista também fecha as ações seguintes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completing_a_visit_closes_further_actions() {
    let st = StubState::new("RESERVED");
    let mut workflow = workflow_for(&st).await;
    workflow.refresh_my_branch().await.unwrap();

    workflow.mark_completed(st.reservation_id).await.unwrap();
    assert_eq!(workflow.items()[0].status, ReservationStatus::Completed);

    // Agora terminal: cancelar nem tenta a rede.
    let err = workflow.cancel(st.reservation_id, true).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState { .. }));
    assert_eq!(st.delete_hits.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Filtro e busca são repassados ao servidor, que é quem filtra
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_text_is_forwarded_verbatim() {
    let st = StubState::new("RESERVED");
    let mut workflow = workflow_for(&st).await;

    workflow.refresh_search("nguyen van a").await.unwrap();
    assert_eq!(
        st.last_search.lock().unwrap().as_deref(),
        Some("nguyen van a")
    );
}

#[tokio::test]
async fn status_filter_uses_the_wire_name() {
    let st = StubState::new("PENDING_CONFIRMATION");
    let mut workflow = workflow_for(&st).await;

    workflow
        .refresh_by_status(ReservationStatus::PendingConfirmation)
        .await
        .unwrap();
    assert_eq!(
        st.last_status_filter.lock().unwrap().as_deref(),
        Some("PENDING_CONFIRMATION")
    );
}

// ---------------------------------------------------------------------------
// Converter em contrato: o contrato nasce PENDING e a reserva é marcada
// como contratada em separado, sem mudar de status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn convert_creates_the_contract_and_marks_the_reservation() {
    let st = StubState::new("RESERVED");
    let mut workflow = workflow_for(&st).await;
    workflow.refresh_my_branch().await.unwrap();

    let contract = workflow
        .convert_to_contract(st.reservation_id)
        .await
        .unwrap();

    assert_eq!(contract.status, ContractStatus::Pending);
    assert_eq!(st.contracted_hits.load(Ordering::SeqCst), 1);
    // O status da reserva em si não muda na conversão.
    assert_eq!(workflow.items()[0].status, ReservationStatus::Reserved);
}
