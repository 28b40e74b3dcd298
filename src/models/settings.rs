// src/models/settings.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// A configuração global do sistema. Registro único, editável pelo admin;
// o cliente guarda uma cópia transitória só para exibir/editar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub electric_price_per_unit: Decimal,
    pub water_price_per_unit: Decimal,
    pub late_fee_per_day: Decimal,
    pub momo_receiver_name: Option<String>,
    pub momo_receiver_phone: Option<String>,
    pub momo_receiver_qr_url: Option<String>,
}

// Atualização parcial: só os campos presentes vão no corpo do PUT.
// O servidor aplica last-write-wins; o cliente não resolve conflito nenhum.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSystemConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electric_price_per_unit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_price_per_unit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_fee_per_day: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub momo_receiver_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub momo_receiver_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub momo_receiver_qr_url: Option<String>,
}
