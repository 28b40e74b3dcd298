// src/models/contract.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

// O ciclo de vida do contrato, autoritativo no servidor.
// Edição e upload do contrato assinado só em PENDING; caução só em
// SIGNED_PENDING_DEPOSIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Pending,
    SignedPendingDeposit,
    Active,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "PENDING",
            ContractStatus::SignedPendingDeposit => "SIGNED_PENDING_DEPOSIT",
            ContractStatus::Active => "ACTIVE",
        }
    }

    pub fn allows_editing(&self) -> bool {
        matches!(self, ContractStatus::Pending)
    }

    pub fn allows_signed_upload(&self) -> bool {
        matches!(self, ContractStatus::Pending)
    }

    pub fn allows_deposit(&self) -> bool {
        matches!(self, ContractStatus::SignedPendingDeposit)
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Como a caução foi recebida fora do MoMo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositMethod {
    Cash,
    BankTransfer,
}

impl FromStr for DepositMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CASH" => Ok(DepositMethod::Cash),
            "BANK_TRANSFER" | "BANK" => Ok(DepositMethod::BankTransfer),
            other => Err(format!("forma de pagamento desconhecida: {}", other)),
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub branch_code: String,
    pub room_number: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: Option<String>,
    pub cccd: String,
    pub student_id: Option<String>,
    pub university: Option<String>,
    pub deposit: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ContractStatus,
    pub signed_contract_url: Option<String>,
    pub deposit_invoice_url: Option<String>,
    pub deposit_receipt_url: Option<String>,
}

// O rascunho editável do contrato, também usado como corpo de criação e
// atualização. É a ÚNICA validação local de todo o cliente: serve só para
// barrar envios obviamente incompletos, não para impor regra de negócio.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    #[validate(length(min = 1, message = "a filial é obrigatória"))]
    pub branch_code: String,

    #[validate(length(min = 1, message = "o quarto é obrigatório"))]
    pub room_number: String,

    #[validate(length(min = 1, message = "o nome completo é obrigatório"))]
    pub full_name: String,

    #[validate(length(min = 1, message = "o telefone é obrigatório"))]
    pub phone_number: String,

    #[validate(
        length(min = 1, message = "o e-mail é obrigatório"),
        email(message = "o e-mail fornecido é inválido")
    )]
    pub email: String,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "o CCCD é obrigatório"))]
    pub cccd: String,

    pub student_id: Option<String>,
    pub university: Option<String>,

    pub deposit: Decimal,
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "a data de término é obrigatória"))]
    pub end_date: Option<NaiveDate>,
}

impl From<&Contract> for ContractDraft {
    // Reabre um contrato existente para edição (só faz sentido em PENDING).
    fn from(contract: &Contract) -> Self {
        ContractDraft {
            branch_code: contract.branch_code.clone(),
            room_number: contract.room_number.clone(),
            full_name: contract.full_name.clone(),
            phone_number: contract.phone_number.clone(),
            email: contract.email.clone(),
            address: contract.address.clone(),
            cccd: contract.cccd.clone(),
            student_id: contract.student_id.clone(),
            university: contract.university.clone(),
            deposit: contract.deposit,
            start_date: contract.start_date,
            end_date: contract.end_date,
        }
    }
}

// Alteração parcial do rascunho, vinda da linha de comando.
#[derive(Debug, Clone, Default)]
pub struct ContractDraftPatch {
    pub branch_code: Option<String>,
    pub room_number: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub cccd: Option<String>,
    pub student_id: Option<String>,
    pub university: Option<String>,
    pub deposit: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ContractDraftPatch {
    // Um patch "mexe no quarto" se tenta alterar filial ou número do quarto.
    pub fn touches_room(&self) -> bool {
        self.branch_code.is_some() || self.room_number.is_some()
    }
}

// Dados copiados de uma reserva aprovada para o rascunho de um contrato.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPrefill {
    pub branch_code: String,
    pub room_number: String,
    pub tenant_name: Option<String>,
    pub tenant_phone_number: Option<String>,
    pub tenant_email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDepositPayload {
    pub method: DepositMethod,
}

// Resposta da iniciação de pagamento MoMo: o cliente só abre a URL;
// a ativação do contrato chega ao servidor por fora, de forma assíncrona.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoPaymentResponse {
    pub pay_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ContractDraft {
        ContractDraft {
            branch_code: "B01".to_string(),
            room_number: "P101".to_string(),
            full_name: "Nguyen Van A".to_string(),
            phone_number: "0901234567".to_string(),
            email: "a@example.com".to_string(),
            cccd: "012345678901".to_string(),
            end_date: Some(NaiveDate::from_ymd_opt(2027, 1, 31).unwrap()),
            ..ContractDraft::default()
        }
    }

    #[test]
    fn complete_draft_passes_validation() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_listed() {
        let draft = ContractDraft::default();
        let errors = draft.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        for required in [
            "branch_code",
            "room_number",
            "full_name",
            "phone_number",
            "email",
            "cccd",
            "end_date",
        ] {
            assert!(
                fields.contains(&required),
                "campo {} ausente da lista de erros",
                required
            );
        }
    }

    #[test]
    fn editing_is_pending_only() {
        assert!(ContractStatus::Pending.allows_editing());
        assert!(!ContractStatus::SignedPendingDeposit.allows_editing());
        assert!(!ContractStatus::Active.allows_editing());
    }

    #[test]
    fn deposit_requires_signed_contract() {
        assert!(!ContractStatus::Pending.allows_deposit());
        assert!(ContractStatus::SignedPendingDeposit.allows_deposit());
        assert!(!ContractStatus::Active.allows_deposit());
    }
}
