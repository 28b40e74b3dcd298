// src/services/contract_service.rs

use std::path::Path;

use image::GenericImageView;
use validator::Validate;

use crate::{
    api::contract_api::ContractApi,
    common::error::AppError,
    models::contract::{
        ConfirmDepositPayload, Contract, ContractDraft, ContractDraftPatch, ContractPrefill,
        ContractStatus, DepositMethod, MomoPaymentResponse,
    },
};

// Um arquivo preparado para upload. Fica só em memória até a confirmação
// explícita (ou até ser trocado/limpo); nada sobe para o servidor aqui.
pub struct StagedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub preview: Option<ImagePreview>,
}

// Preview opcional: dimensões decodificadas quando os bytes são uma imagem.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
}

// O fluxo de criação/conclusão de contrato. Espelha o ciclo
// PENDING → SIGNED_PENDING_DEPOSIT → ACTIVE calculado no servidor e
// preserva o rascunho quando uma chamada falha, para reenvio.
pub struct ContractFlow {
    api: ContractApi,
    draft: ContractDraft,
    contract: Option<Contract>,
    staged: Option<StagedFile>,
    // Veio de uma reserva: quarto e filial são imutáveis até o fim do fluxo.
    room_locked: bool,
}

impl ContractFlow {
    // Rascunho em branco.
    pub fn new(api: ContractApi) -> Self {
        Self {
            api,
            draft: ContractDraft::default(),
            contract: None,
            staged: None,
            room_locked: false,
        }
    }

    // Rascunho a partir de uma reserva aprovada: os dados copiados entram
    // no formulário e o quarto fica travado.
    pub fn with_prefill(api: ContractApi, prefill: ContractPrefill) -> Self {
        let mut flow = Self::new(api);
        flow.draft.branch_code = prefill.branch_code;
        flow.draft.room_number = prefill.room_number;
        if let Some(name) = prefill.tenant_name {
            flow.draft.full_name = name;
        }
        if let Some(phone) = prefill.tenant_phone_number {
            flow.draft.phone_number = phone;
        }
        if let Some(email) = prefill.tenant_email {
            flow.draft.email = email;
        }
        flow.room_locked = true;
        flow
    }

    // Reabre um contrato existente (o rascunho parte dos campos atuais).
    pub async fn open(api: ContractApi, id: uuid::Uuid) -> Result<Self, AppError> {
        let contract = api.get(id).await?;
        Ok(Self {
            api,
            draft: ContractDraft::from(&contract),
            contract: Some(contract),
            staged: None,
            room_locked: false,
        })
    }

    // --- Leituras ---

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn status(&self) -> Option<ContractStatus> {
        self.contract.as_ref().map(|contract| contract.status)
    }

    pub fn draft(&self) -> &ContractDraft {
        &self.draft
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn room_locked(&self) -> bool {
        self.room_locked
    }

    // A tela só oferece edição antes da criação ou enquanto PENDING.
    pub fn can_edit(&self) -> bool {
        match self.status() {
            None => true,
            Some(status) => status.allows_editing(),
        }
    }

    pub fn can_upload(&self) -> bool {
        self.status().is_some_and(|status| status.allows_signed_upload())
    }

    pub fn can_confirm_deposit(&self) -> bool {
        self.status().is_some_and(|status| status.allows_deposit())
    }

    // --- Edição do rascunho ---

    pub fn apply(&mut self, patch: ContractDraftPatch) -> Result<(), AppError> {
        if !self.can_edit() {
            return Err(self.invalid_state("update"));
        }
        if self.room_locked && patch.touches_room() {
            return Err(AppError::RoomLocked);
        }

        let draft = &mut self.draft;
        if let Some(branch_code) = patch.branch_code {
            draft.branch_code = branch_code;
        }
        if let Some(room_number) = patch.room_number {
            draft.room_number = room_number;
        }
        if let Some(full_name) = patch.full_name {
            draft.full_name = full_name;
        }
        if let Some(phone_number) = patch.phone_number {
            draft.phone_number = phone_number;
        }
        if let Some(email) = patch.email {
            draft.email = email;
        }
        if let Some(address) = patch.address {
            draft.address = Some(address);
        }
        if let Some(cccd) = patch.cccd {
            draft.cccd = cccd;
        }
        if let Some(student_id) = patch.student_id {
            draft.student_id = Some(student_id);
        }
        if let Some(university) = patch.university {
            draft.university = Some(university);
        }
        if let Some(deposit) = patch.deposit {
            draft.deposit = deposit;
        }
        if let Some(start_date) = patch.start_date {
            draft.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            draft.end_date = Some(end_date);
        }
        Ok(())
    }

    // --- Criação e atualização ---

    pub async fn create(&mut self) -> Result<&Contract, AppError> {
        if self.contract.is_some() {
            return Err(self.invalid_state("create"));
        }
        // A única validação local do cliente: barra envios obviamente
        // incompletos SEM gastar uma ida ao servidor.
        self.draft.validate()?;
        let created = self.api.create(&self.draft).await?;
        self.contract = Some(created);
        self.require_contract()
    }

    pub async fn update(&mut self) -> Result<&Contract, AppError> {
        let id = match (&self.contract, self.can_edit()) {
            (Some(contract), true) => contract.id,
            _ => return Err(self.invalid_state("update")),
        };
        self.draft.validate()?;
        let updated = self.api.update(id, &self.draft).await?;
        self.contract = Some(updated);
        self.require_contract()
    }

    pub async fn refresh(&mut self) -> Result<&Contract, AppError> {
        let id = self.require_contract()?.id;
        let fresh = self.api.get(id).await?;
        self.draft = ContractDraft::from(&fresh);
        self.contract = Some(fresh);
        self.require_contract()
    }

    // --- Upload do contrato assinado (duas etapas) ---

    // Etapa 1: preparar. Lê o arquivo para a memória e tenta decodificar
    // um preview. Nenhuma chamada de rede acontece aqui; o usuário ainda
    // pode inspecionar, trocar ou desistir.
    pub fn stage_signed_file(&mut self, path: &Path) -> Result<(), AppError> {
        if !self.can_upload() {
            return Err(self.invalid_state("upload-signed"));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "contrato-assinado".to_string());
        let preview = image::load_from_memory(&bytes).ok().map(|decoded| {
            let (width, height) = decoded.dimensions();
            ImagePreview { width, height }
        });
        self.staged = Some(StagedFile {
            file_name,
            bytes,
            preview,
        });
        Ok(())
    }

    pub fn clear_staged(&mut self) {
        self.staged = None;
    }

    // Etapa 2: confirmar. Exatamente UM envio por confirmação. Se o
    // servidor falhar, o arquivo preparado continua lá para reenvio.
    pub async fn confirm_upload(&mut self) -> Result<&Contract, AppError> {
        if !self.can_upload() {
            return Err(self.invalid_state("upload-signed"));
        }
        let id = self.require_contract()?.id;
        let (file_name, bytes) = match &self.staged {
            Some(staged) => (staged.file_name.clone(), staged.bytes.clone()),
            None => return Err(AppError::NothingStaged),
        };
        let updated = self.api.upload_signed(id, &file_name, bytes).await?;
        // Sucesso: consome o arquivo preparado e espelha o novo status.
        self.staged = None;
        self.contract = Some(updated);
        self.require_contract()
    }

    // --- Caução ---

    pub async fn confirm_deposit(&mut self, method: DepositMethod) -> Result<&Contract, AppError> {
        if !self.can_confirm_deposit() {
            return Err(self.invalid_state("confirm-deposit"));
        }
        let id = self.require_contract()?.id;
        let updated = self
            .api
            .confirm_deposit(id, &ConfirmDepositPayload { method })
            .await?;
        self.contract = Some(updated);
        self.require_contract()
    }

    // Só devolve a URL externa de pagamento. NADA muda localmente:
    // a confirmação chega ao servidor de forma assíncrona e a ativação
    // só aparece numa busca posterior.
    pub async fn initiate_deposit_momo(&self) -> Result<MomoPaymentResponse, AppError> {
        if !self.can_confirm_deposit() {
            return Err(self.invalid_state("deposit-momo"));
        }
        let id = self.require_contract()?.id;
        self.api.initiate_deposit_momo(id).await
    }

    // --- Helpers ---

    fn require_contract(&self) -> Result<&Contract, AppError> {
        self.contract
            .as_ref()
            .ok_or_else(|| AppError::InvalidState {
                action: "operação de contrato",
                status: "(ainda não criado)".to_string(),
            })
    }

    fn invalid_state(&self, action: &'static str) -> AppError {
        AppError::InvalidState {
            action,
            status: self
                .status()
                .map(|status| status.as_str().to_string())
                .unwrap_or_else(|| "(ainda não criado)".to_string()),
        }
    }
}
