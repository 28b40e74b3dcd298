// src/commands/contracts.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::contract::{Contract, ContractDraftPatch, DepositMethod},
    services::capabilities::{require, Capability},
    services::contract_service::ContractFlow,
};

#[derive(Subcommand, Debug)]
pub enum ContractsCommand {
    /// Mostra um contrato
    Show { id: Uuid },
    /// Cria um contrato (em branco ou a partir de uma reserva)
    Create {
        /// Copia quarto, filial e dados do inquilino de uma reserva aprovada
        #[arg(long)]
        reservation: Option<Uuid>,
        #[command(flatten)]
        fields: ContractFieldArgs,
    },
    /// Atualiza um contrato ainda PENDING
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: ContractFieldArgs,
    },
    /// Prepara o contrato assinado e confirma o envio (duas etapas)
    UploadSigned {
        id: Uuid,
        file: PathBuf,
        /// Pula a pergunta interativa e envia direto
        #[arg(long)]
        yes: bool,
    },
    /// Confirma a caução recebida fora do MoMo (CASH ou BANK_TRANSFER)
    ConfirmDeposit {
        id: Uuid,
        #[arg(long)]
        method: DepositMethod,
    },
    /// Inicia o pagamento da caução via MoMo
    DepositMomo { id: Uuid },
    /// Baixa o .docx gerado pelo servidor
    Download {
        id: Uuid,
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ContractFieldArgs {
    #[arg(long)]
    pub branch_code: Option<String>,
    #[arg(long)]
    pub room_number: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub cccd: Option<String>,
    #[arg(long)]
    pub student_id: Option<String>,
    #[arg(long)]
    pub university: Option<String>,
    #[arg(long)]
    pub deposit: Option<Decimal>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
}

impl ContractFieldArgs {
    fn into_patch(self) -> ContractDraftPatch {
        ContractDraftPatch {
            branch_code: self.branch_code,
            room_number: self.room_number,
            full_name: self.full_name,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            cccd: self.cccd,
            student_id: self.student_id,
            university: self.university,
            deposit: self.deposit,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

pub async fn run(state: &AppState, command: ContractsCommand) -> Result<(), AppError> {
    require(state.session.role(), Capability::ContractsManage)?;

    match command {
        ContractsCommand::Show { id } => {
            let flow = ContractFlow::open(state.contract_api.clone(), id).await?;
            if let Some(contract) = flow.contract() {
                print_contract(contract);
            }
        }

        ContractsCommand::Create {
            reservation,
            fields,
        } => {
            // A partir de uma reserva: o servidor manda o prefill e o
            // quarto/filial ficam travados pelo resto do fluxo.
            let mut flow = match reservation {
                Some(reservation_id) => {
                    let prefill = state
                        .reservation_api
                        .contract_prefill(reservation_id)
                        .await?;
                    ContractFlow::with_prefill(state.contract_api.clone(), prefill)
                }
                None => ContractFlow::new(state.contract_api.clone()),
            };
            flow.apply(fields.into_patch())?;
            let contract = flow.create().await?;
            println!("Contrato {} criado ({}).", contract.id, contract.status.as_str());

            // A reserva é marcada como contratada num passo separado;
            // o status dela não muda com a criação do contrato.
            if let Some(reservation_id) = reservation {
                state.reservation_api.mark_contracted(reservation_id).await?;
                println!("Reserva {} marcada como contratada.", reservation_id);
            }
        }

        ContractsCommand::Update { id, fields } => {
            let mut flow = ContractFlow::open(state.contract_api.clone(), id).await?;
            // A tela não oferece edição fora de PENDING.
            if !flow.can_edit() {
                return Err(AppError::InvalidState {
                    action: "update",
                    status: flow
                        .status()
                        .map(|status| status.as_str().to_string())
                        .unwrap_or_default(),
                });
            }
            flow.apply(fields.into_patch())?;
            let contract = flow.update().await?;
            println!("Contrato {} atualizado.", contract.id);
        }

        ContractsCommand::UploadSigned { id, file, yes } => {
            let mut flow = ContractFlow::open(state.contract_api.clone(), id).await?;

            // Etapa 1: preparar. Nada foi enviado ainda.
            flow.stage_signed_file(&file)?;
            if let Some(staged) = flow.staged() {
                match staged.preview {
                    Some(preview) => println!(
                        "Preparado: {} ({} bytes, imagem {}x{}).",
                        staged.file_name,
                        staged.bytes.len(),
                        preview.width,
                        preview.height
                    ),
                    None => println!(
                        "Preparado: {} ({} bytes).",
                        staged.file_name,
                        staged.bytes.len()
                    ),
                }
            }

            // Etapa 2: confirmação explícita. O envio muda o contrato de
            // estado e não tem volta.
            if !yes && !confirm_on_terminal("Enviar o contrato assinado agora? [s/N] ")? {
                println!("Envio cancelado; nada foi enviado ao servidor.");
                return Ok(());
            }
            let contract = flow.confirm_upload().await?;
            println!(
                "Contrato assinado enviado. Novo status: {}.",
                contract.status.as_str()
            );
        }

        ContractsCommand::ConfirmDeposit { id, method } => {
            let mut flow = ContractFlow::open(state.contract_api.clone(), id).await?;
            let contract = flow.confirm_deposit(method).await?;
            println!(
                "Caução confirmada. Novo status: {}.",
                contract.status.as_str()
            );
        }

        ContractsCommand::DepositMomo { id } => {
            let flow = ContractFlow::open(state.contract_api.clone(), id).await?;
            let momo = flow.initiate_deposit_momo().await?;

            // Melhor esforço: os dados do recebedor ajudam na conferência,
            // mas a falha aqui não interrompe o pagamento.
            match state.settings_api.get().await {
                Ok(config) => {
                    if let Some(name) = config.momo_receiver_name {
                        println!("Recebedor MoMo: {}", name);
                    }
                    if let Some(phone) = config.momo_receiver_phone {
                        println!("Telefone: {}", phone);
                    }
                }
                Err(e) => {
                    tracing::warn!("Falha ao buscar a configuração MoMo (ignorada): {}", e)
                }
            }

            println!("Abra a URL para pagar a caução:\n{}", momo.pay_url);
            println!(
                "A ativação do contrato chega ao servidor de forma assíncrona; \
                 consulte o contrato de novo mais tarde."
            );
        }

        ContractsCommand::Download { id, output } => {
            let bytes = state.contract_api.download(id).await?;
            std::fs::write(&output, &bytes)?;
            println!("Contrato salvo em {} ({} bytes).", output.display(), bytes.len());
        }
    }

    Ok(())
}

fn confirm_on_terminal(prompt: &str) -> Result<bool, AppError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
}

fn print_contract(contract: &Contract) {
    println!("Contrato : {}", contract.id);
    println!("Status   : {}", contract.status.as_str());
    println!("Filial   : {}", contract.branch_code);
    println!("Quarto   : {}", contract.room_number);
    println!("Inquilino: {} ({})", contract.full_name, contract.phone_number);
    println!("Caução   : {}", contract.deposit);
    if let Some(start) = contract.start_date {
        println!("Início   : {}", start);
    }
    if let Some(end) = contract.end_date {
        println!("Término  : {}", end);
    }
    if let Some(url) = &contract.signed_contract_url {
        println!("Assinado : {}", url);
    }
    if let Some(url) = &contract.deposit_invoice_url {
        println!("Fatura   : {}", url);
    }
    if let Some(url) = &contract.deposit_receipt_url {
        println!("Recibo   : {}", url);
    }
}
