// src/commands/admin.rs

use clap::Subcommand;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::management::{EmployeeStatus, PartnerProfilePatch, TenantProfilePatch},
    models::settings::{SystemConfig, UpdateSystemConfigPayload},
    services::capabilities::{require, Capability},
};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Mostra a configuração global do sistema
    Show,
    /// Atualiza campos da configuração (last-write-wins no servidor)
    Set {
        #[arg(long)]
        electric_price: Option<Decimal>,
        #[arg(long)]
        water_price: Option<Decimal>,
        #[arg(long)]
        late_fee: Option<Decimal>,
        #[arg(long)]
        momo_name: Option<String>,
        #[arg(long)]
        momo_phone: Option<String>,
        #[arg(long)]
        momo_qr_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManageCommand {
    /// Mostra o perfil de um inquilino
    TenantShow { id: Uuid },
    /// Atualiza o perfil de um inquilino
    TenantUpdate {
        id: Uuid,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        university: Option<String>,
    },
    /// Mostra o perfil de um parceiro
    PartnerShow { id: Uuid },
    /// Atualiza o perfil de um parceiro
    PartnerUpdate {
        id: Uuid,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
    },
    /// Mostra o perfil de um funcionário
    EmployeeShow { id: Uuid },
    /// Ativa/desativa um funcionário
    EmployeeStatus {
        id: Uuid,
        #[arg(long)]
        status: EmployeeStatus,
    },
}

pub async fn config(state: &AppState, command: ConfigCommand) -> Result<(), AppError> {
    match command {
        ConfigCommand::Show => {
            require(state.session.role(), Capability::ConfigView)?;
            let config = state.settings_api.get().await?;
            print_config(&config);
        }
        ConfigCommand::Set {
            electric_price,
            water_price,
            late_fee,
            momo_name,
            momo_phone,
            momo_qr_url,
        } => {
            require(state.session.role(), Capability::ConfigEdit)?;
            let updated = state
                .settings_api
                .update(&UpdateSystemConfigPayload {
                    electric_price_per_unit: electric_price,
                    water_price_per_unit: water_price,
                    late_fee_per_day: late_fee,
                    momo_receiver_name: momo_name,
                    momo_receiver_phone: momo_phone,
                    momo_receiver_qr_url: momo_qr_url,
                })
                .await?;
            println!("Configuração atualizada.");
            print_config(&updated);
        }
    }
    Ok(())
}

pub async fn manage(state: &AppState, command: ManageCommand) -> Result<(), AppError> {
    require(state.session.role(), Capability::ProfilesManage)?;

    match command {
        ManageCommand::TenantShow { id } => {
            let profile = state.management_api.get_tenant(id).await?;
            println!("Inquilino: {} ({})", profile.full_name, profile.id);
            if let Some(email) = &profile.email {
                println!("E-mail   : {}", email);
            }
            if let Some(phone) = &profile.phone_number {
                println!("Telefone : {}", phone);
            }
            if let Some(university) = &profile.university {
                println!("Universidade: {}", university);
            }
        }

        ManageCommand::TenantUpdate {
            id,
            full_name,
            email,
            phone_number,
            address,
            student_id,
            university,
        } => {
            let profile = state
                .management_api
                .update_tenant(
                    id,
                    &TenantProfilePatch {
                        full_name,
                        email,
                        phone_number,
                        address,
                        student_id,
                        university,
                    },
                )
                .await?;
            println!("Inquilino '{}' atualizado.", profile.full_name);
        }

        ManageCommand::PartnerShow { id } => {
            let profile = state.management_api.get_partner(id).await?;
            println!("Parceiro: {} ({})", profile.full_name, profile.id);
            if let Some(company) = &profile.company_name {
                println!("Empresa : {}", company);
            }
            if let Some(email) = &profile.email {
                println!("E-mail  : {}", email);
            }
        }

        ManageCommand::PartnerUpdate {
            id,
            full_name,
            email,
            phone_number,
            address,
            company_name,
        } => {
            let profile = state
                .management_api
                .update_partner(
                    id,
                    &PartnerProfilePatch {
                        full_name,
                        email,
                        phone_number,
                        address,
                        company_name,
                    },
                )
                .await?;
            println!("Parceiro '{}' atualizado.", profile.full_name);
        }

        ManageCommand::EmployeeShow { id } => {
            let profile = state.management_api.get_employee(id).await?;
            println!(
                "Funcionário: {} ({}) [{}]",
                profile.full_name,
                profile.id,
                profile.status.as_str()
            );
            if let Some(branch) = &profile.branch_code {
                println!("Filial     : {}", branch);
            }
        }

        ManageCommand::EmployeeStatus { id, status } => {
            let profile = state
                .management_api
                .update_employee_status(id, status)
                .await?;
            println!(
                "Funcionário '{}' agora está {}.",
                profile.full_name,
                profile.status.as_str()
            );
        }
    }
    Ok(())
}

fn print_config(config: &SystemConfig) {
    println!("Energia (por kWh) : {}", config.electric_price_per_unit);
    println!("Água (por m³)     : {}", config.water_price_per_unit);
    println!("Multa por dia     : {}", config.late_fee_per_day);
    if let Some(name) = &config.momo_receiver_name {
        println!("Recebedor MoMo    : {}", name);
    }
    if let Some(phone) = &config.momo_receiver_phone {
        println!("Telefone MoMo     : {}", phone);
    }
    if let Some(url) = &config.momo_receiver_qr_url {
        println!("QR MoMo           : {}", url);
    }
}
