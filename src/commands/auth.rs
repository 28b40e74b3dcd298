// src/commands/auth.rs

use clap::{Args, Subcommand};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{
        RegisterEmployeePayload, RegisterGuestPayload, RegisterPartnerPayload, Role,
        UserInfoPatch,
    },
};

#[derive(Args, Debug)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct UpdateProfileArgs {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RegisterCommand {
    /// Conta de hóspede
    Guest {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone_number: Option<String>,
    },
    /// Conta de parceiro (dono de imóvel)
    Partner {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
    },
    /// Conta de funcionário (STAFF/ADMIN)
    Employee {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        branch_code: String,
        #[arg(long, default_value = "STAFF")]
        role: Role,
    },
}

pub async fn login(state: &AppState, args: LoginArgs) -> Result<(), AppError> {
    let session = state
        .auth_service
        .login(&args.username, &args.password)
        .await?;
    println!(
        "Bem-vindo, {} ({}).",
        session
            .user
            .full_name
            .as_deref()
            .unwrap_or(&session.user.username),
        session.user.role.as_str()
    );
    Ok(())
}

pub async fn logout(state: &AppState) -> Result<(), AppError> {
    state.auth_service.logout().await;
    println!("Sessão encerrada.");
    Ok(())
}

pub fn whoami(state: &AppState) -> Result<(), AppError> {
    let user = state.session.user().ok_or(AppError::NotAuthenticated)?;
    println!("Usuário : {}", user.username);
    println!("Papel   : {}", user.role.as_str());
    if let Some(full_name) = &user.full_name {
        println!("Nome    : {}", full_name);
    }
    if let Some(email) = &user.email {
        println!("E-mail  : {}", email);
    }
    if let Some(phone) = &user.phone_number {
        println!("Telefone: {}", phone);
    }
    if let Some(address) = &user.address {
        println!("Endereço: {}", address);
    }
    Ok(())
}

pub fn update_profile(state: &AppState, args: UpdateProfileArgs) -> Result<(), AppError> {
    let patch = UserInfoPatch {
        full_name: args.full_name,
        email: args.email,
        phone_number: args.phone_number,
        address: args.address,
    };
    let user = state.auth_service.update_user_info(&patch)?;
    println!("Perfil atualizado para '{}'.", user.username);
    Ok(())
}

pub async fn register(state: &AppState, command: RegisterCommand) -> Result<(), AppError> {
    match command {
        RegisterCommand::Guest {
            username,
            password,
            full_name,
            email,
            phone_number,
        } => {
            state
                .auth_service
                .register_guest(&RegisterGuestPayload {
                    username: username.clone(),
                    password,
                    full_name,
                    email,
                    phone_number,
                })
                .await?;
            println!("Conta de hóspede '{}' criada. Faça login para continuar.", username);
        }
        RegisterCommand::Partner {
            username,
            password,
            full_name,
            email,
            phone_number,
            company_name,
        } => {
            state
                .auth_service
                .register_partner(&RegisterPartnerPayload {
                    username: username.clone(),
                    password,
                    full_name,
                    email,
                    phone_number,
                    company_name,
                })
                .await?;
            println!("Conta de parceiro '{}' criada.", username);
        }
        RegisterCommand::Employee {
            username,
            password,
            full_name,
            email,
            phone_number,
            branch_code,
            role,
        } => {
            state
                .auth_service
                .register_employee(&RegisterEmployeePayload {
                    username: username.clone(),
                    password,
                    full_name,
                    email,
                    phone_number,
                    branch_code,
                    role,
                })
                .await?;
            println!("Conta de funcionário '{}' criada.", username);
        }
    }
    Ok(())
}
