//src/main.rs

use clap::{Parser, Subcommand};

use client::commands;
use client::config::AppState;

// O console do sistema de aluguel de quartos. Cada subcomando é uma das
// telas do fluxo: autenticação, reservas, contratos, configuração e
// gestão de perfis.
#[derive(Parser, Debug)]
#[command(name = "client", version, about = "Console do sistema de aluguel de quartos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Entra no sistema e guarda a sessão localmente
    Login(commands::auth::LoginArgs),
    /// Sai do sistema (a limpeza local acontece mesmo se o servidor falhar)
    Logout,
    /// Mostra o usuário autenticado
    Whoami,
    /// Atualiza o perfil guardado na sessão
    UpdateProfile(commands::auth::UpdateProfileArgs),
    /// Cria contas (hóspede, parceiro, funcionário)
    #[command(subcommand)]
    Register(commands::auth::RegisterCommand),
    /// Fluxo de reservas de visita
    #[command(subcommand)]
    Reservations(commands::reservations::ReservationsCommand),
    /// Fluxo de contratos de locação
    #[command(subcommand)]
    Contracts(commands::contracts::ContractsCommand),
    /// Configuração global do sistema
    #[command(subcommand)]
    Config(commands::admin::ConfigCommand),
    /// Gestão de perfis (inquilinos, parceiros, funcionários)
    #[command(subcommand)]
    Manage(commands::admin::ManageCommand),
}

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    let cli = Cli::parse();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(&app_state, args).await,
        Commands::Logout => commands::auth::logout(&app_state).await,
        Commands::Whoami => commands::auth::whoami(&app_state),
        Commands::UpdateProfile(args) => commands::auth::update_profile(&app_state, args),
        Commands::Register(command) => commands::auth::register(&app_state, command).await,
        Commands::Reservations(command) => {
            commands::reservations::run(&app_state, command).await
        }
        Commands::Contracts(command) => commands::contracts::run(&app_state, command).await,
        Commands::Config(command) => commands::admin::config(&app_state, command).await,
        Commands::Manage(command) => commands::admin::manage(&app_state, command).await,
    };

    // Os erros param aqui: mensagem no terminal e código de saída 1.
    // Nenhuma ação é repetida automaticamente.
    if let Err(e) = result {
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }
}
