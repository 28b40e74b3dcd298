use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// O cliente não devolve respostas HTTP: cada variante vira uma mensagem
// de terminal via `user_message()`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // O login foi rejeitado. Guardamos a mensagem que o servidor mandou,
    // pois é ela que deve aparecer para o usuário.
    #[error("Credenciais inválidas: {0}")]
    InvalidCredentials(String),

    // Qualquer resposta não-2xx fora do login. O payload de erro do servidor
    // já chega extraído aqui (campo `message`/`error` do JSON, se houver).
    #[error("Erro do servidor ({status}): {message}")]
    ApiError { status: u16, message: String },

    // A requisição em si falhou (rede, DNS, TLS...).
    #[error("Falha de rede")]
    NetworkError(#[from] reqwest::Error),

    // Nenhuma sessão ativa e o comando exige login.
    #[error("Não autenticado")]
    NotAuthenticated,

    // Bloqueio local de papel. Apenas UX: quem manda de verdade é o servidor.
    #[error("Permissão '{0}' necessária")]
    PermissionDenied(&'static str),

    // Ações irreversíveis (cancelar reserva) exigem confirmação explícita
    // antes de qualquer chamada de rede.
    #[error("Confirmação explícita necessária")]
    ConfirmationRequired,

    // A operação não é permitida no estado atual da entidade.
    #[error("Operação '{action}' não permitida no estado {status}")]
    InvalidState {
        action: &'static str,
        status: String,
    },

    // Quarto e filial vieram de uma reserva e não podem mudar no contrato.
    #[error("Quarto e filial são fixados pela reserva")]
    RoomLocked,

    // Confirmou o envio sem ter preparado nenhum arquivo antes.
    #[error("Nenhum arquivo preparado para envio")]
    NothingStaged,

    #[error("Reserva não encontrada na lista carregada")]
    ReservationNotFound,

    #[error("Erro de E/S: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro de serialização")]
    SerdeError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    // Traduz o erro para a mensagem exibida no terminal.
    // Faz o papel que o `IntoResponse` fazia no lado servidor.
    pub fn user_message(&self) -> String {
        match self {
            // Lista os campos inválidos, um por um.
            AppError::ValidationError(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, field_errors)| {
                        let messages: Vec<String> = field_errors
                            .iter()
                            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                            .collect();
                        if messages.is_empty() {
                            field.to_string()
                        } else {
                            format!("{}: {}", field, messages.join(", "))
                        }
                    })
                    .collect();
                fields.sort();
                format!("Um ou mais campos são inválidos: {}", fields.join("; "))
            }

            // A mensagem do servidor tem prioridade sobre qualquer texto nosso.
            AppError::InvalidCredentials(message) => message.clone(),
            AppError::ApiError { message, .. } => message.clone(),

            AppError::NetworkError(_) => {
                "Falha de comunicação com o servidor. Tente novamente.".to_string()
            }
            AppError::NotAuthenticated => {
                "Você precisa fazer login antes de usar este comando.".to_string()
            }
            AppError::PermissionDenied(capability) => format!(
                "Você precisa da permissão '{}' para realizar esta ação.",
                capability
            ),
            AppError::ConfirmationRequired => {
                "Esta ação é irreversível e exige confirmação explícita (use --yes).".to_string()
            }
            AppError::InvalidState { action, status } => format!(
                "A operação '{}' não é permitida enquanto o status for {}.",
                action, status
            ),
            AppError::RoomLocked => {
                "O quarto e a filial vêm da reserva e não podem ser alterados.".to_string()
            }
            AppError::NothingStaged => {
                "Prepare um arquivo antes de confirmar o envio.".to_string()
            }
            AppError::ReservationNotFound => {
                "Reserva não encontrada na lista carregada.".to_string()
            }

            // Todos os outros viram uma mensagem genérica.
            // O `tracing` registra o detalhe que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro inesperado no cliente: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }
}
