// src/api/http.rs

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};

use crate::common::error::AppError;

// Mensagem usada quando o corpo de erro do servidor não traz nada legível.
pub const GENERIC_SERVER_ERROR: &str = "Ocorreu um erro inesperado no servidor.";

// O token atual, compartilhado entre o ApiHttp e o SessionStore.
// Só o SessionStore escreve aqui; o ApiHttp apenas lê a cada requisição.
pub type TokenCell = Arc<RwLock<Option<String>>>;

// O transporte compartilhado por todos os gateways de recurso.
// Uma requisição por chamada: sem retry, sem cache, sem fila.
#[derive(Clone)]
pub struct ApiHttp {
    client: reqwest::Client,
    base_url: String,
    token: TokenCell,
}

impl ApiHttp {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    // A célula de token, para o SessionStore publicar login/logout.
    pub fn token_cell(&self) -> TokenCell {
        self.token.clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        // Clona o token para fora do lock antes de qualquer await.
        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // --- Verbos ---

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::parse(response).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::parse(response).await
    }

    // Para downloads binários (o .docx do contrato).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse(response).await
    }

    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.request(Method::POST, path).send().await?;
        Self::parse(response).await
    }

    pub async fn post_empty_unit(&self, path: &str) -> Result<(), AppError> {
        let response = self.request(Method::POST, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, AppError> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::parse(response).await
    }

    // Transições de status (PUT sem corpo): só interessa o sucesso.
    pub async fn put_empty_unit(&self, path: &str) -> Result<(), AppError> {
        let response = self.request(Method::PUT, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::parse(response).await
    }

    pub async fn patch_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .request(Method::PATCH, path)
            .query(query)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), AppError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // --- Helpers privados ---

    // Qualquer não-2xx vira AppError::ApiError com a mensagem do servidor.
    async fn ensure_success(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ApiError {
            status: status.as_u16(),
            message: extract_server_message(&body),
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

// Extrai a mensagem legível do corpo de erro do servidor.
// Os backends respondem `{"message": ...}` ou `{"error": ...}`; qualquer
// outra coisa vira a mensagem genérica.
pub fn extract_server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field() {
        assert_eq!(
            extract_server_message(r#"{"message": "Bad credentials"}"#),
            "Bad credentials"
        );
    }

    #[test]
    fn falls_back_to_error_field() {
        assert_eq!(
            extract_server_message(r#"{"error": "Sem permissão"}"#),
            "Sem permissão"
        );
    }

    #[test]
    fn unreadable_body_becomes_generic_message() {
        assert_eq!(extract_server_message("<html>500</html>"), GENERIC_SERVER_ERROR);
        assert_eq!(extract_server_message(""), GENERIC_SERVER_ERROR);
        assert_eq!(extract_server_message(r#"{"message": ""}"#), GENERIC_SERVER_ERROR);
    }
}
