/*!
 * dagscanner-scoring
 *
 * Cliente do backend de scoring: uma única troca requisição/resposta que
 * devolve um resultado tipado ou um erro classificado. Nunca repete a
 * chamada por conta própria.
 */

use std::time::Duration;

use async_trait::async_trait;
use dagscanner_core::error::{Error, Result};
use dagscanner_core::traits::ScoringBackend;
use dagscanner_core::types::AnalysisResult;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

/// Configuração do cliente de scoring
///
/// O endpoint é obrigatório: não existe URL padrão embutida. Sem
/// configuração o cliente falha fechado na construção.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl ScoringConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    address: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Cliente HTTP do backend de scoring
pub struct ScoringClient {
    endpoint: Url,
    http: Client,
}

impl ScoringClient {
    /// Cria o cliente, validando o endpoint configurado
    pub fn new(config: ScoringConfig) -> Result<Self> {
        let trimmed = config.endpoint.trim();
        if trimmed.is_empty() {
            return Err(Error::NetworkError(
                "endpoint do backend de scoring não configurado".to_string(),
            ));
        }
        let endpoint = Url::parse(trimmed)
            .map_err(|e| Error::NetworkError(format!("endpoint de scoring inválido: {}", e)))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl ScoringBackend for ScoringClient {
    async fn analyze(&self, address: &str) -> Result<AnalysisResult> {
        let target = address.trim();
        if target.is_empty() {
            return Err(Error::EmptyInput);
        }

        tracing::debug!(alvo = target, "consultando backend de scoring");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { address: target })
            .send()
            .await
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "erro do backend".to_string());
            tracing::warn!(status = status.as_u16(), mensagem = %message, "backend recusou a análise");
            return Err(Error::BackendError {
                status: status.as_u16(),
                message,
            });
        }

        let result: AnalysisResult = response
            .json()
            .await
            .map_err(|e| Error::NetworkError(format!("resposta inválida do backend: {}", e)))?;

        if result.score > 100 {
            return Err(Error::NetworkError(format!(
                "score fora do intervalo esperado: {}",
                result.score
            )));
        }
        Ok(result)
    }
}
