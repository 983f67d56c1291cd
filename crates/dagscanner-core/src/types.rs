/*!
 * DAGScanner Types
 *
 * Tipos comuns usados em toda a workspace DAGScanner
 */

use crate::error::{Error, Result};
use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sessão de carteira ativa
///
/// Snapshot imutável publicado pelo gerenciador de sessão; `epoch` é
/// incrementado a cada transição para que cotações de taxa presas à sessão
/// anterior possam ser descartadas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub account: Option<Address>,
    pub chain_binding_valid: bool,
    pub epoch: u64,
}

impl WalletSession {
    /// Indica se há uma conta capaz de assinar
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// Cotação da taxa de análise lida do contrato
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuote {
    pub amount_wei: U256,
    pub as_decimal: String,
}

/// Pedido de análise construído a partir da entrada do usuário
///
/// A validação de formato é delegada ao backend; localmente rejeitamos
/// apenas entrada vazia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub target_address: String,
}

impl AnalysisRequest {
    /// Valida a entrada do usuário, rejeitando strings vazias ou só espaços
    pub fn new(candidate: &str) -> Result<Self> {
        let target = candidate.trim();
        if target.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            target_address: target.to_string(),
        })
    }
}

/// Resultado de análise retornado pelo backend de scoring
///
/// Imutável após recebido: os campos são gravados on-chain exatamente como
/// vieram do backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub address: String,
    pub score: u8,
    pub status: String,
}

/// Classificação de exibição derivada do status textual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Secure,
    Warning,
    Risk,
}

impl StatusClass {
    /// Classifica um status textual do backend para fins de exibição
    pub fn from_status(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("secure") {
            StatusClass::Secure
        } else if lower.contains("warning") {
            StatusClass::Warning
        } else {
            StatusClass::Risk
        }
    }
}

/// Referência a uma transação enviada e ainda não confirmada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionHandle(pub H256);

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Desfecho de uma invocação do fluxo de submissão
///
/// Existe exatamente um por invocação; uma nova invocação substitui o
/// anterior por inteiro. `Failed` preserva o resultado de scoring quando a
/// etapa on-chain falhou depois do score obtido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Succeeded {
        result: AnalysisResult,
        tx_reference: String,
    },
    Failed {
        error: Error,
        scored: Option<AnalysisResult>,
    },
}

impl SubmissionOutcome {
    /// Indica se a invocação chegou a um estado terminal
    pub fn is_settled(&self) -> bool {
        !matches!(self, SubmissionOutcome::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_request_rejects_empty_input() {
        assert_eq!(AnalysisRequest::new(""), Err(Error::EmptyInput));
        assert_eq!(AnalysisRequest::new("   \t"), Err(Error::EmptyInput));
    }

    #[test]
    fn analysis_request_trims_input() {
        let req = AnalysisRequest::new("  0xabc  ").unwrap();
        assert_eq!(req.target_address, "0xabc");
    }

    #[test]
    fn status_class_buckets() {
        assert_eq!(StatusClass::from_status("Secure"), StatusClass::Secure);
        assert_eq!(StatusClass::from_status("secure contract"), StatusClass::Secure);
        assert_eq!(StatusClass::from_status("Warning: proxy"), StatusClass::Warning);
        assert_eq!(StatusClass::from_status("High Risk"), StatusClass::Risk);
    }
}
