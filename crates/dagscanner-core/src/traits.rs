/*!
 * DAGScanner Traits
 *
 * Interfaces de capacidade entre o fluxo de submissão e seus colaboradores.
 * Cada colaborador externo é consumido através de uma destas traits para
 * permitir substituição por dublês em teste.
 */

use crate::error::Result;
use crate::types::{AnalysisResult, FeeQuote, TransactionHandle};
use async_trait::async_trait;
use ethereum_types::Address;
use std::time::Duration;
use tokio::sync::broadcast;

/// Superfície consumida do provedor de carteira
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Lê a conta que o provedor já tem conectada, sem prompt ao usuário
    ///
    /// Ausência de provedor não é erro: retorna `None`.
    async fn current_account(&self) -> Option<Address>;

    /// Solicita acesso ao provedor, com prompt ao usuário
    ///
    /// Falha com `ProviderMissing` ou `UserRejected`.
    async fn request_connection(&self) -> Result<Address>;

    /// Inscreve-se nas notificações de troca de contas do provedor
    ///
    /// Cada evento carrega a lista de contas conectadas; lista vazia
    /// significa desconexão.
    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>>;
}

/// Superfície consumida do contrato de análise on-chain
#[async_trait]
pub trait AnalysisContract: Send + Sync {
    /// Cotação vigente da taxa de análise
    ///
    /// Presa à sessão ativa: após uma transição de sessão a cotação é
    /// relida do contrato.
    async fn fee_quote(&self) -> Result<FeeQuote>;

    /// Envia a escrita paga com os campos do resultado inalterados
    ///
    /// Falha com `UserRejected` (assinatura recusada) ou
    /// `TransactionSubmission` para qualquer outro erro de envio.
    async fn submit_result(
        &self,
        result: &AnalysisResult,
        fee: &FeeQuote,
    ) -> Result<TransactionHandle>;

    /// Aguarda a mineração da transação dentro do tempo limite dado
    ///
    /// Retorna a referência final da transação; falha com
    /// `TransactionFailed` em caso de revert ou `ConfirmationTimeout`.
    async fn await_confirmation(
        &self,
        handle: TransactionHandle,
        timeout: Duration,
    ) -> Result<String>;
}

/// Superfície consumida do backend de scoring
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Uma única troca requisição/resposta com o backend
    ///
    /// Nunca repete a chamada automaticamente; retry é decisão do chamador.
    async fn analyze(&self, address: &str) -> Result<AnalysisResult>;
}
