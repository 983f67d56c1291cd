use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dagscanner_core::error::{Error, Result};
use dagscanner_core::traits::AnalysisContract;
use dagscanner_core::types::{AnalysisResult, FeeQuote, TransactionHandle, WalletSession};
use ethers::contract::abigen;
use ethers::providers::Middleware;
use ethers::types::U256;
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::ChainConfig;

abigen!(
    AnalysisRegistry,
    r#"[
        function analysisFee() view returns (uint256)
        function storeResultAndPay(string target, uint256 score, string status) payable
    ]"#
);

/// Cotação presa a uma época de sessão
struct FeeCache {
    inner: RwLock<Option<(u64, FeeQuote)>>,
}

impl FeeCache {
    fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn get(&self, epoch: u64) -> Option<FeeQuote> {
        self.inner
            .read()
            .as_ref()
            .filter(|(cached, _)| *cached == epoch)
            .map(|(_, quote)| quote.clone())
    }

    fn store(&self, epoch: u64, quote: FeeQuote) {
        *self.inner.write() = Some((epoch, quote));
    }
}

/// Cliente do contrato de registro de análises
///
/// Preso ao signer da sessão ativa. A cotação de taxa é lida uma vez na
/// inicialização e relida sempre que a época da sessão muda.
pub struct ContractClient<M: Middleware> {
    contract: AnalysisRegistry<M>,
    config: ChainConfig,
    session: watch::Receiver<WalletSession>,
    fee_cache: FeeCache,
}

impl<M: Middleware + 'static> ContractClient<M> {
    /// Vincula o contrato ao signer ativo e valida que ele responde no
    /// endereço configurado
    ///
    /// Contrato inacessível (rede errada inclusa) é `ContractInit`, nunca
    /// silenciado.
    pub async fn initialize(
        client: Arc<M>,
        config: ChainConfig,
        session: watch::Receiver<WalletSession>,
    ) -> Result<Self> {
        let snapshot = session.borrow().clone();
        if !snapshot.is_connected() {
            return Err(Error::WalletNotConnected);
        }

        let contract = AnalysisRegistry::new(config.contract_address, client);
        let this = Self {
            contract,
            config,
            session,
            fee_cache: FeeCache::new(),
        };

        let quote = this.read_fee().await?;
        tracing::info!(taxa = %quote.as_decimal, "contrato inicializado");
        this.fee_cache.store(snapshot.epoch, quote);
        Ok(this)
    }

    /// Link do explorador para uma referência confirmada
    pub fn explorer_url(&self, tx_reference: &str) -> Option<String> {
        self.config.explorer_url(tx_reference)
    }

    async fn read_fee(&self) -> Result<FeeQuote> {
        let amount_wei: U256 = self.contract.analysis_fee().call().await.map_err(|e| {
            Error::ContractInit(format!(
                "contrato não respondeu em {:#x}: {} (verifique se a rede ativa é a esperada)",
                self.config.contract_address, e
            ))
        })?;
        Ok(FeeQuote {
            amount_wei,
            as_decimal: format_fee(amount_wei),
        })
    }
}

#[async_trait]
impl<M: Middleware + 'static> AnalysisContract for ContractClient<M> {
    async fn fee_quote(&self) -> Result<FeeQuote> {
        let epoch = self.session.borrow().epoch;
        if let Some(quote) = self.fee_cache.get(epoch) {
            return Ok(quote);
        }
        // Sessão mudou desde a última leitura
        let quote = self.read_fee().await?;
        self.fee_cache.store(epoch, quote.clone());
        Ok(quote)
    }

    async fn submit_result(
        &self,
        result: &AnalysisResult,
        fee: &FeeQuote,
    ) -> Result<TransactionHandle> {
        let call = self
            .contract
            .store_result_and_pay(
                result.address.clone(),
                U256::from(result.score),
                result.status.clone(),
            )
            .value(fee.amount_wei);

        let pending = call
            .send()
            .await
            .map_err(|e| classify_submission_error(&e.to_string()))?;

        let handle = TransactionHandle(pending.tx_hash());
        tracing::info!(tx = %handle, "transação enviada");
        Ok(handle)
    }

    async fn await_confirmation(
        &self,
        handle: TransactionHandle,
        timeout: Duration,
    ) -> Result<String> {
        let client = self.contract.client();
        let deadline = Instant::now() + timeout;

        loop {
            let receipt = client
                .get_transaction_receipt(handle.0)
                .await
                .map_err(|e| Error::NetworkError(e.to_string()))?;

            if let Some(receipt) = receipt {
                if receipt.status.map(|s| s.as_u64()) == Some(0) {
                    return Err(Error::TransactionFailed(format!(
                        "transação {} revertida",
                        handle
                    )));
                }
                let reference = format!("{:#x}", receipt.transaction_hash);
                tracing::info!(tx = %reference, "transação confirmada");
                return Ok(reference);
            }

            if Instant::now() >= deadline {
                tracing::warn!(tx = %handle, "confirmação não chegou dentro do limite");
                return Err(Error::ConfirmationTimeout);
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

/// Classifica um erro de envio de transação
///
/// Recusa de assinatura é distinguida do restante; fundos insuficientes,
/// falha de estimativa de gás e erros de RPC caem todos em
/// `TransactionSubmission`.
fn classify_submission_error(message: &str) -> Error {
    let lower = message.to_lowercase();
    let rejected = lower.contains("rejected")
        || lower.contains("denied")
        || lower.contains("action_rejected")
        || lower.contains("code: 4001");
    if rejected {
        Error::UserRejected
    } else {
        Error::TransactionSubmission(message.to_string())
    }
}

/// Formata um valor em wei como string decimal em unidades da moeda nativa
fn format_fee(amount_wei: U256) -> String {
    let formatted = ethers::utils::format_ether(amount_wei);
    match formatted.trim_end_matches('0').trim_end_matches('.') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    #[test]
    fn fee_formatting_drops_trailing_zeros() {
        let wei = parse_ether("0.01").unwrap();
        assert_eq!(format_fee(wei), "0.01");
        assert_eq!(format_fee(U256::zero()), "0");
        assert_eq!(format_fee(parse_ether("1").unwrap()), "1");
    }

    #[test]
    fn signature_refusal_is_distinguished() {
        assert_eq!(
            classify_submission_error("user rejected transaction (code: 4001)"),
            Error::UserRejected
        );
        assert_eq!(
            classify_submission_error("MetaMask Tx Signature: User denied transaction signature"),
            Error::UserRejected
        );
    }

    #[test]
    fn other_send_failures_are_submission_errors() {
        let err = classify_submission_error("insufficient funds for gas * price + value");
        assert!(matches!(err, Error::TransactionSubmission(_)));
    }

    #[test]
    fn fee_cache_is_scoped_to_session_epoch() {
        let cache = FeeCache::new();
        let quote = FeeQuote {
            amount_wei: U256::from(10u64),
            as_decimal: "0.00000000000000001".to_string(),
        };
        cache.store(0, quote.clone());
        assert_eq!(cache.get(0), Some(quote));
        // Transição de sessão invalida a cotação
        assert_eq!(cache.get(1), None);
    }
}
