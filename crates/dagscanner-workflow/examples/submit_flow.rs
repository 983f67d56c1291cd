use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dagscanner_core::error::Result;
use dagscanner_core::traits::{AnalysisContract, ScoringBackend, WalletProvider};
use dagscanner_core::types::{
    AnalysisResult, FeeQuote, SubmissionOutcome, TransactionHandle, WalletSession,
};
use dagscanner_wallet::WalletSessionManager;
use dagscanner_workflow::{SubmissionWorkflow, WorkflowConfig};
use ethereum_types::{Address, H256, U256};
use tokio::sync::broadcast;
use tracing::info;

/// Provedor de carteira em memória, já conectado
struct DemoWallet {
    events: broadcast::Sender<Vec<Address>>,
}

#[async_trait]
impl WalletProvider for DemoWallet {
    async fn current_account(&self) -> Option<Address> {
        Some(Address::from_low_u64_be(0xA11CE))
    }

    async fn request_connection(&self) -> Result<Address> {
        Ok(Address::from_low_u64_be(0xA11CE))
    }

    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>> {
        self.events.subscribe()
    }
}

/// Backend de scoring em memória
struct DemoScoring;

#[async_trait]
impl ScoringBackend for DemoScoring {
    async fn analyze(&self, address: &str) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            address: address.to_string(),
            score: 82,
            status: "Secure".to_string(),
        })
    }
}

/// Contrato em memória que confirma imediatamente
struct DemoContract;

#[async_trait]
impl AnalysisContract for DemoContract {
    async fn fee_quote(&self) -> Result<FeeQuote> {
        Ok(FeeQuote {
            amount_wei: U256::from(10_000_000_000_000_000u64),
            as_decimal: "0.01".to_string(),
        })
    }

    async fn submit_result(
        &self,
        _result: &AnalysisResult,
        _fee: &FeeQuote,
    ) -> Result<TransactionHandle> {
        Ok(TransactionHandle(H256::from_low_u64_be(0xdeadbeef)))
    }

    async fn await_confirmation(
        &self,
        handle: TransactionHandle,
        _timeout: Duration,
    ) -> Result<String> {
        Ok(handle.to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let target = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "0xABC...123".to_string());

    let (events, _) = broadcast::channel(8);
    let wallet = WalletSessionManager::new(Arc::new(DemoWallet { events })).await;
    let session: WalletSession = wallet.session();
    info!(conectada = session.is_connected(), "sessão detectada");

    let flow = SubmissionWorkflow::new(
        Arc::new(DemoContract),
        Arc::new(DemoScoring),
        wallet.watch(),
        WorkflowConfig::default(),
    );

    match flow.submit(&target).await {
        Some(SubmissionOutcome::Succeeded {
            result,
            tx_reference,
        }) => {
            info!(
                endereco = %result.address,
                score = result.score,
                status = %result.status,
                tx = %tx_reference,
                "análise registrada"
            );
        }
        Some(SubmissionOutcome::Failed { error, scored }) => {
            info!(erro = %error, pontuado = scored.is_some(), "submissão falhou");
        }
        other => info!(?other, "desfecho inesperado"),
    }
    Ok(())
}
