use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dagscanner_core::error::Error;
use dagscanner_core::traits::{AnalysisContract, ScoringBackend};
use dagscanner_core::types::{AnalysisRequest, AnalysisResult, SubmissionOutcome, WalletSession};
use tokio::sync::watch;

/// Estados de uma invocação do fluxo de submissão
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validating,
    AwaitingScore,
    AwaitingWalletSignature,
    AwaitingConfirmation,
    Settled,
}

/// Configuração do fluxo de submissão
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Espera máxima pela confirmação on-chain de uma invocação
    pub confirmation_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(120),
        }
    }
}

/// Fluxo de submissão de análises
///
/// Dono exclusivo do `SubmissionOutcome` corrente e da flag de invocação em
/// andamento. Cada passo lê o snapshot de sessão mais recente no momento em
/// que precisa dele; o score é sempre obtido antes de qualquer escrita
/// on-chain, e a escrita é tentada no máximo uma vez por invocação.
pub struct SubmissionWorkflow<C: AnalysisContract, S: ScoringBackend> {
    contract: Arc<C>,
    scoring: Arc<S>,
    session: watch::Receiver<WalletSession>,
    config: WorkflowConfig,
    in_flight: AtomicBool,
    state_tx: watch::Sender<WorkflowState>,
    outcome_tx: watch::Sender<SubmissionOutcome>,
}

/// Libera a flag de invocação em qualquer saída, inclusive panic
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: AnalysisContract, S: ScoringBackend> SubmissionWorkflow<C, S> {
    pub fn new(
        contract: Arc<C>,
        scoring: Arc<S>,
        session: watch::Receiver<WalletSession>,
        config: WorkflowConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(WorkflowState::Idle);
        let (outcome_tx, _) = watch::channel(SubmissionOutcome::Pending);
        Self {
            contract,
            scoring,
            session,
            config,
            in_flight: AtomicBool::new(false),
            state_tx,
            outcome_tx,
        }
    }

    /// Estado corrente da invocação
    pub fn state(&self) -> WorkflowState {
        *self.state_tx.borrow()
    }

    /// Canal de observação do estado, para a camada de apresentação
    pub fn watch_state(&self) -> watch::Receiver<WorkflowState> {
        self.state_tx.subscribe()
    }

    /// Desfecho corrente
    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome_tx.borrow().clone()
    }

    /// Canal de observação do desfecho
    pub fn watch_outcome(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome_tx.subscribe()
    }

    /// Dispara uma invocação do fluxo para o endereço candidato
    ///
    /// Retorna `None` quando já existe uma invocação em andamento: o
    /// disparo é ignorado sem tocar nenhum colaborador. Um novo disparo
    /// após um estado terminal descarta o desfecho anterior por inteiro.
    pub async fn submit(&self, candidate: &str) -> Option<SubmissionOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("disparo ignorado: invocação em andamento");
            return None;
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.state_tx.send_replace(WorkflowState::Idle);
        self.outcome_tx.send_replace(SubmissionOutcome::Pending);

        let outcome = self.run(candidate).await;

        self.state_tx.send_replace(WorkflowState::Settled);
        self.outcome_tx.send_replace(outcome.clone());
        Some(outcome)
    }

    async fn run(&self, candidate: &str) -> SubmissionOutcome {
        self.state_tx.send_replace(WorkflowState::Validating);
        let request = match AnalysisRequest::new(candidate) {
            Ok(request) => request,
            Err(error) => return fail(error, None),
        };

        // Snapshot no momento do uso, nunca uma captura viva
        let session = self.session.borrow().clone();
        let Some(account) = session.account else {
            return fail(Error::WalletNotConnected, None);
        };
        tracing::info!(conta = %format!("{:#x}", account), alvo = %request.target_address, "iniciando submissão");

        self.state_tx.send_replace(WorkflowState::AwaitingScore);
        let result = match self.scoring.analyze(&request.target_address).await {
            Ok(result) => result,
            // Falha de scoring nunca chega à etapa on-chain
            Err(error) => return fail(error, None),
        };
        tracing::info!(score = result.score, status = %result.status, "score recebido");

        self.state_tx
            .send_replace(WorkflowState::AwaitingWalletSignature);
        let fee = match self.contract.fee_quote().await {
            Ok(fee) => fee,
            Err(error) => return fail(error, Some(result)),
        };

        // Campos do resultado passados adiante inalterados
        let handle = match self.contract.submit_result(&result, &fee).await {
            Ok(handle) => handle,
            Err(error) => return fail(error, Some(result)),
        };

        self.state_tx
            .send_replace(WorkflowState::AwaitingConfirmation);
        match self
            .contract
            .await_confirmation(handle, self.config.confirmation_timeout)
            .await
        {
            Ok(tx_reference) => {
                tracing::info!(tx = %tx_reference, "análise registrada on-chain");
                SubmissionOutcome::Succeeded {
                    result,
                    tx_reference,
                }
            }
            // Pontuado mas não registrado: o score obtido é preservado
            Err(error) => fail(error, Some(result)),
        }
    }
}

fn fail(error: Error, scored: Option<AnalysisResult>) -> SubmissionOutcome {
    tracing::warn!(erro = %error, "submissão encerrada com falha");
    SubmissionOutcome::Failed { error, scored }
}
