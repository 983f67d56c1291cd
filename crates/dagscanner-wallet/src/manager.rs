use std::sync::Arc;

use dagscanner_core::error::Result;
use dagscanner_core::traits::WalletProvider;
use dagscanner_core::types::WalletSession;
use dagscanner_core::utils::short_account;
use ethereum_types::Address;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Gerenciador da sessão de carteira
///
/// Dono exclusivo do `WalletSession` corrente. Publica um snapshot novo a
/// cada transição em um canal `watch`; consumidores leem o snapshot mais
/// recente no momento em que precisam dele, nunca uma captura viva.
pub struct WalletSessionManager<P: WalletProvider> {
    provider: Arc<P>,
    session_tx: Arc<watch::Sender<WalletSession>>,
    listener: JoinHandle<()>,
}

impl<P: WalletProvider + 'static> WalletSessionManager<P> {
    /// Cria o gerenciador, detectando qualquer sessão que o provedor já
    /// tenha (sem prompt) e inscrevendo-se nos eventos de troca de conta
    pub async fn new(provider: Arc<P>) -> Self {
        let account = provider.current_account().await;
        if let Some(acc) = account {
            tracing::info!(conta = %short_account(&acc), "sessão pré-existente detectada");
        }

        let initial = WalletSession {
            account,
            chain_binding_valid: account.is_some(),
            epoch: 0,
        };
        let (session_tx, _) = watch::channel(initial);
        let session_tx = Arc::new(session_tx);

        let events = provider.subscribe_accounts();
        let listener = tokio::spawn(Self::listen(events, session_tx.clone()));

        Self {
            provider,
            session_tx,
            listener,
        }
    }

    /// Solicita conexão ao provedor, com prompt ao usuário
    ///
    /// Em caso de sucesso a sessão é publicada imediatamente, sem esperar
    /// o evento do provedor.
    pub async fn connect(&self) -> Result<Address> {
        let account = self.provider.request_connection().await?;
        tracing::info!(conta = %short_account(&account), "carteira conectada");
        Self::publish(&self.session_tx, Some(account));
        Ok(account)
    }

    /// Snapshot mais recente da sessão
    pub fn session(&self) -> WalletSession {
        self.session_tx.borrow().clone()
    }

    /// Canal de observação para consumidores (fluxo de submissão, cliente
    /// de contrato)
    pub fn watch(&self) -> watch::Receiver<WalletSession> {
        self.session_tx.subscribe()
    }

    async fn listen(
        mut events: broadcast::Receiver<Vec<Address>>,
        session_tx: Arc<watch::Sender<WalletSession>>,
    ) {
        loop {
            match events.recv().await {
                Ok(accounts) => {
                    let account = accounts.first().copied();
                    if account.is_none() {
                        tracing::warn!("provedor reportou zero contas; sessão encerrada");
                    }
                    Self::publish(&session_tx, account);
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Apenas o estado mais recente importa
                    tracing::debug!(perdidos = missed, "eventos de conta perdidos");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    fn publish(session_tx: &watch::Sender<WalletSession>, account: Option<Address>) {
        session_tx.send_if_modified(|session| {
            if session.account == account {
                return false;
            }
            session.account = account;
            session.chain_binding_valid = account.is_some();
            session.epoch += 1;
            true
        });
    }
}

impl<P: WalletProvider> Drop for WalletSessionManager<P> {
    fn drop(&mut self) {
        // Inscrição com escopo: garante o cancelamento no teardown
        self.listener.abort();
    }
}
