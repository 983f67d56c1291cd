use thiserror::Error;

/// Erros comuns da workspace DAGScanner
///
/// Toda falha de colaborador é mapeada em exatamente uma destas variantes
/// antes de chegar ao usuário.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Endereço vazio ou apenas espaços
    #[error("informe um endereço de contrato")]
    EmptyInput,

    /// Nenhuma conta conectada para assinar a transação
    #[error("conecte sua carteira antes de analisar")]
    WalletNotConnected,

    /// Nenhum provedor de carteira disponível no ambiente
    #[error("nenhum provedor de carteira encontrado")]
    ProviderMissing,

    /// Assinatura recusada pelo usuário
    #[error("transação rejeitada pelo usuário")]
    UserRejected,

    /// Contrato inacessível no endereço/ABI esperados (rede errada inclusa)
    #[error("falha ao inicializar o contrato: {0}")]
    ContractInit(String),

    /// Resposta não-2xx do backend de scoring
    #[error("erro do backend ({status}): {message}")]
    BackendError { status: u16, message: String },

    /// Falha de transporte na comunicação com o backend
    #[error("erro de rede: {0}")]
    NetworkError(String),

    /// Falha ao enviar a transação (fundos, gás, RPC)
    #[error("falha ao enviar transação: {0}")]
    TransactionSubmission(String),

    /// Transação minerada mas revertida
    #[error("transação revertida: {0}")]
    TransactionFailed(String),

    /// Confirmação não chegou dentro do tempo limite
    #[error("tempo esgotado aguardando confirmação da transação")]
    ConfirmationTimeout,
}

/// Tipo de resultado usado em toda a workspace
pub type Result<T> = std::result::Result<T, Error>;
