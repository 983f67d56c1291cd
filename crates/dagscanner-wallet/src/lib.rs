/*!
 * dagscanner-wallet
 *
 * Gerenciamento da sessão de carteira: detecta uma sessão pré-existente,
 * solicita conexão quando pedido e acompanha os eventos de troca de conta
 * do provedor pelo tempo de vida do gerenciador.
 */

mod manager;

pub use manager::WalletSessionManager;
