/*!
 * dagscanner-chain
 *
 * Cliente do contrato de registro de análises: lê a taxa vigente, envia a
 * escrita paga e aguarda a confirmação. A cotação de taxa é presa à sessão
 * de carteira e relida após qualquer transição de sessão.
 */

mod client;
mod config;

pub use client::{AnalysisRegistry, ContractClient};
pub use config::ChainConfig;
