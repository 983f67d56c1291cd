/*!
 * DAGScanner Utils
 *
 * Utilitários comuns usados em toda a workspace DAGScanner
 */

use ethereum_types::{Address, H256};
use std::str::FromStr;

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = hex.strip_prefix("0x").unwrap_or(hex);
    Address::from_str(hex_str).ok()
}

/// Formata um Address para exibição
pub fn format_address(address: &Address) -> String {
    format!("{:#x}", address)
}

/// Formata um H256 para exibição
pub fn format_h256(hash: &H256) -> String {
    format!("{:#x}", hash)
}

/// Forma curta de uma conta para cabeçalhos de UI (`0x1234…abcd`)
pub fn short_account(address: &Address) -> String {
    let full = format_address(address);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}
