use ethers::types::Address;
use std::time::Duration;

/// Configuração do cliente de contrato
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Endereço do contrato de registro na rede ativa
    pub contract_address: Address,
    /// Espera máxima pela confirmação de uma transação
    pub confirmation_timeout: Duration,
    /// Intervalo entre consultas de recibo
    pub poll_interval: Duration,
    /// Base do explorador de blocos para montar links de transação
    pub explorer_base: Option<String>,
}

impl ChainConfig {
    /// Configuração padrão para o contrato informado
    pub fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            confirmation_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_secs(2),
            explorer_base: None,
        }
    }

    /// Define a base do explorador de blocos
    pub fn with_explorer(mut self, base: impl Into<String>) -> Self {
        self.explorer_base = Some(base.into());
        self
    }

    /// Link do explorador para uma referência de transação confirmada
    pub fn explorer_url(&self, tx_reference: &str) -> Option<String> {
        self.explorer_base
            .as_ref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_url_handles_trailing_slash() {
        let config = ChainConfig::new(Address::zero()).with_explorer("https://scan.example/");
        assert_eq!(
            config.explorer_url("0xdeadbeef").unwrap(),
            "https://scan.example/tx/0xdeadbeef"
        );
    }

    #[test]
    fn explorer_url_absent_without_base() {
        let config = ChainConfig::new(Address::zero());
        assert!(config.explorer_url("0xdeadbeef").is_none());
    }
}
