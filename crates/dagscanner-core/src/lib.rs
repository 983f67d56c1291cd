/*!
 * DAGScanner Core
 *
 * Tipos e utilitários compartilhados para a workspace DAGScanner
 */

pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

// Re-exportações públicas
pub use error::Error;
pub use types::*;
