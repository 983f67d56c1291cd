/*!
 * dagscanner-workflow
 *
 * O fluxo de submissão de análises: valida a entrada, exige sessão de
 * carteira, consulta o backend de scoring, envia a escrita paga on-chain e
 * aguarda a confirmação, publicando o estado final com o erro classificado
 * ou o resultado e a referência da transação.
 */

mod workflow;

pub use workflow::{SubmissionWorkflow, WorkflowConfig, WorkflowState};
