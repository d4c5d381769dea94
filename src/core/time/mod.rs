//! Tempo: deadlines e esperas limitadas
//!
//! Toda espera do driver passa por aqui. Não existe spin sem limite: cada
//! espera tem um prazo e devolve `Err(Timeout)` quando ele estoura.

pub mod deadline;

pub use deadline::{poll_until, settle, Deadline, Timeout};
