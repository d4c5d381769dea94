//! Superfície de controle no formato de atributos de texto.
//!
//! | Atributo | Leitura                 | Escrita        |
//! |----------|-------------------------|----------------|
//! | enable   | -                       | "1" / "0"      |
//! | status   | "DVFS is enabled\n" ... | "reset"        |
//!
//! Espaços e quebra de linha em volta da entrada são ignorados.

use super::controller::{ControllerState, DvfsCore};
use super::error::{DvfsError, DvfsResult};

/// Escrita em `enable`
pub fn store_enable(core: &DvfsCore, input: &str) -> DvfsResult<()> {
    match input.trim() {
        "1" => core.enable(true),
        "0" => core.enable(false),
        _ => {
            crate::kwarn!("(DVFS) enable: entrada inválida");
            return Err(DvfsError::InvalidInput);
        }
    }
    Ok(())
}

/// Leitura de `status`
pub fn show_status(core: &DvfsCore) -> &'static str {
    match core.state() {
        ControllerState::Active => "DVFS is enabled\n",
        ControllerState::Stopped => "DVFS is disabled\n",
    }
}

/// Escrita em `status`: só aceita "reset" (zera os contadores)
pub fn store_status(core: &DvfsCore, input: &str) -> DvfsResult<()> {
    if input.trim() != "reset" {
        return Err(DvfsError::InvalidInput);
    }
    core.reset_counters();
    Ok(())
}
