//! Trait de clock
//!
//! Cada handle representa um único clock (ex: `cpu_clk`), então a
//! identificação do clock fica na construção do handle e não nas chamadas.

use crate::hal::HalError;

/// Frequência em Hz
pub type Hz = u32;

/// Provedor de clock
pub trait ClockProvider: Send + Sync {
    /// Frequência atual
    fn get_rate(&self) -> Hz;

    /// Programa nova frequência. Pode dormir.
    fn set_rate(&self, rate: Hz) -> Result<(), HalError>;
}
