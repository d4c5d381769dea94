//! Trait de regulador de tensão

use crate::hal::HalError;

/// Tensão em microvolts
pub type MicroVolts = u32;

/// Regulador de um trilho de alimentação (ex: SW1, DCDC1)
pub trait Regulator: Send + Sync {
    /// Tensão atual
    fn get_voltage(&self) -> MicroVolts;

    /// Programa nova tensão. Pode dormir (I2C até o PMIC).
    fn set_voltage(&self, uv: MicroVolts) -> Result<(), HalError>;
}
