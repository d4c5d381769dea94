//! # Configuração do Driver DVFS
//!
//! Constantes de temporização e seleção de chip.

use super::chip::ChipProfile;

// =============================================================================
// TEMPORIZAÇÃO
// =============================================================================

/// Espera após escrever a tensão (us)
pub const SETTLE_DELAY_US: u64 = 30;

/// Prazo para o CCM terminar de aplicar ARM_PODF (us)
pub const CCM_PODF_TIMEOUT_US: u64 = 1_000;

// =============================================================================
// GPC
// =============================================================================

/// Contador de passos de tensão programado em GPC_VCR.VCNT
pub const VCR_VOLTAGE_COUNTER: u32 = 100;

/// Maior valor de HTRI (rotação 0..=15)
pub const HTRI_MAX: u32 = 15;

// =============================================================================
// PLATAFORMA
// =============================================================================

/// Linha de IRQ do GPC/DVFS core no TZIC
pub const DVFS_CORE_IRQ: u32 = 30;

/// Chip padrão da build
#[cfg(feature = "soc_mx37")]
pub const DEFAULT_CHIP: &ChipProfile = &ChipProfile::MX37;

/// Chip padrão da build
#[cfg(not(feature = "soc_mx37"))]
pub const DEFAULT_CHIP: &ChipProfile = &ChipProfile::MX51;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::dvfs::regs::GPC_CNTR_HTRI;

    #[test]
    fn test_platform_constants() {
        // TZIC do i.MX51/37 tem 128 linhas
        assert!(DVFS_CORE_IRQ < 128);
        assert_eq!(GPC_CNTR_HTRI.get(GPC_CNTR_HTRI.prep(HTRI_MAX)), HTRI_MAX);
    }

    #[test]
    fn test_default_chip_follows_feature() {
        let expected = if cfg!(feature = "soc_mx37") { "mx37" } else { "mx51" };
        assert_eq!(DEFAULT_CHIP.name, expected);
    }
}
