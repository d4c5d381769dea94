//! Arquivo: drivers/dvfs/threshold.rs
//!
//! Propósito: Configurador de thresholds e contadores do monitor de carga.
//!
//! O hardware só pede mudança de frequência quando a carga fica acima (ou
//! abaixo) do threshold por `up_count` (ou `down_count`) amostras seguidas.
//! Existem dois perfis por chip: um para o regime "em baixo" (após start e na
//! frequência mínima) e outro para o regime "em cima" (frequência máxima).
//!
//! Hazard conhecido: reprogramar os thresholds enquanto o monitor acabou de
//! travar um pedido pode sobrescrevê-lo. Chamar com FSVAIM setado ou com o
//! monitor desligado.

use super::regs::{
    COUN_DNCNT, COUN_UPCNT, DVFSCOUN, DVFSEMAC, DVFSTHRS, EMAC_EMAC, THRS_DNTHR, THRS_PNCTHR,
    THRS_UPTHR,
};
use crate::hal::traits::RegisterBlock;

/// Parâmetros de debounce do monitor de carga
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdProfile {
    pub up_threshold: u32,
    pub down_threshold: u32,
    pub panic_threshold: u32,
    pub up_count: u32,
    pub down_count: u32,
    /// Seleção do divisor de clock do monitor (campo DIV3CK)
    pub div3_clock_select: u32,
    /// Fonte do load tracking buffer (campo LTBRSR)
    pub load_tracking_buffer_source: u32,
    /// Amostras da média móvel exponencial (DVFSEMAC)
    pub ema_samples: u32,
}

/// Qual perfil está ativo no hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    SteppedDown,
    SteppedUp,
}

/// Grava o perfil: DVFSTHRS, depois DVFSCOUN, depois DVFSEMAC.
///
/// Valores maiores que o campo são truncados pela máscara.
pub fn apply_profile(regs: &dyn RegisterBlock, profile: &ThresholdProfile) {
    let thrs = THRS_UPTHR.prep(profile.up_threshold)
        | THRS_DNTHR.prep(profile.down_threshold)
        | THRS_PNCTHR.prep(profile.panic_threshold);
    regs.write(DVFSTHRS, thrs);

    let coun = COUN_DNCNT.prep(profile.down_count) | COUN_UPCNT.prep(profile.up_count);
    regs.write(DVFSCOUN, coun);

    regs.write(DVFSEMAC, EMAC_EMAC.prep(profile.ema_samples));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::dvfs::fake::{Block, Event, FakeBoard};

    const PROFILE: ThresholdProfile = ThresholdProfile {
        up_threshold: 25,
        down_threshold: 9,
        panic_threshold: 63,
        up_count: 3,
        down_count: 3,
        div3_clock_select: 2,
        load_tracking_buffer_source: 2,
        ema_samples: 0x10,
    };

    #[test]
    fn test_apply_profile_order_and_values() {
        let board = FakeBoard::new();
        let regs = board.registers(Block::Dvfs);

        apply_profile(&regs, &PROFILE);

        let writes = board.events();
        assert_eq!(
            writes,
            vec![
                Event::RegWrite { block: Block::Dvfs, offset: DVFSTHRS, value: (25 << 22) | (9 << 16) | 63 },
                Event::RegWrite { block: Block::Dvfs, offset: DVFSCOUN, value: (3 << 16) | 3 },
                Event::RegWrite { block: Block::Dvfs, offset: DVFSEMAC, value: 0x10 },
            ]
        );
    }

    #[test]
    fn test_apply_profile_masks_fields() {
        let board = FakeBoard::new();
        let regs = board.registers(Block::Dvfs);
        let wide = ThresholdProfile {
            up_threshold: 0xFF,
            down_count: 0x1FF,
            ema_samples: 0xFFFF,
            ..PROFILE
        };

        apply_profile(&regs, &wide);

        assert_eq!(THRS_UPTHR.get(board.reg(Block::Dvfs, DVFSTHRS)), 0x3F);
        assert_eq!(COUN_DNCNT.get(board.reg(Block::Dvfs, DVFSCOUN)), 0xFF);
        assert_eq!(board.reg(Block::Dvfs, DVFSEMAC), 0x1FF);
    }
}
