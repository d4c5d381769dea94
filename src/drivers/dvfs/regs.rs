//! # Mapa de Registradores do DVFS Core
//!
//! Offsets (em bytes) dentro dos blocos DVFS core, GPC e CCM, mais as
//! descrições dos campos.
//!
//! - Bits isolados: conjuntos `bitflags` (`DvfsCntr`, `GpcCntr`, `GpcVcr`).
//! - Campos de vários bits: descritores `Field { mask, offset }`.
//!
//! Atualizações sempre partem de `from_bits_retain(read)` para preservar
//! bits que o driver não conhece.

use bitflags::bitflags;

// =============================================================================
// BLOCO DVFS CORE
// =============================================================================

pub const DVFSTHRS: usize = 0x00;
pub const DVFSCOUN: usize = 0x04;
pub const DVFSSIG1: usize = 0x08;
pub const DVFSSIG0: usize = 0x0C;
pub const DVFSGPC0: usize = 0x10;
pub const DVFSGPC1: usize = 0x14;
pub const DVFSGPBT: usize = 0x18;
pub const DVFSEMAC: usize = 0x1C;
pub const DVFSCNTR: usize = 0x20;
pub const DVFSLTR0_0: usize = 0x24;
pub const DVFSLTR0_1: usize = 0x28;
pub const DVFSLTR1_0: usize = 0x2C;
pub const DVFSLTR1_1: usize = 0x30;
pub const DVFSPT0: usize = 0x34;
pub const DVFSPT1: usize = 0x38;
pub const DVFSPT2: usize = 0x3C;
pub const DVFSPT3: usize = 0x40;

// =============================================================================
// BLOCO GPC
// =============================================================================

pub const GPC_CNTR: usize = 0x00;
pub const GPC_VCR: usize = 0x08;

// =============================================================================
// BLOCO CCM
// =============================================================================

pub const CCM_CACRR: usize = 0x10;
pub const CCM_CDHIPR: usize = 0x48;
pub const CCM_CDCR: usize = 0x4C;

/// CCM_CDHIPR: divisor ARM_PODF ainda aplicando
pub const CCM_CDHIPR_ARM_PODF_BUSY: u32 = 1 << 16;
/// CCM_CDCR: usar divisor de transição durante a troca
pub const CCM_CDCR_ARM_FREQ_SHIFT_DIVIDER: u32 = 1 << 2;

// =============================================================================
// CAMPOS MULTI-BIT
// =============================================================================

/// Campo de vários bits (máscara já deslocada + posição)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub mask: u32,
    pub offset: u32,
}

impl Field {
    pub const fn new(mask: u32, offset: u32) -> Self {
        Self { mask, offset }
    }

    /// Extrai o campo de um valor de registrador
    #[inline]
    pub const fn get(&self, reg: u32) -> u32 {
        (reg & self.mask) >> self.offset
    }

    /// Desloca e mascara `value` para a posição do campo
    #[inline]
    pub const fn prep(&self, value: u32) -> u32 {
        (value << self.offset) & self.mask
    }

    /// Substitui o campo dentro de `reg`
    #[inline]
    pub const fn set(&self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask) | self.prep(value)
    }
}

pub const THRS_UPTHR: Field = Field::new(0x0FC0_0000, 22);
pub const THRS_DNTHR: Field = Field::new(0x003F_0000, 16);
pub const THRS_PNCTHR: Field = Field::new(0x0000_003F, 0);

pub const COUN_DNCNT: Field = Field::new(0x00FF_0000, 16);
pub const COUN_UPCNT: Field = Field::new(0x0000_00FF, 0);

pub const EMAC_EMAC: Field = Field::new(0x0000_01FF, 0);

/// Causa do pedido (FSVAI)
pub const CNTR_FSVAI: Field = Field::new(0x0030_0000, 20);
/// Fonte do load tracking buffer
pub const CNTR_LTBRSR: Field = Field::new(0x0000_0018, 3);

pub const GPC_CNTR_HTRI: Field = Field::new(0x0000_000F, 0);

pub const GPC_VCR_VCNT: Field = Field::new(0x0000_7FFF, 0);

pub const CCM_CACRR_ARM_PODF: Field = Field::new(0x0000_0007, 0);

// =============================================================================
// BITS ISOLADOS
// =============================================================================

bitflags! {
    /// DVFSCNTR
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DvfsCntr: u32 {
        /// Evento sempre ativo
        const DVFEV  = 0x1000_0000;
        /// Máscara da IRQ de load buffer cheio
        const LBMI   = 0x0800_0000;
        /// Load buffer cheio (w1c)
        const LBFL   = 0x0600_0000;
        /// Fonte da IRQ: DVFS core
        const DVFIS  = 0x0100_0000;
        /// Máscara do pedido de ajuste (FSVAI)
        const FSVAIM = 0x0040_0000;
        const WFIM   = 0x0008_0000;
        /// Já na frequência máxima
        const MAXF   = 0x0004_0000;
        /// Já na frequência mínima
        const MINF   = 0x0002_0000;
        /// Habilita o monitor
        const DVFEN  = 0x0000_0001;
    }
}

bitflags! {
    /// GPC_CNTR
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GpcCntr: u32 {
        /// Roteia a IRQ do DVFS core pelo GPC
        const GPCIRQ  = 0x0010_0000;
        /// Pedido pendente do DVFS core 0
        const DVFS0CR = 0x0001_0000;
        /// Domínio: ARM
        const ADU     = 0x0000_8000;
        const STRT    = 0x0000_4000;
        const FUPD    = 0x0000_2000;
    }
}

bitflags! {
    /// GPC_VCR
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GpcVcr: u32 {
        /// Direção: aumentar tensão
        const VINC  = 0x0002_0000;
        /// Unidade do contador de tensão
        const VCNTU = 0x0001_0000;
    }
}

impl GpcVcr {
    /// Valor completo do GPC_VCR para uma mudança de tensão
    pub fn program(increase: bool, count: u32) -> u32 {
        let mut bits = GpcVcr::VCNTU;
        bits.set(GpcVcr::VINC, increase);
        bits.bits() | GPC_VCR_VCNT.prep(count)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_get_set() {
        let reg = THRS_UPTHR.prep(25) | THRS_DNTHR.prep(9) | THRS_PNCTHR.prep(63);
        assert_eq!(THRS_UPTHR.get(reg), 25);
        assert_eq!(THRS_DNTHR.get(reg), 9);
        assert_eq!(THRS_PNCTHR.get(reg), 63);

        let reg = THRS_DNTHR.set(reg, 33);
        assert_eq!(THRS_DNTHR.get(reg), 33);
        assert_eq!(THRS_UPTHR.get(reg), 25);
    }

    #[test]
    fn test_field_prep_masks_overflow() {
        // 64 não cabe em 6 bits
        assert_eq!(THRS_PNCTHR.prep(64), 0);
        assert_eq!(EMAC_EMAC.prep(0x3FF), 0x1FF);
    }

    #[test]
    fn test_fsvai_decode() {
        assert_eq!(CNTR_FSVAI.get(0x0010_0000), 1);
        assert_eq!(CNTR_FSVAI.get(0x0030_0000 | DvfsCntr::DVFEN.bits()), 3);
    }

    #[test]
    fn test_vcr_program() {
        assert_eq!(GpcVcr::program(true, 100), 0x0003_0064);
        assert_eq!(GpcVcr::program(false, 100), 0x0001_0064);
    }

    #[test]
    fn test_retain_unknown_bits() {
        let raw = 0x8000_0000 | DvfsCntr::DVFEN.bits();
        let mut cntr = DvfsCntr::from_bits_retain(raw);
        cntr.insert(DvfsCntr::FSVAIM);
        assert_eq!(cntr.bits(), raw | DvfsCntr::FSVAIM.bits());
    }
}
