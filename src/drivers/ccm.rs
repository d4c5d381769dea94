//! Clock ARM do CCM (i.MX37).
//!
//! A frequência da CPU é `parent / (ARM_PODF + 1)`. Trocar o divisor:
//!
//! 1. Liga ARM_FREQ_SHIFT_DIVIDER em CCM_CDCR.
//! 2. Escreve ARM_PODF em CCM_CACRR.
//! 3. Espera CCM_CDHIPR.ARM_PODF_BUSY limpar (com prazo).

use alloc::boxed::Box;

use super::dvfs::config::CCM_PODF_TIMEOUT_US;
use super::dvfs::regs::{
    CCM_CACRR, CCM_CACRR_ARM_PODF, CCM_CDCR, CCM_CDCR_ARM_FREQ_SHIFT_DIVIDER, CCM_CDHIPR,
    CCM_CDHIPR_ARM_PODF_BUSY,
};
use crate::core::time::poll_until;
use crate::hal::traits::{ClockProvider, Hz, MonotonicClock, RegisterBlock};
use crate::hal::HalError;

/// Maior divisor representável (ARM_PODF tem 3 bits)
const MAX_DIVIDER: u32 = 8;

/// Clock da CPU derivado do PLL por ARM_PODF
pub struct CcmArmClock {
    regs: Box<dyn RegisterBlock>,
    timer: Box<dyn MonotonicClock>,
    parent_rate: Hz,
}

impl CcmArmClock {
    pub fn new(regs: Box<dyn RegisterBlock>, timer: Box<dyn MonotonicClock>, parent_rate: Hz) -> Self {
        Self {
            regs,
            timer,
            parent_rate,
        }
    }

    /// Divisor atual (ARM_PODF)
    pub fn podf(&self) -> u32 {
        CCM_CACRR_ARM_PODF.get(self.regs.read(CCM_CACRR))
    }

    /// Divisor exato para `rate`
    fn divider_for(&self, rate: Hz) -> Result<u32, HalError> {
        if rate == 0 {
            return Err(HalError::OutOfRange);
        }
        let div = self.parent_rate / rate;
        if div == 0 || div > MAX_DIVIDER {
            return Err(HalError::OutOfRange);
        }
        // A tabela usa PLL / n truncado
        if self.parent_rate / div != rate {
            return Err(HalError::InvalidRate);
        }
        Ok(div)
    }
}

impl ClockProvider for CcmArmClock {
    fn get_rate(&self) -> Hz {
        self.parent_rate / (self.podf() + 1)
    }

    fn set_rate(&self, rate: Hz) -> Result<(), HalError> {
        let div = self.divider_for(rate)?;

        self.regs.modify(CCM_CDCR, 0, CCM_CDCR_ARM_FREQ_SHIFT_DIVIDER);
        let cacrr = CCM_CACRR_ARM_PODF.set(self.regs.read(CCM_CACRR), div - 1);
        self.regs.write(CCM_CACRR, cacrr);

        poll_until(&*self.timer, CCM_PODF_TIMEOUT_US, || {
            self.regs.read(CCM_CDHIPR) & CCM_CDHIPR_ARM_PODF_BUSY == 0
        })
        .map_err(|timeout| {
            crate::kerror!("(CCM) ARM_PODF não terminou, podf=", div - 1);
            HalError::from(timeout)
        })?;

        crate::ktrace!("(CCM) Nova frequência ARM:", rate);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::dvfs::chip::{ChipProfile, MX37_PLL_RATE};
    use crate::drivers::dvfs::fake::{Block, FakeBoard, FakeTimer};

    fn clock(board: &FakeBoard) -> CcmArmClock {
        CcmArmClock::new(
            Box::new(board.registers(Block::Ccm)),
            Box::new(FakeTimer(board.clone())),
            MX37_PLL_RATE,
        )
    }

    #[test]
    fn test_get_rate_from_podf() {
        let board = FakeBoard::new();
        board.set_reg(Block::Ccm, CCM_CACRR, 3);
        assert_eq!(clock(&board).get_rate(), 133_000_000);
    }

    #[test]
    fn test_set_rate_covers_mx37_table() {
        let board = FakeBoard::new();
        let clk = clock(&board);
        for point in ChipProfile::MX37.points {
            assert_eq!(clk.set_rate(point.rate), Ok(()));
            assert_eq!(clk.get_rate(), point.rate);
        }
        assert_ne!(board.reg(Block::Ccm, CCM_CDCR) & CCM_CDCR_ARM_FREQ_SHIFT_DIVIDER, 0);
    }

    #[test]
    fn test_set_rate_rejects_bad_rates() {
        let board = FakeBoard::new();
        let clk = clock(&board);
        assert_eq!(clk.set_rate(0), Err(HalError::OutOfRange));
        assert_eq!(clk.set_rate(MX37_PLL_RATE * 2), Err(HalError::OutOfRange));
        assert_eq!(clk.set_rate(MX37_PLL_RATE / 9), Err(HalError::OutOfRange));
        assert_eq!(clk.set_rate(300_000_000), Err(HalError::InvalidRate));
        // Nada foi escrito
        assert!(board.writes(Block::Ccm).is_empty());
    }

    #[test]
    fn test_set_rate_busy_times_out() {
        let board = FakeBoard::new();
        board.set_reg(Block::Ccm, CCM_CDHIPR, CCM_CDHIPR_ARM_PODF_BUSY);
        let clk = clock(&board);
        assert_eq!(clk.set_rate(MX37_PLL_RATE / 2), Err(HalError::Timeout));
    }
}
