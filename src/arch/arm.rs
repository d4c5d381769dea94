//! Implementação ARM (modo privilegiado) das operações de CPU.
//!
//! Usa o bit I do CPSR: `cpsid i` mascara IRQs, `cpsie i` reabilita.

use ::core::arch::asm;

use crate::hal::traits::cpu::{CpuHal, IrqFlags};

/// Bit I do CPSR (IRQ mascarada quando 1)
const CPSR_I: u32 = 1 << 7;

pub struct ArmCpu;

impl CpuHal for ArmCpu {
    #[inline]
    fn irq_save() -> IrqFlags {
        let cpsr: u32;
        // SAFETY: leitura do CPSR + cpsid em modo privilegiado
        unsafe {
            asm!(
                "mrs {0}, cpsr",
                "cpsid i",
                out(reg) cpsr,
                options(nostack, preserves_flags)
            );
        }
        IrqFlags(cpsr)
    }

    #[inline]
    fn irq_restore(flags: IrqFlags) {
        if flags.0 & CPSR_I == 0 {
            // SAFETY: IRQs estavam habilitadas antes do irq_save
            unsafe { asm!("cpsie i", options(nostack, preserves_flags)) };
        }
    }

    #[inline]
    fn interrupts_enabled() -> bool {
        let cpsr: u32;
        // SAFETY: leitura pura do CPSR
        unsafe { asm!("mrs {0}, cpsr", out(reg) cpsr, options(nomem, nostack, preserves_flags)) };
        cpsr & CPSR_I == 0
    }
}

pub type Cpu = ArmCpu;
