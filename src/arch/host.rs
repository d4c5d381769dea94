//! Emulação de CPU para builds de host.
//!
//! Não existe controle real de interrupções fora do alvo; mantemos um
//! contador de aninhamento para que o spinlock e os testes enxerguem o
//! mesmo protocolo save/restore.

use ::core::sync::atomic::{AtomicU32, Ordering};

use crate::hal::traits::cpu::{CpuHal, IrqFlags};

/// Profundidade de seções com IRQ desabilitada
static IRQ_DEPTH: AtomicU32 = AtomicU32::new(0);

pub struct HostCpu;

impl CpuHal for HostCpu {
    fn irq_save() -> IrqFlags {
        IrqFlags(IRQ_DEPTH.fetch_add(1, Ordering::AcqRel))
    }

    fn irq_restore(_flags: IrqFlags) {
        IRQ_DEPTH.fetch_sub(1, Ordering::AcqRel);
    }

    fn interrupts_enabled() -> bool {
        IRQ_DEPTH.load(Ordering::Acquire) == 0
    }
}

pub type Cpu = HostCpu;
