//! Handler de IRQ do DVFS core.
//!
//! Roda em contexto de interrupção: não pode dormir, não toca clock nem
//! regulador. Só confirma a origem, mascara FSVAI e agenda o motor.

use ::core::sync::atomic::Ordering;

use super::controller::DvfsCore;
use super::regs::{DvfsCntr, GpcCntr, DVFSCNTR, GPC_CNTR};

/// Resultado do handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    /// A IRQ não era nossa
    None,
    Handled,
}

impl DvfsCore {
    /// Handler da IRQ do GPC/DVFS core.
    pub fn on_interrupt(&self) -> IrqReturn {
        let gpc = GpcCntr::from_bits_retain(self.res.gpc.read(GPC_CNTR));
        if !gpc.contains(GpcCntr::DVFS0CR) {
            // Re-disparo espúrio: só reconhecer
            self.counters.spurious.fetch_add(1, Ordering::Relaxed);
            return IrqReturn::Handled;
        }

        {
            let _st = self.state.lock();
            let mut cntr = DvfsCntr::from_bits_retain(self.res.dvfs.read(DVFSCNTR));
            cntr.insert(DvfsCntr::FSVAIM);
            self.res.dvfs.write(DVFSCNTR, cntr.bits());
        }

        self.counters.serviced.fetch_add(1, Ordering::Relaxed);

        match self.me.upgrade() {
            Some(me) => match self.work.schedule(&self.queue, me, 0) {
                Ok(true) => {}
                Ok(false) => crate::ktrace!("(DVFS) Transição já pendente"),
                Err(_) => {
                    // Sem slot: desmascara para o hardware pedir de novo
                    crate::kerror!("(DVFS) Fila de trabalho cheia");
                    self.unmask_fsvai();
                }
            },
            None => crate::kwarn!("(DVFS) IRQ durante a destruição do controlador"),
        }

        IrqReturn::Handled
    }

    fn unmask_fsvai(&self) {
        let _st = self.state.lock();
        let mut cntr = DvfsCntr::from_bits_retain(self.res.dvfs.read(DVFSCNTR));
        cntr.remove(DvfsCntr::FSVAIM);
        self.res.dvfs.write(DVFSCNTR, cntr.bits());
    }
}
