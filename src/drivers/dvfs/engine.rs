//! Arquivo: drivers/dvfs/engine.rs
//!
//! Propósito: Motor de transição (handler do trabalho diferido).
//!
//! Decide o novo ponto de operação a partir do pedido do hardware e aplica
//! tensão e frequência na ordem segura:
//!
//! ```text
//! subir:  VCR(VINC=1) → set_voltage → settle → set_rate
//! descer: set_rate → VCR(VINC=0) → set_voltage → settle
//! ```
//!
//! Falhas são assimétricas. Subindo, qualquer falha antes do `set_rate`
//! aborta com a frequência antiga (seguro). Descendo, a frequência já caiu
//! quando a tensão falha: fica tensão alta com frequência baixa, que só
//! gasta mais energia.
//!
//! Toda saída passa por `finalize`, que reprograma MAXF/MINF e o perfil,
//! e desmascara FSVAI.

use ::core::sync::atomic::Ordering;

use super::chip::{OperatingPoint, StepPolicy};
use super::config::{HTRI_MAX, SETTLE_DELAY_US, VCR_VOLTAGE_COUNTER};
use super::controller::DvfsCore;
use super::error::DvfsError;
use super::regs::{
    DvfsCntr, GpcCntr, GpcVcr, CNTR_FSVAI, DVFSCNTR, GPC_CNTR, GPC_CNTR_HTRI, GPC_VCR,
};
use super::threshold::{apply_profile, ProfileKind};
use crate::core::time::settle;
use crate::hal::traits::Hz;

/// Causa decodificada de FSVAI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRequest {
    NoChange,
    Increase,
    Decrease,
    Emergency,
}

impl TransitionRequest {
    /// Decodifica o campo FSVAI (2 bits)
    pub fn from_fsvai(value: u32) -> Self {
        match value & 0x3 {
            0 => Self::NoChange,
            1 => Self::Increase,
            2 => Self::Decrease,
            _ => Self::Emergency,
        }
    }

    /// Índice do contador de diagnóstico
    pub fn index(self) -> usize {
        match self {
            Self::NoChange => 0,
            Self::Increase => 1,
            Self::Decrease => 2,
            Self::Emergency => 3,
        }
    }

    fn raises(self) -> bool {
        matches!(self, Self::Increase | Self::Emergency)
    }
}

/// Resultado de uma execução (diagnóstico e testes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Nada a fazer (NoChange ou pedido ignorado)
    Skipped,
    /// Já no limite pedido
    AtLimit,
    Changed { from: Hz, to: Hz },
    /// Sequência interrompida por falha
    Aborted(DvfsError),
}

impl DvfsCore {
    /// Uma execução do motor. Sempre termina re-armando a IRQ.
    pub fn run_transition(&self) -> TransitionOutcome {
        let cntr = self.res.dvfs.read(DVFSCNTR);
        let request = TransitionRequest::from_fsvai(CNTR_FSVAI.get(cntr));
        self.counters.requests[request.index()].fetch_add(1, Ordering::Relaxed);

        let first = {
            let mut st = self.state.lock();
            let first = st.session_runs == 0;
            st.session_runs = st.session_runs.saturating_add(1);
            first
        };

        let outcome = self.transition(request, first);
        self.finalize();
        outcome
    }

    fn transition(&self, request: TransitionRequest, first: bool) -> TransitionOutcome {
        if request == TransitionRequest::NoChange {
            crate::ktrace!("(DVFS) Pedido sem mudança");
            return TransitionOutcome::Skipped;
        }
        if first && self.chip.ignore_first_increase && request.raises() {
            crate::kdebug!("(DVFS) Primeiro pedido de aumento ignorado");
            return TransitionOutcome::Skipped;
        }

        let rate = self.res.clock.get_rate();
        let target = match self.target_index(request, rate) {
            Some(target) => target,
            None => {
                crate::ktrace!("(DVFS) Já no limite, freq=", rate);
                return TransitionOutcome::AtLimit;
            }
        };

        let to = self.chip.points[target];
        crate::kdebug!("(DVFS) Nova frequência:", to.rate);

        // Direção pela frequência real, não pelo índice
        let result = if to.rate < rate {
            self.step_down(to)
        } else {
            self.step_up(to)
        };

        match result {
            Ok(()) => {
                if self.chip.starts_gpc_fsm {
                    self.kick_gpc_fsm();
                }
                TransitionOutcome::Changed { from: rate, to: to.rate }
            }
            Err(err) => TransitionOutcome::Aborted(err),
        }
    }

    /// Índice do ponto alvo, ou `None` se já está no limite.
    ///
    /// Limite é igualdade exata com o extremo da tabela. Uma frequência fora
    /// da tabela nunca conta como extremo.
    fn target_index(&self, request: TransitionRequest, rate: Hz) -> Option<usize> {
        let last = self.chip.points.len() - 1;
        match request {
            TransitionRequest::NoChange => None,
            TransitionRequest::Decrease => {
                if self.chip.is_min_rate(rate) {
                    return None;
                }
                match self.chip.step {
                    StepPolicy::Jump => Some(0),
                    StepPolicy::Single => self.chip.next_below(rate),
                }
            }
            TransitionRequest::Increase => {
                if self.chip.is_max_rate(rate) {
                    return None;
                }
                match self.chip.step {
                    StepPolicy::Jump => Some(last),
                    StepPolicy::Single => self.chip.next_above(rate),
                }
            }
            // Emergência sempre vai direto ao máximo
            TransitionRequest::Emergency => (!self.chip.is_max_rate(rate)).then_some(last),
        }
    }

    /// Descer: frequência primeiro, tensão depois
    fn step_down(&self, to: OperatingPoint) -> Result<(), DvfsError> {
        if let Err(err) = self.res.clock.set_rate(to.rate) {
            crate::kerror!("(DVFS) Clock recusou Hz=", to.rate);
            return Err(DvfsError::from_clock(err));
        }

        self.program_vcr(false);

        if let Err(err) = self.res.regulator.set_voltage(to.voltage) {
            // Frequência já caiu: tensão alta é seguro
            crate::kwarn!("(DVFS) Regulador recusou uV=", to.voltage);
            return Err(DvfsError::from_regulator(err));
        }

        if settle(&*self.res.timer, SETTLE_DELAY_US).is_err() {
            crate::kwarn!("(DVFS) Relógio parado no settle (descida)");
        }
        Ok(())
    }

    /// Subir: tensão primeiro, settle, frequência por último
    fn step_up(&self, to: OperatingPoint) -> Result<(), DvfsError> {
        self.program_vcr(true);

        if let Err(err) = self.res.regulator.set_voltage(to.voltage) {
            crate::kerror!("(DVFS) Regulador recusou uV=", to.voltage);
            return Err(DvfsError::from_regulator(err));
        }

        if let Err(timeout) = settle(&*self.res.timer, SETTLE_DELAY_US) {
            crate::kerror!("(DVFS) Tensão não estabilizou, subida abortada");
            return Err(timeout.into());
        }

        if let Err(err) = self.res.clock.set_rate(to.rate) {
            crate::kerror!("(DVFS) Clock recusou Hz=", to.rate);
            return Err(DvfsError::from_clock(err));
        }
        Ok(())
    }

    fn program_vcr(&self, increase: bool) {
        self.res
            .gpc
            .write(GPC_VCR, GpcVcr::program(increase, VCR_VOLTAGE_COUNTER));
    }

    /// STRT + FUPD com o próximo HTRI da rotação
    fn kick_gpc_fsm(&self) {
        let mut st = self.state.lock();
        let htri = st.htri;

        let mut gpc = GpcCntr::from_bits_retain(self.res.gpc.read(GPC_CNTR));
        gpc.insert(GpcCntr::STRT | GpcCntr::FUPD);
        let raw = GPC_CNTR_HTRI.set(gpc.bits(), htri);
        self.res.gpc.write(GPC_CNTR, raw);

        st.htri = if htri >= HTRI_MAX { 0 } else { htri + 1 };
    }

    /// Reprograma flags e perfil para o novo regime e re-arma a IRQ.
    fn finalize(&self) {
        let rate = self.res.clock.get_rate();

        let mut st = self.state.lock();
        let mut cntr = DvfsCntr::from_bits_retain(self.res.dvfs.read(DVFSCNTR));
        cntr.remove(DvfsCntr::MAXF | DvfsCntr::MINF);

        // Entre os extremos o perfil atual fica
        let wanted = if self.chip.is_max_rate(rate) {
            cntr.insert(DvfsCntr::MAXF);
            Some(ProfileKind::SteppedUp)
        } else if self.chip.is_min_rate(rate) {
            cntr.insert(DvfsCntr::MINF);
            Some(ProfileKind::SteppedDown)
        } else {
            None
        };

        if let Some(kind) = wanted {
            if st.profile != kind {
                apply_profile(&*self.res.dvfs, self.chip.profile(kind));
                st.profile = kind;
            }
        }

        cntr.remove(DvfsCntr::FSVAIM);
        if self.chip.clear_load_buffer_full {
            cntr.insert(DvfsCntr::LBFL);
        }
        self.res.dvfs.write(DVFSCNTR, cntr.bits());
    }
}

// =============================================================================
// TESTS
// =============================================================================
