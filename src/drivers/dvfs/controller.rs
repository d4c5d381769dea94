//! Arquivo: drivers/dvfs/controller.rs
//!
//! Propósito: Objeto do controlador DVFS core e seu ciclo de vida.
//!
//! Detalhes de Implementação:
//! - `DvfsCore` é dono de todos os colaboradores (registradores, clock,
//!   regulador, relógio) recebidos em `probe`. Não existe instância global.
//! - Um único `Spinlock` serializa o estado (Stopped/Active), o perfil ativo
//!   e todo read-modify-write de DVFSCNTR e GPC_CNTR. Chamadas que podem
//!   dormir (clock, regulador, settle) acontecem SEMPRE fora do lock.
//! - O handler de IRQ fica em `irq.rs` e o motor de transição em `engine.rs`.
//!
//! Corrida conhecida: `stop()` não espera uma transição em andamento. Se o
//! motor terminar depois do stop, ele pode sobrescrever o ponto forçado pelo
//! stop. A próxima transição natural resolve.

use alloc::boxed::Box;
use alloc::sync::{Arc, Weak};
use ::core::sync::atomic::{AtomicU32, Ordering};

use super::chip::ChipProfile;
use super::config::SETTLE_DELAY_US;
use super::engine::TransitionRequest;
use super::regs::{DvfsCntr, GpcCntr, CNTR_LTBRSR, DVFSCNTR, GPC_CNTR};
use super::threshold::{apply_profile, ProfileKind};
use crate::core::time::settle;
use crate::core::work::{DelayedWork, WorkItem, WorkQueue};
use crate::hal::traits::{ClockProvider, MonotonicClock, RegisterBlock, Regulator};
use crate::sync::Spinlock;

/// Estado do controlador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Stopped,
    Active,
}

/// Colaboradores injetados no probe
pub struct DvfsResources {
    /// Bloco DVFS core
    pub dvfs: Box<dyn RegisterBlock>,
    /// Bloco GPC (GPC_CNTR, GPC_VCR)
    pub gpc: Box<dyn RegisterBlock>,
    /// Clock da CPU
    pub clock: Box<dyn ClockProvider>,
    /// Regulador do trilho da CPU
    pub regulator: Box<dyn Regulator>,
    /// Fonte de tempo para o settle
    pub timer: Box<dyn MonotonicClock>,
}

/// Estado protegido pelo lock
pub(super) struct CoreState {
    pub(super) state: ControllerState,
    pub(super) profile: ProfileKind,
    /// Próximo valor de HTRI na rotação 0..=15
    pub(super) htri: u32,
    /// Transições executadas desde o último start
    pub(super) session_runs: u32,
}

/// Contadores de diagnóstico (sem efeito na máquina de estados)
pub(super) struct Counters {
    pub(super) serviced: AtomicU32,
    pub(super) spurious: AtomicU32,
    /// Indexado por `TransitionRequest::index`
    pub(super) requests: [AtomicU32; 4],
}

/// Cópia dos contadores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DvfsStats {
    /// IRQs do DVFS core atendidas
    pub serviced: u32,
    /// IRQs sem DVFS0CR
    pub spurious: u32,
    /// NoChange, Increase, Decrease, Emergency
    pub requests: [u32; 4],
}

/// Controlador DVFS core
pub struct DvfsCore {
    pub(super) chip: &'static ChipProfile,
    pub(super) res: DvfsResources,
    pub(super) state: Spinlock<CoreState>,
    pub(super) counters: Counters,
    pub(super) work: DelayedWork,
    pub(super) queue: Arc<WorkQueue>,
    pub(super) me: Weak<DvfsCore>,
}

impl DvfsCore {
    /// Inicializa o controlador (parado) com o perfil de regime baixo.
    pub fn probe(chip: &'static ChipProfile, res: DvfsResources, queue: Arc<WorkQueue>) -> Arc<Self> {
        // Slot do trabalho diferido: a IRQ enfileira sem alocar
        queue.reserve(1);

        let core = Arc::new_cyclic(|me| DvfsCore {
            chip,
            res,
            state: Spinlock::new(CoreState {
                state: ControllerState::Stopped,
                profile: ProfileKind::SteppedDown,
                htri: 0,
                session_runs: 0,
            }),
            counters: Counters {
                serviced: AtomicU32::new(0),
                spurious: AtomicU32::new(0),
                requests: [
                    AtomicU32::new(0),
                    AtomicU32::new(0),
                    AtomicU32::new(0),
                    AtomicU32::new(0),
                ],
            },
            work: DelayedWork::new(),
            queue,
            me: me.clone(),
        });

        {
            let _st = core.state.lock();
            apply_profile(&*core.res.dvfs, &chip.stepped_down);
        }

        crate::kinfo!("(DVFS) Controlador DVFS core registrado");
        crate::ktrace!("(DVFS) Pontos de operação:", chip.points.len());
        core
    }

    /// Arma o monitor de carga.
    ///
    /// No-op se já estiver ativo.
    pub fn start(&self) {
        // Leitura do clock pode dormir: fora do lock
        let rate = self.res.clock.get_rate();

        let mut st = self.state.lock();
        if st.state == ControllerState::Active {
            crate::kdebug!("(DVFS) start: já ativo");
            return;
        }

        st.session_runs = 0;
        st.htri = 0;

        // Rotear a IRQ pelo GPC, domínio ARM
        let mut gpc = GpcCntr::from_bits_retain(self.res.gpc.read(GPC_CNTR));
        gpc.insert(GpcCntr::GPCIRQ | GpcCntr::ADU);
        self.res.gpc.write(GPC_CNTR, gpc.bits());

        let profile = &self.chip.stepped_down;
        apply_profile(&*self.res.dvfs, profile);
        st.profile = ProfileKind::SteppedDown;

        let mut cntr = DvfsCntr::from_bits_retain(self.res.dvfs.read(DVFSCNTR));
        if self.chip.mask_load_buffer_irq {
            cntr.insert(DvfsCntr::LBMI);
        }
        cntr.insert(DvfsCntr::DVFIS);
        cntr.remove(DvfsCntr::FSVAIM | DvfsCntr::MAXF | DvfsCntr::MINF);
        if self.chip.is_max_rate(rate) {
            cntr.insert(DvfsCntr::MAXF);
        } else if self.chip.is_min_rate(rate) {
            cntr.insert(DvfsCntr::MINF);
        }

        let mut raw = cntr.bits();
        raw = CNTR_LTBRSR.set(raw, profile.load_tracking_buffer_source);
        raw = self.chip.div3ck.set(raw, profile.div3_clock_select);
        raw |= DvfsCntr::DVFEN.bits();
        self.res.dvfs.write(DVFSCNTR, raw);

        st.state = ControllerState::Active;
        drop(st);

        crate::kinfo!("(DVFS) Controlador ativo, freq=", rate);
    }

    /// Desarma o monitor e estaciona no ponto máximo.
    ///
    /// No-op se já estiver parado.
    pub fn stop(&self) {
        {
            let mut st = self.state.lock();
            if st.state == ControllerState::Stopped {
                crate::kdebug!("(DVFS) stop: já parado");
                return;
            }

            let mut cntr = DvfsCntr::from_bits_retain(self.res.dvfs.read(DVFSCNTR));
            cntr.insert(DvfsCntr::FSVAIM);
            cntr.remove(DvfsCntr::DVFEN);
            self.res.dvfs.write(DVFSCNTR, cntr.bits());

            st.state = ControllerState::Stopped;
        }

        self.park_at_max();
        crate::kinfo!("(DVFS) Controlador parado");
    }

    /// Força tensão máxima e depois frequência máxima.
    ///
    /// A frequência só sobe se a tensão subiu e estabilizou.
    fn park_at_max(&self) {
        let max = self.chip.max_point();
        if self.chip.is_max_rate(self.res.clock.get_rate()) {
            return;
        }

        if self.res.regulator.set_voltage(max.voltage).is_err() {
            crate::kerror!("(DVFS) stop: regulador recusou uV=", max.voltage);
            return;
        }
        if settle(&*self.res.timer, SETTLE_DELAY_US).is_err() {
            crate::kerror!("(DVFS) stop: relógio parado no settle");
            return;
        }
        if self.res.clock.set_rate(max.rate).is_err() {
            crate::kerror!("(DVFS) stop: clock recusou Hz=", max.rate);
        }
    }

    /// `true` → start, `false` → stop
    pub fn enable(&self, on: bool) {
        if on {
            self.start();
        } else {
            self.stop();
        }
    }

    /// "enabled" ou "disabled"
    pub fn status(&self) -> &'static str {
        match self.state() {
            ControllerState::Active => "enabled",
            ControllerState::Stopped => "disabled",
        }
    }

    /// Zera os quatro contadores por tipo de pedido. Não toca registradores.
    pub fn reset_counters(&self) {
        for counter in &self.counters.requests {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state.lock().state
    }

    /// Perfil de thresholds ativo no hardware
    pub fn active_profile(&self) -> ProfileKind {
        self.state.lock().profile
    }

    pub fn chip(&self) -> &'static ChipProfile {
        self.chip
    }

    /// Contagem de um tipo de pedido
    pub fn request_count(&self, request: TransitionRequest) -> u32 {
        self.counters.requests[request.index()].load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> DvfsStats {
        let mut requests = [0; 4];
        for (out, counter) in requests.iter_mut().zip(&self.counters.requests) {
            *out = counter.load(Ordering::Relaxed);
        }
        DvfsStats {
            serviced: self.counters.serviced.load(Ordering::Relaxed),
            spurious: self.counters.spurious.load(Ordering::Relaxed),
            requests,
        }
    }

    /// Remoção do dispositivo: para o controlador.
    pub fn remove(&self) {
        self.stop();
        crate::kinfo!("(DVFS) Controlador removido");
    }
}

impl WorkItem for DvfsCore {
    fn run(&self) {
        self.work.execute(|| {
            self.run_transition();
        });
    }
}
