//! Arquivo: core/work/delayed.rs
//!
//! Propósito: Trabalho diferido single-flight (`delayed_work`).
//! O handler de IRQ agenda; a worker thread executa. Nunca existe mais de
//! uma instância pendente do mesmo trabalho.
//!
//! Regras:
//! 1. `schedule` enquanto PENDING é no-op (os pedidos coalescem).
//! 2. `execute` limpa PENDING antes de rodar o handler: um pedido que chega
//!    durante a execução é enfileirado de novo e nunca se perde.
//! 3. Execuções do mesmo slot são serializadas (RUNNING). Um segundo worker
//!    que encontra o slot rodando não descarta o pedido: marca RERUN e quem
//!    está rodando executa de novo ao terminar.
//! 4. Fila sem espaço desfaz PENDING: o próximo `schedule` tenta de novo.

use alloc::sync::Arc;
use ::core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use super::workqueue::{QueueFull, WorkItem, WorkQueue};

// Estados do slot
const WORK_STATE_PENDING: u32 = 1 << 0; // Enfileirado, ainda não executou
const WORK_STATE_RUNNING: u32 = 1 << 1; // Handler executando no momento
const WORK_STATE_RERUN: u32 = 1 << 2; // Pedido visto por outro worker durante a execução

/// Slot de trabalho diferido
pub struct DelayedWork {
    state: AtomicU32,
    /// Atraso pedido no último `schedule` (para o timer da plataforma)
    delay_us: AtomicU64,
    /// Quantas vezes o trabalho foi efetivamente enfileirado
    queued: AtomicU64,
}

impl DelayedWork {
    pub const fn new() -> Self {
        Self {
            state: AtomicU32::new(0),
            delay_us: AtomicU64::new(0),
            queued: AtomicU64::new(0),
        }
    }

    /// Agenda o trabalho.
    ///
    /// `Ok(true)` se enfileirou, `Ok(false)` se já estava pendente.
    pub fn schedule(
        &self,
        queue: &WorkQueue,
        item: Arc<dyn WorkItem>,
        delay_us: u64,
    ) -> Result<bool, QueueFull> {
        // Tenta marcar como pendente atomicamente
        if self.state.fetch_or(WORK_STATE_PENDING, Ordering::AcqRel) & WORK_STATE_PENDING != 0 {
            return Ok(false);
        }

        if let Err(full) = queue.enqueue(item) {
            self.state.fetch_and(!WORK_STATE_PENDING, Ordering::AcqRel);
            return Err(full);
        }

        self.delay_us.store(delay_us, Ordering::Relaxed);
        self.queued.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }

    /// Executa `f` no contexto da worker thread.
    ///
    /// Retorna `false` (sem executar) se o slot não estava pendente ou se
    /// outra execução ainda está em andamento. No segundo caso o pedido
    /// fica com quem está rodando, que chama `f` mais uma vez.
    pub fn execute<F: FnMut()>(&self, mut f: F) -> bool {
        // PENDING -> RUNNING
        let mut claimed = false;
        let _ = self.state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
            claimed = false;
            if state & WORK_STATE_PENDING == 0 {
                None
            } else if state & WORK_STATE_RUNNING != 0 {
                Some(state | WORK_STATE_RERUN)
            } else {
                claimed = true;
                Some((state & !WORK_STATE_PENDING) | WORK_STATE_RUNNING)
            }
        });
        if !claimed {
            return false;
        }

        loop {
            f();

            // RUNNING -> livre, ou RERUN -> nova execução já com PENDING consumido
            let prev = self.state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                if state & WORK_STATE_RERUN != 0 {
                    Some(state & !(WORK_STATE_RERUN | WORK_STATE_PENDING))
                } else {
                    Some(state & !WORK_STATE_RUNNING)
                }
            });
            let prev = match prev {
                Ok(state) | Err(state) => state,
            };
            if prev & WORK_STATE_RERUN == 0 {
                break;
            }
        }
        true
    }

    /// Retorna se há execução pendente
    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) & WORK_STATE_PENDING != 0
    }

    /// Retorna se o handler está rodando
    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) & WORK_STATE_RUNNING != 0
    }

    /// Atraso pedido no último agendamento
    pub fn delay_us(&self) -> u64 {
        self.delay_us.load(Ordering::Relaxed)
    }

    /// Total de enfileiramentos efetivos
    pub fn queued(&self) -> u64 {
        self.queued.load(Ordering::Relaxed)
    }
}

impl Default for DelayedWork {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ::core::sync::atomic::AtomicUsize;

    struct Job {
        slot: DelayedWork,
        runs: AtomicUsize,
    }

    impl WorkItem for Job {
        fn run(&self) {
            self.slot.execute(|| {
                self.runs.fetch_add(1, Ordering::Relaxed);
            });
        }
    }

    fn job() -> Arc<Job> {
        Arc::new(Job {
            slot: DelayedWork::new(),
            runs: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_schedule_coalesces() {
        let wq = WorkQueue::new();
        wq.reserve(1);
        let job = job();

        assert_eq!(job.slot.schedule(&wq, job.clone(), 0), Ok(true));
        assert_eq!(job.slot.schedule(&wq, job.clone(), 0), Ok(false));
        assert_eq!(wq.len(), 1);
        assert!(job.slot.is_pending());

        wq.process_all();
        assert_eq!(job.runs.load(Ordering::Relaxed), 1);
        assert!(!job.slot.is_pending());
        assert!(!job.slot.is_running());

        // Depois de executar pode ser agendado de novo
        assert_eq!(job.slot.schedule(&wq, job.clone(), 0), Ok(true));
        assert_eq!(job.slot.queued(), 2);
    }

    #[test]
    fn test_execute_without_schedule_is_noop() {
        let job = job();
        assert!(!job.slot.execute(|| panic!("não deveria rodar")));
    }

    #[test]
    fn test_schedule_during_run_requeues() {
        let wq = WorkQueue::new();
        wq.reserve(2);
        let slot = DelayedWork::new();
        let other = job();

        assert_eq!(slot.schedule(&wq, other.clone(), 0), Ok(true));
        let mut runs = 0;
        let ran = slot.execute(|| {
            runs += 1;
            // Pedido chegando enquanto o handler roda
            assert!(slot.is_running());
            assert_eq!(slot.schedule(&wq, other.clone(), 0), Ok(true));
        });
        assert!(ran);
        assert_eq!(runs, 1);
        assert!(slot.is_pending());
        assert_eq!(wq.len(), 2);
    }

    #[test]
    fn test_second_worker_hands_request_back() {
        let wq = WorkQueue::new();
        wq.reserve(2);
        let slot = DelayedWork::new();
        let other = job();

        assert_eq!(slot.schedule(&wq, other.clone(), 0), Ok(true));
        let mut runs = 0;
        let ran = slot.execute(|| {
            runs += 1;
            if runs == 1 {
                assert_eq!(slot.schedule(&wq, other.clone(), 0), Ok(true));
                // Outro worker pega o item novo enquanto este ainda roda
                assert!(!slot.execute(|| panic!("execução concorrente")));
            }
        });

        assert!(ran);
        assert_eq!(runs, 2);
        assert!(!slot.is_pending());
        assert!(!slot.is_running());
        // Slot livre: aceita um novo pedido
        assert_eq!(slot.schedule(&wq, other.clone(), 0), Ok(true));
    }

    #[test]
    fn test_full_queue_leaves_slot_idle() {
        let wq = WorkQueue::new();
        let job = job();

        assert_eq!(job.slot.schedule(&wq, job.clone(), 0), Err(QueueFull));
        assert!(!job.slot.is_pending());
        assert_eq!(job.slot.queued(), 0);

        wq.reserve(1);
        let cap = wq.capacity();
        assert_eq!(job.slot.schedule(&wq, job.clone(), 0), Ok(true));
        assert_eq!(wq.capacity(), cap);
    }
}
