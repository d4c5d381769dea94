//! Arquivo: core/work/workqueue.rs
//!
//! Propósito: Filas de trabalho (Work Queues).
//! Permite agendar a execução de funções para um momento posterior, fora do
//! contexto de interrupção.
//!
//! Detalhes de Implementação:
//! - Usa `VecDeque` protegido por `Spinlock` para armazenar trabalhos.
//! - Itens são `Arc<dyn WorkItem>`: o mesmo objeto pode ser enfileirado de
//!   novo depois de executar.
//! - Capacidade é reservada em contexto de thread (`reserve`). `enqueue`
//!   nunca cresce o buffer: pode ser chamado de IRQ sem tocar o alocador.
//! - O consumidor é a worker thread da plataforma (ou o teste) chamando
//!   `process_all`.

use alloc::collections::VecDeque;
use alloc::sync::Arc;

use crate::sync::Spinlock;

/// Trait para itens de trabalho
pub trait WorkItem: Send + Sync {
    /// Executa o trabalho (contexto de thread, pode dormir)
    fn run(&self);
}

/// Fila sem espaço reservado para mais um item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

struct Inner {
    items: VecDeque<Arc<dyn WorkItem>>,
    /// Total de slots reservados pelos usuários da fila
    reserved: usize,
}

/// Fila de trabalho
pub struct WorkQueue {
    inner: Spinlock<Inner>,
}

impl WorkQueue {
    /// Cria uma nova WorkQueue (sem capacidade; usar `reserve`)
    pub const fn new() -> Self {
        Self {
            inner: Spinlock::new(Inner {
                items: VecDeque::new(),
                reserved: 0,
            }),
        }
    }

    /// Reserva `slots` entradas. Pode alocar: só em contexto de thread.
    pub fn reserve(&self, slots: usize) {
        let mut inner = self.inner.lock();
        inner.reserved = inner.reserved.saturating_add(slots);
        let missing = inner.reserved.saturating_sub(inner.items.len());
        inner.items.reserve(missing);
    }

    /// Enfileira um trabalho. Seguro em contexto de IRQ.
    ///
    /// Nunca aloca: sem capacidade livre devolve `QueueFull`.
    pub fn enqueue(&self, work: Arc<dyn WorkItem>) -> Result<(), QueueFull> {
        let mut inner = self.inner.lock();
        if inner.items.len() >= inner.items.capacity() {
            return Err(QueueFull);
        }
        inner.items.push_back(work);
        Ok(())
    }

    /// Quantidade de itens pendentes
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Retorna se a fila está vazia
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entradas que cabem sem alocar
    pub fn capacity(&self) -> usize {
        self.inner.lock().items.capacity()
    }

    /// Processa todos os itens pendentes na fila (Flush).
    ///
    /// Retorna quantos itens executaram. Itens enfileirados durante a
    /// execução também são processados.
    ///
    /// Pensado para um único worker. Com mais de um, `DelayedWork` ainda
    /// serializa o mesmo slot e re-executa um pedido que chegou durante a
    /// execução.
    pub fn process_all(&self) -> usize {
        let mut executed = 0;
        loop {
            // Retirar um item protegendo o lock o mínimo possível
            let item = self.inner.lock().items.pop_front();

            match item {
                Some(work) => {
                    work.run();
                    executed += 1;
                }
                None => break, // Fila vazia
            }
        }
        executed
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
