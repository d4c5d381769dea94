//! Spinlock - bloqueio com busy-wait e interrupções locais desabilitadas

use ::core::mem::ManuallyDrop;
use ::core::ops::{Deref, DerefMut};

use crate::arch::{Cpu, CpuHal, IrqFlags};

/// Spinlock - usa busy-wait, NÃO pode dormir
///
/// Equivalente a `spin_lock_irqsave`: as interrupções locais ficam
/// desabilitadas enquanto o guard existir, então o handler de IRQ nunca
/// encontra o lock já tomado pela mesma CPU.
///
/// # Quando usar
///
/// - Estado compartilhado com handlers de interrupção
/// - Read-modify-write de registradores de controle
///
/// # Quando NÃO usar
///
/// - Ao redor de chamadas que podem dormir (I2C, regulador, delays)
pub struct Spinlock<T> {
    inner: spin::Mutex<T>,
}

impl<T> Spinlock<T> {
    /// Cria novo spinlock
    pub const fn new(data: T) -> Self {
        Self {
            inner: spin::Mutex::new(data),
        }
    }

    /// Adquire o lock
    pub fn lock(&self) -> SpinlockGuard<'_, T> {
        // Desabilitar interrupções antes de adquirir
        let flags = Cpu::irq_save();
        SpinlockGuard {
            guard: ManuallyDrop::new(self.inner.lock()),
            flags,
        }
    }

    /// Tenta adquirir sem bloquear
    pub fn try_lock(&self) -> Option<SpinlockGuard<'_, T>> {
        let flags = Cpu::irq_save();
        match self.inner.try_lock() {
            Some(guard) => Some(SpinlockGuard {
                guard: ManuallyDrop::new(guard),
                flags,
            }),
            None => {
                // Não conseguiu, restaurar interrupções
                Cpu::irq_restore(flags);
                None
            }
        }
    }

    /// Acesso exclusivo sem lock (já temos `&mut self`)
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}

/// Guard do spinlock - libera ao sair do escopo
pub struct SpinlockGuard<'a, T> {
    guard: ManuallyDrop<spin::MutexGuard<'a, T>>,
    flags: IrqFlags,
}

impl<T> Deref for SpinlockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for SpinlockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for SpinlockGuard<'_, T> {
    fn drop(&mut self) {
        // Liberar lock ANTES de reabilitar interrupções
        // SAFETY: guard não é usado depois daqui
        unsafe { ManuallyDrop::drop(&mut self.guard) };
        Cpu::irq_restore(self.flags);
    }
}

// =============================================================================
// TESTS
// =============================================================================
