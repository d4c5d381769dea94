//! # Synchronization Primitives
//!
//! ## Regras
//!
//! - **Spinlock**: seções curtas que também rodam em contexto de IRQ.
//!   Desabilita interrupções locais enquanto segura o lock.
//! - Nada que possa dormir (clock, regulador, delays) roda com lock seguro.

/// Spinlock irq-safe (busy-wait, não dorme)
pub mod spinlock;

pub use spinlock::{Spinlock, SpinlockGuard};
