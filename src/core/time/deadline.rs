//! Arquivo: core/time/deadline.rs
//!
//! Propósito: Esperas com prazo sobre um relógio monotônico.
//!
//! Detalhes de Implementação:
//! - `Deadline` guarda o instante limite em microssegundos.
//! - `settle` substitui o `udelay` fixo: espera o tempo pedido, mas desiste
//!   se o relógio parar de avançar (relógio quebrado não trava a CPU).
//! - `poll_until` espera uma condição de hardware (bit de busy) com timeout.

use crate::hal::traits::timer::MonotonicClock;

/// Limite de iterações sem avanço do relógio antes de desistir
pub const MAX_STALLED_SPINS: u32 = 10_000;

/// Prazo estourado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

impl ::core::fmt::Display for Timeout {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.write_str("prazo estourado")
    }
}

/// Instante limite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at_us: u64,
}

impl Deadline {
    /// Prazo `us` microssegundos a partir de agora
    pub fn after(clock: &dyn MonotonicClock, us: u64) -> Self {
        Self {
            at_us: clock.now_us().saturating_add(us),
        }
    }

    /// Instante limite absoluto
    pub fn at_us(&self) -> u64 {
        self.at_us
    }

    /// Retorna se o prazo já passou
    pub fn expired(&self, clock: &dyn MonotonicClock) -> bool {
        clock.now_us() >= self.at_us
    }
}

/// Espera `us` microssegundos.
///
/// Devolve `Err(Timeout)` se o relógio ficar parado por mais de
/// `MAX_STALLED_SPINS` leituras seguidas.
pub fn settle(clock: &dyn MonotonicClock, us: u64) -> Result<(), Timeout> {
    let deadline = Deadline::after(clock, us);
    let mut last = clock.now_us();
    let mut stalled = 0u32;

    while last < deadline.at_us() {
        ::core::hint::spin_loop();
        let now = clock.now_us();
        if now == last {
            stalled += 1;
            if stalled >= MAX_STALLED_SPINS {
                return Err(Timeout);
            }
        } else {
            stalled = 0;
            last = now;
        }
    }

    Ok(())
}

/// Espera até `done()` ser verdadeiro ou `timeout_us` passar.
///
/// A condição é sempre avaliada ao menos uma vez, mesmo com timeout zero.
pub fn poll_until<F>(clock: &dyn MonotonicClock, timeout_us: u64, mut done: F) -> Result<(), Timeout>
where
    F: FnMut() -> bool,
{
    let deadline = Deadline::after(clock, timeout_us);
    let mut spins = 0u32;

    loop {
        if done() {
            return Ok(());
        }
        if deadline.expired(clock) {
            return Err(Timeout);
        }
        spins += 1;
        // Relógio parado também conta como prazo estourado
        if spins >= MAX_STALLED_SPINS.saturating_mul(16) {
            return Err(Timeout);
        }
        ::core::hint::spin_loop();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ::core::sync::atomic::{AtomicU64, Ordering};

    /// Relógio que avança `step` a cada leitura
    struct SteppingClock {
        now: AtomicU64,
        step: u64,
    }

    impl MonotonicClock for SteppingClock {
        fn now_us(&self) -> u64 {
            self.now.fetch_add(self.step, Ordering::Relaxed)
        }
    }

    #[test]
    fn test_settle_waits_full_period() {
        let clock = SteppingClock { now: AtomicU64::new(100), step: 1 };
        assert_eq!(settle(&clock, 30), Ok(()));
        assert!(clock.now.load(Ordering::Relaxed) >= 130);
    }

    #[test]
    fn test_settle_stalled_clock_times_out() {
        let clock = SteppingClock { now: AtomicU64::new(5), step: 0 };
        assert_eq!(settle(&clock, 30), Err(Timeout));
    }

    #[test]
    fn test_settle_zero_is_immediate() {
        let clock = SteppingClock { now: AtomicU64::new(0), step: 0 };
        assert_eq!(settle(&clock, 0), Ok(()));
    }

    #[test]
    fn test_poll_until() {
        let clock = SteppingClock { now: AtomicU64::new(0), step: 1 };
        let mut calls = 0;
        let result = poll_until(&clock, 1_000, || {
            calls += 1;
            calls == 3
        });
        assert_eq!(result, Ok(()));
        assert_eq!(calls, 3);

        let result = poll_until(&clock, 10, || false);
        assert_eq!(result, Err(Timeout));
    }
}
