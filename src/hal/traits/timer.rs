//! Trait de timer monotônico

/// Fonte de tempo monotônica com resolução de microssegundos
pub trait MonotonicClock: Send + Sync {
    /// Microssegundos desde um ponto arbitrário fixo
    fn now_us(&self) -> u64;
}
