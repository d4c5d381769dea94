//! Hardware Abstraction Layer (HAL)
//!
//! Interfaces dos colaboradores externos consumidos pelo driver DVFS:
//! acesso a registradores, clock da CPU, regulador de tensão e relógio
//! monotônico. O driver nunca toca hardware fora destes traits, o que permite
//! injetar implementações falsas nos testes.

pub mod error;
pub mod mmio;
pub mod traits;

pub use error::HalError;
pub use mmio::MmioRegion;
pub use traits::*;
