//! # Seleção de Arquitetura
//!
//! `Cpu` é um *type alias* para a implementação concreta do `CpuHal`:
//!
//! - `arm`: ARMv6/ARMv7 (i.MX37 ARM1136, i.MX51 Cortex-A8), via `cpsid/cpsie`.
//! - demais alvos: emulação em software (build de host e testes).

#[cfg(target_arch = "arm")]
pub mod arm;

#[cfg(target_arch = "arm")]
pub use arm as platform;

#[cfg(not(target_arch = "arm"))]
pub mod host;

#[cfg(not(target_arch = "arm"))]
pub use host as platform;

pub use crate::hal::traits::cpu::{CpuHal, IrqFlags};
pub use platform::Cpu;
