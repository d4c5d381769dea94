//! Traits do HAL
//!
//! Define as interfaces abstratas para hardware.

pub mod clock;
pub mod cpu;
pub mod regs;
pub mod regulator;
pub mod timer;

pub use clock::*;
pub use cpu::*;
pub use regs::*;
pub use regulator::*;
pub use timer::*;
