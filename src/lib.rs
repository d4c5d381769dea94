//! MXC DVFS: Driver do controlador DVFS core dos SoCs Freescale i.MX.
//!
//! Ponto central de exportação dos módulos do driver.
//!
//! O controlador observa a carga da CPU em hardware e pede, via interrupção,
//! aumento ou redução de frequência. O driver decide o novo ponto de operação
//! e sequencia voltagem e clock na ordem segura.
//!
//! ```text
//! load monitor (HW) → IRQ → irq::on_interrupt (mask + schedule)
//!                          → engine::run_transition (decide, aplica, reprograma, unmask)
//!                          → load monitor (HW)
//! ```

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (Arc/Box/VecDeque)
extern crate alloc;

// --- Módulos de Baixo Nível (Hardware) ---
pub mod arch; // Controle de interrupções da CPU
pub mod hal; // Traits de colaboradores (MMIO, clock, regulador, timer)

// --- Módulos Centrais ---
pub mod core; // Logging, trabalho diferido, deadlines
pub mod sync; // Spinlock irq-safe

// --- Drivers ---
pub mod drivers; // Serial, CCM, DVFS core

// Re-exportar a API principal do driver
pub use crate::drivers::dvfs::{
    ChipProfile, ControllerState, DvfsCore, DvfsError, DvfsResources, DvfsResult,
    TransitionRequest,
};
