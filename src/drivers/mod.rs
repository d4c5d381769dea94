//! # Driver Layer
//!
//! | Driver   | Arquivo      | Papel |
//! |----------|--------------|-------|
//! | Serial   | `serial.rs`  | Destino dos macros de log |
//! | UART     | `uart.rs`    | Console i.MX (MMIO) para a serial |
//! | CCM      | `ccm.rs`     | Clock ARM via divisor ARM_PODF (i.MX37) |
//! | DVFS     | `dvfs/`      | Controlador DVFS core |
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ dvfs::DvfsCore                               │
//! │  irq ──► work ──► engine ──► threshold       │
//! └──────┬──────────────┬──────────────┬─────────┘
//!        │ RegisterBlock │ ClockProvider│ Regulator
//!        ▼               ▼              ▼
//!   DVFS/GPC MMIO     ccm / cpu_clk   PMIC (SW1/DCDC1)
//! ```

pub mod ccm;
pub mod dvfs;
pub mod serial;
pub mod uart;
