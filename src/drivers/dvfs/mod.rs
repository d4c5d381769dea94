//! # Driver DVFS Core (i.MX)
//!
//! | Arquivo         | Papel |
//! |-----------------|-------|
//! | `regs.rs`       | Offsets e campos dos blocos DVFS, GPC e CCM |
//! | `chip.rs`       | Tabelas por SoC (MX51, MX37) |
//! | `threshold.rs`  | Thresholds/contadores do monitor de carga |
//! | `controller.rs` | `DvfsCore`: probe, start, stop, contadores |
//! | `irq.rs`        | Handler de IRQ (mascara e agenda) |
//! | `engine.rs`     | Motor de transição (decide e aplica) |
//! | `attr.rs`       | Atributos de texto enable/status |
//!
//! ## Uso
//!
//! ```text
//! let core = DvfsCore::probe(config::DEFAULT_CHIP, resources, queue);
//! core.start();
//! // IRQ config::DVFS_CORE_IRQ (GPC):  core.on_interrupt();
//! // worker da fila:                   queue.process_all();
//! ```

pub mod attr;
pub mod chip;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod irq;
pub mod regs;
pub mod threshold;

#[cfg(test)]
pub(crate) mod fake;

pub use chip::{ChipProfile, OperatingPoint, StepPolicy};
pub use controller::{ControllerState, DvfsCore, DvfsResources, DvfsStats};
pub use engine::{TransitionOutcome, TransitionRequest};
pub use error::{DvfsError, DvfsResult};
pub use irq::IrqReturn;
pub use threshold::{apply_profile, ProfileKind, ThresholdProfile};
