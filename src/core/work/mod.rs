//! Execução diferida
//!
//! Ponte entre o contexto de interrupção (não pode dormir) e o contexto de
//! thread (pode dormir em I2C, regulador e delays).

pub mod delayed;
pub mod workqueue;

pub use delayed::DelayedWork;
pub use workqueue::{QueueFull, WorkItem, WorkQueue};
