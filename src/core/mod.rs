//! Core Module
//!
//! Infraestrutura independente de hardware usada pelo driver:
//! logging, execução diferida e medição de tempo.

pub mod logging;
pub mod time;
pub mod work;
