// =============================================================================
// DRIVER LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do driver DVFS com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Apenas strings literais + valor hexadecimal
// - SEM alocação
// - Escreve APENAS no console serial instalado (drivers::serial)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Falhas de regulador/clock durante uma transição
// - WARN:  Situações suspeitas mas recuperáveis (IRQ espúria, limites)
// - INFO:  Start/stop do controlador
// - DEBUG: Decisões do motor de transição
// - TRACE: Detalhes extremos (cada escrita de registrador)
//
// COMO USAR:
//   kinfo!("(DVFS) Iniciado");                 // Apenas string
//   kerror!("(DVFS) Regulador recusou uV=", uv); // String + hex
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[OK]\x1b[0m ";

// =============================================================================
// MACRO INTERNA DE EMISSÃO
// =============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __kemit {
    ($prefix:expr, $msg:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_ERROR, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__kemit!($crate::core::logging::P_ERROR, $msg, $val)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_WARN, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__kemit!($crate::core::logging::P_WARN, $msg, $val)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_INFO, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__kemit!($crate::core::logging::P_INFO, $msg, $val)
    };
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    any(feature = "log_debug", feature = "log_trace"),
    not(feature = "no_logs")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_DEBUG, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__kemit!($crate::core::logging::P_DEBUG, $msg, $val)
    };
}

#[cfg(not(all(
    any(feature = "log_debug", feature = "log_trace"),
    not(feature = "no_logs")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(feature = "log_trace", not(feature = "no_logs")))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_TRACE, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__kemit!($crate::core::logging::P_TRACE, $msg, $val)
    };
}

#[cfg(not(all(feature = "log_trace", not(feature = "no_logs"))))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK)
// =============================================================================

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {
        $crate::__kemit!($crate::core::logging::P_OK, $msg)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}
