//! Tipos de Erro do Driver DVFS

use crate::hal::HalError;

/// Erros do driver DVFS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DvfsError {
    /// Regulador recusou a tensão
    RegulatorRejected,
    /// Clock recusou a frequência
    ClockRejected,
    /// Tensão não estabilizou no prazo
    SettleTimeout,
    /// Entrada do atributo de controle inválida
    InvalidInput,
}

impl DvfsError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegulatorRejected => "regulador recusou a tensão",
            Self::ClockRejected => "clock recusou a frequência",
            Self::SettleTimeout => "tensão não estabilizou no prazo",
            Self::InvalidInput => "entrada inválida",
        }
    }

    /// Mapeia a falha de um colaborador de clock
    pub fn from_clock(_err: HalError) -> Self {
        Self::ClockRejected
    }

    /// Mapeia a falha de um regulador
    pub fn from_regulator(_err: HalError) -> Self {
        Self::RegulatorRejected
    }
}

impl ::core::fmt::Display for DvfsError {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<crate::core::time::Timeout> for DvfsError {
    fn from(_: crate::core::time::Timeout) -> Self {
        Self::SettleTimeout
    }
}

/// Tipo Result específico do driver DVFS
pub type DvfsResult<T> = Result<T, DvfsError>;
