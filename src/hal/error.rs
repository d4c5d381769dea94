//! Tipos de Erro do HAL
//!
//! Falhas reportadas pelos colaboradores (clock, regulador).

/// Erros de colaboradores de hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Valor pedido fora da faixa suportada
    OutOfRange,
    /// O dispositivo recusou o pedido
    Rejected,
    /// Dispositivo ocupado
    Busy,
    /// Handshake com o hardware não completou a tempo
    Timeout,
    /// Frequência não representável pelo divisor
    InvalidRate,
}

impl HalError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "valor fora da faixa",
            Self::Rejected => "pedido recusado pelo dispositivo",
            Self::Busy => "dispositivo ocupado",
            Self::Timeout => "timeout no handshake",
            Self::InvalidRate => "frequência não representável",
        }
    }
}

impl ::core::fmt::Display for HalError {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<crate::core::time::Timeout> for HalError {
    fn from(_: crate::core::time::Timeout) -> Self {
        Self::Timeout
    }
}
