//! Saída serial do driver (destino dos macros de log).
//!
//! Os macros `k*!` escrevem aqui. A serial não sabe nada de hardware: ela
//! repassa os bytes para o `Console` instalado no boot (ex: `uart::ImxUart`).
//! Antes da instalação, toda saída é descartada.

use spin::Once;

/// Destino de bytes de log
pub trait Console: Send + Sync {
    /// Escreve um byte (pode bloquear até o FIFO aceitar)
    fn write_byte(&self, byte: u8);
}

/// Console global (instalado uma única vez)
static CONSOLE: Once<&'static dyn Console> = Once::new();

/// Instala o console de log.
///
/// Retorna `false` se já havia um console instalado (o primeiro vence).
pub fn install(console: &'static dyn Console) -> bool {
    let mut installed = false;
    CONSOLE.call_once(|| {
        installed = true;
        console
    });
    installed
}

/// Retorna se há console instalado
pub fn is_installed() -> bool {
    CONSOLE.get().is_some()
}

/// Envia um byte
#[inline]
pub fn emit(byte: u8) {
    if let Some(console) = CONSOLE.get() {
        console.write_byte(byte);
    }
}

/// Envia uma string
pub fn emit_str(s: &str) {
    if let Some(console) = CONSOLE.get() {
        for byte in s.bytes() {
            console.write_byte(byte);
        }
    }
}

/// Envia "0x" + valor hexadecimal sem zeros à esquerda
pub fn emit_hex(value: u64) {
    let Some(console) = CONSOLE.get() else {
        return;
    };

    let mut buf = [0u8; 18];
    let len = format_hex(value, &mut buf);
    for &byte in &buf[..len] {
        console.write_byte(byte);
    }
}

/// Envia CRLF
pub fn emit_nl() {
    emit(b'\r');
    emit(b'\n');
}

/// Formata `value` como "0x..." em `buf`, retornando o tamanho usado.
fn format_hex(value: u64, buf: &mut [u8; 18]) -> usize {
    buf[0] = b'0';
    buf[1] = b'x';

    // Quantidade de nibbles significativos (mínimo 1)
    let nibbles = if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() as usize + 3) / 4
    };

    for i in 0..nibbles {
        let shift = (nibbles - 1 - i) * 4;
        let digit = ((value >> shift) & 0xF) as u8;
        buf[2 + i] = if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        };
    }

    2 + nibbles
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: u64) -> String {
        let mut buf = [0u8; 18];
        let len = format_hex(value, &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(hex(0), "0x0");
        assert_eq!(hex(0x1F), "0x1F");
        assert_eq!(hex(1_050_000), "0x100590");
        assert_eq!(hex(u64::MAX), "0xFFFFFFFFFFFFFFFF");
    }
}
