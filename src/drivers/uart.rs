//! Driver de console UART i.MX (somente transmissão).
//!
//! Implementa `serial::Console` para que os logs do driver saiam pela UART
//! de debug da placa. A UART já vem configurada pelo bootloader; aqui só
//! escrevemos no FIFO de transmissão.

use alloc::boxed::Box;

use super::serial::Console;
use crate::hal::traits::RegisterBlock;

/// Registrador de transmissão
const UTXD: usize = 0x40;
/// Registrador de teste (status do FIFO)
const UTS: usize = 0xB4;
/// UTS: FIFO de transmissão cheio
const UTS_TXFULL: u32 = 1 << 4;

/// Limite de leituras esperando espaço no FIFO
const TX_SPIN_LIMIT: u32 = 100_000;

/// Console sobre uma UART i.MX
pub struct ImxUart {
    regs: Box<dyn RegisterBlock>,
}

impl ImxUart {
    pub fn new(regs: Box<dyn RegisterBlock>) -> Self {
        Self { regs }
    }

    fn tx_full(&self) -> bool {
        self.regs.read(UTS) & UTS_TXFULL != 0
    }
}

impl Console for ImxUart {
    fn write_byte(&self, byte: u8) {
        // Esperar FIFO ter espaço; UART travada descarta o byte
        let mut spins = 0;
        while self.tx_full() {
            spins += 1;
            if spins >= TX_SPIN_LIMIT {
                return;
            }
            ::core::hint::spin_loop();
        }
        self.regs.write(UTXD, byte as u32);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use spin::Mutex;

    #[derive(Clone, Default)]
    struct TxRecorder {
        written: Arc<Mutex<Vec<u32>>>,
        full: bool,
    }

    impl RegisterBlock for TxRecorder {
        fn read(&self, offset: usize) -> u32 {
            if offset == UTS && self.full {
                UTS_TXFULL
            } else {
                0
            }
        }

        fn write(&self, offset: usize, value: u32) {
            assert_eq!(offset, UTXD);
            self.written.lock().push(value);
        }
    }

    #[test]
    fn test_bytes_go_to_utxd() {
        let rec = TxRecorder::default();
        let uart = ImxUart::new(Box::new(rec.clone()));
        for b in b"ok\n" {
            uart.write_byte(*b);
        }
        assert_eq!(*rec.written.lock(), vec![b'o' as u32, b'k' as u32, b'\n' as u32]);
    }

    #[test]
    fn test_stuck_fifo_drops_byte() {
        let rec = TxRecorder { full: true, ..Default::default() };
        let uart = ImxUart::new(Box::new(rec.clone()));
        uart.write_byte(b'x');
        assert!(rec.written.lock().is_empty());
    }
}
