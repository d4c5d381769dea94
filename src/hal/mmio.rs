//! Região MMIO real
//!
//! Implementa `RegisterBlock` sobre um endereço base mapeado, usando
//! acessos voláteis para que o compilador não funda nem elimine leituras.

use ::core::ptr::NonNull;
use volatile::VolatilePtr;

use super::traits::RegisterBlock;

/// Região de registradores mapeada em memória
#[derive(Debug)]
pub struct MmioRegion {
    base: NonNull<u32>,
    size: usize,
}

// SAFETY: A região é I/O de dispositivo; a serialização é responsabilidade
// do dono (lock do driver), como em qualquer bloco MMIO do kernel.
unsafe impl Send for MmioRegion {}
unsafe impl Sync for MmioRegion {}

impl MmioRegion {
    /// Cria a região.
    ///
    /// # Safety
    ///
    /// `base` deve apontar para `size` bytes de registradores mapeados,
    /// alinhados a 4 bytes, válidos durante toda a vida da região.
    pub unsafe fn new(base: NonNull<u32>, size: usize) -> Self {
        Self { base, size }
    }

    /// Tamanho da janela em bytes
    pub fn size(&self) -> usize {
        self.size
    }

    fn reg(&self, offset: usize) -> VolatilePtr<'_, u32> {
        assert!(
            offset % 4 == 0 && offset + 4 <= self.size,
            "offset MMIO inválido"
        );
        // SAFETY: offset validado contra o tamanho da janela
        unsafe { VolatilePtr::new(NonNull::new_unchecked(self.base.as_ptr().add(offset / 4))) }
    }
}

impl RegisterBlock for MmioRegion {
    fn read(&self, offset: usize) -> u32 {
        self.reg(offset).read()
    }

    fn write(&self, offset: usize, value: u32) {
        self.reg(offset).write(value);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mmio_over_ram() {
        let mut backing = [0u32; 4];
        let base = NonNull::new(backing.as_mut_ptr()).unwrap();
        let region = unsafe { MmioRegion::new(base, 16) };

        region.write(0x8, 0xDEAD_BEEF);
        assert_eq!(region.read(0x8), 0xDEAD_BEEF);

        region.modify(0x8, 0xFFFF_0000, 0x0001_0000);
        assert_eq!(region.read(0x8), 0x0001_BEEF);
        assert_eq!(region.read(0x0), 0);
    }

    #[test]
    #[should_panic]
    fn test_mmio_rejects_out_of_window() {
        let mut backing = [0u32; 2];
        let base = NonNull::new(backing.as_mut_ptr()).unwrap();
        let region = unsafe { MmioRegion::new(base, 8) };
        region.read(0x8);
    }
}
