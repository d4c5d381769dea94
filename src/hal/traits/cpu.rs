//! Trait de CPU
//!
//! Controle local de interrupções no estilo `local_irq_save/restore`.

/// Estado de interrupções salvo por `irq_save`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqFlags(pub u32);

/// Abstração de CPU
pub trait CpuHal {
    /// Desabilita interrupções e retorna o estado anterior
    fn irq_save() -> IrqFlags;

    /// Restaura o estado salvo por `irq_save`
    fn irq_restore(flags: IrqFlags);

    /// Retorna se interrupções estão habilitadas
    fn interrupts_enabled() -> bool;
}
