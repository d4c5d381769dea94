//! Trait de bloco de registradores
//!
//! Palavras de 32 bits em offsets fixos dentro de um bloco de I/O.
//! Não existe acesso a byte.

/// Bloco de registradores de 32 bits
pub trait RegisterBlock: Send + Sync {
    /// Lê o registrador no offset (bytes)
    fn read(&self, offset: usize) -> u32;

    /// Escreve o registrador no offset (bytes)
    fn write(&self, offset: usize, value: u32);

    /// Read-modify-write: limpa `clear`, seta `set`.
    ///
    /// NÃO é atômico em relação ao hardware nem a outras CPUs; quem chama
    /// deve segurar o lock do dono do bloco.
    fn modify(&self, offset: usize, clear: u32, set: u32) {
        let value = (self.read(offset) & !clear) | set;
        self.write(offset, value);
    }
}
