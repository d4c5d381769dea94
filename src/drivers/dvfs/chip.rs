//! # Perfis de Chip
//!
//! Uma única máquina de estados serve as duas revisões de SoC. O que muda
//! entre elas fica aqui:
//!
//! | Item               | MX51              | MX37                     |
//! |--------------------|-------------------|--------------------------|
//! | Pontos de operação | 2 (200/665 MHz)   | 8 (ARM_PODF 7..0)        |
//! | Passo              | `Jump`            | `Single`                 |
//! | EMAC               | 0x10              | 0x100                    |
//! | DIV3CK             | 2 @ bit 29        | 3 @ bit 1                |
//! | LTBRSR             | 2                 | 1                        |
//! | LBMI mascarado     | não               | sim                      |
//! | Kick FSM do GPC    | não               | sim                      |

use super::regs::Field;
use super::threshold::{ProfileKind, ThresholdProfile};
use crate::hal::traits::{Hz, MicroVolts};

/// Par (frequência, tensão mínima segura)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingPoint {
    pub rate: Hz,
    pub voltage: MicroVolts,
}

impl OperatingPoint {
    pub const fn new(rate: Hz, voltage: MicroVolts) -> Self {
        Self { rate, voltage }
    }
}

/// Como escolher o próximo ponto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Direto para o mínimo ou máximo
    Jump,
    /// Um ponto da tabela por transição
    Single,
}

/// Descrição de uma revisão de SoC
#[derive(Debug)]
pub struct ChipProfile {
    pub name: &'static str,
    /// Ordenados por frequência crescente, nunca vazio
    pub points: &'static [OperatingPoint],
    pub step: StepPolicy,
    pub stepped_down: ThresholdProfile,
    pub stepped_up: ThresholdProfile,
    /// Posição do campo DIV3CK em DVFSCNTR
    pub div3ck: Field,
    /// Mascara a IRQ de load buffer cheio no start
    pub mask_load_buffer_irq: bool,
    /// Escreve LBFL (w1c) ao fim de cada transição
    pub clear_load_buffer_full: bool,
    /// Dispara a FSM do GPC (STRT/FUPD/HTRI) após mudar o ponto
    pub starts_gpc_fsm: bool,
    /// Primeiro pedido da sessão só é atendido se for de redução.
    ///
    /// A sessão recomeça a cada `start()`, então o primeiro aumento depois
    /// de um re-enable também é ignorado.
    pub ignore_first_increase: bool,
}

// =============================================================================
// TABELAS
// =============================================================================

const MX51_POINTS: [OperatingPoint; 2] = [
    OperatingPoint::new(200_000_000, 775_000),
    OperatingPoint::new(665_000_000, 1_050_000),
];

/// PLL do ARM no MX37
pub const MX37_PLL_RATE: Hz = 532_000_000;

/// ARM_PODF 7..0: rate = PLL / (podf + 1), tensão = 1.0 V - 25 mV * podf
const MX37_POINTS: [OperatingPoint; 8] = [
    OperatingPoint::new(MX37_PLL_RATE / 8, 825_000),
    OperatingPoint::new(MX37_PLL_RATE / 7, 850_000),
    OperatingPoint::new(MX37_PLL_RATE / 6, 875_000),
    OperatingPoint::new(MX37_PLL_RATE / 5, 900_000),
    OperatingPoint::new(MX37_PLL_RATE / 4, 925_000),
    OperatingPoint::new(MX37_PLL_RATE / 3, 950_000),
    OperatingPoint::new(MX37_PLL_RATE / 2, 975_000),
    OperatingPoint::new(MX37_PLL_RATE, 1_000_000),
];

const MX51_PROFILE: ThresholdProfile = ThresholdProfile {
    up_threshold: 25,
    down_threshold: 9,
    panic_threshold: 63,
    up_count: 3,
    down_count: 3,
    div3_clock_select: 2,
    load_tracking_buffer_source: 2,
    ema_samples: 0x10,
};

impl ChipProfile {
    pub const MX51: ChipProfile = ChipProfile {
        name: "mx51",
        points: &MX51_POINTS,
        step: StepPolicy::Jump,
        stepped_down: MX51_PROFILE,
        stepped_up: MX51_PROFILE,
        div3ck: Field::new(0xE000_0000, 29),
        mask_load_buffer_irq: false,
        clear_load_buffer_full: true,
        starts_gpc_fsm: false,
        ignore_first_increase: false,
    };

    pub const MX37: ChipProfile = ChipProfile {
        name: "mx37",
        points: &MX37_POINTS,
        step: StepPolicy::Single,
        stepped_down: ThresholdProfile {
            up_threshold: 53,
            down_threshold: 33,
            panic_threshold: 55,
            up_count: 0x05,
            down_count: 0x0a,
            div3_clock_select: 3,
            load_tracking_buffer_source: 1,
            ema_samples: 0x100,
        },
        stepped_up: ThresholdProfile {
            up_threshold: 31,
            down_threshold: 28,
            panic_threshold: 63,
            up_count: 33,
            down_count: 33,
            div3_clock_select: 3,
            load_tracking_buffer_source: 1,
            ema_samples: 0x100,
        },
        div3ck: Field::new(0x0000_0006, 1),
        mask_load_buffer_irq: true,
        clear_load_buffer_full: false,
        starts_gpc_fsm: true,
        ignore_first_increase: true,
    };

    /// Ponto de menor frequência
    pub fn min_point(&self) -> OperatingPoint {
        self.points[0]
    }

    /// Ponto de maior frequência (e maior tensão)
    pub fn max_point(&self) -> OperatingPoint {
        self.points[self.points.len() - 1]
    }

    /// `rate` é exatamente a frequência mínima da tabela
    pub fn is_min_rate(&self, rate: Hz) -> bool {
        rate == self.min_point().rate
    }

    /// `rate` é exatamente a frequência máxima da tabela
    pub fn is_max_rate(&self, rate: Hz) -> bool {
        rate == self.max_point().rate
    }

    /// Primeiro ponto estritamente acima de `rate`
    pub fn next_above(&self, rate: Hz) -> Option<usize> {
        self.points.iter().position(|point| point.rate > rate)
    }

    /// Último ponto estritamente abaixo de `rate`
    pub fn next_below(&self, rate: Hz) -> Option<usize> {
        self.points.iter().rposition(|point| point.rate < rate)
    }

    /// Perfil de thresholds por tipo
    pub fn profile(&self, kind: ProfileKind) -> &ThresholdProfile {
        match kind {
            ProfileKind::SteppedDown => &self.stepped_down,
            ProfileKind::SteppedUp => &self.stepped_up,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
