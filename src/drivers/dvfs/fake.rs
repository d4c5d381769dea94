//! Placa falsa para testes.
//!
//! Todos os colaboradores (blocos de registradores, clock, regulador e
//! relógio) compartilham um único estado e um log de eventos ordenado com
//! timestamp, o que permite verificar a ordem tensão/frequência e o settle.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::Mutex;

use super::controller::DvfsResources;
use super::engine::TransitionRequest;
use super::regs::{GpcCntr, CNTR_FSVAI, DVFSCNTR, GPC_CNTR};
use crate::hal::traits::{ClockProvider, Hz, MicroVolts, MonotonicClock, RegisterBlock, Regulator};
use crate::hal::HalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Block {
    Dvfs,
    Gpc,
    Ccm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RegWrite { block: Block, offset: usize, value: u32 },
    /// Tentativa de set_rate (registrada mesmo se falhar)
    SetRate(Hz),
    /// Tentativa de set_voltage (registrada mesmo se falhar)
    SetVoltage(MicroVolts),
}

struct BoardState {
    regs: BTreeMap<(Block, usize), u32>,
    rate: Hz,
    voltage: MicroVolts,
    now_us: u64,
    events: Vec<(u64, Event)>,
    fail_rate: bool,
    fail_voltage: bool,
    timer_stalled: bool,
}

#[derive(Clone)]
pub struct FakeBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl FakeBoard {
    /// Placa no ponto mínimo do MX51
    pub fn new() -> Self {
        Self::at(200_000_000, 775_000)
    }

    pub fn at(rate: Hz, voltage: MicroVolts) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoardState {
                regs: BTreeMap::new(),
                rate,
                voltage,
                now_us: 0,
                events: Vec::new(),
                fail_rate: false,
                fail_voltage: false,
                timer_stalled: false,
            })),
        }
    }

    pub fn registers(&self, block: Block) -> FakeRegisters {
        FakeRegisters { board: self.clone(), block }
    }

    pub fn resources(&self) -> DvfsResources {
        DvfsResources {
            dvfs: Box::new(self.registers(Block::Dvfs)),
            gpc: Box::new(self.registers(Block::Gpc)),
            clock: Box::new(FakeClock(self.clone())),
            regulator: Box::new(FakeRegulator(self.clone())),
            timer: Box::new(FakeTimer(self.clone())),
        }
    }

    /// Valor atual de um registrador
    pub fn reg(&self, block: Block, offset: usize) -> u32 {
        self.inner.lock().regs.get(&(block, offset)).copied().unwrap_or(0)
    }

    /// Escrita "do hardware" (não entra no log)
    pub fn set_reg(&self, block: Block, offset: usize, value: u32) {
        self.inner.lock().regs.insert((block, offset), value);
    }

    /// Simula o monitor de carga travando um pedido
    pub fn raise(&self, request: TransitionRequest) {
        let gpc = self.reg(Block::Gpc, GPC_CNTR) | GpcCntr::DVFS0CR.bits();
        self.set_reg(Block::Gpc, GPC_CNTR, gpc);
        let cntr = CNTR_FSVAI.set(self.reg(Block::Dvfs, DVFSCNTR), request.index() as u32);
        self.set_reg(Block::Dvfs, DVFSCNTR, cntr);
    }

    pub fn rate(&self) -> Hz {
        self.inner.lock().rate
    }

    pub fn voltage(&self) -> MicroVolts {
        self.inner.lock().voltage
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().events.iter().map(|(_, event)| *event).collect()
    }

    pub fn timed_events(&self) -> Vec<(u64, Event)> {
        self.inner.lock().events.clone()
    }

    pub fn clear_events(&self) {
        self.inner.lock().events.clear();
    }

    /// Só chamadas de clock e regulador
    pub fn hw_calls(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, Event::SetRate(_) | Event::SetVoltage(_)))
            .collect()
    }

    /// Escritas num bloco
    pub fn writes(&self, block: Block) -> Vec<(usize, u32)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::RegWrite { block: b, offset, value } if b == block => Some((offset, value)),
                _ => None,
            })
            .collect()
    }

    pub fn set_fail_rate(&self, fail: bool) {
        self.inner.lock().fail_rate = fail;
    }

    pub fn set_fail_voltage(&self, fail: bool) {
        self.inner.lock().fail_voltage = fail;
    }

    pub fn stall_timer(&self, stalled: bool) {
        self.inner.lock().timer_stalled = stalled;
    }

    fn record(state: &mut BoardState, event: Event) {
        let now = state.now_us;
        state.events.push((now, event));
    }
}

pub struct FakeRegisters {
    board: FakeBoard,
    block: Block,
}

impl RegisterBlock for FakeRegisters {
    fn read(&self, offset: usize) -> u32 {
        self.board.reg(self.block, offset)
    }

    fn write(&self, offset: usize, value: u32) {
        let mut state = self.board.inner.lock();
        state.regs.insert((self.block, offset), value);
        FakeBoard::record(&mut state, Event::RegWrite { block: self.block, offset, value });
    }
}

pub struct FakeClock(FakeBoard);

impl ClockProvider for FakeClock {
    fn get_rate(&self) -> Hz {
        self.0.rate()
    }

    fn set_rate(&self, rate: Hz) -> Result<(), HalError> {
        let mut state = self.0.inner.lock();
        FakeBoard::record(&mut state, Event::SetRate(rate));
        if state.fail_rate {
            return Err(HalError::Rejected);
        }
        state.rate = rate;
        Ok(())
    }
}

pub struct FakeRegulator(FakeBoard);

impl Regulator for FakeRegulator {
    fn get_voltage(&self) -> MicroVolts {
        self.0.voltage()
    }

    fn set_voltage(&self, uv: MicroVolts) -> Result<(), HalError> {
        let mut state = self.0.inner.lock();
        FakeBoard::record(&mut state, Event::SetVoltage(uv));
        if state.fail_voltage {
            return Err(HalError::Rejected);
        }
        state.voltage = uv;
        Ok(())
    }
}

/// Avança 1 us a cada leitura (a menos que esteja parado)
pub struct FakeTimer(pub FakeBoard);

impl MonotonicClock for FakeTimer {
    fn now_us(&self) -> u64 {
        let mut state = self.0.inner.lock();
        let now = state.now_us;
        if !state.timer_stalled {
            state.now_us += 1;
        }
        now
    }
}
