//! Machine: one interpreter run over a program.
//!
//! The machine owns the register file, the program counter and the run
//! statistics. It is a two-state machine (`Running`, `Halted`): every
//! [`tick`](Machine::tick) fetches the instruction at `pc`, mirrors `pc` into
//! the ip-bound register, executes, and takes the next `pc` from that register
//! plus one. An instruction that writes the ip-bound register therefore jumps.

use tracing::{debug, trace};

use super::cycle::{CycleDetector, CycleOutcome, Watch};
use crate::common::{RegisterFile, Result, Word};
use crate::isa::Program;
use crate::stats::ExecStats;

/// Execution state of a [`Machine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineState {
    /// `pc` addresses an instruction.
    Running,
    /// `pc` left the program; no further steps are possible.
    Halted,
}

/// Registers and progress at the point a run stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Register values when the run stopped.
    pub registers: Vec<Word>,
    /// Instructions executed.
    pub steps: u64,
    /// Whether the program halted (as opposed to hitting a step limit).
    pub halted: bool,
}

/// Interpreter state for one run of a program.
#[derive(Debug)]
pub struct Machine<'p> {
    program: &'p Program,
    regs: RegisterFile,
    pc: Word,
    state: MachineState,
    stats: ExecStats,
}

impl<'p> Machine<'p> {
    /// Prepares a run of `program` from `initial` registers.
    ///
    /// The register file has exactly `initial.len()` registers. The first `pc`
    /// is read from the ip-bound register, or is `0` without a binding.
    ///
    /// # Arguments
    ///
    /// * `program` - The program to run; validated against `initial.len()`.
    /// * `initial` - Starting register values.
    ///
    /// # Returns
    ///
    /// A machine that is already `Halted` if the first `pc` lies outside the
    /// program, and `Running` otherwise.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`](crate::common::VmError::RegisterIndexOutOfRange)
    /// if the ip binding or any operand does not fit the register file.
    pub fn new(program: &'p Program, initial: &[Word]) -> Result<Self> {
        program.validate(initial.len())?;
        let regs = RegisterFile::from_slice(initial);
        let pc = match program.ip_register() {
            Some(ip) => regs.read(ip as Word)?,
            None => 0,
        };
        let mut machine = Self {
            program,
            regs,
            pc,
            state: MachineState::Running,
            stats: ExecStats::default(),
        };
        machine.state = machine.state_at(pc);
        Ok(machine)
    }

    /// Executes one instruction and returns the resulting state.
    ///
    /// A halted machine stays halted and counts no step.
    ///
    /// # Errors
    ///
    /// Only register range errors, which validation in [`Machine::new`] rules out.
    pub fn tick(&mut self) -> Result<MachineState> {
        let Some(instruction) = self.program.fetch(self.pc) else {
            self.state = MachineState::Halted;
            return Ok(self.state);
        };
        let ip = self.program.ip_register().map(|ip| ip as Word);
        if let Some(ip) = ip {
            self.regs.write(ip, self.pc)?;
        }
        instruction.execute(&mut self.regs)?;
        self.stats.record(instruction.op);
        trace!(pc = self.pc, %instruction, regs = %self.regs, "step");

        self.pc = match ip {
            Some(ip) => {
                let next = self.regs.read(ip)?.wrapping_add(1);
                self.regs.write(ip, next)?;
                next
            }
            None => self.pc.wrapping_add(1),
        };
        self.state = self.state_at(self.pc);
        if self.state == MachineState::Halted {
            debug!(pc = self.pc, steps = self.stats.steps, "halted");
        }
        Ok(self.state)
    }

    /// Runs until the program halts.
    ///
    /// # Errors
    ///
    /// See [`tick`](Self::tick).
    pub fn run(&mut self) -> Result<RunOutcome> {
        while self.tick()? == MachineState::Running {}
        Ok(self.outcome())
    }

    /// Runs until the program halts or `max_steps` more instructions have
    /// executed, whichever comes first.
    ///
    /// # Errors
    ///
    /// See [`tick`](Self::tick).
    pub fn run_for(&mut self, max_steps: u64) -> Result<RunOutcome> {
        for _ in 0..max_steps {
            if self.tick()? == MachineState::Halted {
                break;
            }
        }
        if self.state == MachineState::Running {
            debug!(pc = self.pc, steps = self.stats.steps, "step limit reached");
        }
        Ok(self.outcome())
    }

    /// Runs until the signature observed at the watched address repeats.
    ///
    /// The signature is captured each time `pc` equals `watch.address`, before
    /// that instruction executes.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`](crate::common::VmError::RegisterIndexOutOfRange)
    /// if the signature names a register outside the file, and
    /// [`VmError::EmptySignature`](crate::common::VmError::EmptySignature) if it
    /// names no register at all.
    pub fn run_until_cycle(&mut self, watch: &Watch) -> Result<CycleOutcome> {
        watch.signature.validate(self.regs.len())?;
        let mut detector = CycleDetector::new();
        let start = self.stats.steps;
        loop {
            if self.state == MachineState::Halted {
                return Ok(CycleOutcome::Halted(self.outcome()));
            }
            if self.pc == watch.address {
                self.stats.watch_hits += 1;
                let signature = watch.signature.capture(&self.regs)?;
                if let Some(report) = detector.observe(signature) {
                    debug!(
                        steps = self.stats.steps,
                        warm_up = report.warm_up,
                        period = report.period,
                        "signature repeated"
                    );
                    return Ok(CycleOutcome::Repeated(report.at_step(self.stats.steps)));
                }
            }
            // The cap counts executed instructions; observing the watched address is free.
            if watch
                .step_limit
                .is_some_and(|limit| self.stats.steps - start >= limit)
            {
                return Ok(CycleOutcome::StepLimit(self.outcome()));
            }
            let _ = self.tick()?;
        }
    }

    /// Current register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Address of the next instruction.
    pub const fn pc(&self) -> Word {
        self.pc
    }

    /// Current execution state.
    pub const fn state(&self) -> MachineState {
        self.state
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// Snapshot of registers and progress.
    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            registers: self.regs.as_slice().to_vec(),
            steps: self.stats.steps,
            halted: self.state == MachineState::Halted,
        }
    }

    fn state_at(&self, pc: Word) -> MachineState {
        if self.program.fetch(pc).is_some() {
            MachineState::Running
        } else {
            MachineState::Halted
        }
    }
}
