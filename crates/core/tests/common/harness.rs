use elfvm_core::common::DEFAULT_REGISTER_COUNT;
use elfvm_core::sim::{Machine, RunOutcome, loader};
use elfvm_core::{Program, Word};
use tracing_subscriber::EnvFilter;

/// `#ip 0`; writes 5 and 6, then falls off the end.
pub const TWO_LOADS: &str = "#ip 0\nseti 5 0 1\nseti 6 0 2\n";

/// Counts `r1` down to zero and halts; `4 * r1 - 1` steps for `r1 >= 1`.
pub const COUNTDOWN: &str = "\
#ip 0
addi 1 -1 1
eqri 1 0 2
addr 0 2 0
seti -1 0 0
";

/// Loops forever with `r1 = (r1 + 1) & 3`, passing address 0 once per lap.
pub const MOD4_COUNTER: &str = "\
#ip 0
addi 1 1 1
bani 1 3 1
seti -1 0 0
";

/// Installs a test log subscriber once; filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub struct TestContext {
    pub program: Program,
    pub registers: Vec<Word>,
}

impl TestContext {
    /// Parses `listing`; registers default to six zeros.
    pub fn new(listing: &str) -> Self {
        init_tracing();
        let program = loader::parse_program(listing).unwrap();
        Self {
            program,
            registers: vec![0; DEFAULT_REGISTER_COUNT],
        }
    }

    pub fn with_registers(mut self, registers: &[Word]) -> Self {
        self.registers = registers.to_vec();
        self
    }

    pub fn machine(&self) -> Machine<'_> {
        Machine::new(&self.program, &self.registers).unwrap()
    }

    /// Runs to completion.
    pub fn run(&self) -> RunOutcome {
        self.machine().run().unwrap()
    }

    /// Ticks a fresh machine `steps` times and returns its registers.
    pub fn step_manually(&self, steps: u64) -> Vec<Word> {
        let mut machine = self.machine();
        for _ in 0..steps {
            let _ = machine.tick().unwrap();
        }
        machine.registers().as_slice().to_vec()
    }
}
