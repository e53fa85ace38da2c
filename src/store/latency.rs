// Simulated latency - artificial delay awaited before each repository and
// service operation resolves. Pure demo behavior with no semantic effect:
// the delay exercises asynchronous caller states and nothing else, so tests
// run with it disabled.

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Operation class, scaling the nominal delay the way the original mock
/// services used shorter delays for point reads than for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Read,
    Query,
    Write,
}

impl OpClass {
    fn nominal_ms(self) -> u64 {
        match self {
            OpClass::Read => 200,
            OpClass::Query => 275,
            OpClass::Write => 375,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Disabled,
    /// Same delay for every operation class.
    Fixed(u64),
    /// Per-class nominal delay scaled by `scale` with +/-25% jitter.
    Jittered { scale: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct Latency {
    mode: Mode,
}

impl Latency {
    pub fn disabled() -> Self {
        Self {
            mode: Mode::Disabled,
        }
    }

    pub fn fixed(ms: u64) -> Self {
        Self {
            mode: Mode::Fixed(ms),
        }
    }

    pub fn jittered(scale: f64) -> Self {
        Self {
            mode: Mode::Jittered { scale },
        }
    }

    pub async fn simulate(&self, class: OpClass) {
        let ms = match self.mode {
            Mode::Disabled => return,
            Mode::Fixed(ms) => ms,
            Mode::Jittered { scale } => {
                let jitter = rand::rng().random_range(0.75..1.25);
                (class.nominal_ms() as f64 * scale * jitter) as u64
            }
        };
        sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::jittered(1.0)
    }
}
