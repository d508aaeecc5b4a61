//! Prometheus counters for runs and rejected inputs, served on `/metrics`.
use kaprekar_core::{ErrorKind, Outcome, Sequence};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    runs: IntCounterVec,
    rejections: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs = IntCounterVec::new(
            Opts::new("kaprekar_runs_total", "Routine runs by outcome"),
            &["outcome"],
        )?;
        let rejections = IntCounterVec::new(
            Opts::new("kaprekar_rejections_total", "Rejected inputs by error kind"),
            &["kind"],
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(rejections.clone()))?;

        Ok(Self {
            registry,
            runs,
            rejections,
        })
    }

    pub fn observe_run(&self, sequence: &Sequence) {
        let outcome = match sequence.outcome {
            Outcome::Converged => "converged",
            Outcome::Exhausted => "exhausted",
        };
        self.runs.with_label_values(&[outcome]).inc();
    }

    pub fn observe_rejection(&self, kind: ErrorKind) {
        self.rejections.with_label_values(&[kind.as_str()]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
