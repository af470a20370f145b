//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};

use alsvid_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job, JobId, JobStatus,
};
use alsvid_ir::{Circuit, Instruction, InstructionKind};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local sampling statevector backend.
///
/// Evolves the statevector once per submitted circuit and draws the
/// requested number of shots from the final distribution — valid because
/// the IR only allows terminal measurements. Supports circuits up to
/// ~20 qubits (limited by memory).
pub struct SimulatorBackend {
    name: String,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    rng: Arc<Mutex<StdRng>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings and an
    /// entropy-seeded sampler.
    pub fn new() -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::from_entropy())
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(max_qubits, StdRng::from_entropy())
    }

    /// Create a simulator whose sampling is reproducible from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::seed_from_u64(seed))
    }

    fn build(max_qubits: u32, rng: StdRng) -> Self {
        Self {
            name: "simulator".to_string(),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!(num_qubits, shots, "starting simulation");

        let mut sv = Statevector::new(num_qubits);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        let measure_map = collect_measure_map(circuit);
        debug!(
            gates = circuit.expanded_len(),
            measured = measure_map.len(),
            "statevector evolved"
        );

        let mut counts = Counts::new();
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for _ in 0..shots {
            let outcome = sv.sample(&mut *rng);
            let bitstring = if measure_map.is_empty() {
                sv.outcome_to_bitstring(outcome)
            } else {
                clbit_string(outcome, &measure_map, circuit.num_clbits())
            };
            counts.insert(bitstring, 1);
        }
        drop(rng);

        let elapsed = start.elapsed();
        debug!(?elapsed, "simulation completed");

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn is_available(&self) -> HalResult<bool> {
        Ok(true)
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        let job_id = JobId::random();
        let job = Job::new(job_id.clone(), shots, &self.name);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }

        debug!(%job_id, "submitted job");

        // Run immediately; the backend is local and synchronous.
        let result = self.run_simulation(circuit, shots);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(sim_job) = jobs.get_mut(&job_id.0) {
                sim_job.result = Some(result);
                sim_job.job.transition(JobStatus::Completed);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            if !sim_job.job.status.is_terminal() {
                sim_job.job.transition(JobStatus::Cancelled);
            }
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

/// Collect (qubit, clbit) measurement pairs, recursing into repeats.
fn collect_measure_map(circuit: &Circuit) -> Vec<(usize, usize)> {
    fn walk(inst: &Instruction, map: &mut Vec<(usize, usize)>) {
        match &inst.kind {
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    map.push((q.0 as usize, c.0 as usize));
                }
            }
            InstructionKind::Repeat { body, .. } => {
                for inner in body {
                    walk(inner, map);
                }
            }
            _ => {}
        }
    }
    let mut map = vec![];
    for inst in circuit.instructions() {
        walk(inst, &mut map);
    }
    map
}

/// Render the measured classical register, clbit 0 leftmost.
///
/// Clbits never written by a measurement read as '0'.
fn clbit_string(outcome: usize, measure_map: &[(usize, usize)], num_clbits: usize) -> String {
    let mut bits = vec!['0'; num_clbits];
    for &(qubit, clbit) in measure_map {
        bits[clbit] = if (outcome >> qubit) & 1 == 1 { '1' } else { '0' };
    }
    bits.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{ClbitId, QubitId};

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(backend.is_available().await.unwrap());
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::with_seed(11);

        let circuit = bell_circuit();
        let job_id = backend.submit(&circuit, 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11.
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_partial_measurement_keys_by_clbit() {
        // Measure only qubit 2 of a 3-qubit register into a 1-bit creg.
        let mut circuit = Circuit::with_size("partial", 3, 1);
        circuit.x(QubitId(2)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(2), ClbitId(0)).unwrap();

        let backend = SimulatorBackend::with_seed(3);
        let job_id = backend.submit(&circuit, 200).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        assert_eq!(result.counts.get("1"), 200);
        assert_eq!(result.counts.get("0"), 0);
    }

    #[tokio::test]
    async fn test_seeded_backends_reproduce_counts() {
        let circuit = bell_circuit();

        let a = SimulatorBackend::with_seed(42);
        let b = SimulatorBackend::with_seed(42);
        let ja = a.submit(&circuit, 500).await.unwrap();
        let jb = b.submit(&circuit, 500).await.unwrap();
        let ra = a.result(&ja).await.unwrap();
        let rb = b.result(&jb).await.unwrap();

        assert_eq!(ra.counts.get("00"), rb.counts.get("00"));
        assert_eq!(ra.counts.get("11"), rb.counts.get("11"));
    }

    #[tokio::test]
    async fn test_initialize_and_repeat_circuit() {
        use num_complex::Complex64;
        // Start qubit 0 in |1⟩ via initialize, flip it 3 times → |0⟩.
        let mut flip = Circuit::with_size("flip", 1, 0);
        flip.x(QubitId(0)).unwrap();

        let mut circuit = Circuit::with_size("t", 1, 1);
        circuit
            .initialize(
                vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
                [QubitId(0)],
            )
            .unwrap();
        circuit.repeat(3, flip).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let backend = SimulatorBackend::with_seed(5);
        let job_id = backend.submit(&circuit, 50).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("0"), 50);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);
        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.submit(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::with_size("test", 1, 0);
        let result = backend.submit(&circuit, 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_unknown_job_is_an_error() {
        let backend = SimulatorBackend::new();
        let err = backend.status(&JobId::from("nope")).await;
        assert!(matches!(err, Err(HalError::JobNotFound(_))));
    }
}
