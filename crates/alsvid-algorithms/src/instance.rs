//! Execution context shared by algorithm runs.

use std::sync::Arc;

use alsvid_hal::Backend;

use crate::error::{AlgorithmError, AlgorithmResult};

/// A backend paired with execution settings.
///
/// Algorithms take a `QuantumInstance` instead of a raw backend so shot
/// counts (and any future execution settings) are validated once and
/// travel together. Circuits are submitted exactly as synthesised —
/// transpilation pipelines are out of scope for this workspace.
#[derive(Clone)]
pub struct QuantumInstance {
    backend: Arc<dyn Backend>,
    shots: u32,
}

impl QuantumInstance {
    /// Create an instance; `shots` must be at least 1.
    pub fn new(backend: Arc<dyn Backend>, shots: u32) -> AlgorithmResult<Self> {
        if shots == 0 {
            return Err(AlgorithmError::InvalidShots);
        }
        Ok(Self { backend, shots })
    }

    /// The execution backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Shots per circuit execution.
    pub fn shots(&self) -> u32 {
        self.shots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_hal::{Capabilities, Counts, ExecutionResult, HalResult, JobId, JobStatus};
    use alsvid_ir::Circuit;
    use async_trait::async_trait;

    struct NullBackend(Capabilities);

    #[async_trait]
    impl Backend for NullBackend {
        fn name(&self) -> &str {
            "null"
        }
        fn capabilities(&self) -> &Capabilities {
            &self.0
        }
        async fn is_available(&self) -> HalResult<bool> {
            Ok(true)
        }
        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::from("job"))
        }
        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            Ok(JobStatus::Completed)
        }
        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(Counts::new(), 1))
        }
        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_zero_shots_rejected() {
        let backend = Arc::new(NullBackend(Capabilities::simulator(2)));
        assert!(matches!(
            QuantumInstance::new(backend, 0),
            Err(AlgorithmError::InvalidShots)
        ));
    }

    #[test]
    fn test_accessors() {
        let backend = Arc::new(NullBackend(Capabilities::simulator(2)));
        let instance = QuantumInstance::new(backend, 100).unwrap();
        assert_eq!(instance.shots(), 100);
        assert_eq!(instance.backend().name(), "null");
    }
}
