//! Alsvid backend abstraction layer.
//!
//! A unified interface for executing circuits against sampling backends:
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] to describe what a backend can run
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example
//!
//! ```ignore
//! use alsvid_hal::Backend;
//! use alsvid_adapter_sim::SimulatorBackend;
//! use alsvid_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = SimulatorBackend::new();
//!     let circuit = Circuit::with_size("empty", 1, 0);
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("counts: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::Backend;
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
