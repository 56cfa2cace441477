/*!
 * Monitoring
 * Structured logging and run tracing
 */

mod tracer;

pub use tracer::{generate_run_id, init_tracing, RunSpan};
