pub mod tracing;

pub use tracing::{
    get_current_trace_id, init_observability, shutdown_observability, ObservabilityError,
    ObservabilityOptions,
};
