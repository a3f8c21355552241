//! Background Tasks Module
//!
//! - Expiry sweep: purges expired entries from every façade at the
//!   configured interval

mod cleanup;

pub use cleanup::{run_cleanup_pass, spawn_cleanup_task};
