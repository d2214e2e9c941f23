//! Serial runner for `rspec` suites sharing mutable fixtures.

use std::fmt::Debug;
use std::sync::Arc;

use rspec::block::Suite;
use rspec::{ConfigurationBuilder, Logger, Runner};

/// Runs `suite` one example at a time, stopping at the first failure.
///
/// Fixtures holding a world or an app behind a mutex rely on examples
/// observing each other's ticks in order.
///
/// # Panics
/// Panics if `rspec` rejects the configuration.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid rspec configuration: {err}"));
    let logger = Arc::new(Logger::new(std::io::stdout()));
    Runner::new(config, vec![logger]).run(suite);
}
