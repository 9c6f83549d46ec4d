//! Logging setup runs once per process, so it gets its own test binary.

use std::path::Path;

use tax_cli::logging::init_logging;

#[test]
fn test_unopenable_log_file_keeps_stderr_logging() {
    let result = init_logging("warn", Some(Path::new("/nonexistent/take-home/run.log")));

    assert!(result.is_ok(), "{result:?}");
    assert!(tracing::dispatcher::has_been_set());
}
