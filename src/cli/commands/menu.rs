//! Interactive menu command

use libretto::core::aggregator::Scale;
use libretto::core::session::Session;
use libretto::core::store::RecordStore;
use libretto::debug;
use libretto::shell::Shell;
use std::io;

/// Run the menu on stdin/stdout
///
/// # Errors
/// Returns an error message if the console cannot be read or written
pub fn run<S: RecordStore>(session: Session<S>, scale: Scale) -> Result<(), String> {
    debug!("Starting interactive menu");
    let stdin = io::stdin();
    let mut shell = Shell::new(session, stdin.lock(), io::stdout(), scale);
    shell
        .run()
        .map_err(|e| format!("Console error: {e}"))
}
