use anyhow::Result;
use tasker_core::repository::Store;
use tasker_core::tasker::Tasker;

use crate::views::table::cadence_label;

/// Prints the registered cadences, shortest period first.
pub fn list_cadences<S: Store>(tasker: &Tasker<S>) -> Result<()> {
    let registry = tasker.registry();
    println!("Available cadences:");
    for (position, id) in registry.ids().into_iter().enumerate() {
        let period = registry.approximate_period(id)?;
        println!("  {}. {} (~{} days)", position + 1, cadence_label(id), period);
    }
    Ok(())
}
