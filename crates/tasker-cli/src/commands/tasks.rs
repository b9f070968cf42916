use anyhow::Result;
use tasker_core::repository::Store;
use tasker_core::tasker::Tasker;

use crate::views::table::display_tasks;

pub async fn list_tasks<S: Store>(tasker: &Tasker<S>) -> Result<()> {
    let tasks = tasker.list_tasks().await?;
    display_tasks(&tasks);
    Ok(())
}
