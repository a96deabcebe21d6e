use octoparse_client::prelude::*;
use std::time::Duration;

/// Lists the task groups and tasks of the account, then downloads the data of
/// the task given as first argument.
///
/// ```text
/// cargo run --example task_data -- <task-id>
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let config = Config::new();
    let page_size = config.page_size;
    info!("Using the {} API at {}", config.api_tier, config.rest_api.base_url);

    // Logs in, refreshes or reuses the stored token as needed
    let client = Client::new(config).await?;

    let groups = client.list_task_groups().await?;
    println!("{}", task_groups_table(&groups.data));
    for group in &groups.data {
        let tasks = client.list_tasks_in_group(group.task_group_id).await?;
        info!("Group {}: {} tasks", group.task_group_name, tasks.data.len());
        println!("{}", tasks_table(&tasks.data));
    }

    let Some(task_id) = std::env::args().nth(1) else {
        info!("No task id given, done");
        return Ok(());
    };

    let running = client
        .poll_task_activity(
            &task_id,
            DEFAULT_POLL_SAMPLE_SIZE,
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        )
        .await?;
    if running {
        warn!("Task {} is still extracting, the data may be incomplete", task_id);
    }

    let rows = client.fetch_all_data(&task_id, page_size, 0).await?;
    info!("Fetched {} rows of task {}", rows.len(), task_id);
    println!("{}", rows_table(&rows));

    Ok(())
}
