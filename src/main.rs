#[tokio::main]
async fn main() {
    if let Err(err) = jira_people_bridge::run().await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
