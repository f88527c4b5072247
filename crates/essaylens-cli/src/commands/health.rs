//! The `essaylens health` command.

use anyhow::Result;

use essaylens_core::traits::SubmissionStore;

use super::Settings;

pub async fn execute(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    match store.ping().await {
        Ok(()) => {
            println!("ok: store reachable");
            Ok(())
        }
        Err(e) => {
            println!("degraded: {e}");
            std::process::exit(1);
        }
    }
}
