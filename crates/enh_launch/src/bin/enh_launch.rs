//! Speech enhancement recipe launcher
//!
//! Usage:
//!   enh_launch                          # run every stage of ./enh.sh
//!   enh_launch --stage 3 --stop_stage 5 # extra arguments go to enh.sh as-is
//!
//! Set RUST_LOG=info to see the full command line before it runs.

use enh_launch::{Launcher, PassthroughArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::init_from_env(env);

    let passthrough = PassthroughArgs::from_env();

    let launcher = match Launcher::builtin() {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to load recipe: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    // The pipeline shares our process group and gets the terminal's Ctrl+C
    // itself; stay alive so its exit status is the one we report.
    if let Err(e) = ctrlc::set_handler(|| {
        log::info!("Received Ctrl+C, waiting for pipeline to exit...");
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    match launcher.run(passthrough).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
