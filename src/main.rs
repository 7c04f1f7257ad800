//! MDR & Offensive Security Scenario Generator CLI

use mdr_scenario::{AppContext, logging, run_with_ctrl_c};

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: file logging unavailable: {}", e);
    }

    let context = AppContext::from_env();
    if let Err(e) = run_with_ctrl_c(std::env::args(), &context).await {
        mdr_scenario::log_error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
