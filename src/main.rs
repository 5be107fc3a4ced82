//! Tech Radar - technology radars in the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tech_radar::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
