// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;

use muset::command::pipeline;
use muset::runtime::{self, LogSink};

fn main() -> ExitCode {
    let cmd = match pipeline::Command::try_parse() {
        Ok(cmd) => cmd,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                let _ = runtime::setup_global_logger(false);
                error!("{}", pipeline::intake_error(&e));
                return ExitCode::FAILURE;
            }
        },
    };

    if let Err(e) = runtime::setup_global_logger(cmd.verbose) {
        eprintln!("Error: {}", e);
    }

    if let Err(e) = cmd.try_execute(&mut LogSink) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
