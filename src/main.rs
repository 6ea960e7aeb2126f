use std::process::ExitCode;

use versioned_fs::output as out;
use versioned_fs::{cli, FsError};

mod app;
mod logging;

fn main() -> ExitCode {
    match app::run(cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e.downcast_ref::<FsError>().map_or(1, FsError::code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
