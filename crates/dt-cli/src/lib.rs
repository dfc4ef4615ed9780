use std::ffi::OsString;
use std::io;

use clap::Parser;
use dt_core::DialogTreeError;

mod check;
mod cli_args;
mod error_map;
mod line_tui;
mod models;
mod source_loader;

pub(crate) use cli_args::{CheckArgs, Cli, Mode, PlayArgs};
pub(crate) use error_map::{
    emit_error, map_cli_json, map_cli_source_path, map_cli_source_read, map_tui_io,
};
pub(crate) use models::{CheckReport, PlayCommandAction, HELP_LINE};
pub(crate) use source_loader::FileTreeSource;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, DialogTreeError> {
    match cli.command {
        Mode::Play(args) => line_tui::run_play(args),
        Mode::Check(args) => check::run_check(args, &mut io::stdout()),
    }
}
