use dt_core::{DialogTreeError, ErrorKind};
use std::fmt::Display;

fn map_error(kind: ErrorKind, code: &'static str, error: impl Display) -> DialogTreeError {
    DialogTreeError::new(kind, code, error.to_string())
}

pub(crate) fn emit_error(error: DialogTreeError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_tui_io(error: std::io::Error) -> DialogTreeError {
    map_error(ErrorKind::State, "TUI_IO", error)
}

pub(crate) fn map_cli_source_path(error: std::io::Error) -> DialogTreeError {
    map_error(ErrorKind::Load, "CLI_SOURCE_PATH", error)
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> DialogTreeError {
    map_error(ErrorKind::Load, "CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_json(error: serde_json::Error) -> DialogTreeError {
    map_error(ErrorKind::State, "CLI_JSON", error)
}
