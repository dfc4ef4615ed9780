fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
    std::process::exit(dt_cli::run_cli_from_args(std::env::args_os()));
}
