use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dialogtree")]
#[command(about = "Plays and checks scripted dialog trees")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Runs a conversation over stdin/stdout.
    Play(PlayArgs),
    /// Loads a tree and reports dangling references and unresolvable placeholders.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[arg(long = "tree")]
    pub(crate) tree: String,
    #[arg(long = "strict")]
    pub(crate) strict: bool,
    /// `ANSWER_TEXT=URL`; repeatable.
    #[arg(long = "redirect")]
    pub(crate) redirects: Vec<String>,
    #[arg(long = "transcript-json")]
    pub(crate) transcript_json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "tree")]
    pub(crate) tree: String,
}
