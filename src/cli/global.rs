use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Suppress informational output and warnings
    #[arg(short = 'q', long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Log pipeline progress to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log every pipeline stage to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Extra alphabets/settings file, applied after the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}
