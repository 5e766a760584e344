use clap::Subcommand;

use super::config::ConfigArgs;
use super::fill::FillArgs;
use super::listen::ListenArgs;

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Fill every form control on a page once
    Fill(FillArgs),

    /// Read fill triggers as JSON lines from stdin and answer on stdout
    Listen(ListenArgs),

    /// Inspect or validate the configuration
    Config(ConfigArgs),
}
