pub mod panel;
pub mod terminal;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    /// Interactive terminal UI
    #[default]
    Terminal,
    /// Print the computed scene to stdout and exit
    Print,
}
