mod args;
mod runner;

pub(crate) use args::{Cli, Commands, PrefAction, StatsAction};
pub(crate) use runner::run;
