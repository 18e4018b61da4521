mod browse;
mod locale;
mod shell;
mod show;
mod source;

use clap::{Parser, Subcommand};

use crate::cli::{browse::BrowseArgs, show::ShowArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the view encoded in the address once.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),

    /// Browse the views interactively, with back and forward navigation.
    #[clap(name = "browse")]
    Browse(Box<BrowseArgs>),
}

impl Command {
    pub async fn run(self) -> crate::prelude::Result {
        match self {
            Self::Show(args) => (*args).run().await,
            Self::Browse(args) => (*args).run().await,
        }
    }
}
