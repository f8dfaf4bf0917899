use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One page of the character catalogue.
    Browse {
        /// Part of the character name, any case.
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        species: Option<String>,

        /// Counted from 1.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Catalogue session driven by commands on stdin.
    Interactive,

    /// Character detail with the episodes it appears in.
    Character { id: u32 },

    /// Every episode. Each `--expand` toggles that episode's characters.
    Episodes {
        #[arg(long)]
        expand: Vec<u32>,
    },

    /// Two characters side by side.
    Compare { first: u32, second: u32 },

    Locations,
}
