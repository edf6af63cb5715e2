use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ptrstyle")]
#[command(version)]
#[command(about = "Move pointer and reference markers next to their type (Type *name -> Type* name)")]
#[command(long_about = "ptrstyle rewrites C/C++ declarations such as `JSObject *obj` into
`JSObject* obj`, leaving multiplication, logical AND, compound assignment,
comment prose, string literals, and template closers untouched.

A built-in regression corpus runs before anything else. If any case fails,
no file is touched.

EXAMPLES:
  ptrstyle --tree                       Restyle every selected tracked file
  ptrstyle --tree --dry-run --diff      Preview the changes for the tree
  ptrstyle --files js/src/jsapi.cpp     Restyle specific files
  ptrstyle config --show                Show the effective configuration")]
pub struct Cli {
    /// Restyle every tracked file that passes the [selection] rules
    #[arg(long, conflicts_with = "files")]
    #[arg(help = "Restyle every tracked file that passes the [selection] rules\nRun from the repository root")]
    pub tree: bool,

    /// Files to restyle
    #[arg(long, value_name = "FILE", num_args = 1..)]
    #[arg(help = "Restyle the given files (no [selection] filtering)")]
    pub files: Vec<PathBuf>,

    /// Dry run mode (compute changes without writing)
    #[arg(short = 'd', long = "dry-run", alias = "dryrun")]
    #[arg(help = "Process the files without updating them")]
    pub dry_run: bool,

    /// Print the changed lines of every file
    #[arg(long)]
    pub diff: bool,

    /// Number of context lines to show with --diff
    #[arg(short = 'n', long, value_name = "NUM")]
    #[arg(help = "Number of context lines to show around changes with --diff\nOverrides [processing] context_lines")]
    pub context: Option<usize>,

    /// Worker threads
    #[arg(short = 'j', long, value_name = "N")]
    #[arg(help = "Number of worker threads (0 = one per CPU)\nOverrides [processing] jobs")]
    pub jobs: Option<usize>,

    /// Configuration file
    #[arg(long, value_name = "PATH", global = true)]
    #[arg(help = "Read configuration from PATH instead of ~/.ptrstyle/config.toml")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or create the configuration file
    #[command(long_about = "Show or create the ptrstyle configuration file.

CONFIGURATION OPTIONS:
  [selection]
    extensions = [\".h\", \".cpp\"]       # File suffixes restyled by --tree
    directories = [\"js/src\", ...]     # Path prefixes restyled by --tree
    blacklist = [\"js/src/ctypes/libffi\"]

  [tree]
    vcs = \"auto\"                      # auto, git, or hg

  [processing]
    jobs = 0                          # Worker threads (0 = one per CPU)
    context_lines = 3                 # Context lines with --diff (max 10)

  [logging]
    debug = false                     # Append logs to ~/.ptrstyle/ptrstyle.log

EXAMPLES:
  ptrstyle config --show              Show the effective configuration
  ptrstyle config --init              Write a commented default file")]
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        /// Write the commented default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Only run the regression corpus
    SelfTest,
    Tree,
    Files(Vec<PathBuf>),
    Config { show: bool, init: bool, force: bool },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.command {
            Some(Commands::Config { show, init, force }) => Mode::Config {
                show: *show,
                init: *init,
                force: *force,
            },
            None if self.tree => Mode::Tree,
            None if !self.files.is_empty() => Mode::Files(self.files.clone()),
            None => Mode::SelfTest,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
