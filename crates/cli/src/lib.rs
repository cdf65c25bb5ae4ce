mod generate;
mod list;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "builderscope",
    version,
    about = "Generates fluent Java builder classes from compiled class files",
    long_about = "builderscope introspects compiled Java classes on a classpath, discovers \
                  their accessible setters across the whole inheritance hierarchy, and emits \
                  source for companion builder classes with a chainable API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate builder sources for the selected classes
    #[command(
        long_about = "Scans the classpath for target classes, collects builder metadata for \
                      each buildable class, and writes one .java file per builder into the \
                      target directory."
    )]
    Generate {
        #[command(flatten)]
        selection: Selection,
        /// Directory the generated .java files are written to
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },
    /// List the classes builders would be generated for
    List {
        #[command(flatten)]
        selection: Selection,
    },
}

/// Class selection and configuration flags shared by the subcommands.
#[derive(Args)]
pub struct Selection {
    /// Classpath entry (directory or jar); repeatable
    #[arg(long = "classpath", value_name = "PATH", required = true)]
    pub classpath: Vec<PathBuf>,

    /// Package to scan recursively for target classes; repeatable
    #[arg(long = "package", value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Fully qualified target class; repeatable
    #[arg(long = "class", value_name = "FQN")]
    pub classes: Vec<String>,

    /// JSON configuration file (builderPackage, excludes, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target package of generated builders; <PACKAGE_NAME> means the
    /// package of the built class
    #[arg(long, value_name = "PACKAGE")]
    pub builder_package: Option<String>,

    /// Suffix appended to the built class's simple name
    #[arg(long, value_name = "SUFFIX")]
    pub builder_suffix: Option<String>,

    /// Prefix mutator methods must carry; empty matches any single-argument
    /// method
    #[arg(long, value_name = "PREFIX")]
    pub setter_prefix: Option<String>,

    /// Prefix accessor methods must carry in get-and-add mode
    #[arg(long, value_name = "PREFIX")]
    pub getter_prefix: Option<String>,

    /// Also synthesize add-helpers for read-only collection getters
    #[arg(long)]
    pub get_and_add: bool,

    /// Exclude candidate classes whose qualified name matches this regex;
    /// repeatable
    #[arg(long = "exclude", value_name = "REGEX")]
    pub excludes: Vec<String>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    match cli.command {
        Commands::Generate { selection, out } => generate::run(&selection, &out),
        Commands::List { selection } => list::run(&selection),
    }
}
