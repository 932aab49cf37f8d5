//! CLI entry point for projdoc

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use projdoc::output::{ColorMode, print_summary, should_use_color};
use projdoc::{Collaborators, Config, GenerateOptions, MatchMode, generate, parse_depth};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "projdoc")]
#[command(about = "Document a project's file tree, sizes and versions as markdown and JSON")]
#[command(version)]
struct Args {
    /// Project directory to document
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Markdown output file (default: project-structure.md in the project)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Additional names to exclude (can be used multiple times)
    #[arg(long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Maximum depth; anything but a non-negative integer means unlimited
    #[arg(long = "depth", value_name = "N", allow_hyphen_values = true)]
    depth: Option<String>,

    /// Treat exclude names as glob patterns instead of literal names
    #[arg(long = "glob")]
    glob: bool,

    /// Skip the JSON file
    #[arg(long = "no-json")]
    no_json: bool,

    /// Skip the package sections
    #[arg(long = "no-packages")]
    no_packages: bool,

    /// Config file (default: .projdoc.toml in the project, if present)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> projdoc::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None if args.path.is_dir() => Config::discover(&args.path)?,
        None => Config::default(),
    };

    if args.glob {
        config.files.match_mode = MatchMode::Glob;
    }
    if args.no_json {
        config.json.enabled = false;
    }
    if args.no_packages {
        config.markdown.include_package_info = false;
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("projdoc: {}", e);
        process::exit(1);
    });

    let options = GenerateOptions {
        root: args.path.clone(),
        output: args.output.clone(),
        extra_excludes: args.exclude.clone(),
        max_depth: args.depth.as_deref().and_then(parse_depth),
    };
    let collaborators = Collaborators::from_config(&config);

    let summary = match generate(&options, &config, &collaborators) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("projdoc: {}", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Err(e) = print_summary(&summary, should_use_color(args.color)) {
            eprintln!("projdoc: error writing output: {}", e);
            process::exit(1);
        }
    }
}
