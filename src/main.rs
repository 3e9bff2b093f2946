use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use waypost::batch;
use waypost::cache::TocCache;
use waypost::config::Config;
use waypost::error::WaypostError;
use waypost::format;
use waypost::page;
use waypost::scan;
use waypost::toc::{Reaction, TocController, TocEvent};
use waypost::types::HeadingCounts;

#[derive(Parser)]
#[command(
    name = "waypost",
    version,
    about = "Table-of-contents extraction and scroll tracking for rendered articles"
)]
struct Cli {
    /// Path to a config file (default: ./waypost.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the navigation list for one article
    Toc {
        path: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also resolve the active entry for this scroll offset (px)
        #[arg(long)]
        scroll: Option<u32>,
    },
    /// Resolve which section is active at a scroll offset
    Active {
        path: PathBuf,
        /// Scroll offset (px)
        #[arg(long)]
        scroll: u32,
    },
    /// Summarize every article under a content directory
    Scan {
        root: PathBuf,
        /// Glob on paths relative to the root, e.g. 'posts/**/*.md'
        #[arg(long)]
        glob: Option<String>,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Command::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "waypost", &mut io::stdout());
        return;
    }

    match run(&cli) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("waypost: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, WaypostError> {
    let cfg = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Toc { path, json, scroll } => cmd_toc(path, *json, *scroll, &cfg),
        Command::Active { path, scroll } => cmd_active(path, *scroll, &cfg),
        Command::Scan { root, glob } => {
            let cache = TocCache::new();
            batch::scan_tree(root, glob.as_deref(), &cache)
        }
        Command::Completions { .. } => unreachable!("handled before run"),
    }
}

fn cmd_toc(
    path: &Path,
    json: bool,
    scroll: Option<u32>,
    cfg: &Config,
) -> Result<String, WaypostError> {
    let headings = scan::scan_file(path)?;
    let (mut page, _) = page::from_headings(&headings, cfg);
    let Some(mut ctl) = TocController::mount(&mut page, cfg) else {
        return Ok(format::suppressed_header(path));
    };

    // The active entry is only meaningful when the caller names a
    // scroll position.
    let active = scroll.and_then(|y| {
        page.scroll_to(y);
        if ctl.dispatch(&mut page, TocEvent::Scroll) == Reaction::ScheduleFrame {
            let _ = ctl.dispatch(&mut page, TocEvent::Frame);
        }
        ctl.active()
    });

    if json {
        return Ok(format::render_json(ctl.entries(), active));
    }
    let counts = HeadingCounts::tally(&headings);
    Ok(format!(
        "{}\n{}",
        format::toc_header(path, counts),
        format::render_list(ctl.entries(), active)
    ))
}

fn cmd_active(path: &Path, scroll: u32, cfg: &Config) -> Result<String, WaypostError> {
    let headings = scan::scan_file(path)?;
    let (mut page, _) = page::from_headings(&headings, cfg);
    let Some(mut ctl) = TocController::mount(&mut page, cfg) else {
        return Ok(format::suppressed_header(path));
    };

    page.scroll_to(scroll);
    if ctl.dispatch(&mut page, TocEvent::Scroll) == Reaction::ScheduleFrame {
        let _ = ctl.dispatch(&mut page, TocEvent::Frame);
    }

    Ok(match ctl.active() {
        Some(i) => {
            let entry = &ctl.entries()[i];
            format!("{}  #{}", entry.label, entry.id)
        }
        None => "(none — scrolled above the first section)".into(),
    })
}
