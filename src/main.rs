use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use story_checklist::linter::{self, Diagnostic, Severity};
use story_checklist::{ChecklistError, Story};

mod cli;
use cli::{Cli, Commands, OutputFormat};

fn read_all(path: Option<&PathBuf>) -> story_checklist::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).map_err(|source| ChecklistError::FileRead {
            path: p.clone(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(
    explicit: Option<&Path>,
    file: &Option<PathBuf>,
) -> story_checklist::Result<story_checklist::Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = story_checklist::config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> story_checklist::Result<i32> {
    match cli.command {
        Commands::Check {
            file,
            format,
            check,
            amp,
        } => {
            let mut cfg = load_config(cli.config.as_deref(), &file)?;
            if amp {
                cfg.amp.enabled = true;
            }

            let input = read_all(file.as_ref())?;
            let story = Story::from_json(&input)?;

            let diagnostics = if cfg.amp.enabled {
                let rt = tokio::runtime::Runtime::new()?;
                rt.block_on(linter::lint_with_amp_validation(Some(&story), &cfg))
            } else {
                linter::lint_with_config(Some(&story), &cfg)
            };

            match format {
                OutputFormat::Text => print_diagnostics(&diagnostics, file.as_ref()),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&diagnostics).map_err(io::Error::other)?;
                    println!("{json}");
                }
            }

            let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
            if check && has_errors {
                return Ok(1);
            }
            Ok(0)
        }
        Commands::Rules => {
            let cfg = load_config(cli.config.as_deref(), &None)?;
            for entry in linter::rule_entries(&cfg) {
                println!("{:<9} {:<34} {}", entry.severity.as_str(), entry.name, entry.target);
            }
            Ok(0)
        }
    }
}

fn location(diag: &Diagnostic) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(page) = diag.page {
        parts.push(format!("page {}", page));
    }
    if let Some(element) = &diag.element_id {
        parts.push(format!("element {}", element));
    }
    if !diag.pages.is_empty() {
        let pages: Vec<_> = diag.pages.iter().map(|p| p.to_string()).collect();
        parts.push(format!("pages {}", pages.join(", ")));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn print_diagnostics(diagnostics: &[Diagnostic], file: Option<&PathBuf>) {
    let file_name = file.and_then(|p| p.to_str()).unwrap_or("<stdin>");

    if diagnostics.is_empty() {
        println!("No issues found in {}", file_name);
        return;
    }

    for diag in diagnostics {
        let severity_str = match diag.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",       // red
            Severity::Warning => "\x1b[33mwarning\x1b[0m",   // yellow
            Severity::Guidance => "\x1b[34mguidance\x1b[0m", // blue
        };

        match location(diag) {
            Some(at) => println!(
                "{severity_str}[{}]: {} at {}: {}",
                diag.code, diag.message, file_name, at
            ),
            None => println!("{severity_str}[{}]: {} in {}", diag.code, diag.message, file_name),
        }

        if let Some(help) = &diag.help {
            println!("  \x1b[36mhelp\x1b[0m: {}", help); // cyan
        }
    }

    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    println!(
        "\nFound {} issue(s): {} error(s), {} warning(s), {} guidance",
        diagnostics.len(),
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Guidance)
    );
}
