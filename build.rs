use clap::CommandFactory;
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io::Result;
use std::path::PathBuf;

#[path = "src/cli.rs"]
mod cli;

use cli::Cli;

const BIN_NAME: &str = "story-checklist";

fn generate_completions(outdir: &std::ffi::OsString) -> Result<()> {
    let mut cmd = Cli::command();

    for shell in [
        Shell::Bash,
        Shell::Fish,
        Shell::Zsh,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        generate_to(shell, &mut cmd, BIN_NAME, outdir)?;
    }

    Ok(())
}

fn generate_man_pages() -> Result<()> {
    let out_dir = PathBuf::from("target/man");
    fs::create_dir_all(&out_dir)?;

    let cmd = Cli::command();

    let man = Man::new(cmd.clone());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(out_dir.join(format!("{BIN_NAME}.1")), buffer)?;

    // One page per subcommand, e.g. story-checklist-check.1
    for subcommand in cmd.get_subcommands() {
        let subcommand_name = subcommand.get_name();
        if subcommand_name == "help" {
            continue;
        }

        let name = format!("{BIN_NAME}-{subcommand_name}");
        let man = Man::new(subcommand.clone()).title(&name);
        let mut buffer = Vec::new();
        man.render(&mut buffer)?;

        let content = String::from_utf8_lossy(&buffer);
        let fixed_content = content.replace(
            &format!("\\fB{}\\fR", subcommand_name),
            &format!("\\fB{} {}\\fR", BIN_NAME, subcommand_name),
        );

        fs::write(
            out_dir.join(format!("{}.1", name)),
            fixed_content.as_bytes(),
        )?;
    }

    Ok(())
}

fn main() -> Result<()> {
    if let Some(outdir) = env::var_os("OUT_DIR") {
        generate_completions(&outdir)?;
    }

    generate_man_pages()?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
