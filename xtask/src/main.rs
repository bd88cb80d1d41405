//! Build automation tasks for the seven-segment-mux project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The demo firmware targets the Raspberry Pi Pico 1.
const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1";
const DEMO: &str = "counter";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for seven-segment-mux", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, traced build, demo firmware, docs
    CheckAll,
    /// Build the demo firmware
    Demo {
        #[arg(long)]
        release: bool,
    },
    /// Build a UF2 file of the demo firmware for flashing to a Pico
    Uf2,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Demo { release } => {
            if build_demo(release) {
                println!("{}", "Build successful!".green());
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Uf2 => build_uf2(),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }
    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", "seven-segment-mux"]);
    if let Some(target) = &host_target {
        test_cmd.arg("--target").arg(target);
    }
    if !run_command(&mut test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running host tests without defmt...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "test",
        "--package",
        "seven-segment-mux",
        "--lib",
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building library with display-trace...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        FIRMWARE_TARGET,
        "--features",
        "display-trace",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building demo firmware...".cyan());
    println!("  {}", format!("- {DEMO}").bright_black());
    if !build_demo(false) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--package",
        "seven-segment-mux",
        "--no-deps",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_demo(release: bool) -> bool {
    let workspace_root = workspace_root();
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&workspace_root).args([
        "build",
        "--bin",
        DEMO,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ]);
    if release {
        cmd.arg("--release");
    }

    run_command(&mut cmd)
}

fn build_uf2() -> ExitCode {
    let workspace_root = workspace_root();
    println!("{}", format!("Building UF2 for '{DEMO}'").cyan());
    println!("  Features: {}", FIRMWARE_FEATURES.bright_black());
    println!("  Target: {}", FIRMWARE_TARGET.bright_black());

    if !build_demo(true) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{FIRMWARE_TARGET}/release/{DEMO}");
    let uf2_path = format!("{DEMO}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
