use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Lambda binaries and the artifact each one is packaged into.
const LAMBDA_FUNCTIONS: [(&str, &str); 3] = [
    ("monitor_lambda", "monitor.zip"),
    ("batching_lambda", "batching.zip"),
    ("validation_lambda", "validation.zip"),
];

const TESTED_PACKAGES: [&str; 2] = ["file_batch_core", "file_batch_lambda"];

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the file batch processor workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks
    Ci {
        #[arg(value_enum, default_value_t = CiJob::All)]
        job: CiJob,
    },
    /// Build the Lambda binaries and zip each one as a `bootstrap` artifact
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifacts
        #[arg(long, env = "LAMBDA_DIST_DIR", default_value = "dist")]
        output_dir: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Unit and integration tests
    Test,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn run_cargo(args: &[&str]) -> Result<(), String> {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("failed to execute cargo: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!(
            "`cargo {}` exited with {}",
            args.join(" "),
            status.code().unwrap_or(1)
        ))
    }
}

fn ci_lint() -> Result<(), String> {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"])?;

    step("Clippy");
    run_cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
}

fn ci_test() -> Result<(), String> {
    for package in TESTED_PACKAGES {
        step(&format!("Test {package}"));
        run_cargo(&["test", "-p", package])?;
    }
    Ok(())
}

fn package_lambdas(target: &str, profile: BuildProfile, output_dir: &Path) -> Result<(), String> {
    ensure_rust_target_installed(target)?;

    step("Build lambda binaries");
    let mut cargo_args = vec!["build", "-p", "file_batch_lambda", "--target", target];
    for (bin, _) in LAMBDA_FUNCTIONS {
        cargo_args.extend(["--bin", bin]);
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args)?;

    step("Package lambda zip artifacts");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    fs::create_dir_all(output_dir).map_err(|error| {
        format!(
            "failed to create dist directory '{}': {error}",
            output_dir.display()
        )
    })?;

    let mut packaged = Vec::with_capacity(LAMBDA_FUNCTIONS.len());
    for (bin, artifact) in LAMBDA_FUNCTIONS {
        let zip_path = output_dir.join(artifact);
        package_lambda_zip(&target_dir.join(bin), &zip_path)?;
        packaged.push(zip_path);
    }

    eprintln!("\nPackaged artifacts:");
    for path in packaged {
        eprintln!("- {}", path.display());
    }
    Ok(())
}

fn ensure_rust_target_installed(target: &str) -> Result<(), String> {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return Ok(());
        }
    };

    if !output.status.success() {
        return Err(format!(
            "failed to list installed rust targets: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let installed = String::from_utf8_lossy(&output.stdout);
    if installed.lines().any(|line| line.trim() == target) {
        Ok(())
    } else {
        Err(format!(
            "rust target `{target}` is not installed; run `rustup target add {target}` and retry"
        ))
    }
}

fn package_lambda_zip(binary_path: &Path, zip_path: &Path) -> Result<(), String> {
    let binary = fs::read(binary_path).map_err(|error| {
        format!(
            "failed to read lambda binary '{}': {error}",
            binary_path.display()
        )
    })?;
    let file = fs::File::create(zip_path)
        .map_err(|error| format!("failed to create '{}': {error}", zip_path.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .map_err(|error| format!("failed to start bootstrap entry: {error}"))?;
    zip.write_all(&binary)
        .map_err(|error| format!("failed to write bootstrap entry: {error}"))?;
    zip.finish()
        .map_err(|error| format!("failed to finish lambda zip: {error}"))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ci { job } => {
            let outcome = match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::All => ci_lint().and_then(|()| ci_test()),
            };
            if outcome.is_ok() {
                eprintln!("\nCI job passed.");
            }
            outcome
        }
        Commands::ServerlessPackage {
            target,
            profile,
            output_dir,
        } => package_lambdas(&target, profile, &output_dir),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        exit(1);
    }
}
