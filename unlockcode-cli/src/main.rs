//! unlockcode: vendor-side unlock code tool
//!
//! Derives the unlock code a customer's app expects, or checks one,
//! from a factor profile:
//!
//!   unlockcode derive --profile customer.toml
//!   unlockcode check --profile customer.toml --code ABC123
//!   unlockcode factors --profile customer.toml

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use unlockcode::StaticFactors;
use unlockcode_cli::{EncryptMode, FactorOverrides, HookOptions};

#[derive(Parser, Debug)]
#[command(name = "unlockcode")]
#[command(about = "Derive and check feature-unlock codes")]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the expected unlock code
    Derive {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        hooks: HookArgs,
    },
    /// Check a candidate code; exits non-zero when invalid
    Check {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        hooks: HookArgs,
        /// Candidate code
        #[arg(short, long)]
        code: String,
    },
    /// List the factors that feed the code, in order
    Factors {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Profile file (.toml or JSON)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Feature name; omit for the shared feature
    #[arg(short, long)]
    feature: Option<String>,

    /// Code length
    #[arg(short, long)]
    length: Option<usize>,

    /// Factor order, e.g. "DeviceUID,AppVersionHash" or "DV"
    #[arg(short, long)]
    order: Option<String>,

    #[arg(long)]
    device_uid: Option<String>,

    #[arg(long)]
    user_account: Option<String>,

    #[arg(long)]
    user_account_created_date: Option<String>,

    #[arg(long)]
    app_version_hash: Option<String>,

    #[arg(long)]
    app_built_date: Option<String>,
}

impl ProfileArgs {
    fn load(&self) -> Result<StaticFactors> {
        let profile = match &self.profile {
            Some(path) => unlockcode_cli::load_profile(path)?,
            None => StaticFactors::default(),
        };

        let overrides = FactorOverrides {
            code_length: self.length,
            code_order: self.order.clone(),
            device_uid: self.device_uid.clone(),
            user_account: self.user_account.clone(),
            user_account_created_date: self.user_account_created_date.clone(),
            app_version_hash: self.app_version_hash.clone(),
            app_built_date: self.app_built_date.clone(),
        };
        Ok(overrides.apply(profile))
    }
}

#[derive(Args, Debug)]
struct HookArgs {
    /// Hash the composite before sizing
    #[arg(long, value_enum)]
    encrypt: Option<EncryptMode>,

    /// Split the code into dash-separated groups of this size
    #[arg(long)]
    group: Option<usize>,
}

impl From<&HookArgs> for HookOptions {
    fn from(args: &HookArgs) -> Self {
        Self {
            encrypt: args.encrypt,
            group: args.group,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Derive { profile, hooks } => {
            let code = unlockcode_cli::derive_code(
                profile.load()?,
                HookOptions::from(&hooks),
                profile.feature.as_deref(),
            )?;
            println!("{code}");
        }
        Command::Check { profile, hooks, code } => {
            let valid = unlockcode_cli::check_code(
                profile.load()?,
                HookOptions::from(&hooks),
                profile.feature.as_deref(),
                &code,
            )?;
            if !valid {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
            info!("Code accepted");
            println!("valid");
        }
        Command::Factors { profile, json } => {
            let factors = unlockcode_cli::list_factors(profile.load()?, profile.feature.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&factors)?);
            } else {
                for f in &factors {
                    println!("{} {:<24} {}", f.code, f.factor, f.value);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
