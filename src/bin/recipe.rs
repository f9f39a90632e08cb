//! qilang recipe CLI
//!
//! Usage:
//!   recipe version                 Print the resolved package version
//!   recipe options                 Print default dependency options
//!   recipe layout                  Print build and package folders
//!   recipe info                    Print consumer metadata as JSON
//!   recipe export --dest <dir>     Copy the exported sources
//!   recipe build                   Validate, configure and build
//!   recipe package                 Install components into the package folder
//!   recipe create                  build + package + info

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qilang_recipe::{
    CMake, ExecOptions, GitRepository, Profile, QILANG, RecipeContext, RepoState, Settings,
    SettingsOverrides, lifecycle, output,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "recipe")]
#[command(about = "Package recipe for the qilang code generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Recipe folder containing project.json and the sources
    #[arg(short = 'r', long, global = true, env = "RECIPE_FOLDER", default_value = ".")]
    recipe_folder: PathBuf,

    /// Use this package version instead of resolving it
    #[arg(long = "set-version", global = true, env = "RECIPE_VERSION")]
    set_version: Option<String>,

    /// Do not query git for development versions
    #[arg(long, global = true)]
    no_git: bool,

    /// Settings profile (TOML)
    #[arg(short = 'p', long, global = true, env = "RECIPE_PROFILE")]
    profile: Option<PathBuf>,

    /// Operating system setting
    #[arg(long, global = true)]
    os: Option<String>,

    /// CPU architecture setting
    #[arg(long, global = true)]
    arch: Option<String>,

    /// Compiler setting
    #[arg(long, global = true)]
    compiler: Option<String>,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(short = 't', long, global = true)]
    build_type: Option<String>,

    /// C++ standard (e.g. 17, gnu20)
    #[arg(long, global = true)]
    cppstd: Option<String>,

    /// Package folder (defaults to <recipe>/package/<settings>)
    #[arg(long, global = true)]
    package_folder: Option<PathBuf>,

    /// cmake binary
    #[arg(long, global = true, env = "CMAKE", default_value = "cmake")]
    cmake: PathBuf,

    /// Parallel build jobs (defaults to the number of CPUs)
    #[arg(short = 'j', long, global = true)]
    jobs: Option<usize>,

    /// Print tool invocations without running them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Print tool invocations and stream their output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved package version
    Version,

    /// Print default dependency options
    Options,

    /// Print build and package folders
    Layout,

    /// Print consumer metadata as JSON
    Info,

    /// Copy the exported sources to a folder
    Export {
        /// Destination folder
        #[arg(short, long)]
        dest: PathBuf,
    },

    /// Validate, configure and build
    Build,

    /// Install components into the package folder
    Package,

    /// Build, package and print consumer metadata
    Create,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let recipe_folder = cli
        .recipe_folder
        .canonicalize()
        .with_context(|| format!("Recipe folder not found: {}", cli.recipe_folder.display()))?;

    // Evaluated once per invocation; every phase below borrows the same context.
    let evaluate = || -> Result<(RecipeContext, lifecycle::Layout)> {
        let settings = load_settings(&cli)?;
        let git = GitRepository::new(&recipe_folder);
        let repo: Option<&dyn RepoState> = if cli.no_git { None } else { Some(&git) };
        let ctx = RecipeContext::evaluate(
            &QILANG,
            &recipe_folder,
            settings,
            repo,
            cli.set_version.as_deref(),
        )?;
        let layout = lifecycle::layout(&ctx, cli.package_folder.as_deref());
        Ok((ctx, layout))
    };

    match &cli.command {
        Commands::Version => {
            let (ctx, _) = evaluate()?;
            println!("{}", ctx.version());
        }

        Commands::Options => {
            let (ctx, _) = evaluate()?;
            output::info(&format!("Default options for {}:", ctx.reference()));
            for (key, value) in ctx.recipe.default_options(&ctx.features) {
                output::key_value(&key, &value);
            }
        }

        Commands::Layout => {
            let (_, layout) = evaluate()?;
            show_layout(&layout);
        }

        Commands::Info => {
            let (ctx, _) = evaluate()?;
            println!("{}", lifecycle::package_info(&ctx).to_json()?);
        }

        Commands::Export { dest } => {
            std::fs::create_dir_all(dest)
                .with_context(|| format!("Failed to create export folder: {}", dest.display()))?;
            let copied = lifecycle::export_sources(&recipe_folder, QILANG.exports_sources, dest)?;
            for file in &copied {
                output::detail(&file.display().to_string());
            }
            output::success(&format!("exported {} files to {}", copied.len(), dest.display()));
        }

        Commands::Build => {
            let (ctx, layout) = evaluate()?;
            let mut cmake = create_cmake(&cli, &ctx, &layout);
            output::action(&format!("Building {}", ctx.reference()));
            lifecycle::validate(&ctx)?;
            lifecycle::build(&ctx, &mut cmake)?;
            output::success(&format!(
                "{} built in {}",
                ctx.reference(),
                layout.build_folder.display()
            ));
        }

        Commands::Package => {
            let (ctx, layout) = evaluate()?;
            let mut cmake = create_cmake(&cli, &ctx, &layout);
            output::action(&format!("Packaging {}", ctx.reference()));
            let manifest = lifecycle::package(&ctx, &layout, &mut cmake)?;
            output::success(&format!(
                "{} packaged ({} files) in {}",
                ctx.reference(),
                manifest.files.len(),
                layout.package_folder.display()
            ));
        }

        Commands::Create => {
            let (ctx, layout) = evaluate()?;
            let mut cmake = create_cmake(&cli, &ctx, &layout);
            let report = lifecycle::create(&ctx, &layout, &mut cmake)?;
            println!("{}", report.info.to_json()?);
        }
    }

    Ok(())
}

/// Host defaults, then the profile, then command line flags
fn load_settings(cli: &Cli) -> Result<Settings> {
    let profile = match &cli.profile {
        Some(path) => Some(Profile::load(path)?),
        None => Profile::load_default()?,
    };

    let mut settings = Settings::host();
    if let Some(profile) = &profile {
        settings = settings.with_profile(profile)?;
    }

    let overrides = SettingsOverrides {
        os: cli.os.clone(),
        arch: cli.arch.clone(),
        compiler: cli.compiler.clone(),
        build_type: cli.build_type.clone(),
        cppstd: cli.cppstd.clone(),
    };
    Ok(settings.with_overrides(&overrides)?)
}

fn create_cmake(cli: &Cli, ctx: &RecipeContext, layout: &lifecycle::Layout) -> CMake {
    let mut cmake = CMake::new(layout, ctx.settings.build_type)
        .program(&cli.cmake)
        .options(ExecOptions {
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        });
    if let Some(jobs) = cli.jobs {
        cmake = cmake.jobs(jobs);
    }
    cmake
}

fn show_layout(layout: &lifecycle::Layout) {
    use owo_colors::OwoColorize;

    let rows: [(&str, &Path); 4] = [
        ("Source:", &layout.source_folder),
        ("Build:", &layout.build_folder),
        ("Generators:", &layout.generators_folder),
        ("Package:", &layout.package_folder),
    ];
    for (label, path) in rows {
        println!("{:<12} {}", label.bold(), path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["recipe"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["build", "--build-type", "Debug", "-j", "2", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Build));
        assert_eq!(cli.build_type.as_deref(), Some("Debug"));
        assert_eq!(cli.jobs, Some(2));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        let cli = parse(&["layout", "-p", "/nonexistent/profile.toml"]);
        assert!(load_settings(&cli).is_err());
    }

    #[test]
    fn test_settings_flags_are_collected() {
        let cli = parse(&["layout", "--os", "Linux", "--arch", "armv8", "--cppstd", "20"]);
        assert_eq!(cli.os.as_deref(), Some("Linux"));
        assert_eq!(cli.arch.as_deref(), Some("armv8"));
        assert_eq!(cli.cppstd.as_deref(), Some("20"));
        assert!(!cli.no_git);
    }

    #[test]
    fn test_export_requires_dest() {
        let mut full = vec!["recipe", "export"];
        assert!(Cli::try_parse_from(full.clone()).is_err());
        full.extend(["--dest", "/tmp/out"]);
        assert!(Cli::try_parse_from(full).is_ok());
    }
}
