use std::path::{Path, PathBuf};

mod merge;
mod split;
mod terminal;
mod validate;

use clap::ArgAction;
use docstruct::Config;
use merge::Merge;
use split::Split;
use terminal::Colorize;
use tracing::instrument;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(name = "claude-docs", version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Split large documents into smaller, manageable sections
    Split(Split),

    /// Merge multiple markdown documents into a single file
    Merge(Merge),

    /// Initialize the documentation structure in the current directory
    Init(Init),

    /// Validate documentation structure
    Validate(Validate),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Split(command) => command.run(),
            Self::Merge(command) => command.run(),
            Self::Init(command) => command.run(&std::env::current_dir()?),
            Self::Validate(command) => command.run(),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Project name used in generated files (default: directory name)
    project_name: Option<String>,
}

impl Init {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let project_name = self.project_name.unwrap_or_else(|| {
            root.file_name()
                .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned())
        });

        println!("Initializing Claude documentation structure for '{project_name}'...");

        for dir in ["specs", ".claude"] {
            let path = root.join(dir);
            std::fs::create_dir_all(&path)
                .map_err(|e| anyhow::anyhow!("Failed to create {dir} directory: {e}"))?;
            println!("Created directory: {dir}");
        }

        let starters: [(PathBuf, String); 3] = [
            (root.join("CLAUDE.md"), claude_md_template(&project_name)),
            (root.join("specs").join("api.md"), api_spec_template()),
            (
                root.join(".claude").join("context.md"),
                context_template(&project_name),
            ),
        ];
        for (path, content) in starters {
            if path.exists() {
                println!(
                    "{}",
                    format!("{} already exists, skipping...", path.display()).dim()
                );
                continue;
            }
            std::fs::write(&path, content)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;
            println!("Created: {}", path.display());
        }

        let config_path = root.join(docstruct::config::CONFIG_FILE);
        if config_path.exists() {
            println!(
                "{}",
                format!("{} already exists, skipping...", config_path.display()).dim()
            );
        } else {
            Config::default()
                .save(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;
            println!("Created: {}", config_path.display());
        }

        println!();
        println!(
            "{}",
            "Claude-optimized documentation structure initialized successfully!".success()
        );
        println!("Next steps:");
        println!("1. Edit CLAUDE.md with your project details");
        println!("2. Update .claude/context.md with project background and constraints");
        println!("3. Fill in specs/api.md");
        println!("4. Run 'claude-docs validate' to check the structure");

        Ok(())
    }
}

fn claude_md_template(project_name: &str) -> String {
    format!(
        "# {project_name}\n\n\
         This file provides guidance to Claude Code (claude.ai/code) when working with code in \
         this repository.\n\n\
         ## Project Overview\n\n\
         {project_name} - Brief description of your project and its purpose. This project \
         follows Claude Code optimization best practices for enhanced AI-assisted development.\n\n\
         ## Architecture & Technology Stack\n\n\
         **Core Technologies:**\n\
         - List your main technologies here\n\
         - Framework versions\n\
         - Key dependencies\n\n\
         **Key Components:**\n\
         - Component 1: Description and location\n\
         - Component 2: Description and location\n\n\
         ## Key Files & Components\n\n\
         - `.claude/context.md` - Project background, constraints, and requirements\n\
         - `specs/` - Detailed specifications\n\n\
         ## Documentation Maintenance\n\n\
         Keep this file current with structural changes, and split oversized documents with \
         'claude-docs split' so each file stays inside a comfortable context window.\n"
    )
}

fn api_spec_template() -> String {
    "# API Documentation\n\n\
     ## Endpoints\n\n\
     ### GET /api/endpoint\n\
     Description of the endpoint.\n\n\
     **Parameters:**\n\
     - param1 (string): Description\n\n\
     **Response:**\n\
     ```json\n\
     {\n  \"example\": \"response\"\n}\n\
     ```\n"
        .to_string()
}

fn context_template(project_name: &str) -> String {
    format!(
        "# Project Context\n\n\
         ## Background\n\n\
         Why {project_name} exists and what problem it solves.\n\n\
         ## Constraints\n\n\
         - Technical constraints\n\
         - Business constraints\n\n\
         ## Requirements\n\n\
         - Functional requirements\n\
         - Non-functional requirements\n"
    )
}
