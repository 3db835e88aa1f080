//! openapi-llms CLI
//!
//! Command-line interface for generating llms.txt Markdown from OpenAPI specs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openapi_llms_common::{LlmsConfig, SourceConfig, SpecSource};
use openapi_llms_generator::LlmsGenerator;
use openapi_llms_parser::{OpenApiDocument, SpecLoader};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "openapi-llms")]
#[command(version, about = "Generate llms.txt Markdown from OpenAPI specifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate llms.txt from a spec file or URL
    #[command(after_help = "EXAMPLES:\n  \
        # Print Markdown for a local spec\n  \
        openapi-llms generate --spec openapi.json\n\n  \
        # Fetch a remote spec and write llms.txt\n  \
        openapi-llms generate \\\n    \
        --spec https://petstore3.swagger.io/api/v3/openapi.json \\\n    \
        --output ./public/llms.txt\n\n  \
        # Use a config file with header and footer\n  \
        openapi-llms generate --config llms.yaml --output llms.txt")]
    Generate {
        /// Spec file path or http(s) URL (overrides the config source)
        #[arg(short, long)]
        spec: Option<String>,

        /// Config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text prepended to the generated Markdown
        #[arg(long)]
        header: Option<String>,

        /// Text appended to the generated Markdown
        #[arg(long)]
        footer: Option<String>,
    },

    /// Serve /llms.txt and /llms-full.txt over HTTP
    #[command(after_help = "EXAMPLES:\n  \
        # Serve a spec published by another service\n  \
        openapi-llms serve --spec https://api.example.com/openapi.json\n\n  \
        # Serve with a config file on a custom port\n  \
        openapi-llms serve --config llms.yaml --listen 127.0.0.1:8080")]
    Serve {
        /// Spec file path or http(s) URL (overrides the config source)
        #[arg(short, long)]
        spec: Option<String>,

        /// Config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address
        #[arg(long, default_value = "0.0.0.0:3000")]
        listen: String,

        /// Response content type
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Summarize a spec without generating Markdown
    Inspect {
        /// Spec file path or http(s) URL
        #[arg(short, long)]
        spec: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            spec,
            config,
            output,
            header,
            footer,
        } => {
            let mut config = build_config(config.as_deref(), spec.as_deref())?;
            if header.is_some() {
                config.header = header;
            }
            if footer.is_some() {
                config.footer = footer;
            }
            generate_command(&config, output.as_deref(), cli.verbose).await?;
        }
        Commands::Serve {
            spec,
            config,
            listen,
            content_type,
        } => {
            let mut config = build_config(config.as_deref(), spec.as_deref())?;
            if content_type.is_some() {
                config.content_type = content_type;
            }
            serve_command(config, &listen).await?;
        }
        Commands::Inspect { spec } => {
            inspect_command(&spec).await?;
        }
    }

    Ok(())
}

/// Log to stderr so generated Markdown on stdout stays clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file (if any) and apply the `--spec` override
fn build_config(config_path: Option<&Path>, spec: Option<&str>) -> Result<LlmsConfig> {
    let mut config = match config_path {
        Some(path) => LlmsConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LlmsConfig::default(),
    };

    if let Some(spec) = spec {
        config.source = source_config(spec);
    }

    Ok(config)
}

/// Source settings for a spec path or URL given on the command line
fn source_config(spec: &str) -> SourceConfig {
    match SpecSource::detect(spec) {
        SpecSource::Url(url) => SourceConfig::url(url),
        SpecSource::File(path) => SourceConfig::file(path.to_string_lossy()),
    }
}

async fn load_document(source: &SpecSource) -> Result<OpenApiDocument> {
    let kind = match source {
        SpecSource::File(_) => "file",
        SpecSource::Url(_) => "URL",
    };
    eprintln!("{} Loading spec {}: {}", "→".cyan(), kind, source);

    SpecLoader::new()
        .load(source)
        .await
        .context("Failed to load OpenAPI spec")
}

async fn generate_command(config: &LlmsConfig, output: Option<&Path>, verbose: bool) -> Result<()> {
    let source = config
        .source
        .resolve(None)
        .context("Invalid spec source (use --spec or a config file)")?;

    if verbose {
        eprintln!("  Source: {}", source);
        eprintln!("  Header: {}", if config.header.is_some() { "yes" } else { "no" });
        eprintln!("  Footer: {}", if config.footer.is_some() { "yes" } else { "no" });
    }

    let document = load_document(&source).await?;
    let generator = LlmsGenerator::from_config(config).context("Failed to create generator")?;

    match output {
        Some(path) => {
            eprintln!("{} Generating Markdown...", "→".cyan());
            generator
                .generate_to_file(&document, path)
                .context("Failed to generate llms.txt")?;

            eprintln!("\n{}", "✓ Generation complete!".green().bold());
            eprintln!("  📄 {}", path.display());
        }
        None => {
            let markdown = generator
                .generate(&document)
                .context("Failed to generate llms.txt")?;
            debug!(bytes = markdown.len(), "Writing llms.txt to stdout");
            println!("{}", markdown);
        }
    }

    Ok(())
}

async fn serve_command(config: LlmsConfig, listen: &str) -> Result<()> {
    // Fail fast on a source that can never resolve; relative URLs wait for a request
    if config.source.url.is_none() {
        config
            .source
            .resolve(None)
            .context("Invalid spec source (use --spec or a config file)")?;
    }

    eprintln!("{} Serving llms.txt on http://{}", "→".cyan(), listen);
    eprintln!("  GET /llms.txt");
    eprintln!("  GET /llms-full.txt {} /llms.txt", "→".dimmed());

    openapi_llms_server::serve(config, listen)
        .await
        .context("Server error")
}

async fn inspect_command(spec: &str) -> Result<()> {
    let source = SpecSource::detect(spec);
    let document = load_document(&source).await?;

    let info = document.info.clone().unwrap_or_default();
    let version = document
        .openapi
        .as_deref()
        .map(|v| format!("OpenAPI {}", v))
        .or_else(|| document.swagger.as_deref().map(|v| format!("Swagger {}", v)))
        .unwrap_or_else(|| "unknown".to_string());

    println!("\n{}", "✓ Spec loaded!".green().bold());
    println!("\n{}", "Document:".bold());
    println!(
        "  Title: {}",
        info.title.as_deref().unwrap_or("(untitled)").yellow()
    );
    println!(
        "  API version: {}",
        info.version.as_deref().unwrap_or("-").yellow()
    );
    println!("  Spec version: {}", version);
    println!("  Servers: {}", document.servers.len());
    println!("  Tags: {}", document.tags.len());
    println!("  Paths: {}", document.paths.len());
    println!("  Operations: {}", document.operation_count());
    println!("  Webhooks: {}", document.webhook_operation_count());

    if let Some(components) = document.components.as_ref() {
        println!("\n{}", "Components:".bold());
        let counts = [
            ("Schemas", components.schemas.len()),
            ("Security Schemes", components.security_schemes.len()),
            ("Responses", components.responses.len()),
            ("Parameters", components.parameters.len()),
            ("Examples", components.examples.len()),
            ("Request Bodies", components.request_bodies.len()),
            ("Headers", components.headers.len()),
            ("Links", components.links.len()),
        ];
        for (name, count) in counts.iter().filter(|(_, count)| *count > 0) {
            println!("  • {}: {}", name.cyan(), count);
        }
    } else if !document.definitions.is_empty() {
        println!("\n{}", "Definitions:".bold());
        println!("  • {}: {}", "Schemas".cyan(), document.definitions.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_llms_common::SourceType;

    #[test]
    fn test_source_config_detects_urls() {
        let source = source_config("https://api.example.com/openapi.json");
        assert_eq!(source.source_type, Some(SourceType::Url));
        assert_eq!(
            source.url.as_deref(),
            Some("https://api.example.com/openapi.json")
        );

        let source = source_config("./specs/openapi.json");
        assert_eq!(source.source_type, Some(SourceType::File));
        assert_eq!(source.file.as_deref(), Some("./specs/openapi.json"));
    }

    #[test]
    fn test_spec_flag_overrides_default_config() {
        let config = build_config(None, Some("petstore.json")).unwrap();
        assert_eq!(config.source.file.as_deref(), Some("petstore.json"));
        assert!(config.header.is_none());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "openapi-llms",
            "generate",
            "--spec",
            "openapi.json",
            "--output",
            "llms.txt",
            "--footer",
            "bye",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                spec,
                output,
                footer,
                ..
            } => {
                assert_eq!(spec.as_deref(), Some("openapi.json"));
                assert_eq!(output, Some(PathBuf::from("llms.txt")));
                assert_eq!(footer.as_deref(), Some("bye"));
            }
            _ => panic!("expected generate command"),
        }
    }
}
