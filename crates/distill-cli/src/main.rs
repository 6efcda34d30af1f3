use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use distill_config::{Config, ExcludeConfig, FilterAction, FilterConfig};
use distill_engine::promote::looks_like_markup;
use distill_engine::{
    Distiller, ExcludeRule, FilterScope, PatternAction, PatternFilter, text_to_html,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Element list as JSON
    Elements,
    /// Reconstructed article HTML
    Body,
    /// Plain-text summary
    Summary,
    /// HTML fed to the parser (the promoted markup for text input)
    Html,
}

#[derive(Debug, Parser)]
#[command(
    name = "distill",
    about = "Turn a scraped page into clean article HTML or a short summary",
    version
)]
struct Cli {
    /// Input file path, or "-" for stdin
    input: PathBuf,

    /// Treat the input as plain text even if it contains markup
    #[arg(long)]
    text: bool,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Output::Body)]
    output: Output,

    /// Config file (defaults to ~/.config/distill/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured summary minimum length
    #[arg(long)]
    min_length: Option<usize>,

    /// Override the configured summary maximum length
    #[arg(long)]
    max_length: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(min_length) = cli.min_length {
        config.summary.min_length = min_length;
    }
    if let Some(max_length) = cli.max_length {
        config.summary.max_length = max_length;
    }
    config.validate()?;

    let input = read_input(&cli.input)?;
    let html = if cli.text || !looks_like_markup(&input) {
        log::debug!("Promoting plain-text input to HTML");
        text_to_html(&input)
    } else {
        input
    };

    if cli.output == Output::Html {
        println!("{html}");
        return Ok(());
    }

    let distiller = build_distiller(&config)?;
    let document = distiller.parse_html(&html)?;
    log::debug!("Parsed {} elements", document.len());

    match cli.output {
        Output::Elements => {
            let json = serde_json::to_string_pretty(document.elements())
                .context("Failed to serialize elements")?;
            println!("{json}");
        }
        Output::Body => println!("{}", distiller.body(&document)),
        Output::Summary => println!(
            "{}",
            distiller.summary(
                &document,
                config.summary.min_length,
                config.summary.max_length
            )
        ),
        Output::Html => {}
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            log::debug!("Config path: {}", path.display());
            match Config::load_from_path(&path)? {
                Some(config) => Ok(config),
                None => bail!("Config file '{}' does not exist", path.display()),
            }
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file '{}'", path.display()))
}

fn build_distiller(config: &Config) -> Result<Distiller> {
    let mut distiller = Distiller::new();
    for rule in &config.exclude {
        if let Some(rule) = exclude_rule(rule) {
            distiller = distiller.with_exclude(rule);
        } else {
            log::warn!("Ignoring exclude rule with neither tag nor class");
        }
    }
    for filter in &config.filters {
        distiller = distiller.with_filter(pattern_filter(filter)?);
    }
    Ok(distiller)
}

fn exclude_rule(rule: &ExcludeConfig) -> Option<ExcludeRule> {
    match (&rule.tag, &rule.class) {
        (None, None) => None,
        (tag, class) => Some(ExcludeRule {
            tag: tag.clone(),
            class: class.clone(),
        }),
    }
}

fn pattern_filter(filter: &FilterConfig) -> Result<PatternFilter> {
    let scope = match filter.scope {
        distill_config::FilterScope::Body => FilterScope::Body,
        distill_config::FilterScope::Summary => FilterScope::Summary,
    };
    let action = match filter.action {
        FilterAction::Skip => PatternAction::Skip,
        FilterAction::Stop => PatternAction::Stop,
        FilterAction::Truncate => PatternAction::Truncate,
    };
    PatternFilter::new(scope, &filter.pattern, action)
        .with_context(|| format!("Invalid {:?} filter", filter.scope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_excludes_scripts() {
        let distiller = build_distiller(&Config::default()).unwrap();
        let document = distiller
            .parse_html("<p>Story.</p><script>track();</script><style>p{}</style>")
            .unwrap();

        assert_eq!(distiller.body(&document), "<p>Story.</p>");
    }

    #[test]
    fn configured_filters_are_applied() {
        let config = Config {
            filters: vec![FilterConfig {
                scope: distill_config::FilterScope::Body,
                pattern: "^Advert".to_string(),
                action: FilterAction::Skip,
            }],
            ..Config::default()
        };
        let distiller = build_distiller(&config).unwrap();
        let document = distiller
            .parse_html("<p>Advert here</p><p>Story.</p>")
            .unwrap();

        assert_eq!(distiller.body(&document), "<p>Story.</p>");
    }

    #[test]
    fn invalid_filter_pattern_is_an_error() {
        let config = Config {
            filters: vec![FilterConfig {
                scope: distill_config::FilterScope::Summary,
                pattern: "(".to_string(),
                action: FilterAction::Stop,
            }],
            ..Config::default()
        };

        assert!(build_distiller(&config).is_err());
    }

    #[test]
    fn empty_exclude_rule_is_dropped() {
        assert!(exclude_rule(&ExcludeConfig::default()).is_none());
        assert_eq!(
            exclude_rule(&ExcludeConfig::tag("aside")),
            Some(ExcludeRule::tag("aside"))
        );
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from(["distill", "-", "-o", "summary", "--max-length", "90"])
            .unwrap();

        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.output, Output::Summary);
        assert_eq!(cli.max_length, Some(90));
        assert!(!cli.text);
    }
}
