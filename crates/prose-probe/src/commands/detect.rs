//! Detect command: score a text for likely machine generation.

use std::io::IsTerminal;

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument, warn};

use prose_probe_core::config::Config;
use prose_probe_core::{Detection, DetectionReport, markdown};

use super::{read_input_file, read_input_stream};

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug, Default)]
pub struct DetectArgs {
    /// File to score (`-` or omitted reads standard input).
    pub file: Option<Utf8PathBuf>,

    /// Score this text instead of reading a file.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Fail when the AI probability (percent) is above this value.
    #[arg(long, value_name = "PCT")]
    pub max_ai: Option<f64>,

    /// Strip markdown before scoring (implied for `.md` files).
    #[arg(long)]
    pub strip_markdown: bool,
}

/// Where the text came from, for messages.
enum Source {
    Inline,
    File(Utf8PathBuf),
    Stdin,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => f.write_str("text"),
            Self::File(path) => write!(f, "{path}"),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

/// Score the input and print the report.
#[instrument(name = "cmd_detect", skip_all, fields(file = ?args.file))]
pub fn cmd_detect(
    args: DetectArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(max_ai = ?args.max_ai, inline = args.text.is_some(), "executing detect command");

    let (source, content) = match (args.text, args.file) {
        (Some(text), _) => (Source::Inline, text),
        (None, Some(path)) if path.as_str() != "-" => {
            match read_input_file(&path, max_input_bytes) {
                Ok(content) => (Source::File(path), content),
                Err(err) if global_json => {
                    warn!(file = %path, error = %err, "input unreadable");
                    let unreadable = Detection::Rejected {
                        error: format!("Could not read file: {err:#}"),
                    };
                    println!("{}", serde_json::to_string_pretty(&unreadable)?);
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
        (None, _) => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("no input: pass a FILE, --text, or pipe text on standard input");
            }
            (Source::Stdin, read_input_stream(stdin.lock(), max_input_bytes)?)
        }
    };

    let is_markdown = matches!(&source, Source::File(path) if path.extension() == Some("md"));
    let prose = if args.strip_markdown || config.strip_markdown || is_markdown {
        markdown::strip_to_prose(&content)
    } else {
        content
    };

    let detection = prose_probe_core::detect(&prose);
    let threshold = args.max_ai.or(config.max_ai_probability);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    }

    let report = match detection {
        Detection::Scored(report) => report,
        Detection::Rejected { error } if global_json => {
            info!(%source, %error, "input rejected");
            return Ok(());
        }
        Detection::Rejected { error } => bail!("{source}: {error}"),
    };

    if !global_json {
        print_report(&report);
    }

    info!(%source, ai_probability = report.ai_probability, "detect completed");

    if let Some(max) = threshold {
        if report.ai_probability > max {
            bail!(
                "{source} scores {:.1}% AI (max: {max:.1}%). Vary sentence length and openers.",
                report.ai_probability,
            );
        }
        if !global_json {
            println!(
                "{} {source} scores {:.1}% AI (max: {max:.1}%)",
                "PASS:".green(),
                report.ai_probability,
            );
        }
    }

    Ok(())
}

fn print_report(report: &DetectionReport) {
    let ai = format!("{:.1}%", report.ai_probability);
    let ai = if report.ai_probability > 60.0 {
        ai.red().bold().to_string()
    } else if report.ai_probability > 40.0 {
        ai.yellow().bold().to_string()
    } else {
        ai.green().bold().to_string()
    };
    println!("{}: {ai}", "AI probability".dimmed());
    println!(
        "{}: {:.1}%",
        "Human probability".dimmed(),
        report.human_probability
    );

    let m = &report.metrics;
    println!();
    println!("{}", "Metrics".bold().underline());
    println!("  {:<16} {:.3}", "burstiness", m.burstiness);
    println!("  {:<16} {:.2}", "perplexity", m.perplexity);
    println!("  {:<16} {:.3}", "diversity", m.diversity);
    println!("  {:<16} {:.3}", "repetition", m.repetition);
    println!("  {:<16} {:.3}", "start diversity", m.start_diversity);

    println!();
    println!("{}", "Analysis".bold().underline());
    for line in &report.analysis {
        println!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIFORM: &str = "The cat sat. The dog ran. The bird flew. The fish swam.";

    fn inline(text: &str) -> DetectArgs {
        DetectArgs {
            text: Some(text.to_string()),
            ..DetectArgs::default()
        }
    }

    #[test]
    fn inline_text_scores() {
        assert!(cmd_detect(inline(UNIFORM), false, &Config::default(), None).is_ok());
        assert!(cmd_detect(inline(UNIFORM), true, &Config::default(), None).is_ok());
    }

    #[test]
    fn short_text_fails_only_in_text_mode() {
        let err = cmd_detect(inline("tiny"), false, &Config::default(), None).unwrap_err();
        assert!(err.to_string().contains("Text too short for analysis"));
        assert!(cmd_detect(inline("tiny"), true, &Config::default(), None).is_ok());
    }

    #[test]
    fn gate_uses_flag_over_config() {
        let config = Config {
            max_ai_probability: Some(90.0),
            ..Config::default()
        };
        let args = DetectArgs {
            max_ai: Some(50.0),
            ..inline(UNIFORM)
        };
        let err = cmd_detect(args, false, &config, None).unwrap_err();
        assert!(err.to_string().contains("60.0% AI"));
        assert!(cmd_detect(inline(UNIFORM), false, &config, None).is_ok());
    }

    #[test]
    fn markdown_file_is_stripped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("notes.md")).unwrap();
        std::fs::write(&path, format!("# Title\n\n{UNIFORM}\n\n```\nlet x = 1;\n```\n")).unwrap();

        let args = DetectArgs {
            file: Some(path),
            max_ai: Some(60.0),
            ..DetectArgs::default()
        };
        assert!(cmd_detect(args, false, &Config::default(), None).is_ok());
    }

    #[test]
    fn unreadable_file_is_an_error_object_in_json_mode() {
        let args = || DetectArgs {
            file: Some(Utf8PathBuf::from("/no/such/draft.txt")),
            ..DetectArgs::default()
        };
        assert!(cmd_detect(args(), true, &Config::default(), None).is_ok());
        assert!(cmd_detect(args(), false, &Config::default(), None).is_err());
    }

    #[test]
    fn file_over_limit_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("big.txt")).unwrap();
        std::fs::write(&path, UNIFORM).unwrap();

        let args = DetectArgs {
            file: Some(path),
            ..DetectArgs::default()
        };
        let err = cmd_detect(args, false, &Config::default(), Some(8)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }
}
