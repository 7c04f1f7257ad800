use std::path::PathBuf;

use anyhow::Result;

use crate::command::AppCommand;
use crate::config::DEFAULT_OUTPUT_DIR;
use crate::exports::ReportStyle;

pub type CliCommand = AppCommand;

const COMMANDS: [&str; 4] = ["generate", "recommend", "prompt", "sample-profile"];

pub fn version_text() -> String {
    format!("mdr-scenario {}", env!("CARGO_PKG_VERSION"))
}

pub fn usage_text() -> String {
    format!(
        "{version}
MDR & Offensive Security Scenario Generator

Usage:
  mdr-scenario generate --profile <PATH> [--out-dir <DIR>] [--style <STYLE>] [--no-advisory]
  mdr-scenario recommend --profile <PATH>
  mdr-scenario prompt --profile <PATH>
  mdr-scenario sample-profile
  mdr-scenario --help
  mdr-scenario --version

Options:
  -p, --profile <PATH>   Client profile JSON (see `sample-profile`)
  -o, --out-dir <DIR>    Generate: directory for the PDF and PPTX (default: {default_out_dir})
      --style <STYLE>    Generate: report style, classic or branded (default: branded)
      --no-advisory      Generate: omit the vendor advisory section from the report
  -h, --help             Show this help text
  -V, --version          Show version

Environment:
  MDR_AI_MODE            cloud (default), local or disabled
  GEMINI_API_KEY         Gemini credential for cloud mode
  MDR_AI_OLLAMA_MODEL    Model for local mode (default: qwen3:8b)

Notes:
  - Running with no arguments shows this help screen.
  - A failed narrative still prints recommendations; no documents are written.",
        version = version_text(),
        default_out_dir = DEFAULT_OUTPUT_DIR,
    )
}

fn missing_value(flag: &str) -> anyhow::Error {
    anyhow::anyhow!("Missing value for {}.\n\n{}", flag, usage_text())
}

fn parse_style_arg(raw: &str) -> Result<ReportStyle> {
    ReportStyle::parse(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid value for --style: '{}'. Expected 'classic' or 'branded'.\n\n{}",
            raw,
            usage_text()
        )
    })
}

fn inline_value<'a>(arg: &'a str, flag: &str) -> Result<&'a str> {
    let value = arg.split_once('=').map(|(_, v)| v).unwrap_or_default();
    if value.is_empty() {
        return Err(missing_value(flag));
    }
    Ok(value)
}

pub fn parse_cli_args<I, S>(args: I) -> Result<AppCommand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = args.into_iter();
    let _program_name = iter.next();

    let mut command: Option<String> = None;
    let mut profile: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut style: Option<ReportStyle> = None;
    let mut no_advisory = false;

    while let Some(arg) = iter.next() {
        let arg = arg.as_ref();
        match arg {
            "-h" | "--help" => return Ok(AppCommand::Help),
            "-V" | "--version" => return Ok(AppCommand::Version),
            _ if COMMANDS.iter().any(|c| *c == arg) => {
                if command.as_deref().is_some_and(|existing| existing != arg) {
                    return Err(anyhow::anyhow!(
                        "Multiple commands provided. Use only one command.\n\n{}",
                        usage_text()
                    ));
                }
                command = Some(arg.to_string());
            }
            "-p" | "--profile" => {
                let value = iter.next().ok_or_else(|| missing_value("--profile"))?;
                profile = Some(PathBuf::from(value.as_ref()));
            }
            "-o" | "--out-dir" => {
                let value = iter.next().ok_or_else(|| missing_value("--out-dir"))?;
                out_dir = Some(PathBuf::from(value.as_ref()));
            }
            "--style" => {
                let value = iter.next().ok_or_else(|| missing_value("--style"))?;
                style = Some(parse_style_arg(value.as_ref())?);
            }
            "--no-advisory" => no_advisory = true,
            _ if arg.starts_with("--profile=") => {
                profile = Some(PathBuf::from(inline_value(arg, "--profile")?));
            }
            _ if arg.starts_with("--out-dir=") => {
                out_dir = Some(PathBuf::from(inline_value(arg, "--out-dir")?));
            }
            _ if arg.starts_with("--style=") => {
                style = Some(parse_style_arg(inline_value(arg, "--style")?)?);
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown argument: {arg}\n\n{}",
                    usage_text()
                ));
            }
        }
    }

    let generate_only = out_dir.is_some() || style.is_some() || no_advisory;

    let Some(selected) = command else {
        if profile.is_none() && !generate_only {
            return Ok(AppCommand::Help);
        }
        return Err(anyhow::anyhow!(
            "Missing command. Use one of: {}.\n\n{}",
            COMMANDS.join(", "),
            usage_text()
        ));
    };

    if selected != "generate" && generate_only {
        return Err(anyhow::anyhow!(
            "--out-dir/--style/--no-advisory are only valid with generate.\n\n{}",
            usage_text()
        ));
    }

    let require_profile = |profile: Option<PathBuf>| {
        profile.ok_or_else(|| {
            anyhow::anyhow!(
                "Missing --profile for {}. Run `mdr-scenario sample-profile` for a template.\n\n{}",
                selected,
                usage_text()
            )
        })
    };

    match selected.as_str() {
        "generate" => Ok(AppCommand::Generate {
            profile: require_profile(profile)?,
            out_dir,
            style,
            include_advisory: !no_advisory,
        }),
        "recommend" => Ok(AppCommand::Recommend {
            profile: require_profile(profile)?,
        }),
        "prompt" => Ok(AppCommand::Prompt {
            profile: require_profile(profile)?,
        }),
        "sample-profile" => {
            if profile.is_some() {
                return Err(anyhow::anyhow!(
                    "--profile is not valid with sample-profile.\n\n{}",
                    usage_text()
                ));
            }
            Ok(AppCommand::SampleProfile)
        }
        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\n\n{}",
            usage_text()
        )),
    }
}
