//! Command-line flags. Everything is optional; no flags means the interactive chat.

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: portfolio-chat [options]

options:
  --config PATH     config file (default ./portfolio_chat.ron)
  --host NAME       host the page is served from; loopback names use the local backend
  --backend URL     explicit backend base URL
  --no-rag          answer without retrieved context
  --model NAME      backend model variant
  --top-k N         number of retrieved chunks
  --once QUESTION   stream one answer to stdout and exit
  --plain QUESTION  ask the non-streaming endpoint and exit
  -h, --help        show this help

chat commands: /projects, /rebuild, /quit";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Interactive,
    Once(String),
    Plain(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub backend: Option<String>,
    pub no_rag: bool,
    pub model: Option<String>,
    pub top_k: Option<u32>,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("{flag} expects a number, got {value:?}")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown argument {0:?}\n\n{USAGE}")]
    Unknown(String),
}

pub fn parse<I>(raw: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut raw = raw.into_iter();
    while let Some(arg) = raw.next() {
        let mut value =
            |flag: &str| raw.next().ok_or_else(|| ArgsError::MissingValue(flag.to_string()));
        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--host" => args.host = Some(value("--host")?),
            "--backend" => args.backend = Some(value("--backend")?),
            "--no-rag" => args.no_rag = true,
            "--model" => args.model = Some(value("--model")?),
            "--top-k" => {
                let text = value("--top-k")?;
                let top_k = text.parse().map_err(|_| ArgsError::InvalidNumber {
                    flag: "--top-k".to_string(),
                    value: text.clone(),
                })?;
                args.top_k = Some(top_k);
            }
            "--once" => args.mode = Mode::Once(value("--once")?),
            "--plain" => args.mode = Mode::Plain(value("--plain")?),
            "-h" | "--help" => args.mode = Mode::Help,
            other => return Err(ArgsError::Unknown(other.to_string())),
        }
    }
    Ok(args)
}
