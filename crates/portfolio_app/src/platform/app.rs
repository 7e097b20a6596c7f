use std::io::{self, BufRead, Stderr, Stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Context;
use engine_logging::{engine_error, engine_info, engine_warn};
use portfolio_core::{render_gallery, ChatOptions, Surface, PROJECTS};
use portfolio_engine::{stream_chat, ChatBackend, ChatSession, PayloadSink, ReqwestBackend};

use super::args::{self, Mode, USAGE};
use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::logging::{self, LogDestination};
use super::ui::terminal::TerminalSurface;

type TerminalSession = ChatSession<ReqwestBackend, TerminalSurface<Stdout, Stderr>>;

pub fn run_app() -> anyhow::Result<()> {
    let args = args::parse(std::env::args().skip(1))?;
    if args.mode == Mode::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config: AppConfig = config::load(&config_path)?;
    config.apply_args(&args);

    logging::initialize(LogDestination::from_flag(config.log_to_terminal), config.level());
    config::log_summary(&config_path, &config);

    let endpoint = config.endpoint().context("invalid backend url")?;
    engine_info!("Using backend {}", endpoint.base());
    let backend = ReqwestBackend::new(endpoint, config.settings())?;
    let options = config.options();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    match args.mode {
        Mode::Once(question) => runtime.block_on(ask_streaming(&backend, &question, &options)),
        Mode::Plain(question) => runtime.block_on(ask_plain(&backend, &question, &options)),
        Mode::Interactive | Mode::Help => {
            let surface = TerminalSurface::new(io::stdout(), io::stderr());
            runtime.block_on(chat_loop(ChatSession::new(backend, surface, options)))
        }
    }
}

async fn ask_streaming(
    backend: &dyn ChatBackend,
    question: &str,
    options: &ChatOptions,
) -> anyhow::Result<()> {
    let sink = WriterSink::new(io::stdout());
    let result = stream_chat(backend, question, options, &sink).await;
    sink.emit("\n".to_string());
    let count = result.inspect_err(|err| engine_error!("stream failed: {}", err))?;
    if sink.failed() {
        anyhow::bail!("stdout closed while streaming the answer");
    }
    engine_info!("Streamed {} payloads", count);
    Ok(())
}

/// Writes payloads as they arrive. After the first write error the rest are dropped.
struct WriterSink<W> {
    out: Mutex<W>,
    failed: AtomicBool,
}

impl<W: Write + Send> WriterSink<W> {
    fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            failed: AtomicBool::new(false),
        }
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("output lock poisoned"))?;
        out.write_all(payload.as_bytes())?;
        out.flush()
    }
}

impl<W: Write + Send> PayloadSink for WriterSink<W> {
    fn emit(&self, payload: String) {
        if self.failed() {
            return;
        }
        if let Err(err) = self.write(&payload) {
            engine_warn!("dropping streamed output: {}", err);
            self.failed.store(true, Ordering::Relaxed);
        }
    }
}

async fn ask_plain(
    backend: &dyn ChatBackend,
    question: &str,
    options: &ChatOptions,
) -> anyhow::Result<()> {
    if !options.use_rag {
        let answer = backend.ask(question).await?;
        println!("{}", answer.answer);
        return Ok(());
    }

    let answer = backend.ask_rag(question, options).await?;
    println!("{}", answer.answer);
    if !answer.hits.is_empty() {
        println!();
        for hit in &answer.hits {
            println!("  [{}#{}]", hit.section, hit.chunk_id);
        }
    }
    Ok(())
}

async fn chat_loop(mut session: TerminalSession) -> anyhow::Result<()> {
    session.start().await;

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        let view = session.state().view();
        session.surface_mut().prompt(&view);
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        match input.trim() {
            "/quit" => break,
            "/projects" => render_gallery(session.surface_mut(), PROJECTS),
            "/rebuild" => rebuild(&mut session).await,
            _ => {
                session.submit(input).await;
            }
        }
    }

    engine_info!("Chat closed after {} turns", session.state().current_turn());
    Ok(())
}

async fn rebuild(session: &mut TerminalSession) {
    engine_info!("Rebuilding retrieval index");
    match session.backend().rebuild_index().await {
        Ok(report) if report.ok => session
            .surface_mut()
            .note(&format!("Index rebuilt with {} chunks.", report.chunks)),
        Ok(_) => session
            .surface_mut()
            .show_diagnostic("The backend did not rebuild the index."),
        Err(err) => session
            .surface_mut()
            .show_diagnostic(&format!("Rebuild failed: {err}")),
    }
}
