/// Entry point and game loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use coinclimb::config::GameConfig;
use coinclimb::sim::event::GameEvent;
use coinclimb::sim::loader::load_level;
use coinclimb::sim::session::{Action, Session};
use coinclimb::sim::step;
use coinclimb::ui::input::{prompt_line, ActionParser, ACTION_PROMPT, LEVEL_PROMPT};
use coinclimb::ui::renderer::Renderer;
use coinclimb::ui::sound::{self, SoundEngine};

/// Turn-based tile platformer: climb walls, grab coins, reach the goal.
#[derive(Parser, Debug)]
#[command(name = "coinclimb", version, about)]
struct Cli {
    /// Level file to play. Prompted for when omitted.
    level: Option<PathBuf>,

    /// Config file (default: config.toml next to the binary or in the CWD).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the map without colours.
    #[arg(long)]
    no_color: bool,

    /// Disable sound effects.
    #[arg(long)]
    mute: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = GameConfig::load(cli.config.as_deref()).context("loading config")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let path = match cli.level {
        Some(p) => p,
        None => match prompt_line(&mut input, &mut out, LEVEL_PROMPT)? {
            Some(line) => PathBuf::from(line.trim()),
            None => return Ok(()),
        },
    };
    let def = load_level(&path, &config.glyphs)
        .with_context(|| format!("loading level {}", path.display()))?;

    let parser = ActionParser::new(&config.keys);
    let ctx = LoopContext {
        renderer: Renderer::new(config.glyphs.clone(), config.display.color && !cli.no_color),
        help: parser.help_text(),
        parser,
        sound: if config.display.sound && !cli.mute { SoundEngine::new() } else { None },
    };

    let (session, events) = Session::start(def.level, def.start)
        .with_context(|| format!("starting level '{}'", def.name))?;
    let session = game_loop(session, events, &mut input, &mut out, &ctx)?;

    ctx.renderer.farewell(&mut out, &session)?;
    info!(
        "session over: {:?}, score {}, {} turns",
        session.phase, session.score, session.turns
    );
    Ok(())
}

/// Everything the loop needs besides the session and the I/O streams.
struct LoopContext {
    renderer: Renderer,
    parser: ActionParser,
    help: String,
    sound: Option<SoundEngine>,
}

/// Prompt → step → report, until the session reaches a terminal phase.
/// End of input counts as quitting.
fn game_loop<R: BufRead, W: Write>(
    mut session: Session,
    mut events: Vec<GameEvent>,
    input: &mut R,
    out: &mut W,
    ctx: &LoopContext,
) -> Result<Session> {
    loop {
        ctx.renderer.report(out, &events, &ctx.help)?;
        sound::play_events(ctx.sound.as_ref(), &events);

        if session.phase.is_terminal() {
            return Ok(session);
        }

        ctx.renderer.render(out, &session)?;
        let action = match prompt_line(input, out, ACTION_PROMPT)? {
            Some(line) => ctx.parser.parse(&line),
            None => Action::Quit,
        };

        let (next, next_events) = step::step(session, action)?;
        session = next;
        events = next_events;
    }
}
