mod ui;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use stagequest::character::PlayerClass;
use stagequest::core::config::{GameConfig, XpShare};
use stagequest::core::error::ActionError;
use stagequest::core::game::Game;
use stagequest::core::turn::ActionReport;
use std::io;
use std::time::Duration;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ui::app::{App, Command};
use ui::prompt::PromptSelector;

#[derive(Parser, Debug)]
#[command(name = "stagequest")]
#[command(version)]
#[command(about = "Turn-based party battler for the terminal", long_about = None)]
struct Args {
    /// Play with a lone hero instead of the hero and sage party
    #[arg(long)]
    solo: bool,

    /// Seed for reproducible battles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Gold the party starts with
    #[arg(long, default_value = "0")]
    gold: u32,

    /// Give stage XP only to members still standing
    #[arg(long)]
    xp_living_only: bool,

    /// Directory for the rolling log file
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let party = if self.solo {
            vec![PlayerClass::Hero]
        } else {
            vec![PlayerClass::Hero, PlayerClass::Sage]
        };
        GameConfig {
            party,
            starting_gold: self.gold,
            seed: self.seed,
            xp_share: if self.xp_living_only {
                XpShare::LivingMembers
            } else {
                XpShare::AllMembers
            },
            ..Default::default()
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Log to a file only so tracing output never collides with ratatui.
    let file_appender = rolling::daily(&args.log_dir, "stagequest.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    let mut game = Game::new(args.game_config());
    tracing::info!(party = game.party().len(), seed = ?args.seed, "session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let progression = game.progression();
    tracing::info!(
        highest_stage = progression.highest_stage,
        defeats = progression.defeats,
        "session ended"
    );
    println!(
        "Reached stage {} (best {}), {} stages cleared, {} bosses defeated.",
        progression.stage,
        progression.highest_stage,
        progression.stages_cleared,
        progression.bosses_defeated
    );
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> io::Result<()> {
    let mut app = App::new();
    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::draw(frame, &app, &snapshot))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(command) = app.handle_key(key.code, &snapshot) else {
            continue;
        };
        if command == Command::Quit {
            return Ok(());
        }
        let result = {
            let mut selector = PromptSelector::new(terminal, &app, &snapshot);
            execute(game, command, &mut selector)
        };
        app.record(&result);
    }
}

fn execute<B: Backend>(
    game: &mut Game,
    command: Command,
    selector: &mut PromptSelector<'_, B>,
) -> Result<ActionReport, ActionError> {
    match command {
        Command::Attack => game.player_attack(selector),
        Command::Special => game.player_special_attack(selector),
        Command::Defend => game.player_defend(),
        Command::NextStage => game.start_next_stage(),
        Command::UseItem(item) => game.equip_or_use_item(item, None, selector),
        Command::Buy(item) => game.buy_item(item),
        Command::Upgrade { member, stat } => game.upgrade_stat(member, stat.name()),
        Command::Unequip { member, slot } => game.unequip(member, slot.name()),
        Command::Quit => Ok(ActionReport::default()),
    }
}
