use std::io;
use std::io::Write;

use anyhow::Context;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use rand::Rng;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use agelife::config::Config;
use agelife::engine::Engine;
use agelife::events::Event;
use agelife::grid::Grid;
use agelife::io::Ticker;
use agelife::menu::Command;
use agelife::menu::Mode;
use agelife::menu::Options;
use agelife::menu::Source;
use agelife::menu::Speed;
use agelife::menu::WELCOME;
use agelife::parse_grid;
use agelife::render::Palette;
use agelife::render::Renderer;
use agelife::render::TermRenderer;
use agelife::render::TextRenderer;
use agelife::render::draw_grid;
use agelife::world::Advance;
use agelife::world::World;

/// Keeps the terminal in raw mode, with mouse capture, for as long as it's alive
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnableMouseCapture)?;

        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            warn!("Failed to disable mouse capture: {e}");
        }

        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
    }
}

/// Print `msg` and read the answer, without its line break
fn prompt(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Input was closed"));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn new_grid<G: Rng>(config: &Config, rng: &mut G) -> anyhow::Result<Grid> {
    let line = prompt("Enter data file name for a grid ([enter] for random-generated grid): ")?;

    let grid = match Source::parse(&line) {
        Source::Random => Grid::random(config, rng),
        Source::File(path) => parse_grid::load_grid(&path)
            .with_context(|| format!("Can not load grid file {}", path.display()))?,
    };

    println!("Grid's height is {}", grid.rows());
    println!("Grid's width is {}", grid.cols());

    Ok(grid)
}

fn start_run<R: Renderer + ?Sized>(renderer: &mut R, grid: &Grid) -> io::Result<()> {
    renderer.dimensions(grid.rows(), grid.cols())?;
    draw_grid(renderer, grid)
}

/// Advance once per blank line, until the world is stable or the user quits
fn run_manual<R: Renderer + ?Sized>(renderer: &mut R, world: &mut World) -> anyhow::Result<()> {
    loop {
        let line =
            prompt("Press enter to advance the grid, type quit to stop the simulation: ")?;

        match line.parse::<Command>()? {
            Command::Quit => return Ok(()),
            Command::Continue => {
                let advance = world.advance();
                draw_grid(renderer, world.grid())?;

                if advance == Advance::Stable {
                    return Ok(());
                }
            }
        }
    }
}

/// Advance on every tick, until the world is stable or the user presses a key or a mouse button
fn run_timed<R: Renderer + ?Sized>(
    renderer: &mut R,
    world: &mut World,
    speed: Speed,
) -> anyhow::Result<()> {
    let _raw = RawMode::enable().context("Failed to set up the terminal")?;
    let mut ticker = Ticker::new(speed.interval());

    loop {
        match ticker.wait()? {
            Event::Cancel => {
                info!(generation = world.generation(), "Run cancelled");
                return Ok(());
            }
            Event::Advance => {
                let advance = world.advance();
                draw_grid(renderer, world.grid())?;

                if advance == Advance::Stable {
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse(std::env::args().skip(1))?;

    let config = Config::default().with_rule(options.rule);
    let mut rng = rand::thread_rng();

    info!(rule = %config.rule, max_age = config.max_age, "Starting");

    let mut renderer: Box<dyn Renderer> = if options.text {
        Box::new(TextRenderer::new(io::stdout()).with_crlf())
    } else {
        Box::new(TermRenderer::new(
            io::stdout(),
            Palette::random(config.max_age, &mut rng),
        ))
    };

    println!("{WELCOME}");
    prompt("Hit [enter] to continue....   ")?;

    let grid = new_grid(&config, &mut rng)?;
    start_run(renderer.as_mut(), &grid)?;

    let mut world = World::new(Engine::from_config(&config), grid);

    loop {
        let line = prompt(
            "Enter manual for manual mode otherwise the simulation is run automatically: ",
        )?;

        match Mode::parse(&line) {
            Mode::Manual => run_manual(renderer.as_mut(), &mut world)?,
            Mode::Timed => {
                println!("Enter the simulation speed:");
                println!("1. slow");
                println!("2. medium");
                println!("3. fast");

                let speed: Speed =
                    prompt("Pick either 1, 2, or 3 to choose the simulation speed: ")?.parse()?;

                run_timed(renderer.as_mut(), &mut world, speed)?;
            }
        }

        world.clear();
        draw_grid(renderer.as_mut(), world.grid())?;

        let line =
            prompt("Press enter to start a new simulation, type quit to stop the simulation: ")?;

        match line.parse::<Command>()? {
            Command::Continue => {
                let grid = new_grid(&config, &mut rng)?;
                start_run(renderer.as_mut(), &grid)?;
                world.replace(grid);
            }
            Command::Quit => break,
        }
    }

    Ok(())
}
