use clap::{Parser, Subcommand};
use orbital::config;
use orbital::control::SOCKET_PATH;
use orbital::geometry::{self, Point};
use orbital::{ControlCommand, Layer};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "orbitctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Start the animation (resumes if paused)
    Play,
    /// Stop the animation and rewind it
    Stop,
    /// Freeze the animation where it is
    Pause,
    /// Play if stopped, stop if playing
    Toggle,
    /// Show a layer (lines, inner-circle, rotate-circle)
    Show { layer: Layer },
    /// Hide a layer (lines, inner-circle, rotate-circle)
    Hide { layer: Layer },
    /// Write the default config file if there is none, and print its path
    InitConfig,
    /// Print evenly spaced points on a circle, one "x y" pair per line
    Points {
        #[command(flatten)]
        circle: CircleArgs,
    },
    /// Print diameter lines through the center, one "x0 y0 x1 y1" per line
    Spokes {
        #[command(flatten)]
        circle: CircleArgs,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct CircleArgs {
    #[arg(short = 'n', long, default_value_t = 24)]
    count: usize,

    #[arg(short = 'r', long, default_value_t = 270.0)]
    radius: f64,

    #[arg(long, default_value_t = 400.5, allow_negative_numbers = true)]
    cx: f64,

    #[arg(long, default_value_t = 300.5, allow_negative_numbers = true)]
    cy: f64,
}

impl CircleArgs {
    fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play => send_command(ControlCommand::Play),
        Commands::Stop => send_command(ControlCommand::Stop),
        Commands::Pause => send_command(ControlCommand::Pause),
        Commands::Toggle => send_command(ControlCommand::Toggle),
        Commands::Show { layer } => send_command(ControlCommand::Show(layer)),
        Commands::Hide { layer } => send_command(ControlCommand::Hide(layer)),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Points { circle } => {
            let mut out = std::io::stdout().lock();
            for p in geometry::ring_points(circle.center(), circle.radius, circle.count) {
                writeln!(out, "{} {}", p.x, p.y)?;
            }
            Ok(())
        }
        Commands::Spokes { circle } => {
            let mut out = std::io::stdout().lock();
            for line in geometry::spokes(circle.center(), circle.radius, circle.count) {
                writeln!(
                    out,
                    "{} {} {} {}",
                    line.start.x, line.start.y, line.end.x, line.end.y
                )?;
            }
            Ok(())
        }
    }
}

fn send_command(command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbital at {}: {}. Is orbital running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("sending '{}'", command);
    writeln!(stream, "{}", command)?;

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    match reply.trim() {
        "ok" => Ok(()),
        "" => anyhow::bail!("orbital closed the connection without replying"),
        other => anyhow::bail!("{}", other.trim_start_matches("error: ")),
    }
}
