// Kickoff command-line entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is for command output)
// 2. Load config
// 3. Open database
// 4. Dispatch the command

use kickoff_app::config;
use kickoff_app::db;
use kickoff_app::edition::{Dashboard, EditionRequest, EditionService};
use kickoff_core::domain::Strategy;

use anyhow::{bail, Context};
use tracing::info;
use uuid::Uuid;

const USAGE: &str = "usage:
  kickoff team <name>
  kickoff create <competition> <strategy> <edition> <team-id>...
  kickoff result <match-id> <home-goals> <away-goals>
  kickoff editions
  kickoff dashboard <edition-id> [--json]
  kickoff power <team-id>

strategies: round-robin, round-robin-double, knockout";

#[derive(Debug, PartialEq)]
enum Command {
    Team { name: String },
    Create { competition: String, request: EditionRequest },
    Result { fixture: Uuid, home: u32, away: u32 },
    Editions,
    Dashboard { edition: Uuid, json: bool },
    Power { team: Uuid },
}

fn parse_id(s: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("invalid id {s:?}"))
}

fn parse_goals(s: &str) -> anyhow::Result<u32> {
    s.parse().with_context(|| format!("invalid goal count {s:?}"))
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args {
        [cmd, name] if cmd == "team" => Ok(Command::Team { name: name.clone() }),
        [cmd, competition, strategy, edition, teams @ ..] if cmd == "create" => {
            let Some(strategy) = Strategy::from_str_name(strategy) else {
                bail!("unknown strategy {strategy:?}\n\n{USAGE}");
            };
            let team_ids = teams
                .iter()
                .map(|t| parse_id(t))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(Command::Create {
                competition: competition.clone(),
                request: EditionRequest {
                    name: edition.clone(),
                    strategy,
                    team_ids,
                },
            })
        }
        [cmd, id, home, away] if cmd == "result" => Ok(Command::Result {
            fixture: parse_id(id)?,
            home: parse_goals(home)?,
            away: parse_goals(away)?,
        }),
        [cmd] if cmd == "editions" => Ok(Command::Editions),
        [cmd, id, rest @ ..] if cmd == "dashboard" => {
            let json = match rest {
                [] => false,
                [flag] if flag == "--json" => true,
                _ => bail!("{USAGE}"),
            };
            Ok(Command::Dashboard {
                edition: parse_id(id)?,
                json,
            })
        }
        [cmd, id] if cmd == "power" => Ok(Command::Power {
            team: parse_id(id)?,
        }),
        _ => bail!("{USAGE}"),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let config = config::load_config().context("failed to load configuration")?;
    let db = db::Database::open(&config.database.path).context("failed to open database")?;
    info!("Database opened at {}", config.database.path);

    let service = EditionService::new(&db, &config);
    match command {
        Command::Team { name } => {
            let team = service.insert_team(&name)?;
            println!("{}  {}", team.id, team.name);
        }
        Command::Create {
            competition,
            request,
        } => {
            let (competition, edition) = service.create_competition(&competition, &request)?;
            println!("competition {}  {}", competition.id, competition.name);
            println!("edition     {}  {} ({})", edition.id, edition.name, edition.strategy);
        }
        Command::Result {
            fixture,
            home,
            away,
        } => {
            let f = service.record_result(fixture, home, away)?;
            println!("{}  {} - {}  [{}]", f.id, home, away, f.status);
        }
        Command::Editions => {
            for e in service.editions()? {
                println!("{}  {:<16} {}", e.id, e.strategy, e.name);
            }
        }
        Command::Dashboard { edition, json } => {
            let dashboard = service.dashboard(edition)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&dashboard)
                        .context("failed to serialize dashboard")?
                );
            } else {
                print_dashboard(&dashboard);
            }
        }
        Command::Power { team } => {
            let b = service.score_team(team)?;
            println!("financial  {:>6.1}", b.financial);
            println!("tactical   {:>6.1}", b.tactical);
            println!("age fit    {:>6.1}", b.age_fit);
            println!("cohesion   {:>6.1}", b.cohesion);
            println!("depth      {:>6.1}", b.depth);
            println!("composite  {:>6.1}", b.composite);
        }
    }
    Ok(())
}

fn print_dashboard(d: &Dashboard) {
    println!("{} / {} ({})", d.competition_name, d.edition_name, d.strategy);

    if !d.standings.is_empty() {
        println!();
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        );
        for r in &d.standings {
            println!(
                "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}",
                r.position,
                r.team_name,
                r.played,
                r.wins,
                r.draws,
                r.losses,
                r.goals_for,
                r.goals_against,
                r.goal_difference,
                r.points
            );
        }
    }

    for round in &d.rounds {
        println!();
        println!("Round {}", round.round + 1);
        for f in &round.fixtures {
            let score = match (f.home_goals, f.away_goals) {
                (Some(h), Some(a)) => format!("{h} - {a}"),
                _ => "vs".to_string(),
            };
            println!(
                "  {}  {:>20} {:^7} {:<20} [{}]",
                f.kickoff.format("%Y-%m-%d %H:%M"),
                f.home_team,
                score,
                f.away_team,
                f.status
            );
        }
    }
}

/// Initialize tracing to log to a file so stdout stays clean for command output.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("kickoff.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kickoff=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
