use crate::aircraft::{AircraftSnapshot, Fleet, OperationalState};
use crate::hangar::{HangarCapacity, HangarState};
use crate::maintenance::planner::{self, MaintenancePlanner};
use crate::status::Severity;
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;

mod aircraft;
mod checks;
mod error;
mod finding;
mod hangar;
mod maintenance;
mod status;

#[derive(Parser)]
struct Args {
    /// Path to the JSON fleet snapshot file
    #[arg(short, long, value_name = "FILE", default_value = "data/fleet.json")]
    fleet: PathBuf,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long, value_name = "DATE")]
    date: Option<String>,

    /// Disable the stochastic non-routine-finding model
    #[arg(long)]
    deterministic: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())
        .expect("Failed to spawn pager");

    let mut stdin = pager.stdin.take().expect("Failed to open stdin for pager");

    if let Err(e) = stdin.write_all(content.as_bytes()) {
        // Broken pipe is common if the user quits the pager early
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing to pager: {}", e);
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn severity_cell(severity: Severity) -> String {
    match severity {
        Severity::Ok => "OK".green().to_string(),
        Severity::Warning => "WARNING".yellow().to_string(),
        Severity::Critical => "CRITICAL".red().bold().to_string(),
        Severity::Deferred => "DEFERRED".magenta().to_string(),
    }
}

#[derive(Tabled)]
struct StatusRow {
    check: String,
    progress: String,
    severity: String,
    remaining_days: i64,
    due_date: NaiveDate,
    duration_days: String,
    note: String,
}

#[derive(Tabled)]
struct HangarRow {
    wide_body: String,
    narrow_body: String,
    total: String,
    utilization: String,
    full: bool,
}

fn print_table<R: Tabled>(rows: &[R]) {
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    println!("{}", table);
}

fn show_status(
    planner: &MaintenancePlanner,
    aircraft: &AircraftSnapshot,
    hangar: &HangarState,
    apply_stochastic: bool,
    reference_date: NaiveDate,
) {
    match planner.evaluate(aircraft, Some(hangar), apply_stochastic, reference_date) {
        Ok(statuses) => {
            let rows: Vec<StatusRow> = statuses
                .values()
                .map(|s| StatusRow {
                    check: s.check_type.to_string(),
                    progress: format!("{:.1}%", s.progress_percent),
                    severity: severity_cell(s.severity),
                    remaining_days: s.remaining_days,
                    due_date: s.projected_due_date,
                    duration_days: if s.adjusted_duration_days > s.base_duration_days {
                        format!("{} (+{})", s.adjusted_duration_days, s.finding.extra_days)
                    } else {
                        s.base_duration_days.to_string()
                    },
                    note: if s.deferred {
                        s.deferral_reason.clone()
                    } else if s.finding.present {
                        s.finding.kind.to_string()
                    } else {
                        "-".to_string()
                    },
                })
                .collect();
            print_table(&rows);
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let reference_date = match &args.date {
        Some(value) => planner::parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };

    let fleet = Fleet::load_from_file(args.fleet.to_str().unwrap())?;
    println!(
        "Fleet online. {} aircraft loaded from {}, reference date {}",
        fleet.aircraft.len(),
        args.fleet.display(),
        reference_date
    );

    let planner = MaintenancePlanner::default();
    let capacity = HangarCapacity::default();
    let apply_stochastic = !args.deterministic;

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "status".to_string(),
            "critical".to_string(),
            "findings".to_string(),
            "hangar".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        let sub = parts.get(1).map(|s| *s).unwrap_or("all");
                        let filtered: Vec<&AircraftSnapshot> = fleet.aircraft.iter()
                            .filter(|a| match sub {
                                "a" | "active" => a.state == OperationalState::Active,
                                "m" | "maintenance" => a.state == OperationalState::InMaintenance,
                                _ => true, // 'ls' or 'ls all'
                            })
                            .collect();
                        if filtered.is_empty() {
                            println!("No matching aircraft found.")
                        } else {
                            let mut table = tabled::Table::new(&filtered);
                            table.with(Style::rounded());
                            table.with(tabled::settings::Alignment::left());
                            if filtered.len() > 20 {
                                paginate(table.to_string());
                            } else {
                                println!("{}", table);
                            }
                        }
                    },
                    "status" => {
                        if let Some(tail) = parts.get(1) {
                            match fleet.find(tail) {
                                Some(aircraft) => {
                                    let hangar = HangarState::compute(&fleet, capacity);
                                    show_status(&planner, aircraft, &hangar, apply_stochastic, reference_date);
                                }
                                None => println!("Unknown tail number: {}", tail),
                            }
                        } else {
                            println!("Usage: status <tail_number>");
                        }
                    },
                    "critical" => {
                        if let Some(tail) = parts.get(1) {
                            match fleet.find(tail) {
                                Some(aircraft) => {
                                    let hangar = HangarState::compute(&fleet, capacity);
                                    match planner.evaluate(aircraft, Some(&hangar), apply_stochastic, reference_date) {
                                        Ok(statuses) => {
                                            if let Some((check, status)) = planner::most_critical(&statuses) {
                                                println!(
                                                    "{}: {} check at {:.1}% [{}], due {} ({} days)",
                                                    aircraft.tail_number,
                                                    check,
                                                    status.progress_percent,
                                                    severity_cell(status.severity),
                                                    status.projected_due_date,
                                                    status.remaining_days,
                                                );
                                            }
                                        }
                                        Err(e) => println!("Error: {}", e),
                                    }
                                }
                                None => println!("Unknown tail number: {}", tail),
                            }
                        } else {
                            println!("Usage: critical <tail_number>");
                        }
                    },
                    "findings" => {
                        if let Some(tail) = parts.get(1) {
                            match fleet.find(tail) {
                                Some(aircraft) => {
                                    match planner.evaluate(aircraft, None, apply_stochastic, reference_date) {
                                        Ok(statuses) => {
                                            let found = planner::findings(&statuses);
                                            if found.is_empty() {
                                                println!("No non-routine findings for {}.", aircraft.tail_number);
                                            } else {
                                                for (check, finding) in found {
                                                    println!(
                                                        "{} check: {} (+{} days) - {}",
                                                        check, finding.kind, finding.extra_days, finding.description
                                                    );
                                                }
                                            }
                                        }
                                        Err(e) => println!("Error: {}", e),
                                    }
                                }
                                None => println!("Unknown tail number: {}", tail),
                            }
                        } else {
                            println!("Usage: findings <tail_number>");
                        }
                    },
                    "hangar" => {
                        let state = HangarState::compute(&fleet, capacity);
                        let row = HangarRow {
                            wide_body: format!("{}/{}", state.wide_body_count, state.capacity.wide_body),
                            narrow_body: format!("{}/{}", state.narrow_body_count, state.capacity.narrow_body),
                            total: format!("{}/{}", state.total_count, state.capacity.total),
                            utilization: format!("{:.1}%", state.utilization_percent),
                            full: state.is_full,
                        };
                        print_table(&[row]);
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls [filter]       - List the fleet, optionally filtered: a - active, m - in maintenance");
                        println!("  status <tail>     - Show all four check statuses for an aircraft");
                        println!("  critical <tail>   - Show the check closest to its limit");
                        println!("  findings <tail>   - List simulated non-routine findings");
                        println!("  hangar            - Show hangar occupancy and capacity");
                        println!("  help / ?          - Show this help menu");
                        println!("  exit / quit       - Exit the console\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
