//! `stay` CLI: a command-line front desk for a small holiday home.
//!
//! The engine keeps nothing on disk. This tool loads a JSON state file,
//! applies one command and writes the state back.
//!
//! ## Usage
//!
//! ```sh
//! # Book room 1 (any user may book)
//! stay --state home.json book -u admin -p admin \
//!     --room 1 --name "Sarah Jenkins" --from 2024-06-01 --to 2024-06-05 --paid '$1,200'
//!
//! # Would room 1 be free from the 5th? (no: the 5th is a check-out day)
//! stay --state home.json check --room 1 --from 2024-06-05 --to 2024-06-07
//!
//! # Who is in which room on a day
//! stay --state home.json day 2024-06-03
//!
//! # Four months of calendar starting June 2024
//! stay --state home.json calendar --month 2024-06
//!
//! # Create a user (administrator only)
//! stay --state home.json add-user -u admin -p admin --username clerk --new-password secret
//! ```
//!
//! Set `RUST_LOG=debug` to see engine decisions on stderr.

mod render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use stay_engine::auth::NewUser;
use stay_engine::{
    parse_iso_date, ActionOutcome, BookingDesk, Credentials, EngineConfig, ExecuteError,
    GuestInfo, MonthCursor, Payment, PendingAction, ProposedStay, ReservationId, RoomNumber,
    Snapshot, StayError, UserId,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stay", version, about = "Holiday home reservation desk")]
struct Cli {
    /// Engine configuration (JSON). Defaults: rooms 1-3, admin/admin.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State file holding reservations and users. Created on first write.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Treat this date as today instead of the local clock.
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AuthArgs {
    /// Username presented to the access gate
    #[arg(short = 'u', long = "user")]
    user: String,
    /// Password presented to the access gate
    #[arg(short = 'p', long)]
    password: String,
}

impl AuthArgs {
    fn credentials(&self) -> Credentials {
        Credentials::new(&self.user, &self.password)
    }
}

#[derive(Args)]
struct StayArgs {
    #[arg(long)]
    room: u32,
    /// Guest name
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: NaiveDate,
    /// Check-out date (YYYY-MM-DD), inclusive. Defaults to the check-in date.
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Amount paid, free text (e.g. '$1,200')
    #[arg(long, default_value = "", conflicts_with = "exempt")]
    paid: String,
    /// Waive payment for this stay
    #[arg(long)]
    exempt: bool,
}

impl StayArgs {
    fn into_stay(self) -> ProposedStay {
        ProposedStay {
            room: RoomNumber(self.room),
            guest: GuestInfo {
                name: self.name,
                address: self.address,
                phone: self.phone,
            },
            check_in: self.from,
            check_out: self.to.unwrap_or(self.from),
            payment: Payment {
                amount_paid: self.paid,
                is_exempted: self.exempt,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Book a room
    Book {
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Replace every field of an existing reservation
    Modify {
        #[command(flatten)]
        auth: AuthArgs,
        /// Reservation id
        #[arg(long)]
        id: ReservationId,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Delete a reservation
    Delete {
        #[command(flatten)]
        auth: AuthArgs,
        /// Reservation id
        #[arg(long)]
        id: ReservationId,
    },
    /// Check whether a room is free for a range without booking it
    Check {
        #[arg(long)]
        room: u32,
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        /// Reservation being edited, excluded from the check
        #[arg(long)]
        exclude: Option<ReservationId>,
    },
    /// Show every room's occupant on a day
    Day {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Print month calendars with occupancy
    Calendar {
        /// First month to show (YYYY-MM). Defaults to the current month.
        #[arg(long, value_parser = parse_month)]
        month: Option<MonthCursor>,
        /// Number of months. Defaults to the configured value.
        #[arg(long)]
        count: Option<u32>,
    },
    /// List all reservations
    List,
    /// Create a regular user (administrator only)
    AddUser {
        #[command(flatten)]
        auth: AuthArgs,
        #[arg(long)]
        username: String,
        #[arg(long)]
        new_password: String,
    },
    /// Delete a regular user (administrator only)
    DeleteUser {
        #[command(flatten)]
        auth: AuthArgs,
        #[arg(long)]
        id: u64,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).context("Failed to load configuration")?,
        None => EngineConfig::default(),
    };
    let mut desk = load_desk(config, cli.state.as_deref())?;
    if let Some(today) = cli.today {
        desk.pin_today(today);
    }
    let out = Output {
        json: cli.json,
        state: cli.state,
    };

    match cli.command {
        Commands::Book { auth, stay } => {
            let pending = PendingAction::Book(stay.into_stay());
            run_gated(&mut desk, pending, &auth, &out)?;
        }
        Commands::Modify { auth, id, stay } => {
            let pending = PendingAction::Modify {
                id,
                stay: stay.into_stay(),
            };
            run_gated(&mut desk, pending, &auth, &out)?;
        }
        Commands::Delete { auth, id } => {
            run_gated(&mut desk, PendingAction::Delete(id), &auth, &out)?;
        }
        Commands::AddUser {
            auth,
            username,
            new_password,
        } => {
            let pending = PendingAction::CreateUser(NewUser {
                username,
                password: new_password,
            });
            run_gated(&mut desk, pending, &auth, &out)?;
        }
        Commands::DeleteUser { auth, id } => {
            run_gated(&mut desk, PendingAction::DeleteUser(UserId(id)), &auth, &out)?;
        }
        Commands::Check {
            room,
            from,
            to,
            exclude,
        } => {
            let room = RoomNumber(room);
            let to = to.unwrap_or(from);
            if !desk.rooms().contains(room) {
                bail!("{}", StayError::UnknownRoom(room));
            }
            stay_engine::can_commit(desk.reservations(), room, from, to, exclude)
                .with_context(|| format!("Room {} is not available", room))?;
            if out.json {
                println!("{}", serde_json::json!({ "ok": true }));
            } else {
                println!("Room {} is available from {} to {}", room, from, to);
            }
        }
        Commands::Day { date } => {
            let statuses = desk.day_detail(date);
            if out.json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                print!("{}", render::day(date, &statuses));
            }
        }
        Commands::Calendar { month, count } => {
            let first = month.unwrap_or_else(|| MonthCursor::containing(desk.today()));
            let grids = match count {
                Some(count) => first
                    .display_months(count)?
                    .into_iter()
                    .map(|m| desk.month_grid(m))
                    .collect::<Result<Vec<_>, _>>()?,
                None => desk.display_months(first.first_day())?,
            };
            if out.json {
                println!("{}", serde_json::to_string_pretty(&grids)?);
            } else {
                let text: Vec<String> = grids.iter().map(render::month).collect();
                print!("{}", text.join("\n"));
            }
        }
        Commands::List => {
            let reservations = desk.reservations().snapshot();
            if out.json {
                println!("{}", serde_json::to_string_pretty(&reservations)?);
            } else {
                print!("{}", render::list(&reservations));
            }
        }
    }

    Ok(())
}

/// Where command results go.
struct Output {
    json: bool,
    state: Option<PathBuf>,
}

/// Run a gated action, report its outcome and persist the new state.
fn run_gated(
    desk: &mut BookingDesk,
    pending: PendingAction,
    auth: &AuthArgs,
    out: &Output,
) -> Result<()> {
    let outcome = match desk.execute(pending, &auth.credentials()) {
        Ok(outcome) => outcome,
        Err(ExecuteError::Rejected(rejection)) => {
            rejection.pending.cancel();
            bail!("{}", rejection.error);
        }
        Err(ExecuteError::Failed(e)) => bail!("{}", e),
    };

    if out.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", describe(&outcome));
    }

    if let Some(path) = &out.state {
        save_state(path, &desk.snapshot())?;
    }
    Ok(())
}

fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Booked(r) => format!(
            "Booked room {} for {} from {} to {} (#{})",
            r.room, r.guest.name, r.check_in, r.check_out, r.id
        ),
        ActionOutcome::Modified(r) => format!(
            "Updated #{}: room {} for {} from {} to {}",
            r.id, r.room, r.guest.name, r.check_in, r.check_out
        ),
        ActionOutcome::Deleted(Some(r)) => format!("Deleted #{} ({})", r.id, r.guest.name),
        ActionOutcome::Deleted(None) => "Nothing to delete".to_string(),
        ActionOutcome::UserCreated(u) => format!("Created user {} (#{})", u.username, u.id),
        ActionOutcome::UserDeleted(u) => format!("Deleted user {} (#{})", u.username, u.id),
    }
}

fn load_desk(config: EngineConfig, state: Option<&Path>) -> Result<BookingDesk> {
    match state {
        Some(path) if path.exists() => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read state file: {}", path.display()))?;
            let snapshot: Snapshot = serde_json::from_str(&json)
                .with_context(|| format!("Invalid state file: {}", path.display()))?;
            debug!(path = %path.display(), "Loaded state");
            BookingDesk::with_snapshot(config, snapshot)
                .with_context(|| format!("Inconsistent state file: {}", path.display()))
        }
        _ => BookingDesk::new(config).context("Invalid configuration"),
    }
}

fn save_state(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write state file: {}", path.display()))?;
    info!(path = %path.display(), reservations = snapshot.reservations.len(), "Saved state");
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_iso_date(s).map_err(|e| e.to_string())
}

fn parse_month(s: &str) -> Result<MonthCursor, String> {
    let first = parse_iso_date(&format!("{}-01", s.trim()))
        .map_err(|_| format!("expected YYYY-MM, got '{}'", s))?;
    Ok(MonthCursor::containing(first))
}
