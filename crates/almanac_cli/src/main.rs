use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use almanac_config::DigestConfig;
use almanac_core::{Body, Observer};
use almanac_digest::{DigestRequest, compute_digest};
use almanac_ephem::AnalyticEphemeris;
use almanac_search::{
    HorizonStatus, TwilightEvent, active_showers, major_phase_on, moon_phase_at, next_season,
    season_on, sun_twilight, transits_on, utc_day,
};

#[derive(Parser)]
#[command(name = "almanac", about = "Daily astronomy events for a date and place")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full event digest for one day, as JSON
    Digest {
        /// UTC date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Elevation in metres
        #[arg(long, default_value = "0")]
        elevation: f64,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Rise, culmination and set times of one body
    RiseSet {
        /// Body name (sun, moon, mercury, ...)
        #[arg(long)]
        body: Body,
        /// UTC date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value = "0")]
        elevation: f64,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Civil, nautical and astronomical twilight
    Twilight {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value = "0")]
        elevation: f64,
    },
    /// Moon phase at 00:00 UTC and any principal phase during the day
    Phase {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Meteor showers active on a date
    Showers {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Equinox or solstice on a date, or the next one after it
    Season {
        #[arg(long)]
        date: NaiveDate,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn require_observer(lat: f64, lon: f64, elevation: f64) -> Observer {
    Observer::new(lat, lon, elevation).unwrap_or_else(|e| {
        eprintln!("Invalid observer: {e}");
        std::process::exit(1);
    })
}

fn load_config(path: Option<PathBuf>) -> DigestConfig {
    let Some(path) = path else {
        return DigestConfig::default();
    };
    DigestConfig::load(&path).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

/// Geocentre on the prime meridian, for date-only commands.
fn geocentre() -> Observer {
    require_observer(0.0, 0.0, 0.0)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Digest {
            date,
            lat,
            lon,
            elevation,
            config,
            pretty,
        } => {
            let observer = require_observer(lat, lon, elevation);
            let config = load_config(config);
            let request = DigestRequest::new(date, observer);
            let digest =
                compute_digest(&AnalyticEphemeris, &request, &config).unwrap_or_else(|e| fail(e));
            for failure in &digest.failures {
                debug!(scope = failure.scope, reason = %failure.reason, "partial digest");
            }
            let json = if pretty {
                serde_json::to_string_pretty(&digest)
            } else {
                serde_json::to_string(&digest)
            };
            println!("{}", json.unwrap_or_else(|e| fail(e)));
        }

        Commands::RiseSet {
            body,
            date,
            lat,
            lon,
            elevation,
            config,
        } => {
            let observer = require_observer(lat, lon, elevation);
            let config = load_config(config).rise_set_config();
            let day = transits_on(&AnalyticEphemeris, body, &observer, date, &config)
                .unwrap_or_else(|e| fail(e));
            match day.status {
                HorizonStatus::RisesAndSets => {}
                HorizonStatus::AlwaysUp => println!("{body} stays above the horizon"),
                HorizonStatus::NeverUp => println!("{body} stays below the horizon"),
            }
            for event in &day.events {
                println!("{:<8} {}", event.kind.name(), event.instant);
            }
        }

        Commands::Twilight {
            date,
            lat,
            lon,
            elevation,
        } => {
            let observer = require_observer(lat, lon, elevation);
            let scan = DigestConfig::default().rise_set_scan();
            for event in TwilightEvent::ALL {
                let result = sun_twilight(&AnalyticEphemeris, &observer, date, event, &scan)
                    .unwrap_or_else(|e| fail(e));
                match result.instant() {
                    Some(t) => println!("{:<20} {t}", event.name()),
                    None => println!("{:<20} -", event.name()),
                }
            }
        }

        Commands::Phase { date } => {
            let observer = geocentre();
            let (start, _) = utc_day(date);
            let phase =
                moon_phase_at(&AnalyticEphemeris, &observer, start).unwrap_or_else(|e| fail(e));
            println!(
                "{} ({:.1}% illuminated, elongation {:.2} deg)",
                phase.name.name(),
                phase.percent,
                phase.angle_deg
            );
            let scan = DigestConfig::default().lunar_phase_scan();
            if let Some(major) = major_phase_on(&AnalyticEphemeris, &observer, date, &scan)
                .unwrap_or_else(|e| fail(e))
            {
                println!("{} at {}", major.phase.name(), major.instant);
            }
        }

        Commands::Showers { date } => {
            let active = active_showers(date);
            if active.is_empty() {
                println!("No meteor showers active on {date}");
            }
            for a in active {
                println!(
                    "{:<14} peak {:02}-{:02} ({:?})",
                    a.shower.name, a.shower.peak.month, a.shower.peak.day, a.peak
                );
            }
        }

        Commands::Season { date } => {
            let observer = geocentre();
            let scan = DigestConfig::default().seasonal_scan();
            match season_on(&AnalyticEphemeris, &observer, date, &scan)
                .unwrap_or_else(|e| fail(e))
            {
                Some(ev) => println!("{} at {}", ev.season.name(), ev.instant),
                None => {
                    let (start, _) = utc_day(date);
                    let next = almanac_search::Season::ALL
                        .into_iter()
                        .filter_map(|s| {
                            next_season(&AnalyticEphemeris, &observer, start, s, &scan)
                                .unwrap_or_else(|e| fail(e))
                        })
                        .min_by(|a, b| a.instant.jd().total_cmp(&b.instant.jd()));
                    match next {
                        Some(ev) => println!("none; next: {} at {}", ev.season.name(), ev.instant),
                        None => println!("none"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digest_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "almanac", "digest", "--date", "2017-10-05", "--lat", "40.4168", "--lon", "-3.7038",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Digest {
                date, lon, pretty, ..
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2017, 10, 5).unwrap());
                assert_eq!(lon, -3.7038);
                assert!(pretty);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_body_name() {
        let cli = Cli::try_parse_from([
            "almanac", "rise-set", "--body", "Moon", "--date", "2017-10-05", "--lat", "0",
            "--lon", "0",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::RiseSet { body: Body::Moon, .. }));
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::try_parse_from(["almanac", "-vv", "showers", "--date", "2017-08-12"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_bad_date_and_body() {
        assert!(Cli::try_parse_from(["almanac", "showers", "--date", "2017-13-01"]).is_err());
        assert!(
            Cli::try_parse_from([
                "almanac", "rise-set", "--body", "vulcan", "--date", "2017-10-05", "--lat", "0",
                "--lon", "0",
            ])
            .is_err()
        );
    }
}
