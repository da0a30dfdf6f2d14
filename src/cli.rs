use crate::{
    adapters::json::{self, from_json, to_json},
    config::Config,
    gateways::geocoding_gateway,
};
use anyhow::{anyhow, bail, Context as _, Result};
use clap::{Parser, Subcommand};
use officemap_core::{
    debounce::FieldGroupSession,
    entities::{MapPoint, Office, Radius},
    gateways::geocode::GeoCodingGateway,
    location::{LocationEdit, LocationFields},
    usecases,
    util::validate::Validate,
};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[derive(Parser)]
#[command(author, version, about, long_about, propagate_version = true)]
pub struct Cli {
    /// Configuration file.
    #[clap(long, short, env = "OFFICEMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve an address to coordinates.
    Geocode {
        /// Free-form address.
        address: String,
    },

    /// Apply edits to the location fields of an office form.
    Edit {
        /// Initial state of the fields as JSON.
        #[clap(long)]
        state: Option<String>,

        /// Simulated pause between two edits, e.g. "500ms".
        #[clap(long, value_parser = parse_duration, default_value = "0s")]
        pause: Duration,

        /// Edits as JSON, e.g. '{"field":"address","value":"Bandung"}'.
        edits: Vec<String>,
    },

    /// Create a new office.
    Create {
        #[clap(long)]
        name: String,

        #[clap(long)]
        address: Option<String>,

        /// Position as "LAT,LNG".
        #[clap(
            long,
            allow_hyphen_values = true,
            conflicts_with_all = ["latitude", "longitude"]
        )]
        position: Option<MapPoint>,

        #[clap(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[clap(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// Meters.
        #[clap(long)]
        radius: Option<f64>,
    },

    /// Resolve the positions of all offices that have an address only.
    Locate {
        /// JSON file with a list of offices.
        file: PathBuf,

        /// Write the result to this file instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// List the offices whose radius covers a position.
    Covering {
        /// JSON file with a list of offices.
        file: PathBuf,

        /// Position as "LAT,LNG".
        #[clap(long, allow_hyphen_values = true)]
        position: MapPoint,
    },

    /// Validate a JSON file with a list of offices.
    Check { file: PathBuf },
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    duration_str::parse(s)
}

pub fn run(cli: Cli, cfg: Config) -> Result<()> {
    match cli.command {
        Command::Geocode { address } => {
            let geo_gw = geocoding_gateway(&cfg.geocoding)?;
            let pos = usecases::resolve_address(&geo_gw, &address)
                .ok_or_else(|| anyhow!("No location found for '{address}'"))?;
            let (lat, lng) = pos.to_lat_lng_deg();
            println!("{lat},{lng}");
        }
        Command::Edit {
            state,
            pause,
            edits,
        } => {
            let fields = match state {
                Some(state) => {
                    let state: json::LocationFields =
                        serde_json::from_str(&state).context("Invalid state")?;
                    from_json::location_fields(state)
                }
                None => LocationFields::default(),
            };
            let edits = edits
                .iter()
                .map(|edit| {
                    serde_json::from_str::<json::LocationEdit>(edit)
                        .with_context(|| format!("Invalid edit: {edit}"))
                        .map(from_json::location_edit)
                })
                .collect::<Result<Vec<_>>>()?;
            let geo_gw = geocoding_gateway(&cfg.geocoding)?;
            let fields = replay_edits(fields, edits, cfg.offices.debounce, pause, &geo_gw)?;
            let fields = to_json::location_fields(fields);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::Create {
            name,
            address,
            position,
            latitude,
            longitude,
            radius,
        } => {
            let (latitude, longitude) = match position {
                Some(pos) => {
                    let (lat, lng) = pos.to_lat_lng_deg();
                    (Some(lat), Some(lng))
                }
                None => (latitude, longitude),
            };
            let new_office = from_json::new_office(json::NewOffice {
                name,
                address,
                latitude,
                longitude,
                radius,
            });
            let new_office = with_default_radius(new_office, cfg.offices.default_radius);
            let geo_gw = geocoding_gateway(&cfg.geocoding)?;
            let office = usecases::create_office(new_office, &geo_gw)?;
            let office = json::Office::from(office);
            println!("{}", serde_json::to_string_pretty(&office)?);
        }
        Command::Locate { file, output } => {
            let mut offices = read_offices(&file)?;
            let geo_gw = geocoding_gateway(&cfg.geocoding)?;
            let count = usecases::locate_offices(&mut offices, &geo_gw);
            log::info!("Located {count} of {} offices", offices.len());
            let json = serde_json::to_string_pretty(&to_json::offices(offices))?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("Unable to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        Command::Covering { file, position } => {
            let offices = covering_offices(read_offices(&file)?, position);
            log::info!("{} offices cover {position}", offices.len());
            let json = serde_json::to_string_pretty(&to_json::offices(offices))?;
            println!("{json}");
        }
        Command::Check { file } => {
            let offices = read_offices(&file)?;
            let mut invalid = 0;
            for office in &offices {
                if let Err(err) = office.validate() {
                    log::warn!("Invalid office {}: {}", office.id, err);
                    invalid += 1;
                }
            }
            if invalid > 0 {
                bail!("{invalid} of {} offices are invalid", offices.len());
            }
            log::info!("All {} offices are valid", offices.len());
        }
    }
    Ok(())
}

/// Runs edits that arrive `pause` apart through a debounced session.
fn replay_edits<G>(
    fields: LocationFields,
    edits: Vec<LocationEdit>,
    debounce: Duration,
    pause: Duration,
    geo_gw: &G,
) -> Result<LocationFields>
where
    G: GeoCodingGateway + ?Sized,
{
    let mut session = FieldGroupSession::new(fields, debounce, geo_gw);
    let start = Instant::now();
    for (i, edit) in edits.into_iter().enumerate() {
        let now = u32::try_from(i)
            .ok()
            .and_then(|i| pause.checked_mul(i))
            .and_then(|offset| start.checked_add(offset))
            .ok_or_else(|| anyhow!("The pause between edits is too long"))?;
        session.tick(now);
        session.edit(edit, now);
    }
    Ok(session.finish())
}

fn with_default_radius(mut new_office: usecases::NewOffice, radius: Radius) -> usecases::NewOffice {
    new_office.radius = new_office.radius.or(Some(radius.to_meters()));
    new_office
}

fn covering_offices(offices: Vec<Office>, pos: MapPoint) -> Vec<Office> {
    offices
        .into_iter()
        .filter(|office| !office.is_deleted() && office.covers(pos))
        .collect()
}

fn read_offices(path: &Path) -> Result<Vec<Office>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let offices: Vec<json::Office> = serde_json::from_str(&json)?;
    from_json::try_offices(offices)
}
