use crate::config::toml_config::AppConfig;
use crate::config::{ResolvedConfig, DEFAULT_CURRENCY, DEFAULT_MODEL_PATH};
use crate::domain::model::Listing;
use clap::Parser;

/// Yes/no selector, parsed case-insensitively. Every amenity flag goes
/// through this one parser, so no flag can drift into its own casing rules.
fn parse_yes_no(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got '{}'", other)),
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "maison-price")]
#[command(about = "Predict the price of a house in Paris from a pre-trained model artifact")]
pub struct CliConfig {
    /// Path to the model artifact (defaults to ./data/model.json)
    #[arg(long)]
    pub model_path: Option<String>,

    /// Optional TOML application config file
    #[arg(long)]
    pub config: Option<String>,

    /// Currency label for the displayed price (defaults to EUR)
    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage around pipeline stages")]
    pub monitor: bool,

    #[command(flatten)]
    pub listing: ListingArgs,
}

/// The form: one flag per house attribute, each with its declared range
/// and default. Range enforcement here is the only input validation the
/// pipeline gets.
#[derive(Debug, Clone, clap::Args)]
pub struct ListingArgs {
    /// Area (square meters)
    #[arg(long, default_value_t = 85, value_parser = clap::value_parser!(u32).range(85..=6_071_330))]
    pub area: u32,

    /// Number of rooms
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub rooms: u32,

    /// Has yard? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub yard: bool,

    /// Has pool? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub pool: bool,

    /// Number of floors
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=6_000))]
    pub floors: u32,

    /// City code (up to 5 digits)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=99_999))]
    pub city_code: u32,

    /// City part range
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub city_part_range: u32,

    /// Has guest room? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub guest_room: bool,

    /// Number of previous owners
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub prev_owners: u32,

    /// Year of construction
    #[arg(long, default_value_t = 1990, value_parser = clap::value_parser!(i32).range(1990..=2021))]
    pub built: i32,

    /// Is newly built? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub newly_built: bool,

    /// Has storm protector? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub storm_protector: bool,

    /// Basement area (square meters)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(4..=91_992))]
    pub basement: u32,

    /// Attic area (square meters)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=96_381))]
    pub attic: u32,

    /// Garage size (square meters)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(4..=9_017))]
    pub garage: u32,

    /// Has storage room? (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub storage_room: bool,
}

impl ListingArgs {
    /// Build the raw input record. Every imputable field arrives from the
    /// form filled in; the `Option` typing belongs to the pipeline, not to
    /// this surface.
    pub fn to_listing(&self) -> Listing {
        Listing {
            square_meters: Some(f64::from(self.area)),
            number_of_rooms: Some(f64::from(self.rooms)),
            has_yard: Some(self.yard),
            has_pool: Some(self.pool),
            floor: self.floors,
            city_code: self.city_code,
            city_part_range: self.city_part_range,
            num_prev_owners: self.prev_owners,
            made: Some(self.built),
            is_new_built: Some(self.newly_built),
            has_storm_protector: Some(self.storm_protector),
            basement: f64::from(self.basement),
            attic: f64::from(self.attic),
            garage: f64::from(self.garage),
            has_storage_room: Some(self.storage_room),
            has_guest_room: self.guest_room,
        }
    }
}

impl CliConfig {
    /// Resolve the effective configuration: explicit CLI flags win over the
    /// TOML file, which wins over the built-in defaults.
    pub fn resolve(&self, app: Option<&AppConfig>) -> ResolvedConfig {
        ResolvedConfig {
            model_path: self
                .model_path
                .clone()
                .or_else(|| app.map(|a| a.model.path.clone()))
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            currency: self
                .currency
                .clone()
                .or_else(|| app.and_then(|a| a.raw_currency().map(str::to_string)))
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            monitor: self.monitor || app.map(|a| a.monitoring_enabled()).unwrap_or(false),
        }
    }
}
