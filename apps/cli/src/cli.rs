use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use skincare_core::notifications::NotificationFrequency;
use skincare_core::routines::RoutineType;

#[derive(Debug, Parser)]
#[command(name = "skincare", version, about = "Track skincare products, routines and reminders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SKINCARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the signed-in user
    Me,
    /// Change profile fields
    ProfileUpdate {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
    },
    #[command(subcommand)]
    Products(ProductCommand),
    #[command(subcommand)]
    Routines(RoutineCommand),
    /// Reminder rules
    #[command(subcommand)]
    Rules(RuleCommand),
    #[command(subcommand)]
    Device(DeviceCommand),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page size; defaults to SKINCARE_PAGE_SIZE
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
    /// Keep loading pages until the end
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Empty string clears the field on update
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub purpose: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List(PageArgs),
    Show { id: String },
    Add(ProductFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct RoutineFields {
    /// Product id; repeat for several
    #[arg(long = "product")]
    pub products: Vec<String>,
    #[arg(long = "type", value_parser = parse_routine_type)]
    pub routine_type: Option<RoutineType>,
    /// Local date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Local time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
    /// Empty string clears the notes on update
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RoutineCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only routines performed after this instant (RFC 3339)
        #[arg(long)]
        after: Option<DateTime<Utc>>,
        /// Only routines performed before this instant (RFC 3339)
        #[arg(long)]
        before: Option<DateTime<Utc>>,
    },
    Show { id: String },
    Add(RoutineFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: RoutineFields,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct RuleFields {
    /// Local time of day (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Option<NotificationFrequency>,
    /// Interval for EVERY_N_DAYS
    #[arg(long)]
    pub every_n: Option<i64>,
    /// Monday-first flags for CUSTOM, e.g. 1,0,1,0,1,0,0
    #[arg(long, value_delimiter = ',')]
    pub weekdays: Option<Vec<i32>>,
}

#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    List,
    Show { id: String },
    Add(RuleFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: RuleFields,
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
    },
    Delete { id: String },
    /// When each enabled rule fires next
    Next {
        /// Previous run, if the reminder already fired (RFC 3339)
        #[arg(long)]
        last_run: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Register this machine's push token
    Register {
        #[arg(long)]
        token: String,
    },
}

pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM, got '{}': {}", value, e))
}

pub fn parse_frequency(value: &str) -> Result<NotificationFrequency, String> {
    value
        .trim()
        .to_uppercase()
        .replace('-', "_")
        .parse()
        .map_err(|e: skincare_core::Error| e.to_string())
}

pub fn parse_routine_type(value: &str) -> Result<RoutineType, String> {
    value
        .parse()
        .map_err(|e: skincare_core::Error| e.to_string())
}
