//! Clap derive structures for the `parkly` CLI.
//!
//! Defines the command tree, global flags, and the value enums shared by
//! several commands. Only clap types live here so `build.rs` can include
//! this file to render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// parkly -- run a parking lot from the command line
#[derive(Debug, Parser)]
#[command(
    name = "parkly",
    version,
    about = "Operate parking lots from the command line",
    long_about = "Register vehicle entries and exits, price stays from the lot's tariffs,\n\
        sell and renew subscriptions, and manage cashier shifts and reservations.\n\n\
        `fee` and `subscriptions expiry` work offline; everything else talks to\n\
        the backend configured in the active profile.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PARKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "PARKLY_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Backend API key
    #[arg(long, env = "PARKLY_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Parking lot id (overrides profile)
    #[arg(long, short = 'l', env = "PARKLY_LOT", global = true)]
    pub lot: Option<i64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARKLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "PARKLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PARKLY_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

/// Billing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    #[value(alias = "hora")]
    Hour,
    #[value(alias = "dia")]
    Day,
    #[value(alias = "semana")]
    Week,
    #[value(alias = "mes")]
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubscriptionPeriodArg {
    #[value(alias = "semanal")]
    Weekly,
    #[value(alias = "mensual")]
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SegmentArg {
    #[value(alias = "auto", alias = "aut")]
    Car,
    #[value(alias = "moto", alias = "mot")]
    Motorcycle,
    #[value(alias = "camioneta", alias = "cam")]
    Truck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    #[value(alias = "efectivo")]
    Cash,
    #[value(alias = "transferencia")]
    Transfer,
    #[value(alias = "tarjeta")]
    Card,
    Qr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReservationStatusArg {
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
    Expired,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List parking lots
    Lots(LotsArgs),

    /// List the spaces of a lot
    #[command(alias = "sp")]
    Spaces(SpacesArgs),

    /// Show free and occupied spaces per vehicle segment
    #[command(alias = "occ")]
    Occupancy,

    /// Inspect tariffs
    #[command(alias = "t")]
    Tariffs(TariffsArgs),

    /// Register entries and exits
    #[command(alias = "v")]
    Vehicles(VehiclesArgs),

    /// Price a stay without contacting the backend
    Fee(FeeArgs),

    /// Sell, renew and inspect subscriptions
    #[command(alias = "subs")]
    Subscriptions(SubscriptionsArgs),

    /// Open and close cashier shifts
    Shifts(ShiftsArgs),

    /// Book and cancel reservations
    #[command(alias = "res")]
    Reservations(ReservationsArgs),

    /// List recorded payments
    Payments(PaymentsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOTS & SPACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LotsArgs {
    #[command(subcommand)]
    pub command: LotsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LotsCommand {
    /// List lots visible to the API key
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct SpacesArgs {
    #[command(subcommand)]
    pub command: SpacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpacesCommand {
    /// List spaces with their segment and rate template
    #[command(alias = "ls")]
    List {
        /// Only spaces for this segment
        #[arg(long)]
        segment: Option<SegmentArg>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TARIFFS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TariffsArgs {
    #[command(subcommand)]
    pub command: TariffsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TariffsCommand {
    /// List every tariff row of the lot, newest first
    #[command(alias = "ls")]
    List {
        /// Only rows for this billing unit
        #[arg(long)]
        period: Option<PeriodArg>,
    },

    /// List the lot's rate templates
    Templates,

    /// Show the tariff in force for a space, template or segment
    Resolve {
        /// Price the given space (uses its template, else its segment)
        #[arg(long, conflicts_with_all = ["template", "segment"])]
        space: Option<i32>,

        /// Rate template id
        #[arg(long, conflicts_with = "segment")]
        template: Option<i64>,

        /// Vehicle segment
        #[arg(long)]
        segment: Option<SegmentArg>,

        /// Billing unit
        #[arg(long, default_value = "hour")]
        period: PeriodArg,

        /// Instant to resolve at (RFC 3339 or "YYYY-MM-DD HH:MM", UTC); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VEHICLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List vehicles currently inside, or finished stays with --since
    #[command(alias = "ls")]
    List {
        /// Show stays that ended at or after this instant instead
        #[arg(long)]
        since: Option<String>,

        /// Max rows for --since
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Register a vehicle entering a space
    Entry {
        /// License plate
        plate: String,

        /// Space number
        #[arg(long, short = 's')]
        space: i32,

        /// Billing unit for the stay
        #[arg(long, default_value = "hour")]
        period: PeriodArg,

        /// Entry instant; defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Show what a vehicle would pay if it left now
    Quote {
        /// License plate
        plate: String,

        /// Exit instant; defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Register a vehicle leaving and charge the stay
    Exit {
        /// License plate
        plate: String,

        /// Payment method
        #[arg(long, short = 'm', default_value = "cash")]
        method: MethodArg,

        /// Exit instant; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FEE (offline)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FeeArgs {
    /// Entry instant (RFC 3339 or "YYYY-MM-DD HH:MM", UTC)
    #[arg(long)]
    pub entry: String,

    /// Exit instant; defaults to now
    #[arg(long)]
    pub exit: Option<String>,

    /// Price of one unit
    #[arg(long)]
    pub price: String,

    /// Billing unit
    #[arg(long, default_value = "hour")]
    pub period: PeriodArg,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUBSCRIPTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SubscriptionsArgs {
    #[command(subcommand)]
    pub command: SubscriptionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionsCommand {
    /// List subscriptions of the lot
    #[command(alias = "ls")]
    List {
        /// Only subscriptions still valid today
        #[arg(long)]
        active: bool,
    },

    /// Sell a new subscription
    Create {
        /// Holder name
        #[arg(long)]
        holder: String,

        /// License plate
        #[arg(long)]
        plate: String,

        /// Vehicle segment
        #[arg(long, default_value = "car")]
        segment: SegmentArg,

        /// Subscription period
        #[arg(long, default_value = "monthly")]
        period: SubscriptionPeriodArg,

        /// Number of periods paid
        #[arg(long, short = 'n', default_value = "1")]
        quantity: u32,

        /// First day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        starts_on: Option<String>,

        /// Payment method
        #[arg(long, short = 'm', default_value = "cash")]
        method: MethodArg,
    },

    /// Extend a subscription by more periods
    Renew {
        /// Subscription number
        number: i64,

        /// Number of periods paid
        #[arg(long, short = 'n', default_value = "1")]
        quantity: u32,

        /// Payment method
        #[arg(long, short = 'm', default_value = "cash")]
        method: MethodArg,
    },

    /// Compute an end date without contacting the backend
    Expiry {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Subscription period
        #[arg(long, default_value = "monthly")]
        period: SubscriptionPeriodArg,

        /// Number of periods
        #[arg(long, short = 'n', default_value = "1")]
        quantity: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHIFTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShiftsArgs {
    #[command(subcommand)]
    pub command: ShiftsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShiftsCommand {
    /// List recent shifts
    #[command(alias = "ls")]
    List {
        /// Only shifts of this employee (UUID)
        #[arg(long)]
        employee: Option<String>,

        /// Max rows
        #[arg(long, default_value = "25")]
        limit: u32,
    },

    /// Open a shift with the cash in the drawer
    Open {
        /// Employee id (UUID)
        #[arg(long)]
        employee: String,

        /// Opening cash
        #[arg(long, default_value = "0")]
        cash: String,
    },

    /// Close the employee's open shift
    Close {
        /// Employee id (UUID)
        #[arg(long)]
        employee: String,

        /// Closing cash
        #[arg(long)]
        cash: String,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESERVATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations of the lot
    #[command(alias = "ls")]
    List {
        /// Only reservations in this state
        #[arg(long)]
        status: Option<ReservationStatusArg>,
    },

    /// Book a space for a time window
    Create {
        /// Space number
        #[arg(long, short = 's')]
        space: i32,

        /// License plate
        #[arg(long)]
        plate: String,

        /// Start instant
        #[arg(long)]
        from: String,

        /// End instant
        #[arg(long)]
        to: String,
    },

    /// Cancel a pending or confirmed reservation
    Cancel {
        /// Reservation code (RES-XXXXXXXX)
        code: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// List payments, newest first
    #[command(alias = "ls")]
    List {
        /// Only payments at or after this instant
        #[arg(long)]
        since: Option<String>,

        /// Max rows
        #[arg(long, default_value = "50")]
        limit: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: backend, lot, api_key, api_key_env, access_token, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name; defaults to the active profile
        name: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
