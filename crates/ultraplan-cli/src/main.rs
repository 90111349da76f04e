use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ultraplan_cli::cli::commands::{self, EventFields};
use ultraplan_cli::cli::{CommandContext, OutputFormat};
use ultraplan_cli::config::ProfileStore;
use ultraplan_cli::error::format_user_error;
use ultraplan_cli::models::{SettingsUpdate, WaypointType};
use ultraplan_cli::route::placement::{NewWaypoint, WaypointEdit};
use ultraplan_cli::units::{DistanceUnit, ElevationUnit};

#[derive(Parser)]
#[command(name = "ultraplan")]
#[command(author, version, about = "Plan ultra-running races: routes, aid stations and pacing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Profile to use
    #[arg(short, long, global = true, env = "ULTRAPLAN_PROFILE")]
    profile: Option<String>,

    /// Planner backend URL
    #[arg(long, global = true, env = "ULTRAPLAN_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Race events and their GPX files
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Waypoints along an event's route
    Waypoints {
        #[command(subcommand)]
        command: WaypointCommands,
    },
    /// Pacing plan: calculation, tables and exports
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Compare the actual race to the plan
    Compare {
        #[command(subcommand)]
        command: CompareCommands,
    },
    /// Reference documents for the assistant
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },
    /// Backend settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Ask the race-planning assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Local profile configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct EventArgs {
    /// Race name
    #[arg(long)]
    name: Option<String>,

    /// Planned start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long)]
    date: Option<String>,

    /// Target finish time (HH:MM:SS)
    #[arg(long)]
    duration: Option<String>,

    /// Slowdown percent per meter of climbing
    #[arg(long, allow_hyphen_values = true)]
    gain_adjustment: Option<f64>,

    /// Speedup percent per meter of descent
    #[arg(long, allow_hyphen_values = true)]
    descent_adjustment: Option<f64>,

    /// Linear fatigue slowdown percent
    #[arg(long, allow_hyphen_values = true)]
    fatigue: Option<f64>,
}

impl From<EventArgs> for EventFields {
    fn from(args: EventArgs) -> Self {
        Self {
            name: args.name,
            date: args.date,
            duration: args.duration,
            gain_adjustment: args.gain_adjustment,
            descent_adjustment: args.descent_adjustment,
            fatigue: args.fatigue,
        }
    }
}

#[derive(Subcommand)]
enum EventCommands {
    /// List events
    List,
    /// Show an event summary
    Show {
        /// Event ID (defaults to the profile's default event)
        id: Option<String>,
    },
    /// Create an event
    Create {
        #[command(flatten)]
        fields: EventArgs,

        /// Make it the profile's default event
        #[arg(long)]
        default: bool,
    },
    /// Update an event
    Update {
        id: Option<String>,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Upload the planned route GPX
    UploadGpx {
        file: PathBuf,

        #[arg(short, long)]
        event: Option<String>,

        /// Set the target duration from timestamps in the file
        #[arg(long)]
        use_file_timing: bool,
    },
    /// Upload the actual race GPX/TCX
    UploadActual {
        file: PathBuf,

        #[arg(short, long)]
        event: Option<String>,

        #[arg(long)]
        use_file_timing: bool,
    },
    /// Show or save the simplified route
    Route {
        #[arg(short, long)]
        event: Option<String>,

        /// Write the route JSON to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum WaypointCommands {
    /// List waypoints in route order
    List {
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Add a waypoint at a distance along the route
    Add {
        /// Distance from start in miles
        distance: String,

        #[arg(short, long)]
        event: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// checkpoint, food, water or rest
        #[arg(short = 't', long = "type", default_value = "checkpoint")]
        waypoint_type: WaypointType,

        /// Planned stop in minutes
        #[arg(short, long, default_value = "0")]
        stop: u32,

        #[arg(long)]
        comments: Option<String>,
    },
    /// Edit a waypoint
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short = 't', long = "type")]
        waypoint_type: Option<WaypointType>,

        #[arg(short, long)]
        stop: Option<u32>,

        #[arg(long)]
        comments: Option<String>,

        /// Move to a new distance from start in miles
        #[arg(short, long)]
        distance: Option<String>,
    },
    /// Delete a waypoint
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Show the leg-by-leg plan
    Show {
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Recalculate legs on the backend
    Calculate {
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Export the plan as CSV (`-o -` for stdout)
    Export {
        #[arg(short, long)]
        event: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Printable plan
    Print {
        #[arg(short, long)]
        event: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Elevation profile with waypoint markers
    Elevation {
        #[arg(short, long)]
        event: Option<String>,

        /// Write chart JSON to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Route and waypoints as GeoJSON
    Map {
        #[arg(short, long)]
        event: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CompareCommands {
    /// Planned vs actual summary and per-leg times
    Show {
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Planned and actual tracks as GeoJSON
    Map {
        #[arg(short, long)]
        event: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DocumentCommands {
    /// List documents
    List,
    /// Upload a pdf, txt, docx or markdown file
    Upload { file: PathBuf },
    /// Show a document summary
    Show { id: String },
    /// Delete a document
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show settings
    Show,
    /// Update settings
    Set {
        #[arg(long)]
        distance_unit: Option<DistanceUnit>,

        #[arg(long)]
        elevation_unit: Option<ElevationUnit>,

        #[arg(long)]
        pace_format: Option<String>,

        #[arg(long)]
        openai_api_key: Option<String>,

        #[arg(long)]
        openrouter_api_key: Option<String>,
    },
}

#[derive(Subcommand)]
enum ChatCommands {
    /// Send one message and stream the reply
    Send {
        message: String,

        /// Event the question is about
        #[arg(short, long)]
        event: Option<String>,

        /// Continue an existing session
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Interactive chat
    Repl {
        #[arg(short, long)]
        event: Option<String>,

        #[arg(short, long)]
        session: Option<String>,
    },
    /// List chat sessions
    Sessions {
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Show a session transcript
    Show { id: String },
    /// Delete a session
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the profile and resolved backend URL
    Show,
    /// Save profile values
    Set {
        /// Backend URL to store in the profile
        #[arg(long = "url")]
        url: Option<String>,

        #[arg(long)]
        default_event: Option<String>,
    },
    /// Remove the profile file
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_command(
    store: &ProfileStore,
    command: ConfigCommands,
    api_url: Option<&str>,
    format: OutputFormat,
) -> ultraplan_cli::Result<()> {
    match command {
        ConfigCommands::Show => commands::config::show(store, api_url, format),
        ConfigCommands::Set { url, default_event } => {
            commands::config::set(store, url, default_event)
        }
        ConfigCommands::Clear { yes } => commands::config::clear(store, yes),
    }
}

async fn run(cli: Cli) -> ultraplan_cli::Result<()> {
    let command = match cli.command {
        Commands::Config { command } => {
            let store = ProfileStore::new(cli.profile)?;
            return config_command(&store, command, cli.api_url.as_deref(), cli.format);
        }
        other => other,
    };

    let ctx = CommandContext::new(cli.profile, cli.api_url, cli.format)?;

    match command {
        Commands::Events { command } => match command {
            EventCommands::List => commands::events::list(&ctx).await,
            EventCommands::Show { id } => commands::events::show(&ctx, id).await,
            EventCommands::Create { fields, default } => {
                commands::events::create(&ctx, fields.into(), default).await
            }
            EventCommands::Update { id, fields } => {
                commands::events::update(&ctx, id, fields.into()).await
            }
            EventCommands::Delete { id, yes } => commands::events::delete(&ctx, &id, yes).await,
            EventCommands::UploadGpx {
                file,
                event,
                use_file_timing,
            } => commands::events::upload_gpx(&ctx, event, &file, use_file_timing).await,
            EventCommands::UploadActual {
                file,
                event,
                use_file_timing,
            } => commands::events::upload_actual(&ctx, event, &file, use_file_timing).await,
            EventCommands::Route { event, output } => {
                commands::events::route(&ctx, event, output.as_deref()).await
            }
        },
        Commands::Waypoints { command } => match command {
            WaypointCommands::List { event } => commands::waypoints::list(&ctx, event).await,
            WaypointCommands::Add {
                distance,
                event,
                name,
                waypoint_type,
                stop,
                comments,
            } => {
                let input = NewWaypoint {
                    distance_miles: distance,
                    name,
                    waypoint_type,
                    stop_time_minutes: stop,
                    comments,
                };
                commands::waypoints::add(&ctx, event, input).await
            }
            WaypointCommands::Edit {
                id,
                name,
                waypoint_type,
                stop,
                comments,
                distance,
            } => {
                let edit = WaypointEdit {
                    name,
                    waypoint_type,
                    stop_time_minutes: stop,
                    comments,
                    distance_miles: distance,
                };
                commands::waypoints::edit(&ctx, &id, edit).await
            }
            WaypointCommands::Delete { id, yes } => {
                commands::waypoints::delete(&ctx, &id, yes).await
            }
        },
        Commands::Plan { command } => match command {
            PlanCommands::Show { event } => commands::show_plan(&ctx, event).await,
            PlanCommands::Calculate { event } => commands::calculate_plan(&ctx, event).await,
            PlanCommands::Export { event, output } => {
                commands::plan::export_csv(&ctx, event, output).await
            }
            PlanCommands::Print { event, output } => {
                commands::plan::print(&ctx, event, output).await
            }
            PlanCommands::Elevation { event, output } => {
                commands::plan::elevation(&ctx, event, output).await
            }
            PlanCommands::Map { event, output } => commands::plan::map(&ctx, event, output).await,
        },
        Commands::Compare { command } => match command {
            CompareCommands::Show { event } => commands::show_comparison(&ctx, event).await,
            CompareCommands::Map { event, output } => {
                commands::comparison_map(&ctx, event, output).await
            }
        },
        Commands::Documents { command } => match command {
            DocumentCommands::List => commands::documents::list(&ctx).await,
            DocumentCommands::Upload { file } => commands::documents::upload(&ctx, &file).await,
            DocumentCommands::Show { id } => commands::documents::show(&ctx, &id).await,
            DocumentCommands::Delete { id, yes } => {
                commands::documents::delete(&ctx, &id, yes).await
            }
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show => commands::show_settings(&ctx).await,
            SettingsCommands::Set {
                distance_unit,
                elevation_unit,
                pace_format,
                openai_api_key,
                openrouter_api_key,
            } => {
                let update = SettingsUpdate {
                    distance_unit,
                    pace_format,
                    elevation_unit,
                    openai_api_key,
                    openrouter_api_key,
                };
                commands::update_settings(&ctx, update).await
            }
        },
        Commands::Chat { command } => match command {
            ChatCommands::Send {
                message,
                event,
                session,
            } => commands::send_chat(&ctx, message, event, session).await,
            ChatCommands::Repl { event, session } => {
                commands::chat_repl(&ctx, event, session).await
            }
            ChatCommands::Sessions { event } => commands::chat::sessions(&ctx, event).await,
            ChatCommands::Show { id } => commands::chat::show_session(&ctx, &id).await,
            ChatCommands::Delete { id, yes } => commands::delete_chat_session(&ctx, &id, yes).await,
        },
        Commands::Config { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", format_user_error(&e));
        std::process::exit(1);
    }
}
