use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use nutrilens_core::VERSION;

/// NutriLens - a personal calorie, macro and water tracker
#[derive(Parser)]
#[command(name = "nutrilens")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the NutriLens store
    #[arg(short, long, global = true, env = "NUTRILENS_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reference date used as "today" (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, env = "NUTRILENS_TODAY")]
    pub today: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// IANA timezone used to decide when a new day starts
    #[arg(long)]
    pub timezone: Option<String>,
}

/// Arguments for the `profile` command
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the stored profile
    Show(JsonArgs),

    /// Update profile fields
    Set(ProfileSetArgs),

    /// Manage the allergy list
    Allergy(ListEditArgs),

    /// Manage dietary preferences
    Preference(ListEditArgs),
}

/// Shared `--json` flag for read-only commands
#[derive(Args)]
pub struct JsonArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `profile set`
#[derive(Args, Default)]
pub struct ProfileSetArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Gender (male, female, other)
    #[arg(long)]
    pub gender: Option<String>,

    /// Weight in kilograms
    #[arg(long, value_name = "KG")]
    pub weight: Option<f64>,

    /// Height in centimeters
    #[arg(long, value_name = "CM")]
    pub height: Option<f64>,

    /// Age in years
    #[arg(long, value_name = "YEARS")]
    pub age: Option<u32>,

    /// Activity level (sedentary, lightly-active, moderately-active, very-active)
    #[arg(long)]
    pub activity: Option<String>,

    /// Health goal (weight-loss, maintain, muscle-gain)
    #[arg(long)]
    pub goal: Option<String>,

    /// Daily calorie goal (kcal)
    #[arg(long, value_name = "KCAL")]
    pub calories: Option<f64>,

    /// Daily protein goal (g)
    #[arg(long, value_name = "G")]
    pub protein: Option<f64>,

    /// Daily carbohydrate goal (g)
    #[arg(long, value_name = "G")]
    pub carbs: Option<f64>,

    /// Daily fat goal (g)
    #[arg(long, value_name = "G")]
    pub fat: Option<f64>,

    /// Water reminder on or off
    #[arg(long, value_enum)]
    pub reminder: Option<Toggle>,

    /// Water reminder interval in minutes
    #[arg(long, value_name = "MIN")]
    pub reminder_interval: Option<u32>,

    /// Color theme (light, dark)
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Arguments for allergy / preference list edits
#[derive(Args)]
pub struct ListEditArgs {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Add an item
    Add {
        #[arg(value_name = "ITEM")]
        item: String,
    },
    /// Remove an item
    Remove {
        #[arg(value_name = "ITEM")]
        item: String,
    },
    /// List items
    List,
}

/// Arguments for the `target` command
#[derive(Args)]
pub struct TargetArgs {
    /// Overwrite all four stored goals with the suggestion
    #[arg(long)]
    pub apply: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `log` command
#[derive(Args)]
pub struct LogArgs {
    /// Food name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Calories (kcal)
    #[arg(long, short = 'c')]
    pub calories: f64,

    /// Protein (g)
    #[arg(long, default_value_t = 0.0)]
    pub protein: f64,

    /// Carbohydrates (g)
    #[arg(long, default_value_t = 0.0)]
    pub carbs: f64,

    /// Fat (g)
    #[arg(long, default_value_t = 0.0)]
    pub fat: f64,

    /// Ingredient (repeatable)
    #[arg(short, long, value_name = "INGREDIENT")]
    pub ingredient: Vec<String>,

    /// Image reference for the meal
    #[arg(long, value_name = "REF")]
    pub image: Option<String>,

    /// Time the food was eaten (ISO-8601)
    #[arg(long, value_name = "DATETIME")]
    pub at: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `water` command
#[derive(Args)]
pub struct WaterArgs {
    #[arg(value_enum, value_name = "ACTION")]
    pub action: WaterAction,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WaterAction {
    Add,
    Remove,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (pretty, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `entries` command
#[derive(Args)]
pub struct EntriesArgs {
    /// Day to show (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (pretty, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `history` command
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of most recent days to show
    #[arg(long, default_value_t = 7)]
    pub last: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (pretty, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Output format (json, jsonl)
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `reset` command
#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new store and config file
    Init(InitArgs),

    /// Show or edit the profile
    Profile(ProfileArgs),

    /// Suggest a daily calorie and macro budget from the profile
    Target(TargetArgs),

    /// Log a food item for today
    Log(LogArgs),

    /// Add or remove a glass of water
    Water(WaterArgs),

    /// Show today's dashboard
    Status(StatusArgs),

    /// List logged food, most recent first
    Entries(EntriesArgs),

    /// Show per-day totals
    History(HistoryArgs),

    /// Export all days (portable formats, you own your data)
    Export(ExportArgs),

    /// Check store integrity
    Check,

    /// Backup the store
    Backup(BackupArgs),

    /// Delete the profile and every logged day
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_parses_repeated_ingredients() {
        let cli = Cli::try_parse_from([
            "nutrilens",
            "log",
            "Salad",
            "--calories",
            "320",
            "-i",
            "lettuce",
            "-i",
            "feta",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Log(args)) => {
                assert_eq!(args.name, "Salad");
                assert_eq!(args.calories, 320.0);
                assert_eq!(args.protein, 0.0);
                assert_eq!(args.ingredient, vec!["lettuce", "feta"]);
            }
            _ => panic!("expected log command"),
        }
    }

    #[test]
    fn test_water_action_value_enum() {
        let cli = Cli::try_parse_from(["nutrilens", "water", "remove"]).expect("parse");
        match cli.command {
            Some(Commands::Water(args)) => assert_eq!(args.action, WaterAction::Remove),
            _ => panic!("expected water command"),
        }
    }
}
