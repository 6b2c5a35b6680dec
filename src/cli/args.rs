use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sehri", version, author, about = "A terminal Ramadan companion: sehri and iftar times, calorie tracking and zakat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a day's prayer times with countdowns to the next prayer and to sehri/iftar
    Times {
        /// Division id (defaults to the selected division)
        #[arg(long, short)]
        division: Option<String>,
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the whole sehri/iftar timetable for a division
    Schedule {
        /// Division id (defaults to the selected division)
        #[arg(long, short)]
        division: Option<String>,
    },
    /// Compare one day's timings between two divisions
    Compare {
        /// First division id
        from: String,
        /// Second division id
        to: String,
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List divisions
    Divisions,
    /// Select the division used by default
    Division {
        /// Division id (see `sehri divisions`)
        id: String,
    },
    /// Calorie tracker over the bundled food catalog
    Food {
        #[command(subcommand)]
        action: FoodCommands,
    },
    /// Calculate zakat due
    Zakat(ZakatArgs),
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Ramadan duas
    Duas {
        /// Only show duas whose title, pronunciation or meaning contains this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// The 99 names of Allah
    Names {
        /// Show a single name by number
        #[arg(long)]
        id: Option<u32>,
    },
    /// Healthy eating tips for sehri and iftar
    Tips,
    /// List bundled Quran chapters, or read one
    Quran {
        /// Chapter number
        chapter: Option<u32>,
    },
    /// Show the config file location and values
    Config {
        /// Write a config file with default values if none exists
        #[arg(long)]
        init: bool,
    },
    /// Forget the selected division, food selections and settings
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum FoodCommands {
    /// List foods with their calories
    List {
        /// Only show one category (e.g. fruit, sweet, drink)
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Add a food to the tracker, or remove it if already added
    Toggle {
        /// Food id
        id: String,
        /// Number of servings when adding
        #[arg(long, short)]
        qty: Option<u32>,
    },
    /// Set the number of servings for a tracked food
    Qty {
        /// Food id
        id: String,
        /// Servings
        quantity: u32,
    },
    /// Set a custom amount (grams or ml) for a tracked food; 0 clears it
    Amount {
        /// Food id
        id: String,
        /// Amount in the unit of the food's first portion
        amount: String,
    },
    /// Remove every food from the tracker
    Clear,
    /// Show tracked foods and the calorie total
    Summary,
}

#[derive(Args, Debug)]
pub struct ZakatArgs {
    /// Ask for each amount in turn; type :reset to start over or :unit to switch grams/currency
    #[arg(long, short)]
    pub interactive: bool,
    /// Cash in hand and in bank
    #[arg(long, default_value = "")]
    pub cash: String,
    /// Gold or silver held, in grams or as a currency value (see --unit)
    #[arg(long, default_value = "")]
    pub metal: String,
    /// Metal standard for the holding and the nisab: gold or silver
    #[arg(long, default_value = "gold")]
    pub metal_type: String,
    /// How --metal is given: grams or currency
    #[arg(long, default_value = "grams")]
    pub unit: String,
    /// Business investments
    #[arg(long, default_value = "")]
    pub investments: String,
    /// Money lent to others
    #[arg(long, default_value = "")]
    pub loans_given: String,
    /// Shares and stocks
    #[arg(long, default_value = "")]
    pub stocks: String,
    /// Rental income held
    #[arg(long, default_value = "")]
    pub rental_income: String,
    /// Agricultural produce
    #[arg(long, default_value = "")]
    pub agriculture: String,
    /// Other savings
    #[arg(long, default_value = "")]
    pub savings: String,
    /// Debts due now
    #[arg(long, default_value = "")]
    pub liabilities: String,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change one or more settings
    Set {
        /// Reminders on the dashboard: true or false
        #[arg(long)]
        notifications: Option<bool>,
        /// en or bn
        #[arg(long)]
        language: Option<String>,
        /// light or dark
        #[arg(long)]
        theme: Option<String>,
        /// Division id
        #[arg(long)]
        division: Option<String>,
    },
}
