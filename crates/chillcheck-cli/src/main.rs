use anyhow::{bail, Context};
use chillcheck_core::expiry::{expiry_message, ExpiryStatus};
use chillcheck_core::filter::{apply_filter, ExpiryFilter};
use chillcheck_core::models::{FridgeItem, HistoryAction, PREDEFINED_CATEGORIES};
use chillcheck_core::suggestions::UseTodayReport;
use chillcheck_core::Settings;
use chillcheck_notify::{
    generate_content, urgent_item_count, ReminderBackend, ReminderContent, ReminderScheduler,
};
use chillcheck_store::FridgeStore;
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chillcheck")]
#[command(version, about = "Track your fridge contents and catch items before they expire", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add an item to the fridge
    Add {
        /// Item name
        name: String,
        /// How many
        quantity: u32,
        /// Category (free text; see `chillcheck categories` for suggestions)
        #[arg(short, long)]
        category: Option<String>,
        /// Expiration date (YYYY-MM-DD); omit for items that don't expire
        #[arg(short, long)]
        expires: Option<NaiveDate>,
        /// Pin as a favorite
        #[arg(short, long)]
        favorite: bool,
    },
    /// List items, optionally filtered by expiry bucket and search text
    List {
        /// Expiry filter
        #[arg(short = 'f', long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        /// Case-insensitive match against name or category
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Edit an existing item (matched by name)
    Update {
        /// Current item name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        #[arg(short, long)]
        quantity: Option<u32>,
        #[arg(short, long)]
        category: Option<String>,
        /// New expiration date (YYYY-MM-DD)
        #[arg(short, long)]
        expires: Option<NaiveDate>,
        /// Clear the expiration date
        #[arg(long, conflicts_with = "expires")]
        no_expires: bool,
    },
    /// Remove an item from the fridge
    Remove {
        name: String,
    },
    /// Toggle an item's favorite flag
    Favorite {
        name: String,
    },
    /// Show what to use today: expired, expiring today, expiring in 1-2 days
    Suggest,
    /// Show the change history
    History {
        /// Only show entries for one action
        #[arg(short, long, value_enum)]
        action: Option<ActionArg>,
        /// Clear all history (cannot be undone)
        #[arg(long)]
        clear: bool,
    },
    /// Delete every item (history keeps the removals)
    DeleteAll,
    /// Daily reminder controls
    #[command(subcommand)]
    Remind(RemindCommands),
    /// Show current settings
    Settings,
    /// Toggle dark mode
    DarkMode,
    /// List the suggested categories
    Categories,
}

#[derive(clap::Subcommand)]
enum RemindCommands {
    /// Show the reminder content that would be sent right now
    Preview,
    /// Turn the daily reminder on
    Enable,
    /// Turn the daily reminder off
    Disable,
    /// Set the reminder time
    Time { hour: u32, minute: u32 },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FilterArg {
    All,
    Expired,
    Soon,
    Week,
    Fresh,
    NoDate,
}

impl std::fmt::Display for FilterArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterArg::All => "all",
            FilterArg::Expired => "expired",
            FilterArg::Soon => "soon",
            FilterArg::Week => "week",
            FilterArg::Fresh => "fresh",
            FilterArg::NoDate => "no-date",
        };
        write!(f, "{}", name)
    }
}

impl From<FilterArg> for ExpiryFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => ExpiryFilter::All,
            FilterArg::Expired => ExpiryFilter::Expired,
            FilterArg::Soon => ExpiryFilter::ExpiringSoon,
            FilterArg::Week => ExpiryFilter::ExpiringThisWeek,
            FilterArg::Fresh => ExpiryFilter::Fresh,
            FilterArg::NoDate => ExpiryFilter::NoExpiration,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ActionArg {
    Added,
    Removed,
    Updated,
}

impl From<ActionArg> for HistoryAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Added => HistoryAction::Added,
            ActionArg::Removed => HistoryAction::Removed,
            ActionArg::Updated => HistoryAction::Updated,
        }
    }
}

/// Console stand-in for the OS notification layer: reports what would be
/// scheduled. Real delivery belongs to the platform shell, not this binary.
struct ConsoleReminderBackend;

impl ReminderBackend for ConsoleReminderBackend {
    fn request_permission(&self) -> chillcheck_notify::Result<bool> {
        Ok(true)
    }

    fn schedule(
        &self,
        at: DateTime<Utc>,
        content: &ReminderContent,
        badge: usize,
    ) -> chillcheck_notify::Result<()> {
        println!(
            "Scheduled for {}: [{}] {} (badge {})",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            content.title,
            content.body,
            badge
        );
        Ok(())
    }

    fn cancel_all(&self) {
        tracing::debug!("Cancelled all pending reminders");
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chillcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = FridgeStore::open_default().context("Failed to open data directory")?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Add {
            name,
            quantity,
            category,
            expires,
            favorite,
        } => add_item(&store, name, quantity, category, expires, favorite),
        Commands::List { filter, search } => {
            list_items(&store, filter.into(), search.as_deref(), today);
            Ok(())
        }
        Commands::Update {
            name,
            rename,
            quantity,
            category,
            expires,
            no_expires,
        } => update_item(&store, &name, rename, quantity, category, expires, no_expires),
        Commands::Remove { name } => remove_item(&store, &name),
        Commands::Favorite { name } => toggle_favorite(&store, &name),
        Commands::Suggest => {
            show_suggestions(&store, today);
            Ok(())
        }
        Commands::History { action, clear } => show_history(&store, action.map(Into::into), clear),
        Commands::DeleteAll => {
            let deleted = store.delete_all_records()?;
            println!("Deleted {} item(s). History kept the removals.", deleted);
            Ok(())
        }
        Commands::Remind(cmd) => handle_remind(&store, cmd, today),
        Commands::Settings => {
            let settings = Settings::load()?;
            println!(
                "Reminders: {}",
                if settings.notifications_enabled { "on" } else { "off" }
            );
            println!("Reminder time: {}", settings.notification_time_string());
            println!("Dark mode: {}", if settings.dark_mode { "on" } else { "off" });
            Ok(())
        }
        Commands::DarkMode => {
            let mut settings = Settings::load()?;
            settings.dark_mode = !settings.dark_mode;
            settings.save()?;
            println!("Dark mode {}", if settings.dark_mode { "on" } else { "off" });
            Ok(())
        }
        Commands::Categories => {
            for category in PREDEFINED_CATEGORIES {
                println!("{}", category);
            }
            Ok(())
        }
    }
}

fn add_item(
    store: &FridgeStore,
    name: String,
    quantity: u32,
    category: Option<String>,
    expires: Option<NaiveDate>,
    favorite: bool,
) -> anyhow::Result<()> {
    let name = name.trim().to_string();
    if name.is_empty() {
        bail!("Item name must not be empty");
    }

    let mut item = FridgeItem::new(name, quantity)
        .with_category(category.unwrap_or_default())
        .with_favorite(favorite);
    if let Some(date) = expires {
        item = item.with_expiration(date);
    }

    let mut items = store.load_records();
    items.push(item.clone());
    store.save_records(&items)?;
    store.append_history(&item, HistoryAction::Added)?;

    println!("Added {} (qty {})", item.name, item.quantity);
    Ok(())
}

fn list_items(store: &FridgeStore, filter: ExpiryFilter, search: Option<&str>, today: NaiveDate) {
    let items = store.load_records();
    let shown = apply_filter(&items, filter, today, search);

    if shown.is_empty() {
        println!("Nothing to show for {}", filter.label());
        return;
    }

    println!("{} — {} item(s)", filter.label(), shown.len());
    for item in &shown {
        let status = ExpiryStatus::classify(item.expiration_date, today);
        let star = if item.is_favorite { "* " } else { "  " };
        println!(
            "{}{} (qty {}) [{}] {} — {}",
            star,
            item.name,
            item.quantity,
            item.category,
            status.color_code(),
            expiry_message(item, today)
        );
    }
}

fn update_item(
    store: &FridgeStore,
    name: &str,
    rename: Option<String>,
    quantity: Option<u32>,
    category: Option<String>,
    expires: Option<NaiveDate>,
    no_expires: bool,
) -> anyhow::Result<()> {
    let mut items = store.load_records();
    let item = items
        .iter_mut()
        .find(|i| i.name.eq_ignore_ascii_case(name))
        .with_context(|| format!("No item named '{}'", name))?;

    if let Some(new_name) = rename {
        let new_name = new_name.trim().to_string();
        if new_name.is_empty() {
            bail!("Item name must not be empty");
        }
        item.name = new_name;
    }
    if let Some(q) = quantity {
        item.quantity = q;
    }
    if let Some(c) = category {
        item.category = chillcheck_core::models::normalize_category(c);
    }
    if let Some(date) = expires {
        item.expiration_date = Some(date);
    }
    if no_expires {
        item.expiration_date = None;
    }

    let snapshot = item.clone();
    store.save_records(&items)?;
    store.append_history(&snapshot, HistoryAction::Updated)?;

    println!("Updated {}", snapshot.name);
    Ok(())
}

fn remove_item(store: &FridgeStore, name: &str) -> anyhow::Result<()> {
    let mut items = store.load_records();
    let index = items
        .iter()
        .position(|i| i.name.eq_ignore_ascii_case(name))
        .with_context(|| format!("No item named '{}'", name))?;

    let removed = items.remove(index);
    store.save_records(&items)?;
    store.append_history(&removed, HistoryAction::Removed)?;

    println!("Removed {}", removed.name);
    Ok(())
}

fn toggle_favorite(store: &FridgeStore, name: &str) -> anyhow::Result<()> {
    let mut items = store.load_records();
    let item = items
        .iter_mut()
        .find(|i| i.name.eq_ignore_ascii_case(name))
        .with_context(|| format!("No item named '{}'", name))?;

    item.is_favorite = !item.is_favorite;
    let snapshot = item.clone();
    store.save_records(&items)?;
    store.append_history(&snapshot, HistoryAction::Updated)?;

    println!(
        "{} is {} a favorite",
        snapshot.name,
        if snapshot.is_favorite { "now" } else { "no longer" }
    );
    Ok(())
}

fn show_suggestions(store: &FridgeStore, today: NaiveDate) {
    let items = store.load_records();
    let report = UseTodayReport::build(&items, today);

    if report.is_empty() {
        println!("All Good! {}", UseTodayReport::all_good_message());
        return;
    }

    for (title, description, section_items) in report.sections() {
        if section_items.is_empty() {
            continue;
        }
        println!("\n{} — {} ({} item(s))", title, description, section_items.len());
        for item in section_items {
            println!(
                "  {} (qty {}) [{}] — {}",
                item.name,
                item.quantity,
                item.category,
                expiry_message(item, today)
            );
        }
    }
}

fn show_history(
    store: &FridgeStore,
    action: Option<HistoryAction>,
    clear: bool,
) -> anyhow::Result<()> {
    if clear {
        store.clear_history()?;
        println!("History has been cleared.");
        return Ok(());
    }

    let entries = store.load_history();
    let shown: Vec<_> = entries
        .iter()
        .filter(|e| action.map_or(true, |a| e.action == a))
        .collect();

    if shown.is_empty() {
        println!("No history yet");
        return Ok(());
    }

    for entry in shown {
        println!(
            "{} • {} • {} • Qty: {}",
            entry.item.name,
            entry.action,
            entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.item.quantity
        );
    }
    Ok(())
}

fn handle_remind(store: &FridgeStore, cmd: RemindCommands, today: NaiveDate) -> anyhow::Result<()> {
    let mut settings = Settings::load()?;
    let scheduler = ReminderScheduler::new(ConsoleReminderBackend);

    match cmd {
        RemindCommands::Preview => {
            let items = store.load_records();
            let content = generate_content(&items, today);
            println!("[{}] {}", content.title, content.body);
            println!("Urgent items: {}", urgent_item_count(&items, today));
        }
        RemindCommands::Enable => {
            let items = store.load_records();
            let granted = scheduler.enable(
                &items,
                settings.notification_hour,
                settings.notification_minute,
                Utc::now(),
            )?;
            settings.notifications_enabled = granted;
            settings.save()?;
            if granted {
                println!("Daily reminder on at {}", settings.notification_time_string());
            } else {
                println!("Permission denied - reminders stay off");
            }
        }
        RemindCommands::Disable => {
            scheduler.disable();
            settings.notifications_enabled = false;
            settings.save()?;
            println!("Daily reminder off");
        }
        RemindCommands::Time { hour, minute } => {
            settings.set_notification_time(hour, minute)?;
            settings.save()?;
            if settings.notifications_enabled {
                // Reschedule with the new time
                let items = store.load_records();
                scheduler.reschedule(
                    &items,
                    settings.notification_hour,
                    settings.notification_minute,
                    Utc::now(),
                )?;
            }
            println!("Reminder time set to {}", settings.notification_time_string());
        }
    }
    Ok(())
}
