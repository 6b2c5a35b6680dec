use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::cli::args::{FoodCommands, SettingsCommands, ZakatArgs};
use crate::config::AppConfig;
use crate::data::Catalog;
use crate::models::{
    Division, FoodItem, Language, MetalType, MetalUnit, PrayerDay, PrayerType, SettingsPatch,
    Theme, ZakatInputs,
};
use crate::prayer_times::clock::{format_12h, minute_of_day};
use crate::prayer_times::lookup::DATE_FORMAT;
use crate::prayer_times::{parse_minutes, DailyPrayers, FastingTimes};
use crate::store::{AppState, StateStore};
use crate::utils::format::{format_amount, format_calories, pad_display, progress_bar};
use crate::utils::hijri::hijri_string;
use crate::zakat::form::{self, RESET_COMMAND, UNIT_COMMAND};
use crate::zakat::{parse_amount, ZakatCalculator};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Shared lookups ──────────────────────────────────────────────────────────

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}'; use YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

fn find_division<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Division> {
    catalog.division(id).ok_or_else(|| {
        anyhow!(
            "Unknown division '{}'. Run `sehri divisions` to list them",
            id
        )
    })
}

fn find_food<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a FoodItem> {
    catalog
        .food(id)
        .ok_or_else(|| anyhow!("Unknown food '{}'. Run `sehri food list` to list them", id))
}

fn prayer_label(prayer: PrayerType, language: Language) -> &'static str {
    match language {
        Language::En => prayer.display_name(),
        Language::Bn => prayer.display_name_bn(),
    }
}

fn food_label(food: &FoodItem, language: Language) -> &str {
    match language {
        Language::En => &food.name,
        Language::Bn => &food.name_bn,
    }
}

/// The schedule entry for a date, printing a notice when the date is not in
/// the timetable and another day is shown instead.
fn day_for<'a>(catalog: &'a Catalog, division: &Division, date: NaiveDate) -> Result<&'a PrayerDay> {
    let resolved = catalog.schedule.resolve(&division.id, date)?;
    if resolved.fell_back {
        println_colored!(
            AMBER,
            "  No timetable entry for {}; showing {} instead",
            date.format(DATE_FORMAT),
            resolved.day.date
        );
    }
    Ok(resolved.day)
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    catalog: &Catalog,
    config: &AppConfig,
    state: &AppState,
    division: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let language = state.settings.language;
    let today = Local::now().date_naive();
    let date = parse_date(date)?;
    let division = find_division(catalog, division.unwrap_or(&state.selected_division))?;

    println!();
    let day = day_for(catalog, division, date)?;
    let prayers = DailyPrayers::from_day(day)?;
    let fasting = FastingTimes::from_day(day)?;
    let is_today = day.date == today.format(DATE_FORMAT).to_string();
    let now = minute_of_day(Local::now().time());

    let hijri = hijri_string(date, config.display.hijri_offset);
    println_colored!(
        GOLD,
        "  Prayer Times — {} ({}){}",
        division.label(language),
        day.date,
        if hijri.is_empty() { String::new() } else { format!(" · {}", hijri) }
    );
    println!();

    for (prayer, at) in prayers.iter() {
        let line = format!("  {}  {}", pad_display(prayer_label(prayer, language), 10), format_12h(at));
        if is_today && at <= now {
            println_colored!(DIM, "{}", line);
        } else {
            println_colored!(BOLD, "{}", line);
        }
    }
    println!();
    println!("  {}  {}", pad_display("Sehri ends", 10), format_12h(fasting.sehri_end));
    println!("  {}  {}", pad_display("Iftar", 10), format_12h(fasting.iftar_start));

    if is_today {
        let next = prayers.next_prayer(now);
        let progress = prayers.progress(now);
        println!();
        println_colored!(
            AMBER,
            "  Next: {}{} in {}",
            prayer_label(next.prayer, language),
            if next.tomorrow { " (tomorrow)" } else { "" },
            prayers.time_remaining(now)
        );
        println_colored!(DIM, "  {} {:.0}%", progress_bar(progress, 20), progress);

        let tomorrow = date
            .succ_opt()
            .map(|d| catalog.schedule.exact(&division.id, d))
            .transpose()?
            .flatten()
            .map(FastingTimes::from_day)
            .transpose()?;
        let event = fasting.next_event(tomorrow.as_ref(), now);
        let color = if fasting.is_fasting(now) { GREEN } else { GOLD };
        println_colored!(
            color,
            "  {} in {} ({})",
            event.event.display_name(),
            event.remaining,
            format_12h(event.at)
        );
    }
    println!();
    Ok(())
}

// ─── Schedule ────────────────────────────────────────────────────────────────

pub fn handle_schedule(catalog: &Catalog, state: &AppState, division: Option<&str>) -> Result<()> {
    let language = state.settings.language;
    let division = find_division(catalog, division.unwrap_or(&state.selected_division))?;
    let days = catalog.schedule.days(&division.id)?;
    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();

    println!();
    let range = catalog
        .schedule
        .date_range(&division.id)?
        .map(|(first, last)| format!(" ({} to {})", first, last))
        .unwrap_or_default();
    println_colored!(GOLD, "  Ramadan Timetable — {}{}", division.label(language), range);
    println!();
    println_colored!(DIM, "  {:<5} {:<12} {:<11} {:<9}", "Day", "Date", "Sehri ends", "Iftar");

    for (i, day) in days.iter().enumerate() {
        let line = format!(
            "  {:<5} {:<12} {:<11} {:<9}",
            i + 1,
            day.date, day.sehri_end, day.iftar_start
        );
        if day.date == today {
            println_colored!(GOLD, "{}  ◀ today", line);
        } else if day.date < today {
            println_colored!(DIM, "{}", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Compare ─────────────────────────────────────────────────────────────────

fn signed_difference(from: &str, to: &str) -> Result<String> {
    let diff = parse_minutes(to)? as i64 - parse_minutes(from)? as i64;
    Ok(match diff {
        0 => "same".to_string(),
        d if d > 0 => format!("+{}m", d),
        d => format!("{}m", d),
    })
}

pub fn handle_compare(
    catalog: &Catalog,
    state: &AppState,
    from: &str,
    to: &str,
    date: Option<&str>,
) -> Result<()> {
    let language = state.settings.language;
    let date = parse_date(date)?;
    let from = find_division(catalog, from)?;
    let to = find_division(catalog, to)?;

    println!();
    let a = day_for(catalog, from, date)?;
    let b = day_for(catalog, to, date)?;

    println_colored!(
        GOLD,
        "  {} vs {} ({})",
        from.label(language),
        to.label(language),
        a.date
    );
    println!();
    println_colored!(
        DIM,
        "  {}  {:<10} {:<10} {}",
        pad_display("", 10),
        pad_display(from.label(language), 10),
        pad_display(to.label(language), 10),
        "Diff"
    );

    let mut rows: Vec<(&str, &str, &str)> = vec![("Sehri ends", a.sehri_end.as_str(), b.sehri_end.as_str())];
    for prayer in PrayerType::all() {
        rows.push((prayer_label(prayer, language), a.time_of(prayer), b.time_of(prayer)));
    }
    rows.push(("Iftar", a.iftar_start.as_str(), b.iftar_start.as_str()));

    for (label, x, y) in rows {
        println!(
            "  {}  {:<10} {:<10} {}",
            pad_display(label, 10),
            x,
            y,
            signed_difference(x, y)?
        );
    }
    println!();
    Ok(())
}

// ─── Divisions ───────────────────────────────────────────────────────────────

pub fn handle_divisions(catalog: &Catalog, state: &AppState) -> Result<()> {
    let language = state.settings.language;
    println!();
    println_colored!(GOLD, "  Divisions");
    println!();
    for division in &catalog.divisions {
        let line = format!("  {:<12} {}", division.id, division.label(language));
        if division.id == state.selected_division {
            println_colored!(GREEN, "{}  ●", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

pub fn handle_division(catalog: &Catalog, store: &StateStore, state: &AppState, id: &str) -> Result<()> {
    let division = find_division(catalog, id)?;
    let patch = SettingsPatch {
        selected_division: Some(division.id.clone()),
        ..Default::default()
    };
    let next = store.apply(state, |s| s.set_selected_division(&division.id).update_settings(&patch));
    println_colored!(
        GREEN,
        "  ✓ Division set to {}",
        division.label(next.settings.language)
    );
    Ok(())
}

// ─── Food ────────────────────────────────────────────────────────────────────

pub fn handle_food(catalog: &Catalog, store: &StateStore, state: &AppState, action: &FoodCommands) -> Result<()> {
    let language = state.settings.language;
    match action {
        FoodCommands::List { category } => {
            println!();
            println_colored!(GOLD, "  Foods");
            println!();
            for food in &catalog.foods {
                if category.as_deref().is_some_and(|c| !food.category.eq_ignore_ascii_case(c)) {
                    continue;
                }
                let portion = food
                    .base_portion()
                    .map(|p| format!("{} · {}", p.size, format_calories(p.calories)))
                    .unwrap_or_default();
                let mark = if state.is_selected(&food.id) { "✓" } else { " " };
                println!(
                    "  {} {:<14} {} {:<10} {}",
                    mark,
                    food.id,
                    pad_display(food_label(food, language), 22),
                    food.category,
                    portion
                );
            }
            println!();
        }
        FoodCommands::Toggle { id, qty } => {
            let food = find_food(catalog, id)?;
            let next = store.apply(state, |s| s.toggle_food_selection(food, *qty));
            if next.is_selected(&food.id) {
                let selected = &next.selected_foods[&food.id];
                println_colored!(
                    GREEN,
                    "  ✓ Added {} × {} ({})",
                    food_label(food, language),
                    selected.quantity,
                    format_calories(selected.calories())
                );
            } else {
                println_colored!(DIM, "  ○ Removed {}", food_label(food, language));
            }
            println_colored!(DIM, "  Total: {}", format_calories(next.total_calories()));
        }
        FoodCommands::Qty { id, quantity } => {
            let food = find_food(catalog, id)?;
            if !state.is_selected(&food.id) {
                println_colored!(
                    AMBER,
                    "  {} is not in the tracker; add it with `sehri food toggle {}`",
                    food_label(food, language),
                    food.id
                );
                return Ok(());
            }
            let next = store.apply(state, |s| s.update_food_quantity(&food.id, *quantity));
            let selected = &next.selected_foods[&food.id];
            println_colored!(
                GREEN,
                "  ✓ {} × {} ({})",
                food_label(food, language),
                selected.quantity,
                format_calories(selected.calories())
            );
        }
        FoodCommands::Amount { id, amount } => {
            let food = find_food(catalog, id)?;
            if !state.is_selected(&food.id) {
                println_colored!(
                    AMBER,
                    "  {} is not in the tracker; add it with `sehri food toggle {}`",
                    food_label(food, language),
                    food.id
                );
                return Ok(());
            }
            let amount = parse_amount(amount);
            let next = store.apply(state, |s| s.update_food_amount(&food.id, amount));
            let selected = &next.selected_foods[&food.id];
            match selected.custom_amount {
                Some(a) => println_colored!(
                    GREEN,
                    "  ✓ {} {} ({})",
                    food_label(food, language),
                    format_amount(a),
                    format_calories(selected.calories())
                ),
                None => println_colored!(
                    DIM,
                    "  ○ Custom amount cleared for {}",
                    food_label(food, language)
                ),
            }
        }
        FoodCommands::Clear => {
            store.apply(state, |s| s.clear_food_selections());
            println_colored!(GREEN, "  ✓ Tracker cleared");
        }
        FoodCommands::Summary => {
            println!();
            if state.selected_foods.is_empty() {
                println_colored!(DIM, "  No foods tracked. Add one with `sehri food toggle <id>`");
                println!();
                return Ok(());
            }
            println_colored!(GOLD, "  Calorie Tracker");
            println!();
            for selected in state.selected_foods.values() {
                let amount = match selected.custom_amount {
                    Some(a) => format_amount(a),
                    None => format!("× {}", selected.quantity),
                };
                println!(
                    "  {} {:<10} {:>10}",
                    pad_display(food_label(&selected.food, language), 22),
                    amount,
                    format_calories(selected.calories())
                );
            }
            println!();
            println_colored!(BOLD, "  Total: {}", format_calories(state.total_calories()));
            println!();
        }
    }
    Ok(())
}

// ─── Zakat ───────────────────────────────────────────────────────────────────

fn zakat_inputs(args: &ZakatArgs) -> Result<ZakatInputs> {
    let mut inputs = ZakatInputs::default();
    if MetalUnit::from_str(&args.unit)? != inputs.metal_unit {
        inputs.toggle_unit();
    }
    inputs.metal_type = MetalType::from_str(&args.metal_type)?;
    inputs.cash = args.cash.clone();
    inputs.metal = args.metal.clone();
    inputs.investments = args.investments.clone();
    inputs.loans_given = args.loans_given.clone();
    inputs.stocks = args.stocks.clone();
    inputs.rental_income = args.rental_income.clone();
    inputs.agriculture = args.agriculture.clone();
    inputs.savings = args.savings.clone();
    inputs.liabilities = args.liabilities.clone();
    Ok(inputs)
}

fn prompt_zakat_form(inputs: &mut ZakatInputs) -> Result<()> {
    println_colored!(
        DIM,
        "  Blank means 0. {} starts over, {} switches grams/currency.",
        RESET_COMMAND,
        UNIT_COMMAND
    );
    form::fill(inputs, |field, current| {
        let label = match field {
            form::ZakatField::Metal => format!(
                "{} ({}, {})",
                field.label(),
                current.metal_type.as_str(),
                current.metal_unit.as_str()
            ),
            _ => field.label().to_string(),
        };
        prompt(&format!("  {}: ", label))
    })
}

pub fn handle_zakat(config: &AppConfig, args: &ZakatArgs) -> Result<()> {
    let mut inputs = zakat_inputs(args)?;
    if args.interactive {
        prompt_zakat_form(&mut inputs)?;
    }
    let calculator = ZakatCalculator::new(&config.zakat);
    let result = calculator.calculate(&inputs);
    let currency = &config.zakat.currency;

    println!();
    println_colored!(GOLD, "  Zakat ({} standard)", inputs.metal_type.as_str());
    println!();
    if inputs.metal_unit == MetalUnit::Grams && !inputs.metal.trim().is_empty() {
        println_colored!(
            DIM,
            "  {} g × {} {}/g",
            format_amount(parse_amount(&inputs.metal)),
            format_amount(calculator.price_per_gram(inputs.metal_type)),
            currency
        );
    }
    println!("  Metal value:       {} {}", format_amount(result.metal_value), currency);
    println!(
        "  Zakatable wealth:  {} {}",
        format_amount(result.total_zakatable_assets),
        currency
    );
    println!("  Nisab:             {} {}", format_amount(result.nisab_value), currency);
    println!();
    if result.is_eligible {
        println_colored!(
            GREEN,
            "  Zakat due: {} {}",
            format_amount(result.zakat_amount),
            currency
        );
    } else {
        println_colored!(AMBER, "  Below nisab: no zakat due");
    }
    println!();
    Ok(())
}

/// `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()))
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings(
    catalog: &Catalog,
    store: &StateStore,
    state: &AppState,
    action: &SettingsCommands,
) -> Result<()> {
    match action {
        SettingsCommands::Show => print_settings(catalog, state),
        SettingsCommands::Set {
            notifications,
            language,
            theme,
            division,
        } => {
            if let Some(id) = division {
                find_division(catalog, id)?;
            }
            let patch = SettingsPatch {
                selected_division: division.clone(),
                notifications: *notifications,
                language: language.as_deref().map(Language::from_str).transpose()?,
                theme: theme.as_deref().map(Theme::from_str).transpose()?,
            };
            if patch.is_empty() {
                bail!("Nothing to change. Pass --notifications, --language, --theme or --division");
            }
            let next = store.apply(state, |s| {
                let next = s.update_settings(&patch);
                match &patch.selected_division {
                    Some(id) => next.set_selected_division(id),
                    None => next,
                }
            });
            println_colored!(GREEN, "  ✓ Settings updated");
            print_settings(catalog, &next)
        }
    }
}

fn print_settings(catalog: &Catalog, state: &AppState) -> Result<()> {
    let settings = &state.settings;
    let division = catalog
        .division(&settings.selected_division)
        .map(|d| d.label(settings.language).to_string())
        .unwrap_or_else(|| settings.selected_division.clone());
    println!();
    println_colored!(GOLD, "  Settings");
    println!();
    println!("  Division:       {}", division);
    println!(
        "  Notifications:  {}",
        if settings.notifications { "on" } else { "off" }
    );
    println!("  Language:       {}", settings.language.as_str());
    println!("  Theme:          {}", settings.theme.as_str());
    println!();
    Ok(())
}

// ─── Content ─────────────────────────────────────────────────────────────────

pub fn handle_duas(catalog: &Catalog, search: Option<&str>) -> Result<()> {
    let duas: Vec<_> = catalog
        .duas
        .iter()
        .filter(|d| search.is_none_or(|q| d.matches(q)))
        .collect();

    println!();
    if duas.is_empty() {
        println_colored!(DIM, "  No duas match");
        println!();
        return Ok(());
    }
    for dua in duas {
        println_colored!(GOLD, "  {}", dua.title);
        println!("  {}", dua.arabic);
        println_colored!(DIM, "  {}", dua.pronunciation);
        println!("  {}", dua.meaning);
        if let Some(reference) = &dua.reference {
            println_colored!(DIM, "  — {}", reference);
        }
        println!();
    }
    Ok(())
}

pub fn handle_names(catalog: &Catalog, id: Option<u32>) -> Result<()> {
    println!();
    match id {
        Some(id) => {
            let name = catalog
                .names
                .iter()
                .find(|n| n.id == id)
                .ok_or_else(|| anyhow!("No name with number {} (1 to {})", id, catalog.names.len()))?;
            println_colored!(GOLD, "  {}. {}", name.id, name.transliteration);
            println!("  {}", name.meaning);
        }
        None => {
            println_colored!(GOLD, "  The 99 Names of Allah");
            println!();
            for name in &catalog.names {
                println!("  {:>3}  {:<18} {}", name.id, name.transliteration, name.meaning);
            }
        }
    }
    println!();
    Ok(())
}

pub fn handle_tips(catalog: &Catalog) -> Result<()> {
    println!();
    println_colored!(GOLD, "  Ramadan Food Tips");
    println!();
    for tip in &catalog.tips {
        println_colored!(BOLD, "  {}", tip.title);
        println!("  {}", tip.description);
        println!();
    }
    Ok(())
}

pub fn handle_quran(catalog: &Catalog, chapter: Option<u32>) -> Result<()> {
    println!();
    let Some(id) = chapter else {
        println_colored!(GOLD, "  Quran");
        println!();
        for chapter in &catalog.chapters {
            let marker = if chapter.has_text() { "" } else { "  (no text)" };
            println!(
                "  {:>3}  {:<14} {:<28} {:>3} verses{}",
                chapter.id, chapter.name, chapter.meaning, chapter.verse_count, marker
            );
        }
        println!();
        return Ok(());
    };

    let chapter = catalog
        .chapter(id)
        .ok_or_else(|| anyhow!("Chapter {} is not bundled. Run `sehri quran` to list them", id))?;
    println_colored!(GOLD, "  {}. {} ({})", chapter.id, chapter.name, chapter.meaning);
    println!();
    if !chapter.has_text() {
        println_colored!(DIM, "  The translation of this chapter is not bundled");
    }
    for verse in &chapter.verses {
        println!("  {:>3}  {}", verse.number, verse.text);
    }
    println!();
    Ok(())
}

// ─── Config & reset ──────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    println!();
    if init {
        if path.exists() {
            println_colored!(AMBER, "  Config already exists at {:?}", path);
        } else {
            config.save()?;
            println_colored!(GREEN, "  ✓ Wrote {:?}", path);
        }
    } else {
        println_colored!(DIM, "  {:?}{}", path, if path.exists() { "" } else { " (not created)" });
    }
    println!();
    print!("{}", toml::to_string_pretty(config).context("Serializing config")?);
    println!();
    Ok(())
}

pub fn handle_reset(store: &StateStore) -> Result<()> {
    if store.reset()? {
        println_colored!(GREEN, "  ✓ Saved selections and settings cleared");
    } else {
        println_colored!(DIM, "  Nothing saved yet");
    }
    Ok(())
}
