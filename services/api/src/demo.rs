use crate::infra::InMemoryGuestRepository;
use chrono::{Local, NaiveDate};
use clap::Args;
use guest_planner::config::AppConfig;
use guest_planner::error::AppError;
use guest_planner::guests::sample::{sample_drafts, sample_guests};
use guest_planner::guests::{
    aggregate_statistics, build_export_table, CategoryFilter, Guest, GuestListing,
    GuestService, GuestSnapshot, OwnerId, SortKey, StatisticsSummary,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BAR_WIDTH: usize = 20;

#[derive(Args, Debug, Default)]
pub(crate) struct StatsArgs {
    /// JSON guest list to summarize. Defaults to the built-in sample list.
    #[arg(long)]
    pub(crate) guests: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// JSON guest list to show. Defaults to the built-in sample list.
    #[arg(long)]
    pub(crate) guests: Option<PathBuf>,
    /// Category label to keep, or "all".
    #[arg(long, default_value = "all")]
    pub(crate) category: CategoryFilter,
    /// Case-insensitive text matched against name, notes, and category.
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Sort mode, e.g. name-asc, grade-asc, attendance-desc.
    #[arg(long, default_value = "name-asc")]
    pub(crate) sort: SortKey,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// JSON guest list to export. Defaults to the built-in sample list.
    #[arg(long)]
    pub(crate) guests: Option<PathBuf>,
    /// Output directory (defaults to GUEST_EXPORT_DIR).
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Date stamped into the file name (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Also write the collection as a JSON snapshot to this path.
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the demo export into this directory.
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Export date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

fn load_guests(path: Option<&Path>) -> Result<(Vec<Guest>, String), AppError> {
    match path {
        Some(path) => {
            let guests = GuestSnapshot::from_path(path)?;
            Ok((guests, format!("snapshot {}", path.display())))
        }
        None => Ok((sample_guests(), "built-in sample list".to_string())),
    }
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let (guests, source) = load_guests(args.guests.as_deref())?;
    println!("Guest statistics ({source})");
    match aggregate_statistics(&guests) {
        Ok(statistics) => print_lines(&statistics_lines(&statistics.summary())),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let (guests, source) = load_guests(args.guests.as_deref())?;
    println!("Guest list ({source})");
    let listing = GuestListing::build(
        &guests,
        args.category,
        args.search.as_deref().unwrap_or(""),
        args.sort,
    );
    print_lines(&listing_lines(&listing));
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        guests,
        out_dir,
        date,
        snapshot,
    } = args;

    let (guests, source) = load_guests(guests.as_deref())?;
    let out_dir = match out_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.planner.export_dir,
    };
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let table = build_export_table(&guests);
    let path = table.write_to_dir(&out_dir, date)?;
    println!(
        "Exported {} guests from {source} to {}",
        table.len(),
        path.display()
    );

    if let Some(snapshot) = snapshot {
        GuestSnapshot::save(&guests, &snapshot)?;
        println!("Saved JSON snapshot to {}", snapshot.display());
    }

    Ok(())
}

/// Walks the full service flow against the in-memory store for a demo owner.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryGuestRepository::default());
    let service = GuestService::new(repository);
    let owner = OwnerId("demo".to_string());

    println!("Wedding guest planner demo");
    let mut created = Vec::new();
    for draft in sample_drafts() {
        created.push(service.create(Some(&owner), draft)?);
    }
    println!("- created {} guests for owner '{}'", created.len(), owner.0);

    for guest in created.iter().take(6) {
        service.toggle_invite_sent(Some(&owner), guest.id())?;
        service.toggle_confirmation(Some(&owner), guest.id())?;
    }
    println!("- sent and confirmed invites for the first 6 guests");

    let summary = service.statistics(Some(&owner))?;
    println!();
    print_lines(&statistics_lines(&summary));

    let listing = service.listing(Some(&owner), CategoryFilter::All, "", SortKey::GradeAsc)?;
    println!("\nHighest priority guests");
    print_lines(&listing_lines(&GuestListing {
        showing: listing.showing.min(10),
        total: listing.total,
        sort: listing.sort,
        guests: listing.guests.into_iter().take(10).collect(),
    }));

    if let Some(out_dir) = args.out_dir {
        let table = service.export_table(Some(&owner))?;
        let date = args.date.unwrap_or_else(|| Local::now().date_naive());
        let path = table.write_to_dir(&out_dir, date)?;
        println!("\nExported {} guests to {}", table.len(), path.display());
    }

    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub(crate) fn statistics_lines(summary: &StatisticsSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Total guests: {}", summary.total_guests),
        format!(
            "Expected attendance: {} (attendance possibility 7+)",
            summary.expected_attendance
        ),
        format!("Average attendance: {:.1}/10", summary.average_attendance),
        format!(
            "High priority (A/B): {}",
            summary.high_priority_guests
        ),
        format!("Top category: {}", summary.top_category_label),
        String::new(),
        "Category breakdown".to_string(),
    ];

    for entry in &summary.category_breakdown {
        lines.push(format!(
            "- {:<18} {:>3} {} {:.0}%",
            entry.category_label,
            entry.count,
            bar(entry.share_pct),
            entry.share_pct
        ));
    }

    lines.push(String::new());
    lines.push("Grade distribution".to_string());
    for bucket in &summary.grade_distribution {
        lines.push(format!(
            "- {} {:>3} ({}%)",
            bucket.grade_label, bucket.count, bucket.percentage
        ));
    }

    lines.push(String::new());
    lines.push("Top rated".to_string());
    for entry in &summary.top_rated {
        lines.push(format!(
            "{}. {} ({}) avg {:.1}",
            entry.rank, entry.name, entry.category_label, entry.average_rating
        ));
    }

    lines
}

pub(crate) fn listing_lines(listing: &GuestListing) -> Vec<String> {
    let mut lines = vec![format!(
        "Showing {} of {} guests (sorted by {})",
        listing.showing,
        listing.total,
        listing.sort.mode().label
    )];

    if listing.is_filtered_empty() {
        lines.push("No guests match the current filter.".to_string());
        return lines;
    }

    for guest in &listing.guests {
        let mut flags = Vec::new();
        if guest.invite_sent() {
            flags.push("invited");
        }
        if guest.confirmation() {
            flags.push("confirmed");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        lines.push(format!(
            "- [{}] {} | {} | groom {} / bridesmaid {} / attendance {}{}",
            guest.final_grade(),
            guest.name(),
            guest.category(),
            guest.groom_rating(),
            guest.bridesmaid_rating(),
            guest.attendance_possibility(),
            flags
        ));
    }

    lines
}

fn bar(share_pct: f64) -> String {
    let filled = ((share_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
