use colored::Colorize;
use tracing::info;

/// Prints the deletion candidates.
///
/// Batch mode writes bare names to stdout for shell piping; otherwise each
/// candidate is logged.
pub fn print_candidates(names: &[String], batch: bool) {
    if names.is_empty() {
        if !batch {
            info!("Nothing found to be deleted.");
        }
        return;
    }

    for name in names {
        if batch {
            println!("{}", name);
        } else {
            info!(candidate = %name, "Found deletion candidate");
        }
    }
}

/// Prints the final deletion summary. Suppressed in batch mode.
pub fn print_summary(kind: &str, deleted: usize, errors: usize, batch: bool) {
    if batch {
        return;
    }

    let deleted_str = deleted.to_string();
    let errors_str = if errors > 0 {
        errors.to_string().red().bold().to_string()
    } else {
        errors.to_string()
    };
    eprintln!(
        "{} Deleted {} {}, {} errors",
        "SUMMARY:".bold(),
        deleted_str.green().bold(),
        kind,
        errors_str
    );
}
