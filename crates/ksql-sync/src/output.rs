use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::reconcile::{Outcome, ReconcileReport};

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_report(report: &ReconcileReport) {
    if report.outcomes.is_empty() {
        println!("No entries configured.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Entry", "Type", "Result", "Error"]);
    for o in &report.outcomes {
        let error = match &o.outcome {
            Outcome::Failed(e) => e.to_string(),
            _ => String::new(),
        };
        builder.push_record([
            o.label.clone(),
            o.entry_type.to_string(),
            o.outcome.as_str().to_string(),
            error,
        ]);
    }
    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");

    let summary = format!(
        "{} created, {} executed, {} already present",
        report.created().len(),
        report.executed().len(),
        report.skipped().len()
    );
    if !report.has_failures() {
        print_success(&summary);
    } else {
        let failed = report.failures().count();
        println!("{} {}, {}", "!".yellow(), summary, format!("{failed} failed").red());
    }
}
