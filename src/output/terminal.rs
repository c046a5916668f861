// Colored terminal output for topic results and transcript listings.
//
// This module handles all terminal-specific formatting: colors, bars,
// table layout. The main.rs command bodies delegate here.

use colored::Colorize;

use crate::dataset::Transcript;
use crate::scoring::TopicHit;

/// Display the ranked topics of one transcript as a weight bar chart.
pub fn display_topic_hits(hits: &[TopicHit]) {
    if hits.is_empty() {
        display_no_topics();
        return;
    }

    println!("\n{}", "=== Key Topics ===".bold());
    println!();

    let bar_width: usize = 20;

    for (i, hit) in hits.iter().enumerate() {
        let filled = (hit.strength * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        // Color by strength band
        let colored_bar = if hit.strength >= 0.50 {
            bar.bright_green()
        } else if hit.strength >= 0.25 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>2}. {} {:.2}  {}",
            i + 1,
            colored_bar,
            hit.strength,
            hit.label.bold(),
        );
    }
    println!();
}

/// The "no strong topic" state — a valid outcome, not an error.
pub fn display_no_topics() {
    println!(
        "\n{}",
        "No strong topics identified in the selected transcript.".yellow()
    );
}

/// Display row previews so the user can pick a transcript by index.
pub fn display_transcript_list(transcripts: &[Transcript]) {
    if transcripts.is_empty() {
        println!("Dataset contains no transcripts.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Transcripts ({} rows) ===", transcripts.len()).bold()
    );
    println!();
    println!("  {:>5}  {}", "Row".dimmed(), "Preview".dimmed());
    println!("  {}", "-".repeat(60).dimmed());

    for transcript in transcripts {
        println!("  {:>5}  {}", transcript.index, transcript.preview());
    }
    println!();
}
