use colored::Colorize;
use libris::api::{CmdMessage, MessageLevel};
use libris::model::Book;
use libris::stats::LibraryStats;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 36;
const AUTHOR_WIDTH: usize = 24;
const GENRE_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 8;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    println!(
        "{}",
        format!(
            "    {}{}{}  {}{}",
            pad("Title", TITLE_WIDTH),
            pad("Author", AUTHOR_WIDTH),
            "Year",
            pad("Genre", GENRE_WIDTH),
            "Status"
        )
        .bold()
    );

    for (i, book) in books.iter().enumerate() {
        let status = format!("{:<width$}", book.status_label(), width = STATUS_WIDTH);
        let status = if book.read {
            status.green()
        } else {
            status.yellow()
        };
        println!(
            "{} {}{}{:<4}  {}{}",
            format!("{:>3}", i + 1).dimmed(),
            pad(&book.title, TITLE_WIDTH),
            pad(&book.author, AUTHOR_WIDTH),
            book.year,
            pad(&book.genre, GENRE_WIDTH),
            status
        );
    }
}

pub(super) fn print_stats(stats: &LibraryStats) {
    println!("{:<16}{}", "Total books:", stats.total.to_string().bold());
    println!("{:<16}{}", "Read:", stats.read_count.to_string().green());
    println!("{:<16}{}", "To read:", stats.unread_count.to_string().yellow());
    println!("{:<16}{:.1}%", "Read share:", stats.read_percentage);

    if !stats.genres.is_empty() {
        println!();
        println!("{}", "By genre:".bold());
        for (genre, count) in &stats.genres {
            println!("  {}{}", pad(genre, GENRE_WIDTH + 2), count);
        }
    }
}

/// Truncates to `width - 1` columns and pads, leaving one column of spacing.
fn pad(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width.saturating_sub(1));
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
