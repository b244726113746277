use booklist::api::{CmdMessage, MessageLevel};
use booklist::view::Page;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const INDEX_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 52;

pub(super) fn print_messages(messages: &[CmdMessage], verbose: bool) {
    for message in messages {
        match message.level {
            MessageLevel::Info if !verbose => {}
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_page(page: &Page, query: &str) {
    if page.is_empty() {
        if query.is_empty() {
            println!("No books found.");
        } else {
            println!("No books match \"{}\".", query);
        }
        return;
    }

    let author_width = LINE_WIDTH.saturating_sub(INDEX_WIDTH + TITLE_WIDTH);
    for vb in &page.books {
        let idx = format!("{:>4}. ", vb.position + 1);
        let title = pad_to_width(&truncate_to_width(&vb.book.title, TITLE_WIDTH), TITLE_WIDTH);
        let author = truncate_to_width(&vb.book.author, author_width);
        println!("{}{}{}", idx.yellow(), title, author.dimmed());
    }

    println!();
    println!("{}", page_footer(page, query).dimmed());
}

pub(super) fn page_footer(page: &Page, query: &str) -> String {
    let plural = |n: usize| if n == 1 { "book" } else { "books" };
    if query.is_empty() {
        format!(
            "Page {} of {} ({} {})",
            page.page,
            page.page_count,
            page.total_books,
            plural(page.total_books)
        )
    } else {
        format!(
            "Page {} of {} ({} of {} {} match \"{}\")",
            page.page,
            page.page_count,
            page.total_matches,
            page.total_books,
            plural(page.total_books),
            query
        )
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
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
