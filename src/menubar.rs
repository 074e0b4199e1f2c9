use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

/// A run of menu text: key hints in `[...]` are bold, everything else dim.
#[derive(Debug, PartialEq, Eq)]
pub enum Span<'a> {
    Key(&'a str),
    Label(&'a str),
}

/// Split a menu item into key-hint and label runs. An unclosed `[` is
/// treated as label text.
pub fn spans(item: &str) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            out.push(Span::Label(rest));
            break;
        };
        let Some(close) = rest[open..].find(']').map(|c| open + c) else {
            out.push(Span::Label(rest));
            break;
        };
        if open > 0 {
            out.push(Span::Label(&rest[..open]));
        }
        out.push(Span::Key(&rest[open..=close]));
        rest = &rest[close + 1..];
    }
    out
}

pub fn print_menu_item(out: &mut impl Write, item: &str) -> anyhow::Result<()> {
    for span in spans(item) {
        let (attr, text) = match span {
            Span::Key(t) => (style::Attribute::Bold, t),
            Span::Label(t) => (style::Attribute::Dim, t),
        };
        queue!(
            out,
            style::SetAttribute(attr),
            style::Print(text),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}

/// Clear terminal row `row` and print `items` across it.
pub fn render_menubar(out: &mut impl Write, row: u16, items: &[&str]) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_menu_item(out, item)?;
    }
    out.flush()?;
    Ok(())
}
