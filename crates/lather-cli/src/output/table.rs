#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Render rows under a header line and a dashed divider, columns padded to
/// the widest cell and shrunk to fit `max_width`.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN)
        })
        .collect::<Vec<_>>();
    shrink_to_fit(&mut widths, options.max_width);

    let line = |cells: &mut dyn Iterator<Item = (String, bool)>| {
        cells
            .zip(&widths)
            .map(|((text, paint), width)| pad(&text, *width, paint && options.color))
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    let header_line = line(&mut headers.iter().map(|h| ((*h).to_string(), false)));
    let divider =
        "-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1));

    let mut out = vec![header_line, divider];
    for row in rows {
        out.push(line(&mut (0..widths.len()).map(|column| {
            let cell = row.get(column).map_or("-", String::as_str);
            (cell.to_string(), true)
        })));
    }
    out.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn pad(text: &str, width: usize, paint: bool) -> String {
    let clipped = clip(text, width);
    let fill = " ".repeat(width.saturating_sub(clipped.chars().count()));
    let right_align = is_number(&clipped);
    let shown = if paint { paint_value(&clipped) } else { clipped };
    if right_align {
        format!("{fill}{shown}")
    } else {
        format!("{shown}{fill}")
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out = text.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn is_number(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit()) && text.parse::<f64>().is_ok()
}

fn paint_value(text: &str) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "true" | "positive" | "showered" | "recorded" => "32",
        "false" | "negative" | "not showered" => "31",
        _ => return text.to_string(),
    };
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
