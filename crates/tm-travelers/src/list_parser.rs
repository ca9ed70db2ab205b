/// One line of a `.list` file, enough to both drive segment-clinching and
/// reproduce the file byte-for-byte (minus newline-style normalization)
/// when `-p/--splitregion` re-emits it.
#[derive(Debug, Clone)]
pub enum ListLine {
    /// Blank, `#`-comment, or a line that didn't parse to 4 or 6 fields.
    PassThrough(String),
    Chopped {
        raw: String,
        region: String,
        route: String,
        label1: String,
        label2: String,
    },
    Connected {
        raw: String,
        region: String,
        route: String,
        banner: String,
        city: String,
        label1: String,
        label2: String,
    },
}

pub struct ParsedList {
    pub lines: Vec<ListLine>,
    pub good_lines: usize,
}

/// Parse `.list` file text into lines. Strips a leading UTF-8 BOM.
/// Comment markers (`#`) may follow real fields on the same line; the
/// trailing comment is dropped before field-splitting but the full raw
/// line is kept for re-emission.
pub fn parse_list(text: &str) -> ParsedList {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = Vec::new();
    let mut good_lines = 0;

    for raw_line in text.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            lines.push(ListLine::PassThrough(raw_line.to_string()));
            continue;
        }
        let content = match trimmed.find('#') {
            Some(i) => trimmed[..i].trim_end(),
            None => trimmed,
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        match fields.len() {
            4 => {
                lines.push(ListLine::Chopped {
                    raw: raw_line.to_string(),
                    region: fields[0].to_string(),
                    route: fields[1].to_string(),
                    label1: fields[2].to_string(),
                    label2: fields[3].to_string(),
                });
                good_lines += 1;
            }
            6 => {
                lines.push(ListLine::Connected {
                    raw: raw_line.to_string(),
                    region: fields[0].to_string(),
                    route: fields[1].to_string(),
                    banner: fields[2].to_string(),
                    city: fields[3].to_string(),
                    label1: fields[4].to_string(),
                    label2: fields[5].to_string(),
                });
                good_lines += 1;
            }
            _ => lines.push(ListLine::PassThrough(raw_line.to_string())),
        }
    }

    ParsedList { lines, good_lines }
}
