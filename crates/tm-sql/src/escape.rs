/// Escape a string for use inside a single-quoted SQL literal: doubles
/// embedded single quotes, the one character MySQL-style dumps need
/// escaped in unquoted ASCII data.
pub fn sql_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(sql_quote("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn wraps_plain_text() {
        assert_eq!(sql_quote("California"), "'California'");
    }
}
