/// Cut a trailing `//` comment, ignoring `//` inside string literals.
pub fn strip_line_comments(line: &str) -> &str {
    let mut in_str = false;
    let mut escaped = false;
    let mut prev_slash = false;
    for (i, ch) in line.char_indices() {
        if in_str {
            match (escaped, ch) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_str = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => {
                in_str = true;
                prev_slash = false;
            }
            '/' if prev_slash => return &line[..i - 1],
            '/' => prev_slash = true,
            _ => prev_slash = false,
        }
    }
    line
}

/// `true` for bundle separator lines made only of `=`.
pub fn is_separator_line(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.chars().all(|c| c == '=')
}

/// Split `pkg/msg/Type` (or `pkg::msg::Type`) into its non-empty segments.
pub fn split_path(name: &str) -> Vec<String> {
    let sep = if name.contains("::") { "::" } else { "/" };
    name.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Removes leading `@name` / `@name(...)` annotations from lines, carrying
/// unbalanced argument lists over to the following lines.
#[derive(Debug, Default)]
pub struct AnnotationSkipper {
    depth: usize,
    in_str: bool,
    escaped: bool,
}

impl AnnotationSkipper {
    /// What remains of `line` once its annotations are cut; empty while the
    /// line is still inside an annotation's arguments.
    pub fn strip<'a>(&mut self, line: &'a str) -> &'a str {
        let mut rest = line;
        loop {
            if self.depth > 0 {
                match self.close_args(rest) {
                    Some(after) => rest = after.trim_start(),
                    None => return "",
                }
                continue;
            }
            let Some(after_at) = rest.strip_prefix('@') else {
                return rest;
            };
            let name_end = after_at
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
                .unwrap_or(after_at.len());
            rest = after_at[name_end..].trim_start();
            if let Some(args) = rest.strip_prefix('(') {
                self.depth = 1;
                rest = args;
            }
        }
    }

    /// Text after the `)` that balances the argument list, or `None` if the
    /// line ends first.
    fn close_args<'a>(&mut self, s: &'a str) -> Option<&'a str> {
        for (i, ch) in s.char_indices() {
            if self.in_str {
                match (self.escaped, ch) {
                    (true, _) => self.escaped = false,
                    (false, '\\') => self.escaped = true,
                    (false, '"') => self.in_str = false,
                    _ => {}
                }
                continue;
            }
            match ch {
                '"' => self.in_str = true,
                '(' => self.depth += 1,
                ')' => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Some(&s[i + 1..]);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
