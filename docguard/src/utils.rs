use ruff_text_size::TextSize;

/// A utility struct to convert byte offsets to line numbers.
///
/// The AST parser works with byte offsets, but symbol records carry line
/// numbers which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // Newlines are always single bytes in UTF-8
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Cleans a raw docstring the way Python's `inspect.cleandoc` does:
/// the first line is stripped, the common indentation of the remaining
/// lines is removed, and leading/trailing blank lines are dropped.
#[must_use]
pub fn clean_doc(raw: &str) -> String {
    let mut lines: Vec<String> = raw.lines().map(|l| l.replace('\t', "        ")).collect();
    if lines.is_empty() {
        return String::new();
    }

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let first = lines[0].trim_start().to_owned();
    lines[0] = first;
    for line in lines.iter_mut().skip(1) {
        if line.len() >= margin {
            *line = line[margin..].to_owned();
        } else {
            *line = line.trim_start().to_owned();
        }
    }

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Title-cases a section heading (`"see also"` -> `"See Also"`).
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins a dotted module path with a child segment.
#[must_use]
pub fn join_dotted(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}.{child}")
    }
}
