use serde::Serialize;

const BOLD_MARKER: &str = "**";

/// A run of response text, either plain or emphasized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum TextSegment {
    Plain(String),
    Bold(String),
}

/// Splits text on `**bold**` markers.
///
/// Markers pair up left to right with the shortest possible match, and a
/// pair never spans a line break. Everything else, including newlines and
/// unmatched markers, is kept as plain text.
pub fn split_bold(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut search_from = 0;

    while let Some(found) = text[search_from..].find(BOLD_MARKER) {
        let open = search_from + found;
        let inner_start = open + BOLD_MARKER.len();

        match text[inner_start..].find(BOLD_MARKER) {
            Some(len) if !text[inner_start..inner_start + len].contains('\n') => {
                push_plain(&mut segments, &text[plain_start..open]);
                segments.push(TextSegment::Bold(
                    text[inner_start..inner_start + len].to_string(),
                ));
                plain_start = inner_start + len + BOLD_MARKER.len();
                search_from = plain_start;
            }
            // no pair can start here; retry one byte later ('*' is ASCII)
            Some(_) => search_from = open + 1,
            None => break,
        }
    }

    push_plain(&mut segments, &text[plain_start..]);
    segments
}

fn push_plain(segments: &mut Vec<TextSegment>, text: &str) {
    if !text.is_empty() {
        segments.push(TextSegment::Plain(text.to_string()));
    }
}
