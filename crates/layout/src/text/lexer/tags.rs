//! Tag syntax: `<bold>`, `</bold>`, `<italic>`, `</italic>`, `<br>`.
//!
//! Every rule tag name configured in the table is accepted alongside the
//! built-in `bold` and `italic`. Tags match ASCII case-insensitively. A `<`
//! that does not start a known tag is ordinary text.

use super::{RunBuilder, StyledRun};
use ficopdf_style::StyleRuleTable;

const BUILTIN_STYLE_TAGS: [&str; 2] = ["bold", "italic"];
const BREAK_TAGS: [&str; 3] = ["<br>", "<br/>", "<br />"];

#[derive(Debug, Clone, PartialEq)]
enum TagKind {
    Open(String),
    Close,
    Break,
}

/// The literal tags recognised for one rule table, longest first.
#[derive(Debug, Clone)]
pub(super) struct TagSet {
    literals: Vec<(String, TagKind)>,
}

impl TagSet {
    pub(super) fn new(rules: &StyleRuleTable) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for name in rules
            .rules()
            .iter()
            .map(|r| r.marker.as_str())
            .chain(BUILTIN_STYLE_TAGS)
        {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name);
            }
        }

        let mut literals: Vec<(String, TagKind)> = BREAK_TAGS
            .iter()
            .map(|t| (t.to_string(), TagKind::Break))
            .collect();
        for name in names {
            literals.push((format!("<{}>", name), TagKind::Open(name.to_string())));
            literals.push((format!("</{}>", name), TagKind::Close));
        }
        literals.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { literals }
    }

    fn match_at(&self, text: &str) -> Option<(&TagKind, usize)> {
        self.literals.iter().find_map(|(literal, kind)| {
            text.get(..literal.len())
                .filter(|head| head.eq_ignore_ascii_case(literal))
                .map(|_| (kind, literal.len()))
        })
    }
}

pub(super) fn lex(
    line: &str,
    rules: &StyleRuleTable,
    tags: &TagSet,
    mut runs: RunBuilder<'_>,
) -> Vec<StyledRun> {
    let mut rest = line;
    while let Some(ch) = rest.chars().next() {
        if ch == '<'
            && let Some((kind, len)) = tags.match_at(rest)
        {
            match kind {
                TagKind::Open(name) => runs.switch(rules.resolve_tag(name)),
                TagKind::Close => runs.revert(),
                TagKind::Break => runs.line_break(),
            }
            rest = &rest[len..];
            continue;
        }

        runs.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    runs.finish()
}
