//! Delimiter-toggle syntax: `**bold**`, escaped as `\**`.

use super::{RunBuilder, StyledRun};
use ficopdf_style::StyleRuleTable;

const ESCAPE: char = '\\';

pub(super) fn lex(line: &str, rules: &StyleRuleTable, mut runs: RunBuilder<'_>) -> Vec<StyledRun> {
    let mut rest = line;
    while let Some(ch) = rest.chars().next() {
        if ch == ESCAPE
            && let Some(marker) = rules.match_marker(&rest[ESCAPE.len_utf8()..])
        {
            runs.push_str(marker);
            rest = &rest[ESCAPE.len_utf8() + marker.len()..];
            continue;
        }

        if let Some(marker) = rules.match_marker(rest) {
            runs.toggle(rules.resolve(marker));
            rest = &rest[marker.len()..];
            continue;
        }

        runs.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    runs.finish()
}
