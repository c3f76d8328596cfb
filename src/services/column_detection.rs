//! Header-row detection and column mapping for helpdesk CSV exports.
//!
//! Header detection runs a fixed chain of strategies over the first
//! [`HEADER_SCAN_LIMIT`] non-empty lines: exact canonical labels first, then
//! keyword matching. When neither finds a header the first line is used and
//! the result is flagged as [`HeaderDetection::FirstLine`].
//!
//! Column mapping follows the same order: exact labels, then the keyword
//! rules in [`KEYWORD_RULES`], first matching column wins.

use serde::Serialize;

use crate::services::csv_fields::parse_csv_line;

pub const TEAMMATE_LABEL: &str = "Teammate";
pub const CLOSED_CONVERSATIONS_LABEL: &str = "Closed conversations by teammates";
pub const CSAT_LABEL: &str = "Teammate CSAT score";

pub const HEADER_SCAN_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnField {
    Name,
    ClosedConversations,
    Csat,
}

impl ColumnField {
    pub const ALL: [ColumnField; 3] = [
        ColumnField::Name,
        ColumnField::ClosedConversations,
        ColumnField::Csat,
    ];

    pub fn canonical_label(self) -> &'static str {
        match self {
            ColumnField::Name => TEAMMATE_LABEL,
            ColumnField::ClosedConversations => CLOSED_CONVERSATIONS_LABEL,
            ColumnField::Csat => CSAT_LABEL,
        }
    }
}

impl std::fmt::Display for ColumnField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnField::Name => "name",
            ColumnField::ClosedConversations => "closed conversations",
            ColumnField::Csat => "CSAT",
        };
        f.write_str(name)
    }
}

/// A keyword predicate over a lower-cased header cell.
///
/// The cell matches when it contains one of `any_of`, one of `and_any_of`
/// (ignored when empty) and none of `none_of`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub field: ColumnField,
    pub any_of: &'static [&'static str],
    pub and_any_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
    /// Whether a match counts towards recognising a header row.
    pub header_signal: bool,
}

impl KeywordRule {
    pub fn matches(&self, cell: &str) -> bool {
        let lower = cell.to_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|word| lower.contains(word));
        contains_any(self.any_of)
            && (self.and_any_of.is_empty() || contains_any(self.and_any_of))
            && !contains_any(self.none_of)
    }
}

/// Rules in priority order. The last chats rule is only a mapping fallback.
pub const KEYWORD_RULES: [KeywordRule; 4] = [
    KeywordRule {
        field: ColumnField::Name,
        any_of: &["name", "teammate", "agent"],
        and_any_of: &[],
        none_of: &["comparison", "performance"],
        header_signal: true,
    },
    KeywordRule {
        field: ColumnField::ClosedConversations,
        any_of: &["closed"],
        and_any_of: &["chat", "conversation"],
        none_of: &[],
        header_signal: true,
    },
    KeywordRule {
        field: ColumnField::Csat,
        any_of: &["csat", "satisfaction"],
        and_any_of: &[],
        none_of: &[],
        header_signal: true,
    },
    KeywordRule {
        field: ColumnField::ClosedConversations,
        any_of: &["chat", "conversation"],
        and_any_of: &[],
        none_of: &[],
        header_signal: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderDetection {
    ExactLabels,
    Keywords,
    /// No strategy matched; the first line was assumed to be the header.
    FirstLine,
}

pub trait HeaderStrategy {
    fn detection(&self) -> HeaderDetection;
    fn is_header(&self, fields: &[String]) -> bool;
}

/// Requires all three canonical labels, compared after trimming.
pub struct ExactLabelStrategy;

impl HeaderStrategy for ExactLabelStrategy {
    fn detection(&self) -> HeaderDetection {
        HeaderDetection::ExactLabels
    }

    fn is_header(&self, fields: &[String]) -> bool {
        ColumnField::ALL
            .iter()
            .all(|field| find_exact_column(fields, field.canonical_label()).is_some())
    }
}

/// Requires more than two fields, at least two of which look like column names.
pub struct KeywordStrategy;

impl HeaderStrategy for KeywordStrategy {
    fn detection(&self) -> HeaderDetection {
        HeaderDetection::Keywords
    }

    fn is_header(&self, fields: &[String]) -> bool {
        if fields.len() <= 2 {
            return false;
        }
        let header_like = fields
            .iter()
            .filter(|cell| {
                KEYWORD_RULES
                    .iter()
                    .filter(|rule| rule.header_signal)
                    .any(|rule| rule.matches(cell))
            })
            .count();
        header_like >= 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMatch {
    /// Position within the slice of candidate lines.
    pub index: usize,
    pub fields: Vec<String>,
    pub detection: HeaderDetection,
}

/// Locates the header among `lines`, which must already exclude blank lines.
///
/// Returns `None` only when there are no lines at all.
pub fn detect_header(lines: &[&str]) -> Option<HeaderMatch> {
    let strategies: [&dyn HeaderStrategy; 2] = [&ExactLabelStrategy, &KeywordStrategy];
    let window: Vec<Vec<String>> = lines
        .iter()
        .take(HEADER_SCAN_LIMIT)
        .map(|line| parse_csv_line(line))
        .collect();

    for strategy in strategies {
        if let Some(index) = window.iter().position(|fields| strategy.is_header(fields)) {
            return Some(HeaderMatch {
                index,
                fields: window[index].clone(),
                detection: strategy.detection(),
            });
        }
    }

    window.into_iter().next().map(|fields| HeaderMatch {
        index: 0,
        fields,
        detection: HeaderDetection::FirstLine,
    })
}

/// Column indices for the three fields the calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub name: usize,
    pub closed_conversations: usize,
    pub csat: usize,
}

impl ColumnMapping {
    pub fn required_width(&self) -> usize {
        self.name.max(self.closed_conversations).max(self.csat) + 1
    }
}

/// Best-guess indices; `None` where nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialMapping {
    pub name: Option<usize>,
    pub closed_conversations: Option<usize>,
    pub csat: Option<usize>,
}

impl PartialMapping {
    pub fn get(&self, field: ColumnField) -> Option<usize> {
        match field {
            ColumnField::Name => self.name,
            ColumnField::ClosedConversations => self.closed_conversations,
            ColumnField::Csat => self.csat,
        }
    }

    pub fn set(&mut self, field: ColumnField, index: usize) {
        match field {
            ColumnField::Name => self.name = Some(index),
            ColumnField::ClosedConversations => self.closed_conversations = Some(index),
            ColumnField::Csat => self.csat = Some(index),
        }
    }

    pub fn claims(&self, index: usize) -> bool {
        ColumnField::ALL
            .iter()
            .any(|field| self.get(*field) == Some(index))
    }

    /// Returns the complete mapping, or the first field still unresolved.
    pub fn complete(&self) -> Result<ColumnMapping, ColumnField> {
        Ok(ColumnMapping {
            name: self.name.ok_or(ColumnField::Name)?,
            closed_conversations: self
                .closed_conversations
                .ok_or(ColumnField::ClosedConversations)?,
            csat: self.csat.ok_or(ColumnField::Csat)?,
        })
    }
}

pub fn find_exact_column(header: &[String], label: &str) -> Option<usize> {
    header.iter().position(|cell| cell.trim() == label)
}

/// Exact canonical labels only.
pub fn map_exact_columns(header: &[String]) -> PartialMapping {
    let mut mapping = PartialMapping::default();
    for field in ColumnField::ALL {
        if let Some(index) = find_exact_column(header, field.canonical_label()) {
            mapping.set(field, index);
        }
    }
    mapping
}

/// Exact labels first, then keyword rules for whatever is still missing.
///
/// A column already taken by another field is never assigned twice.
pub fn map_columns_heuristically(header: &[String]) -> PartialMapping {
    let mut mapping = map_exact_columns(header);
    for rule in KEYWORD_RULES.iter() {
        if mapping.get(rule.field).is_some() {
            continue;
        }
        let found = header
            .iter()
            .enumerate()
            .position(|(index, cell)| !mapping.claims(index) && rule.matches(cell));
        if let Some(index) = found {
            mapping.set(rule.field, index);
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    const INTERCOM_HEADER: &str = "Teammate,Teammate ID,Closed conversations by teammates,Replies sent,Teammate CSAT score";

    #[test]
    fn exact_strategy_finds_header_after_metadata() {
        let lines = [
            "Comparison of Teammate performance",
            "Date range,Jan 1 - Jan 31",
            INTERCOM_HEADER,
            "Alice,1,640,900,92.0%",
        ];
        let header = detect_header(&lines).unwrap();
        assert_eq!(header.index, 2);
        assert_eq!(header.detection, HeaderDetection::ExactLabels);
        assert_eq!(header.fields[0], "Teammate");
    }

    #[test]
    fn exact_strategy_is_case_sensitive() {
        assert!(!ExactLabelStrategy.is_header(&fields(&[
            "teammate",
            "Closed conversations by teammates",
            "Teammate CSAT score",
        ])));
        assert!(ExactLabelStrategy.is_header(&fields(&[
            " Teammate ",
            "Closed conversations by teammates",
            "Teammate CSAT score",
        ])));
    }

    #[test]
    fn keyword_strategy_needs_two_header_like_fields_and_three_columns() {
        assert!(KeywordStrategy.is_header(&fields(&["Agent name", "Closed chats", "Region"])));
        assert!(!KeywordStrategy.is_header(&fields(&["Agent name", "Closed chats"])));
        assert!(!KeywordStrategy.is_header(&fields(&[
            "Comparison of Teammate performance",
            "Closed chats",
            "Region",
        ])));
    }

    #[test]
    fn keyword_strategy_is_used_when_no_exact_header() {
        let lines = ["Monthly report", "Agent,Closed chats,CSAT %", "Bob,700,91%"];
        let header = detect_header(&lines).unwrap();
        assert_eq!(header.index, 1);
        assert_eq!(header.detection, HeaderDetection::Keywords);
    }

    #[test]
    fn falls_back_to_first_line() {
        let lines = ["a,b,c", "1,2,3"];
        let header = detect_header(&lines).unwrap();
        assert_eq!(header.index, 0);
        assert_eq!(header.detection, HeaderDetection::FirstLine);
        assert_eq!(detect_header(&[]), None);
    }

    #[test]
    fn header_beyond_scan_window_is_not_found() {
        let mut lines = vec!["metadata"; HEADER_SCAN_LIMIT];
        lines.push(INTERCOM_HEADER);
        let header = detect_header(&lines).unwrap();
        assert_eq!(header.detection, HeaderDetection::FirstLine);
    }

    #[test]
    fn exact_mapping_reports_missing_field() {
        let header = fields(&["Teammate", "Closed conversations by teammates", "CSAT"]);
        let mapping = map_exact_columns(&header);
        assert_eq!(mapping.complete(), Err(ColumnField::Csat));
    }

    #[test]
    fn heuristic_mapping_prefers_exact_then_first_keyword_match() {
        let header = fields(&[
            "Teammate",
            "Conversations assigned",
            "Closed conversations",
            "Customer satisfaction",
            "CSAT trend",
        ]);
        let mapping = map_columns_heuristically(&header).complete().unwrap();
        assert_eq!(
            mapping,
            ColumnMapping {
                name: 0,
                closed_conversations: 2,
                csat: 3,
            }
        );
        assert_eq!(mapping.required_width(), 4);
    }

    #[test]
    fn heuristic_mapping_falls_back_to_any_conversation_column() {
        let header = fields(&["Agent", "Chats", "Satisfaction"]);
        let mapping = map_columns_heuristically(&header);
        assert_eq!(mapping.closed_conversations, Some(1));
    }

    #[test]
    fn heuristic_mapping_never_reuses_a_column() {
        let header = fields(&["Teammate CSAT score", "Agent", "Closed chats"]);
        let mapping = map_columns_heuristically(&header).complete().unwrap();
        assert_eq!(
            mapping,
            ColumnMapping {
                name: 1,
                closed_conversations: 2,
                csat: 0,
            }
        );
    }

    #[test]
    fn heuristic_mapping_skips_title_like_name_columns() {
        let header = fields(&["Teammate performance", "Agent name", "Closed chats"]);
        let mapping = map_columns_heuristically(&header);
        assert_eq!(mapping.name, Some(1));
        assert_eq!(mapping.csat, None);
    }
}
