//! Travel reason codes and their checkbox positions on the certificate.

use serde::{Deserialize, Serialize};

/// Position of a checkbox mark on the certificate page, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkPosition {
    pub x: f64,
    pub y: f64,
}

/// The closed set of travel reasons printed on the certificate.
///
/// "No reason selected" is represented as `Option::<Reason>::None` by
/// callers; it never appears as a variant here so that every variant owns
/// exactly one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    Work,
    Groceries,
    Health,
    Family,
    Sport,
    Notification,
    Mission,
}

impl Reason {
    pub const ALL: [Reason; 7] = [
        Reason::Work,
        Reason::Groceries,
        Reason::Health,
        Reason::Family,
        Reason::Sport,
        Reason::Notification,
        Reason::Mission,
    ];

    /// Parse a reason code from its wire form.
    ///
    /// Empty input means "no reason selected" and returns `None`. Codes
    /// outside the enumerated set also return `None` (no mark is drawn);
    /// they are logged so a misbehaving caller is visible, but they are
    /// not an error.
    pub fn parse(code: &str) -> Option<Reason> {
        match code {
            "work" => Some(Reason::Work),
            "groceries" => Some(Reason::Groceries),
            "health" => Some(Reason::Health),
            "family" => Some(Reason::Family),
            "sport" => Some(Reason::Sport),
            "notification" => Some(Reason::Notification),
            "mission" => Some(Reason::Mission),
            "" => None,
            other => {
                log::warn!("Unrecognized reason code '{}', generating without a mark", other);
                None
            }
        }
    }

    /// Wire form of the code, as stored under the `last-reason` key.
    pub fn code(&self) -> &'static str {
        match self {
            Reason::Work => "work",
            Reason::Groceries => "groceries",
            Reason::Health => "health",
            Reason::Family => "family",
            Reason::Sport => "sport",
            Reason::Notification => "notification",
            Reason::Mission => "mission",
        }
    }

    /// Where the "x" mark for this reason lands on the template page.
    ///
    /// Hand-tuned to the official single-page certificate asset; replacing
    /// the asset requires re-deriving this table.
    pub fn mark_position(&self) -> MarkPosition {
        match self {
            Reason::Work => MarkPosition { x: 503.0, y: 450.0 },
            Reason::Groceries => MarkPosition { x: 503.0, y: 416.0 },
            Reason::Health => MarkPosition { x: 503.0, y: 384.0 },
            Reason::Family => MarkPosition { x: 503.0, y: 350.0 },
            Reason::Sport => MarkPosition { x: 503.0, y: 314.0 },
            Reason::Notification => MarkPosition { x: 503.0, y: 276.0 },
            Reason::Mission => MarkPosition { x: 503.0, y: 243.0 },
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        for reason in Reason::ALL {
            assert_eq!(Reason::parse(reason.code()), Some(reason));
        }
    }

    #[test]
    fn test_parse_empty_is_no_reason() {
        assert_eq!(Reason::parse(""), None);
    }

    #[test]
    fn test_parse_unknown_is_no_reason() {
        assert_eq!(Reason::parse("holidays"), None);
        assert_eq!(Reason::parse("WORK"), None);
    }

    #[test]
    fn test_mark_positions_share_column() {
        for reason in Reason::ALL {
            assert_eq!(reason.mark_position().x, 503.0);
        }
    }

    #[test]
    fn test_mark_positions_are_distinct() {
        let mut ys: Vec<f64> = Reason::ALL.iter().map(|r| r.mark_position().y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ys.dedup();
        assert_eq!(ys.len(), Reason::ALL.len());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Reason::Groceries).unwrap();
        assert_eq!(json, "\"groceries\"");
        let back: Reason = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Reason::Groceries);
    }
}
