//! Entrant, Region, EntrantStatus and the Swiss record bracket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an entrant, as supplied by the roster file (e.g. "gen", "blg").
pub type EntrantId = String;

/// Wins needed to qualify from the Swiss stage.
pub const WINS_TO_QUALIFY: u32 = 3;
/// Losses that eliminate an entrant from the Swiss stage.
pub const LOSSES_TO_ELIMINATE: u32 = 3;

/// Competitive region. Declared strongest first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Lck,
    Lpl,
    Lcp,
    Lec,
    Lcs,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Lck, Region::Lpl, Region::Lcp, Region::Lec, Region::Lcs];

    /// Fixed strength used by the region-weighted outcome model.
    pub fn strength(self) -> u32 {
        match self {
            Region::Lck => 100,
            Region::Lpl => 90,
            Region::Lcp => 70,
            Region::Lec => 60,
            Region::Lcs => 50,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Lck => "LCK",
            Region::Lpl => "LPL",
            Region::Lcp => "LCP",
            Region::Lec => "LEC",
            Region::Lcs => "LCS",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown region \"{}\"", s))
    }
}

/// Swiss progression of an entrant. Always derived from (wins, losses).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrantStatus {
    #[default]
    Active,
    Qualified,
    Eliminated,
}

impl EntrantStatus {
    pub fn from_record(wins: u32, losses: u32) -> Self {
        if wins >= WINS_TO_QUALIFY {
            EntrantStatus::Qualified
        } else if losses >= LOSSES_TO_ELIMINATE {
            EntrantStatus::Eliminated
        } else {
            EntrantStatus::Active
        }
    }
}

/// A (wins, losses) pair, rendered and serialized as "2-1".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordBracket {
    pub wins: u32,
    pub losses: u32,
}

impl RecordBracket {
    pub const OPENING: RecordBracket = RecordBracket { wins: 0, losses: 0 };

    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }
}

impl fmt::Display for RecordBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

impl FromStr for RecordBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, l) = s
            .split_once('-')
            .ok_or_else(|| format!("record \"{}\" is not in wins-losses form", s))?;
        let wins = w.trim().parse().map_err(|_| format!("bad wins in record \"{}\"", s))?;
        let losses = l.trim().parse().map_err(|_| format!("bad losses in record \"{}\"", s))?;
        Ok(Self { wins, losses })
    }
}

impl From<RecordBracket> for String {
    fn from(r: RecordBracket) -> Self {
        r.to_string()
    }
}

impl TryFrom<String> for RecordBracket {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A tournament entrant (team).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    pub region: Region,
    /// Swiss wins (0-3).
    pub wins: u32,
    /// Swiss losses (0-3).
    pub losses: u32,
    pub status: EntrantStatus,
}

impl Entrant {
    /// Create an entrant with a 0-0 record.
    pub fn new(id: impl Into<EntrantId>, name: impl Into<String>, region: Region) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region,
            wins: 0,
            losses: 0,
            status: EntrantStatus::Active,
        }
    }

    pub fn record(&self) -> RecordBracket {
        RecordBracket::new(self.wins, self.losses)
    }

    pub fn is_active(&self) -> bool {
        self.status == EntrantStatus::Active
    }

    pub fn is_qualified(&self) -> bool {
        self.status == EntrantStatus::Qualified
    }

    /// Copy of this entrant with one more win or loss; status follows the new record.
    pub fn with_result(&self, won: bool) -> Self {
        let (wins, losses) = if won {
            (self.wins + 1, self.losses)
        } else {
            (self.wins, self.losses + 1)
        };
        Self {
            wins,
            losses,
            status: EntrantStatus::from_record(wins, losses),
            ..self.clone()
        }
    }

    /// Copy of this entrant back at 0-0.
    pub fn reset(&self) -> Self {
        Self::new(self.id.clone(), self.name.clone(), self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_record() {
        let e = Entrant::new("a", "Alpha", Region::Lck);
        let e = e.with_result(true).with_result(true).with_result(false);
        assert_eq!(e.record(), RecordBracket::new(2, 1));
        assert_eq!(e.status, EntrantStatus::Active);
        let e = e.with_result(true);
        assert_eq!(e.status, EntrantStatus::Qualified);

        let f = Entrant::new("b", "Bravo", Region::Lcs)
            .with_result(false)
            .with_result(false)
            .with_result(false);
        assert_eq!(f.status, EntrantStatus::Eliminated);
    }

    #[test]
    fn record_label_parses_back() {
        let r: RecordBracket = "2-1".parse().unwrap();
        assert_eq!(r, RecordBracket::new(2, 1));
        assert_eq!(r.to_string(), "2-1");
        assert!("21".parse::<RecordBracket>().is_err());
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"2-1\"");
    }

    #[test]
    fn region_parsing_is_case_insensitive() {
        assert_eq!("lck".parse::<Region>().unwrap(), Region::Lck);
        assert_eq!(" LEC ".parse::<Region>().unwrap(), Region::Lec);
        assert!("LJL".parse::<Region>().is_err());
    }
}
