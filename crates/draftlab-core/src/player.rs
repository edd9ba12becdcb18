// Player data model: positions, the closed metric set, and scored records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel team code for players without a team.
pub const FREE_AGENT: &str = "FA";

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Coarse player role used as the grouping key for scoring and leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "G")]
    Guard,
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// All positions in display order.
    pub const ALL: [Position; 3] = [Position::Guard, Position::Forward, Position::Center];

    /// Parse a CSV position code. Only the exact codes `G`, `F` and `C`
    /// are recognized; anything else (including lowercase) is rejected.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "G" => Some(Position::Guard),
            "F" => Some(Position::Forward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    /// Return the single-letter code for this position.
    pub fn code(&self) -> &'static str {
        match self {
            Position::Guard => "G",
            Position::Forward => "F",
            Position::Center => "C",
        }
    }

    /// Return the full display name for this position.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Guard => "Guard",
            Position::Forward => "Forward",
            Position::Center => "Center",
        }
    }

    /// Index into `Position::ALL`.
    pub fn index(&self) -> usize {
        match self {
            Position::Guard => 0,
            Position::Forward => 1,
            Position::Center => 2,
        }
    }

    /// The next position in display order, wrapping around.
    pub fn next(&self) -> Self {
        Position::ALL[(self.index() + 1) % Position::ALL.len()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// MetricKey
// ---------------------------------------------------------------------------

/// The closed set of statistics a formula can weight.
///
/// `Availability` is a pseudo-metric read from `PlayerRecord::availability`
/// rather than from `Metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Pts,
    Trb,
    Ast,
    Ws,
    Bpm,
    Vorp,
    Stl,
    Blk,
    Tov,
    FgPercent,
    FreeThrowPercent,
    ThreePointPercent,
    Availability,
}

impl MetricKey {
    pub const ALL: [MetricKey; 13] = [
        MetricKey::Pts,
        MetricKey::Trb,
        MetricKey::Ast,
        MetricKey::Ws,
        MetricKey::Bpm,
        MetricKey::Vorp,
        MetricKey::Stl,
        MetricKey::Blk,
        MetricKey::Tov,
        MetricKey::FgPercent,
        MetricKey::FreeThrowPercent,
        MetricKey::ThreePointPercent,
        MetricKey::Availability,
    ];

    /// Human-readable label shown next to the weight slider.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Pts => "PTS",
            MetricKey::Trb => "TRB",
            MetricKey::Ast => "AST",
            MetricKey::Ws => "Win Shares",
            MetricKey::Bpm => "BPM",
            MetricKey::Vorp => "VORP",
            MetricKey::Stl => "STL",
            MetricKey::Blk => "BLK",
            MetricKey::Tov => "TOV (penalty)",
            MetricKey::FgPercent => "FG%",
            MetricKey::FreeThrowPercent => "FT%",
            MetricKey::ThreePointPercent => "3P%",
            MetricKey::Availability => "Availability",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Metrics / PlayerRecord
// ---------------------------------------------------------------------------

/// Raw per-player statistics. Missing values are stored as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub pts: f64,
    pub trb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fg_percent: f64,
    pub free_throw_percent: f64,
    pub three_point_percent: f64,
    pub ws: f64,
    pub bpm: f64,
    pub vorp: f64,
}

/// One draftable player, created at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub draft_pick: u32,
    pub position: Position,
    pub availability: f64,
    pub metrics: Metrics,
}

impl PlayerRecord {
    /// Read the raw value of a metric for this player.
    pub fn metric_value(&self, key: MetricKey) -> f64 {
        let m = &self.metrics;
        match key {
            MetricKey::Pts => m.pts,
            MetricKey::Trb => m.trb,
            MetricKey::Ast => m.ast,
            MetricKey::Ws => m.ws,
            MetricKey::Bpm => m.bpm,
            MetricKey::Vorp => m.vorp,
            MetricKey::Stl => m.stl,
            MetricKey::Blk => m.blk,
            MetricKey::Tov => m.tov,
            MetricKey::FgPercent => m.fg_percent,
            MetricKey::FreeThrowPercent => m.free_throw_percent,
            MetricKey::ThreePointPercent => m.three_point_percent,
            MetricKey::Availability => self.availability,
        }
    }
}

/// A player with a derived formula score.
///
/// `rank` is only populated for rows read from a precomputed leaderboard;
/// freshly scored players carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub player: PlayerRecord,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> PlayerRecord {
        PlayerRecord {
            name: "Test Guard".into(),
            team: "BOS".into(),
            draft_pick: 4,
            position: Position::Guard,
            availability: 0.75,
            metrics: Metrics {
                pts: 21.5,
                trb: 4.0,
                ast: 7.2,
                tov: 3.1,
                ws: 5.5,
                ..Metrics::default()
            },
        }
    }

    #[test]
    fn position_codes_are_case_sensitive() {
        assert_eq!(Position::from_code("G"), Some(Position::Guard));
        assert_eq!(Position::from_code("F"), Some(Position::Forward));
        assert_eq!(Position::from_code("C"), Some(Position::Center));
        assert_eq!(Position::from_code("g"), None);
        assert_eq!(Position::from_code("SF"), None);
        assert_eq!(Position::from_code(""), None);
    }

    #[test]
    fn position_code_roundtrip() {
        for pos in Position::ALL {
            assert_eq!(Position::from_code(pos.code()), Some(pos));
        }
    }

    #[test]
    fn position_next_wraps() {
        assert_eq!(Position::Guard.next(), Position::Forward);
        assert_eq!(Position::Forward.next(), Position::Center);
        assert_eq!(Position::Center.next(), Position::Guard);
    }

    #[test]
    fn metric_value_reads_fields() {
        let p = sample_player();
        assert!((p.metric_value(MetricKey::Pts) - 21.5).abs() < f64::EPSILON);
        assert!((p.metric_value(MetricKey::Ast) - 7.2).abs() < f64::EPSILON);
        assert!((p.metric_value(MetricKey::Ws) - 5.5).abs() < f64::EPSILON);
        assert_eq!(p.metric_value(MetricKey::Blk), 0.0);
    }

    #[test]
    fn availability_is_read_from_record() {
        let p = sample_player();
        assert!((p.metric_value(MetricKey::Availability) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn metric_keys_deserialize_from_snake_case() {
        assert_eq!(parse_key("\"free_throw_percent\""), MetricKey::FreeThrowPercent);
        assert_eq!(parse_key("\"availability\""), MetricKey::Availability);
    }

    fn parse_key(quoted: &str) -> MetricKey {
        #[derive(Deserialize)]
        struct Wrapper {
            key: MetricKey,
        }
        let w: Wrapper = toml::from_str(&format!("key = {quoted}")).unwrap();
        w.key
    }

    #[test]
    fn unknown_metric_key_rejected() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            key: MetricKey,
        }
        let parsed: Result<Wrapper, _> = toml::from_str("key = \"dunks\"");
        assert!(parsed.is_err());
    }
}
