//! Pranata Mangsa period models
//!
//! A period ("mangsa") is one of twelve named seasons of the traditional
//! Javanese farming calendar. Each one owns a recurring annual date window.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Indonesian month names, January first
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A calendar position independent of the year.
///
/// Ordering is month first, then day, so `MonthDay` values compare the same
/// way the dates they stand for do inside a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Check the pair names a real day in a leap year
    pub fn is_valid(&self) -> bool {
        NaiveDate::from_ymd_opt(2024, self.month, self.day).is_some()
    }

    /// Every month/day pair of a leap year, 1 January to 31 December
    pub fn all_days() -> impl Iterator<Item = MonthDay> {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .into_iter()
            .flat_map(|start| start.iter_days())
            .take_while(|day| day.year() == 2024)
            .map(MonthDay::from_date)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.month_name())
    }
}

/// Recurring annual window, both ends inclusive.
///
/// A window whose start comes after its end wraps the year boundary
/// (22 December - 2 February).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl SeasonWindow {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: MonthDay) -> bool {
        if self.wraps_year() {
            day >= self.start || day <= self.end
        } else {
            self.start <= day && day <= self.end
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(MonthDay::from_date(date))
    }

    /// Human label such as "22 Juni - 1 Agustus"
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Observable natural sign of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub name: &'static str,
    pub description: &'static str,
}

/// Crop suggestion for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crop {
    pub name: &'static str,
    pub description: &'static str,
}

/// One of the twelve mangsa. Instances live in the static calendar table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    /// Position in the annual cycle, 1-12
    pub id: u8,
    /// Roman numeral form of `id`
    pub numeral: &'static str,
    /// Short name, e.g. "Kasa"
    pub name: &'static str,
    /// Display name, e.g. "Mangsa Kasa"
    pub display_name: &'static str,
    pub window: SeasonWindow,
    pub description: &'static str,
    pub indicators: &'static [Indicator],
    pub suitable_crops: &'static [Crop],
    pub farming_status: &'static str,
    pub main_activity: &'static str,
    pub tips: &'static [&'static str],
}

impl Period {
    pub fn has_season(&self, kind: SeasonKind) -> bool {
        kind.matches(self.description)
    }
}

/// Broad weather character of a period, derived from its description.
/// A description mentioning both rain and drought belongs to both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonKind {
    Rainy,
    Dry,
    Transitional,
}

const RAINY_KEYWORDS: [&str; 2] = ["hujan", "basah"];
const DRY_KEYWORDS: [&str; 2] = ["kering", "kemarau"];

impl SeasonKind {
    /// Keyword test against a period description. Transitional means
    /// neither rainy nor dry keywords appear.
    pub fn matches(&self, description: &str) -> bool {
        let text = description.to_lowercase();
        let any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));
        match self {
            SeasonKind::Rainy => any(&RAINY_KEYWORDS),
            SeasonKind::Dry => any(&DRY_KEYWORDS),
            SeasonKind::Transitional => !any(&RAINY_KEYWORDS) && !any(&DRY_KEYWORDS),
        }
    }
}

impl std::str::FromStr for SeasonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rainy" | "hujan" => Ok(SeasonKind::Rainy),
            "dry" | "kering" => Ok(SeasonKind::Dry),
            "transitional" | "normal" => Ok(SeasonKind::Transitional),
            other => Err(format!("unknown season kind: {}", other)),
        }
    }
}

/// Name/description pair in owned form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDescription {
    pub name: String,
    pub description: String,
}

/// Owned, wire-friendly view of a period as the dashboard consumes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangsaInfo {
    pub id: u8,
    pub number: String,
    pub name: String,
    pub period: String,
    pub window: SeasonWindow,
    pub characteristics: String,
    pub indicators: Vec<NamedDescription>,
    pub suitable_crops: Vec<NamedDescription>,
    pub farming_status: String,
    pub main_activity: String,
    pub farming_tips: Vec<String>,
}

impl From<&Period> for MangsaInfo {
    fn from(p: &Period) -> Self {
        MangsaInfo {
            id: p.id,
            number: p.numeral.to_string(),
            name: p.display_name.to_string(),
            period: p.window.label(),
            window: p.window,
            characteristics: p.description.to_string(),
            indicators: p
                .indicators
                .iter()
                .map(|i| NamedDescription {
                    name: i.name.to_string(),
                    description: i.description.to_string(),
                })
                .collect(),
            suitable_crops: p
                .suitable_crops
                .iter()
                .map(|c| NamedDescription {
                    name: c.name.to_string(),
                    description: c.description.to_string(),
                })
                .collect(),
            farming_status: p.farming_status.to_string(),
            main_activity: p.main_activity.to_string(),
            farming_tips: p.tips.iter().map(|t| t.to_string()).collect(),
        }
    }
}
