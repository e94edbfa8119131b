use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// How much of a date value is meaningful. Ordered from coarsest to
/// finest; comparisons between two dates happen at `min(a.precision,
/// b.precision)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum DatePrecision {
    BillionYears = 0,
    HundredMillionYears = 1,
    TenMillionYears = 2,
    MillionYears = 3,
    HundredThousandYears = 4,
    TenThousandYears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl DatePrecision {
    /// Index into the ordered attribute list used by the date comparator
    /// (§4.5.4): year, month, day, hour, minute, second. Precisions finer
    /// than year share the year's index since sub-year precision is all
    /// this model resolves to after `PrecisionDate::parse`.
    pub fn attribute_index(self) -> u8 {
        match self {
            DatePrecision::Year
            | DatePrecision::Decade
            | DatePrecision::Century
            | DatePrecision::Millennium
            | DatePrecision::TenThousandYears
            | DatePrecision::HundredThousandYears
            | DatePrecision::MillionYears
            | DatePrecision::TenMillionYears
            | DatePrecision::HundredMillionYears
            | DatePrecision::BillionYears => 0,
            DatePrecision::Month => 1,
            DatePrecision::Day => 2,
            DatePrecision::Hour => 3,
            DatePrecision::Minute => 4,
            DatePrecision::Second => 5,
        }
    }

    /// Maps a `wikibase:timePrecision` code (0-14, coarsest to finest) to
    /// its `DatePrecision` variant.
    pub fn from_wikidata_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::BillionYears),
            1 => Some(Self::HundredMillionYears),
            2 => Some(Self::TenMillionYears),
            3 => Some(Self::MillionYears),
            4 => Some(Self::HundredThousandYears),
            5 => Some(Self::TenThousandYears),
            6 => Some(Self::Millennium),
            7 => Some(Self::Century),
            8 => Some(Self::Decade),
            9 => Some(Self::Year),
            10 => Some(Self::Month),
            11 => Some(Self::Day),
            12 => Some(Self::Hour),
            13 => Some(Self::Minute),
            14 => Some(Self::Second),
            _ => None,
        }
    }
}

/// A date paired with how much of it is trustworthy. Precisions coarser
/// than `Year` still carry a `year` value (the nearest representable
/// year) so that comparisons degrade gracefully rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionDate {
    pub precision: DatePrecision,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl PrecisionDate {
    pub fn new_year(year: i32) -> Self {
        Self {
            precision: DatePrecision::Year,
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Parses a Wikidata-style timestamp (`+1980-06-15T00:00:00Z`, sign
    /// optional) paired with its numeric `wikibase:timePrecision` code
    /// (§4.3). Sub-year precision collapses to `Year` since this model
    /// doesn't resolve finer than a nearest-year fallback for those.
    /// Returns `None` if the timestamp doesn't parse or its fields are
    /// out of range for the claimed precision.
    pub fn parse(raw: &str, wikidata_precision: u8) -> Option<Self> {
        let precision = DatePrecision::from_wikidata_code(wikidata_precision)?;
        let trimmed = raw.trim_start_matches(['+', '-']);
        let (date_part, time_part) = trimmed.split_once('T')?;

        let mut date_fields = date_part.splitn(3, '-');
        let year: i32 = date_fields.next()?.parse().ok()?;
        let month: u8 = date_fields.next().unwrap_or("1").parse().ok()?;
        let day: u8 = date_fields.next().unwrap_or("1").parse().ok()?;

        let time_part = time_part.trim_end_matches('Z');
        let mut time_fields = time_part.splitn(3, ':');
        let hour: u8 = time_fields.next().unwrap_or("0").parse().ok()?;
        let minute: u8 = time_fields.next().unwrap_or("0").parse().ok()?;
        let second: u8 = time_fields.next().unwrap_or("0").parse().ok()?;

        let date = Self {
            precision: if precision < DatePrecision::Year { DatePrecision::Year } else { precision },
            year,
            month: month.max(1),
            day: day.max(1),
            hour,
            minute,
            second,
        };
        date.is_valid().then_some(date)
    }

    /// Range-checks the fields this precision actually uses. Coarser
    /// precisions still carry a nominal month/day of 1, which always
    /// passes.
    pub fn is_valid(&self) -> bool {
        let days_in_month = match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return false,
        };
        (1..=12).contains(&self.month)
            && (1..=days_in_month).contains(&self.day)
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59
    }
}

/// Gender as observed on either side; kept as an opaque token rather than
/// a closed enum since catalogs vary in vocabulary.
pub type GenderToken = String;

/// A KB identifier-claim for one external-ID property: the raw ID plus
/// the URL synthesized via the formatter registry, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierClaim {
    pub property: String,
    pub value: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KbItem {
    pub qid: String,
    pub labels: Vec<String>,
    pub aliases: Vec<String>,
    pub descriptions: Vec<String>,
    pub sitelinks: Vec<String>,
    pub third_party_urls: Vec<String>,
    pub identifier_claims: Vec<IdentifierClaim>,
    pub gender: Option<GenderToken>,
    pub birth_date: Option<PrecisionDate>,
    pub death_date: Option<PrecisionDate>,
    pub birth_place: Vec<String>,
    pub death_place: Vec<String>,
    pub occupations: BTreeSet<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub tid: String,
    pub name: Vec<String>,
    pub birth_date: Option<PrecisionDate>,
    pub death_date: Option<PrecisionDate>,
    pub gender: Option<GenderToken>,
    pub birth_place: Vec<String>,
    pub death_place: Vec<String>,
    pub description: Option<String>,
    pub urls: Vec<String>,
    pub genres: Vec<String>,
    /// (related catalog id, relationship kind), e.g. work <-> person.
    pub relationships: Vec<(String, String)>,
}

/// A scored (QID, TID) candidate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub qid: String,
    pub tid: String,
    pub score: f32,
}

/// A single formatter rule: the URL template (with a `$1` placeholder for
/// the ID) and an optional ID-shape regex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterRule {
    pub url_template: String,
    pub id_regex: Option<String>,
}

/// Bidirectional mapping between external-ID catalog properties and URL
/// templates (§3, "Formatter registry"). The same property may carry
/// several URL templates (mirrors, legacy URL shapes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatterRegistry {
    pub rules: BTreeMap<String, Vec<FormatterRule>>,
}

impl FormatterRegistry {
    pub fn insert(&mut self, property: impl Into<String>, url_template: impl Into<String>, id_regex: Option<String>) {
        self.rules.entry(property.into()).or_default().push(FormatterRule {
            url_template: url_template.into(),
            id_regex,
        });
    }

    /// Synthesize a URL for `property`'s first registered template.
    pub fn format(&self, property: &str, id: &str) -> Option<String> {
        self.rules
            .get(property)
            .and_then(|rules| rules.first())
            .map(|rule| rule.url_template.replace("$1", id))
    }

    pub fn properties(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }
}

/// Semantic type of a schema column (§3.1), used to fold preprocessing and
/// feature selection over an explicit descriptor instead of dynamic
/// column introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    TextList,
    UrlList,
    Date,
    OccupationSet,
    GenreSet,
    Gender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
    pub required: bool,
}

/// Describes which columns a (catalog, entity) pair carries on each side
/// and which feature each pairing feeds. Replaces dynamic `dropna`-style
/// column introspection with an explicit per-entity descriptor (§3.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySchema {
    pub catalog: String,
    pub entity: String,
    pub kb_columns: Vec<ColumnDescriptor>,
    pub catalog_columns: Vec<ColumnDescriptor>,
}

impl EntitySchema {
    pub fn kb_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.kb_columns.iter().find(|c| c.name == name)
    }

    pub fn catalog_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.catalog_columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatter_registry_round_trips_id_through_url() {
        let mut reg = FormatterRegistry::default();
        reg.insert("P1953", "https://www.discogs.com/artist/$1", None);
        let url = reg.format("P1953", "264375").unwrap();
        assert_eq!(url, "https://www.discogs.com/artist/264375");
    }

    #[test]
    fn attribute_index_collapses_coarse_precisions_to_year() {
        assert_eq!(DatePrecision::Century.attribute_index(), 0);
        assert_eq!(DatePrecision::Year.attribute_index(), 0);
        assert_eq!(DatePrecision::Month.attribute_index(), 1);
        assert_eq!(DatePrecision::Second.attribute_index(), 5);
    }

    #[test]
    fn parse_accepts_day_precision_timestamp() {
        let date = PrecisionDate::parse("+1980-06-15T00:00:00Z", 11).unwrap();
        assert_eq!(date.precision, DatePrecision::Day);
        assert_eq!((date.year, date.month, date.day), (1980, 6, 15));
    }

    #[test]
    fn parse_collapses_century_precision_to_year() {
        let date = PrecisionDate::parse("+1900-01-01T00:00:00Z", 7).unwrap();
        assert_eq!(date.precision, DatePrecision::Year);
    }

    #[test]
    fn parse_rejects_out_of_range_month_and_day() {
        assert!(PrecisionDate::parse("+1980-13-01T00:00:00Z", 11).is_none());
        assert!(PrecisionDate::parse("+1980-02-30T00:00:00Z", 11).is_none());
    }

    #[test]
    fn parse_rejects_malformed_timestamp() {
        assert!(PrecisionDate::parse("not-a-date", 11).is_none());
    }
}
