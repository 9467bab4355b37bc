//! Metric column selection.
//!
//! The service returns only the fields whose bit is set in the `Cols` query
//! parameter. Bit values are fixed by the service and are not derived.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use clap::ValueEnum;
use strum_macros::EnumIter as EnumIterMacro;

/// One selectable metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, ValueEnum)]
pub enum Column {
    /// Page title (`ut`)
    Title,
    /// Canonical form of the URL (`uu`)
    CanonicalUrl,
    /// External equity links to the URL (`ueid`)
    ExternalEquityLinks,
    /// All links to the URL (`uid`)
    Links,
    /// MozRank of the URL, normalized and raw (`umrp`, `umrr`)
    MozRankForUrl,
    /// MozRank of the subdomain, normalized and raw (`fmrp`, `fmrr`)
    MozRankForSubdomain,
    /// HTTP status code recorded by the crawler (`us`)
    HttpStatusCode,
    /// Page Authority (`upa`)
    PageAuthority,
    /// Domain Authority (`pda`)
    DomainAuthority,
    /// Time of the last crawl, Unix epoch (`ulc`)
    TimeLastCrawled,
}

impl Column {
    /// The bit the service assigns to this column.
    pub const fn bit(self) -> u64 {
        match self {
            Column::Title => ColumnMask::TITLE.0,
            Column::CanonicalUrl => ColumnMask::CANONICAL_URL.0,
            Column::ExternalEquityLinks => ColumnMask::EXTERNAL_EQUITY_LINKS.0,
            Column::Links => ColumnMask::LINKS.0,
            Column::MozRankForUrl => ColumnMask::MOZRANK_FOR_URL.0,
            Column::MozRankForSubdomain => ColumnMask::MOZRANK_FOR_SUBDOMAIN.0,
            Column::HttpStatusCode => ColumnMask::HTTP_STATUS_CODE.0,
            Column::PageAuthority => ColumnMask::PAGE_AUTHORITY.0,
            Column::DomainAuthority => ColumnMask::DOMAIN_AUTHORITY.0,
            Column::TimeLastCrawled => ColumnMask::TIME_LAST_CRAWLED.0,
        }
    }
}

/// Bitmask of requested metric columns, sent as the `Cols` parameter.
///
/// Masks compose with `|`:
///
/// ```
/// use moz_metrics::ColumnMask;
///
/// let cols = ColumnMask::CANONICAL_URL | ColumnMask::DOMAIN_AUTHORITY;
/// assert_eq!(cols.bits(), 4 | 68_719_476_736);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnMask(u64);

impl ColumnMask {
    // https://moz.com/help/guides/moz-api/mozscape/api-reference/url-metrics
    /// Page title
    pub const TITLE: ColumnMask = ColumnMask(1);
    /// Canonical URL
    pub const CANONICAL_URL: ColumnMask = ColumnMask(4);
    /// External equity links
    pub const EXTERNAL_EQUITY_LINKS: ColumnMask = ColumnMask(32);
    /// Links
    pub const LINKS: ColumnMask = ColumnMask(2048);
    /// MozRank of the URL
    pub const MOZRANK_FOR_URL: ColumnMask = ColumnMask(16384);
    /// MozRank of the subdomain
    pub const MOZRANK_FOR_SUBDOMAIN: ColumnMask = ColumnMask(32768);
    /// HTTP status code
    pub const HTTP_STATUS_CODE: ColumnMask = ColumnMask(536_870_912);
    /// Page Authority
    pub const PAGE_AUTHORITY: ColumnMask = ColumnMask(34_359_738_368);
    /// Domain Authority
    pub const DOMAIN_AUTHORITY: ColumnMask = ColumnMask(68_719_476_736);
    /// Time last crawled
    pub const TIME_LAST_CRAWLED: ColumnMask = ColumnMask(144_115_188_075_855_872);

    /// A mask with no column selected.
    pub const fn empty() -> Self {
        ColumnMask(0)
    }

    /// Wraps a raw value. Unknown bits are passed through to the service untouched.
    pub const fn from_bits(bits: u64) -> Self {
        ColumnMask(bits)
    }

    /// Every column this crate knows about.
    pub fn all() -> Self {
        Self::from_columns(<Column as strum::IntoEnumIterator>::iter())
    }

    /// ORs together the bits of the given columns.
    pub fn from_columns<I: IntoIterator<Item = Column>>(columns: I) -> Self {
        columns
            .into_iter()
            .fold(ColumnMask::empty(), |mask, column| mask | column)
    }

    /// The raw value sent to the service.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: ColumnMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ColumnMask {
    type Output = ColumnMask;

    fn bitor(self, rhs: ColumnMask) -> ColumnMask {
        ColumnMask(self.0 | rhs.0)
    }
}

impl BitOr<Column> for ColumnMask {
    type Output = ColumnMask;

    fn bitor(self, rhs: Column) -> ColumnMask {
        ColumnMask(self.0 | rhs.bit())
    }
}

impl BitOrAssign for ColumnMask {
    fn bitor_assign(&mut self, rhs: ColumnMask) {
        self.0 |= rhs.0;
    }
}

impl From<Column> for ColumnMask {
    fn from(column: Column) -> Self {
        ColumnMask(column.bit())
    }
}

impl fmt::Display for ColumnMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
