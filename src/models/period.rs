use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    All,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
            Self::ThisYear => "thisYear",
            Self::LastYear => "lastYear",
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "thismonth" | "this-month" => Some(Self::ThisMonth),
            "lastmonth" | "last-month" => Some(Self::LastMonth),
            "thisyear" | "this-year" => Some(Self::ThisYear),
            "lastyear" | "last-year" => Some(Self::LastYear),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn all_kinds() -> &'static [PeriodKind] {
        &[
            Self::ThisMonth,
            Self::LastMonth,
            Self::ThisYear,
            Self::LastYear,
            Self::All,
        ]
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named calendar window. Both endpoints are inclusive whole days, so
/// "through end-of-day" falls out of date-only comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn resolve(kind: PeriodKind, today: NaiveDate) -> Self {
        let year = today.year();
        let month = today.month();
        match kind {
            PeriodKind::ThisMonth => Self {
                start: month_start(year, month),
                end: month_end(year, month),
            },
            PeriodKind::LastMonth => {
                let (py, pm) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
                Self {
                    start: month_start(py, pm),
                    end: month_end(py, pm),
                }
            }
            PeriodKind::ThisYear => Self {
                start: month_start(year, 1),
                end: month_end(year, 12),
            },
            PeriodKind::LastYear => Self {
                start: month_start(year - 1, 1),
                end: month_end(year - 1, 12),
            },
            PeriodKind::All => Self {
                start: NaiveDate::MIN,
                end: NaiveDate::MAX,
            },
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

pub(crate) fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn month_end(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
