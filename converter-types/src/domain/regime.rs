//! Currency regimes and rate dynamics.
//!
//! The upstream source may re-key a currency (new identifier, new scale) at
//! some boundary date. Each assignment is a [`CurrencyRegime`]; a currency
//! code can have several over its history.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::domain::date::{DATE_LONG, parse_date};
use crate::dto::CurrencyDto;

/// Official rates keyed by timestamp, all at one scale.
pub type RateSeries = BTreeMap<NaiveDateTime, f64>;

/// A time-bounded identifier/scale assignment for a currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRegime {
    pub id: i64,
    pub abbreviation: String,
    pub scale: f64,
    pub date_start: NaiveDateTime,
    pub date_end: NaiveDateTime,
}

impl CurrencyRegime {
    /// Builds a regime from an upstream record.
    ///
    /// Returns `None` when the identifier is missing or either boundary
    /// does not parse; such records can never match a query window.
    pub fn from_dto(dto: &CurrencyDto) -> Option<Self> {
        let id = dto.cur_id?;
        let date_start = parse_date(dto.cur_date_start.as_deref()?, DATE_LONG)?;
        let date_end = parse_date(dto.cur_date_end.as_deref()?, DATE_LONG)?;
        Some(Self {
            id,
            abbreviation: dto.cur_abbreviation.clone().unwrap_or_default(),
            scale: dto.cur_scale.unwrap_or(1.0),
            date_start,
            date_end,
        })
    }

    fn contains(&self, moment: NaiveDateTime) -> bool {
        self.date_start <= moment && moment <= self.date_end
    }

    /// True when either boundary of `[start, end]` falls inside this regime.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.contains(start) || self.contains(end)
    }

    /// Intersection of `[start, end]` with this regime's validity interval.
    pub fn clamp(&self, start: NaiveDateTime, end: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        (start.max(self.date_start), end.min(self.date_end))
    }
}

/// Rate history of a currency normalized to a single scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDynamics {
    pub scale: f64,
    pub rates: RateSeries,
}

impl RateDynamics {
    pub fn new(scale: f64, rates: RateSeries) -> Self {
        Self { scale, rates }
    }

    /// `(1.0, {})`, returned for the base currency and alongside errors.
    pub fn empty() -> Self {
        Self::new(1.0, RateSeries::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Smallest and largest rate in the series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.rates.values().fold(None, |acc, &rate| match acc {
            None => Some((rate, rate)),
            Some((lo, hi)) => Some((lo.min(rate), hi.max(rate))),
        })
    }
}

impl Default for RateDynamics {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date::DATE_SHORT;

    fn day(s: &str) -> NaiveDateTime {
        parse_date(s, DATE_SHORT).unwrap()
    }

    fn dto(id: Option<i64>, start: &str, end: &str) -> CurrencyDto {
        CurrencyDto {
            cur_id: id,
            cur_abbreviation: Some("USD".into()),
            cur_scale: Some(10.0),
            cur_date_start: Some(start.into()),
            cur_date_end: Some(end.into()),
        }
    }

    #[test]
    fn test_from_dto() {
        let regime =
            CurrencyRegime::from_dto(&dto(Some(145), "2020-01-01T00:00:00", "2050-01-01T00:00:00"))
                .unwrap();
        assert_eq!(regime.id, 145);
        assert_eq!(regime.abbreviation, "USD");
        assert_eq!(regime.scale, 10.0);
        assert_eq!(regime.date_start, day("2020-01-01"));
    }

    #[test]
    fn test_from_dto_rejects_incomplete_records() {
        assert!(CurrencyRegime::from_dto(&dto(None, "2020-01-01T00:00:00", "2050-01-01T00:00:00")).is_none());
        assert!(CurrencyRegime::from_dto(&dto(Some(1), "garbage", "2050-01-01T00:00:00")).is_none());
    }

    #[test]
    fn test_overlap_uses_window_boundaries() {
        let regime =
            CurrencyRegime::from_dto(&dto(Some(1), "2022-02-10T00:00:00", "2022-03-01T00:00:00"))
                .unwrap();
        assert!(regime.overlaps(day("2022-02-01"), day("2022-02-14")));
        assert!(regime.overlaps(day("2022-02-20"), day("2022-04-01")));
        assert!(!regime.overlaps(day("2022-01-01"), day("2022-02-01")));
    }

    #[test]
    fn test_clamp() {
        let regime =
            CurrencyRegime::from_dto(&dto(Some(1), "2022-02-10T00:00:00", "2022-03-01T00:00:00"))
                .unwrap();
        let (start, end) = regime.clamp(day("2022-02-01"), day("2022-02-14"));
        assert_eq!(start, day("2022-02-10"));
        assert_eq!(end, day("2022-02-14"));
    }

    #[test]
    fn test_dynamics_bounds() {
        let mut rates = RateSeries::new();
        rates.insert(day("2022-02-01"), 2.5);
        rates.insert(day("2022-02-02"), 2.0);
        rates.insert(day("2022-02-03"), 3.0);
        assert_eq!(RateDynamics::new(1.0, rates).bounds(), Some((2.0, 3.0)));
        assert_eq!(RateDynamics::empty().bounds(), None);
    }
}
