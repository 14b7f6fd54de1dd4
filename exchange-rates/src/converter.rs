//! Rate resolution, rate dynamics and conversion.
//!
//! Every public operation returns an [`Outcome`]: the sentinel value plus the
//! error on failure. Internally the operations are plain `Result`s.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, warn};

use converter_types::{
    ConverterError, CurrencyCode, CurrencyDto, CurrencyRegime, DATE_LONG, DATE_SHORT, Outcome,
    QueryParams, Rate, RateDto, RateDynamics, RatePointDto, RateSeries, RateTransport, parse_date,
};

/// Longest window accepted by [`CurrencyConverter::get_rate_dynamics`].
pub const MAX_PERIOD_DAYS: i64 = 365;

const CURRENCIES_PATH: &str = "/currencies";
const RATES_PATH: &str = "/rates";
const DYNAMICS_PATH: &str = "/rates/dynamics";

/// Currency converter backed by the upstream exchange-rate API.
///
/// Generic over `T: RateTransport` - the HTTP gateway is injected at compile
/// time, tests inject an in-memory transport. Holds no per-call state, so a
/// single instance can be shared between callers.
pub struct CurrencyConverter<T: RateTransport> {
    transport: T,
}

impl<T: RateTransport> CurrencyConverter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Public Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Scale and official rate of `code` in BYN, optionally on `date` (`YYYY-MM-DD`).
    ///
    /// The base currency resolves to `(1.0, 1.0)` without a request.
    /// Sentinel on failure: `(1.0, 0.0)`.
    pub async fn get_rate(&self, code: &str, date: Option<&str>) -> Outcome<Rate> {
        let result = match CurrencyCode::parse(code) {
            Ok(code) => self.rate_for(&code, date).await,
            Err(err) => Err(err),
        };
        Outcome::from_result(result, || Rate::SENTINEL)
    }

    /// Rate history of `code` between two dates (`YYYY-MM-DD`, any order,
    /// at most [`MAX_PERIOD_DAYS`] apart), normalized to one scale.
    ///
    /// The base currency resolves to `(1.0, {})` without an error.
    /// Sentinel on failure: `(1.0, {})`.
    pub async fn get_rate_dynamics(
        &self,
        code: &str,
        start_date: &str,
        end_date: &str,
    ) -> Outcome<RateDynamics> {
        Outcome::from_result(
            self.dynamics_for(code, start_date, end_date).await,
            RateDynamics::empty,
        )
    }

    /// Converts `amount` from `from` into `to` through the base currency.
    ///
    /// Sentinel on failure: `0.0`.
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        date: Option<&str>,
    ) -> Outcome<f64> {
        Outcome::from_result(self.convert_amount(amount, from, to, date).await, || 0.0)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Resolvers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn rate_for(&self, code: &CurrencyCode, date: Option<&str>) -> Result<Rate, ConverterError> {
        if code.is_base() {
            return Ok(Rate::BASE);
        }

        let mut params: QueryParams = vec![("parammode", "2".to_string())];
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            if parse_date(date, DATE_SHORT).is_none() {
                return Err(ConverterError::InvalidDate(date.to_string()));
            }
            params.push(("ondate", date.to_string()));
        }

        let body = self.fetch(&format!("{RATES_PATH}/{code}"), &params).await?;
        if is_empty_body(&body) {
            return Err(ConverterError::RateNotFound(code.to_string()));
        }

        let dto: RateDto = decode_object(body)?;
        Ok(Rate::new(
            dto.cur_scale.unwrap_or(1.0),
            dto.cur_official_rate.unwrap_or(0.0),
        ))
    }

    async fn dynamics_for(
        &self,
        code: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<RateDynamics, ConverterError> {
        let code = CurrencyCode::parse(code)?;
        if code.is_base() {
            return Ok(RateDynamics::empty());
        }

        let (start, end) = parse_period(start_date, end_date)?;
        let regimes = self.regimes_for(&code, start, end).await?;

        // Scale of the most recently starting regime; every point is expressed in it.
        let reference_scale = regimes
            .iter()
            .max_by(|a, b| (a.date_start, a.date_end).cmp(&(b.date_start, b.date_end)))
            .map(|r| r.scale)
            .unwrap_or(1.0);
        debug!(%code, regimes = regimes.len(), reference_scale, "resolving rate dynamics");

        let mut rates = RateSeries::new();
        for regime in &regimes {
            if regime.scale == 0.0 {
                warn!(%code, id = regime.id, "skipping regime with zero scale");
                continue;
            }

            let (from, to) = regime.clamp(start, end);
            let params: QueryParams = vec![
                ("startdate", from.format(DATE_SHORT).to_string()),
                ("enddate", to.format(DATE_SHORT).to_string()),
            ];
            let body = self
                .fetch(&format!("{DYNAMICS_PATH}/{}", regime.id), &params)
                .await?;
            let points: Vec<RatePointDto> = decode_list(body)?;

            for point in points {
                let date = point.date.as_deref().and_then(|d| parse_date(d, DATE_LONG));
                if let (Some(date), Some(rate)) = (date, point.cur_official_rate) {
                    rates.insert(date, rate * reference_scale / regime.scale);
                }
            }
        }

        if rates.is_empty() {
            return Err(ConverterError::RatesNotFound(code.to_string()));
        }

        Ok(RateDynamics::new(reference_scale, rates))
    }

    /// Regimes of `code` whose validity interval contains either end of the window.
    async fn regimes_for(
        &self,
        code: &CurrencyCode,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CurrencyRegime>, ConverterError> {
        let body = self.fetch(CURRENCIES_PATH, &QueryParams::new()).await?;
        let records: Vec<CurrencyDto> = decode_list(body)?;

        let regimes: Vec<CurrencyRegime> = records
            .iter()
            .filter_map(CurrencyRegime::from_dto)
            .filter(|r| r.abbreviation == code.as_str() && r.overlaps(start, end))
            .collect();

        if regimes.is_empty() {
            return Err(ConverterError::CurrencyNotFound(code.to_string()));
        }
        Ok(regimes)
    }

    async fn convert_amount(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        date: Option<&str>,
    ) -> Result<f64, ConverterError> {
        if !amount.is_finite() {
            return Err(ConverterError::InvalidAmount(amount));
        }
        let from = CurrencyCode::parse(from)?;
        let to = CurrencyCode::parse(to)?;

        if from == to {
            return Ok(amount);
        }

        let amount_in_base = if from.is_base() {
            amount
        } else {
            self.rate_for(&from, date).await?.to_base(amount)
        };

        let to_rate = self.rate_for(&to, date).await?;
        Ok(to_rate.from_base(amount_in_base))
    }

    async fn fetch(&self, path: &str, params: &QueryParams) -> Result<Value, ConverterError> {
        debug!(path, ?params, "requesting upstream");
        self.transport.get_json(path, params).await.map_err(|err| {
            warn!(path, error = %err, "upstream request failed");
            ConverterError::from(err)
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Parses both ends of a period, orders them and enforces [`MAX_PERIOD_DAYS`].
fn parse_period(
    start_date: &str,
    end_date: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), ConverterError> {
    let start = parse_date(start_date, DATE_SHORT)
        .ok_or_else(|| ConverterError::InvalidDate(start_date.to_string()))?;
    let end = parse_date(end_date, DATE_SHORT)
        .ok_or_else(|| ConverterError::InvalidDate(end_date.to_string()))?;

    let (start, end) = if start > end { (end, start) } else { (start, end) };

    if (end - start).num_days() > MAX_PERIOD_DAYS {
        return Err(ConverterError::PeriodTooLong {
            start: start.format(DATE_SHORT).to_string(),
            end: end.format(DATE_SHORT).to_string(),
            max_days: MAX_PERIOD_DAYS,
        });
    }
    Ok((start, end))
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn unexpected(err: serde_json::Error) -> ConverterError {
    ConverterError::UnexpectedResponse(err.to_string())
}

/// Decodes a JSON object. Derived struct deserializers also accept arrays
/// positionally, so anything but an object is rejected up front.
fn decode_object<D: serde::de::DeserializeOwned>(body: Value) -> Result<D, ConverterError> {
    if !body.is_object() {
        return Err(ConverterError::UnexpectedResponse(format!(
            "expected a JSON object, got {body}"
        )));
    }
    serde_json::from_value(body).map_err(unexpected)
}

/// Decodes a JSON array of objects; an empty body decodes to an empty list.
fn decode_list<D: serde::de::DeserializeOwned>(body: Value) -> Result<Vec<D>, ConverterError> {
    if is_empty_body(&body) {
        return Ok(Vec::new());
    }
    let items: Vec<Value> = serde_json::from_value(body).map_err(unexpected)?;
    items.into_iter().map(decode_object).collect()
}
