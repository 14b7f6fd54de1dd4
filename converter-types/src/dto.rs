//! Data Transfer Objects for the upstream exchange-rate API.
//!
//! Every field is optional: the upstream omits fields freely and the
//! resolvers apply their own defaults.

use serde::{Deserialize, Serialize};

/// Entry of `GET /currencies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyDto {
    #[serde(rename = "Cur_ID", default)]
    pub cur_id: Option<i64>,
    #[serde(rename = "Cur_Abbreviation", default)]
    pub cur_abbreviation: Option<String>,
    #[serde(rename = "Cur_Scale", default)]
    pub cur_scale: Option<f64>,
    #[serde(rename = "Cur_DateStart", default)]
    pub cur_date_start: Option<String>,
    #[serde(rename = "Cur_DateEnd", default)]
    pub cur_date_end: Option<String>,
}

/// Body of `GET /rates/{CODE}?parammode=2`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateDto {
    #[serde(rename = "Cur_Scale", default)]
    pub cur_scale: Option<f64>,
    #[serde(rename = "Cur_OfficialRate", default)]
    pub cur_official_rate: Option<f64>,
}

/// Entry of `GET /rates/dynamics/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatePointDto {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Cur_OfficialRate", default)]
    pub cur_official_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_dto_ignores_unknown_fields() {
        let dto: CurrencyDto = serde_json::from_str(
            r#"{"Cur_ID": 431, "Cur_Abbreviation": "USD", "Cur_Scale": 1,
                "Cur_Name": "Доллар США", "Cur_DateStart": "1991-01-01T00:00:00",
                "Cur_DateEnd": "2050-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(dto.cur_id, Some(431));
        assert_eq!(dto.cur_scale, Some(1.0));
    }

    #[test]
    fn test_rate_dto_missing_fields() {
        let dto: RateDto = serde_json::from_str(r#"{"Cur_Scale": 10}"#).unwrap();
        assert_eq!(dto.cur_scale, Some(10.0));
        assert_eq!(dto.cur_official_rate, None);
    }
}
