//! Static country/region/city tables and the list query over them.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::params::{Failure, Params};

#[derive(Debug, Clone, Serialize)]
pub struct Country {
    pub id: u32,
    pub iso_code: &'static str,
    pub iso_num: u32,
    pub name: &'static str,
    pub continent_code: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub id: u32,
    pub country_id: u32,
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct City {
    pub id: u32,
    pub name: &'static str,
    pub country_id: u32,
    pub region_id: u32,
    pub postal_code: u32,
    pub latitude: f64,
    pub longitude: f64,
}

pub const COUNTRIES: &[Country] = &[
    Country { id: 33, iso_code: "US", iso_num: 840, name: "United States", continent_code: "NA" },
    Country { id: 54, iso_code: "CN", iso_num: 156, name: "China", continent_code: "AS" },
    Country { id: 57, iso_code: "DE", iso_num: 276, name: "Germany", continent_code: "EU" },
    Country { id: 77, iso_code: "GB", iso_num: 826, name: "United Kingdom", continent_code: "EU" },
    Country { id: 83, iso_code: "FR", iso_num: 250, name: "France", continent_code: "EU" },
    Country { id: 110, iso_code: "JP", iso_num: 392, name: "Japan", continent_code: "AS" },
    Country { id: 31, iso_code: "BR", iso_num: 76, name: "Brazil", continent_code: "SA" },
];

pub const REGIONS: &[Region] = &[
    Region { id: 185, country_id: 33, code: "KY", name: "Kentucky" },
    Region { id: 170, country_id: 33, code: "IN", name: "Indiana" },
    Region { id: 205, country_id: 33, code: "NY", name: "New York" },
    Region { id: 612, country_id: 57, code: "BE", name: "Berlin" },
    Region { id: 640, country_id: 77, code: "ENG", name: "England" },
];

pub const CITIES: &[City] = &[
    City { id: 3_627_350, name: "Louisville", country_id: 33, region_id: 185, postal_code: 40202, latitude: 38.2517, longitude: -85.7544 },
    City { id: 3_724_834, name: "Jeffersonville", country_id: 33, region_id: 170, postal_code: 47130, latitude: 38.3283, longitude: -85.6957 },
    City { id: 3_512_007, name: "New York", country_id: 33, region_id: 205, postal_code: 10001, latitude: 40.7143, longitude: -74.0060 },
    City { id: 2_950_159, name: "Berlin", country_id: 57, region_id: 612, postal_code: 10115, latitude: 52.5244, longitude: 13.4105 },
    City { id: 2_643_743, name: "London", country_id: 77, region_id: 640, postal_code: 0, latitude: 51.5085, longitude: -0.1257 },
];

/// Resolve `countryCode`, which may be an ISO alpha-2 code or the numeric code.
pub fn find_country(code: &str) -> Option<&'static Country> {
    match code.parse::<u32>() {
        Ok(num) => COUNTRIES.iter().find(|c| c.iso_num == num),
        Err(_) => COUNTRIES.iter().find(|c| c.iso_code.eq_ignore_ascii_case(code)),
    }
}

pub fn countries(params: &Params) -> Result<Value, Failure> {
    let rows = COUNTRIES
        .iter()
        .filter(|c| matches_filter(params, &[c.iso_code, c.name]))
        .map(to_value)
        .collect();
    page(rows, params, &["id", "iso_code", "iso_num", "name", "continent_code"])
}

pub fn regions(params: &Params) -> Result<Value, Failure> {
    let country_id = country_filter(params)?;
    let rows = REGIONS
        .iter()
        .filter(|r| country_id.map_or(true, |id| r.country_id == id))
        .filter(|r| matches_filter(params, &[r.code, r.name]))
        .map(to_value)
        .collect();
    page(rows, params, &["id", "country_id", "code", "name"])
}

pub fn cities(params: &Params) -> Result<Value, Failure> {
    let country_id = country_filter(params)?;
    let region_id: Option<u32> = params.number("regionCode")?;
    let rows = CITIES
        .iter()
        .filter(|c| country_id.map_or(true, |id| c.country_id == id))
        .filter(|c| region_id.map_or(true, |id| c.region_id == id))
        .filter(|c| matches_filter(params, &[c.name]))
        .map(to_value)
        .collect();
    page(rows, params, &["id", "name", "country_id", "region_id", "postal_code"])
}

fn country_filter(params: &Params) -> Result<Option<u32>, Failure> {
    match params.get("countryCode") {
        None => Ok(None),
        Some(code) => find_country(code)
            .map(|c| Some(c.id))
            .ok_or_else(|| Failure::not_found(format!("Unknown country '{code}'"))),
    }
}

fn matches_filter(params: &Params, fields: &[&str]) -> bool {
    match params.get("filter") {
        None => true,
        Some(filter) => {
            let filter = filter.to_lowercase();
            fields.iter().any(|f| f.to_lowercase().contains(&filter))
        }
    }
}

fn to_value<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}

/// Order, then apply offset and limit. Descending by default.
fn page(mut rows: Vec<Value>, params: &Params, sortable: &[&str]) -> Result<Value, Failure> {
    let order_by = params.get("order_by").unwrap_or("id");
    if !sortable.contains(&order_by) {
        return Err(Failure::bad_request(format!("Cannot order by '{order_by}'")));
    }
    let ascending = match params.get("direction") {
        None => false,
        Some(d) if d.eq_ignore_ascii_case("asc") => true,
        Some(d) if d.eq_ignore_ascii_case("desc") => false,
        Some(d) => return Err(Failure::bad_request(format!("Invalid direction '{d}'"))),
    };

    rows.sort_by(|a, b| {
        let ord = compare(&a[order_by], &b[order_by]);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    let offset: usize = params.number("offset")?.unwrap_or(0);
    let limit: Option<usize> = params.number("limit")?;
    let total = rows.len();
    let rows: Vec<Value> = rows
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    Ok(serde_json::json!({ "total": total, "rows": rows }))
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.as_str().unwrap_or_default().cmp(b.as_str().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        Params::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn default_order_is_id_descending() {
        let result = countries(&params(&[])).unwrap();
        let ids: Vec<u64> = result["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[test]
    fn filter_matches_code_or_name() {
        let result = countries(&params(&[("filter", "united")])).unwrap();
        assert_eq!(result["total"], 2);
        let result = countries(&params(&[("filter", "jp")])).unwrap();
        assert_eq!(result["rows"][0]["name"], "Japan");
    }

    #[test]
    fn limit_and_offset() {
        let result = countries(&params(&[
            ("order_by", "iso_code"),
            ("direction", "ASC"),
            ("offset", "1"),
            ("limit", "2"),
        ]))
        .unwrap();
        let codes: Vec<&str> = result["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["iso_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["CN", "DE"]);
        assert_eq!(result["total"], COUNTRIES.len());
    }

    #[test]
    fn regions_by_numeric_country_code() {
        let result = regions(&params(&[("countryCode", "840")])).unwrap();
        assert_eq!(result["total"], 3);
    }

    #[test]
    fn cities_by_region() {
        let result = cities(&params(&[("countryCode", "US"), ("regionCode", "185")])).unwrap();
        assert_eq!(result["rows"][0]["name"], "Louisville");
        assert_eq!(result["total"], 1);
    }

    #[test]
    fn bad_order_field_is_rejected() {
        assert!(countries(&params(&[("order_by", "population")])).is_err());
    }
}
