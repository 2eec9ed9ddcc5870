//! GeoGroups and the country/region/city lookup lists used for geo-targeting.

use crate::client::{ApiResult, DnsClient};
use crate::http::Transport;
use crate::query::Query;
use crate::types::ListParams;

pub fn create_geo_group<T: Transport>(client: &DnsClient<T>, group: &str) -> ApiResult {
    client.run(&client.query("createGeoGroup").push("group", group))
}

/// Add a country, optionally narrowed to a region and city, to a GeoGroup.
pub fn append_to_geo_group<T: Transport>(
    client: &DnsClient<T>,
    name: &str,
    iso2_code: &str,
    region: Option<&str>,
    city: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("appendToGeoGroup")
            .push("name", name)
            .push("iso2_code", iso2_code)
            .push_opt("region", region)
            .push_opt("city", city),
    )
}

pub fn get_country_list<T: Transport>(client: &DnsClient<T>, params: &ListParams) -> ApiResult {
    let query = client.query("getCountryList").push_opt("filter", params.filter.as_deref());
    client.run(&push_list_params(query, params))
}

/// `country_code` is either the ISO 3166 alpha-2 code or the numeric code.
pub fn get_region_list<T: Transport>(
    client: &DnsClient<T>,
    country_code: Option<&str>,
    params: &ListParams,
) -> ApiResult {
    let query = client
        .query("getRegionList")
        .push_opt("filter", params.filter.as_deref())
        .push_opt("countryCode", country_code);
    client.run(&push_list_params(query, params))
}

pub fn get_city_list<T: Transport>(
    client: &DnsClient<T>,
    country_code: Option<&str>,
    region_code: Option<u32>,
    params: &ListParams,
) -> ApiResult {
    let query = client
        .query("getCityList")
        .push_opt("filter", params.filter.as_deref())
        .push_opt("countryCode", country_code)
        .push_display_opt("regionCode", region_code);
    client.run(&push_list_params(query, params))
}

fn push_list_params(query: Query, params: &ListParams) -> Query {
    query
        .push_display_opt("limit", params.limit)
        .push_display_opt("offset", params.offset)
        .push_opt(
            "order_by",
            params.order_by.as_deref().map(str::to_ascii_lowercase).as_deref(),
        )
        .push_opt("direction", params.direction.map(|d| d.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client, last_path};
    use crate::types::SortDirection;

    #[test]
    fn country_list_without_params() {
        let c = client();
        get_country_list(&c, &ListParams::default()).unwrap();
        assert_eq!(last_path(&c), "/api/getCountryList/?AUTH_TOKEN=tok");
    }

    #[test]
    fn country_list_with_null_limit_has_no_limit_key() {
        let c = client();
        let params = ListParams {
            filter: Some("united".into()),
            offset: Some(10),
            ..ListParams::default()
        };
        get_country_list(&c, &params).unwrap();
        let path = last_path(&c);
        assert!(!path.contains("&limit="));
        assert_eq!(path, "/api/getCountryList/?AUTH_TOKEN=tok&filter=united&offset=10");
    }

    #[test]
    fn ordering_is_normalised() {
        let c = client();
        let params = ListParams {
            limit: Some(30),
            order_by: Some("ISO_Code".into()),
            direction: Some(SortDirection::Asc),
            ..ListParams::default()
        };
        get_country_list(&c, &params).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/getCountryList/?AUTH_TOKEN=tok&limit=30&order_by=iso_code&direction=ASC"
        );
    }

    #[test]
    fn region_and_city_lists_use_own_endpoints() {
        let c = client();
        get_region_list(&c, Some("US"), &ListParams::default()).unwrap();
        assert_eq!(last_path(&c), "/api/getRegionList/?AUTH_TOKEN=tok&countryCode=US");

        get_city_list(&c, Some("US"), Some(185), &ListParams::default()).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/getCityList/?AUTH_TOKEN=tok&countryCode=US&regionCode=185"
        );
    }

    #[test]
    fn null_sentinel_filter_is_dropped() {
        let c = client();
        let params = ListParams {
            filter: Some("NULL".into()),
            ..ListParams::default()
        };
        get_region_list(&c, Some("null"), &params).unwrap();
        assert_eq!(last_path(&c), "/api/getRegionList/?AUTH_TOKEN=tok");
    }

    #[test]
    fn geo_group_membership() {
        let c = client();
        create_geo_group(&c, "europe").unwrap();
        assert_eq!(last_path(&c), "/api/createGeoGroup/?AUTH_TOKEN=tok&group=europe");

        append_to_geo_group(&c, "europe", "DE", Some("BE"), None).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/appendToGeoGroup/?AUTH_TOKEN=tok&name=europe&iso2_code=DE&region=BE"
        );
    }
}
