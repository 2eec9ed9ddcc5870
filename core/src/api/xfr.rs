//! Zone transfer (XFR) configuration: zones slaved from a customer master.

use std::net::IpAddr;

use crate::client::{ApiResult, DnsClient};
use crate::error::ApiError;
use crate::http::Transport;

/// Shortest domain name accepted before sending anything.
const MIN_DOMAIN_LEN: usize = 3;

/// Slave `domain` from the master server at `master`.
///
/// `domain` and `master` are checked locally; an invalid value fails without
/// a request being sent. An empty `host` counts as absent.
pub fn create_xfr_zone<T: Transport>(
    client: &DnsClient<T>,
    domain: &str,
    host: Option<&str>,
    master: &str,
    port: Option<u16>,
    refresh_interval: Option<u32>,
) -> ApiResult {
    if domain.chars().count() < MIN_DOMAIN_LEN {
        return Err(ApiError::InvalidArgument(
            "The 'domain' argument is too small to be a valid domain.".to_string(),
        ));
    }
    if master.parse::<IpAddr>().is_err() {
        return Err(ApiError::InvalidArgument(format!(
            "The value '{master}' for the 'master' server is not a valid IP address."
        )));
    }

    client.run(
        &client
            .query("createXfrZone")
            .push("domain", domain)
            .push_opt("host", host.filter(|h| !h.is_empty()))
            .push("master", master)
            .push_display_opt("port", port)
            .push_display_opt("refresh_interval", refresh_interval),
    )
}

/// Transfer settings for one zone, or for all zones when `domain` is `None`.
pub fn get_xfr_for_zone<T: Transport>(client: &DnsClient<T>, domain: Option<&str>) -> ApiResult {
    client.run(&client.query("getXfrForZone").push_opt("domainname", domain))
}

pub fn remove_xfr_zone<T: Transport>(
    client: &DnsClient<T>,
    domain: Option<&str>,
    host: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("removeXfrZone")
            .push_opt("domainname", domain)
            .push_opt("host", host),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client, last_path};

    #[test]
    fn create_zone_full() {
        let c = client();
        create_xfr_zone(&c, "example.com", Some("www"), "192.0.2.53", Some(53), Some(3600)).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/createXfrZone/?AUTH_TOKEN=tok&domain=example.com&host=www&master=192.0.2.53&port=53&refresh_interval=3600"
        );
    }

    #[test]
    fn empty_and_null_host_are_omitted() {
        let c = client();
        create_xfr_zone(&c, "example.com", Some(""), "2001:db8::53", None, None).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/createXfrZone/?AUTH_TOKEN=tok&domain=example.com&master=2001%3Adb8%3A%3A53"
        );
        create_xfr_zone(&c, "example.com", Some("Null"), "192.0.2.53", None, None).unwrap();
        assert!(!last_path(&c).contains("host="));
    }

    #[test]
    fn short_domain_is_rejected_without_request() {
        let c = client();
        let err = create_xfr_zone(&c, "ab", None, "192.0.2.53", None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'domain' argument is too small to be a valid domain."
        );
        assert!(c.transport().requests().is_empty());
    }

    #[test]
    fn domain_length_counts_characters() {
        let c = client();
        // Two characters, four bytes.
        assert!(create_xfr_zone(&c, "éé", None, "192.0.2.53", None, None).is_err());
        assert!(c.transport().requests().is_empty());
        create_xfr_zone(&c, "é.é", None, "192.0.2.53", None, None).unwrap();
        assert_eq!(c.transport().requests().len(), 1);
    }

    #[test]
    fn master_must_be_an_ip_address() {
        let c = client();
        let err = create_xfr_zone(&c, "example.com", None, "ns1.example.com", None, None).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
        assert_eq!(
            err.to_string(),
            "The value 'ns1.example.com' for the 'master' server is not a valid IP address."
        );
        assert!(c.transport().requests().is_empty());
    }

    #[test]
    fn lookup_and_remove() {
        let c = client();
        get_xfr_for_zone(&c, Some("example.com")).unwrap();
        assert_eq!(last_path(&c), "/api/getXfrForZone/?AUTH_TOKEN=tok&domainname=example.com");
        get_xfr_for_zone(&c, None).unwrap();
        assert_eq!(last_path(&c), "/api/getXfrForZone/?AUTH_TOKEN=tok");
        remove_xfr_zone(&c, Some("example.com"), Some("www")).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/removeXfrZone/?AUTH_TOKEN=tok&domainname=example.com&host=www"
        );
    }
}
