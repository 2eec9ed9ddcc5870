//! Domain lifecycle: listing, creation, mode changes, enable/disable/delete.

use crate::client::{ApiResult, DnsClient};
use crate::http::Transport;
use crate::query::Query;
use crate::types::{DomainMode, NewDomain, RecordTarget, ZoneDefaults};

/// Domains whose name matches `filter` case-insensitively. An empty filter
/// lists every domain.
pub fn get_domains<T: Transport>(client: &DnsClient<T>, filter: &str) -> ApiResult {
    client.run(&client.query("getDomains").push("search_term", filter))
}

pub fn create_domain<T: Transport>(client: &DnsClient<T>, domain: &NewDomain) -> ApiResult {
    let query = client
        .query("createDomain")
        .push("domain", &domain.domain)
        .push("mode", domain.mode.as_str())
        .push_opt("group", domain.group.as_deref());
    client.run(&push_zone_defaults(query, &domain.defaults))
}

/// Create several domains at once, optionally placing them in `group`.
pub fn create_domains<T: Transport, S: AsRef<str>>(
    client: &DnsClient<T>,
    mode: DomainMode,
    domains: &[S],
    group: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("createDomains")
            .push("mode", mode.as_str())
            .push_all("domains", domains)
            .push_opt("group", group),
    )
}

pub fn assign_domain_mode<T: Transport>(
    client: &DnsClient<T>,
    domain: &str,
    mode: DomainMode,
    group: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("assignDomainMode")
            .push("domain", domain)
            .push("mode", mode.as_str())
            .push_opt("group", group),
    )
}

pub fn delete_domain<T: Transport>(client: &DnsClient<T>, domain: &str, confirm: bool) -> ApiResult {
    confirmed(client, "deleteDomain", domain, confirm)
}

pub fn disable_domain<T: Transport>(client: &DnsClient<T>, domain: &str, confirm: bool) -> ApiResult {
    confirmed(client, "disableDomain", domain, confirm)
}

pub fn enable_domain<T: Transport>(client: &DnsClient<T>, domain: &str, confirm: bool) -> ApiResult {
    confirmed(client, "enableDomain", domain, confirm)
}

/// Regenerate the served zone(s) for a domain or every domain in a group.
pub fn rebuild<T: Transport>(client: &DnsClient<T>, target: &RecordTarget) -> ApiResult {
    client.run(&client.query("rebuild").push_target(target))
}

fn confirmed<T: Transport>(
    client: &DnsClient<T>,
    endpoint: &str,
    domain: &str,
    confirm: bool,
) -> ApiResult {
    client.run(
        &client
            .query(endpoint)
            .push("domain", domain)
            .push_flag("confirm", confirm),
    )
}

/// `rname`, `ns`, primary wildcard and default MX, in that order.
pub(crate) fn push_zone_defaults(query: Query, defaults: &ZoneDefaults) -> Query {
    let query = query
        .push_opt("rname", defaults.rname.as_deref())
        .push_all("ns", &defaults.ns);
    let query = match &defaults.primary_wildcard {
        Some(wildcard) => query
            .push("primary_wildcard", &wildcard.target)
            .push("primary_wildcard_qtype", wildcard.qtype.as_str()),
        None => query,
    };
    query.push_opt("default_mx", defaults.default_mx.as_deref())
}
