//! Hostnames within a domain or group, and their record sets.

use crate::client::{ApiResult, DnsClient};
use crate::http::Transport;
use crate::types::RecordTarget;

pub fn get_hostnames<T: Transport>(client: &DnsClient<T>, target: &RecordTarget) -> ApiResult {
    let query = match target {
        RecordTarget::Domain(domain) => client
            .query("getHostnamesForDomain")
            .push("domain", domain),
        RecordTarget::Group(group) => client.query("getHostnamesForGroup").push("group", group),
    };
    client.run(&query)
}

/// Add `host` under `target`. `default_address` receives traffic that no
/// geo-targeted record matches.
pub fn create_hostname<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    is_url_forward: bool,
    default_address: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("createHostname")
            .push_target(target)
            .push("host", host)
            .push_flag("is_urlforward", is_url_forward)
            .push_opt("default", default_address),
    )
}

pub fn remove_hostname<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    confirm: bool,
) -> ApiResult {
    client.run(
        &client
            .query("removeHostname")
            .push_target(target)
            .push("host", host)
            .push_flag("confirm", confirm),
    )
}

pub fn get_rrset_for_hostname<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
) -> ApiResult {
    client.run(
        &client
            .query("getRRSetForHostname")
            .push_target(target)
            .push("host", host),
    )
}
