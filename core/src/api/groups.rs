//! Domain groups: shared zone templates that member domains inherit.

use crate::api::domains::push_zone_defaults;
use crate::client::{ApiResult, DnsClient};
use crate::http::Transport;
use crate::types::NewDomainGroup;

pub fn get_domain_groups<T: Transport>(client: &DnsClient<T>, filter: &str) -> ApiResult {
    client.run(&client.query("getDomainGroups").push("search_term", filter))
}

pub fn create_domain_group<T: Transport>(
    client: &DnsClient<T>,
    group: &NewDomainGroup,
) -> ApiResult {
    let query = client.query("createDomainGroup").push("name", &group.name);
    client.run(&push_zone_defaults(query, &group.defaults))
}

pub fn get_domains_in_group<T: Transport>(client: &DnsClient<T>, group: &str) -> ApiResult {
    client.run(&client.query("getDomainsInGroup").push("group", group))
}

pub fn remove_domain_group<T: Transport>(
    client: &DnsClient<T>,
    group: &str,
    confirm: bool,
) -> ApiResult {
    client.run(
        &client
            .query("removeDomainGroup")
            .push("group", group)
            .push_flag("confirm", confirm),
    )
}

/// Point the root wildcard of every domain in `group` (or every domain, when
/// no group is given) at `address`.
pub fn update_root_wildcard_for_group<T: Transport>(
    client: &DnsClient<T>,
    address: &str,
    group: Option<&str>,
) -> ApiResult {
    client.run(
        &client
            .query("updateRootWildcardForList")
            .push("IP", address)
            .push_opt("group", group),
    )
}

/// Point the root wildcard of each listed domain at `address`.
pub fn update_root_wildcard_for_domains<T: Transport, S: AsRef<str>>(
    client: &DnsClient<T>,
    address: &str,
    domains: &[S],
) -> ApiResult {
    client.run(
        &client
            .query("updateRootWildcardForList")
            .push("IP", address)
            .push_all("domains", domains),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client, last_path};
    use crate::types::ZoneDefaults;

    #[test]
    fn create_group_with_name_servers() {
        let c = client();
        let group = NewDomainGroup {
            name: "web".into(),
            defaults: ZoneDefaults {
                ns: vec!["ns1.example.net".into()],
                default_mx: Some("mx.example.net".into()),
                ..ZoneDefaults::default()
            },
        };
        create_domain_group(&c, &group).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/createDomainGroup/?AUTH_TOKEN=tok&name=web&ns=ns1.example.net&default_mx=mx.example.net"
        );
    }

    #[test]
    fn list_and_members() {
        let c = client();
        get_domain_groups(&c, "we").unwrap();
        assert_eq!(last_path(&c), "/api/getDomainGroups/?AUTH_TOKEN=tok&search_term=we");
        get_domains_in_group(&c, "web").unwrap();
        assert_eq!(last_path(&c), "/api/getDomainsInGroup/?AUTH_TOKEN=tok&group=web");
    }

    #[test]
    fn remove_group_confirmed() {
        let c = client();
        remove_domain_group(&c, "web", true).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/removeDomainGroup/?AUTH_TOKEN=tok&group=web&confirm=true"
        );
    }

    #[test]
    fn root_wildcard_variants() {
        let c = client();
        update_root_wildcard_for_group(&c, "192.0.2.7", None).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/updateRootWildcardForList/?AUTH_TOKEN=tok&IP=192.0.2.7"
        );
        update_root_wildcard_for_domains(&c, "192.0.2.7", &["a.com", "b.com"]).unwrap();
        assert_eq!(
            last_path(&c),
            "/api/updateRootWildcardForList/?AUTH_TOKEN=tok&IP=192.0.2.7&domains=a.com&domains=b.com"
        );
    }
}
