//! In-memory model of the DNS management API.
//!
//! Each handler takes the decoded query parameters and returns the `data`
//! part of a successful reply, or a [`Failure`] that the router wraps into a
//! `meta.success = 0` envelope.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::Serialize;
use serde_json::{json, Value};

use crate::geo;
use crate::params::{Failure, Params, Target};

const DEFAULT_TTL: u32 = 1440;
const DEFAULT_XFR_PORT: u16 = 53;
const DEFAULT_REFRESH_INTERVAL: u32 = 3600;

/// Record fields beyond `type`, `rdata`, `ttl` and the wildcard flag.
const EXTRA_FIELDS: &[&str] = &[
    "priority",
    "weight",
    "port",
    "retry",
    "expire",
    "minimum",
    "title",
    "keywords",
    "description",
    "geoGroup",
];

const RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "CNAME", "MX", "NS", "SOA", "SRV", "TXT", "URL301", "URL302", "URLFrame",
];

#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: u64,
    #[serde(rename = "type")]
    pub rr_type: String,
    pub rdata: String,
    pub ttl: u32,
    pub is_wildcard: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    pub is_urlforward: bool,
    pub default: Option<String>,
    #[serde(skip)]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Zone {
    pub rname: Option<String>,
    pub root_wildcard: Option<String>,
    #[serde(skip)]
    pub hosts: BTreeMap<String, Host>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    pub id: u64,
    pub name: String,
    pub mode: String,
    pub group: Option<String>,
    pub enabled: bool,
    #[serde(flatten)]
    pub zone: Zone,
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub zone: Zone,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoEntry {
    pub country: &'static str,
    pub region: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoGroup {
    pub id: u64,
    pub name: String,
    pub entries: Vec<GeoEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct XfrZone {
    pub id: u64,
    pub domain: String,
    pub host: Option<String>,
    pub master: String,
    pub port: u16,
    pub refresh_interval: u32,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    domains: BTreeMap<String, Domain>,
    groups: BTreeMap<String, Group>,
    geo_groups: BTreeMap<String, GeoGroup>,
    xfr_zones: Vec<XfrZone>,
}

type Reply = Result<Value, Failure>;

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one API method. `None` means the method does not exist.
    pub fn handle(&mut self, method: &str, params: &Params) -> Option<Reply> {
        let reply = match method {
            "getDomains" => self.get_domains(params),
            "createDomain" => self.create_domain(params),
            "createDomains" => self.create_domains(params),
            "assignDomainMode" => self.assign_domain_mode(params),
            "deleteDomain" => self.delete_domain(params),
            "disableDomain" => self.set_enabled(params, false),
            "enableDomain" => self.set_enabled(params, true),
            "rebuild" => self.rebuild(params),
            "getDomainGroups" => self.get_domain_groups(params),
            "createDomainGroup" => self.create_domain_group(params),
            "getDomainsInGroup" => self.get_domains_in_group(params),
            "removeDomainGroup" => self.remove_domain_group(params),
            "updateRootWildcardForList" => self.update_root_wildcard(params),
            "getHostnamesForDomain" | "getHostnamesForGroup" => self.get_hostnames(params),
            "createHostname" => self.create_hostname(params),
            "removeHostname" => self.remove_hostname(params),
            "getRRSetForHostname" => self.get_rrset(params),
            "createRRData" => self.create_rr(params),
            "removeRR" => self.remove_rr(params),
            "updateRRData" => self.update_rr(params),
            "createGeoGroup" => self.create_geo_group(params),
            "appendToGeoGroup" => self.append_to_geo_group(params),
            "getCountryList" => geo::countries(params),
            "getRegionList" => geo::regions(params),
            "getCityList" => geo::cities(params),
            "createXfrZone" => self.create_xfr_zone(params),
            "getXfrForZone" => self.get_xfr_for_zone(params),
            "removeXfrZone" => self.remove_xfr_zone(params),
            _ => return None,
        };
        Some(reply)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // Domains

    fn get_domains(&self, params: &Params) -> Reply {
        let term = search_term(params);
        let found: Vec<&Domain> = self
            .domains
            .values()
            .filter(|d| d.name.to_lowercase().contains(&term))
            .collect();
        to_json(&found)
    }

    fn create_domain(&mut self, params: &Params) -> Reply {
        let name = params.require("domain")?.to_string();
        let mode = parse_mode(params.require("mode")?)?;
        let group = self.group_for_mode(mode, params.get("group"))?;
        if self.domains.contains_key(&name) {
            return Err(Failure::conflict(format!("Domain '{name}' already exists")));
        }
        let zone = self.new_zone(params)?;
        let domain = self.insert_domain(name, mode, group, zone);
        to_json(&domain)
    }

    fn create_domains(&mut self, params: &Params) -> Reply {
        let mode = parse_mode(params.require("mode")?)?;
        let group = self.group_for_mode(mode, params.get("group"))?;
        let names = params.all("domains");
        if names.is_empty() {
            return Err(Failure::bad_request("Required argument 'domains' is missing"));
        }
        if let Some(taken) = names.iter().find(|n| self.domains.contains_key(*n)) {
            return Err(Failure::conflict(format!("Domain '{taken}' already exists")));
        }
        let created: Vec<Domain> = names
            .into_iter()
            .map(|name| self.insert_domain(name, mode, group.clone(), Zone::default()))
            .collect();
        to_json(&created)
    }

    fn assign_domain_mode(&mut self, params: &Params) -> Reply {
        let name = params.require("domain")?;
        let mode = parse_mode(params.require("mode")?)?;
        let group = self.group_for_mode(mode, params.get("group"))?;
        let domain = self.domain_mut(name)?;
        domain.mode = mode.to_string();
        domain.group = group;
        to_json(&*domain)
    }

    fn delete_domain(&mut self, params: &Params) -> Reply {
        params.require_confirm()?;
        let name = params.require("domain")?;
        let removed = self
            .domains
            .remove(name)
            .ok_or_else(|| unknown_domain(name))?;
        self.xfr_zones.retain(|z| z.domain != removed.name);
        Ok(json!({ "deleted": removed.name }))
    }

    fn set_enabled(&mut self, params: &Params, enabled: bool) -> Reply {
        params.require_confirm()?;
        let domain = self.domain_mut(params.require("domain")?)?;
        domain.enabled = enabled;
        to_json(&*domain)
    }

    fn rebuild(&mut self, params: &Params) -> Reply {
        let target = params.target()?;
        let records: usize = self
            .zone_mut(&target)?
            .hosts
            .values()
            .map(|h| h.records.len())
            .sum();
        Ok(json!({ "rebuilt": target.name(), "records": records }))
    }

    // Groups

    fn get_domain_groups(&self, params: &Params) -> Reply {
        let term = search_term(params);
        let found: Vec<&Group> = self
            .groups
            .values()
            .filter(|g| g.name.to_lowercase().contains(&term))
            .collect();
        to_json(&found)
    }

    fn create_domain_group(&mut self, params: &Params) -> Reply {
        let name = params.require("name")?.to_string();
        if self.groups.contains_key(&name) {
            return Err(Failure::conflict(format!("Group '{name}' already exists")));
        }
        let zone = self.new_zone(params)?;
        let group = Group {
            id: self.next_id(),
            name: name.clone(),
            zone,
        };
        self.groups.insert(name, group.clone());
        to_json(&group)
    }

    fn get_domains_in_group(&self, params: &Params) -> Reply {
        let name = params.require("group")?;
        if !self.groups.contains_key(name) {
            return Err(unknown_group(name));
        }
        let members: Vec<&Domain> = self
            .domains
            .values()
            .filter(|d| d.group.as_deref() == Some(name))
            .collect();
        to_json(&members)
    }

    fn remove_domain_group(&mut self, params: &Params) -> Reply {
        params.require_confirm()?;
        let name = params.require("group")?;
        if !self.groups.contains_key(name) {
            return Err(unknown_group(name));
        }
        if self.domains.values().any(|d| d.group.as_deref() == Some(name)) {
            return Err(Failure::conflict(format!("Group '{name}' still has domains")));
        }
        self.groups.remove(name);
        Ok(json!({ "deleted": name }))
    }

    /// Targets the members of `group`, else the listed `domains`, else every
    /// domain.
    fn update_root_wildcard(&mut self, params: &Params) -> Reply {
        let address = params.require("IP")?.to_string();
        address
            .parse::<IpAddr>()
            .map_err(|_| Failure::bad_request(format!("'{address}' is not a valid IP address")))?;
        let listed = params.all("domains");
        let group = params.get("group");
        if let Some(group) = group {
            if !self.groups.contains_key(group) {
                return Err(unknown_group(group));
            }
        }
        if let Some(missing) = listed.iter().find(|n| !self.domains.contains_key(*n)) {
            return Err(unknown_domain(missing));
        }

        let mut updated = Vec::new();
        for domain in self.domains.values_mut() {
            let selected = match group {
                Some(group) => domain.group.as_deref() == Some(group),
                None if !listed.is_empty() => listed.contains(&domain.name),
                None => true,
            };
            if selected {
                domain.zone.root_wildcard = Some(address.clone());
                updated.push(domain.name.clone());
            }
        }
        Ok(json!({ "updated": updated }))
    }

    // Hostnames

    fn get_hostnames(&mut self, params: &Params) -> Reply {
        let zone = self.zone_mut(&params.target()?)?;
        let hosts: Vec<&Host> = zone.hosts.values().collect();
        to_json(&hosts)
    }

    fn create_hostname(&mut self, params: &Params) -> Reply {
        let target = params.target()?;
        let name = params.require("host")?.to_string();
        let id = self.next_id();
        let zone = self.zone_mut(&target)?;
        if zone.hosts.contains_key(&name) {
            return Err(Failure::conflict(format!("Hostname '{name}' already exists")));
        }
        let host = Host {
            id,
            name: name.clone(),
            is_urlforward: params.flag("is_urlforward"),
            default: params.get("default").map(str::to_string),
            records: Vec::new(),
        };
        zone.hosts.insert(name, host.clone());
        to_json(&host)
    }

    fn remove_hostname(&mut self, params: &Params) -> Reply {
        params.require_confirm()?;
        let target = params.target()?;
        let name = params.require("host")?;
        if name.is_empty() {
            return Err(Failure::bad_request("The root hostname cannot be removed"));
        }
        let zone = self.zone_mut(&target)?;
        zone.hosts.remove(name).ok_or_else(|| unknown_host(name))?;
        Ok(json!({ "deleted": name }))
    }

    fn get_rrset(&mut self, params: &Params) -> Reply {
        let target = params.target()?;
        let name = params.require("host")?;
        let host = self
            .zone_mut(&target)?
            .hosts
            .get(name)
            .ok_or_else(|| unknown_host(name))?;
        to_json(&host.records)
    }

    // Records

    fn create_rr(&mut self, params: &Params) -> Reply {
        let target = params.target()?;
        let host_name = params.require("host")?.to_string();
        let rr_type = params.require("type")?.to_string();
        let rdata = params.require("rdata")?.to_string();
        validate_rdata(&rr_type, &rdata)?;
        match rr_type.as_str() {
            "MX" => {
                params.require_number::<u16>("priority")?;
            }
            "SRV" => {
                params.require_number::<u16>("weight")?;
                params.require_number::<u16>("port")?;
                params.require_number::<u16>("priority")?;
            }
            _ => {}
        }
        let ttl = parse_ttl(params)?;
        let mut extra = self.extra_fields(params)?;
        extra.extend(geo_fields(params, "country_iso2")?);

        let record = Record {
            id: self.next_id(),
            rr_type,
            rdata,
            ttl,
            is_wildcard: params.flag("is_wildcard"),
            extra,
        };
        let host = self
            .zone_mut(&target)?
            .hosts
            .get_mut(&host_name)
            .ok_or_else(|| unknown_host(&host_name))?;
        host.records.push(record.clone());
        to_json(&record)
    }

    fn remove_rr(&mut self, params: &Params) -> Reply {
        params.require_confirm()?;
        let id: u64 = params.require_number("rr_id")?;
        for host in self.all_hosts_mut() {
            if let Some(pos) = host.records.iter().position(|r| r.id == id) {
                host.records.remove(pos);
                return Ok(json!({ "deleted": id }));
            }
        }
        Err(unknown_record(id))
    }

    fn update_rr(&mut self, params: &Params) -> Reply {
        let id: u64 = params.require_number("rr_id")?;
        let rdata = params.require("rdata")?.to_string();
        let ttl = params.number::<u32>("ttl")?;
        if ttl.is_some() {
            parse_ttl(params)?;
        }
        let mut extra = self.extra_fields(params)?;
        extra.extend(geo_fields(params, "country")?);
        let wildcard = params.flag("is_wildcard");

        let record = self
            .all_hosts_mut()
            .flat_map(|h| h.records.iter_mut())
            .find(|r| r.id == id)
            .ok_or_else(|| unknown_record(id))?;
        validate_rdata(&record.rr_type, &rdata)?;
        record.rdata = rdata;
        record.is_wildcard = wildcard;
        if let Some(ttl) = ttl {
            record.ttl = ttl;
        }
        record.extra.extend(extra);
        to_json(&*record)
    }

    fn extra_fields(&self, params: &Params) -> Result<BTreeMap<String, String>, Failure> {
        if let Some(group) = params.get("geoGroup") {
            if !self.geo_groups.contains_key(group) {
                return Err(Failure::not_found(format!("Unknown geo group '{group}'")));
            }
        }
        Ok(EXTRA_FIELDS
            .iter()
            .filter_map(|key| params.get(key).map(|v| ((*key).to_string(), v.to_string())))
            .collect())
    }

    // Geo groups

    fn create_geo_group(&mut self, params: &Params) -> Reply {
        let name = params.require("group")?.to_string();
        if self.geo_groups.contains_key(&name) {
            return Err(Failure::conflict(format!("Geo group '{name}' already exists")));
        }
        let group = GeoGroup {
            id: self.next_id(),
            name: name.clone(),
            entries: Vec::new(),
        };
        self.geo_groups.insert(name, group.clone());
        to_json(&group)
    }

    fn append_to_geo_group(&mut self, params: &Params) -> Reply {
        let name = params.require("name")?;
        let code = params.require("iso2_code")?;
        let country = geo::find_country(code)
            .ok_or_else(|| Failure::not_found(format!("Unknown country '{code}'")))?;
        let group = self
            .geo_groups
            .get_mut(name)
            .ok_or_else(|| Failure::not_found(format!("Unknown geo group '{name}'")))?;
        group.entries.push(GeoEntry {
            country: country.iso_code,
            region: params.get("region").map(str::to_string),
            city: params.get("city").map(str::to_string),
        });
        to_json(&*group)
    }

    // Zone transfers

    fn create_xfr_zone(&mut self, params: &Params) -> Reply {
        let domain = params.require("domain")?.to_string();
        let master = params.require("master")?.to_string();
        master
            .parse::<IpAddr>()
            .map_err(|_| Failure::bad_request(format!("'{master}' is not a valid IP address")))?;
        let host = params.get("host").map(str::to_string);
        if self
            .xfr_zones
            .iter()
            .any(|z| z.domain == domain && z.host == host)
        {
            return Err(Failure::conflict(format!("Zone transfer for '{domain}' already exists")));
        }
        let zone = XfrZone {
            id: self.next_id(),
            domain,
            host,
            master,
            port: params.number("port")?.unwrap_or(DEFAULT_XFR_PORT),
            refresh_interval: params
                .number("refresh_interval")?
                .unwrap_or(DEFAULT_REFRESH_INTERVAL),
        };
        self.xfr_zones.push(zone.clone());
        to_json(&zone)
    }

    fn get_xfr_for_zone(&self, params: &Params) -> Reply {
        let domain = params.get("domainname");
        let found: Vec<&XfrZone> = self
            .xfr_zones
            .iter()
            .filter(|z| domain.map_or(true, |d| z.domain == d))
            .collect();
        to_json(&found)
    }

    fn remove_xfr_zone(&mut self, params: &Params) -> Reply {
        let domain = params.get("domainname");
        let host = params.get("host");
        let before = self.xfr_zones.len();
        self.xfr_zones.retain(|z| {
            let matches = domain.map_or(true, |d| z.domain == d)
                && host.map_or(true, |h| z.host.as_deref() == Some(h));
            !matches
        });
        let removed = before - self.xfr_zones.len();
        if removed == 0 {
            return Err(Failure::not_found("No matching zone transfer"));
        }
        Ok(json!({ "deleted": removed }))
    }

    // Lookups

    fn domain_mut(&mut self, name: &str) -> Result<&mut Domain, Failure> {
        self.domains.get_mut(name).ok_or_else(|| unknown_domain(name))
    }

    fn zone_mut(&mut self, target: &Target) -> Result<&mut Zone, Failure> {
        match target {
            Target::Domain(name) => Ok(&mut self.domain_mut(name)?.zone),
            Target::Group(name) => self
                .groups
                .get_mut(name)
                .map(|g| &mut g.zone)
                .ok_or_else(|| unknown_group(name)),
        }
    }

    fn all_hosts_mut(&mut self) -> impl Iterator<Item = &mut Host> {
        self.domains
            .values_mut()
            .map(|d| &mut d.zone)
            .chain(self.groups.values_mut().map(|g| &mut g.zone))
            .flat_map(|z| z.hosts.values_mut())
    }

    fn group_for_mode(
        &self,
        mode: &'static str,
        group: Option<&str>,
    ) -> Result<Option<String>, Failure> {
        match (mode, group) {
            ("group", None) => Err(Failure::bad_request("Mode 'group' requires a 'group'")),
            (_, Some(name)) if !self.groups.contains_key(name) => Err(unknown_group(name)),
            (_, group) => Ok(group.map(str::to_string)),
        }
    }

    fn insert_domain(
        &mut self,
        name: String,
        mode: &'static str,
        group: Option<String>,
        mut zone: Zone,
    ) -> Domain {
        let root_id = self.next_id();
        zone.hosts.entry(String::new()).or_insert_with(|| Host {
            id: root_id,
            name: String::new(),
            is_urlforward: false,
            default: None,
            records: Vec::new(),
        });
        let domain = Domain {
            id: self.next_id(),
            name: name.clone(),
            mode: mode.to_string(),
            group,
            enabled: true,
            zone,
        };
        self.domains.insert(name, domain.clone());
        domain
    }

    /// Root host with NS and MX records from the zone defaults, plus a `*`
    /// host when a primary wildcard is given.
    fn new_zone(&mut self, params: &Params) -> Result<Zone, Failure> {
        let mut root = Host {
            id: self.next_id(),
            name: String::new(),
            is_urlforward: false,
            default: None,
            records: Vec::new(),
        };
        for ns in params.all("ns") {
            let record = self.plain_record("NS", ns, false);
            root.records.push(record);
        }
        if let Some(mx) = params.get("default_mx") {
            let mut record = self.plain_record("MX", mx.to_string(), false);
            record.extra.insert("priority".into(), "10".into());
            root.records.push(record);
        }

        let mut zone = Zone {
            rname: params.get("rname").map(str::to_string),
            ..Zone::default()
        };
        zone.hosts.insert(String::new(), root);

        if let Some(target) = params.get("primary_wildcard") {
            let qtype = params.get("primary_wildcard_qtype").unwrap_or("A");
            if qtype != "A" && qtype != "CNAME" {
                return Err(Failure::bad_request(format!(
                    "Invalid primary_wildcard_qtype '{qtype}'"
                )));
            }
            validate_rdata(qtype, target)?;
            let record = self.plain_record(qtype, target.to_string(), true);
            let host = Host {
                id: self.next_id(),
                name: "*".into(),
                is_urlforward: false,
                default: None,
                records: vec![record],
            };
            zone.hosts.insert("*".into(), host);
        }
        Ok(zone)
    }

    fn plain_record(&mut self, rr_type: &str, rdata: String, is_wildcard: bool) -> Record {
        Record {
            id: self.next_id(),
            rr_type: rr_type.to_string(),
            rdata,
            ttl: DEFAULT_TTL,
            is_wildcard,
            extra: BTreeMap::new(),
        }
    }
}

fn search_term(params: &Params) -> String {
    params.get("search_term").unwrap_or_default().to_lowercase()
}

fn parse_mode(raw: &str) -> Result<&'static str, Failure> {
    match raw {
        "advanced" => Ok("advanced"),
        "group" => Ok("group"),
        other => Err(Failure::bad_request(format!("Invalid mode '{other}'"))),
    }
}

fn parse_ttl(params: &Params) -> Result<u32, Failure> {
    match params.number::<u32>("ttl")? {
        None => Ok(DEFAULT_TTL),
        Some(ttl) if (1..=65535).contains(&ttl) => Ok(ttl),
        Some(ttl) => Err(Failure::bad_request(format!(
            "TTL {ttl} is outside 1..65535"
        ))),
    }
}

fn validate_rdata(rr_type: &str, rdata: &str) -> Result<(), Failure> {
    if !RECORD_TYPES.contains(&rr_type) {
        return Err(Failure::bad_request(format!("Unsupported record type '{rr_type}'")));
    }
    let valid = match rr_type {
        "A" => rdata.parse::<Ipv4Addr>().is_ok(),
        "AAAA" => rdata.parse::<Ipv6Addr>().is_ok(),
        _ => !rdata.is_empty(),
    };
    if valid {
        Ok(())
    } else {
        Err(Failure::bad_request(format!(
            "'{rdata}' is not valid data for a {rr_type} record"
        )))
    }
}

/// Country, region and city, where region needs a country and city a region.
fn geo_fields(params: &Params, country_key: &str) -> Result<Vec<(String, String)>, Failure> {
    let mut fields = Vec::new();
    let Some(code) = params.get(country_key) else {
        if params.get("region").is_some() || params.get("city").is_some() {
            return Err(Failure::bad_request("'region' and 'city' require a country"));
        }
        return Ok(fields);
    };
    let country = geo::find_country(code)
        .ok_or_else(|| Failure::not_found(format!("Unknown country '{code}'")))?;
    fields.push(("country".to_string(), country.iso_code.to_string()));
    match (params.get("region"), params.get("city")) {
        (None, Some(_)) => return Err(Failure::bad_request("'city' requires a 'region'")),
        (region, city) => {
            if let Some(region) = region {
                fields.push(("region".to_string(), region.to_string()));
            }
            if let Some(city) = city {
                fields.push(("city".to_string(), city.to_string()));
            }
        }
    }
    Ok(fields)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Reply {
    serde_json::to_value(value)
        .map_err(|e| Failure::bad_request(format!("Failed to encode reply: {e}")))
}

fn unknown_domain(name: &str) -> Failure {
    Failure::not_found(format!("Unknown domain '{name}'"))
}

fn unknown_group(name: &str) -> Failure {
    Failure::not_found(format!("Unknown group '{name}'"))
}

fn unknown_host(name: &str) -> Failure {
    Failure::not_found(format!("Unknown hostname '{name}'"))
}

fn unknown_record(id: u64) -> Failure {
    Failure::not_found(format!("Unknown record {id}"))
}
