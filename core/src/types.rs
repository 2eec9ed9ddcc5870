//! Request-side DTOs for the management API.
//!
//! # Design
//! Optional parameters are `Option`s; a `None` never reaches the query string.
//! Parameter pairs that only make sense together (a primary wildcard and its
//! query type, a record's owner and whether it is a group) are single values
//! here so they cannot be supplied half-way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owner of hostnames and records: a single domain or a domain group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum RecordTarget {
    Domain(String),
    Group(String),
}

impl RecordTarget {
    pub fn domain(name: impl Into<String>) -> Self {
        Self::Domain(name.into())
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }
}

/// How a domain's zone is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainMode {
    /// Records are managed on the domain itself.
    Advanced,
    /// Records are inherited from a domain group.
    Group,
}

impl DomainMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Advanced => "advanced",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for DomainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record type of a primary-zone wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardType {
    A,
    #[serde(rename = "CNAME")]
    Cname,
}

impl WildcardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
        }
    }
}

/// Wildcard for the primary zone: an IP (A) or a hostname (CNAME).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryWildcard {
    pub target: String,
    pub qtype: WildcardType,
}

/// Zone defaults shared by new domains and new domain groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDefaults {
    /// SOA contact, `admin@example.com.` written as `admin.example.com`.
    #[serde(default)]
    pub rname: Option<String>,
    #[serde(default)]
    pub ns: Vec<String>,
    #[serde(default)]
    pub primary_wildcard: Option<PrimaryWildcard>,
    #[serde(default)]
    pub default_mx: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDomain {
    pub domain: String,
    pub mode: DomainMode,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(flatten)]
    pub defaults: ZoneDefaults,
}

impl NewDomain {
    pub fn new(domain: impl Into<String>, mode: DomainMode) -> Self {
        Self {
            domain: domain.into(),
            mode,
            group: None,
            defaults: ZoneDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDomainGroup {
    pub name: String,
    #[serde(flatten)]
    pub defaults: ZoneDefaults,
}

/// Wire name of a resource record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Soa,
    Srv,
    Txt,
    Url301,
    Url302,
    UrlFrame,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Url301 => "URL301",
            Self::Url302 => "URL302",
            Self::UrlFrame => "URLFrame",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record data, with the extra fields each type needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordSpec {
    #[serde(rename = "A")]
    A { rdata: String },
    #[serde(rename = "AAAA")]
    Aaaa { rdata: String },
    #[serde(rename = "CNAME")]
    Cname { rdata: String },
    #[serde(rename = "NS")]
    Ns { rdata: String },
    #[serde(rename = "TXT")]
    Txt { rdata: String },
    #[serde(rename = "URL301")]
    Url301 { rdata: String },
    #[serde(rename = "URL302")]
    Url302 { rdata: String },
    #[serde(rename = "MX")]
    Mx { rdata: String, priority: u16 },
    #[serde(rename = "SRV")]
    Srv {
        rdata: String,
        weight: u16,
        priority: u16,
        port: u16,
    },
    #[serde(rename = "SOA")]
    Soa {
        rdata: String,
        #[serde(default)]
        retry: Option<u32>,
        #[serde(default)]
        expire: Option<u32>,
        #[serde(default)]
        minimum: Option<u32>,
    },
    #[serde(rename = "URLFrame")]
    UrlFrame {
        rdata: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        keywords: Option<String>,
    },
}

impl RecordSpec {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::Aaaa { .. } => RecordType::Aaaa,
            Self::Cname { .. } => RecordType::Cname,
            Self::Ns { .. } => RecordType::Ns,
            Self::Txt { .. } => RecordType::Txt,
            Self::Url301 { .. } => RecordType::Url301,
            Self::Url302 { .. } => RecordType::Url302,
            Self::Mx { .. } => RecordType::Mx,
            Self::Srv { .. } => RecordType::Srv,
            Self::Soa { .. } => RecordType::Soa,
            Self::UrlFrame { .. } => RecordType::UrlFrame,
        }
    }

    pub fn rdata(&self) -> &str {
        match self {
            Self::A { rdata }
            | Self::Aaaa { rdata }
            | Self::Cname { rdata }
            | Self::Ns { rdata }
            | Self::Txt { rdata }
            | Self::Url301 { rdata }
            | Self::Url302 { rdata }
            | Self::Mx { rdata, .. }
            | Self::Srv { rdata, .. }
            | Self::Soa { rdata, .. }
            | Self::UrlFrame { rdata, .. } => rdata,
        }
    }
}

/// Geo-targeting for a record. Region and city narrow the country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoTarget {
    #[serde(default)]
    pub geo_group: Option<String>,
    #[serde(default)]
    pub country_iso2: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Settings common to every record creation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub geo: GeoTarget,
    /// 1..=65535; `None` lets the server apply its default of 1440.
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Changes applied by `updateRRData`. Only `rdata` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub rdata: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub retry: Option<u32>,
    #[serde(default)]
    pub expire: Option<u32>,
    #[serde(default)]
    pub minimum: Option<u32>,
    #[serde(default)]
    pub weight: Option<u16>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub geo_group: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl RecordUpdate {
    pub fn new(rdata: impl Into<String>) -> Self {
        Self {
            rdata: rdata.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filtering, paging and ordering for the geo lookup lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Matched against codes and names.
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    /// Field to sort by, e.g. `id`, `iso_code`, `name`.
    #[serde(default)]
    pub order_by: Option<String>,
    /// Server default is descending.
    #[serde(default)]
    pub direction: Option<SortDirection>,
}
