//! Resource record creation, update and removal.
//!
//! Every record type goes through `createRRData`; the typed helpers below
//! only pick the `RecordSpec` variant.

use crate::client::{ApiResult, DnsClient};
use crate::http::Transport;
use crate::query::Query;
use crate::types::{RecordOptions, RecordSpec, RecordTarget, RecordUpdate};

/// Create one record of any type under `target`/`host`.
pub fn create_record<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    spec: &RecordSpec,
    options: &RecordOptions,
) -> ApiResult {
    let query = client
        .query("createRRData")
        .push_target(target)
        .push("host", host)
        .push("type", spec.record_type().as_str())
        .push_flag("is_wildcard", options.wildcard)
        .push("rdata", spec.rdata());
    let query = push_type_fields(query, spec);
    let geo = &options.geo;
    client.run(
        &query
            .push_opt("geoGroup", geo.geo_group.as_deref())
            .push_opt("country_iso2", geo.country_iso2.as_deref())
            .push_opt("region", geo.region.as_deref())
            .push_opt("city", geo.city.as_deref())
            .push_display_opt("ttl", options.ttl),
    )
}

fn push_type_fields(query: Query, spec: &RecordSpec) -> Query {
    match spec {
        RecordSpec::Mx { priority, .. } => query.push_display("priority", priority),
        RecordSpec::Srv {
            weight,
            priority,
            port,
            ..
        } => query
            .push_display("weight", weight)
            .push_display("port", port)
            .push_display("priority", priority),
        RecordSpec::Soa {
            retry,
            expire,
            minimum,
            ..
        } => query
            .push_display_opt("retry", *retry)
            .push_display_opt("expire", *expire)
            .push_display_opt("minimum", *minimum),
        RecordSpec::UrlFrame {
            title,
            description,
            keywords,
            ..
        } => query
            .push_opt("title", title.as_deref())
            .push_opt("keywords", keywords.as_deref())
            .push_opt("description", description.as_deref()),
        _ => query,
    }
}

macro_rules! simple_record_fn {
    ($(#[$doc:meta])* $name:ident, $variant:ident) => {
        $(#[$doc])*
        pub fn $name<T: Transport>(
            client: &DnsClient<T>,
            target: &RecordTarget,
            host: &str,
            rdata: &str,
            options: &RecordOptions,
        ) -> ApiResult {
            let spec = RecordSpec::$variant {
                rdata: rdata.to_string(),
            };
            create_record(client, target, host, &spec, options)
        }
    };
}

simple_record_fn!(
    /// IPv4 address record.
    create_a_record, A
);
simple_record_fn!(
    /// IPv6 address record.
    create_aaaa_record, Aaaa
);
simple_record_fn!(create_cname_record, Cname);
simple_record_fn!(create_ns_record, Ns);
simple_record_fn!(
    /// Free text; encoded like every other value.
    create_txt_record, Txt
);
simple_record_fn!(
    /// Permanent HTTP redirect to `rdata`.
    create_url301_record, Url301
);
simple_record_fn!(
    /// Temporary HTTP redirect to `rdata`.
    create_url302_record, Url302
);

pub fn create_mx_record<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    rdata: &str,
    priority: u16,
    options: &RecordOptions,
) -> ApiResult {
    let spec = RecordSpec::Mx {
        rdata: rdata.to_string(),
        priority,
    };
    create_record(client, target, host, &spec, options)
}

#[allow(clippy::too_many_arguments)]
pub fn create_srv_record<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    rdata: &str,
    weight: u16,
    priority: u16,
    port: u16,
    options: &RecordOptions,
) -> ApiResult {
    let spec = RecordSpec::Srv {
        rdata: rdata.to_string(),
        weight,
        priority,
        port,
    };
    create_record(client, target, host, &spec, options)
}

/// SOA timers left as `None` take the server defaults.
#[allow(clippy::too_many_arguments)]
pub fn create_soa_record<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    rdata: &str,
    retry: Option<u32>,
    expire: Option<u32>,
    minimum: Option<u32>,
    options: &RecordOptions,
) -> ApiResult {
    let spec = RecordSpec::Soa {
        rdata: rdata.to_string(),
        retry,
        expire,
        minimum,
    };
    create_record(client, target, host, &spec, options)
}

/// Serve `rdata` inside a frame, with the given page metadata.
#[allow(clippy::too_many_arguments)]
pub fn create_url_frame_record<T: Transport>(
    client: &DnsClient<T>,
    target: &RecordTarget,
    host: &str,
    rdata: &str,
    title: Option<&str>,
    description: Option<&str>,
    keywords: Option<&str>,
    options: &RecordOptions,
) -> ApiResult {
    let spec = RecordSpec::UrlFrame {
        rdata: rdata.to_string(),
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        keywords: keywords.map(str::to_string),
    };
    create_record(client, target, host, &spec, options)
}

pub fn remove_rr<T: Transport>(client: &DnsClient<T>, rr_id: u64, confirm: bool) -> ApiResult {
    client.run(
        &client
            .query("removeRR")
            .push_display("rr_id", rr_id)
            .push_flag("confirm", confirm),
    )
}

/// Change an existing record. Region is only sent alongside a country, and
/// city only alongside a region.
pub fn update_rr_data<T: Transport>(
    client: &DnsClient<T>,
    rr_id: u64,
    update: &RecordUpdate,
) -> ApiResult {
    let mut query = client
        .query("updateRRData")
        .push_display("rr_id", rr_id)
        .push("rdata", &update.rdata)
        .push_display_opt("ttl", update.ttl)
        .push_display_opt("priority", update.priority)
        .push_flag("is_wildcard", update.wildcard)
        .push_display_opt("retry", update.retry)
        .push_display_opt("expire", update.expire)
        .push_display_opt("minimum", update.minimum)
        .push_display_opt("weight", update.weight)
        .push_display_opt("port", update.port)
        .push_opt("geoGroup", update.geo_group.as_deref());

    if let Some(country) = update.country.as_deref() {
        query = query.push("country", country);
        if let Some(region) = update.region.as_deref() {
            query = query.push("region", region);
            query = query.push_opt("city", update.city.as_deref());
        }
    }

    client.run(
        &query
            .push_opt("title", update.title.as_deref())
            .push_opt("keywords", update.keywords.as_deref())
            .push_opt("description", update.description.as_deref()),
    )
}
