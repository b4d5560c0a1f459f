//! End-to-end reconciliation tests against the in-memory API:
//! populate, pagination, planning, and apply as one pipeline.

mod common;

use std::collections::BTreeSet;

use common::MockApi;

use azion_dns_sync::{
    plan, ApplyPolicy, AzionAdapter, CanonicalRecord, Change, MxValue, RecordData, RecordType,
    RunContext, Zone, RECORDS_PAGE_SIZE,
};

fn a(fqdn: &str, ttl: u32, addresses: &[&str]) -> CanonicalRecord {
    CanonicalRecord {
        fqdn: fqdn.to_string(),
        ttl,
        data: RecordData::A {
            addresses: addresses.iter().map(|s| (*s).to_string()).collect(),
        },
    }
}

#[tokio::test]
async fn populate_reads_seeded_zone() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    api.add_record(zone_id, "www", "A", 300, &["1.2.3.4", "5.6.7.8"]);
    api.add_record(zone_id, "@", "MX", 3600, &["10 mail.example.com"]);

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();
    let mut zone = Zone::new("example.com.");

    let exists = adapter.populate(&mut zone, &mut ctx).await.unwrap();
    assert!(exists);
    assert_eq!(zone.records.len(), 2);

    let mx = zone
        .records
        .iter()
        .find(|r| r.record_type() == RecordType::Mx)
        .unwrap();
    assert_eq!(mx.fqdn, "example.com.");
    assert_eq!(
        mx.data,
        RecordData::MX {
            values: vec![MxValue {
                priority: 10,
                exchange: "mail.example.com.".to_string(),
            }],
        }
    );
}

#[tokio::test]
async fn populate_missing_zone_reports_not_existing() {
    let adapter = AzionAdapter::new(MockApi::new());
    let mut ctx = RunContext::new();
    let mut zone = Zone::new("absent.example.com.");

    let exists = adapter.populate(&mut zone, &mut ctx).await.unwrap();
    assert!(!exists);
    assert!(zone.records.is_empty());
}

#[tokio::test]
async fn fetch_paginates_250_rows_in_three_pages() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    for i in 0..250 {
        api.add_record(zone_id, &format!("host-{i:03}"), "A", 300, &["10.0.0.1"]);
    }

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();
    let fetched = adapter.fetch("example.com.", &mut ctx).await.unwrap();

    assert_eq!(fetched.len(), 250);
    let keys: BTreeSet<String> = fetched
        .iter()
        .map(|f| f.canonical.fqdn.clone())
        .collect();
    assert_eq!(keys.len(), 250, "duplicate or missing keys after merge");

    let calls = adapter.api().record_list_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(_, _, size)| *size == RECORDS_PAGE_SIZE));
    assert_eq!(
        calls.iter().map(|(_, page, _)| *page).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn rows_split_across_pages_merge_into_one_record() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    // 99 fillers push the second "www" row onto page two.
    for i in 0..99 {
        api.add_record(zone_id, &format!("filler-{i:02}"), "A", 300, &["10.0.0.1"]);
    }
    api.add_record(zone_id, "www", "A", 300, &["1.1.1.1"]);
    api.add_record(zone_id, "www", "A", 300, &["2.2.2.2"]);

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();
    let fetched = adapter.fetch("example.com.", &mut ctx).await.unwrap();

    let www = fetched
        .iter()
        .find(|f| f.canonical.fqdn == "www.example.com.")
        .unwrap();
    assert_eq!(www.record_ids.len(), 2);
    assert_eq!(
        www.canonical.data,
        RecordData::A {
            addresses: vec!["1.1.1.1".to_string(), "2.2.2.2".to_string()],
        }
    );
}

#[tokio::test]
async fn apply_to_fresh_account_creates_zone_with_both_names() {
    let adapter = AzionAdapter::new(MockApi::new());
    let mut ctx = RunContext::new();
    let changes = vec![Change::Create(a("www.example.com.", 300, &["1.2.3.4"]))];

    let report = adapter
        .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
        .await
        .unwrap();
    assert!(report.is_success());

    let creates = adapter.api().zone_create_calls.lock().unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].name, "example.com");
    assert_eq!(creates[0].domain, "example.com");
    assert!(creates[0].is_active);
}

#[tokio::test]
async fn full_reconcile_converges_to_desired_state() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    api.add_record(zone_id, "www", "A", 300, &["1.2.3.4"]);
    api.add_record(zone_id, "old", "A", 300, &["9.9.9.9"]);
    api.add_record(zone_id, "@", "TXT", 300, &["\"v=spf1 ~all\""]);

    let desired = vec![
        a("www.example.com.", 600, &["1.2.3.4"]),
        a("new.example.com.", 300, &["5.5.5.5"]),
        CanonicalRecord {
            fqdn: "example.com.".to_string(),
            ttl: 300,
            data: RecordData::TXT {
                texts: vec!["v=spf1 ~all".to_string()],
            },
        },
    ];

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();

    let existing = adapter.fetch("example.com.", &mut ctx).await.unwrap();
    let changes = plan(existing, desired.clone());
    // www TTL update, new create, old delete; TXT untouched.
    assert_eq!(changes.len(), 3);

    let report = adapter
        .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
        .await
        .unwrap();
    assert_eq!(report.applied, 3);

    // Fetching again must show the desired state and an empty follow-up plan.
    let after = adapter.fetch("example.com.", &mut ctx).await.unwrap();
    assert_eq!(after.len(), 3);
    assert!(plan(after, desired).is_empty());
}

#[tokio::test]
async fn alias_round_trips_as_aname_on_the_wire() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    api.add_record(zone_id, "cdn", "ANAME", 300, &["edge.azion.net"]);

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();
    let mut zone = Zone::new("example.com.");
    adapter.populate(&mut zone, &mut ctx).await.unwrap();

    assert_eq!(
        zone.records[0].data,
        RecordData::ALIAS {
            target: "edge.azion.net.".to_string(),
        }
    );

    // Writing it back submits the vendor type name again.
    let changes = vec![Change::Create(CanonicalRecord {
        fqdn: "cdn2.example.com.".to_string(),
        ttl: 300,
        data: RecordData::ALIAS {
            target: "edge.azion.net.".to_string(),
        },
    })];
    adapter
        .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
        .await
        .unwrap();

    let rows = adapter.api().rows(zone_id);
    let created = rows.iter().find(|r| r.entry == "cdn2").unwrap();
    assert_eq!(created.record_type, "ANAME");
    assert_eq!(created.answers_list, vec!["edge.azion.net"]);
}

#[tokio::test]
async fn apex_records_use_at_entry_on_the_wire() {
    let adapter = AzionAdapter::new(MockApi::new());
    let mut ctx = RunContext::new();
    let changes = vec![Change::Create(a("example.com.", 300, &["1.2.3.4"]))];

    adapter
        .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
        .await
        .unwrap();

    let zone_id = adapter.api().zone_id("example.com").unwrap();
    let rows = adapter.api().rows(zone_id);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entry, "@");

    // And it reads back as the apex fqdn.
    let mut zone = Zone::new("example.com.");
    adapter.populate(&mut zone, &mut ctx).await.unwrap();
    assert_eq!(zone.records[0].fqdn, "example.com.");
}

#[tokio::test]
async fn multi_value_record_creates_one_row_per_value() {
    let adapter = AzionAdapter::new(MockApi::new());
    let mut ctx = RunContext::new();
    let changes = vec![Change::Create(a(
        "www.example.com.",
        300,
        &["1.1.1.1", "2.2.2.2", "3.3.3.3"],
    ))];

    adapter
        .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
        .await
        .unwrap();

    let zone_id = adapter.api().zone_id("example.com").unwrap();
    let rows = adapter.api().rows(zone_id);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.entry == "www" && r.record_type == "A"));
}

#[tokio::test]
async fn remote_answer_order_does_not_trigger_changes() {
    let api = MockApi::new();
    let zone_id = api.add_zone("example.com");
    api.add_record(zone_id, "www", "A", 300, &["2.2.2.2"]);
    api.add_record(zone_id, "www", "A", 300, &["1.1.1.1"]);

    let adapter = AzionAdapter::new(api);
    let mut ctx = RunContext::new();
    let existing = adapter.fetch("example.com.", &mut ctx).await.unwrap();
    let desired = vec![a("www.example.com.", 300, &["1.1.1.1", "2.2.2.2"])];

    assert!(plan(existing, desired).is_empty());
}
