//! Vendor payload to canonical model mapping tests

use crate::platform::bugcrowd::parse_engagements_page;
use crate::platform::hackerone::parse_program_detail;
use crate::platform::intigriti;

#[test]
fn test_hackerone_program_detail_maps_structured_scopes() {
    let body = r#"{
        "data": {
            "id": "1337",
            "type": "program",
            "attributes": {
                "handle": "acme",
                "state": "public_mode",
                "submission_state": "open"
            },
            "relationships": {
                "structured_scopes": {
                    "data": [
                        {
                            "attributes": {
                                "asset_identifier": "*.acme.com",
                                "asset_type": "URL",
                                "eligible_for_submission": true
                            }
                        },
                        {
                            "attributes": {
                                "asset_identifier": "legacy.acme.com",
                                "asset_type": "URL",
                                "eligible_for_submission": false
                            }
                        }
                    ]
                }
            }
        }
    }"#;

    let program = parse_program_detail(body).unwrap();
    assert_eq!(program.name(), "acme");
    assert_eq!(program.platform(), "hackerone");
    assert!(!program.is_private());
    assert_eq!(program.extra_data(), Some("open"));
    assert_eq!(program.scope_count(), 2);

    let wildcard = program.scopes().find(|s| s.value() == "*.acme.com").unwrap();
    assert_eq!(wildcard.kind(), "url");
    assert!(wildcard.in_scope());

    let legacy = program
        .scopes()
        .find(|s| s.value() == "legacy.acme.com")
        .unwrap();
    assert!(legacy.out_of_scope());
}

#[test]
fn test_hackerone_soft_launched_is_private() {
    let body = r#"{
        "data": {
            "attributes": { "handle": "stealth", "state": "soft_launched" },
            "relationships": {}
        }
    }"#;

    let program = parse_program_detail(body).unwrap();
    assert!(program.is_private());
    assert_eq!(program.scope_count(), 0);
}

#[test]
fn test_hackerone_malformed_payload_is_parse_error() {
    let err = parse_program_detail(r#"{"data": {"attributes": {}}}"#).unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[test]
fn test_bugcrowd_engagements_map_target_groups() {
    let body = r#"{
        "engagements": [
            {
                "name": "Acme Corp",
                "access_status": "open",
                "target_groups": [
                    {
                        "in_scope": true,
                        "targets": [
                            { "name": "app.acme.com", "category": "Website" },
                            { "name": "com.acme.app", "category": "Android" }
                        ]
                    },
                    {
                        "in_scope": false,
                        "targets": [
                            { "name": "corp.acme.com", "category": "Website" }
                        ]
                    }
                ]
            }
        ]
    }"#;

    let programs = parse_engagements_page(body).unwrap();
    assert_eq!(programs.len(), 1);

    let program = &programs[0];
    assert_eq!(program.name(), "Acme Corp");
    assert!(!program.is_private());
    assert_eq!(program.scope_count(), 3);

    let out = program
        .scopes()
        .find(|s| s.value() == "corp.acme.com")
        .unwrap();
    assert!(out.out_of_scope());
    assert_eq!(out.kind(), "website");
}

#[test]
fn test_bugcrowd_missing_access_status_is_private() {
    let body = r#"{"engagements": [{"name": "Invite Only", "target_groups": []}]}"#;
    let programs = parse_engagements_page(body).unwrap();
    assert!(programs[0].is_private());
}

#[test]
fn test_bugcrowd_empty_page_ends_pagination() {
    let programs = parse_engagements_page(r#"{"engagements": []}"#).unwrap();
    assert!(programs.is_empty());
}

#[test]
fn test_intigriti_detail_maps_tiers_and_types() {
    let listing = intigriti::parse_program_listing(
        r#"{
            "records": [
                {
                    "id": "abc-123",
                    "handle": "acme",
                    "confidentialityLevel": { "id": 4, "value": "public" }
                }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(listing.len(), 1);

    let detail = r#"{
        "domains": {
            "content": [
                { "endpoint": "*.acme.be", "type": { "id": 1 }, "tier": { "id": 2 } },
                { "endpoint": "com.acme.mobile", "type": { "id": 2 }, "tier": { "id": 3 } },
                { "endpoint": "static.acme.be", "type": { "id": 1 }, "tier": { "id": 5 } }
            ]
        }
    }"#;

    let program = intigriti::parse_program_detail(detail, &listing[0]).unwrap();
    assert_eq!(program.name(), "acme");
    assert!(!program.is_private());
    assert_eq!(program.scope_count(), 3);

    let android = program
        .scopes()
        .find(|s| s.value() == "com.acme.mobile")
        .unwrap();
    assert_eq!(android.kind(), "android");
    assert!(android.in_scope());

    // tier 5 entries are the explicit out-of-scope list
    let out = program
        .scopes()
        .find(|s| s.value() == "static.acme.be")
        .unwrap();
    assert!(out.out_of_scope());
}
