use axum::http::StatusCode;
use cms_api::models::Content;
use cms_api::pagination::paginate;
use cms_api::validation::{MAX_LIMIT, MIN_LIMIT, RawParams, validate};
use proptest::prelude::*;
use serde_json::Value;

mod common;

use common::server_utils::create_seeded_server;
use common::test_utils::{base_time, sample_content};

// Items whose creation hours collide often, so ordering relies on the id tie-break
prop_compose! {
    fn arb_contents()(
        hours in prop::collection::vec(0i64..6, 1..25),
    ) -> Vec<Content> {
        hours
            .into_iter()
            .enumerate()
            .map(|(n, hour)| {
                let mut content = sample_content(n as i64);
                content.created_at = base_time() + chrono::Duration::hours(hour);
                content.updated_at = content.created_at;
                content
            })
            .collect()
    }
}

fn raw(key: &str, value: String) -> RawParams {
    [(key.to_string(), value)].into_iter().collect()
}

#[cfg(test)]
mod properties {
    use super::*;

    proptest! {
        #[test]
        fn limit_accepted_exactly_within_bounds(limit in -50i64..250) {
            let result = validate(&raw("limit", limit.to_string()));
            let in_bounds = (i64::from(MIN_LIMIT)..=i64::from(MAX_LIMIT)).contains(&limit);

            prop_assert_eq!(result.is_ok(), in_bounds);
            if let Ok(params) = result {
                prop_assert_eq!(i64::from(params.limit), limit);
            }
        }

        #[test]
        fn non_numeric_offset_is_rejected(offset in "[a-z]{1,8}") {
            let errors = validate(&raw("offset", offset.clone())).unwrap_err();
            prop_assert_eq!(errors.fields(), vec!["offset"]);
            prop_assert_eq!(errors.errors()[0].received_value.as_deref(), Some(offset.as_str()));
        }

        #[test]
        fn pagination_formulas_hold(
            total in 0u64..10_000,
            limit in 1u32..=100,
            offset in 0u64..20_000,
        ) {
            let info = paginate(total, limit, offset);
            let per_page = u64::from(limit);

            prop_assert_eq!(info.current_page, offset / per_page + 1);
            prop_assert_eq!(info.total_pages, total.div_ceil(per_page));
            prop_assert_eq!(info.has_prev, info.current_page > 1);
            prop_assert_eq!(info.has_next, info.current_page < info.total_pages);
            prop_assert_eq!(info.prev_page.is_some(), info.has_prev);
            prop_assert_eq!(info.next_page.is_some(), info.has_next);
            prop_assert_eq!(info.total_count, total);
        }

        #[test]
        fn paging_visits_every_item_once(
            items in arb_contents(),
            limit in 1usize..6,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (server, _db) = create_seeded_server(&items);

                let mut seen: Vec<String> = Vec::new();
                let mut offset = 0;
                loop {
                    let response = server
                        .get(&format!("/api/v1/contents?limit={limit}&offset={offset}&order=asc"))
                        .await;
                    prop_assert_eq!(response.status_code(), StatusCode::OK);

                    let body: Value = response.json();
                    let page = body["data"]["contents"].as_array().unwrap();
                    prop_assert!(page.len() <= limit);
                    prop_assert_eq!(
                        body["data"]["pagination"]["totalCount"].as_u64().unwrap(),
                        items.len() as u64
                    );

                    seen.extend(page.iter().map(|item| item["id"].as_str().unwrap().to_string()));

                    if !body["data"]["pagination"]["hasNext"].as_bool().unwrap() {
                        break;
                    }
                    offset += limit;
                }

                let mut expected = items.clone();
                expected.sort_by(|a, b| {
                    a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
                });
                let expected: Vec<String> = expected.into_iter().map(|c| c.id).collect();
                prop_assert_eq!(seen, expected);

                Ok(())
            }).expect("Async proptest should not fail")
        }

        #[test]
        fn repeated_list_is_identical(
            items in arb_contents(),
            limit in 1u32..10,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (server, _db) = create_seeded_server(&items);
                let path = format!("/api/v1/contents?limit={limit}&sort=updatedAt");

                let first: Value = server.get(&path).await.json();
                let second: Value = server.get(&path).await.json();
                prop_assert_eq!(&first["data"], &second["data"]);

                Ok(())
            }).expect("Async proptest should not fail")
        }
    }
}
