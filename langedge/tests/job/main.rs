use langedge::{Client, Currency, Error, JobRequest, JobStatus, LanguageCode, Tier};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param_is_missing};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Decodes the `data` form field of a POST body as JSON.
fn form_data(request: &Request) -> Option<Value> {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect();
    match pairs.as_slice() {
        [(k, v)] if k == "data" => serde_json::from_str(v).ok(),
        _ => None,
    }
}

/// Matches orders whose first job translates from `.0`.
struct OrderFrom(&'static str);

impl Match for OrderFrom {
    fn matches(&self, request: &Request) -> bool {
        form_data(request).is_some_and(|v| v["jobs"]["job_0"]["lc_src"] == self.0)
    }
}

/// Matches an order body exactly.
struct OrderBody(Value);

impl Match for OrderBody {
    fn matches(&self, request: &Request) -> bool {
        form_data(request).as_ref() == Some(&self.0)
    }
}

fn get_client(server: &MockServer) -> Client {
    Client::builder()
        .public_key("test-public")
        .private_key("test-private")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn job(slug: &str, source: LanguageCode, target: LanguageCode, tier: Tier) -> JobRequest {
    JobRequest::builder()
        .slug(slug)
        .source_text(format!("text of {slug}"))
        .source_lang(source)
        .target_lang(target)
        .tier(tier)
        .auto_approve(false)
        .build()
}

fn order_result(order_id: u64, job_count: u32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "opstat": "ok",
        "response": {
            "order_id": order_id.to_string(),
            "job_count": job_count,
            "credits_used": "1.20",
            "currency": "USD"
        }
    }))
}

fn job_record(id: u64, status: &str) -> Value {
    json!({
        "job_id": id.to_string(),
        "credits": "0.10",
        "eta": 3600,
        "order_id": "9",
        "currency": "USD",
        "ctime": 1500000000,
        "status": status,
        "slug": format!("job {id}"),
        "body_src": "Hello",
        "lc_src": "en",
        "lc_tgt": "ja",
        "tier": "standard",
        "auto_approve": 1,
        "callback_url": "https://example.com/cb",
        "custom_data": "{\"k\":1}",
        "unit_count": "1",
        "position": "0"
    })
}

fn order_status(order_id: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": {
            "order": {
                "order_id": order_id.to_string(),
                "total_credits": "0.30",
                "total_units": "3",
                "total_jobs": "2",
                "currency": "USD",
                "jobs_available": ["22", "21"],
                "jobs_pending": [],
                "jobs_reviewable": [],
                "jobs_approved": [],
                "jobs_revising": [],
                "jobs_queued": "0"
            }
        }
    }))
}

#[tokio::test]
async fn submit_order_test() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    let jobs = vec![
        job("a", LanguageCode::En, LanguageCode::Ja, Tier::Standard),
        JobRequest {
            comment: Some("short".to_owned()),
            force: Some(false),
            ..job("b", LanguageCode::En, LanguageCode::Ja, Tier::Standard)
        },
    ];
    let expected = json!({
        "jobs": {
            "job_0": {
                "job_type": "text", "slug": "a", "body_src": "text of a",
                "lc_src": "en", "lc_tgt": "ja", "tier": "standard", "auto_approve": false
            },
            "job_1": {
                "job_type": "text", "slug": "b", "body_src": "text of b",
                "lc_src": "en", "lc_tgt": "ja", "tier": "standard", "auto_approve": false,
                "comment": "short", "force": false
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/translate/jobs"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("accept", "application/json"))
        .and(OrderBody(expected))
        .and(query_param_is_missing("data"))
        .respond_with(order_result(81, 2))
        .expect(1)
        .mount(&server)
        .await;

    let res = client.submit_order().jobs(&jobs).build().send().await.unwrap();
    assert_eq!(res.order_id, 81);
    assert_eq!(res.job_count, 2);
    assert_eq!(res.credits_used, 1.2);
    assert_eq!(res.currency, Currency::USD);

    // POST requests are signed in the query string too
    let received = server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default().to_owned();
    assert!(query.contains("api_key=test-public"));
    assert!(query.contains("ts="));
    assert!(query.contains("api_sig="));
    let content_length = received[0].headers.get("content-length").unwrap();
    assert_eq!(
        content_length.to_str().unwrap(),
        received[0].body.len().to_string()
    );
}

#[tokio::test]
async fn submit_batch_order_splits_and_collects_in_completion_order() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    let mut jobs = (0..3)
        .map(|i| job(&format!("en{i}"), LanguageCode::En, LanguageCode::Ja, Tier::Pro))
        .collect::<Vec<_>>();
    jobs.extend(
        (0..2).map(|i| job(&format!("ja{i}"), LanguageCode::Ja, LanguageCode::En, Tier::Pro)),
    );

    // the first order is slow, so it finishes last
    Mock::given(method("POST"))
        .and(path("/translate/jobs"))
        .and(OrderFrom("en"))
        .respond_with(order_result(1, 3).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/translate/jobs"))
        .and(OrderFrom("ja"))
        .respond_with(order_result(2, 2))
        .expect(1)
        .mount(&server)
        .await;

    let results = client
        .submit_batch_order()
        .jobs(&jobs)
        .build()
        .send()
        .await
        .unwrap();
    let ids = results.iter().map(|r| r.order_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn submit_batch_order_respects_chunk_size() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    let jobs = (0..5)
        .map(|i| job(&format!("s{i}"), LanguageCode::En, LanguageCode::Ja, Tier::Standard))
        .collect::<Vec<_>>();

    Mock::given(method("POST"))
        .and(path("/translate/jobs"))
        .respond_with(order_result(7, 2))
        .expect(3)
        .mount(&server)
        .await;

    let results = client
        .submit_batch_order()
        .jobs(&jobs)
        .max_chunk_size(2)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(results.len(), 3);

    let mut sizes = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| form_data(r).unwrap()["jobs"].as_object().unwrap().len())
        .collect::<Vec<_>>();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 2, 2]);
}

#[tokio::test]
async fn submit_batch_order_partial_failure() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    let jobs = vec![
        job("a", LanguageCode::En, LanguageCode::Ja, Tier::Standard),
        job("b", LanguageCode::Ja, LanguageCode::En, Tier::Standard),
    ];

    Mock::given(method("POST"))
        .and(OrderFrom("en"))
        .respond_with(order_result(5, 1))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(OrderFrom("ja"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let batch = client.submit_batch_order().jobs(&jobs).build();

    let err = batch.send().await.unwrap_err();
    assert!(matches!(err, Error::RequestAPIFailed { .. }), "{err:?}");

    let settled = batch.send_settled().await.unwrap();
    assert_eq!(settled.len(), 2);
    let ok = settled.iter().filter_map(|r| r.as_ref().ok()).collect::<Vec<_>>();
    assert_eq!(ok.len(), 1);
    assert_eq!(ok[0].order_id, 5);
}

#[tokio::test]
async fn list_order_jobs_test() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    Mock::given(method("GET"))
        .and(path("/translate/order/42"))
        .respond_with(order_status(42))
        .expect(1)
        .mount(&server)
        .await;

    let order = client.list_order_jobs(42).await.unwrap();
    assert_eq!(order.order_id, 42);
    assert_eq!(order.total_credits, 0.3);
    assert_eq!(order.total_units, 3);
    assert_eq!(order.total_jobs, 2);
    assert_eq!(order.jobs_available, vec![22, 21]);
    assert_eq!(order.jobs_queued, 0);
}

#[tokio::test]
async fn batch_list_order_jobs_test() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    Mock::given(method("GET"))
        .and(path("/translate/order/1"))
        .respond_with(order_status(1).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate/order/2"))
        .respond_with(order_status(2))
        .mount(&server)
        .await;

    let orders = client
        .batch_list_order_jobs()
        .order_ids(&[1, 2])
        .build()
        .send()
        .await
        .unwrap();
    let ids = orders.iter().map(|o| o.order_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn list_jobs_keeps_response_order() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    Mock::given(method("GET"))
        .and(path("/translate/jobs/3,1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"jobs": [job_record(1, "available"), job_record(3, "pending")]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = client.list_jobs(&[3, 1]).await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job_id, 1);
    assert_eq!(jobs[0].status, JobStatus::Available);
    assert_eq!(jobs[1].job_id, 3);
    assert_eq!(jobs[1].status, JobStatus::Pending);
    assert!(jobs[0].auto_approve);
    assert_eq!(jobs[0].target_text, None);
    assert_eq!(jobs[0].custom_data.as_deref(), Some("{\"k\":1}"));
    assert_eq!(jobs[0].target_lang, LanguageCode::Ja);
}

#[tokio::test]
async fn list_jobs_unknown_status_is_decode_error() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    Mock::given(method("GET"))
        .and(path("/translate/jobs/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"jobs": [job_record(1, "exploded")]}
        })))
        .mount(&server)
        .await;

    let err = client.list_jobs(&[1]).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn batch_list_order_jobs_partial_failure() {
    let server = MockServer::start().await;
    let client = get_client(&server);
    Mock::given(method("GET"))
        .and(path("/translate/order/1"))
        .respond_with(order_status(1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate/order/2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let batch = client.batch_list_order_jobs().order_ids(&[1, 2]).build();

    let err = batch.send().await.unwrap_err();
    assert!(matches!(err, Error::RequestAPIFailed { .. }), "{err:?}");

    let settled = batch.send_settled().await;
    assert_eq!(settled.len(), 2);
    let ok = settled.iter().filter_map(|r| r.as_ref().ok()).collect::<Vec<_>>();
    assert_eq!(ok.len(), 1);
    assert_eq!(ok[0].order_id, 1);
    assert!(
        settled
            .iter()
            .any(|r| matches!(r, Err(Error::RequestAPIFailed { .. })))
    );
}
