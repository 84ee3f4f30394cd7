use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc, Mutex,
		atomic::{AtomicI64, AtomicUsize, Ordering},
	},
	time::Duration,
};

use serde_json::Value;

use itemdex_config::{Config, Index, ObjectStore as ObjectStoreConfig, Postgres};
use itemdex_domain::{FilterSpec, ItemDoc};
use itemdex_service::{BoxFuture, Error, ItemService, ObjectStore, RowStore, SearchIndex};
use itemdex_storage::{es::SearchResponse, models::ItemRow, object::ItemObject};

#[derive(Default)]
struct FakeIndex {
	hits: Vec<String>,
	total: i64,
	fail_search: bool,
	fail_bulk: bool,
	docs: Mutex<HashMap<String, Value>>,
	refreshes: AtomicUsize,
	last_body: Mutex<Option<Value>>,
}
impl SearchIndex for FakeIndex {
	fn search<'a>(
		&'a self,
		_index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<SearchResponse>> {
		Box::pin(async move {
			if self.fail_search {
				return Err(itemdex_storage::Error::Status {
					status: 503,
					body: "unavailable".to_string(),
				});
			}

			*self.last_body.lock().expect("lock last body") = Some(body.clone());

			let from = body["from"].as_i64().unwrap_or(0).max(0) as usize;
			let size = body["size"].as_i64().unwrap_or(10).max(0) as usize;
			let sources = self
				.hits
				.iter()
				.skip(from)
				.take(size)
				.map(|id| serde_json::json!({ "id": id }))
				.collect();

			Ok(SearchResponse { total: self.total, sources })
		})
	}

	fn get<'a>(
		&'a self,
		_index: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, itemdex_storage::Result<Option<Value>>> {
		Box::pin(async move { Ok(self.docs.lock().expect("lock docs").get(id).cloned()) })
	}

	fn put<'a>(
		&'a self,
		_index: &'a str,
		id: Option<&'a str>,
		doc: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<String>> {
		Box::pin(async move {
			let id = id.unwrap_or("generated").to_string();

			self.docs.lock().expect("lock docs").insert(id.clone(), doc.clone());

			Ok(id)
		})
	}

	fn bulk<'a>(
		&'a self,
		_index: &'a str,
		docs: &'a [(String, Value)],
	) -> BoxFuture<'a, itemdex_storage::Result<bool>> {
		Box::pin(async move {
			if self.fail_bulk {
				return Ok(false);
			}

			let mut stored = self.docs.lock().expect("lock docs");

			for (id, doc) in docs {
				stored.insert(id.clone(), doc.clone());
			}

			Ok(true)
		})
	}

	fn refresh<'a>(&'a self, _index: &'a str) -> BoxFuture<'a, itemdex_storage::Result<()>> {
		Box::pin(async move {
			self.refreshes.fetch_add(1, Ordering::SeqCst);

			Ok(())
		})
	}
}

#[derive(Default)]
struct FakeRows {
	rows: Vec<ItemRow>,
	fail: bool,
	requested: Mutex<Vec<Vec<String>>>,
}
impl RowStore for FakeRows {
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
	) -> BoxFuture<'a, itemdex_storage::Result<Vec<ItemRow>>> {
		Box::pin(async move {
			if self.fail {
				return Err(itemdex_storage::Error::Sqlx(sqlx::Error::PoolClosed));
			}

			self.requested.lock().expect("lock requested").push(ids.to_vec());

			let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();

			Ok(self
				.rows
				.iter()
				.filter(|row| wanted.contains(row.id.as_str()))
				.cloned()
				.collect())
		})
	}
}

#[derive(Default)]
struct FakeObjects {
	known: HashSet<String>,
	in_flight: AtomicI64,
	max_in_flight: AtomicI64,
}
impl ObjectStore for FakeObjects {
	fn get<'a>(
		&'a self,
		id: &'a str,
	) -> BoxFuture<'a, itemdex_storage::Result<Option<ItemObject>>> {
		Box::pin(async move {
			let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

			self.max_in_flight.fetch_max(current, Ordering::SeqCst);
			tokio::time::sleep(Duration::from_millis(5)).await;
			self.in_flight.fetch_sub(1, Ordering::SeqCst);

			if self.known.contains(id) {
				Ok(Some(ItemObject { id: id.to_string(), content_type: None, bytes: vec![1] }))
			} else {
				Ok(None)
			}
		})
	}
}

fn test_config(reserved_word_search: bool) -> Config {
	Config {
		index: Index {
			url: "http://localhost:9200".to_string(),
			api_key: String::new(),
			api_key_id: String::new(),
			item_index: "item".to_string(),
			record_index: "search-record".to_string(),
			reserved_word_search,
			timeout_ms: 1_000,
		},
		postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		object_store: ObjectStoreConfig {
			url: "http://localhost:9000".to_string(),
			timeout_ms: 1_000,
		},
	}
}

fn service(index: Arc<FakeIndex>, rows: Arc<FakeRows>, objects: Arc<FakeObjects>) -> ItemService {
	ItemService::with_backends(test_config(false), index, rows, objects)
}

fn row(id: &str) -> ItemRow {
	ItemRow {
		id: id.to_string(),
		content: Some(r#"{"questions":[{"stem":"q"}],"questionCount":1}"#.to_string()),
		subject_ids: Some("MATH".to_string()),
		..ItemRow::default()
	}
}

fn paged_spec(page_number: i64, page_size: i64) -> FilterSpec {
	FilterSpec {
		page_number,
		page_size,
		subject_id: Some("MATH".to_string()),
		..FilterSpec::default()
	}
}

#[tokio::test]
async fn index_failure_soft_fails_to_none() {
	let index = Arc::new(FakeIndex { fail_search: true, ..FakeIndex::default() });
	let svc = service(index, Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let result = svc.search(&paged_spec(1, 10)).await.expect("search");

	assert!(result.is_none());
}

#[tokio::test]
async fn zero_hits_soft_fail_to_none() {
	let index = Arc::new(FakeIndex { total: 0, ..FakeIndex::default() });
	let svc = service(index, Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));

	assert!(svc.search(&paged_spec(1, 10)).await.expect("search").is_none());
}

#[tokio::test]
async fn relational_failure_propagates() {
	let index = Arc::new(FakeIndex {
		hits: vec!["A".to_string()],
		total: 1,
		..FakeIndex::default()
	});
	let rows = Arc::new(FakeRows { fail: true, ..FakeRows::default() });
	let svc = service(index, rows, Arc::new(FakeObjects::default()));

	assert!(matches!(svc.search(&paged_spec(1, 10)).await, Err(Error::Storage { .. })));
}

#[tokio::test]
async fn paged_search_assembles_the_requested_page() {
	let ids = ["A", "B", "C", "D", "E"];
	let index = Arc::new(FakeIndex {
		hits: ids.iter().map(|id| id.to_string()).collect(),
		total: 5,
		..FakeIndex::default()
	});
	let rows =
		Arc::new(FakeRows { rows: ids.iter().map(|id| row(id)).collect(), ..FakeRows::default() });
	let svc = service(index, rows, Arc::new(FakeObjects::default()));
	let paged = svc.search(&paged_spec(2, 2)).await.expect("search").expect("page");
	let content_ids: Vec<&str> = paged.content.iter().map(|item| item.id.as_str()).collect();

	assert_eq!(content_ids, vec!["C", "D"]);
	assert_eq!(paged.number, 2);
	assert_eq!(paged.number_of_elements, 2);
	assert_eq!(paged.total_elements, 5);
	assert_eq!(paged.total_pages, 3);
	assert!(paged.has_content);
	assert!(paged.has_next_page);
	assert!(!paged.is_last_page);
}

#[tokio::test]
async fn input_order_regime_reorders_and_fetches_only_the_window() {
	let index = Arc::new(FakeIndex {
		hits: vec!["A".to_string(), "B".to_string(), "C".to_string()],
		total: 3,
		..FakeIndex::default()
	});
	let rows = Arc::new(FakeRows {
		rows: vec![row("A"), row("B"), row("C")],
		..FakeRows::default()
	});
	let svc = service(index.clone(), rows.clone(), Arc::new(FakeObjects::default()));
	let spec = FilterSpec {
		page_number: 1,
		page_size: 2,
		sort_field: Some("inputId".to_string()),
		ids: Some(vec!["C".to_string(), "A".to_string(), "B".to_string()]),
		..FilterSpec::default()
	};
	let paged = svc.search(&spec).await.expect("search").expect("page");
	let content_ids: Vec<&str> = paged.content.iter().map(|item| item.id.as_str()).collect();

	assert_eq!(content_ids, vec!["C", "A"]);
	assert_eq!(paged.total_elements, 3);

	// Only the page window reaches the relational store.
	let requested = rows.requested.lock().expect("lock requested");

	assert_eq!(*requested, vec![vec!["C".to_string(), "A".to_string()]]);

	// The index query covers the whole id list, not the page window.
	let body = index.last_body.lock().expect("lock last body").clone().expect("body");

	assert_eq!(body["from"], 0);
	assert_eq!(body["size"], 3);
	assert!(body.get("sort").is_none());
}

#[tokio::test]
async fn search_ids_requests_the_unpaged_id_projection() {
	let index = Arc::new(FakeIndex {
		hits: vec!["A".to_string(), "B".to_string()],
		total: 2,
		..FakeIndex::default()
	});
	let svc = service(index.clone(), Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let (ids, total) = svc.search_ids(&paged_spec(1, 10)).await;

	assert_eq!(ids, vec!["A".to_string(), "B".to_string()]);
	assert_eq!(total, 2);

	let body = index.last_body.lock().expect("lock last body").clone().expect("body");

	assert_eq!(body["from"], 0);
	assert_eq!(body["size"], i64::from(i32::MAX));
	assert_eq!(body["_source"][0], "id");
}

#[tokio::test]
async fn search_ids_soft_fails_to_empty() {
	let index = Arc::new(FakeIndex { fail_search: true, ..FakeIndex::default() });
	let svc = service(index, Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let (ids, total) = svc.search_ids(&paged_spec(1, 10)).await;

	assert!(ids.is_empty());
	assert_eq!(total, 0);
}

#[tokio::test]
async fn reserved_word_escaping_gates_on_config() {
	let index = Arc::new(FakeIndex { total: 0, ..FakeIndex::default() });
	let svc = ItemService::with_backends(
		test_config(true),
		index.clone(),
		Arc::new(FakeRows::default()),
		Arc::new(FakeObjects::default()),
	);
	let spec = FilterSpec {
		page_number: 1,
		page_size: 10,
		search_texts: Some(vec!["x+y".to_string()]),
		..FilterSpec::default()
	};

	svc.search(&spec).await.expect("search");

	let body = index.last_body.lock().expect("lock last body").clone().expect("body");

	assert!(body.to_string().contains("x＋y"));
	// The caller's spec is untouched.
	assert_eq!(spec.search_texts.as_deref(), Some(&["x+y".to_string()][..]));
}

#[tokio::test]
async fn saved_search_round_trips_every_populated_field() {
	let index = Arc::new(FakeIndex::default());
	let svc = service(index.clone(), Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let spec = FilterSpec {
		page_number: 2,
		page_size: 25,
		sort_field: Some("createdOn".to_string()),
		ascending: true,
		subject_id: Some("MATH".to_string()),
		item_years: Some(vec!["2023".to_string()]),
		ne_lesson_ids: Some(vec!["L1".to_string()]),
		must_search_texts: Some(vec!["force".to_string()]),
		product_status: Some("off_shelf".to_string()),
		has_solution: Some(false),
		..FilterSpec::default()
	};
	let id = svc.save_search(&spec).await.expect("record id");
	let loaded = svc.load_search(&id).await.expect("loaded spec");

	assert_eq!(loaded, spec);
	assert!(index.refreshes.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn load_search_missing_record_is_none() {
	let svc = service(
		Arc::new(FakeIndex::default()),
		Arc::new(FakeRows::default()),
		Arc::new(FakeObjects::default()),
	);

	assert!(svc.load_search("no-such-record").await.is_none());
}

#[tokio::test]
async fn upsert_writes_under_the_document_id() {
	let index = Arc::new(FakeIndex::default());
	let svc = service(index.clone(), Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let doc = ItemDoc { id: "A".to_string(), ..ItemDoc::default() };

	assert!(svc.upsert(doc).await);
	assert!(index.docs.lock().expect("lock docs").contains_key("A"));
}

#[tokio::test]
async fn bulk_upsert_collapses_failures_to_false() {
	let failing = Arc::new(FakeIndex { fail_bulk: true, ..FakeIndex::default() });
	let svc = service(failing, Arc::new(FakeRows::default()), Arc::new(FakeObjects::default()));
	let docs = vec![ItemDoc { id: "A".to_string(), ..ItemDoc::default() }];

	assert!(!svc.bulk_upsert(docs).await);
}

#[tokio::test]
async fn bulk_upsert_rejects_an_empty_batch() {
	let svc = service(
		Arc::new(FakeIndex::default()),
		Arc::new(FakeRows::default()),
		Arc::new(FakeObjects::default()),
	);

	assert!(!svc.bulk_upsert(Vec::new()).await);
}

#[tokio::test]
async fn fetch_objects_bounds_concurrency_and_preserves_order() {
	let ids: Vec<String> = (0..45).map(|n| format!("obj-{n}")).collect();
	let known: HashSet<String> = ids.iter().filter(|id| *id != "obj-7").cloned().collect();
	let objects = Arc::new(FakeObjects { known, ..FakeObjects::default() });
	let svc = service(Arc::new(FakeIndex::default()), Arc::new(FakeRows::default()), objects.clone());
	let fetched = svc.fetch_objects(&ids).await.expect("fetch");

	assert_eq!(fetched.len(), 45);
	assert!(fetched[7].is_none());
	assert_eq!(fetched[8].as_ref().map(|object| object.id.as_str()), Some("obj-8"));

	let max = objects.max_in_flight.load(Ordering::SeqCst);

	assert!(max >= 1);
	assert!(max <= 20);
}
