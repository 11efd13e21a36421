use std::sync::Arc;

use lvi_app::{RenderedPage, Session, ViewRouter, EMPTY_MESSAGE};
use lvi_core::events::{events, handler_from_fn, Event};
use lvi_core::{PagerCommand, QueryHandle, ViewDescriptor, ViewKey};
use lvi_data::{BatchBuilder, MemoryRegistry};
use lvi_views::BrushRegion;
use parking_lot::Mutex;

fn brands(count: usize) -> arrow::record_batch::RecordBatch {
    let names: Vec<Option<String>> = (1..=count).map(|i| Some(format!("Brand {:03}", i))).collect();
    let ranking: Vec<Option<f64>> = (1..=count).map(|i| Some(1000.0 - i as f64)).collect();
    let optimization: Vec<Option<f64>> = (1..=count).map(|i| Some(40.0 + (i % 7) as f64)).collect();
    let ai: Vec<Option<f64>> = (1..=count).map(|i| Some(30.0 + (i % 5) as f64)).collect();
    let platforms: Vec<Option<&str>> = (1..=count)
        .map(|i| match i % 3 {
            0 => Some("Yelp"),
            1 => Some("Google"),
            _ => None,
        })
        .collect();

    BatchBuilder::new()
        .text("brandname", names)
        .float("ranking_value", ranking)
        .float("optimization_score", optimization)
        .float("ai_overall_score", ai)
        .text("platform_a", platforms)
        .build()
        .unwrap()
}

fn session(registry: MemoryRegistry, names: &[&str]) -> Session {
    let views = names
        .iter()
        .map(|name| ViewDescriptor::new(*name, QueryHandle::new("-")))
        .collect();
    let router = ViewRouter::new(views, Arc::new(registry)).unwrap();
    Session::new(router, 20).unwrap()
}

fn page_of(page: &RenderedPage) -> usize {
    page.as_ready()
        .and_then(|ready| ready.brand_chart.as_ref())
        .map(|brand| brand.pager.page)
        .unwrap()
}

#[test]
fn test_switching_views_restores_page() {
    let registry = MemoryRegistry::new("fixtures")
        .with_result("View A", brands(100))
        .with_result("View B", brands(45));
    let session = session(registry, &["View A", "View B"]);
    let key_a = ViewKey::derive("View A");

    session.activate("View A");
    session.dispatch(&PagerCommand::next(key_a.clone())).unwrap();
    let page = session.dispatch(&PagerCommand::next(key_a.clone())).unwrap();
    assert_eq!(page_of(&page), 3);

    let b = session.activate("View B");
    assert_eq!(page_of(&b), 1);
    assert_eq!(session.active_view().as_deref(), Some("View B"));

    let back = session.activate("View A");
    assert_eq!(page_of(&back), 3);
    let chart = &back.as_ready().unwrap().brand_chart.as_ref().unwrap().chart;
    assert_eq!(chart.title, "Ranking Value (Brands 41–60)");
}

#[test]
fn test_failed_view_leaves_others_usable() {
    let registry = MemoryRegistry::new("fixtures")
        .with_failure("Broken", "connection refused")
        .with_result("Working", brands(5));
    let session = session(registry, &["Broken", "Working"]);

    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = failures.clone();
    session
        .events()
        .subscribe::<events::QueryFailed>(handler_from_fn(move |event| {
            if let Some(failed) = event.as_any().downcast_ref::<events::QueryFailed>() {
                sink.lock().push(failed.message.clone());
            }
        }));

    let broken = session.activate("Broken");
    assert_eq!(
        broken.notice().map(|n| n.message.as_str()),
        Some("Database error: connection refused")
    );
    assert_eq!(*failures.lock(), vec!["connection refused".to_string()]);

    let working = session.activate("Working");
    assert!(working.is_ready());
    assert_eq!(working.row_count(), 5);

    // Re-selecting retries the query
    assert!(!session.activate("Broken").is_ready());
    assert_eq!(failures.lock().len(), 2);
}

#[test]
fn test_empty_result_is_not_an_error() {
    let empty = BatchBuilder::new()
        .text("brandname", Vec::<Option<&str>>::new())
        .float("ranking_value", Vec::new())
        .build()
        .unwrap();
    let registry = MemoryRegistry::new("fixtures").with_result("Quiet", empty);
    let session = session(registry, &["Quiet"]);

    let activations = Arc::new(Mutex::new(Vec::new()));
    let sink = activations.clone();
    session
        .events()
        .subscribe::<events::ViewActivated>(handler_from_fn(move |event| {
            if let Some(activated) = event.as_any().downcast_ref::<events::ViewActivated>() {
                sink.lock().push(activated.row_count);
            }
        }));

    let page = session.activate_default();
    assert!(matches!(page, RenderedPage::Empty { .. }));
    assert_eq!(page.notice().map(|n| n.message.as_str()), Some(EMPTY_MESSAGE));
    assert_eq!(*activations.lock(), vec![0]);
}

#[test]
fn test_pager_walks_45_rows() {
    let registry = MemoryRegistry::new("fixtures").with_result("Top", brands(45));
    let session = session(registry, &["Top"]);
    let key = ViewKey::derive("Top");

    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    session
        .events()
        .subscribe::<events::PageChanged>(handler_from_fn(move |event| {
            if let Some(changed) = event.as_any().downcast_ref::<events::PageChanged>() {
                sink.lock().push((changed.page, changed.total_pages));
            }
        }));

    let first = session.activate("Top");
    let brand = first.as_ready().unwrap().brand_chart.as_ref().unwrap();
    assert_eq!(brand.chart.data.len(), 20);
    assert_eq!(brand.pager.label, "Page 1 of 3");

    // Previous on page 1 does nothing
    let same = session.dispatch(&PagerCommand::previous(key.clone())).unwrap();
    assert_eq!(page_of(&same), 1);

    session.dispatch(&PagerCommand::next(key.clone())).unwrap();
    let last = session.dispatch(&PagerCommand::next(key.clone())).unwrap();
    let brand = last.as_ready().unwrap().brand_chart.as_ref().unwrap();
    assert_eq!(brand.chart.data.len(), 5);
    assert_eq!(brand.chart.title, "Ranking Value (Brands 41–45)");
    assert!(!brand.pager.next.enabled);

    let still_last = session.dispatch(&PagerCommand::next(key.clone())).unwrap();
    assert_eq!(page_of(&still_last), 3);

    assert_eq!(*changes.lock(), vec![(1, 3), (2, 3), (3, 3), (3, 3)]);

    // The table is never paginated
    assert_eq!(last.as_ready().unwrap().table.row_count(), 45);
}

#[test]
fn test_dispatch_for_unknown_view() {
    let registry = MemoryRegistry::new("fixtures").with_result("Top", brands(5));
    let session = session(registry, &["Top"]);
    assert!(session.dispatch(&PagerCommand::next(ViewKey::derive("Elsewhere"))).is_err());
    assert!(!session.activate("Elsewhere").is_ready());
}

#[test]
fn test_unknown_view_keeps_active_view() {
    let registry = MemoryRegistry::new("fixtures").with_result("Top", brands(30));
    let session = session(registry, &["Top"]);

    session.activate("Top");
    assert!(!session.activate("Elsewhere").is_ready());
    assert_eq!(session.active_view().as_deref(), Some("Top"));

    let page = session.set_brush(None);
    assert!(page.is_ready());
    assert_eq!(page.view_name(), "Top");
}

#[test]
fn test_brush_reaches_scatter() {
    let registry = MemoryRegistry::new("fixtures").with_result("Top", brands(30));
    let session = session(registry, &["Top"]);

    session.activate("Top");
    let page = session.set_brush(Some(BrushRegion::new([40.0, 43.0], [30.0, 34.0])));
    let scatter = page.as_ready().unwrap().scatter.chart().unwrap();
    let brush = scatter.brush.as_ref().unwrap();
    assert!(brush.region.is_some());
    assert_eq!(scatter.data.len(), 30);

    let docs = page.vega_lite_documents();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[2]["params"][0]["name"], "brush");
}
