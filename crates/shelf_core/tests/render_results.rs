use pretty_assertions::assert_eq;
use shelf_core::{
    render, update, BookEntry, BookRecord, LookupParameters, Msg, RequestCoordinator, ResultView,
    StatusMessageSequence,
};

fn dune() -> BookRecord {
    BookRecord {
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        description: "d".to_string(),
        cover_image_url: "u1".to_string(),
        record_link: "l1".to_string(),
        catalog_call_number: "C1".to_string(),
    }
}

#[test]
fn single_book_is_passed_through_keyed_by_call_number() {
    let (coordinator, _) = update(
        RequestCoordinator::default(),
        Msg::Submit(LookupParameters::new("1", "to-read", "sfpl", "MAIN")),
    );
    let (coordinator, _) = update(
        coordinator,
        Msg::LookupDone {
            request_id: 1,
            outcome: Ok(vec![dune()]),
        },
    );

    assert_eq!(
        render(coordinator.state()),
        ResultView::Books(vec![BookEntry {
            key: "C1".to_string(),
            record: dune(),
        }])
    );
}

#[test]
fn waiting_then_empty_shelf_scenario() {
    let script = StatusMessageSequence::default();
    let (mut coordinator, _) = update(
        RequestCoordinator::default(),
        Msg::Submit(LookupParameters::new("1", "to-read", "sfpl", "MAIN")),
    );
    assert_eq!(coordinator.view().status.as_ref(), Some(script.get(0)));

    coordinator.tick(1);
    assert_eq!(coordinator.view().status.as_ref(), Some(script.get(1)));

    let (mut coordinator, _) = update(
        coordinator,
        Msg::LookupDone {
            request_id: 1,
            outcome: Ok(Vec::new()),
        },
    );
    assert_eq!(coordinator.view().results, ResultView::Empty);
    coordinator.consume_dirty();

    for _ in 0..10 {
        assert!(!coordinator.tick(1));
    }
    assert!(!coordinator.consume_dirty());
    assert_eq!(coordinator.view().status, None);
    assert_eq!(coordinator.view().results, ResultView::Empty);
}
