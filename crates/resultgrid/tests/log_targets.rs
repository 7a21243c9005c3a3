//! Checks which `tracing` targets the grid components log under.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use resultgrid::logging::targets;
use resultgrid::prelude::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber, span};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// `(target, message)` for events, `(target, name)` for spans.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(String, String)>>>);

impl Recorder {
    fn push(&self, target: &str, text: String) {
        self.0.lock().push((target.to_string(), text));
    }

    fn count(&self, target: &str, text: &str) -> usize {
        self.0
            .lock()
            .iter()
            .filter(|(t, m)| t == target && m == text)
            .count()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        self.push(metadata.target(), metadata.name().to_string());
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.push(event.metadata().target(), visitor.0);
    }
}

fn capture(f: impl FnOnce()) -> Recorder {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    recorder
}

fn bind() -> ResultSetGridAdapter<CellRegistry<String>, SectionedResults<&'static str>> {
    let grid = Arc::new(CellRegistry::new(String::new));
    grid.register_cell_type("Cell");
    let results = Arc::new(SectionedResults::loaded(vec![Section::new(vec!["a", "b"])]));
    ResultSetGridAdapter::new(grid, results, "Cell").unwrap()
}

#[test]
fn dequeues_log_under_the_cells_target() {
    let adapter = bind();
    let log = capture(|| {
        adapter.cell_at(Position::new(0, 0)).unwrap();
    });

    assert_eq!(log.count(targets::CELLS, "dequeued cell"), 1);
    assert_eq!(log.count(targets::ADAPTER, "dequeued cell"), 0);
}

#[test]
fn batches_open_a_perf_span() {
    let adapter = bind();
    let log = capture(|| {
        adapter
            .provider()
            .insert_item(Position::new(0, 0), "z")
            .unwrap();
    });

    assert_eq!(log.count(targets::PERF, "perf"), 1);
}

#[test]
fn configured_cell_is_logged_only_when_a_callback_runs() {
    let mut adapter = bind();
    let without = capture(|| {
        adapter.cell_at(Position::new(0, 1)).unwrap();
    });
    assert_eq!(without.count(targets::ADAPTER, "configured cell"), 0);

    adapter.set_configure_cell(|cell: &mut String, item: &&str| cell.push_str(item));
    let with = capture(|| {
        assert_eq!(adapter.cell_at(Position::new(0, 1)).unwrap(), "b");
    });
    assert_eq!(with.count(targets::ADAPTER, "configured cell"), 1);
}
