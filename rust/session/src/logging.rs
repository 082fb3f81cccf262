use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

pub const DEFAULT_FILTER: &str = "info,inkflow_session=debug";

/// One captured tracing event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// In-memory sink so tests can assert on what the session logged.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    fn captured(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.captured().clone()
    }

    pub fn clear(&self) {
        self.captured().clear();
    }

    pub fn into_layer<S>(self) -> CaptureLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        CaptureLayer {
            sink: self,
            _subscriber: PhantomData,
        }
    }
}

pub struct CaptureLayer<S> {
    sink: TestLogSubscriber,
    _subscriber: PhantomData<S>,
}

impl<S> Layer<S> for CaptureLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EntryFields::default();
        event.record(&mut fields);

        let metadata = event.metadata();
        self.sink.captured().push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            message: fields.message.unwrap_or_default(),
            fields: fields.rest,
        });
    }
}

#[derive(Default)]
struct EntryFields {
    message: Option<String>,
    rest: BTreeMap<String, String>,
}

impl Visit for EntryFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        match field.name() {
            "message" => self.message = Some(rendered),
            name => {
                self.rest.insert(name.to_owned(), rendered);
            }
        }
    }
}

/// Installs the global subscriber: human-readable lines on stderr, or one
/// JSON object per line when `json` is set. `RUST_LOG` overrides the
/// default filter.
pub fn init_logging(json: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    }
}

/// Installs the capturing layer as the process-wide default on first call
/// and hands back the shared sink, emptied.
pub fn init_test_logging() -> TestLogSubscriber {
    static SINK: OnceLock<TestLogSubscriber> = OnceLock::new();

    let sink = SINK.get_or_init(|| {
        let sink = TestLogSubscriber::new();
        let registry = Registry::default().with(sink.clone().into_layer::<Registry>());
        // loses quietly to a subscriber installed elsewhere
        let _ = tracing::subscriber::set_global_default(registry);
        sink
    });
    sink.clear();
    sink.clone()
}
