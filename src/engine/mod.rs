//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! For every root stream the engine walks one pagination chain. Each record
//! of a parent stream immediately triggers the full chain of every child
//! stream, scoped by the contexts the parent derives from that record, so
//! output follows parent record order.

mod types;

pub use types::{SyncConfig, SyncStats};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::http::{RequestConfig, RequestExecutor};
use crate::output::{Message, MessageWriter};
use crate::pagination::PageToken;
use crate::state::State;
use crate::streams::{Stream, StreamContext};
use crate::tap::Tap;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine<E: RequestExecutor> {
    /// Request transport
    executor: E,
    /// Bookmarks, emitted as STATE
    state: State,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
    /// Streams whose records are emitted
    selected: HashSet<String>,
    /// Streams whose SCHEMA was already written
    schemas_sent: HashSet<String>,
}

impl<E: RequestExecutor> SyncEngine<E> {
    /// Create a new sync engine
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            state: State::new(),
            config: SyncConfig::default(),
            stats: SyncStats::default(),
            selected: HashSet::new(),
            schemas_sent: HashSet::new(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from previously emitted state
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    /// Current state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Request transport
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync every selected stream of a tap
    ///
    /// Without a catalog every stream is selected. A selected child stream
    /// forces its parent to be walked; the parent's records are only emitted
    /// when the parent is selected too.
    pub async fn sync<W: Write + Send>(
        &mut self,
        tap: &Tap,
        catalog: Option<&Catalog>,
        out: &mut MessageWriter<W>,
    ) -> Result<SyncStats> {
        let start = Instant::now();
        let streams = tap.discover_streams();

        self.selected = streams
            .iter()
            .map(|s| s.name())
            .filter(|name| catalog.map_or(true, |c| c.is_selected(name)))
            .map(str::to_string)
            .collect();
        self.schemas_sent.clear();

        for stream in streams.iter().filter(|s| s.parent_stream().is_none()) {
            let family = family(stream.as_ref(), &streams);
            if !family.iter().any(|s| self.is_selected(s.name())) {
                debug!("Skipping unselected stream: {}", stream.name());
                continue;
            }

            info!("Starting sync for stream: {}", stream.name());
            for member in &family {
                self.state.reset_stream(member.name());
                self.write_schema(*member, out)?;
            }

            self.sync_chain(stream.as_ref(), &streams, None, out).await?;
            self.stats.add_stream();

            for member in &family {
                if self.is_selected(member.name()) {
                    info!(
                        "Completed sync for {}: {} records",
                        member.name(),
                        self.stats.records_for(member.name())
                    );
                }
            }
            out.write(&Message::state(&self.state))?;
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Sync finished: {} records in {} pages across {} chains",
            self.stats.records_synced, self.stats.pages_fetched, self.stats.chains_synced
        );

        Ok(self.stats.clone())
    }

    /// Walk one pagination chain of a stream, then the child chains of each
    /// of its records
    pub fn sync_chain<'a, W>(
        &'a mut self,
        stream: &'a dyn Stream,
        streams: &'a [Box<dyn Stream>],
        context: Option<&'a StreamContext>,
        out: &'a mut MessageWriter<W>,
    ) -> BoxFuture<'a, Result<()>>
    where
        E: 'a,
        W: Write + Send + 'a,
    {
        async move {
            let emit = self.is_selected(stream.name());
            let children: Vec<&dyn Stream> = streams
                .iter()
                .filter(|s| s.parent_stream() == Some(stream.name()))
                .map(AsRef::as_ref)
                .collect();
            let paginator = stream.paginator();
            let url = stream.url();

            match context {
                Some(ctx) => debug!("Starting chain for {} ({ctx})", stream.name()),
                None => debug!("Starting chain for {}", stream.name()),
            }

            let mut next_page_token: Option<PageToken> = None;
            let mut seen_tokens: HashSet<PageToken> = HashSet::new();
            let mut emitted = 0usize;
            let mut page_count = 0usize;

            'pages: loop {
                let params = stream.get_url_params(context, next_page_token.as_ref());
                let mut request = RequestConfig::new().with_query(params);
                for (key, value) in stream.http_headers() {
                    request = request.header(key, value);
                }

                let body = self.executor.get_json(&url, request).await?;
                page_count += 1;
                self.stats.add_page();

                let records = extract_records(&body, stream.records_jsonpath())?;
                debug!(
                    "Page {page_count} of {}: fetched {} records",
                    stream.name(),
                    records.len()
                );

                for record in records {
                    let record = stream.annotate_record(record, context);
                    if self.config.validate_records && !self.check_record(stream, &record)? {
                        continue;
                    }

                    if emit {
                        out.write(&Message::record(stream.name(), record.clone()))?;
                        self.stats.add_record(stream.name());
                    }
                    emitted += 1;

                    if !children.is_empty() {
                        for child_context in stream.generate_child_contexts(&record, context)? {
                            for child in &children {
                                self.sync_chain(*child, streams, Some(&child_context), out)
                                    .await?;
                            }
                        }
                    }

                    if self.config.max_records_per_chain > 0
                        && emitted >= self.config.max_records_per_chain
                    {
                        debug!(
                            "Reached max records ({}) for {}",
                            self.config.max_records_per_chain,
                            stream.name()
                        );
                        break 'pages;
                    }
                }

                match paginator.next_page_token(&body)? {
                    None => break,
                    Some(token) => {
                        if !seen_tokens.insert(token.clone()) {
                            return Err(Error::PaginationLoop {
                                stream: stream.name().to_string(),
                                url: token.to_string(),
                            });
                        }
                        next_page_token = Some(token);
                    }
                }
            }

            self.stats.add_chain();
            self.state.mark_completed(stream.name(), context);
            Ok(())
        }
        .boxed()
    }

    fn is_selected(&self, stream: &str) -> bool {
        self.selected.contains(stream)
    }

    fn write_schema<W: Write>(
        &mut self,
        stream: &dyn Stream,
        out: &mut MessageWriter<W>,
    ) -> Result<()> {
        if !self.is_selected(stream.name())
            || !self.schemas_sent.insert(stream.name().to_string())
        {
            return Ok(());
        }
        let key_properties = stream
            .primary_keys()
            .iter()
            .map(|k| (*k).to_string())
            .collect();
        out.write(&Message::schema(
            stream.name(),
            stream.schema().to_json_schema(),
            key_properties,
        ))
    }

    /// Validate a record; `Ok(false)` means skip it
    fn check_record(&mut self, stream: &dyn Stream, record: &Value) -> Result<bool> {
        let errors = stream.schema().validate(record);
        if errors.is_empty() {
            return Ok(true);
        }

        let err = Error::SchemaValidation {
            stream: stream.name().to_string(),
            errors: errors.iter().map(ToString::to_string).collect(),
        };
        if self.config.fail_fast {
            return Err(err);
        }
        self.stats.add_error();
        warn!("Skipping record: {err}");
        Ok(false)
    }
}

/// A root stream followed by its descendants, parents before children
fn family<'a>(root: &'a dyn Stream, streams: &'a [Box<dyn Stream>]) -> Vec<&'a dyn Stream> {
    let mut members = vec![root];
    let mut i = 0;
    while i < members.len() {
        let name = members[i].name();
        members.extend(
            streams
                .iter()
                .filter(|s| s.parent_stream() == Some(name))
                .map(AsRef::as_ref),
        );
        i += 1;
    }
    members
}

/// Extract records from a response body using jsonpath-rust
///
/// A body without the records path yields no records.
pub fn extract_records(body: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(body) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
