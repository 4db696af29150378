use crate::domain::model::{CourseTables, TableSchema};
use crate::domain::ports::{Clock, SystemClock, TableSource};
use crate::utils::error::Result;
use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Default)]
struct CacheState {
    tables: Option<Arc<CourseTables>>,
    last_loaded: Option<DateTime<Local>>,
}

/// In-memory copy of the workbook, re-read once it is older than the reload interval.
pub struct TableCache {
    source: Box<dyn TableSource>,
    schema: TableSchema,
    clock: Arc<dyn Clock>,
    reload_interval: TimeDelta,
    state: Mutex<CacheState>,
}

impl TableCache {
    pub fn new(source: Box<dyn TableSource>, schema: TableSchema) -> Self {
        Self::with_clock(source, schema, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Box<dyn TableSource>,
        schema: TableSchema,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            schema,
            clock,
            reload_interval: to_delta(DEFAULT_RELOAD_INTERVAL),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn reload_interval(mut self, interval: Duration) -> Self {
        self.reload_interval = to_delta(interval);
        self
    }

    /// Current snapshot, reloading first when stale.
    ///
    /// The staleness check and the reload run under one lock, so concurrent
    /// callers never see a half-replaced snapshot or start a second reload.
    pub fn tables(&self) -> Result<Arc<CourseTables>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        let stale = match (&state.tables, state.last_loaded) {
            (Some(_), Some(loaded)) => now - loaded > self.reload_interval,
            _ => true,
        };

        if !stale {
            tracing::debug!("Using cached course tables");
            if let Some(tables) = &state.tables {
                return Ok(Arc::clone(tables));
            }
        }

        tracing::info!("Reloading course tables from {}", self.source.describe());
        match self.load() {
            Ok(tables) => {
                let tables = Arc::new(tables);
                state.tables = Some(Arc::clone(&tables));
                state.last_loaded = Some(now);
                tracing::info!("Course tables reloaded at {}", now);
                Ok(tables)
            }
            Err(e) => {
                tracing::error!("Error reading course data: {}", e);
                Err(e)
            }
        }
    }

    pub fn last_loaded(&self) -> Option<DateTime<Local>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_loaded
    }

    fn load(&self) -> Result<CourseTables> {
        let workbook = self.source.load()?;
        CourseTables::from_workbook(workbook, &self.schema)
    }
}

fn to_delta(interval: Duration) -> TimeDelta {
    TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX)
}
