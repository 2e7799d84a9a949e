use crate::error::TimesheetError;
use crate::timesheet::builder::DayGridBuilder;
use crate::timesheet::grid::{DayFieldEdit, MonthlyGrid};

/// Identifies one load request. Only the most recent ticket may install its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    pub employee_id: u64,
    pub year: i32,
    pub month: u32,
    pub entity_id: u64,
}

/// An operator's editing session over one month grid.
///
/// Failed loads leave the current grid alone and failed saves keep unsaved
/// edits, so nothing typed is lost to a storage hiccup.
#[derive(Debug, Default)]
pub struct TimesheetView {
    grid: Option<MonthlyGrid>,
    latest: u64,
}

impl TimesheetView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over a grid edited elsewhere, e.g. one posted back by a client.
    pub fn with_grid(grid: MonthlyGrid) -> Self {
        Self {
            grid: Some(grid),
            latest: 0,
        }
    }

    pub fn grid(&self) -> Option<&MonthlyGrid> {
        self.grid.as_ref()
    }

    pub fn into_grid(self) -> Option<MonthlyGrid> {
        self.grid
    }

    /// Starts a load; any ticket issued earlier becomes stale.
    pub fn begin_load(
        &mut self,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            token: self.latest,
            employee_id,
            year,
            month,
            entity_id,
        }
    }

    /// Installs a finished load. Returns `Ok(false)` when a newer load superseded it.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MonthlyGrid, TimesheetError>,
    ) -> Result<bool, TimesheetError> {
        if ticket.token != self.latest {
            tracing::debug!(
                employee_id = ticket.employee_id,
                year = ticket.year,
                month = ticket.month,
                "Discarding stale timesheet load"
            );
            return Ok(false);
        }

        let grid = result?;
        self.grid = Some(grid);
        Ok(true)
    }

    pub async fn load(
        &mut self,
        builder: &DayGridBuilder,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<bool, TimesheetError> {
        let ticket = self.begin_load(employee_id, year, month, entity_id);
        let result = builder
            .build_grid(employee_id, year, month, entity_id)
            .await;
        self.finish_load(ticket, result)
    }

    pub fn edit(
        &mut self,
        index: usize,
        edit: DayFieldEdit,
        builder: &DayGridBuilder,
    ) -> Result<(), TimesheetError> {
        let grid = self
            .grid
            .as_mut()
            .ok_or(TimesheetError::DayOutOfRange { index, len: 0 })?;
        grid.edit(index, edit, builder.categorizer())
    }

    pub fn apply_standard_pattern(&mut self, builder: &DayGridBuilder) -> usize {
        self.grid
            .as_mut()
            .map(|grid| grid.apply_standard_pattern(builder.categorizer()))
            .unwrap_or(0)
    }

    /// Saves the whole month, then reloads it so the grid shows what storage kept.
    pub async fn save(&mut self, builder: &DayGridBuilder) -> Result<(), TimesheetError> {
        let grid = self.grid.as_ref().ok_or(TimesheetError::EmptyGrid)?;
        builder.save_grid(grid).await?;

        let (employee_id, year, month, entity_id) =
            (grid.employee_id, grid.year, grid.month, grid.entity_id);
        self.load(builder, employee_id, year, month, entity_id)
            .await
            .map(|_| ())
    }
}
