use std::sync::Arc;

use crate::error::TimesheetError;
use crate::timesheet::categorizer::HoursCategorizer;
use crate::timesheet::grid::{MonthlyGrid, month_bounds};
use crate::timesheet::store::{HolidayLookup, TimesheetStore};

/// Loads and saves month grids against the holiday and timesheet collaborators.
#[derive(Clone)]
pub struct DayGridBuilder {
    holidays: Arc<dyn HolidayLookup>,
    store: Arc<dyn TimesheetStore>,
    categorizer: HoursCategorizer,
}

impl DayGridBuilder {
    pub fn new(
        holidays: Arc<dyn HolidayLookup>,
        store: Arc<dyn TimesheetStore>,
        categorizer: HoursCategorizer,
    ) -> Self {
        Self {
            holidays,
            store,
            categorizer,
        }
    }

    pub fn categorizer(&self) -> &HoursCategorizer {
        &self.categorizer
    }

    pub fn holiday_lookup(&self) -> &dyn HolidayLookup {
        self.holidays.as_ref()
    }

    /// Fetches holidays and saved rows together, then synthesizes the month.
    /// Either fetch failing fails the whole build; no partial grid comes back.
    pub async fn build_grid(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<MonthlyGrid, TimesheetError> {
        month_bounds(year, month)?;

        let (holidays, existing) = futures::try_join!(
            self.holidays.holidays(year, month, entity_id),
            self.store.get_monthly(employee_id, year, month, entity_id),
        )?;

        tracing::debug!(
            employee_id,
            entity_id,
            year,
            month,
            holidays = holidays.len(),
            saved_days = existing.len(),
            "Building timesheet grid"
        );

        MonthlyGrid::reconcile(
            employee_id,
            entity_id,
            year,
            month,
            &holidays,
            existing,
            &self.categorizer,
        )
    }

    /// Re-derives the holiday names on a grid that came back from a client.
    pub async fn refresh_holidays(&self, grid: &mut MonthlyGrid) -> Result<(), TimesheetError> {
        let holidays = self
            .holidays
            .holidays(grid.year, grid.month, grid.entity_id)
            .await?;
        grid.mark_holidays(&holidays);
        Ok(())
    }

    /// Overwrites the employee's whole month with `grid`.
    ///
    /// Destructive: days left blank erase whatever was saved for them before.
    /// Concurrent saves of the same month are last-save-wins.
    pub async fn save_grid(&self, grid: &MonthlyGrid) -> Result<(), TimesheetError> {
        self.store
            .save_monthly(grid.employee_id, &grid.days, grid.entity_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    employee_id = grid.employee_id,
                    entity_id = grid.entity_id,
                    year = grid.year,
                    month = grid.month,
                    "Timesheet save failed"
                );
                e
            })
    }
}
