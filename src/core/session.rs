//! Session controller
//!
//! Holds the in-memory record state and writes it back through a
//! [`RecordStore`] after every mutating operation.

use crate::core::aggregator::{self, Scale, StartingGrade};
use crate::core::error::{SessionError, SessionResult};
use crate::core::models::{ExamRecord, ParameterUpdate, Parameters, RecordState};
use crate::core::store::RecordStore;
use crate::{debug, info};
use chrono::NaiveDate;

/// Record state bound to its storage backend
#[derive(Debug)]
pub struct Session<S: RecordStore> {
    store: S,
    state: RecordState,
}

impl<S: RecordStore> Session<S> {
    /// Load the state from the store
    ///
    /// # Errors
    /// Returns an error if the store cannot be read
    pub fn open(store: S) -> SessionResult<Self> {
        let state = store.load()?;
        Ok(Self { store, state })
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &RecordState {
        &self.state
    }

    /// Current parameters
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.state.parameters
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Exams without a grade, in storage order
    #[must_use]
    pub fn pending(&self) -> Vec<&ExamRecord> {
        self.state.pending().collect()
    }

    /// Exams with a grade, in storage order
    #[must_use]
    pub fn graded(&self) -> Vec<&ExamRecord> {
        self.state.graded().collect()
    }

    /// Add an exam, graded or not
    ///
    /// # Errors
    /// Returns an error if saving fails
    pub fn add_exam(&mut self, exam: ExamRecord) -> SessionResult<()> {
        info!("Adding exam '{}' ({} CFU)", exam.name, exam.credits);
        let mut next = self.state.clone();
        next.exams.push(exam);
        self.commit(next)
    }

    /// Give a grade to the `index`-th pending exam (1-based)
    ///
    /// # Errors
    /// Returns an error if the index is out of range or saving fails
    pub fn record_grade(
        &mut self,
        index: usize,
        grade: u8,
        date: Option<NaiveDate>,
    ) -> SessionResult<ExamRecord> {
        let position = self.position_of(index, |e| !e.is_graded())?;
        self.assign_at(position, grade, date)
    }

    /// Change grade and date of the `index`-th graded exam (1-based)
    ///
    /// # Errors
    /// Returns an error if the index is out of range or saving fails
    pub fn update_grade(
        &mut self,
        index: usize,
        grade: u8,
        date: Option<NaiveDate>,
    ) -> SessionResult<ExamRecord> {
        let position = self.position_of(index, ExamRecord::is_graded)?;
        self.assign_at(position, grade, date)
    }

    /// Remove the `index`-th exam of the full list (1-based)
    ///
    /// # Errors
    /// Returns an error if the index is out of range or saving fails
    pub fn remove_exam(&mut self, index: usize) -> SessionResult<ExamRecord> {
        let position = self.position_of(index, |_| true)?;
        let mut next = self.state.clone();
        let removed = next.exams.remove(position);
        info!("Removed exam '{}'", removed.name);
        self.commit(next)?;
        Ok(removed)
    }

    /// Clear grade and date of every exam
    ///
    /// # Errors
    /// Returns an error if saving fails
    pub fn reset(&mut self) -> SessionResult<()> {
        let mut next = self.state.clone();
        next.exams.iter_mut().for_each(ExamRecord::clear);
        info!("Reset {} exams", next.exams.len());
        self.commit(next)
    }

    /// Change some or all grading parameters
    ///
    /// # Errors
    /// Returns an error if saving fails
    pub fn set_parameters(&mut self, update: &ParameterUpdate) -> SessionResult<&Parameters> {
        let mut next = self.state.clone();
        next.parameters.apply(update);
        debug!("Parameters now {:?}", next.parameters);
        self.commit(next)?;
        Ok(&self.state.parameters)
    }

    /// Starting grade from the current exams
    #[must_use]
    pub fn starting_grade(&self, scale: Scale) -> StartingGrade {
        aggregator::compute_starting_grade(&self.state.exams, &self.state.parameters, scale)
    }

    /// Starting grade with one hypothetical extra exam; nothing is stored
    #[must_use]
    pub fn simulate(&self, grade: u8, credits: u32, scale: Scale) -> StartingGrade {
        aggregator::simulate_added_exam(
            &self.state.exams,
            grade,
            credits,
            &self.state.parameters,
            scale,
        )
    }

    /// Map a 1-based index within a filtered view to a position in the full list
    fn position_of<F>(&self, index: usize, keep: F) -> SessionResult<usize>
    where
        F: Fn(&ExamRecord) -> bool,
    {
        let positions: Vec<usize> = self
            .state
            .exams
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(*e))
            .map(|(i, _)| i)
            .collect();

        index
            .checked_sub(1)
            .and_then(|i| positions.get(i).copied())
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: positions.len(),
            })
    }

    fn assign_at(
        &mut self,
        position: usize,
        grade: u8,
        date: Option<NaiveDate>,
    ) -> SessionResult<ExamRecord> {
        let mut next = self.state.clone();
        let exam = &mut next.exams[position];
        exam.assign(grade, date);
        info!("Exam '{}' graded {grade}", exam.name);
        // committing re-sorts, so hand back a copy rather than a position
        let updated = exam.clone();
        self.commit(next)?;
        Ok(updated)
    }

    /// Sort and save `next`; the session only adopts it once the save succeeds
    fn commit(&mut self, mut next: RecordState) -> SessionResult<()> {
        next.sort_by_date();
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }
}
