//! Single vs batch execution of a selected command.
//!
//! A batch gesture (shift held) or a multi-entity operand switches to batch
//! mode: the first `max_operands_num` entities are dispatched together and
//! the rest are dropped. The same ceiling drives [`decorate_label`], so the
//! rows carrying the batch cue are exactly the rows a batch run would touch.

use std::future::Future;

use futures::future::join_all;

use crate::settings::Settings;

/// Prefix marking a row that a batch run would include.
pub const BATCH_CUE: &str = "⇧: ";

/// What a command runs on.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Operand<T> {
    pub fn len(&self) -> usize {
        match self {
            Operand::Single(_) => 1,
            Operand::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Operand::Single(item) => vec![item],
            Operand::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for Operand<T> {
    fn from(items: Vec<T>) -> Self {
        Operand::Many(items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Single,
    Batch,
}

/// Outcome of [`BatchPolicy::execute`]; one entry per dispatched action, in
/// operand order.
#[derive(Debug)]
pub struct ExecutionReport {
    pub mode: ExecutionMode,
    pub dropped: usize,
    pub outcomes: Vec<anyhow::Result<()>>,
}

impl ExecutionReport {
    pub fn dispatched(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Collapse into the first error, if any action failed.
    pub fn into_result(self) -> anyhow::Result<()> {
        let total = self.outcomes.len();
        let failed = self.failures();
        match self.outcomes.into_iter().find_map(Result::err) {
            None => Ok(()),
            Some(err) if total == 1 => Err(err),
            Some(err) => Err(err.context(format!("{failed} of {total} actions failed"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    max_operands_num: usize,
}

impl BatchPolicy {
    pub fn new(max_operands_num: usize) -> Self {
        Self { max_operands_num }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_operands_num)
    }

    pub fn max_operands_num(&self) -> usize {
        self.max_operands_num
    }

    pub fn mode<T>(&self, batch_gesture: bool, operand: &Operand<T>) -> ExecutionMode {
        if batch_gesture || matches!(operand, Operand::Many(_)) {
            ExecutionMode::Batch
        } else {
            ExecutionMode::Single
        }
    }

    /// Run `single` on a lone operand, or `batch` on every operand up to the
    /// ceiling.
    ///
    /// Batch actions are all started before any of them is awaited and the
    /// call returns once every one has finished; a failure does not stop its
    /// siblings. Nothing can be cancelled once dispatched.
    pub async fn execute<T, S, SF, B, BF>(
        &self,
        batch_gesture: bool,
        operand: Operand<T>,
        single: S,
        batch: B,
    ) -> ExecutionReport
    where
        S: FnOnce(T) -> SF,
        SF: Future<Output = anyhow::Result<()>>,
        B: FnMut(T) -> BF,
        BF: Future<Output = anyhow::Result<()>>,
    {
        let report = match operand {
            Operand::Single(item) if !batch_gesture => ExecutionReport {
                mode: ExecutionMode::Single,
                dropped: 0,
                outcomes: vec![single(item).await],
            },
            operand => {
                let mut items = operand.into_vec();
                let total = items.len();
                items.truncate(self.max_operands_num);
                let dropped = total - items.len();
                if dropped > 0 {
                    tracing::debug!(
                        total,
                        max = self.max_operands_num,
                        "batch operands over the ceiling were dropped"
                    );
                }
                ExecutionReport {
                    mode: ExecutionMode::Batch,
                    dropped,
                    outcomes: join_all(items.into_iter().map(batch)).await,
                }
            }
        };
        for err in report.outcomes.iter().filter_map(|o| o.as_ref().err()) {
            tracing::warn!(mode = ?report.mode, "action failed: {err:#}");
        }
        report
    }

    /// [`decorate_label`] with this policy's ceiling.
    pub fn decorate<T>(&self, entity: &T, index: usize, field: impl Fn(&T) -> &str) -> String {
        decorate_label(entity, index, field, self.max_operands_num)
    }
}

/// Label for list row `index`, prefixed with [`BATCH_CUE`] when the row falls
/// under the batch ceiling.
pub fn decorate_label<T>(
    entity: &T,
    index: usize,
    field: impl Fn(&T) -> &str,
    max_operands_num: usize,
) -> String {
    let label = field(entity);
    if index < max_operands_num {
        format!("{BATCH_CUE}{label}")
    } else {
        label.to_string()
    }
}
