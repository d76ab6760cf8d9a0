//! 세션 동안의 계산 이력.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

use crate::equations::{Equation, Evaluation};
use crate::quantity::{QuantityKind, UnitQuantity};

/// 이력 항목이 어디에서 만들어졌는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Equation(Equation),
    Conversion(QuantityKind),
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Equation(eq) => write!(f, "{eq}"),
            RecordSource::Conversion(kind) => write!(f, "{kind} Conversion"),
        }
    }
}

/// 이름, 값, 단위 한 벌.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl RecordValue {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}: {}", self.name, self.value)
        } else {
            write!(f, "{}: {} {}", self.name, self.value, self.unit)
        }
    }
}

/// 성공한 계산 한 건. 생성 후에는 읽기만 가능하다.
#[derive(Debug, Clone)]
pub struct CalculationRecord {
    source: RecordSource,
    inputs: Vec<RecordValue>,
    outputs: Vec<RecordValue>,
    note: Option<String>,
    timestamp: DateTime<Local>,
}

impl CalculationRecord {
    /// 공식 계산 결과로 항목을 만든다. `inputs`는 폼 순서를 유지한 기준 단위 값이다.
    pub fn from_evaluation(
        equation: Equation,
        inputs: Vec<RecordValue>,
        evaluation: &Evaluation,
    ) -> Self {
        let outputs = evaluation
            .outputs()
            .map(|o| RecordValue::new(o.label, o.value, o.unit))
            .collect();
        Self {
            source: RecordSource::Equation(equation),
            inputs,
            outputs,
            note: evaluation.note.clone(),
            timestamp: Local::now(),
        }
    }

    pub fn from_conversion(from: UnitQuantity, to: UnitQuantity) -> Self {
        Self {
            source: RecordSource::Conversion(from.kind()),
            inputs: vec![RecordValue::new("Value", from.value, from.unit.symbol())],
            outputs: vec![RecordValue::new("Result", to.value, to.unit.symbol())],
            note: None,
            timestamp: Local::now(),
        }
    }

    pub fn source(&self) -> RecordSource {
        self.source
    }

    /// 표시용 이름 (예: `Reynolds Number`, `Pressure Conversion`).
    pub fn name(&self) -> String {
        self.source.to_string()
    }

    pub fn inputs(&self) -> &[RecordValue] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[RecordValue] {
        &self.outputs
    }

    /// 주 결과 값.
    pub fn result(&self) -> f64 {
        self.outputs.first().map(|o| o.value).unwrap_or(f64::NAN)
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// `2024-01-01 12:00:00` 형식의 시각.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// 추가 순서를 유지하는 이력. 재정렬이나 중복 제거를 하지 않는다.
///
/// `capacity`를 넘으면 가장 오래된 항목부터 버린다. 0이면 제한이 없다.
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<CalculationRecord>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// 항목을 끝에 추가하고 추가된 항목을 돌려준다.
    pub fn push(&mut self, record: CalculationRecord) -> &CalculationRecord {
        self.records.push_back(record);
        self.evict_overflow();
        // push_back 직후이므로 비어 있을 수 없다
        &self.records[self.records.len() - 1]
    }

    /// 오래된 것부터 순서대로.
    pub fn records(&self) -> impl DoubleEndedIterator<Item = &CalculationRecord> + ExactSizeIterator {
        self.records.iter()
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &CalculationRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 용량을 바꾸고, 줄어든 경우 오래된 항목을 버린다.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_overflow();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn evict_overflow(&mut self) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() > self.capacity {
            if let Some(dropped) = self.records.pop_front() {
                tracing::debug!(record = %dropped.name(), "history full, evicted oldest record");
            }
        }
    }
}
