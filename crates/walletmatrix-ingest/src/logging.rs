// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

/// Pipeline stages of a dataset load, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    Scan,
    Decode,
    Resolve,
    Relate,
    Finalize,
}

/// One structured event recorded during a dataset load. Events are buffered
/// rather than logged directly so the caller can forward them to whatever
/// logging setup it runs under.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestEvent {
    pub stage: IngestStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct IngestLog {
    events: Vec<IngestEvent>,
}

impl IngestLog {
    pub fn emit(&mut self, stage: IngestStage, name: &str, fields: Vec<(&'static str, String)>) {
        self.events.push(IngestEvent {
            stage,
            name: name.to_string(),
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        });
    }

    #[must_use]
    pub fn events(&self) -> &[IngestEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<IngestEvent> {
        self.events
    }
}
