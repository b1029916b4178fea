//! Audit trail for mutations made through the HTML pages.

use tracing::Level;

/// Tracing target every audit record is emitted on.
pub const AUDIT_TARGET: &str = "movies::audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    /// Deletions are reported one level above other mutations.
    pub fn level(self) -> Level {
        match self {
            AuditAction::Deleted => Level::WARN,
            AuditAction::Created | AuditAction::Updated => Level::INFO,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            AuditAction::Created => "added",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }
}

/// One committed mutation, with the affected record's field values.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub action: AuditAction,
    pub resource: &'static str,
    pub id: i64,
    pub fields: Vec<(&'static str, String)>,
}

impl AuditRecord {
    /// Human-readable summary, e.g. `"Actor has been added!"`.
    pub fn summary(&self) -> String {
        format!("{} has been {}!", self.resource, self.action.verb())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Sink for audit records, handed to each page controller.
pub trait AuditLog: Send + Sync {
    fn record(&self, record: &AuditRecord);
}

/// Writes audit records as `tracing` events on [`AUDIT_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, record: &AuditRecord) {
        let summary = record.summary();
        let fields = record
            .fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");

        if record.action.level() == Level::WARN {
            tracing::warn!(
                target: AUDIT_TARGET,
                resource = record.resource,
                id = record.id,
                %fields,
                "{summary}"
            );
        } else {
            tracing::info!(
                target: AUDIT_TARGET,
                resource = record.resource,
                id = record.id,
                %fields,
                "{summary}"
            );
        }
    }
}
