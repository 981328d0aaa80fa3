//! In-memory audit trail.
//!
//! Bounded FIFO buffer of security-relevant events. Handlers opt in by
//! calling [`AuditLog::record`]; nothing in the gateway enforces it. The
//! buffer is process-local and lost on restart.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::metrics;

/// A recorded audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub action: String,
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub success: bool,
}

/// An event as submitted by a caller; the log stamps the timestamp.
#[derive(Debug, Clone, Default)]
pub struct AuditEvent {
    pub user_id: Option<i64>,
    pub tenant_id: Option<String>,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<String>,
    pub ip: String,
    pub user_agent: Option<String>,
    pub details: Option<Value>,
    pub success: bool,
}

/// Exact-match filter; every provided field must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditFilter {
    pub user_id: Option<i64>,
    pub tenant_id: Option<String>,
    pub action: Option<String>,
    pub resource: Option<String>,
    pub resource_id: Option<String>,
    pub ip: Option<String>,
    pub success: Option<bool>,
}

impl AuditFilter {
    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(user_id) = self.user_id {
            if entry.user_id != Some(user_id) {
                return false;
            }
        }
        if let Some(tenant_id) = &self.tenant_id {
            if entry.tenant_id.as_deref() != Some(tenant_id) {
                return false;
            }
        }
        if let Some(action) = &self.action {
            if entry.action != *action {
                return false;
            }
        }
        if let Some(resource) = &self.resource {
            if entry.resource != *resource {
                return false;
            }
        }
        if let Some(resource_id) = &self.resource_id {
            if entry.resource_id.as_deref() != Some(resource_id) {
                return false;
            }
        }
        if let Some(ip) = &self.ip {
            if entry.ip != *ip {
                return false;
            }
        }
        if let Some(success) = self.success {
            if entry.success != success {
                return false;
            }
        }
        true
    }
}

/// Bounded audit buffer with FIFO eviction.
pub struct AuditLog {
    entries: Mutex<VecDeque<AuditEntry>>,
    capacity: usize,
    echo_to_console: bool,
}

impl AuditLog {
    pub fn new(capacity: usize, echo_to_console: bool) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
            echo_to_console,
        }
    }

    /// Stamp and append an event, evicting the oldest entry past capacity.
    pub fn record(&self, event: AuditEvent) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            user_id: event.user_id,
            tenant_id: event.tenant_id,
            action: event.action,
            resource: event.resource,
            resource_id: event.resource_id,
            ip: event.ip,
            user_agent: event.user_agent,
            details: event.details,
            success: event.success,
        };

        if self.echo_to_console {
            match serde_json::to_string(&entry) {
                Ok(json) => tracing::info!(target: "audit", entry = %json, "audit event"),
                Err(e) => tracing::warn!(target: "audit", error = %e, "unserializable audit entry"),
            }
        }

        let mut entries = self.entries.lock().expect("audit log mutex poisoned");
        entries.push_back(entry);
        if entries.len() > self.capacity {
            entries.pop_front();
        }
        metrics::record_audit_event();
    }

    /// Entries matching the filter, oldest first. An empty filter returns a
    /// copy of the whole buffer.
    pub fn query(&self, filter: &AuditFilter) -> Vec<AuditEntry> {
        let entries = self.entries.lock().expect("audit log mutex poisoned");
        entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit log mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
