//! Critical-event notification fan-out.
//!
//! When a recorded event's severity crosses the configured threshold, every
//! active administrator holding the elevated role gets one notification
//! row. Delivery is best-effort: a failure for one recipient is logged and
//! skipped, the rest are still attempted, and nothing propagates back to
//! the caller that triggered the audit write.

use serde_json::Value;
use tracing::{debug, error, warn};

use provena_contracts::{access::Role, event::Notification};
use provena_store::{AdminDirectory, NotificationSink};

use std::sync::Arc;

/// Fans notifications out to all active elevated-role administrators.
pub struct CriticalEventNotifier {
    directory: Arc<dyn AdminDirectory>,
    sink: Arc<dyn NotificationSink>,
    notify_role: Role,
}

impl CriticalEventNotifier {
    /// Create a notifier over the given directory and sink.
    pub fn new(
        directory: Arc<dyn AdminDirectory>,
        sink: Arc<dyn NotificationSink>,
        notify_role: Role,
    ) -> Self {
        Self {
            directory,
            sink,
            notify_role,
        }
    }

    /// Notify every active elevated admin about a critical event.
    ///
    /// Returns the number of notifications actually delivered. Directory
    /// failure means nobody can be notified — it is logged and 0 is
    /// returned. Per-recipient sink failures are logged and skipped.
    /// Repeated events produce repeated notifications; deduplication is an
    /// explicit non-goal.
    pub fn notify_admins(&self, event_type: &str, metadata: &Value) -> usize {
        let admins = match self.directory.list_active_admins(self.notify_role) {
            Ok(admins) => admins,
            Err(e) => {
                error!(
                    role = %self.notify_role,
                    error = %e,
                    "failed to list admins for critical-event fan-out"
                );
                return 0;
            }
        };

        let mut delivered = 0usize;
        for admin_id in admins {
            let notification = Notification {
                admin_id: admin_id.clone(),
                kind: "warning".to_string(),
                title: format!("Critical Event: {}", event_type),
                message: "A critical action was performed".to_string(),
                metadata: metadata.clone(),
            };

            match self.sink.insert_notification(&notification) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        admin_id = %admin_id,
                        event_type = %event_type,
                        error = %e,
                        "failed to create notification"
                    );
                }
            }
        }

        debug!(
            event_type = %event_type,
            delivered,
            "critical-event fan-out complete"
        );
        delivered
    }
}
