//! 通知投递指标
//!
//! 由 dispatcher 的 worker 在每次提交、投递尝试和最终结果时调用。
//! 未安装 recorder 时所有调用均为空操作。

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// 投递成功
pub const OUTCOME_DELIVERED: &str = "delivered";
/// 未注册的 channel
pub const OUTCOME_BACKEND_NOT_FOUND: &str = "backend_not_found";
/// 重试次数用尽
pub const OUTCOME_RETRY_EXHAUSTED: &str = "retry_exhausted";

/// 注册指标描述 (Prometheus HELP 文本)
pub fn describe_metrics() {
    describe_counter!(
        "notifier_notifications_submitted_total",
        "Notifications accepted into the dispatch queue"
    );
    describe_counter!(
        "notifier_delivery_attempts_total",
        "Delivery attempts by channel and status"
    );
    describe_counter!(
        "notifier_deliveries_total",
        "Terminal delivery outcomes by channel"
    );
    describe_gauge!("notifier_queue_depth", "Notifications waiting in the queue");
    describe_counter!("notifier_workers_started_total", "Workers spawned");
}

/// 记录通知入队
pub fn record_submitted(channel: &str) {
    counter!(
        "notifier_notifications_submitted_total",
        "channel" => channel.to_string()
    )
    .increment(1);
}

/// 记录单次投递尝试
pub fn record_delivery_attempt(channel: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "notifier_delivery_attempts_total",
        "channel" => channel.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录最终投递结果
///
/// `outcome` 取值见 `OUTCOME_*` 常量。
pub fn record_delivery_outcome(channel: &str, outcome: &'static str) {
    counter!(
        "notifier_deliveries_total",
        "channel" => channel.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// 记录队列深度
pub fn record_queue_depth(depth: usize) {
    gauge!("notifier_queue_depth").set(depth as f64);
}

/// 记录 worker 启动
pub fn record_worker_started() {
    counter!("notifier_workers_started_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        describe_metrics();
        record_submitted("Slack");
        record_delivery_attempt("Slack", false);
        record_delivery_outcome("Slack", OUTCOME_RETRY_EXHAUSTED);
        record_queue_depth(3);
        record_worker_started();
    }
}
